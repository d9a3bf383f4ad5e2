//! Grid storage and value range.

use serde::{Deserialize, Serialize};

/// A 2D grid of samples in flat row-major storage, top row first.
///
/// `None` marks a missing sample. Built once from a flat sequence and
/// never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    ncols: usize,
    nrows: usize,
    cells: Vec<Option<f64>>,
}

impl Grid {
    /// Build a grid from a flat sample sequence in x-ascending,
    /// y-descending row-major order (the ASCIIGrid convention).
    ///
    /// Samples that are missing or non-finite become `None`; no sample
    /// aborts the build.
    ///
    /// # Panics
    ///
    /// Panics if `samples.len() != ncols * nrows`. Callers validate
    /// dimensions before building.
    pub fn build(ncols: usize, nrows: usize, samples: &[Option<f64>]) -> Self {
        assert_eq!(samples.len(), ncols * nrows);
        let mut cells = Vec::with_capacity(samples.len());
        let mut p = 0;
        for _row in 0..nrows {
            for _col in 0..ncols {
                cells.push(samples[p].filter(|z| z.is_finite()));
                p += 1;
            }
        }
        Self { ncols, nrows, cells }
    }

    /// The value at `(row, col)`, or `None` for a missing sample.
    ///
    /// # Panics
    ///
    /// Panics if `row >= nrows` or `col >= ncols`.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        assert!(row < self.nrows && col < self.ncols, "grid index out of range");
        self.cells[row * self.ncols + col]
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Read-only access to the flat row-major cells, for consumers that
    /// walk the grid directly (e.g. a rendering layer).
    pub fn values(&self) -> &[Option<f64>] {
        &self.cells
    }
}

/// The `{min, max}` summary of the valid values in a field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    /// Min/max reduction over the valid (finite, non-missing) samples of a
    /// flat sequence, or `None` when no valid sample exists.
    pub fn of_samples(samples: &[Option<f64>]) -> Option<Range> {
        let mut valid = samples
            .iter()
            .filter_map(|s| *s)
            .filter(|z| z.is_finite());
        let first = valid.next()?;
        let (min, max) = valid.fold((first, first), |(lo, hi), z| (lo.min(z), hi.max(z)));
        Some(Range { min, max })
    }
}
