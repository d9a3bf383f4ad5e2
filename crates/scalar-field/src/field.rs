//! Scalar field over a regular geographic grid.

use tracing::debug;

use crate::error::{FieldError, FieldResult};
use crate::geometry::GridGeometry;
use crate::grid::{Grid, Range};
use crate::interpolate::bilinear;

/// A 2D scalar field (elevation, wind speed magnitude, concentration, ...)
/// sampled on a regular geographic grid.
///
/// Owns its grid and value range exclusively and is immutable after
/// construction; every lookup is a pure read, so instances are safe to
/// share across threads.
#[derive(Debug, Clone)]
pub struct ScalarField {
    geometry: GridGeometry,
    grid: Grid,
    range: Option<Range>,
}

impl ScalarField {
    /// Build a field from a flat sample sequence in x-ascending,
    /// y-descending row-major order (the ASCIIGrid convention).
    ///
    /// Computes the value range over the valid samples. Fails with
    /// [`FieldError::DimensionMismatch`] if the sequence length does not
    /// match the geometry.
    pub fn new(geometry: GridGeometry, samples: Vec<Option<f64>>) -> FieldResult<Self> {
        if samples.len() != geometry.len() {
            return Err(FieldError::DimensionMismatch {
                expected: geometry.len(),
                actual: samples.len(),
            });
        }
        let range = Range::of_samples(&samples);
        let grid = Grid::build(geometry.ncols, geometry.nrows, &samples);
        debug!(
            ncols = geometry.ncols,
            nrows = geometry.nrows,
            range = ?range,
            "built scalar field"
        );
        Ok(Self {
            geometry,
            grid,
            range,
        })
    }

    /// Wrap a pre-built grid. No raw sample sequence is available, so the
    /// value range is left undefined.
    pub fn from_grid(geometry: GridGeometry, grid: Grid) -> FieldResult<Self> {
        if grid.ncols() != geometry.ncols || grid.nrows() != geometry.nrows {
            return Err(FieldError::DimensionMismatch {
                expected: geometry.len(),
                actual: grid.ncols() * grid.nrows(),
            });
        }
        Ok(Self {
            geometry,
            grid,
            range: None,
        })
    }

    /// Build a field from the content of an ASCIIGrid file.
    pub fn from_ascii_grid(text: &str) -> FieldResult<Self> {
        let parsed = ascgrid_parser::parse(text)?;
        let geometry = GridGeometry::new(
            parsed.header.ncols,
            parsed.header.nrows,
            parsed.header.xllcorner,
            parsed.header.yllcorner,
            parsed.header.cellsize,
        )?;
        Self::new(geometry, parsed.samples)
    }

    /// The exact grid value at integer cell `(row, col)`; `None` marks a
    /// missing sample.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is outside the grid, consistent with slice
    /// indexing. Use [`GridGeometry::len`] and the geometry dimensions to
    /// bound lookups.
    pub fn value_at_indexes(&self, row: usize, col: usize) -> Option<f64> {
        self.grid.get(row, col)
    }

    /// The continuously-interpolated value at a geographic coordinate.
    ///
    /// Maps the coordinate to a fractional grid position, reads the four
    /// surrounding samples and blends them bilinearly. Returns `None` when
    /// the point lies outside the grid extent or any of the four
    /// surrounding samples is missing.
    pub fn value_at(&self, lon: f64, lat: f64) -> Option<f64> {
        let (row, col) = self.geometry.fractional_indexes(lon, lat)?;
        let row0 = row.floor() as usize;
        let col0 = col.floor() as usize;
        let row1 = (row0 + 1).min(self.geometry.nrows - 1);
        let col1 = (col0 + 1).min(self.geometry.ncols - 1);

        let g00 = self.grid.get(row0, col0)?;
        let g10 = self.grid.get(row0, col1)?;
        let g01 = self.grid.get(row1, col0)?;
        let g11 = self.grid.get(row1, col1)?;

        Some(bilinear(col - col0 as f64, row - row0 as f64, g00, g10, g01, g11))
    }

    /// The `{min, max}` of the valid samples, or `None` when the field was
    /// constructed without a raw sample sequence.
    pub fn range(&self) -> Option<Range> {
        self.range
    }

    /// The grid geometry.
    pub fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    /// Read-only access to the underlying grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }
}
