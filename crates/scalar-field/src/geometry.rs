//! Geometry of a regular geographic grid.
//!
//! Maps between the three coordinate systems a gridded field lives in:
//! geographic coordinates (longitude/latitude), 2D grid indexes
//! `(row, column)` counted from the top-left sample, and the flat
//! row-major array index. Samples are registered at cell centers, so the
//! sample at `(0, 0)` sits half a cell in from the upper-left corner of
//! the extent.

use serde::{Deserialize, Serialize};

use crate::bbox::BoundingBox;
use crate::error::{FieldError, FieldResult};

/// Specification of a regular grid anchored at its lower-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridGeometry {
    /// Number of columns (samples per row).
    pub ncols: usize,
    /// Number of rows.
    pub nrows: usize,
    /// X coordinate of the lower-left corner of the extent.
    pub xllcorner: f64,
    /// Y coordinate of the lower-left corner of the extent.
    pub yllcorner: f64,
    /// Spacing between adjacent samples, in coordinate units.
    pub cellsize: f64,
}

impl GridGeometry {
    /// Create a grid geometry, rejecting degenerate dimensions.
    pub fn new(
        ncols: usize,
        nrows: usize,
        xllcorner: f64,
        yllcorner: f64,
        cellsize: f64,
    ) -> FieldResult<Self> {
        if ncols == 0 || nrows == 0 {
            return Err(FieldError::InvalidGeometry(format!(
                "grid dimensions must be positive, got {ncols}x{nrows}"
            )));
        }
        if !cellsize.is_finite() || cellsize <= 0.0 {
            return Err(FieldError::InvalidGeometry(format!(
                "cell size must be a positive number, got {cellsize}"
            )));
        }
        if !xllcorner.is_finite() || !yllcorner.is_finite() {
            return Err(FieldError::InvalidGeometry(
                "corner coordinates must be finite".to_string(),
            ));
        }
        Ok(Self {
            ncols,
            nrows,
            xllcorner,
            yllcorner,
            cellsize,
        })
    }

    /// Calculate the bounding box of this grid's extent.
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(
            self.xllcorner,
            self.yllcorner,
            self.xllcorner + self.ncols as f64 * self.cellsize,
            self.yllcorner + self.nrows as f64 * self.cellsize,
        )
    }

    /// Check whether a geographic coordinate falls inside the extent.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.bbox().contains(lon, lat)
    }

    /// Convert a geographic coordinate to fractional `(row, column)`
    /// indexes, or `None` outside the extent.
    ///
    /// Rows grow from the top edge downward, matching the row-major data
    /// order. Positions inside the outer half-cell margin clamp to the
    /// boundary samples, so every in-extent point resolves to indexes in
    /// `[0, nrows-1] x [0, ncols-1]`.
    pub fn fractional_indexes(&self, lon: f64, lat: f64) -> Option<(f64, f64)> {
        if !self.contains(lon, lat) {
            return None;
        }
        let col = (lon - self.xllcorner) / self.cellsize - 0.5;
        let row = (self.bbox().max_y - lat) / self.cellsize - 0.5;
        Some((
            row.clamp(0.0, (self.nrows - 1) as f64),
            col.clamp(0.0, (self.ncols - 1) as f64),
        ))
    }

    /// Get the flat row-major array index for a 2D grid position.
    pub fn flat_index(&self, row: usize, col: usize) -> usize {
        row * self.ncols + col
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.ncols * self.nrows
    }

    /// Check if the grid has no points.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
