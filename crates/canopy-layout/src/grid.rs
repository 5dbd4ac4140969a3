//! Wrapped grid placement for fixed-size items.
//!
//! Items flow left to right and wrap after a column count derived from the
//! available width. Used for legend entries.

use canopy_core::{Point, Size};
use serde::{Deserialize, Serialize};

/// Fixed-pitch grid that wraps after `columns` items.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WrapGrid {
    /// Items per row (at least 1)
    pub columns: usize,
    /// Horizontal pitch between item origins
    pub column_width: f32,
    /// Height of one row
    pub row_height: f32,
    /// Extra vertical gap between rows
    pub row_gap: f32,
}

impl WrapGrid {
    /// Number of columns that fit into `width` at `column_width` pitch.
    ///
    /// Always at least one, even for zero or degenerate widths.
    #[must_use]
    pub fn columns_for(width: f32, column_width: f32) -> usize {
        if column_width.is_nan() || column_width <= 0.0 || !width.is_finite() {
            return 1;
        }
        ((width / column_width).floor() as usize).max(1)
    }

    /// Grid sized to fit `width`.
    #[must_use]
    pub fn fit(width: f32, column_width: f32, row_height: f32, row_gap: f32) -> Self {
        Self {
            columns: Self::columns_for(width, column_width),
            column_width,
            row_height,
            row_gap,
        }
    }

    /// Row and column of the `index`-th item.
    #[must_use]
    pub fn cell(&self, index: usize) -> (usize, usize) {
        let columns = self.columns.max(1);
        (index / columns, index % columns)
    }

    /// Top-left origin of the `index`-th item.
    #[must_use]
    pub fn cell_origin(&self, index: usize) -> Point {
        let (row, column) = self.cell(index);
        Point::new(
            column as f32 * self.column_width,
            row as f32 * self.row_height + row as f32 * self.row_gap,
        )
    }

    /// Number of rows needed for `count` items.
    #[must_use]
    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns.max(1))
    }

    /// Extent covered by `count` items.
    #[must_use]
    pub fn extent(&self, count: usize) -> Size {
        let rows = self.rows_for(count);
        if rows == 0 {
            return Size::ZERO;
        }
        let columns = count.min(self.columns.max(1));
        Size::new(
            columns as f32 * self.column_width,
            rows as f32 * self.row_height + (rows - 1) as f32 * self.row_gap,
        )
    }
}
