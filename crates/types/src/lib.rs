//! Shared types module - grid bounds, coordinates and dimensions
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (grid logic, engine, HTTP adapter).
//!
//! # Grid Dimensions
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `MIN_DIMENSION` | 1 | Smallest accepted row/column count |
//! | `MAX_DIMENSION` | 20 | Largest accepted row/column count |
//! | `DEFAULT_ROWS` | 5 | Rows of the grid created at startup |
//! | `DEFAULT_COLS` | 5 | Columns of the grid created at startup |
//! | `MAX_CELLS` | 400 | Capacity of the flat cell buffer |
//!
//! # Coordinates
//!
//! Cells are addressed as `(row, col)`, row-major, with `(0, 0)` at the top-left.
//! Coordinates arriving from clients are signed so that negative indices can be
//! represented and then ignored by the bounds check.
//!
//! # Examples
//!
//! ```
//! use life_server_types::{CellPos, Dimensions, DEFAULT_COLS, DEFAULT_ROWS};
//!
//! let dims = Dimensions::new(DEFAULT_ROWS, DEFAULT_COLS);
//! assert!(dims.is_valid());
//! assert_eq!(dims.cell_count(), 25);
//!
//! assert_eq!(dims.index_of(CellPos::new(1, 2)), Some(7));
//! assert_eq!(dims.index_of(CellPos::new(-1, 0)), None);
//! assert_eq!(dims.index_of(CellPos::new(0, 5)), None);
//! ```

/// Smallest accepted row or column count
pub const MIN_DIMENSION: usize = 1;

/// Largest accepted row or column count
pub const MAX_DIMENSION: usize = 20;

/// Rows of the grid created at startup
pub const DEFAULT_ROWS: usize = 5;

/// Columns of the grid created at startup
pub const DEFAULT_COLS: usize = 5;

/// Capacity of the flat cell buffer (20 x 20)
pub const MAX_CELLS: usize = MAX_DIMENSION * MAX_DIMENSION;

/// Most generations a single advance request may ask for
pub const MAX_STEPS_PER_REQUEST: u32 = 100;

/// Row/column extent of a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Check both axes against `[MIN_DIMENSION, MAX_DIMENSION]`
    ///
    /// ```
    /// use life_server_types::Dimensions;
    ///
    /// assert!(Dimensions::new(1, 20).is_valid());
    /// assert!(!Dimensions::new(0, 5).is_valid());
    /// assert!(!Dimensions::new(5, 21).is_valid());
    /// ```
    pub fn is_valid(&self) -> bool {
        is_valid_dimension(self.rows) && is_valid_dimension(self.cols)
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Flat row-major index of `pos`, or None when outside the grid
    #[inline(always)]
    pub fn index_of(&self, pos: CellPos) -> Option<usize> {
        if pos.row < 0 || pos.col < 0 {
            return None;
        }
        let (row, col) = (pos.row as usize, pos.col as usize);
        if row >= self.rows || col >= self.cols {
            return None;
        }
        Some(row * self.cols + col)
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS, DEFAULT_COLS)
    }
}

/// Signed cell coordinate as received from a client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellPos {
    pub row: i64,
    pub col: i64,
}

impl CellPos {
    pub const fn new(row: i64, col: i64) -> Self {
        Self { row, col }
    }

    /// The 8 Moore-adjacent positions (diagonals included), some possibly off-grid
    pub fn neighbors(self) -> impl Iterator<Item = CellPos> {
        const OFFSETS: [(i64, i64); 8] = [
            (-1, -1),
            (-1, 0),
            (-1, 1),
            (0, -1),
            (0, 1),
            (1, -1),
            (1, 0),
            (1, 1),
        ];
        OFFSETS
            .into_iter()
            .map(move |(dr, dc)| CellPos::new(self.row + dr, self.col + dc))
    }
}

/// Check a single axis against `[MIN_DIMENSION, MAX_DIMENSION]`
pub fn is_valid_dimension(value: usize) -> bool {
    (MIN_DIMENSION..=MAX_DIMENSION).contains(&value)
}
