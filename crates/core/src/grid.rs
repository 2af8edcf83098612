//! Grid module - cell storage and the Life transition rule
//!
//! The grid is a `rows x cols` matrix of boolean cells, at most 20x20.
//! Uses a flat fixed-capacity buffer for cache locality and zero-allocation.
//! Coordinates: (row, col) where row ranges 0..rows (top to bottom), col ranges 0..cols
//! (left to right). The edges are hard: positions outside the grid are never live.

use arrayvec::ArrayVec;

use crate::error::GridError;
use crate::snapshot::GridSnapshot;
use crate::types::{CellPos, Dimensions, MAX_CELLS};

/// Flat cell buffer, row-major order (row * cols + col)
pub type CellBuffer = ArrayVec<bool, MAX_CELLS>;

/// A bounded Game of Life grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: CellBuffer,
    generation: u64,
}

impl Grid {
    /// Create an all-dead grid.
    ///
    /// Fails with [`GridError::InvalidDimensions`] when either axis is outside `1..=20`.
    /// Takes signed values so that negative sizes coming off the wire are rejected
    /// here instead of wrapping.
    pub fn new(rows: i64, cols: i64) -> Result<Self, GridError> {
        let invalid = GridError::InvalidDimensions { rows, cols };
        let rows = usize::try_from(rows).map_err(|_| invalid)?;
        let cols = usize::try_from(cols).map_err(|_| invalid)?;
        let dims = Dimensions::new(rows, cols);
        if !dims.is_valid() {
            return Err(invalid);
        }
        Ok(Self::empty(dims))
    }

    /// `dims` must already be valid.
    fn empty(dims: Dimensions) -> Self {
        debug_assert!(dims.is_valid());
        let mut cells = CellBuffer::new();
        cells.extend(std::iter::repeat(false).take(dims.cell_count()));
        Self {
            dims,
            cells,
            generation: 0,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// Number of generations advanced since this grid was created or last cleared
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Get cell at (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i64, col: i64) -> Option<bool> {
        self.dims
            .index_of(CellPos::new(row, col))
            .map(|idx| self.cells[idx])
    }

    /// Set cell at (row, col)
    /// Returns false (and leaves the grid untouched) if out of bounds
    pub fn set(&mut self, row: i64, col: i64, alive: bool) -> bool {
        match self.dims.index_of(CellPos::new(row, col)) {
            Some(idx) => {
                self.cells[idx] = alive;
                true
            }
            None => false,
        }
    }

    /// Kill every cell; dimensions are kept
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = false;
        }
        self.generation = 0;
    }

    /// Count live cells among the 8 Moore neighbors of (row, col).
    /// Off-grid neighbors do not count (no wraparound).
    pub fn live_neighbors(&self, row: usize, col: usize) -> u8 {
        CellPos::new(row as i64, col as i64)
            .neighbors()
            .filter_map(|pos| self.dims.index_of(pos))
            .filter(|&idx| self.cells[idx])
            .count() as u8
    }

    /// Replace the current cells with the next generation.
    ///
    /// Every neighbor count is taken from the current cells; the new buffer is only
    /// installed once it is complete.
    pub fn next_generation(&mut self) {
        let cols = self.dims.cols;
        let next: CellBuffer = self
            .cells
            .iter()
            .enumerate()
            .map(|(idx, &alive)| next_state(alive, self.live_neighbors(idx / cols, idx % cols)))
            .collect();
        self.cells = next;
        self.generation += 1;
    }

    /// Number of live cells
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Copy out an immutable view for serialization
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot::new(self.dims, self.generation, self.cells.clone())
    }

    /// Create from a 2D vector for testing
    #[cfg(test)]
    pub fn from_rows(rows: Vec<Vec<bool>>) -> Self {
        let dims = Dimensions::new(rows.len(), rows.first().map_or(0, Vec::len));
        assert!(dims.is_valid());
        assert!(rows.iter().all(|r| r.len() == dims.cols));

        let mut grid = Self::empty(dims);
        for (r, row) in rows.iter().enumerate() {
            for (c, &alive) in row.iter().enumerate() {
                grid.cells[r * dims.cols + c] = alive;
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::empty(Dimensions::default())
    }
}

/// Conway's rule: survive on 2 or 3 neighbors, birth on exactly 3
#[inline(always)]
pub fn next_state(alive: bool, live_neighbors: u8) -> bool {
    matches!((alive, live_neighbors), (true, 2) | (true, 3) | (false, 3))
}
