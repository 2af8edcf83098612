//! Grid engine - the single shared, lock-guarded grid
//!
//! [`GridEngine`] owns the process-wide grid and is the only way to read or mutate it.
//! Every operation runs under one exclusive lock covering the whole read-modify-write,
//! so a resize can never interleave with a cell update or a generation step.
//!
//! The lock is a plain `std::sync::Mutex`: every operation is CPU-bound and at most
//! O(rows x cols) on a 20x20 grid, and no guard is ever held across an `.await`.
//!
//! # Example
//!
//! ```
//! use life_server_engine::GridEngine;
//!
//! let engine = GridEngine::default();
//! assert_eq!(engine.dimensions().rows, 5);
//!
//! engine.set_cell(2, 1, true);
//! engine.set_cell(2, 2, true);
//! engine.set_cell(2, 3, true);
//! let snap = engine.advance();
//! assert_eq!(snap.live_cells(), vec![(1, 2), (2, 2), (3, 2)]);
//!
//! assert!(engine.create(0, 5).is_err());
//! assert_eq!(engine.snapshot().generation(), 1);
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use life_server_core::{Grid, GridError, GridSnapshot};
use life_server_types::Dimensions;

pub use life_server_core as core;
pub use life_server_types as types;

/// Engine handle shared between request handlers
pub type SharedEngine = Arc<GridEngine>;

/// Owner of the current grid
#[derive(Debug)]
pub struct GridEngine {
    grid: Mutex<Grid>,
}

impl GridEngine {
    pub fn new(grid: Grid) -> Self {
        Self {
            grid: Mutex::new(grid),
        }
    }

    /// Engine holding an empty `rows x cols` grid
    pub fn with_size(rows: i64, cols: i64) -> Result<Self, GridError> {
        Grid::new(rows, cols).map(Self::new)
    }

    pub fn shared(self) -> SharedEngine {
        Arc::new(self)
    }

    /// A panic while holding the lock cannot leave the grid torn (every mutation
    /// writes into a valid buffer), so a poisoned lock is taken over as-is.
    fn lock(&self) -> MutexGuard<'_, Grid> {
        self.grid.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replace the grid with an empty `rows x cols` one.
    ///
    /// On [`GridError::InvalidDimensions`] the current grid is left untouched.
    pub fn create(&self, rows: i64, cols: i64) -> Result<GridSnapshot, GridError> {
        let mut grid = self.lock();
        *grid = Grid::new(rows, cols)?;
        Ok(grid.snapshot())
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.lock().snapshot()
    }

    pub fn dimensions(&self) -> Dimensions {
        self.lock().dimensions()
    }

    /// Set one cell. Out-of-range coordinates are ignored, not an error.
    pub fn set_cell(&self, row: i64, col: i64, alive: bool) -> GridSnapshot {
        let mut grid = self.lock();
        grid.set(row, col, alive);
        grid.snapshot()
    }

    pub fn clear(&self) -> GridSnapshot {
        let mut grid = self.lock();
        grid.clear();
        grid.snapshot()
    }

    /// Step one generation
    pub fn advance(&self) -> GridSnapshot {
        self.advance_by(1)
    }

    /// Step `steps` generations under a single lock acquisition.
    /// `steps == 0` only takes a snapshot.
    pub fn advance_by(&self, steps: u32) -> GridSnapshot {
        let mut grid = self.lock();
        for _ in 0..steps {
            grid.next_generation();
        }
        grid.snapshot()
    }
}

impl Default for GridEngine {
    fn default() -> Self {
        Self::new(Grid::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_replaces_grid_without_migration() {
        let engine = GridEngine::default();
        engine.set_cell(0, 0, true);

        let snap = engine.create(3, 7).unwrap();
        assert_eq!(snap.dimensions(), Dimensions::new(3, 7));
        assert_eq!(snap.population(), 0);
        assert_eq!(snap.generation(), 0);
    }

    #[test]
    fn test_failed_create_keeps_previous_grid() {
        let engine = GridEngine::default();
        engine.set_cell(1, 1, true);
        let before = engine.snapshot();

        assert_eq!(
            engine.create(21, 5),
            Err(GridError::InvalidDimensions { rows: 21, cols: 5 })
        );
        assert_eq!(engine.snapshot(), before);
    }

    #[test]
    fn test_advance_by_zero_is_snapshot() {
        let engine = GridEngine::default();
        engine.set_cell(0, 0, true);
        let snap = engine.advance_by(0);
        assert_eq!(snap.get(0, 0), Some(true));
        assert_eq!(snap.generation(), 0);
    }

    #[test]
    fn test_poisoned_lock_is_recovered() {
        let engine = GridEngine::default().shared();
        let poisoner = Arc::clone(&engine);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.lock();
            panic!("poison the grid lock");
        })
        .join();

        assert!(engine.grid.is_poisoned());
        let snap = engine.set_cell(4, 4, true);
        assert_eq!(snap.get(4, 4), Some(true));
    }
}
