//! Core grid logic module - pure, deterministic, and testable
//!
//! This module contains the Game of Life rules and cell storage.
//! It has **zero dependencies** on networking, locking, or I/O, making it:
//!
//! - **Deterministic**: The same starting cells always produce the same generations
//! - **Testable**: Unit tests for every rule and boundary case
//! - **Fast**: Fixed-capacity cell buffer, no heap allocation per generation
//!
//! # Module Structure
//!
//! - [`grid`]: bounded grid with cell access, neighbor counting and the transition rule
//! - [`snapshot`]: immutable copy of a grid for serialization
//! - [`error`]: grid construction errors
//!
//! # Rules
//!
//! Every cell is updated simultaneously from the counts of the current generation:
//!
//! - **Survival**: a live cell with 2 or 3 live neighbors stays live
//! - **Death**: any other live cell dies
//! - **Birth**: a dead cell with exactly 3 live neighbors becomes live
//!
//! Neighbors are the 8 Moore-adjacent cells. The grid does not wrap, so cells past
//! an edge are simply absent from the count.
//!
//! # Example
//!
//! ```
//! use life_server_core::Grid;
//!
//! // Horizontal blinker on a 5x5 grid
//! let mut grid = Grid::new(5, 5).unwrap();
//! grid.set(2, 1, true);
//! grid.set(2, 2, true);
//! grid.set(2, 3, true);
//!
//! grid.next_generation();
//! assert_eq!(grid.snapshot().live_cells(), vec![(1, 2), (2, 2), (3, 2)]);
//! ```

pub mod error;
pub mod grid;
pub mod snapshot;

pub use life_server_types as types;

// Re-export commonly used types for convenience
pub use error::GridError;
pub use grid::{next_state, CellBuffer, Grid};
pub use snapshot::GridSnapshot;
