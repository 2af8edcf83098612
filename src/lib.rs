//! Game of Life server (workspace facade crate).
//!
//! Re-exports the workspace crates as `life_server::{adapter,core,engine,types}` so the
//! binary, integration tests and benches share one import path.

pub use life_server_adapter as adapter;
pub use life_server_core as core;
pub use life_server_engine as engine;
pub use life_server_types as types;
