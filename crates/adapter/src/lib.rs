//! Adapter module - HTTP and WebSocket access to the grid engine
//!
//! This module exposes the shared [`GridEngine`](engine::GridEngine) to a browser
//! client. Every handler is a thin translation: decode the request, make one engine
//! call, and answer with the **full** post-operation grid.
//!
//! # Routes
//!
//! | Method & path | Operation | Body | Success |
//! |---------------|-----------|------|---------|
//! | `GET /api/grid` | current grid | - | 200 |
//! | `POST /api/grid` | resize (new empty grid) | `{"rows":int,"cols":int}` | 201 |
//! | `POST /api/grid/reset` | clear every cell | - | 200 |
//! | `POST /api/cell` | set one cell | `{"row":int,"col":int,"state":bool}` | 200 |
//! | `POST /api/next` | advance | optional `{"steps":int}` | 200 |
//! | `GET /ws` | live feed | WebSocket upgrade | one grid frame, then pings |
//! | `GET /healthz` | liveness | - | 200 `ok` |
//!
//! Responses carry `{"rows":r,"cols":c,"generation":g,"cells":[[bool; c]; r]}`.
//!
//! # Boundary policy
//!
//! Resize outside `1..=20` is rejected with `400 invalid_dimensions`. Cell coordinates
//! outside the grid are silently ignored and the unchanged grid is returned. Bodies
//! that are not valid JSON for the expected shape get `400 malformed_request`.
//!
//! # Environment Variables
//!
//! - `LIFE_HOST`: Bind address (default: "127.0.0.1")
//! - `LIFE_PORT`: Port number (default: 8080)
//! - `LIFE_CORS_ORIGIN`: Allowed browser origin (default: "http://localhost:3000")
//! - `LIFE_HEARTBEAT_SECS`: Live feed ping interval (default: 5)
//! - `LIFE_DEFAULT_ROWS` / `LIFE_DEFAULT_COLS`: Startup grid size (default: 5x5)
//!
//! # Testing
//!
//! ```bash
//! curl -s localhost:8080/api/grid
//! curl -s -XPOST localhost:8080/api/cell -d '{"row":2,"col":2,"state":true}'
//! curl -s -XPOST localhost:8080/api/next
//! ```

pub mod error;
pub mod protocol;
pub mod server;

pub use life_server_core as core;
pub use life_server_engine as engine;
pub use life_server_types as types;

// Re-export protocol types for convenience
pub use error::ApiError;
pub use protocol::*;
pub use server::*;
