//! Protocol module - JSON request/response bodies for the HTTP adapter
//!
//! Request bodies are decoded leniently: missing numbers default to 0, a missing
//! `state` defaults to false, and unknown fields are ignored. Wrong JSON types or
//! unparseable bodies are rejected.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::GridSnapshot;

// ============== Client -> Server ==============

/// Body of `POST /api/grid`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResizeRequest {
    #[serde(default)]
    pub rows: i64,
    #[serde(default)]
    pub cols: i64,
}

/// Body of `POST /api/cell`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRequest {
    #[serde(default)]
    pub row: i64,
    #[serde(default)]
    pub col: i64,
    /// true for live, false for dead
    #[serde(default)]
    pub state: bool,
}

/// Optional body of `POST /api/next`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceRequest {
    #[serde(default = "default_steps")]
    pub steps: i64,
}

fn default_steps() -> i64 {
    1
}

impl Default for AdvanceRequest {
    fn default() -> Self {
        Self {
            steps: default_steps(),
        }
    }
}

/// Decode a request body regardless of its declared content type.
pub fn parse_request<T: DeserializeOwned>(body: &[u8]) -> Result<T, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Like [`parse_request`], but an empty (or whitespace-only) body or a JSON `null`
/// yields `T::default()`.
pub fn parse_optional_request<T: DeserializeOwned + Default>(
    body: &[u8],
) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    parse_request::<Option<T>>(body).map(Option::unwrap_or_default)
}

// ============== Server -> Client ==============

/// Full grid state; the body of every successful response and of the live feed's
/// first frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridMessage {
    pub rows: usize,
    pub cols: usize,
    #[serde(default)]
    pub generation: u64,
    pub cells: Vec<Vec<bool>>,
}

impl From<&GridSnapshot> for GridMessage {
    fn from(snap: &GridSnapshot) -> Self {
        Self {
            rows: snap.rows(),
            cols: snap.cols(),
            generation: snap.generation(),
            cells: snap.to_rows(),
        }
    }
}

impl From<GridSnapshot> for GridMessage {
    fn from(snap: GridSnapshot) -> Self {
        Self::from(&snap)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorType {
    #[serde(rename = "error")]
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "invalid_dimensions")]
    InvalidDimensions,
    #[serde(rename = "malformed_request")]
    MalformedRequest,
    #[serde(rename = "invalid_steps")]
    InvalidSteps,
}

/// Rejected request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMessage {
    #[serde(rename = "type")]
    pub msg_type: ErrorType,
    pub code: ErrorCode,
    pub message: String,
}

pub fn create_error(code: ErrorCode, message: &str) -> ErrorMessage {
    ErrorMessage {
        msg_type: ErrorType::Error,
        code,
        message: message.to_string(),
    }
}
