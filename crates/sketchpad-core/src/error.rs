//! Error types for the sketching core.
//!
//! Only validation failures are errors. Lookups that miss and undo/redo on an empty
//! history are reported through `bool`/`Option` return values instead.

use crate::tools::ToolKind;
use thiserror::Error;

/// Validation and collaborator failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SketchError {
    #[error("Invalid width {0}: must be a positive, finite number")]
    InvalidWidth(f64),
    #[error("Width {width} for {tool} is outside the allowed range {min}..={max}")]
    WidthOutOfRange {
        tool: ToolKind,
        width: f64,
        min: f64,
        max: f64,
    },
    #[error("Invalid size {width}x{height}: dimensions must be finite and non-negative")]
    InvalidSize { width: f64, height: f64 },
    #[error("Invalid font size {0}")]
    InvalidFontSize(f64),
    #[error("Invalid {name} range {min}..={max}: bounds must be finite and ordered")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("A gesture is already in progress")]
    GestureInProgress,
    #[error("Asset error: {0}")]
    Asset(String),
}

/// Result type for sketching operations.
pub type SketchResult<T> = Result<T, SketchError>;
