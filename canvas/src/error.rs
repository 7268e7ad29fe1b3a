//! Error types for document loading and rendering.
//!
//! Document mutations never fail: an unknown id is a no-op. Errors only arise
//! at the edges, when a document arrives from outside (JSON) or when the
//! drawing surface rejects a call.

use thiserror::Error;

use crate::doc::LayerId;

/// Result type for document loading.
pub type DocResult<T> = Result<T, DocError>;

/// A document that violates the layer store invariants, or that could not be parsed.
#[derive(Debug, Error)]
pub enum DocError {
    /// A `layers` entry is stored under a key that differs from its own id.
    #[error("layer stored under key {key} has id {id}")]
    MismatchedKey { key: LayerId, id: LayerId },

    /// `layer_order` names a layer that does not exist.
    #[error("layer order references unknown layer {0}")]
    UnknownOrderId(LayerId),

    /// `layer_order` lists the same layer more than once.
    #[error("layer {0} appears more than once in the layer order")]
    DuplicateOrderId(LayerId),

    /// A layer exists but is missing from `layer_order`.
    #[error("layer {0} is missing from the layer order")]
    Unordered(LayerId),

    /// The selection names a layer that does not exist.
    #[error("selection references unknown layer {0}")]
    UnknownSelection(LayerId),

    /// A layer has a zero, negative or non-finite size.
    #[error("layer {0} has a non-positive size")]
    InvalidSize(LayerId),

    /// A layer's opacity is outside `0.0..=1.0` or not a number.
    #[error("layer {id} has opacity {opacity} outside 0..=1")]
    InvalidOpacity { id: LayerId, opacity: f64 },

    /// The JSON could not be parsed or serialized.
    #[error("document json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A drawing surface call failed.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The 2D context rejected a call.
    #[error("canvas call failed: {0}")]
    Canvas(String),
}
