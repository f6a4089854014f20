use std::path::PathBuf;

use thiserror::Error;

use crate::QrRenderRequest;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("Text is too long for a QR code ({len} bytes)")]
    DataTooLong { len: usize },
    #[error("Failed to encode QR code: {0}")]
    Encode(String),
    #[error("Failed to load overlay image {}: {reason}", path.display())]
    Overlay { path: PathBuf, reason: String },
}

/// Turns a [`QrRenderRequest`] into an image.
///
/// Implementations must be deterministic: equal requests yield equal output.
pub trait QrRenderer {
    type Output;

    fn render(&self, request: &QrRenderRequest) -> Result<Self::Output, RenderError>;
}
