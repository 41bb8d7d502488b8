//! Error handling for Overlay Studio
//!
//! Provider and export failures are kept in separate enums so the
//! orchestrator can tell them apart; `StudioError` wraps both for callers
//! that only need a single error type.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for Overlay Studio operations
pub type Result<T> = std::result::Result<T, StudioError>;

/// Failures from the image-generation provider.
///
/// A failed generation never touches layer or history state.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("The AI did not return an image ({operation})")]
    NoImage { operation: String },

    #[error("Failed to {operation}: {message}")]
    Provider { operation: String, message: String },

    #[error("A {surface} request is already in progress")]
    Busy { surface: String },

    #[error("No layer with an image is active")]
    NoActiveImage,

    #[error("Provider not configured: {reason}")]
    NotConfigured { reason: String },
}

/// Failures while rasterizing the composition to a PNG file.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Could not find a renderable region to export")]
    NoRenderableRegion,

    #[error("Could not decode layer image: {reason}")]
    Decode { reason: String },

    #[error("Rasterization failed: {reason}")]
    Rasterize { reason: String },

    #[error("Failed to write export file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Main error type for Overlay Studio operations
#[derive(Error, Debug)]
pub enum StudioError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Export(#[from] ExportError),

    #[error("Invalid argument: {reason}")]
    InvalidArgument { reason: String },

    // I/O Errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StudioError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            StudioError::Generation(err) => match err {
                GenerationError::NoImage { .. } => "NO_IMAGE",
                GenerationError::Provider { .. } => "PROVIDER_ERROR",
                GenerationError::Busy { .. } => "BUSY",
                GenerationError::NoActiveImage => "NO_ACTIVE_IMAGE",
                GenerationError::NotConfigured { .. } => "NOT_CONFIGURED",
            },
            StudioError::Export(err) => match err {
                ExportError::NoRenderableRegion => "NO_RENDERABLE_REGION",
                ExportError::Decode { .. } => "EXPORT_DECODE_ERROR",
                ExportError::Rasterize { .. } => "RASTERIZE_ERROR",
                ExportError::Write { .. } => "EXPORT_WRITE_ERROR",
            },
            StudioError::InvalidArgument { .. } => "INVALID_ARGUMENT",
            StudioError::Io(_) => "IO_ERROR",
        }
    }

    /// Check if retrying the same request could succeed.
    ///
    /// Nothing in the library retries on its own; this is a hint for callers.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            StudioError::Generation(GenerationError::NoImage { .. })
                | StudioError::Generation(GenerationError::Provider { .. })
                | StudioError::Generation(GenerationError::Busy { .. })
                | StudioError::Export(ExportError::Write { .. })
        )
    }

    /// The provider was reached but produced no usable image.
    pub fn is_provider_failure(&self) -> bool {
        matches!(
            self,
            StudioError::Generation(GenerationError::NoImage { .. })
                | StudioError::Generation(GenerationError::Provider { .. })
        )
    }

    /// Get a user-facing message for this error
    ///
    /// Provider failures get a generic line here; callers that know which
    /// surface failed use `Surface::user_message` instead.
    pub fn friendly_message(&self) -> String {
        match self {
            StudioError::Generation(GenerationError::NoActiveImage) => {
                "Please select a layer with an image.".to_string()
            }
            StudioError::Generation(GenerationError::Busy { surface }) => {
                format!("Still working on the previous {}. Please wait.", surface)
            }
            StudioError::Generation(GenerationError::NotConfigured { .. }) => {
                "The image provider is not configured.".to_string()
            }
            StudioError::Generation(_) => {
                "Sorry, there was an error generating the image. Please try again.".to_string()
            }
            StudioError::Export(ExportError::NoRenderableRegion) => {
                "Could not find the element to export.".to_string()
            }
            StudioError::Export(_) => "Could not export the image.".to_string(),
            _ => self.to_string(),
        }
    }
}
