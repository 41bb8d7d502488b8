//! Image provider trait
//!
//! Defines the interface every image-generation backend implements. The
//! editing core only ever sees `(prompt) -> image` and
//! `(image, instruction) -> image`.

use serde::{Deserialize, Serialize};

use super::encoded::EncodedImage;
use crate::error::GenerationError;

/// Fixed instruction sent with a background-removal request.
pub const BACKGROUND_REMOVAL_INSTRUCTION: &str =
    "Remove the background completely from this image. The new background must be 100% transparent.";

/// Which provider operation a request belongs to (used in error messages).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderOperation {
    GenerateImage,
    RemoveBackground,
}

impl ProviderOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::GenerateImage => "generate image",
            Self::RemoveBackground => "remove background",
        }
    }

    /// Wrap an underlying failure message.
    pub fn failed(&self, message: impl Into<String>) -> GenerationError {
        GenerationError::Provider {
            operation: self.as_str().to_string(),
            message: message.into(),
        }
    }

    pub fn no_image(&self) -> GenerationError {
        GenerationError::NoImage {
            operation: self.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for ProviderOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trait that all image-generation backends implement.
///
/// Implementations must never return an empty image: zero results are
/// reported as [`GenerationError::NoImage`].
pub trait ImageProvider: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Generate one image from a text prompt.
    fn generate(&self, prompt: &str) -> Result<EncodedImage, GenerationError>;

    /// Produce a new image from an existing one and an instruction.
    fn edit(&self, image: &EncodedImage, instruction: &str)
        -> Result<EncodedImage, GenerationError>;

    /// Check whether the backend can be called at all.
    fn is_available(&self) -> bool {
        true
    }
}

/// Generate an overlay graphic from an assembled prompt.
pub fn generate_overlay(
    provider: &dyn ImageProvider,
    prompt: &str,
) -> Result<EncodedImage, GenerationError> {
    ensure_image(provider.generate(prompt), ProviderOperation::GenerateImage)
}

/// Generate a flyer from an assembled prompt.
pub fn generate_flyer(
    provider: &dyn ImageProvider,
    prompt: &str,
) -> Result<EncodedImage, GenerationError> {
    ensure_image(provider.generate(prompt), ProviderOperation::GenerateImage)
}

/// Ask the provider to make the background of `image` transparent.
pub fn remove_image_background(
    provider: &dyn ImageProvider,
    image: &EncodedImage,
) -> Result<EncodedImage, GenerationError> {
    ensure_image(
        provider.edit(image, BACKGROUND_REMOVAL_INSTRUCTION),
        ProviderOperation::RemoveBackground,
    )
}

// Backends that hand back an empty payload are treated as returning nothing.
fn ensure_image(
    result: Result<EncodedImage, GenerationError>,
    operation: ProviderOperation,
) -> Result<EncodedImage, GenerationError> {
    match result {
        Ok(image) if image.is_empty() => Err(operation.no_image()),
        other => other,
    }
}
