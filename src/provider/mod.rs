//! Image-generation provider interfaces and implementations
//!
//! This module provides:
//! - `ImageProvider` trait for all backends
//! - `EncodedImage`, the opaque image handle stored in layers
//! - The HTTP-backed `GeminiProvider`
//! - `MockProvider` for tests and offline use

mod gemini;
mod encoded;
mod mock;
mod model;

pub use encoded::{EncodedImage, DEFAULT_MIME_TYPE};
pub use gemini::GeminiProvider;
pub use mock::{MockCall, MockProvider, MockResponse};
pub use model::{
    generate_flyer, generate_overlay, remove_image_background, ImageProvider, ProviderOperation,
    BACKGROUND_REMOVAL_INSTRUCTION,
};
