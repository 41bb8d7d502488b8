//! Mock image provider for testing
//!
//! Produces small solid-colour PNGs without any network access. Responses
//! can be scripted (image, empty result, failure) to exercise error paths,
//! and every call is recorded for assertions.

use std::collections::VecDeque;
use std::io::Cursor;
use std::sync::Mutex;

use image::{ImageFormat, Rgba, RgbaImage};

use super::encoded::EncodedImage;
use super::model::{ImageProvider, ProviderOperation};
use crate::error::GenerationError;

/// Scripted outcome for the next call.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Solid image of the given colour.
    Image(Rgba<u8>),
    /// Provider answered but without any image.
    Empty,
    /// Provider call failed with this message.
    Fail(String),
}

/// A recorded call.
#[derive(Debug, Clone, PartialEq)]
pub enum MockCall {
    Generate { prompt: String },
    Edit { instruction: String },
}

/// Offline provider returning generated PNGs.
pub struct MockProvider {
    width: u32,
    height: u32,
    default_color: Rgba<u8>,
    script: Mutex<VecDeque<MockResponse>>,
    calls: Mutex<Vec<MockCall>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::with_size(64, 36)
    }

    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
            default_color: Rgba([99, 102, 241, 255]),
            script: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Queue a response; unscripted calls return the default colour.
    pub fn push_response(&self, response: MockResponse) -> &Self {
        if let Ok(mut script) = self.script.lock() {
            script.push_back(response);
        }
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }

    /// Encode a solid PNG of this provider's size.
    pub fn solid_png(&self, color: Rgba<u8>) -> Result<EncodedImage, GenerationError> {
        self.encode(color, ProviderOperation::GenerateImage)
    }

    fn encode(
        &self,
        color: Rgba<u8>,
        operation: ProviderOperation,
    ) -> Result<EncodedImage, GenerationError> {
        let img = RgbaImage::from_pixel(self.width, self.height, color);
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, ImageFormat::Png)
            .map_err(|e| operation.failed(e.to_string()))?;
        Ok(EncodedImage::from_bytes(bytes.get_ref()))
    }

    fn record(&self, call: MockCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }

    fn respond(&self, operation: ProviderOperation) -> Result<EncodedImage, GenerationError> {
        let next = self
            .script
            .lock()
            .ok()
            .and_then(|mut script| script.pop_front())
            .unwrap_or(MockResponse::Image(self.default_color));

        match next {
            MockResponse::Image(color) => self.encode(color, operation),
            MockResponse::Empty => Err(operation.no_image()),
            MockResponse::Fail(message) => Err(operation.failed(message)),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn generate(&self, prompt: &str) -> Result<EncodedImage, GenerationError> {
        self.record(MockCall::Generate {
            prompt: prompt.to_string(),
        });
        self.respond(ProviderOperation::GenerateImage)
    }

    fn edit(
        &self,
        _image: &EncodedImage,
        instruction: &str,
    ) -> Result<EncodedImage, GenerationError> {
        self.record(MockCall::Edit {
            instruction: instruction.to_string(),
        });
        self.respond(ProviderOperation::RemoveBackground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_response_is_decodable_png() {
        let provider = MockProvider::with_size(8, 4);
        let encoded = provider.generate("neon").unwrap();
        let decoded = image::load_from_memory(&encoded.decode().unwrap()).unwrap();
        assert_eq!(decoded.width(), 8);
        assert_eq!(decoded.height(), 4);
        assert_eq!(
            provider.calls(),
            vec![MockCall::Generate {
                prompt: "neon".to_string()
            }]
        );
    }

    #[test]
    fn test_scripted_responses_in_order() {
        let provider = MockProvider::new();
        provider
            .push_response(MockResponse::Empty)
            .push_response(MockResponse::Fail("quota".to_string()));

        assert!(matches!(
            provider.generate("a"),
            Err(GenerationError::NoImage { .. })
        ));
        match provider.edit(&EncodedImage::from_base64("QUJD"), "x") {
            Err(GenerationError::Provider { operation, message }) => {
                assert_eq!(operation, "remove background");
                assert_eq!(message, "quota");
            }
            other => panic!("unexpected: {:?}", other),
        }
        assert!(provider.generate("b").is_ok());
        assert_eq!(provider.call_count(), 3);
    }

    #[test]
    fn test_scripted_colour_on_edit() {
        let blue = Rgba([0, 0, 255, 255]);
        let provider = MockProvider::with_size(2, 2);
        provider.push_response(MockResponse::Image(blue));

        let edited = provider
            .edit(&EncodedImage::from_base64("QUJD"), "x")
            .unwrap();
        let solid: Result<EncodedImage, GenerationError> = provider.solid_png(blue);
        assert_eq!(edited, solid.unwrap());
    }
}
