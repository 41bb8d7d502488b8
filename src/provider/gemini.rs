//! Gemini image provider
//!
//! Talks to the `generateContent` endpoint over HTTP. The request carries a
//! text part (plus an inline image for edits) and asks for IMAGE output; the
//! first inline image in the first candidate is returned.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use super::encoded::{EncodedImage, DEFAULT_MIME_TYPE};
use super::model::{ImageProvider, ProviderOperation};
use crate::config::ProviderConfig;
use crate::error::GenerationError;

/// Request body for `generateContent`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Content,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_modalities: Vec<String>,
}

/// Response body from `generateContent`
#[derive(Debug, Deserialize, Default)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl GenerateRequest {
    fn text(prompt: &str) -> Self {
        Self::with_parts(vec![Part {
            text: Some(prompt.to_string()),
            inline_data: None,
        }])
    }

    fn edit(image: &EncodedImage, instruction: &str) -> Self {
        Self::with_parts(vec![
            Part {
                text: None,
                inline_data: Some(InlineData {
                    mime_type: DEFAULT_MIME_TYPE.to_string(),
                    data: image.as_base64().to_string(),
                }),
            },
            Part {
                text: Some(instruction.to_string()),
                inline_data: None,
            },
        ])
    }

    fn with_parts(parts: Vec<Part>) -> Self {
        Self {
            contents: Content { parts },
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE".to_string()],
            },
        }
    }
}

/// Collect every inline image of the first candidate.
fn extract_images(response: GenerateResponse) -> Vec<EncodedImage> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|content| content.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|part| part.inline_data)
        .map(|inline| EncodedImage::with_mime_type(inline.mime_type, inline.data))
        .collect()
}

/// HTTP-backed provider.
pub struct GeminiProvider {
    config: ProviderConfig,
}

impl GeminiProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self { config }
    }

    /// Create a provider from environment configuration
    pub fn from_env() -> Self {
        Self::new(ProviderConfig::from_env())
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    fn call(
        &self,
        request: &GenerateRequest,
        operation: ProviderOperation,
    ) -> Result<EncodedImage, GenerationError> {
        let response = self.send_request(request, operation).map_err(|e| {
            error!("Error calling image provider ({}): {}", operation, e);
            e
        })?;

        let images = extract_images(response);
        debug!(count = images.len(), "provider returned images");

        images
            .into_iter()
            .find(|image| !image.is_empty())
            .ok_or_else(|| operation.no_image())
    }

    /// Send request to the provider
    #[cfg(feature = "gemini")]
    fn send_request(
        &self,
        request: &GenerateRequest,
        operation: ProviderOperation,
    ) -> Result<GenerateResponse, GenerationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| GenerationError::NotConfigured {
                reason: "no API key set (OVERLAY_STUDIO_API_KEY or API_KEY)".to_string(),
            })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_millis(self.config.timeout_ms))
            .build()
            .map_err(|e| operation.failed(e.to_string()))?;

        let response = client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(request)
            .send()
            .map_err(|e| {
                if e.is_timeout() {
                    operation.failed(format!(
                        "request timed out after {}ms",
                        self.config.timeout_ms
                    ))
                } else {
                    operation.failed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(operation.failed(format!("provider returned {}: {}", status, body)));
        }

        response
            .json::<GenerateResponse>()
            .map_err(|e| operation.failed(format!("invalid response: {}", e)))
    }

    #[cfg(not(feature = "gemini"))]
    fn send_request(
        &self,
        _request: &GenerateRequest,
        _operation: ProviderOperation,
    ) -> Result<GenerateResponse, GenerationError> {
        Err(GenerationError::NotConfigured {
            reason: "HTTP provider support not compiled. Build with --features gemini".to_string(),
        })
    }
}

impl ImageProvider for GeminiProvider {
    fn name(&self) -> &str {
        &self.config.model
    }

    fn generate(&self, prompt: &str) -> Result<EncodedImage, GenerationError> {
        self.call(&GenerateRequest::text(prompt), ProviderOperation::GenerateImage)
    }

    fn edit(
        &self,
        image: &EncodedImage,
        instruction: &str,
    ) -> Result<EncodedImage, GenerationError> {
        self.call(
            &GenerateRequest::edit(image, instruction),
            ProviderOperation::RemoveBackground,
        )
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "gemini") && self.config.api_key.is_some()
    }
}
