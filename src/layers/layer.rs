//! A single overlay layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::provider::EncodedImage;
use crate::transform::Transform;

/// Maximum characters of the prompt used as a layer's display name.
pub const LAYER_NAME_MAX_CHARS: usize = 20;

/// One generated image in the overlay stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    /// Unique identifier
    pub id: String,
    /// Display label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub is_visible: bool,
    /// 0.0..=1.0, treated as 1.0 when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image: Option<EncodedImage>,
    /// Identity when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

impl Layer {
    /// Create a visible, fully opaque layer at the default placement.
    pub fn new(image: EncodedImage, name: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            is_visible: true,
            opacity: Some(1.0),
            generated_image: Some(image),
            transform: Some(Transform::IDENTITY),
        }
    }

    /// Create a layer with a caller-chosen id.
    pub fn with_id(id: impl Into<String>, image: Option<EncodedImage>) -> Self {
        Self {
            id: id.into(),
            name: None,
            is_visible: true,
            opacity: Some(1.0),
            generated_image: image,
            transform: Some(Transform::IDENTITY),
        }
    }

    /// Name a new layer after its prompt, or `Layer <n>` for an empty prompt.
    pub fn name_from_prompt(prompt: &str, existing_layers: usize) -> String {
        let name: String = prompt.chars().take(LAYER_NAME_MAX_CHARS).collect();
        if name.is_empty() {
            format!("Layer {}", existing_layers + 1)
        } else {
            name
        }
    }

    /// Name shown in the layer list; falls back to the id.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    pub fn effective_opacity(&self) -> f32 {
        self.opacity.unwrap_or(1.0)
    }

    pub fn effective_transform(&self) -> Transform {
        self.transform.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_layer_defaults() {
        let layer = Layer::new(EncodedImage::from_base64("QUJD"), None);
        assert!(layer.is_visible);
        assert_eq!(layer.effective_opacity(), 1.0);
        assert_eq!(layer.effective_transform(), Transform::IDENTITY);
        assert_eq!(layer.display_name(), layer.id);
        assert!(Uuid::parse_str(&layer.id).is_ok());
    }

    #[test]
    fn test_name_from_prompt() {
        assert_eq!(
            Layer::name_from_prompt("a vibrant neon sign for a DJ booth", 0),
            "a vibrant neon sign "
        );
        assert_eq!(Layer::name_from_prompt("", 2), "Layer 3");
    }

    #[test]
    fn test_missing_fields_fall_back() {
        let layer: Layer =
            serde_json::from_str(r#"{"id":"l1","isVisible":false}"#).unwrap();
        assert_eq!(layer.effective_opacity(), 1.0);
        assert_eq!(layer.effective_transform(), Transform::IDENTITY);
        assert!(layer.generated_image.is_none());
    }
}
