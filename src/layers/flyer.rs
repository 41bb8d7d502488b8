//! Single-image state used by flyer mode.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::composition::CanvasContent;
use crate::provider::EncodedImage;
use crate::transform::Transform;

/// The flyer being edited: at most one image and its placement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlyerState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_image: Option<EncodedImage>,
    #[serde(default)]
    pub transform: Transform,
}

impl FlyerState {
    /// A freshly generated flyer at the default placement.
    pub fn with_image(image: EncodedImage) -> Self {
        Self {
            generated_image: Some(image),
            transform: Transform::IDENTITY,
        }
    }
}

impl CanvasContent for FlyerState {
    fn active_image(&self) -> Option<&EncodedImage> {
        self.generated_image.as_ref()
    }

    fn active_transform(&self) -> Transform {
        self.transform
    }

    fn has_content(&self) -> bool {
        self.generated_image.is_some()
    }

    fn with_active_transform(current: &Arc<Self>, transform: Transform) -> Arc<Self> {
        if current.generated_image.is_none() {
            return Arc::clone(current);
        }
        Arc::new(Self {
            generated_image: current.generated_image.clone(),
            transform,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::History;
    use crate::transform::Point;

    #[test]
    fn test_transform_without_image_is_noop() {
        let mut history = History::new(FlyerState::default());
        let moved = Transform::new(1.0, 1.0, Point::new(5.0, 5.0));
        assert!(!history.update(|s| FlyerState::with_active_transform(s, moved)));
        assert!(!history.can_undo());
    }

    #[test]
    fn test_transform_keeps_image() {
        let image = EncodedImage::from_base64("QUJD");
        let mut history = History::new(FlyerState::with_image(image.clone()));
        let moved = Transform::new(2.0, 1.0, Point::new(5.0, 0.0));
        assert!(history.update(|s| FlyerState::with_active_transform(s, moved)));
        assert_eq!(history.state().generated_image, Some(image));
        assert_eq!(history.state().transform, moved);
        history.undo();
        assert_eq!(history.state().transform, Transform::IDENTITY);
    }
}
