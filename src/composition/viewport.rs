//! Fixed-aspect viewport geometry and pointer hit testing.

use serde::{Deserialize, Serialize};

use super::aspect::AspectRatio;
use crate::transform::{InteractionKind, Point, Rect, ResizeHandle, Transform};

/// Inset of the camera-feed placeholder from the viewport edge, in pixels.
pub const CAMERA_FEED_INSET: f64 = 16.0;

/// Default viewport width used when the host gives none.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1280.0;

/// The editing surface: a box of the host-supplied width whose height
/// follows the aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    width: f64,
    aspect: AspectRatio,
}

impl Viewport {
    pub fn new(width: f64, aspect: AspectRatio) -> Self {
        Self {
            width: width.max(1.0),
            aspect,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.aspect.height_for(self.width)
    }

    pub fn aspect(&self) -> AspectRatio {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: AspectRatio) {
        self.aspect = aspect;
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width.max(1.0);
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height())
    }

    pub fn camera_feed_rect(&self) -> Rect {
        self.bounds().inset(CAMERA_FEED_INSET)
    }

    /// Box of the image element once `transform` is applied.
    pub fn image_rect(&self, transform: &Transform) -> Rect {
        transform.apply_to(self.bounds())
    }

    /// Centres of the eight resize handles.
    pub fn handle_positions(&self, transform: &Transform) -> [(ResizeHandle, Point); 8] {
        let rect = self.image_rect(transform);
        ResizeHandle::ALL.map(|h| (h, h.anchor(&rect)))
    }

    /// What a pointer-down at `point` would start. Handles take priority
    /// over the image body; the nearest handle within `radius` wins.
    pub fn hit_test(
        &self,
        point: Point,
        transform: &Transform,
        radius: f64,
    ) -> Option<InteractionKind> {
        let nearest = self
            .handle_positions(transform)
            .into_iter()
            .map(|(h, p)| (h, p.distance_to(point)))
            .filter(|(_, d)| *d <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1));

        if let Some((handle, _)) = nearest {
            return Some(InteractionKind::Resize(handle));
        }

        self.image_rect(transform)
            .contains(point)
            .then_some(InteractionKind::Drag)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, AspectRatio::default())
    }
}
