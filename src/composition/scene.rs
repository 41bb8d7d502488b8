//! Render list produced by a canvas.
//!
//! A [`Scene`] is what a host draws (or what the rasterizer consumes):
//! nodes in back-to-front order inside a fixed-size viewport.

use serde::{Deserialize, Serialize};

use super::aspect::AspectRatio;
use crate::provider::EncodedImage;
use crate::transform::{Point, Rect, ResizeHandle, Transform};

/// Text shown in an empty viewport.
pub const EMPTY_STATE_TEXT: &str = "Your generated overlay will appear here.";

/// A single drawable item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneNode {
    /// Nothing generated yet.
    EmptyState { text: String },
    /// Non-interactive camera-feed placeholder.
    CameraFeed { rect: Rect, label: String },
    /// The active image in its transformed box.
    Image {
        image: EncodedImage,
        rect: Rect,
        opacity: f32,
        transform: Transform,
    },
    Handle { handle: ResizeHandle, center: Point },
    /// Busy indicator while a provider call is pending.
    Loading,
}

/// Back-to-front list of nodes for one viewport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub aspect: AspectRatio,
    pub nodes: Vec<SceneNode>,
}

impl Scene {
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// The image node, if one is drawn.
    pub fn image(&self) -> Option<(&EncodedImage, Rect, f32)> {
        self.nodes.iter().find_map(|node| match node {
            SceneNode::Image {
                image,
                rect,
                opacity,
                ..
            } => Some((image, *rect, *opacity)),
            _ => None,
        })
    }

    pub fn handles(&self) -> impl Iterator<Item = (ResizeHandle, Point)> + '_ {
        self.nodes.iter().filter_map(|node| match node {
            SceneNode::Handle { handle, center } => Some((*handle, *center)),
            _ => None,
        })
    }

    pub fn has_camera_feed(&self) -> bool {
        self.nodes
            .iter()
            .any(|n| matches!(n, SceneNode::CameraFeed { .. }))
    }

    /// Mark the scene as waiting on the provider.
    pub fn with_loading(mut self, loading: bool) -> Self {
        if loading {
            self.nodes.retain(|n| !matches!(n, SceneNode::EmptyState { .. }));
            self.nodes.push(SceneNode::Loading);
        }
        self
    }
}
