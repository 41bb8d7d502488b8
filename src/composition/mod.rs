//! Composition Surface
//!
//! The fixed-aspect viewport, its render list, and the [`Canvas`] that
//! routes pointer input into history for any [`CanvasContent`].

mod aspect;
mod canvas;
mod scene;
mod viewport;

pub use aspect::AspectRatio;
pub use canvas::{Canvas, CanvasContent};
pub use scene::{Scene, SceneNode, EMPTY_STATE_TEXT};
pub use viewport::{Viewport, CAMERA_FEED_INSET, DEFAULT_VIEWPORT_WIDTH};
