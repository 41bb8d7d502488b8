//! Transform Engine
//!
//! Geometry, resize handles and the pointer-gesture state machine that
//! moves and resizes the active image.

mod engine;
mod geometry;
mod handle;

pub use engine::{Interaction, InteractionKind, TransformEngine};
pub use geometry::{Point, Rect, Transform, MIN_SCALE};
pub use handle::ResizeHandle;
