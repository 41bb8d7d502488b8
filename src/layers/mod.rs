//! Layer Model
//!
//! The overlay layer stack and the single-image flyer state. Both are plain
//! values held in a [`History`](crate::state::History); every mutation is a
//! pure function from one snapshot to the next.

mod flyer;
mod layer;
mod stack;

pub use flyer::FlyerState;
pub use layer::{Layer, LAYER_NAME_MAX_CHARS};
pub use stack::{
    active_index, active_layer, insert, move_down, move_up, remove, set_active_image,
    set_active_transform, set_opacity, toggle_visibility, LayerOps, Layers,
};
