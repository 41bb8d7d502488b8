//! Layer Stack Operations
//!
//! Every operation is a pure function from the current snapshot to the next
//! one. When an operation has nothing to do it returns the *same* `Arc`, so
//! [`History::update`] records no entry for it.
//!
//! Order is z-order: index 0 is drawn first (bottom), the last layer on top.

use std::sync::Arc;

use tracing::info;

use super::layer::Layer;
use crate::composition::CanvasContent;
use crate::provider::EncodedImage;
use crate::state::History;
use crate::transform::Transform;

/// Ordered layer sequence.
pub type Layers = Vec<Layer>;

/// The active layer: the first visible one in sequence order.
pub fn active_layer(layers: &[Layer]) -> Option<&Layer> {
    layers.iter().find(|l| l.is_visible)
}

pub fn active_index(layers: &[Layer]) -> Option<usize> {
    layers.iter().position(|l| l.is_visible)
}

/// Hide every existing layer and append `layer` as the only visible one.
pub fn insert(layers: &Arc<Layers>, layer: Layer) -> Arc<Layers> {
    let mut next: Layers = layers
        .iter()
        .map(|l| Layer {
            is_visible: false,
            ..l.clone()
        })
        .collect();
    next.push(Layer {
        is_visible: true,
        opacity: Some(1.0),
        ..layer
    });
    Arc::new(next)
}

pub fn toggle_visibility(layers: &Arc<Layers>, id: &str) -> Arc<Layers> {
    map_matching(layers, id, |l| l.is_visible = !l.is_visible)
}

/// Set opacity, clamped to `0.0..=1.0`. NaN is ignored.
pub fn set_opacity(layers: &Arc<Layers>, id: &str, opacity: f32) -> Arc<Layers> {
    if opacity.is_nan() {
        return Arc::clone(layers);
    }
    let opacity = opacity.clamp(0.0, 1.0);
    map_matching(layers, id, |l| l.opacity = Some(opacity))
}

pub fn remove(layers: &Arc<Layers>, id: &str) -> Arc<Layers> {
    if !layers.iter().any(|l| l.id == id) {
        return Arc::clone(layers);
    }
    Arc::new(layers.iter().filter(|l| l.id != id).cloned().collect())
}

/// Swap `index` with `index - 1` (towards the bottom of the stack).
pub fn move_up(layers: &Arc<Layers>, index: usize) -> Arc<Layers> {
    if index == 0 || index >= layers.len() {
        return Arc::clone(layers);
    }
    swapped(layers, index - 1, index)
}

/// Swap `index` with `index + 1` (towards the top of the stack).
pub fn move_down(layers: &Arc<Layers>, index: usize) -> Arc<Layers> {
    if index + 1 >= layers.len() {
        return Arc::clone(layers);
    }
    swapped(layers, index, index + 1)
}

/// Replace the active layer's transform.
pub fn set_active_transform(layers: &Arc<Layers>, transform: Transform) -> Arc<Layers> {
    map_active(layers, |l| l.transform = Some(transform))
}

/// Replace the active layer's image (background removal).
pub fn set_active_image(layers: &Arc<Layers>, image: EncodedImage) -> Arc<Layers> {
    map_active(layers, |l| l.generated_image = Some(image))
}

fn swapped(layers: &Arc<Layers>, a: usize, b: usize) -> Arc<Layers> {
    let mut next = layers.as_ref().clone();
    next.swap(a, b);
    Arc::new(next)
}

fn map_matching<F>(layers: &Arc<Layers>, id: &str, f: F) -> Arc<Layers>
where
    F: FnOnce(&mut Layer),
{
    match layers.iter().position(|l| l.id == id) {
        Some(index) => map_at(layers, index, f),
        None => Arc::clone(layers),
    }
}

fn map_active<F>(layers: &Arc<Layers>, f: F) -> Arc<Layers>
where
    F: FnOnce(&mut Layer),
{
    match active_index(layers) {
        Some(index) => map_at(layers, index, f),
        None => Arc::clone(layers),
    }
}

fn map_at<F>(layers: &Arc<Layers>, index: usize, f: F) -> Arc<Layers>
where
    F: FnOnce(&mut Layer),
{
    let mut next = layers.as_ref().clone();
    f(&mut next[index]);
    Arc::new(next)
}

/// Layer operations submitted through a [`History`].
///
/// Each method returns whether a history entry was recorded.
pub trait LayerOps {
    fn layers(&self) -> &[Layer];
    fn active_layer(&self) -> Option<&Layer>;
    fn insert_layer(&mut self, layer: Layer) -> bool;
    fn toggle_visibility(&mut self, id: &str) -> bool;
    fn set_opacity(&mut self, id: &str, opacity: f32) -> bool;
    fn remove_layer(&mut self, id: &str) -> bool;
    fn move_up(&mut self, index: usize) -> bool;
    fn move_down(&mut self, index: usize) -> bool;
    fn set_active_transform(&mut self, transform: Transform) -> bool;
    fn set_active_image(&mut self, image: EncodedImage) -> bool;
}

impl LayerOps for History<Layers> {
    fn layers(&self) -> &[Layer] {
        self.state()
    }

    fn active_layer(&self) -> Option<&Layer> {
        active_layer(self.state())
    }

    fn insert_layer(&mut self, layer: Layer) -> bool {
        info!(id = %layer.id, name = layer.display_name(), "inserting layer");
        self.update(|layers| insert(layers, layer))
    }

    fn toggle_visibility(&mut self, id: &str) -> bool {
        self.update(|layers| toggle_visibility(layers, id))
    }

    fn set_opacity(&mut self, id: &str, opacity: f32) -> bool {
        self.update(|layers| set_opacity(layers, id, opacity))
    }

    fn remove_layer(&mut self, id: &str) -> bool {
        self.update(|layers| remove(layers, id))
    }

    fn move_up(&mut self, index: usize) -> bool {
        self.update(|layers| move_up(layers, index))
    }

    fn move_down(&mut self, index: usize) -> bool {
        self.update(|layers| move_down(layers, index))
    }

    fn set_active_transform(&mut self, transform: Transform) -> bool {
        self.update(|layers| set_active_transform(layers, transform))
    }

    fn set_active_image(&mut self, image: EncodedImage) -> bool {
        self.update(|layers| set_active_image(layers, image))
    }
}

impl CanvasContent for Layers {
    fn active_image(&self) -> Option<&EncodedImage> {
        active_layer(self).and_then(|l| l.generated_image.as_ref())
    }

    fn active_transform(&self) -> Transform {
        active_layer(self)
            .map(Layer::effective_transform)
            .unwrap_or_default()
    }

    fn active_opacity(&self) -> f32 {
        active_layer(self).map_or(1.0, Layer::effective_opacity)
    }

    fn has_content(&self) -> bool {
        !self.is_empty()
    }

    fn with_active_transform(current: &Arc<Self>, transform: Transform) -> Arc<Self> {
        set_active_transform(current, transform)
    }
}
