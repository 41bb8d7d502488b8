//! Overlay mode
//!
//! Owns the layer canvas and the creative brief, calls the provider, and
//! inserts each generated image as a new layer. Provider calls never touch
//! the layer history unless they succeed.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};

use super::guard::{SingleFlight, Surface};
use super::prompt::{overlay_prompt, CreativeBrief};
use super::templates::{find_template, Template};
use crate::composition::{AspectRatio, Canvas, Scene, Viewport, DEFAULT_VIEWPORT_WIDTH};
use crate::config::EditorConfig;
use crate::error::{GenerationError, Result, StudioError};
use crate::export::{export_to_file, ExportOptions, PngRasterizer, Rasterizer};
use crate::layers::{Layer, LayerOps, Layers};
use crate::provider::{generate_overlay, remove_image_background, EncodedImage, ImageProvider};
use crate::state::History;

/// Editing session for stream overlays.
pub struct OverlayStudio {
    provider: Arc<dyn ImageProvider>,
    canvas: Canvas<Layers>,
    brief: CreativeBrief,
    generation: SingleFlight,
    background_removal: SingleFlight,
}

impl OverlayStudio {
    pub fn new(provider: Arc<dyn ImageProvider>, config: &EditorConfig) -> Self {
        Self {
            provider,
            canvas: Canvas::new(
                Vec::new(),
                Viewport::new(DEFAULT_VIEWPORT_WIDTH, AspectRatio::Landscape),
                config,
            ),
            brief: CreativeBrief::default(),
            generation: SingleFlight::new(Surface::Overlay),
            background_removal: SingleFlight::new(Surface::BackgroundRemoval),
        }
    }

    pub fn brief(&self) -> &CreativeBrief {
        &self.brief
    }

    pub fn brief_mut(&mut self) -> &mut CreativeBrief {
        &mut self.brief
    }

    /// Load a template's prompt and keywords into the brief.
    pub fn select_template(&mut self, key: &str) -> Result<&'static Template> {
        let template = find_template(key).ok_or_else(|| StudioError::InvalidArgument {
            reason: format!("unknown template '{}'", key),
        })?;
        self.brief.apply_template(template);
        Ok(template)
    }

    pub fn canvas(&self) -> &Canvas<Layers> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<Layers> {
        &mut self.canvas
    }

    pub fn layers(&self) -> &[Layer] {
        self.canvas.state()
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.canvas.history().active_layer()
    }

    /// The layer history, for visibility, order, opacity and delete edits.
    pub fn layers_mut(&mut self) -> &mut History<Layers> {
        self.canvas.history_mut()
    }

    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.canvas.set_aspect_ratio(aspect);
    }

    pub fn is_loading(&self) -> bool {
        self.generation.is_busy()
    }

    pub fn is_removing_background(&self) -> bool {
        self.background_removal.is_busy()
    }

    pub fn generation_flight(&self) -> &SingleFlight {
        &self.generation
    }

    pub fn background_removal_flight(&self) -> &SingleFlight {
        &self.background_removal
    }

    /// Ask the provider for an overlay image without changing any state.
    pub fn request_overlay(&self) -> std::result::Result<EncodedImage, GenerationError> {
        let _busy = self.generation.try_acquire()?;
        let prompt = overlay_prompt(&self.brief);
        info!(provider = self.provider.name(), "generating overlay");
        generate_overlay(self.provider.as_ref(), &prompt).map_err(|e| {
            error!("Generation failed: {}", e);
            e
        })
    }

    /// Generate an overlay and insert it as the only visible layer.
    /// Returns the new layer's id.
    pub fn generate(&mut self) -> Result<String> {
        let image = self.request_overlay()?;
        let name = Layer::name_from_prompt(&self.brief.prompt, self.layers().len());
        Ok(self.add_layer(image, name))
    }

    /// Insert an already generated image as a new layer.
    pub fn add_layer(&mut self, image: EncodedImage, name: String) -> String {
        let layer = Layer::new(image, Some(name));
        let id = layer.id.clone();
        self.canvas.history_mut().insert_layer(layer);
        id
    }

    /// Ask the provider to strip the background of the active image.
    pub fn request_background_removal(
        &self,
    ) -> std::result::Result<EncodedImage, GenerationError> {
        let image = self
            .active_layer()
            .and_then(|l| l.generated_image.as_ref())
            .ok_or(GenerationError::NoActiveImage)?;

        let _busy = self.background_removal.try_acquire()?;
        info!(provider = self.provider.name(), "removing background");
        remove_image_background(self.provider.as_ref(), image).map_err(|e| {
            error!("Background removal failed: {}", e);
            e
        })
    }

    /// Replace the active layer's image with a background-free version.
    pub fn remove_background(&mut self) -> Result<()> {
        let image = self.request_background_removal()?;
        self.canvas.history_mut().set_active_image(image);
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        self.canvas.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.canvas.redo()
    }

    /// Current render list, with a busy indicator while generating.
    pub fn render(&self) -> Scene {
        self.canvas
            .render()
            .with_loading(self.is_loading() || self.is_removing_background())
    }

    /// Write a transparent PNG of the active layer into `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        self.export_with(&PngRasterizer::new(), &ExportOptions::overlay(), dir)
    }

    pub fn export_with(
        &self,
        rasterizer: &dyn Rasterizer,
        options: &ExportOptions,
        dir: &Path,
    ) -> Result<PathBuf> {
        Ok(export_to_file(rasterizer, &self.canvas.render(), options, dir)?)
    }
}
