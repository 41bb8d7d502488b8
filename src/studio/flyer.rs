//! Flyer mode: one full-background poster image with its own history.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{error, info};

use super::guard::{SingleFlight, Surface};
use super::prompt::{flyer_prompt, CreativeBrief};
use crate::composition::{AspectRatio, Canvas, Scene, Viewport, DEFAULT_VIEWPORT_WIDTH};
use crate::config::EditorConfig;
use crate::error::{GenerationError, Result};
use crate::export::{export_to_file, ExportOptions, PngRasterizer, Rasterizer};
use crate::layers::FlyerState;
use crate::provider::{generate_flyer, EncodedImage, ImageProvider};

/// Flyers start in portrait.
pub const FLYER_DEFAULT_ASPECT: AspectRatio = AspectRatio::Portrait;

pub struct FlyerStudio {
    provider: Arc<dyn ImageProvider>,
    canvas: Canvas<FlyerState>,
    brief: CreativeBrief,
    generation: SingleFlight,
}

impl FlyerStudio {
    /// Start a flyer session seeded with `brief`.
    pub fn new(provider: Arc<dyn ImageProvider>, config: &EditorConfig, brief: CreativeBrief) -> Self {
        Self {
            provider,
            canvas: Canvas::new(
                FlyerState::default(),
                Viewport::new(DEFAULT_VIEWPORT_WIDTH, FLYER_DEFAULT_ASPECT),
                config,
            ),
            brief,
            generation: SingleFlight::new(Surface::Flyer),
        }
    }

    pub fn brief(&self) -> &CreativeBrief {
        &self.brief
    }

    pub fn brief_mut(&mut self) -> &mut CreativeBrief {
        &mut self.brief
    }

    pub fn canvas(&self) -> &Canvas<FlyerState> {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut Canvas<FlyerState> {
        &mut self.canvas
    }

    pub fn state(&self) -> &FlyerState {
        self.canvas.state()
    }

    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.canvas.set_aspect_ratio(aspect);
    }

    pub fn is_loading(&self) -> bool {
        self.generation.is_busy()
    }

    pub fn generation_flight(&self) -> &SingleFlight {
        &self.generation
    }

    /// Ask the provider for a flyer image without changing any state.
    pub fn request_flyer(&self) -> std::result::Result<EncodedImage, GenerationError> {
        let _busy = self.generation.try_acquire()?;
        let prompt = flyer_prompt(&self.brief, self.canvas.aspect_ratio());
        info!(provider = self.provider.name(), aspect = %self.canvas.aspect_ratio(), "generating flyer");
        generate_flyer(self.provider.as_ref(), &prompt).map_err(|e| {
            error!("Flyer generation failed: {}", e);
            e
        })
    }

    /// Generate a flyer; the new image replaces the old one at the default
    /// placement as a single undo step.
    pub fn generate(&mut self) -> Result<()> {
        let image = self.request_flyer()?;
        self.canvas
            .history_mut()
            .set_value(FlyerState::with_image(image));
        Ok(())
    }

    pub fn undo(&mut self) -> bool {
        self.canvas.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.canvas.redo()
    }

    pub fn render(&self) -> Scene {
        self.canvas.render().with_loading(self.is_loading())
    }

    /// Write the flyer on its dark backdrop into `dir`.
    pub fn export(&self, dir: &Path) -> Result<PathBuf> {
        self.export_with(&PngRasterizer::new(), &ExportOptions::flyer(), dir)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::{MockCall, MockProvider, MockResponse};

    fn studio(provider: &Arc<MockProvider>) -> FlyerStudio {
        FlyerStudio::new(
            provider.clone(),
            &EditorConfig::default(),
            CreativeBrief::new("warehouse rave").with_dj_name("DJ Nova"),
        )
    }

    #[test]
    fn test_defaults_to_portrait() {
        let provider = Arc::new(MockProvider::new());
        let flyer = studio(&provider);
        assert_eq!(flyer.canvas().aspect_ratio(), AspectRatio::Portrait);
        assert!(flyer.state().generated_image.is_none());
    }

    #[test]
    fn test_generate_records_one_step() {
        let provider = Arc::new(MockProvider::new());
        let mut flyer = studio(&provider);
        flyer.generate().unwrap();
        flyer.generate().unwrap();

        assert_eq!(flyer.canvas().history().undo_count(), 2);
        match &provider.calls()[0] {
            MockCall::Generate { prompt } => {
                assert!(prompt.contains("9:16 portrait"));
                assert!(prompt.contains("\"DJ Nova\""));
            }
            other => panic!("unexpected call: {:?}", other),
        }

        flyer.undo();
        flyer.undo();
        assert!(flyer.state().generated_image.is_none());
    }

    #[test]
    fn test_no_image_leaves_state() {
        let provider = Arc::new(MockProvider::new());
        provider.push_response(MockResponse::Empty);
        let mut flyer = studio(&provider);

        let err = flyer.generate().unwrap_err();
        assert_eq!(err.error_code(), "NO_IMAGE");
        assert!(!flyer.canvas().can_undo());
    }
}
