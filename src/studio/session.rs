//! Top-level editor session switching between overlay and flyer modes.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::flyer::FlyerStudio;
use super::overlay::OverlayStudio;
use crate::config::EditorConfig;
use crate::provider::ImageProvider;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    #[default]
    Overlay,
    Flyer,
}

impl fmt::Display for EditorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overlay => f.write_str("overlay"),
            Self::Flyer => f.write_str("flyer"),
        }
    }
}

impl FromStr for EditorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "overlay" => Ok(Self::Overlay),
            "flyer" => Ok(Self::Flyer),
            other => Err(format!("unknown mode '{}'", other)),
        }
    }
}

/// The whole editor: an overlay session that lives for the process, and a
/// flyer session that exists only while flyer mode is open.
pub struct Studio {
    provider: Arc<dyn ImageProvider>,
    config: EditorConfig,
    overlay: OverlayStudio,
    flyer: Option<FlyerStudio>,
}

impl Studio {
    pub fn new(provider: Arc<dyn ImageProvider>, config: EditorConfig) -> Self {
        Self {
            overlay: OverlayStudio::new(Arc::clone(&provider), &config),
            provider,
            config,
            flyer: None,
        }
    }

    pub fn mode(&self) -> EditorMode {
        if self.flyer.is_some() {
            EditorMode::Flyer
        } else {
            EditorMode::Overlay
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn overlay(&self) -> &OverlayStudio {
        &self.overlay
    }

    pub fn overlay_mut(&mut self) -> &mut OverlayStudio {
        &mut self.overlay
    }

    pub fn flyer(&self) -> Option<&FlyerStudio> {
        self.flyer.as_ref()
    }

    pub fn flyer_mut(&mut self) -> Option<&mut FlyerStudio> {
        self.flyer.as_mut()
    }

    /// Open flyer mode, seeding prompt, name and keywords from the overlay
    /// session. An already open flyer session is kept as is.
    pub fn enter_flyer_mode(&mut self) -> &mut FlyerStudio {
        let provider = &self.provider;
        let config = &self.config;
        let brief = self.overlay.brief();
        self.flyer.get_or_insert_with(|| {
            info!("entering flyer mode");
            FlyerStudio::new(Arc::clone(provider), config, brief.clone())
        })
    }

    /// Close flyer mode and discard its session. Overlay state is untouched.
    pub fn leave_flyer_mode(&mut self) -> bool {
        let was_open = self.flyer.take().is_some();
        if was_open {
            info!("leaving flyer mode");
        }
        was_open
    }
}
