//! Viewport aspect ratios.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the four supported viewport shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Classic,
    #[serde(rename = "1:1")]
    Square,
}

impl AspectRatio {
    pub const ALL: [AspectRatio; 4] = [
        AspectRatio::Landscape,
        AspectRatio::Portrait,
        AspectRatio::Classic,
        AspectRatio::Square,
    ];

    /// `"16:9"` style notation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Landscape => "16:9",
            Self::Portrait => "9:16",
            Self::Classic => "4:3",
            Self::Square => "1:1",
        }
    }

    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Landscape => "Landscape",
            Self::Portrait => "Portrait",
            Self::Classic => "Classic",
            Self::Square => "Square",
        }
    }

    /// Width over height.
    pub fn ratio(&self) -> f64 {
        match self {
            Self::Landscape => 16.0 / 9.0,
            Self::Portrait => 9.0 / 16.0,
            Self::Classic => 4.0 / 3.0,
            Self::Square => 1.0,
        }
    }

    /// Height of a viewport of the given width.
    pub fn height_for(&self, width: f64) -> f64 {
        width / self.ratio()
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AspectRatio {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        AspectRatio::ALL
            .into_iter()
            .find(|r| r.as_str() == s || r.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown aspect ratio '{}', expected 16:9, 9:16, 4:3 or 1:1", s))
    }
}
