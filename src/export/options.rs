//! Export settings.

use std::fmt;
use std::str::FromStr;

use image::Rgba;

/// File name used for overlay exports.
pub const OVERLAY_FILE_NAME: &str = "dj-overlay.png";
/// File name used for flyer exports.
pub const FLYER_FILE_NAME: &str = "dj-flyer.png";
/// Backdrop colour behind flyers.
pub const FLYER_BACKGROUND: Rgba<u8> = Rgba([0x11, 0x18, 0x27, 0xff]);

/// What fills pixels the image does not cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Background {
    #[default]
    Transparent,
    Solid(Rgba<u8>),
}

impl Background {
    pub fn pixel(&self) -> Rgba<u8> {
        match self {
            Self::Transparent => Rgba([0, 0, 0, 0]),
            Self::Solid(color) => *color,
        }
    }
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => f.write_str("transparent"),
            Self::Solid(Rgba([r, g, b, _])) => write!(f, "#{:02x}{:02x}{:02x}", r, g, b),
        }
    }
}

/// Parses `transparent` or a `#rrggbb` hex colour.
impl FromStr for Background {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("transparent") || s.eq_ignore_ascii_case("none") {
            return Ok(Self::Transparent);
        }

        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("invalid background colour '{}'", s));
        }
        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| format!("invalid background colour '{}'", s))
        };
        Ok(Self::Solid(Rgba([channel(0)?, channel(2)?, channel(4)?, 0xff])))
    }
}

/// How a scene is turned into a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    pub background: Background,
    pub file_name: String,
    /// Output pixels per viewport pixel.
    pub pixel_ratio: f64,
}

impl ExportOptions {
    /// Transparent PNG named `dj-overlay.png`.
    pub fn overlay() -> Self {
        Self {
            background: Background::Transparent,
            file_name: OVERLAY_FILE_NAME.to_string(),
            pixel_ratio: 1.0,
        }
    }

    /// PNG on the dark flyer backdrop named `dj-flyer.png`.
    pub fn flyer() -> Self {
        Self {
            background: Background::Solid(FLYER_BACKGROUND),
            file_name: FLYER_FILE_NAME.to_string(),
            pixel_ratio: 1.0,
        }
    }

    pub fn with_background(mut self, background: Background) -> Self {
        self.background = background;
        self
    }

    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = ratio;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::overlay()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("transparent", Background::Transparent)]
    #[test_case("#111827", Background::Solid(FLYER_BACKGROUND))]
    #[test_case("ff0000", Background::Solid(Rgba([255, 0, 0, 255])))]
    fn test_parse_background(input: &str, expected: Background) {
        assert_eq!(input.parse::<Background>().unwrap(), expected);
    }

    #[test]
    fn test_parse_background_rejects_garbage() {
        assert!("#12345".parse::<Background>().is_err());
        assert!("#gg0000".parse::<Background>().is_err());
    }

    #[test]
    fn test_presets() {
        let overlay = ExportOptions::overlay();
        assert_eq!(overlay.background, Background::Transparent);
        assert_eq!(overlay.file_name, "dj-overlay.png");

        let flyer = ExportOptions::flyer();
        assert_eq!(flyer.background.to_string(), "#111827");
        assert_eq!(flyer.file_name, "dj-flyer.png");
    }
}
