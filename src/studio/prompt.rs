//! Prompt assembly
//!
//! Turns the user's theme, style keywords and DJ name into the full
//! instruction text sent to the provider.

use serde::Serialize;

use super::templates::{StyleKeywords, Template};
use crate::composition::AspectRatio;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreativeBrief {
    /// Main theme
    pub prompt: String,
    /// Text to include in the artwork (may be empty)
    pub dj_name: String,
    pub style_keywords: StyleKeywords,
}

impl CreativeBrief {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            ..Self::default()
        }
    }

    pub fn with_dj_name(mut self, name: impl Into<String>) -> Self {
        self.dj_name = name.into();
        self
    }

    pub fn with_style_keywords(mut self, keywords: StyleKeywords) -> Self {
        self.style_keywords = keywords;
        self
    }

    /// Replace prompt and style keywords with the template's. The DJ name
    /// is kept.
    pub fn apply_template(&mut self, template: &Template) {
        self.prompt = template.prompt.to_string();
        self.style_keywords = StyleKeywords::from_slice(template.style_keywords);
    }
}

/// Instruction text for a frame-only overlay with a transparent centre.
pub fn overlay_prompt(brief: &CreativeBrief) -> String {
    let mut lines = vec![
        "Create a DJ overlay graphic.".to_string(),
        "CRITICAL INSTRUCTION: The final image MUST be a border/frame ONLY. The entire central area MUST be 100% transparent. Do NOT put any colors, gradients, or patterns in the middle.".to_string(),
        format!("Main theme: \"{}\".", brief.prompt),
        format!("Style keywords: {}.", brief.style_keywords.joined()),
    ];
    if !brief.dj_name.is_empty() {
        lines.push(format!("Include the text \"{}\".", brief.dj_name));
    }
    lines.extend([
        "The overlay should have a transparent background so it can be placed over a video feed."
            .to_string(),
        "Generate only the graphic elements, no background.".to_string(),
        "The image should be high resolution.".to_string(),
    ]);
    lines.join("\n")
}

/// Instruction text for a full-background event poster.
pub fn flyer_prompt(brief: &CreativeBrief, aspect: AspectRatio) -> String {
    // Only the two poster orientations are described to the provider.
    let orientation = if aspect == AspectRatio::Landscape {
        "16:9 landscape"
    } else {
        "9:16 portrait"
    };

    [
        "Create a promotional event flyer with a full background.".to_string(),
        "CRITICAL REQUIREMENTS:".to_string(),
        format!("- Aspect Ratio: {}.", orientation),
        "- The design MUST have a full, complete background and feel like a professional event poster.".to_string(),
        String::new(),
        "CREATIVE DIRECTION:".to_string(),
        format!("- Main theme: \"{}\".", brief.prompt),
        format!("- Style keywords: {}.", brief.style_keywords.joined()),
        format!("- Prominently feature the DJ Name: \"{}\".", brief.dj_name),
        "- The design should be artistic and visually balanced, leaving some space for other text to be added later.".to_string(),
        "- Do NOT add any other placeholder text like dates, venues, or event names.".to_string(),
    ]
    .join("\n")
}
