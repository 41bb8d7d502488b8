//! Built-in templates and style keywords.

use serde::Serialize;

/// Style keywords offered as toggles. Stored lower-case once selected.
pub const AVAILABLE_STYLES: [&str; 7] = [
    "Neon",
    "Minimalist",
    "Retro",
    "Tribal",
    "Abstract",
    "Cyberpunk",
    "Futuristic",
];

/// Read-only prompt preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub prompt: &'static str,
    pub style_keywords: &'static [&'static str],
}

const fn template(
    id: &'static str,
    name: &'static str,
    prompt: &'static str,
    style_keywords: &'static [&'static str],
) -> Template {
    Template {
        id,
        name,
        prompt,
        style_keywords,
    }
}

pub static TEMPLATES: [Template; 19] = [
    template(
        "t1",
        "Neon Night",
        "a vibrant neon sign for a DJ booth, glowing lines, dark background, futuristic font",
        &["neon", "futuristic"],
    ),
    template(
        "t2",
        "Minimalist Groove",
        "a clean, minimalist DJ logo, simple geometric shapes, monochrome, modern typography",
        &["minimalist"],
    ),
    template(
        "t3",
        "Retro Funk",
        "a 70s inspired DJ graphic, retro color palette (orange, brown, yellow), funky bold font, vinyl record motif",
        &["retro"],
    ),
    template(
        "t4",
        "Tribal Beats",
        "a DJ overlay with tribal patterns, earthy tones, bold and raw aesthetic, inspired by african art",
        &["tribal"],
    ),
    template(
        "t5",
        "Cyber Stream",
        "a cyberpunk themed overlay, glitch effects, neon pink and blue, digital artifacts, tech-wear inspired font",
        &["cyberpunk"],
    ),
    template(
        "t6",
        "Hip Hop Vibe",
        "a gritty, urban DJ overlay with graffiti elements, brick wall textures, and high-contrast lighting",
        &["hiphop", "urban", "street"],
    ),
    template(
        "t7",
        "Smooth R&B",
        "an elegant and sensual DJ overlay with soft, warm lighting, silk or velvet textures, and a classy cursive font",
        &["r&b", "smooth", "elegant"],
    ),
    template(
        "t8",
        "Rock On",
        "a raw, energetic rock music overlay with distorted textures, metallic elements, lightning bolts, and a bold, aggressive font",
        &["rock", "metal", "grunge"],
    ),
    template(
        "t9",
        "Glitch Hop",
        "a chaotic digital glitch art overlay, with distorted pixels, VHS effects, and a fragmented, futuristic aesthetic",
        &["glitch", "digital", "abstract"],
    ),
    template(
        "t10",
        "Lofi Chill",
        "a cozy and relaxing lofi inspired overlay, with pastel colors, soft animated rain or steam, and a cute, friendly font",
        &["lofi", "chill", "cozy"],
    ),
    template(
        "t11",
        "Cosmic",
        "a futuristic, deep space themed overlay, with nebulas, stars, planets, and a high-tech holographic interface feel",
        &["space", "cosmic", "futuristic"],
    ),
    template(
        "t12",
        "Old School '88",
        "an 80s old school hip hop block party aesthetic, boombox, graffiti art, vibrant neon colors on a black background, retro geometric patterns",
        &["retro", "hiphop", "80s"],
    ),
    template(
        "t13",
        "Horror Fest",
        "a horror movie themed overlay, dripping blood effect, scratched film texture, dark and moody with crimson red highlights, creepy font",
        &["horror", "dark", "grunge"],
    ),
    template(
        "t14",
        "Comedy Club",
        "a funny, cartoon-style DJ overlay, bright primary colors, comic book \"pow\" graphics, goofy and playful font",
        &["funny", "cartoon", "playful"],
    ),
    template(
        "t15",
        "Birthday Bash",
        "a birthday party celebration overlay, balloons, confetti, streamers, vibrant and celebratory colors, fun and festive font",
        &["birthday", "party", "celebration"],
    ),
    template(
        "t16",
        "Halloween Haunt",
        "a spooky Halloween themed DJ overlay, with jack-o-lanterns, spider webs, eerie purple and orange glow, gothic font",
        &["halloween", "spooky", "horror"],
    ),
    template(
        "t17",
        "Winter Wonderland",
        "a Christmas and winter holiday themed overlay, snowflakes, sparkling lights, festive red and green with gold accents, elegant script font",
        &["christmas", "winter", "holiday"],
    ),
    template(
        "t18",
        "New Year's Countdown",
        "a New Year's Eve party overlay, exploding fireworks, champagne glasses, clock counting down to midnight, glamorous gold and silver theme",
        &["new year", "party", "glam"],
    ),
    template(
        "t19",
        "Hyper Realistic",
        "a hyper-realistic, photorealistic DJ overlay, with chrome and brushed metal textures, realistic lighting and shadows, 3D elements, high-end professional studio look",
        &["realistic", "photorealistic", "3d", "metal"],
    ),
];

/// Look a template up by id (`t7`) or by name, ignoring case.
pub fn find_template(key: &str) -> Option<&'static Template> {
    let key = key.trim();
    TEMPLATES
        .iter()
        .find(|t| t.id.eq_ignore_ascii_case(key) || t.name.eq_ignore_ascii_case(key))
}

/// Selected style keywords, in selection order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct StyleKeywords(Vec<String>);

impl StyleKeywords {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keywords exactly as given (template keywords are already lower-case).
    pub fn from_slice(keywords: &[&str]) -> Self {
        Self(keywords.iter().map(|k| k.to_string()).collect())
    }

    /// Add the lower-cased style, or remove it if already selected.
    /// Returns whether the style is selected afterwards.
    pub fn toggle(&mut self, style: &str) -> bool {
        let style = style.trim().to_lowercase();
        if let Some(index) = self.0.iter().position(|k| *k == style) {
            self.0.remove(index);
            false
        } else {
            self.0.push(style);
            true
        }
    }

    pub fn contains(&self, style: &str) -> bool {
        let style = style.to_lowercase();
        self.0.iter().any(|k| *k == style)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// `"neon, futuristic"`
    pub fn joined(&self) -> String {
        self.0.join(", ")
    }
}
