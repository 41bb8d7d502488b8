//! Scene rasterization
//!
//! [`PngRasterizer`] draws the image node of a [`Scene`] onto a canvas of
//! the viewport's size. The image is fitted inside its untransformed box
//! (object-contain), then scaled and moved by the layer transform, then
//! composited source-over with the layer opacity. Handles and the
//! camera-feed placeholder are editor chrome and are never exported.
//!
//! Scale has no upper bound, so a layer can be far larger than the canvas.
//! Past [`MAX_EXPORT_PIXELS`] the layer is sampled per output pixel over the
//! visible region instead of being resized whole.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};
use tracing::{debug, error, info};

use super::options::ExportOptions;
use crate::composition::{Scene, SceneNode};
use crate::error::ExportError;
use crate::transform::Rect;

/// Largest buffer, in pixels, the rasterizer allocates for the output or
/// for a resized layer.
pub const MAX_EXPORT_PIXELS: u64 = 8192 * 8192;

/// Turns a scene into encoded image bytes.
pub trait Rasterizer {
    fn rasterize(&self, scene: &Scene, options: &ExportOptions) -> Result<Vec<u8>, ExportError>;
}

/// Reference rasterizer producing PNG bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngRasterizer {
    filter: Filter,
}

/// Resampling filter used when scaling the layer image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    Nearest,
    #[default]
    Triangle,
    Lanczos3,
}

impl Filter {
    fn as_filter_type(self) -> FilterType {
        match self {
            Self::Nearest => FilterType::Nearest,
            Self::Triangle => FilterType::Triangle,
            Self::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl PngRasterizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(filter: Filter) -> Self {
        Self { filter }
    }

    /// Composite the scene into an RGBA buffer.
    pub fn render(&self, scene: &Scene, options: &ExportOptions) -> Result<RgbaImage, ExportError> {
        let ratio = options.pixel_ratio;
        if !(ratio.is_finite() && ratio > 0.0) {
            return Err(ExportError::Rasterize {
                reason: format!("invalid pixel ratio {}", ratio),
            });
        }

        let (encoded, rect, opacity, transform) = scene
            .nodes
            .iter()
            .find_map(|node| match node {
                SceneNode::Image {
                    image,
                    rect,
                    opacity,
                    transform,
                } => Some((image, *rect, *opacity, *transform)),
                _ => None,
            })
            .ok_or(ExportError::NoRenderableRegion)?;

        let width = to_pixels(scene.width * ratio);
        let height = to_pixels(scene.height * ratio);
        if width == 0 || height == 0 {
            return Err(ExportError::Rasterize {
                reason: format!("empty output size {}x{}", width, height),
            });
        }
        if width as u64 * height as u64 > MAX_EXPORT_PIXELS {
            return Err(ExportError::Rasterize {
                reason: format!("output size {}x{} is too large", width, height),
            });
        }

        let bytes = encoded.decode().map_err(|e| ExportError::Decode {
            reason: e.to_string(),
        })?;
        let source = image::load_from_memory(&bytes)
            .map_err(|e| ExportError::Decode {
                reason: e.to_string(),
            })?
            .to_rgba8();

        let mut canvas = RgbaImage::from_pixel(width, height, options.background.pixel());

        let fitted = contain(
            source.width() as f64,
            source.height() as f64,
            scene.width,
            scene.height,
        );
        // Position the fitted image inside the transformed element box.
        let dest = Rect::new(
            (rect.x + fitted.x * transform.scale_x) * ratio,
            (rect.y + fitted.y * transform.scale_y) * ratio,
            fitted.width * transform.scale_x * ratio,
            fitted.height * transform.scale_y * ratio,
        );

        let dest_w = to_pixels(dest.width);
        let dest_h = to_pixels(dest.height);
        if dest_w == 0 || dest_h == 0 {
            return Ok(canvas);
        }

        let opacity = opacity.clamp(0.0, 1.0);
        if dest_w as u64 * dest_h as u64 > MAX_EXPORT_PIXELS {
            debug!(dest_w, dest_h, "layer exceeds pixel budget, sampling visible region");
            sample_onto(&mut canvas, &source, &dest, opacity);
            return Ok(canvas);
        }

        let scaled = imageops::resize(&source, dest_w, dest_h, self.filter.as_filter_type());
        blend_onto(
            &mut canvas,
            &scaled,
            dest.x.round() as i64,
            dest.y.round() as i64,
            opacity,
        );
        Ok(canvas)
    }
}

impl Rasterizer for PngRasterizer {
    fn rasterize(&self, scene: &Scene, options: &ExportOptions) -> Result<Vec<u8>, ExportError> {
        let canvas = self.render(scene, options)?;
        let mut out = Cursor::new(Vec::new());
        canvas
            .write_to(&mut out, ImageFormat::Png)
            .map_err(|e| ExportError::Rasterize {
                reason: e.to_string(),
            })?;
        Ok(out.into_inner())
    }
}

/// Rasterize `scene` and write it to `dir/<file_name>`.
pub fn export_to_file(
    rasterizer: &dyn Rasterizer,
    scene: &Scene,
    options: &ExportOptions,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let bytes = rasterizer.rasterize(scene, options).map_err(|e| {
        error!("Export failed: {}", e);
        e
    })?;

    let path = dir.join(&options.file_name);
    fs::write(&path, &bytes).map_err(|source| ExportError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), bytes = bytes.len(), "exported image");
    Ok(path)
}

fn to_pixels(len: f64) -> u32 {
    if len.is_finite() && len > 0.0 {
        len.round().min(u32::MAX as f64) as u32
    } else {
        0
    }
}

/// Largest `src` sized box that fits centred inside `box_w` x `box_h`.
fn contain(src_w: f64, src_h: f64, box_w: f64, box_h: f64) -> Rect {
    if src_w <= 0.0 || src_h <= 0.0 {
        return Rect::new(0.0, 0.0, 0.0, 0.0);
    }
    let scale = (box_w / src_w).min(box_h / src_h);
    let (w, h) = (src_w * scale, src_h * scale);
    Rect::new((box_w - w) / 2.0, (box_h - h) / 2.0, w, h)
}

// Straight-alpha source-over, clipped to the canvas.
fn blend_onto(canvas: &mut RgbaImage, src: &RgbaImage, x0: i64, y0: i64, opacity: f32) {
    for (sx, sy, px) in src.enumerate_pixels() {
        let x = x0 + sx as i64;
        let y = y0 + sy as i64;
        if x < 0 || y < 0 || x >= canvas.width() as i64 || y >= canvas.height() as i64 {
            continue;
        }
        let dst = canvas.get_pixel_mut(x as u32, y as u32);
        *dst = source_over(*px, *dst, opacity);
    }
}

// Nearest-neighbour lookup for each canvas pixel covered by `dest`.
fn sample_onto(canvas: &mut RgbaImage, src: &RgbaImage, dest: &Rect, opacity: f32) {
    let (src_w, src_h) = (src.width(), src.height());
    if src_w == 0 || src_h == 0 || dest.width <= 0.0 || dest.height <= 0.0 {
        return;
    }

    let span = |start: f64, len: f64, limit: u32| {
        let lo = start.max(0.0).floor().min(limit as f64) as u32;
        let hi = (start + len).max(0.0).ceil().min(limit as f64) as u32;
        lo..hi
    };
    let rows = span(dest.y, dest.height, canvas.height());
    let cols = span(dest.x, dest.width, canvas.width());

    for y in rows {
        let v = (y as f64 + 0.5 - dest.y) / dest.height;
        if !(0.0..1.0).contains(&v) {
            continue;
        }
        let sy = ((v * src_h as f64) as u32).min(src_h - 1);
        for x in cols.clone() {
            let u = (x as f64 + 0.5 - dest.x) / dest.width;
            if !(0.0..1.0).contains(&u) {
                continue;
            }
            let sx = ((u * src_w as f64) as u32).min(src_w - 1);
            let dst = canvas.get_pixel_mut(x, y);
            *dst = source_over(*src.get_pixel(sx, sy), *dst, opacity);
        }
    }
}

fn source_over(src: Rgba<u8>, dst: Rgba<u8>, opacity: f32) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0 * opacity;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        c.round().clamp(0.0, 255.0) as u8
    };
    Rgba([
        channel(0),
        channel(1),
        channel(2),
        (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
    ])
}
