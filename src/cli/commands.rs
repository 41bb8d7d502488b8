//! CLI Command Implementations
//!
//! Implements the actual logic for each CLI command.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use super::GenerateArgs;
use crate::composition::{Canvas, CanvasContent};
use crate::config::{EditorConfig, ProviderConfig};
use crate::error::{Result, StudioError};
use crate::export::{ExportOptions, PngRasterizer};
use crate::layers::{LayerOps, Layers};
use crate::provider::{GeminiProvider, ImageProvider, MockProvider};
use crate::studio::{find_template, CreativeBrief, Studio, Surface, TEMPLATES};
use crate::transform::{InteractionKind, Point};

/// Print the template catalog.
pub fn list_templates() -> Result<()> {
    println!("Templates:");
    println!("{:-<60}", "");
    for template in TEMPLATES.iter() {
        println!(
            "{:>4}  {:<22} [{}]",
            template.id,
            template.name,
            template.style_keywords.join(", ")
        );
    }
    Ok(())
}

/// Generate an overlay, apply edits, export it. Returns the written file.
pub fn overlay(
    args: &GenerateArgs,
    remove_background: bool,
    opacity: Option<f32>,
) -> Result<PathBuf> {
    let mut studio = Studio::new(provider(args.mock), EditorConfig::from_env());
    let overlay = studio.overlay_mut();

    apply_brief(overlay.brief_mut(), args)?;
    if let Some(ratio) = args.ratio {
        overlay.set_aspect_ratio(ratio);
    }
    overlay.canvas_mut().set_viewport_width(args.width);

    report(Surface::Overlay, overlay.generate())?;
    if remove_background {
        report(Surface::BackgroundRemoval, overlay.remove_background())?;
    }
    if let Some(opacity) = opacity {
        if let Some(id) = overlay.active_layer().map(|l| l.id.clone()) {
            overlay.layers_mut().set_opacity(&id, opacity);
        }
    }
    apply_gestures(overlay.canvas_mut(), args);
    print_layers(overlay.canvas().state());

    let options = export_options(ExportOptions::overlay(), args);
    let path = report(
        Surface::Overlay,
        overlay.export_with(&PngRasterizer::new(), &options, &args.out),
    )?;
    println!("Exported: {}", path.display());
    Ok(path)
}

/// Generate a flyer, apply edits, export it. Returns the written file.
pub fn flyer(args: &GenerateArgs) -> Result<PathBuf> {
    let mut studio = Studio::new(provider(args.mock), EditorConfig::from_env());
    apply_brief(studio.overlay_mut().brief_mut(), args)?;

    let flyer = studio.enter_flyer_mode();
    if let Some(ratio) = args.ratio {
        flyer.set_aspect_ratio(ratio);
    }
    flyer.canvas_mut().set_viewport_width(args.width);

    report(Surface::Flyer, flyer.generate())?;
    apply_gestures(flyer.canvas_mut(), args);

    let options = export_options(ExportOptions::flyer(), args);
    let path = report(
        Surface::Flyer,
        flyer.export_with(&PngRasterizer::new(), &options, &args.out),
    )?;
    println!("Exported: {}", path.display());
    Ok(path)
}

fn provider(mock: bool) -> Arc<dyn ImageProvider> {
    if mock {
        info!("Using mock image provider");
        return Arc::new(MockProvider::with_size(1024, 576));
    }

    let provider = GeminiProvider::new(ProviderConfig::from_env());
    if !provider.is_available() {
        warn!("Image provider is not available; pass --mock to work offline");
    }
    Arc::new(provider)
}

// Template first, then explicit prompt and style toggles on top of it.
fn apply_brief(brief: &mut CreativeBrief, args: &GenerateArgs) -> Result<()> {
    if let Some(key) = &args.template {
        let template = find_template(key).ok_or_else(|| StudioError::InvalidArgument {
            reason: format!("unknown template '{}'", key),
        })?;
        brief.apply_template(template);
        info!("Using template {} ({})", template.id, template.name);
    }
    if let Some(prompt) = &args.prompt {
        brief.prompt = prompt.clone();
    }
    for style in &args.styles {
        brief.style_keywords.toggle(style);
    }
    if let Some(name) = &args.name {
        brief.dj_name = name.clone();
    }
    Ok(())
}

fn apply_gestures<S: CanvasContent>(canvas: &mut Canvas<S>, args: &GenerateArgs) {
    if let Some(drag) = args.drag {
        let start = canvas.viewport().image_rect(&canvas.current_transform()).center();
        run_gesture(canvas, InteractionKind::Drag, start, drag.dx, drag.dy);
    }
    if let Some(resize) = args.resize {
        let start = resize
            .handle
            .anchor(&canvas.viewport().image_rect(&canvas.current_transform()));
        run_gesture(
            canvas,
            InteractionKind::Resize(resize.handle),
            start,
            resize.dx,
            resize.dy,
        );
    }
}

fn run_gesture<S: CanvasContent>(
    canvas: &mut Canvas<S>,
    kind: InteractionKind,
    start: Point,
    dx: f64,
    dy: f64,
) {
    if !canvas.begin(kind, start) {
        warn!("Nothing to transform");
        return;
    }
    canvas.pointer_move(Point::new(start.x + dx, start.y + dy));
    canvas.pointer_up();

    let t = canvas.current_transform();
    println!(
        "Transform: scale {:.3} x {:.3}, position ({:.1}, {:.1})",
        t.scale_x, t.scale_y, t.position.x, t.position.y
    );
}

fn export_options(base: ExportOptions, args: &GenerateArgs) -> ExportOptions {
    match args.background {
        Some(background) => base.with_background(background),
        None => base,
    }
}

fn print_layers(layers: &Layers) {
    println!("Layers:");
    for (i, layer) in layers.iter().enumerate() {
        println!(
            "  {}. {} [{}] opacity {:.2}",
            i + 1,
            layer.display_name(),
            if layer.is_visible { "visible" } else { "hidden" },
            layer.effective_opacity()
        );
    }
}

// Surface the user-facing message before handing the error back.
fn report<T>(surface: Surface, result: Result<T>) -> Result<T> {
    result.map_err(|e| {
        eprintln!("{}", surface.user_message(&e));
        if e.is_recoverable() {
            eprintln!("Run the command again to retry.");
        }
        e
    })
}
