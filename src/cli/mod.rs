//! CLI Module
//!
//! Headless command-line front end: generate one overlay or flyer, apply
//! optional gestures, and export it as a PNG.

pub mod commands;

use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand};

use crate::composition::{AspectRatio, DEFAULT_VIEWPORT_WIDTH};
use crate::export::Background;
use crate::transform::ResizeHandle;

/// Overlay Studio - AI-generated DJ overlays and flyers
#[derive(Parser, Debug)]
#[command(name = "overlay-studio")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the built-in templates
    #[command(name = "templates")]
    Templates,

    /// Generate a stream overlay and export it
    #[command(name = "overlay")]
    Overlay {
        #[command(flatten)]
        args: GenerateArgs,

        /// Make the background of the generated image transparent
        #[arg(long)]
        remove_background: bool,

        /// Layer opacity (0.0 - 1.0)
        #[arg(long)]
        opacity: Option<f32>,
    },

    /// Generate an event flyer and export it
    #[command(name = "flyer")]
    Flyer {
        #[command(flatten)]
        args: GenerateArgs,
    },
}

/// Options shared by the overlay and flyer commands.
#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Main theme
    #[arg(short, long)]
    pub prompt: Option<String>,

    /// Template id or name (see `templates`)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Style keyword toggle (repeatable)
    #[arg(short, long = "style")]
    pub styles: Vec<String>,

    /// DJ name to feature in the artwork
    #[arg(short, long)]
    pub name: Option<String>,

    /// Aspect ratio: 16:9, 9:16, 4:3 or 1:1
    #[arg(short, long)]
    pub ratio: Option<AspectRatio>,

    /// Viewport width in pixels
    #[arg(short, long, default_value_t = DEFAULT_VIEWPORT_WIDTH)]
    pub width: f64,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub out: PathBuf,

    /// Export background: `transparent` or `#rrggbb`
    #[arg(long)]
    pub background: Option<Background>,

    /// Use the offline mock provider
    #[arg(long)]
    pub mock: bool,

    /// Move the image by `dx,dy` pixels
    #[arg(long, allow_hyphen_values = true)]
    pub drag: Option<DragArg>,

    /// Resize from a handle: `handle,dx,dy` (e.g. `bottom-right,40,20`)
    #[arg(long, allow_hyphen_values = true)]
    pub resize: Option<ResizeArg>,
}

/// `dx,dy`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragArg {
    pub dx: f64,
    pub dy: f64,
}

impl FromStr for DragArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (dx, dy) = s
            .split_once(',')
            .ok_or_else(|| format!("expected dx,dy but got '{}'", s))?;
        Ok(Self {
            dx: parse_delta(dx)?,
            dy: parse_delta(dy)?,
        })
    }
}

/// `handle,dx,dy`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeArg {
    pub handle: ResizeHandle,
    pub dx: f64,
    pub dy: f64,
}

impl FromStr for ResizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (handle, delta) = s
            .split_once(',')
            .ok_or_else(|| format!("expected handle,dx,dy but got '{}'", s))?;
        let drag: DragArg = delta.parse()?;
        Ok(Self {
            handle: handle.parse()?,
            dx: drag.dx,
            dy: drag.dy,
        })
    }
}

fn parse_delta(s: &str) -> Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid pixel offset '{}'", s))
}
