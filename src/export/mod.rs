//! Export
//!
//! Rasterizes a rendered [`Scene`](crate::composition::Scene) to a PNG file.

mod options;
mod raster;

pub use options::{Background, ExportOptions, FLYER_BACKGROUND, FLYER_FILE_NAME, OVERLAY_FILE_NAME};
pub use raster::{export_to_file, Filter, PngRasterizer, Rasterizer, MAX_EXPORT_PIXELS};
