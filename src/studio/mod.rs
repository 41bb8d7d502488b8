//! Studio Orchestrator
//!
//! Connects the creative brief (prompt, style keywords, DJ name) to the
//! image provider and feeds the results into the editing canvases.

mod flyer;
mod guard;
mod overlay;
mod prompt;
mod session;
mod templates;

pub use flyer::{FlyerStudio, FLYER_DEFAULT_ASPECT};
pub use guard::{FlightGuard, SingleFlight, Surface};
pub use overlay::OverlayStudio;
pub use prompt::{flyer_prompt, overlay_prompt, CreativeBrief};
pub use session::{EditorMode, Studio};
pub use templates::{find_template, StyleKeywords, Template, AVAILABLE_STYLES, TEMPLATES};
