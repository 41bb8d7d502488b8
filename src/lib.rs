//! Overlay Studio - AI-assisted DJ overlay and flyer editor
//!
//! Images come from an external generative provider; this crate owns what
//! happens to them afterwards:
//! - an undo/redo [`History`](state::History) of immutable snapshots
//! - a layer stack with visibility, order and opacity
//! - a pointer-driven transform engine (drag, eight-handle resize)
//! - a fixed-aspect composition surface and PNG export
//!
//! # Architecture
//!
//! Overlay mode edits a `Vec<Layer>`, flyer mode a single [`FlyerState`].
//! Both run through the same [`Canvas`], so history, gestures and
//! rendering are shared.
//!
//! [`FlyerState`]: layers::FlyerState
//! [`Canvas`]: composition::Canvas

pub mod cli;
pub mod composition;
pub mod config;
pub mod error;
pub mod export;
pub mod layers;
pub mod provider;
pub mod state;
pub mod studio;
pub mod transform;

pub use error::{ExportError, GenerationError, Result, StudioError};
