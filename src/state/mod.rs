//! State Management Module
//!
//! Provides the generic undo/redo history used by every editing surface.

mod history;

pub use history::History;
