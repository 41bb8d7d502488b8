//! Pointer Gesture State Machine
//!
//! Turns drag and resize gestures into a [`Transform`]. The engine is
//! `Idle` until a pointer-down, then every pointer-move is measured against
//! the pointer-down position and the transform/box captured at that
//! instant, so a gesture never accumulates rounding drift.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::geometry::{Point, Rect, Transform};
use super::handle::ResizeHandle;

/// What a gesture does to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "handle", rename_all = "lowercase")]
pub enum InteractionKind {
    Drag,
    Resize(ResizeHandle),
}

/// Snapshot taken when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interaction {
    pub kind: InteractionKind,
    /// Pointer position at pointer-down.
    pub start: Point,
    pub start_transform: Transform,
    /// Bounding box of the image element at pointer-down.
    pub start_rect: Rect,
}

impl Interaction {
    /// Transform for a pointer that has moved `(dx, dy)` since pointer-down.
    pub fn transform_for(&self, dx: f64, dy: f64) -> Transform {
        match self.kind {
            InteractionKind::Drag => self.start_transform.translated(dx, dy),
            InteractionKind::Resize(handle) => resize(self, handle, dx, dy),
        }
    }
}

/// Each axis changes only if the handle touches one of its edges. The centre
/// moves by half the delta so the side opposite the handle stays put.
fn resize(interaction: &Interaction, handle: ResizeHandle, dx: f64, dy: f64) -> Transform {
    let Interaction {
        start_transform: start,
        start_rect: rect,
        ..
    } = *interaction;

    let mut next = start;

    if handle.touches_right() || handle.touches_left() {
        let new_width = if handle.touches_right() {
            rect.width + dx
        } else {
            rect.width - dx
        };
        next.scale_x = scale_ratio(new_width, rect.width) * start.scale_x;
        next.position.x = start.position.x + dx / 2.0;
    }

    if handle.touches_bottom() || handle.touches_top() {
        let new_height = if handle.touches_bottom() {
            rect.height + dy
        } else {
            rect.height - dy
        };
        next.scale_y = scale_ratio(new_height, rect.height) * start.scale_y;
        next.position.y = start.position.y + dy / 2.0;
    }

    next.clamped()
}

// A zero-sized box has no meaningful ratio; keep the starting scale.
fn scale_ratio(new_len: f64, start_len: f64) -> f64 {
    if start_len > 0.0 {
        new_len / start_len
    } else {
        1.0
    }
}

/// Gesture state: `None` is idle, `Some` is an active gesture.
#[derive(Debug, Clone, Default)]
pub struct TransformEngine {
    interaction: Option<Interaction>,
}

impl TransformEngine {
    pub fn new() -> Self {
        Self { interaction: None }
    }

    pub fn is_active(&self) -> bool {
        self.interaction.is_some()
    }

    pub fn interaction(&self) -> Option<&Interaction> {
        self.interaction.as_ref()
    }

    /// Start a gesture. A pointer-down while already active restarts the
    /// gesture from the new snapshot.
    pub fn pointer_down(
        &mut self,
        kind: InteractionKind,
        pointer: Point,
        transform: Transform,
        rect: Rect,
    ) {
        debug!(?kind, x = pointer.x, y = pointer.y, "gesture start");
        self.interaction = Some(Interaction {
            kind,
            start: pointer,
            start_transform: transform,
            start_rect: rect,
        });
    }

    /// New transform for the pointer's current position, or `None` when idle.
    pub fn pointer_move(&self, pointer: Point) -> Option<Transform> {
        let interaction = self.interaction.as_ref()?;
        let dx = pointer.x - interaction.start.x;
        let dy = pointer.y - interaction.start.y;
        Some(interaction.transform_for(dx, dy))
    }

    /// End the gesture. Returns whether one was active.
    pub fn pointer_up(&mut self) -> bool {
        let was_active = self.interaction.take().is_some();
        if was_active {
            debug!("gesture end");
        }
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use test_case::test_case;

    fn start_resize(handle: ResizeHandle, rect: Rect) -> TransformEngine {
        let mut engine = TransformEngine::new();
        engine.pointer_down(
            InteractionKind::Resize(handle),
            Point::new(100.0, 100.0),
            Transform::IDENTITY,
            rect,
        );
        engine
    }

    #[test]
    fn test_idle_move_is_ignored() {
        let engine = TransformEngine::new();
        assert!(engine.pointer_move(Point::new(5.0, 5.0)).is_none());
    }

    #[test]
    fn test_drag_translates_only() {
        let mut engine = TransformEngine::new();
        engine.pointer_down(
            InteractionKind::Drag,
            Point::new(10.0, 10.0),
            Transform::IDENTITY,
            Rect::new(0.0, 0.0, 200.0, 100.0),
        );

        let t = engine.pointer_move(Point::new(60.0, -20.0)).unwrap();
        assert_relative_eq!(t.position.x, 50.0);
        assert_relative_eq!(t.position.y, -30.0);
        assert_relative_eq!(t.scale_x, 1.0);
        assert_relative_eq!(t.scale_y, 1.0);
    }

    #[test]
    fn test_moves_are_relative_to_pointer_down() {
        let mut engine = TransformEngine::new();
        engine.pointer_down(
            InteractionKind::Drag,
            Point::ORIGIN,
            Transform::new(1.0, 1.0, Point::new(5.0, 5.0)),
            Rect::new(0.0, 0.0, 10.0, 10.0),
        );
        engine.pointer_move(Point::new(100.0, 100.0));
        let t = engine.pointer_move(Point::new(1.0, 2.0)).unwrap();
        assert_relative_eq!(t.position.x, 6.0);
        assert_relative_eq!(t.position.y, 7.0);
    }

    #[test]
    fn test_bottom_right_resize() {
        let engine = start_resize(ResizeHandle::BottomRight, Rect::new(0.0, 0.0, 200.0, 100.0));
        let t = engine.pointer_move(Point::new(120.0, 110.0)).unwrap();

        assert_relative_eq!(t.scale_x, 1.1);
        assert_relative_eq!(t.scale_y, 1.1);
        assert_relative_eq!(t.position.x, 10.0);
        assert_relative_eq!(t.position.y, 5.0);
    }

    #[test]
    fn test_top_left_resize_shrinks_and_shifts() {
        let engine = start_resize(ResizeHandle::TopLeft, Rect::new(0.0, 0.0, 200.0, 100.0));
        let t = engine.pointer_move(Point::new(120.0, 110.0)).unwrap();

        assert_relative_eq!(t.scale_x, 0.9);
        assert_relative_eq!(t.scale_y, 0.9);
        assert_relative_eq!(t.position.x, 10.0);
        assert_relative_eq!(t.position.y, 5.0);
    }

    #[test_case(ResizeHandle::TopCenter, 1.0, 0.8 ; "top edge leaves x alone")]
    #[test_case(ResizeHandle::MiddleRight, 1.2, 1.0 ; "right edge leaves y alone")]
    #[test_case(ResizeHandle::MiddleLeft, 0.8, 1.0 ; "left edge leaves y alone")]
    #[test_case(ResizeHandle::BottomCenter, 1.0, 1.2 ; "bottom edge leaves x alone")]
    fn test_edge_handles_touch_one_axis(handle: ResizeHandle, sx: f64, sy: f64) {
        let engine = start_resize(handle, Rect::new(0.0, 0.0, 100.0, 100.0));
        let t = engine.pointer_move(Point::new(120.0, 120.0)).unwrap();
        assert_relative_eq!(t.scale_x, sx);
        assert_relative_eq!(t.scale_y, sy);
    }

    #[test]
    fn test_resize_never_below_min_scale() {
        for handle in ResizeHandle::ALL {
            let engine = start_resize(handle, Rect::new(0.0, 0.0, 200.0, 100.0));
            for (x, y) in [(-1.0e6, -1.0e6), (1.0e6, 1.0e6), (100.0, -5.0e4)] {
                let t = engine.pointer_move(Point::new(x, y)).unwrap();
                assert!(t.scale_x >= 0.1, "{} produced scale_x {}", handle, t.scale_x);
                assert!(t.scale_y >= 0.1, "{} produced scale_y {}", handle, t.scale_y);
            }
        }
    }

    #[test]
    fn test_resize_compounds_with_start_scale() {
        let mut engine = TransformEngine::new();
        engine.pointer_down(
            InteractionKind::Resize(ResizeHandle::MiddleRight),
            Point::ORIGIN,
            Transform::new(2.0, 1.0, Point::ORIGIN),
            Rect::new(0.0, 0.0, 400.0, 100.0),
        );
        let t = engine.pointer_move(Point::new(100.0, 0.0)).unwrap();
        assert_relative_eq!(t.scale_x, 2.5);
    }

    #[test]
    fn test_zero_sized_rect_keeps_scale() {
        let engine = start_resize(ResizeHandle::BottomRight, Rect::new(0.0, 0.0, 0.0, 0.0));
        let t = engine.pointer_move(Point::new(150.0, 150.0)).unwrap();
        assert_relative_eq!(t.scale_x, 1.0);
        assert_relative_eq!(t.scale_y, 1.0);
    }

    #[test]
    fn test_pointer_up_returns_to_idle() {
        let mut engine = start_resize(ResizeHandle::TopLeft, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert!(engine.is_active());
        assert!(engine.pointer_up());
        assert!(!engine.is_active());
        assert!(!engine.pointer_up());
        assert!(engine.pointer_move(Point::new(1.0, 1.0)).is_none());
    }
}
