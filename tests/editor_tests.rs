//! Editor Integration Tests
//!
//! Drives history, layer operations and gestures through the public API.

use std::sync::Arc;

use approx::assert_relative_eq;
use overlay_studio::composition::{AspectRatio, Canvas, Viewport};
use overlay_studio::config::{CommitMode, EditorConfig};
use overlay_studio::layers::{FlyerState, Layer, LayerOps, Layers};
use overlay_studio::provider::EncodedImage;
use overlay_studio::state::History;
use overlay_studio::transform::{
    InteractionKind, Point, Rect, ResizeHandle, Transform, TransformEngine, MIN_SCALE,
};
use test_case::test_case;

fn layer(id: &str) -> Layer {
    Layer::with_id(id, Some(EncodedImage::from_base64("QUJD")))
}

fn layer_canvas(mode: CommitMode) -> Canvas<Layers> {
    let config = EditorConfig::default().with_commit_mode(mode);
    let mut canvas = Canvas::new(
        Vec::new(),
        Viewport::new(200.0, AspectRatio::Landscape),
        &config,
    );
    canvas.history_mut().insert_layer(layer("base"));
    canvas
}

// === History ===

#[test]
fn test_undo_redo_round_trip_over_many_edits() {
    let mut history = History::new(Vec::<Layer>::new());
    for id in ["a", "b", "c", "d"] {
        history.insert_layer(layer(id));
    }
    let snapshot = Arc::clone(history.present());

    for n in 1..=history.undo_count() {
        for _ in 0..n {
            history.undo();
        }
        for _ in 0..n {
            history.redo();
        }
        assert!(Arc::ptr_eq(history.present(), &snapshot));
    }
}

#[test]
fn test_new_edit_discards_redo_branch() {
    let mut history = History::new(Vec::<Layer>::new());
    history.insert_layer(layer("a"));
    history.insert_layer(layer("b"));
    history.undo();
    assert!(history.can_redo());

    history.toggle_visibility("a");
    assert!(!history.can_redo());
}

#[test]
fn test_history_limit_drops_oldest() {
    let mut history = History::with_limit(Vec::<Layer>::new(), 2);
    for id in ["a", "b", "c", "d"] {
        history.insert_layer(layer(id));
    }
    assert_eq!(history.undo_count(), 2);
    assert_eq!(history.discarded(), 2);
    while history.undo() {}
    assert_eq!(history.state().len(), 2);
}

// === Transform Engine ===

#[test]
fn test_drag_example() {
    let mut engine = TransformEngine::new();
    engine.pointer_down(
        InteractionKind::Drag,
        Point::new(300.0, 300.0),
        Transform::IDENTITY,
        Rect::new(0.0, 0.0, 200.0, 100.0),
    );
    let t = engine.pointer_move(Point::new(350.0, 270.0)).unwrap();
    assert_eq!(t.position, Point::new(50.0, -30.0));
    assert_eq!((t.scale_x, t.scale_y), (1.0, 1.0));
}

#[test]
fn test_bottom_right_resize_example() {
    let mut engine = TransformEngine::new();
    engine.pointer_down(
        InteractionKind::Resize(ResizeHandle::BottomRight),
        Point::new(200.0, 100.0),
        Transform::IDENTITY,
        Rect::new(0.0, 0.0, 200.0, 100.0),
    );
    let t = engine.pointer_move(Point::new(220.0, 110.0)).unwrap();
    assert_relative_eq!(t.scale_x, 1.1);
    assert_relative_eq!(t.scale_y, 1.1);
    assert_relative_eq!(t.position.x, 10.0);
    assert_relative_eq!(t.position.y, 5.0);
}

#[test_case(ResizeHandle::TopLeft, 5000.0, 5000.0)]
#[test_case(ResizeHandle::BottomRight, -5000.0, -5000.0)]
#[test_case(ResizeHandle::MiddleLeft, 1e9, 0.0)]
#[test_case(ResizeHandle::TopCenter, 0.0, 1e9)]
fn test_scale_never_below_floor(handle: ResizeHandle, dx: f64, dy: f64) {
    let mut engine = TransformEngine::new();
    engine.pointer_down(
        InteractionKind::Resize(handle),
        Point::ORIGIN,
        Transform::IDENTITY,
        Rect::new(0.0, 0.0, 200.0, 100.0),
    );
    let t = engine.pointer_move(Point::new(dx, dy)).unwrap();
    assert!(t.scale_x >= MIN_SCALE);
    assert!(t.scale_y >= MIN_SCALE);
}

// === Canvas ===

#[test]
fn test_gesture_then_undo_restores_placement() {
    let mut canvas = layer_canvas(CommitMode::Gesture);
    canvas.pointer_down(Point::new(100.0, 56.0));
    canvas.pointer_move(Point::new(130.0, 76.0));
    assert!(canvas.pointer_up());

    assert_eq!(canvas.current_transform().position, Point::new(30.0, 20.0));
    canvas.undo();
    assert_eq!(canvas.current_transform(), Transform::IDENTITY);
    canvas.redo();
    assert_eq!(canvas.current_transform().position, Point::new(30.0, 20.0));
}

#[test]
fn test_gesture_only_touches_active_layer() {
    let mut canvas = layer_canvas(CommitMode::Move);
    canvas.history_mut().insert_layer(layer("top"));

    canvas.pointer_down(Point::new(100.0, 56.0));
    canvas.pointer_move(Point::new(90.0, 56.0));
    canvas.pointer_up();

    let layers = canvas.state();
    assert_eq!(layers[0].effective_transform(), Transform::IDENTITY);
    assert_eq!(layers[1].effective_transform().position, Point::new(-10.0, 0.0));
}

#[test]
fn test_aspect_change_keeps_history() {
    let mut canvas = layer_canvas(CommitMode::Gesture);
    let before = canvas.history().undo_count();
    canvas.set_aspect_ratio(AspectRatio::Classic);
    assert_eq!(canvas.history().undo_count(), before);
    assert_relative_eq!(canvas.viewport().height(), 150.0);
}

#[test]
fn test_flyer_canvas_shares_gesture_logic() {
    let config = EditorConfig::default();
    let mut canvas = Canvas::new(
        FlyerState::with_image(EncodedImage::from_base64("QUJD")),
        Viewport::new(90.0, AspectRatio::Portrait),
        &config,
    );

    assert_eq!(
        canvas.pointer_down(Point::new(90.0, 160.0)),
        Some(InteractionKind::Resize(ResizeHandle::BottomRight))
    );
    canvas.pointer_move(Point::new(45.0, 80.0));
    assert!(canvas.pointer_up());

    let t = canvas.state().transform;
    assert_relative_eq!(t.scale_x, 0.5);
    assert_relative_eq!(t.scale_y, 0.5);
    assert_relative_eq!(t.position.x, -22.5);
    assert_relative_eq!(t.position.y, -40.0);
}
