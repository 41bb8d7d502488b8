//! Editing Canvas
//!
//! Ties a [`History`] of some content to the [`TransformEngine`] and a
//! [`Viewport`]. Pointer events are hit-tested against the active image,
//! and finished gestures are written back into history according to the
//! configured [`CommitMode`]:
//!
//! - `Move`: every pointer-move is its own snapshot.
//! - `Gesture`: moves only update a preview; pointer-up commits once.

use std::sync::Arc;

use tracing::debug;

use super::aspect::AspectRatio;
use super::scene::{Scene, SceneNode, EMPTY_STATE_TEXT};
use super::viewport::Viewport;
use crate::config::{CommitMode, EditorConfig};
use crate::provider::EncodedImage;
use crate::state::History;
use crate::transform::{InteractionKind, Point, Transform, TransformEngine};

/// Content a canvas can display and transform.
///
/// Implemented by the overlay layer stack and by the single-image flyer
/// state, so both share one history and gesture implementation.
pub trait CanvasContent {
    /// Image currently being edited, if any.
    fn active_image(&self) -> Option<&EncodedImage>;

    /// Transform of the active image (identity when there is none).
    fn active_transform(&self) -> Transform;

    fn active_opacity(&self) -> f32 {
        1.0
    }

    /// Whether anything has been generated yet.
    fn has_content(&self) -> bool;

    /// Next snapshot with the active transform replaced. Returns the same
    /// `Arc` when there is nothing to transform.
    fn with_active_transform(current: &Arc<Self>, transform: Transform) -> Arc<Self>;
}

/// History plus pointer handling for one editing surface.
#[derive(Debug, Clone)]
pub struct Canvas<S> {
    history: History<S>,
    engine: TransformEngine,
    commit_mode: CommitMode,
    /// Uncommitted transform while a `Gesture`-mode gesture is active.
    preview: Option<Transform>,
    viewport: Viewport,
    handle_radius: f64,
}

impl<S: CanvasContent> Canvas<S> {
    pub fn new(initial: S, viewport: Viewport, config: &EditorConfig) -> Self {
        let history = match config.history_limit {
            Some(limit) => History::with_limit(initial, limit),
            None => History::new(initial),
        };
        Self {
            history,
            engine: TransformEngine::new(),
            commit_mode: config.commit_mode,
            preview: None,
            viewport,
            handle_radius: config.handle_radius,
        }
    }

    pub fn history(&self) -> &History<S> {
        &self.history
    }

    /// Mutable access to the history. Any active gesture is cancelled first
    /// so a preview never outlives the snapshot it was computed from.
    pub fn history_mut(&mut self) -> &mut History<S> {
        self.cancel_gesture();
        &mut self.history
    }

    pub fn state(&self) -> &S {
        self.history.state()
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn aspect_ratio(&self) -> AspectRatio {
        self.viewport.aspect()
    }

    pub fn set_aspect_ratio(&mut self, aspect: AspectRatio) {
        self.cancel_gesture();
        self.viewport.set_aspect(aspect);
    }

    pub fn set_viewport_width(&mut self, width: f64) {
        self.cancel_gesture();
        self.viewport.set_width(width);
    }

    pub fn commit_mode(&self) -> CommitMode {
        self.commit_mode
    }

    pub fn set_commit_mode(&mut self, mode: CommitMode) {
        self.cancel_gesture();
        self.commit_mode = mode;
    }

    pub fn is_interacting(&self) -> bool {
        self.engine.is_active()
    }

    /// Transform to draw right now: the gesture preview if there is one,
    /// otherwise the committed transform.
    pub fn current_transform(&self) -> Transform {
        self.preview
            .unwrap_or_else(|| self.history.state().active_transform())
    }

    /// Hit-test `point` and start a gesture if it lands on the image or a
    /// handle. Returns the started gesture.
    pub fn pointer_down(&mut self, point: Point) -> Option<InteractionKind> {
        self.state().active_image()?;
        let kind = self
            .viewport
            .hit_test(point, &self.current_transform(), self.handle_radius)?;
        self.begin(kind, point).then_some(kind)
    }

    /// Start a gesture of `kind` at `point` without hit testing. Returns
    /// `false` when there is no active image.
    pub fn begin(&mut self, kind: InteractionKind, point: Point) -> bool {
        if self.state().active_image().is_none() {
            return false;
        }
        self.cancel_gesture();
        let transform = self.current_transform();
        let rect = self.viewport.image_rect(&transform);
        self.engine.pointer_down(kind, point, transform, rect);
        true
    }

    /// Feed a pointer position. Returns the transform the gesture now
    /// produces, or `None` when idle.
    pub fn pointer_move(&mut self, point: Point) -> Option<Transform> {
        let transform = self.engine.pointer_move(point)?;
        match self.commit_mode {
            CommitMode::Move => {
                self.history
                    .update(|current| S::with_active_transform(current, transform));
            }
            CommitMode::Gesture => self.preview = Some(transform),
        }
        Some(transform)
    }

    /// End the gesture. Returns whether pointer-up itself committed a
    /// history entry. In `Move` mode every move was already recorded, so
    /// this is always `false` there.
    pub fn pointer_up(&mut self) -> bool {
        let start = self.engine.interaction().map(|i| i.start_transform);
        if !self.engine.pointer_up() {
            return false;
        }

        let Some(transform) = self.preview.take() else {
            return false;
        };
        if Some(transform) == start {
            return false;
        }

        let committed = self
            .history
            .update(|current| S::with_active_transform(current, transform));
        debug!(committed, "gesture committed");
        committed
    }

    /// Drop an active gesture and its preview without committing.
    pub fn cancel_gesture(&mut self) {
        if self.engine.pointer_up() {
            debug!("gesture cancelled");
        }
        self.preview = None;
    }

    pub fn undo(&mut self) -> bool {
        self.cancel_gesture();
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.cancel_gesture();
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Back-to-front render list for the current state.
    pub fn render(&self) -> Scene {
        let state = self.state();
        let mut nodes = Vec::new();

        if state.has_content() {
            nodes.push(SceneNode::CameraFeed {
                rect: self.viewport.camera_feed_rect(),
                label: format!("CAMERA FEED AREA ({})", self.viewport.aspect()),
            });
        } else {
            nodes.push(SceneNode::EmptyState {
                text: EMPTY_STATE_TEXT.to_string(),
            });
        }

        if let Some(image) = state.active_image() {
            let transform = self.current_transform();
            nodes.push(SceneNode::Image {
                image: image.clone(),
                rect: self.viewport.image_rect(&transform),
                opacity: state.active_opacity(),
                transform,
            });
            nodes.extend(
                self.viewport
                    .handle_positions(&transform)
                    .into_iter()
                    .map(|(handle, center)| SceneNode::Handle { handle, center }),
            );
        }

        Scene {
            width: self.viewport.width(),
            height: self.viewport.height(),
            aspect: self.viewport.aspect(),
            nodes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::{Layer, LayerOps, Layers};
    use crate::transform::ResizeHandle;
    use approx::assert_relative_eq;

    fn canvas(mode: CommitMode) -> Canvas<Layers> {
        let config = EditorConfig::default().with_commit_mode(mode);
        let mut canvas = Canvas::new(
            Vec::new(),
            Viewport::new(200.0, AspectRatio::Square),
            &config,
        );
        canvas
            .history_mut()
            .insert_layer(Layer::with_id("a", Some(EncodedImage::from_base64("QUJD"))));
        canvas
    }

    #[test]
    fn test_gesture_mode_commits_once() {
        let mut canvas = canvas(CommitMode::Gesture);
        let before = canvas.history().undo_count();

        assert_eq!(
            canvas.pointer_down(Point::new(100.0, 100.0)),
            Some(InteractionKind::Drag)
        );
        canvas.pointer_move(Point::new(110.0, 100.0));
        canvas.pointer_move(Point::new(150.0, 70.0));
        assert_eq!(canvas.history().undo_count(), before);
        assert_eq!(canvas.current_transform().position, Point::new(50.0, -30.0));

        assert!(canvas.pointer_up());
        assert_eq!(canvas.history().undo_count(), before + 1);
        assert_eq!(
            canvas.state().active_transform().position,
            Point::new(50.0, -30.0)
        );
    }

    #[test]
    fn test_move_mode_records_each_move() {
        let mut canvas = canvas(CommitMode::Move);
        let before = canvas.history().undo_count();

        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.pointer_move(Point::new(110.0, 100.0));
        canvas.pointer_move(Point::new(120.0, 100.0));
        canvas.pointer_move(Point::new(130.0, 100.0));
        assert!(!canvas.pointer_up());
        assert_eq!(canvas.history().undo_count(), before + 3);

        canvas.undo();
        assert_eq!(canvas.state().active_transform().position.x, 20.0);
    }

    #[test]
    fn test_click_without_move_records_nothing() {
        let mut canvas = canvas(CommitMode::Gesture);
        let before = canvas.history().undo_count();
        canvas.pointer_down(Point::new(100.0, 100.0));
        assert!(!canvas.pointer_up());
        assert_eq!(canvas.history().undo_count(), before);
    }

    #[test]
    fn test_resize_via_handle_hit() {
        let mut canvas = canvas(CommitMode::Gesture);
        assert_eq!(
            canvas.pointer_down(Point::new(199.0, 199.0)),
            Some(InteractionKind::Resize(ResizeHandle::BottomRight))
        );
        canvas.pointer_move(Point::new(219.0, 209.0));
        canvas.pointer_up();
        let t = canvas.state().active_transform();
        assert_relative_eq!(t.scale_x, 1.1);
        assert_relative_eq!(t.scale_y, 1.05);
        assert_relative_eq!(t.position.x, 10.0);
        assert_relative_eq!(t.position.y, 5.0);
    }

    #[test]
    fn test_pointer_down_outside_image_is_ignored() {
        let mut canvas = canvas(CommitMode::Gesture);
        canvas.history_mut().set_active_transform(Transform::new(
            0.25,
            0.25,
            Point::ORIGIN,
        ));
        assert_eq!(canvas.pointer_down(Point::new(5.0, 5.0)), None);
        assert!(!canvas.is_interacting());
    }

    #[test]
    fn test_no_gesture_without_active_image() {
        let mut canvas: Canvas<Layers> =
            Canvas::new(Vec::new(), Viewport::default(), &EditorConfig::default());
        assert_eq!(canvas.pointer_down(Point::new(10.0, 10.0)), None);
        assert!(!canvas.begin(InteractionKind::Drag, Point::ORIGIN));
    }

    #[test]
    fn test_undo_during_gesture_discards_preview() {
        let mut canvas = canvas(CommitMode::Gesture);
        canvas.pointer_down(Point::new(100.0, 100.0));
        canvas.pointer_move(Point::new(140.0, 100.0));
        assert!(canvas.undo());
        assert!(!canvas.is_interacting());
        assert!(canvas.state().is_empty());
        assert_eq!(canvas.pointer_move(Point::new(180.0, 100.0)), None);
    }

    #[test]
    fn test_render_nodes() {
        let empty: Canvas<Layers> =
            Canvas::new(Vec::new(), Viewport::default(), &EditorConfig::default());
        let scene = empty.render();
        assert!(matches!(scene.nodes[0], SceneNode::EmptyState { .. }));
        assert!(scene.image().is_none());

        let canvas = canvas(CommitMode::Gesture);
        let scene = canvas.render();
        match &scene.nodes[0] {
            SceneNode::CameraFeed { label, .. } => assert_eq!(label, "CAMERA FEED AREA (1:1)"),
            other => panic!("unexpected node: {:?}", other),
        }
        assert!(scene.image().is_some());
        assert_eq!(scene.handles().count(), 8);
    }

    #[test]
    fn test_hidden_layer_keeps_camera_feed_only() {
        let mut canvas = canvas(CommitMode::Gesture);
        canvas.history_mut().toggle_visibility("a");
        let scene = canvas.render();
        assert!(scene.has_camera_feed());
        assert!(scene.image().is_none());
        assert_eq!(canvas.pointer_down(Point::new(100.0, 100.0)), None);
    }
}
