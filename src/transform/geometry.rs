//! 2D geometry primitives shared by the transform engine and the viewport.

use serde::{Deserialize, Serialize};

/// Smallest scale factor a layer may have on either axis.
pub const MIN_SCALE: f64 = 0.1;

/// A point in viewport pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned rectangle (top-left origin, viewport pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_center(center: Point, width: f64, height: f64) -> Self {
        Self {
            x: center.x - width / 2.0,
            y: center.y - height / 2.0,
            width,
            height,
        }
    }

    pub fn left(&self) -> f64 {
        self.x
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn top(&self) -> f64 {
        self.y
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left() && p.x <= self.right() && p.y >= self.top() && p.y <= self.bottom()
    }

    /// Shrink every side by `amount`, never below zero size.
    pub fn inset(&self, amount: f64) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: (self.width - 2.0 * amount).max(0.0),
            height: (self.height - 2.0 * amount).max(0.0),
        }
    }
}

/// Placement of a layer image relative to its default full-viewport box:
/// independent X/Y scale about the box centre, then a translation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transform {
    pub scale_x: f64,
    pub scale_y: f64,
    pub position: Point,
}

impl Transform {
    pub const IDENTITY: Transform = Transform {
        scale_x: 1.0,
        scale_y: 1.0,
        position: Point::ORIGIN,
    };

    pub fn new(scale_x: f64, scale_y: f64, position: Point) -> Self {
        Self {
            scale_x,
            scale_y,
            position,
        }
    }

    /// Same transform with both scales floored at [`MIN_SCALE`].
    pub fn clamped(self) -> Self {
        Self {
            scale_x: self.scale_x.max(MIN_SCALE),
            scale_y: self.scale_y.max(MIN_SCALE),
            position: self.position,
        }
    }

    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            position: Point::new(self.position.x + dx, self.position.y + dy),
            ..self
        }
    }

    /// The box occupied by an element of `base` size once this transform is
    /// applied about its centre (CSS `translate(..) scaleX(..) scaleY(..)`).
    pub fn apply_to(&self, base: Rect) -> Rect {
        let center = base.center();
        Rect::from_center(
            Point::new(center.x + self.position.x, center.y + self.position.y),
            base.width * self.scale_x,
            base.height * self.scale_y,
        )
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
