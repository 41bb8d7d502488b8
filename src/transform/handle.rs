//! The eight resize handles drawn around an image.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};

/// Resize handle position: four corners plus four edge midpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResizeHandle {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopCenter,
        ResizeHandle::TopRight,
        ResizeHandle::MiddleLeft,
        ResizeHandle::MiddleRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomCenter,
        ResizeHandle::BottomRight,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::MiddleLeft => "middle-left",
            Self::MiddleRight => "middle-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    pub fn touches_left(&self) -> bool {
        matches!(self, Self::TopLeft | Self::MiddleLeft | Self::BottomLeft)
    }

    pub fn touches_right(&self) -> bool {
        matches!(self, Self::TopRight | Self::MiddleRight | Self::BottomRight)
    }

    pub fn touches_top(&self) -> bool {
        matches!(self, Self::TopLeft | Self::TopCenter | Self::TopRight)
    }

    pub fn touches_bottom(&self) -> bool {
        matches!(
            self,
            Self::BottomLeft | Self::BottomCenter | Self::BottomRight
        )
    }

    /// Where this handle sits on `rect`.
    pub fn anchor(&self, rect: &Rect) -> Point {
        let x = if self.touches_left() {
            rect.left()
        } else if self.touches_right() {
            rect.right()
        } else {
            rect.center().x
        };
        let y = if self.touches_top() {
            rect.top()
        } else if self.touches_bottom() {
            rect.bottom()
        } else {
            rect.center().y
        };
        Point::new(x, y)
    }

    /// CSS cursor shown while hovering the handle.
    pub fn cursor(&self) -> &'static str {
        match self {
            Self::TopLeft | Self::BottomLeft => "nwse-resize",
            Self::TopRight | Self::BottomRight => "nesw-resize",
            Self::TopCenter | Self::BottomCenter => "ns-resize",
            Self::MiddleLeft | Self::MiddleRight => "ew-resize",
        }
    }
}

impl fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResizeHandle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResizeHandle::ALL
            .into_iter()
            .find(|h| h.as_str() == s.trim().to_lowercase())
            .ok_or_else(|| {
                format!(
                    "unknown handle '{}', expected one of: {}",
                    s,
                    ResizeHandle::ALL.map(|h| h.as_str()).join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(ResizeHandle::TopLeft, true, false, true, false)]
    #[test_case(ResizeHandle::TopCenter, false, false, true, false)]
    #[test_case(ResizeHandle::MiddleRight, false, true, false, false)]
    #[test_case(ResizeHandle::BottomRight, false, true, false, true)]
    #[test_case(ResizeHandle::BottomCenter, false, false, false, true)]
    fn test_edges(h: ResizeHandle, left: bool, right: bool, top: bool, bottom: bool) {
        assert_eq!(h.touches_left(), left);
        assert_eq!(h.touches_right(), right);
        assert_eq!(h.touches_top(), top);
        assert_eq!(h.touches_bottom(), bottom);
    }

    #[test]
    fn test_parse_round_trips_names() {
        for h in ResizeHandle::ALL {
            assert_eq!(h.as_str().parse::<ResizeHandle>().unwrap(), h);
        }
        assert!("middle-center".parse::<ResizeHandle>().is_err());
    }

    #[test]
    fn test_anchor_positions() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(ResizeHandle::TopLeft.anchor(&rect), Point::new(10.0, 20.0));
        assert_eq!(
            ResizeHandle::MiddleRight.anchor(&rect),
            Point::new(110.0, 45.0)
        );
        assert_eq!(
            ResizeHandle::BottomCenter.anchor(&rect),
            Point::new(60.0, 70.0)
        );
    }
}
