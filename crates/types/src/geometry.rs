//! Plain geometry values shared by every layout crate.
use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound for values that are still considered usable for layout.
/// Anything at or above this is treated as overflowed arithmetic. Extents
/// are `f32`, so this is also the limit for values stored in a [`Size`].
const LAYOUT_POINTS_LIMIT: f32 = f32::MAX / 2.0;

/// One of the two layout axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => f.write_str("width"),
            Axis::Vertical => f.write_str("height"),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// A concrete width/height pair. Equality is exact; there is no epsilon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub const INFINITE: Size = Size {
        width: f32::INFINITY,
        height: f32::INFINITY,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn get(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Returns a copy with the value on `axis` replaced.
    pub fn with(self, axis: Axis, value: f32) -> Self {
        match axis {
            Axis::Horizontal => Self {
                width: value,
                ..self
            },
            Axis::Vertical => Self {
                height: value,
                ..self
            },
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}}}", self.width, self.height)
    }
}

/// Whether `points` is a usable extent: zero or a normal positive number
/// comfortably below the float range.
pub fn points_valid_for_layout(points: f32) -> bool {
    (points.is_normal() || points == 0.0) && points >= 0.0 && points < LAYOUT_POINTS_LIMIT
}

pub fn size_valid_for_layout(size: Size) -> bool {
    points_valid_for_layout(size.width) && points_valid_for_layout(size.height)
}

/// Like [`points_valid_for_layout`] but positions may be negative.
pub fn position_points_valid_for_layout(points: f32) -> bool {
    (points.is_normal() || points == 0.0) && points < LAYOUT_POINTS_LIMIT
}

pub fn position_valid_for_layout(point: Point) -> bool {
    position_points_valid_for_layout(point.x) && position_points_valid_for_layout(point.y)
}

pub fn rect_valid_for_layout(rect: Rect) -> bool {
    position_valid_for_layout(rect.origin()) && size_valid_for_layout(rect.size())
}
