#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Everything lives in one shared coordinate space (origin at top-left, y
//! grows downward). Units are whatever the host surface uses: pixels for a
//! graphical host, cells for a terminal.

use std::ops::{Add, Sub};

/// A pointer position or a vector between two positions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// A bounding box, as reported by the host for an item or container.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    /// Create a new bounding box.
    #[inline]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Right edge (`left + width`).
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Bottom edge (`top + height`).
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.left, self.top)
    }

    /// Vertical center (`top + height / 2`).
    #[inline]
    pub fn center_y(&self) -> f64 {
        self.top + self.height / 2.0
    }

    /// Check if the box has zero (or negative) area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point lies inside the box.
    ///
    /// All four edges are inclusive, so a pointer resting exactly on a
    /// container border still counts as inside it.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }

    /// The same box moved so its top-left corner sits at `origin`.
    #[inline]
    pub fn moved_to(&self, origin: Point) -> Bounds {
        Bounds::new(origin.x, origin.y, self.width, self.height)
    }

    /// Shrink the box by `inset` on every side, never below zero size.
    pub fn inset(&self, inset: f64) -> Bounds {
        Bounds::new(
            self.left + inset,
            self.top + inset,
            (self.width - 2.0 * inset).max(0.0),
            (self.height - 2.0 * inset).max(0.0),
        )
    }

    /// Grab offset of `pointer` relative to the top-left corner.
    #[inline]
    pub fn offset_of(&self, pointer: Point) -> Point {
        pointer - self.origin()
    }
}
