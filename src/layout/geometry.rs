//! Render-space primitives

use serde::{Deserialize, Serialize};

const EPSILON: f64 = 1e-9;

/// A point in render space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate (grows downward)
    pub y: f64,
}

impl Point {
    /// Create a point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Axis-aligned rectangle with its origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Rect {
    /// Create a rectangle
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Right edge
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Centre point
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Area
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Whether the point lies inside; left and top edges are inclusive, right and bottom exclusive
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Whether the point lies inside or on the boundary
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.x - EPSILON
            && point.x <= self.right() + EPSILON
            && point.y >= self.y - EPSILON
            && point.y <= self.bottom() + EPSILON
    }

    /// Whether `other` lies entirely within this rectangle
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x - EPSILON
            && other.y >= self.y - EPSILON
            && other.right() <= self.right() + EPSILON
            && other.bottom() <= self.bottom() + EPSILON
    }

    /// Whether the interiors of the two rectangles intersect; shared edges do not count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right() - EPSILON
            && other.x < self.right() - EPSILON
            && self.y < other.bottom() - EPSILON
            && other.y < self.bottom() - EPSILON
    }

    /// Clamp a point into this rectangle, keeping `margin` away from the edges where possible
    ///
    /// An axis with a negative or non-finite extent leaves that coordinate untouched.
    pub fn clamp_point(&self, point: Point, margin: f64) -> Point {
        let margin_x = margin.min(self.width / 2.0).max(0.0);
        let margin_y = margin.min(self.height / 2.0).max(0.0);
        Point::new(
            clamp_axis(point.x, self.x + margin_x, self.right() - margin_x),
            clamp_axis(point.y, self.y + margin_y, self.bottom() - margin_y),
        )
    }
}

fn clamp_axis(value: f64, low: f64, high: f64) -> f64 {
    if low.is_finite() && high.is_finite() && low <= high {
        value.clamp(low, high)
    } else {
        value
    }
}
