// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Axis-aligned rectangles
//!
//! Rectangles are described by their four edges in a Y-up coordinate frame,
//! so a well-formed rectangle has `left <= right` and `bottom <= top`.
//! Construction does not enforce this; inverted rectangles simply never
//! intersect anything. Bodies validate their rectangle when it is attached.

use crate::math::Vector;
use std::fmt;

/// Axis-aligned bounding box
///
/// # Examples
///
/// ```
/// use rayle_physics::math::Rectangle;
///
/// let a = Rectangle::new(0.0, 2.0, 2.0, 0.0);
/// let b = Rectangle::new(1.0, 3.0, 3.0, 1.0);
/// assert_eq!(a.intersection(&b), Some(Rectangle::new(1.0, 2.0, 2.0, 1.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    /// Minimum x
    pub left: f64,
    /// Maximum x
    pub right: f64,
    /// Maximum y
    pub top: f64,
    /// Minimum y
    pub bottom: f64,
}

impl Rectangle {
    /// Create a rectangle from its edges
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Rectangle {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Create a rectangle standing on `anchor`, its bottom-center point
    pub fn from_bottom_center(anchor: Vector, width: f64, height: f64) -> Self {
        let half_width = width / 2.0;
        Rectangle::new(
            anchor.x - half_width,
            anchor.x + half_width,
            anchor.y + height,
            anchor.y,
        )
    }

    /// Horizontal extent
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Vertical extent
    pub fn height(&self) -> f64 {
        self.top - self.bottom
    }

    /// Check that every edge is finite and the rectangle is not inverted
    pub fn is_valid(&self) -> bool {
        self.left.is_finite()
            && self.right.is_finite()
            && self.top.is_finite()
            && self.bottom.is_finite()
            && self.left <= self.right
            && self.bottom <= self.top
    }

    /// Overlapping region of `self` and `other`
    ///
    /// Returns `None` unless the overlap has strictly positive width and
    /// height; rectangles that only share an edge do not intersect.
    pub fn intersection(&self, other: &Rectangle) -> Option<Rectangle> {
        let left = self.left.max(other.left);
        let right = self.right.min(other.right);
        let top = self.top.min(other.top);
        let bottom = self.bottom.max(other.bottom);
        if left < right && bottom < top {
            Some(Rectangle::new(left, right, top, bottom))
        } else {
            None
        }
    }

    /// Smallest bounding box containing both `self` and `other`
    pub fn sbb(&self, other: &Rectangle) -> Rectangle {
        Rectangle::new(
            self.left.min(other.left),
            self.right.max(other.right),
            self.top.max(other.top),
            self.bottom.min(other.bottom),
        )
    }

    /// Check whether `other` lies entirely within this rectangle (edges inclusive)
    pub fn contains(&self, other: &Rectangle) -> bool {
        self.left <= other.left
            && other.right <= self.right
            && self.bottom <= other.bottom
            && other.top <= self.top
    }

    /// Translate all four edges by `displacement`
    pub fn add(&mut self, displacement: &Vector) {
        self.add_scaled(displacement, 1.0);
    }

    /// Translate all four edges by `displacement * scale`
    pub fn add_scaled(&mut self, displacement: &Vector, scale: f64) {
        let dx = displacement.x * scale;
        let dy = displacement.y * scale;
        self.left += dx;
        self.right += dx;
        self.top += dy;
        self.bottom += dy;
    }

    /// Midpoint of the rectangle
    pub fn center(&self) -> Vector {
        Vector::new(
            (self.left + self.right) / 2.0,
            (self.bottom + self.top) / 2.0,
        )
    }

    /// Check whether `other` sits beneath this rectangle
    ///
    /// With `d = other.center() - self.center()`, this holds when `d.y < 0`
    /// and `|d.y| > |d.x|`: the offset points down and is more vertical than
    /// horizontal. A body whose collision region satisfies
    /// `body.is_below(&region)` is supported from below.
    pub fn is_below(&self, other: &Rectangle) -> bool {
        let mut d = other.center();
        d.sub(&self.center());
        d.y < 0.0 && d.y.abs() > d.x.abs()
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[left: {}, right: {}, top: {}, bottom: {}]",
            self.left, self.right, self.top, self.bottom
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersection_overlap() {
        let a = Rectangle::new(-1.0, 1.0, 1.0, -1.0);
        let b = Rectangle::new(0.0, 2.0, 0.5, -3.0);
        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap, Rectangle::new(0.0, 1.0, 0.5, -1.0));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let body = Rectangle::new(-0.5, 0.5, 1.0, 0.0);
        let floor = Rectangle::new(-10.0, 10.0, 0.0, -1.0);
        assert!(body.intersection(&floor).is_none());

        let wall = Rectangle::new(0.5, 1.5, 1.0, 0.0);
        assert!(body.intersection(&wall).is_none());
    }

    #[test]
    fn test_inverted_rectangle_never_intersects() {
        let inverted = Rectangle::new(1.0, -1.0, 1.0, -1.0);
        let normal = Rectangle::new(-5.0, 5.0, 5.0, -5.0);
        assert!(!inverted.is_valid());
        assert!(inverted.intersection(&normal).is_none());
        assert!(normal.intersection(&inverted).is_none());
    }

    #[test]
    fn test_sbb() {
        let a = Rectangle::new(0.0, 1.0, 1.0, 0.0);
        let b = Rectangle::new(2.0, 3.0, -1.0, -2.0);
        let union = a.sbb(&b);
        assert_eq!(union, Rectangle::new(0.0, 3.0, 1.0, -2.0));
        assert!(union.contains(&a));
        assert!(union.contains(&b));
    }

    #[test]
    fn test_translation() {
        let mut r = Rectangle::new(0.0, 1.0, 1.0, 0.0);
        r.add(&Vector::new(2.0, -1.0));
        assert_eq!(r, Rectangle::new(2.0, 3.0, 0.0, -1.0));

        r.add_scaled(&Vector::new(2.0, -1.0), -1.0);
        assert_eq!(r, Rectangle::new(0.0, 1.0, 1.0, 0.0));
        assert_eq!(r.width(), 1.0);
        assert_eq!(r.height(), 1.0);
    }

    #[test]
    fn test_center() {
        let r = Rectangle::new(-2.0, 4.0, 3.0, 1.0);
        assert_eq!(r.center(), Vector::new(1.0, 2.0));
    }

    #[test]
    fn test_from_bottom_center() {
        let r = Rectangle::from_bottom_center(Vector::new(1.0, -8.0), 2.0, 3.0);
        assert_eq!(r, Rectangle::new(0.0, 2.0, -5.0, -8.0));
    }

    #[test]
    fn test_is_below() {
        let body = Rectangle::new(-0.5, 0.5, 1.0, 0.0);
        let floor_contact = Rectangle::new(-0.5, 0.5, 0.0, -0.1);
        let ceiling_contact = Rectangle::new(-0.5, 0.5, 1.1, 1.0);
        let wall_contact = Rectangle::new(0.5, 0.6, 1.0, 0.0);

        assert!(body.is_below(&floor_contact));
        assert!(!body.is_below(&ceiling_contact));
        assert!(!body.is_below(&wall_contact));
    }

    #[test]
    fn test_is_below_diagonal_is_not_floor() {
        let body = Rectangle::new(0.0, 1.0, 1.0, 0.0);
        // Equal horizontal and vertical offset
        let corner = Rectangle::new(1.0, 2.0, 0.0, -1.0);
        assert!(!body.is_below(&corner));
    }
}
