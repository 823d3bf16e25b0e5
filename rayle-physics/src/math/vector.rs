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
//! Two-dimensional vector with in-place arithmetic
//!
//! `Vector` is the value type used for positions, velocities, accelerations,
//! forces and displacements throughout the simulation. Operations that
//! mutate the receiver (`set`, `add`, `sub`, `scale`, `add_scaled`,
//! `normalize`) return nothing; the remaining operations are pure.

use std::fmt;

/// 2D vector with double-precision components
///
/// # Examples
///
/// ```
/// use rayle_physics::math::Vector;
///
/// let mut v = Vector::new(3.0, 4.0);
/// assert_eq!(v.norm(), 5.0);
///
/// v.add_scaled(&Vector::new(1.0, 0.0), 2.0);
/// assert_eq!(v, Vector::new(5.0, 4.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    /// Horizontal component
    pub x: f64,
    /// Vertical component, positive upward
    pub y: f64,
}

impl Vector {
    /// Create a new vector from its components
    pub const fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    /// The zero vector
    pub const fn zero() -> Self {
        Vector::new(0.0, 0.0)
    }

    /// Copy the components of `other` into this vector
    pub fn set(&mut self, other: &Vector) {
        self.x = other.x;
        self.y = other.y;
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.norm2().sqrt()
    }

    /// Squared Euclidean length
    ///
    /// Prefer this over [`Vector::norm`] when only comparing magnitudes.
    pub fn norm2(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    /// Scale this vector to unit length
    ///
    /// A vector whose norm is exactly zero is left untouched.
    pub fn normalize(&mut self) {
        let norm = self.norm();
        if norm == 0.0 {
            return;
        }
        self.x /= norm;
        self.y /= norm;
    }

    /// Add `other` to this vector
    pub fn add(&mut self, other: &Vector) {
        self.x += other.x;
        self.y += other.y;
    }

    /// Subtract `other` from this vector
    pub fn sub(&mut self, other: &Vector) {
        self.x -= other.x;
        self.y -= other.y;
    }

    /// Fused multiply-add: `self += other * scale`
    pub fn add_scaled(&mut self, other: &Vector, scale: f64) {
        self.x += other.x * scale;
        self.y += other.y * scale;
    }

    /// Multiply both components by `scalar`
    pub fn scale(&mut self, scalar: f64) {
        self.x *= scalar;
        self.y *= scalar;
    }

    /// Return a copy of this vector multiplied by `scalar`
    pub fn scaled(&self, scalar: f64) -> Vector {
        Vector::new(self.x * scalar, self.y * scalar)
    }

    /// Dot product
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Scalar 2D cross product `x1*y2 - y1*x2`
    ///
    /// Positive when `other` is counter-clockwise from `self`.
    pub fn cross(&self, other: &Vector) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
