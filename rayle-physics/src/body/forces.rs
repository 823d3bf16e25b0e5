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
//! Force accumulation and force sources
//!
//! Forces and impulses from any number of contributors (gravity, wind,
//! thrust, host intents) are summed into a body's [`ForceAccumulator`]
//! between steps. At the top of each step the world drains the accumulator
//! with [`ForceAccumulator::take`], converting the totals into acceleration
//! and a velocity change. Draining is the only way totals leave the
//! accumulator, so contributors never overwrite one another and nothing is
//! applied twice.

use crate::body::{BodyHandle, RigidBody};
use crate::error::{PhysicsError, Result};
use crate::math::Vector;
use tracing::warn;

/// Net force and impulse queued on a body for its next step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ForceAccumulator {
    force_n: Vector,
    impulse_ns: Vector,
}

impl ForceAccumulator {
    /// Add a force in Newtons
    ///
    /// Non-finite forces are dropped with a warning.
    pub fn add_force(&mut self, force_n: Vector) {
        if !force_n.is_valid() {
            warn!(force = %force_n, "dropping non-finite force");
            return;
        }
        self.force_n.add(&force_n);
    }

    /// Add an impulse in Newton-seconds
    ///
    /// Non-finite impulses are dropped with a warning.
    pub fn add_impulse(&mut self, impulse_ns: Vector) {
        if !impulse_ns.is_valid() {
            warn!(impulse = %impulse_ns, "dropping non-finite impulse");
            return;
        }
        self.impulse_ns.add(&impulse_ns);
    }

    /// Net force accumulated so far
    pub fn force(&self) -> Vector {
        self.force_n
    }

    /// Net impulse accumulated so far
    pub fn impulse(&self) -> Vector {
        self.impulse_ns
    }

    /// Whether nothing has been accumulated
    pub fn is_empty(&self) -> bool {
        self.force_n == Vector::zero() && self.impulse_ns == Vector::zero()
    }

    /// Move the totals out, leaving the accumulator empty
    pub fn take(&mut self) -> ForceAccumulator {
        std::mem::take(self)
    }

    /// Scale the net force down to `max_magnitude_n` if it exceeds it
    ///
    /// Returns true if clamping occurred.
    pub(crate) fn clamp_force(&mut self, max_magnitude_n: f64) -> bool {
        let magnitude = self.force_n.norm();
        if magnitude <= max_magnitude_n {
            return false;
        }
        self.force_n.scale(max_magnitude_n / magnitude);
        true
    }
}

/// Contributor of forces applied at the top of every step
///
/// Sources are consulted once per frame for every movable body, in
/// registration order.
pub trait ForceSource: Send + Sync {
    /// Compute the force on `body`, or `None` if the source does not apply
    fn force_on(&self, handle: BodyHandle, body: &RigidBody) -> Option<Vector>;

    /// Descriptive name for logging
    fn name(&self) -> &str;
}

/// A constant force such as wind or thrust
///
/// # Examples
///
/// ```
/// use rayle_physics::body::ConstantForce;
/// use rayle_physics::math::Vector;
///
/// let wind = ConstantForce::new("wind", Vector::new(2.0, 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct ConstantForce {
    name: String,
    force_n: Vector,
    targets: Option<Vec<BodyHandle>>,
}

impl ConstantForce {
    /// Apply `force_n` to every movable body
    pub fn new(name: impl Into<String>, force_n: Vector) -> Self {
        ConstantForce {
            name: name.into(),
            force_n,
            targets: None,
        }
    }

    /// Restrict the force to the given bodies
    pub fn only(mut self, targets: Vec<BodyHandle>) -> Self {
        self.targets = Some(targets);
        self
    }
}

impl ForceSource for ConstantForce {
    fn force_on(&self, handle: BodyHandle, _body: &RigidBody) -> Option<Vector> {
        match &self.targets {
            Some(targets) if !targets.contains(&handle) => None,
            _ => Some(self.force_n),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Linear air drag, `F = -k * v`
#[derive(Debug, Clone, Copy)]
pub struct LinearDrag {
    coefficient: f64,
}

impl LinearDrag {
    /// Create a drag source with coefficient `k` (N·s/m)
    ///
    /// # Panics
    ///
    /// Panics if the coefficient is negative or not finite.
    pub fn new(coefficient: f64) -> Self {
        match Self::try_new(coefficient) {
            Ok(drag) => drag,
            Err(_) => panic!("Drag coefficient must be non-negative and finite"),
        }
    }

    /// Create a drag source, rejecting negative or non-finite coefficients
    pub fn try_new(coefficient: f64) -> Result<Self> {
        if coefficient >= 0.0 && coefficient.is_finite() {
            Ok(LinearDrag { coefficient })
        } else {
            Err(PhysicsError::InvalidDragCoefficient { coefficient })
        }
    }
}

impl ForceSource for LinearDrag {
    fn force_on(&self, _handle: BodyHandle, body: &RigidBody) -> Option<Vector> {
        Some(body.velocity().scaled(-self.coefficient))
    }

    fn name(&self) -> &str {
        "linear_drag"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Rectangle;

    #[test]
    fn test_accumulation_sums_contributors() {
        let mut acc = ForceAccumulator::default();
        acc.add_force(Vector::new(1.0, 0.0));
        acc.add_force(Vector::new(0.0, -2.0));
        acc.add_impulse(Vector::new(0.5, 0.5));
        assert_eq!(acc.force(), Vector::new(1.0, -2.0));
        assert_eq!(acc.impulse(), Vector::new(0.5, 0.5));
        assert!(!acc.is_empty());
    }

    #[test]
    fn test_take_clears() {
        let mut acc = ForceAccumulator::default();
        acc.add_force(Vector::new(3.0, 0.0));
        let drained = acc.take();
        assert_eq!(drained.force(), Vector::new(3.0, 0.0));
        assert!(acc.is_empty());
    }

    #[test]
    fn test_non_finite_dropped() {
        let mut acc = ForceAccumulator::default();
        acc.add_force(Vector::new(f64::NAN, 0.0));
        acc.add_impulse(Vector::new(0.0, f64::INFINITY));
        assert!(acc.is_empty());
    }

    #[test]
    fn test_clamp_force() {
        let mut acc = ForceAccumulator::default();
        acc.add_force(Vector::new(300.0, 400.0));
        assert!(acc.clamp_force(50.0));
        assert!((acc.force().norm() - 50.0).abs() < 1e-9);
        assert!(!acc.clamp_force(100.0));
    }

    #[test]
    fn test_constant_force_targets() {
        let body = RigidBody::movable(Rectangle::new(0.0, 1.0, 1.0, 0.0), 1.0).unwrap();
        let wind = ConstantForce::new("wind", Vector::new(1.0, 0.0));
        assert_eq!(wind.force_on(BodyHandle::new(4), &body), Some(Vector::new(1.0, 0.0)));
        assert_eq!(wind.name(), "wind");

        let thrust = ConstantForce::new("thrust", Vector::new(0.0, 5.0)).only(vec![BodyHandle::new(1)]);
        assert_eq!(thrust.force_on(BodyHandle::new(1), &body), Some(Vector::new(0.0, 5.0)));
        assert_eq!(thrust.force_on(BodyHandle::new(2), &body), None);
    }

    #[test]
    fn test_linear_drag_opposes_velocity() {
        let mut body = RigidBody::movable(Rectangle::new(0.0, 1.0, 1.0, 0.0), 1.0).unwrap();
        body.set_velocity(Vector::new(2.0, -4.0));
        let drag = LinearDrag::new(0.5);
        assert_eq!(drag.force_on(BodyHandle::new(0), &body), Some(Vector::new(-1.0, 2.0)));
    }

    #[test]
    fn test_linear_drag_try_new() {
        assert!(LinearDrag::try_new(0.0).is_ok());
        assert_eq!(
            LinearDrag::try_new(-1.0).err(),
            Some(PhysicsError::InvalidDragCoefficient { coefficient: -1.0 })
        );
        assert!(LinearDrag::try_new(f64::NAN).is_err());
        assert!(LinearDrag::try_new(f64::INFINITY).is_err());
    }

    #[test]
    #[should_panic(expected = "Drag coefficient must be non-negative and finite")]
    fn test_negative_drag_panics() {
        LinearDrag::new(-1.0);
    }
}
