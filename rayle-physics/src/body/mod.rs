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
//! Rigid bodies and their handles
//!
//! A [`RigidBody`] wraps an axis-aligned [`Rectangle`] with mass, velocity,
//! acceleration and a per-frame `grounded` flag. Bodies start immovable;
//! [`RigidBody::set_movable`] turns them into dynamic bodies. Immovable
//! bodies never accept velocity, forces or impulses.

mod forces;

pub use forces::{ConstantForce, ForceAccumulator, ForceSource, LinearDrag};

use crate::error::{PhysicsError, Result};
use crate::math::{Rectangle, Vector};
use std::fmt;

/// Mass reported by bodies that have never been made movable
pub const IMMOVABLE_MASS_KG: f64 = 1e7;

/// Index of a body inside its world
///
/// Handles are issued in insertion order by
/// [`PhysicsWorld::add_rigid_body`](crate::world::PhysicsWorld::add_rigid_body)
/// and stay valid for the life of the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyHandle(usize);

impl BodyHandle {
    /// Create a handle from a raw slot index
    pub fn new(index: usize) -> Self {
        BodyHandle(index)
    }

    /// Get the raw slot index
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Body({})", self.0)
    }
}

/// Axis-aligned, non-rotating rigid body
///
/// # Examples
///
/// ```
/// use rayle_physics::body::RigidBody;
/// use rayle_physics::math::Rectangle;
///
/// let mut body = RigidBody::new(Rectangle::new(-0.5, 0.5, 1.0, 0.0)).unwrap();
/// assert!(!body.can_move());
///
/// body.set_movable(2.0).unwrap();
/// assert!(body.can_move());
/// assert_eq!(body.mass_kg(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub(crate) rect: Rectangle,
    pub(crate) can_move: bool,
    pub(crate) mass_kg: f64,
    pub(crate) velocity_mps: Vector,
    pub(crate) acceleration_mps2: Vector,
    pub(crate) grounded: bool,
    pub(crate) forces: ForceAccumulator,
}

impl RigidBody {
    /// Create an immovable body occupying `rect`
    pub fn new(rect: Rectangle) -> Result<Self> {
        check_rect(&rect)?;
        Ok(RigidBody {
            rect,
            can_move: false,
            mass_kg: IMMOVABLE_MASS_KG,
            velocity_mps: Vector::zero(),
            acceleration_mps2: Vector::zero(),
            grounded: false,
            forces: ForceAccumulator::default(),
        })
    }

    /// Create a movable body occupying `rect` with the given mass
    pub fn movable(rect: Rectangle, mass_kg: f64) -> Result<Self> {
        let mut body = RigidBody::new(rect)?;
        body.set_movable(mass_kg)?;
        Ok(body)
    }

    /// Make this body dynamic with the given mass
    ///
    /// Calling this on a body that is already movable only updates its mass.
    pub fn set_movable(&mut self, mass_kg: f64) -> Result<()> {
        if !(mass_kg > 0.0 && mass_kg.is_finite()) {
            return Err(PhysicsError::InvalidMass { mass_kg });
        }
        self.can_move = true;
        self.mass_kg = mass_kg;
        Ok(())
    }

    /// The body's current extent
    pub fn rect(&self) -> &Rectangle {
        &self.rect
    }

    /// Replace the body's rectangle
    pub fn set_rect(&mut self, rect: Rectangle) -> Result<()> {
        check_rect(&rect)?;
        self.rect = rect;
        Ok(())
    }

    /// Whether the simulation integrates this body
    pub fn can_move(&self) -> bool {
        self.can_move
    }

    /// Mass in kilograms
    pub fn mass_kg(&self) -> f64 {
        self.mass_kg
    }

    /// Velocity in meters per second
    pub fn velocity(&self) -> Vector {
        self.velocity_mps
    }

    /// Acceleration used by the most recent step (m/s²)
    pub fn acceleration(&self) -> Vector {
        self.acceleration_mps2
    }

    /// Whether the body rested on a surface during the most recent step
    pub fn grounded(&self) -> bool {
        self.grounded
    }

    /// Forces and impulses queued for the next step
    pub fn pending_forces(&self) -> &ForceAccumulator {
        &self.forces
    }

    /// Overwrite the velocity; ignored for immovable bodies
    pub fn set_velocity(&mut self, velocity_mps: Vector) {
        if self.can_move {
            self.velocity_mps = velocity_mps;
        }
    }

    /// Overwrite the horizontal velocity; ignored for immovable bodies
    pub fn set_velocity_x(&mut self, vx: f64) {
        if self.can_move {
            self.velocity_mps.x = vx;
        }
    }

    /// Overwrite the vertical velocity; ignored for immovable bodies
    pub fn set_velocity_y(&mut self, vy: f64) {
        if self.can_move {
            self.velocity_mps.y = vy;
        }
    }

    /// Add to the velocity; ignored for immovable bodies
    pub fn add_velocity(&mut self, delta_mps: Vector) {
        if self.can_move {
            self.velocity_mps.add(&delta_mps);
        }
    }

    /// Queue a force (Newtons) for the next step; ignored for immovable bodies
    pub fn add_force(&mut self, force_n: Vector) {
        if self.can_move {
            self.forces.add_force(force_n);
        }
    }

    /// Queue an impulse (Newton-seconds) for the next step; ignored for
    /// immovable bodies
    pub fn add_impulse(&mut self, impulse_ns: Vector) {
        if self.can_move {
            self.forces.add_impulse(impulse_ns);
        }
    }

    /// Check that velocity, acceleration and rectangle are all finite
    pub fn is_valid(&self) -> bool {
        self.velocity_mps.is_valid() && self.acceleration_mps2.is_valid() && self.rect.is_valid()
    }
}

fn check_rect(rect: &Rectangle) -> Result<()> {
    if rect.is_valid() {
        Ok(())
    } else {
        Err(PhysicsError::InvalidRectangle { rect: *rect })
    }
}
