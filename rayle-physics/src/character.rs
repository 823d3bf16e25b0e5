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
//! The Rayle player character
//!
//! Rayle's body dimensions, mass and movement parameters scale
//! allometrically with a single exponent `s` in `[-3, 3]`: at `s = 0` Rayle
//! is a one-meter, ten-kilogram creature, and every unit of `s` doubles the
//! height while multiplying the mass tenfold. The current scale is explicit
//! per-character state, never a global.
//!
//! [`CharacterController`] turns held inputs into [`Intent`]s once per
//! frame, gating running and jumping on the grounded flag from the last step.

use crate::body::{BodyHandle, RigidBody};
use crate::error::{PhysicsError, Result};
use crate::math::{Rectangle, Vector};
use crate::world::{Intent, PhysicsWorld};

/// Smallest allowed scale exponent
pub const MIN_SCALE: f64 = -3.0;

/// Largest allowed scale exponent
pub const MAX_SCALE: f64 = 3.0;

/// Minimum simulated time between two flaps (seconds)
pub const FLAP_COOLDOWN_S: f64 = 0.5;

/// Size, mass and movement parameters at one scale exponent
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AllometricProfile {
    /// Scale exponent after clamping
    pub scale: f64,
    /// Body height (m)
    pub height_m: f64,
    /// Body width (m)
    pub width_m: f64,
    /// Body mass (kg)
    pub mass_kg: f64,
    /// Running speed (m/s)
    pub top_speed_mps: f64,
    /// Factor applied to the host frame time for this character
    pub time_scale: f64,
    /// Vertical velocity set by a grounded jump (m/s)
    pub jump_velocity_mps: f64,
    /// Vertical velocity added by a flap (m/s)
    pub flap_velocity_mps: f64,
    /// Characteristic falling speed (m/s)
    pub terminal_velocity_mps: f64,
}

impl AllometricProfile {
    /// Compute the profile for scale exponent `scale`, clamped to
    /// [`MIN_SCALE`, `MAX_SCALE`]
    ///
    /// # Examples
    ///
    /// ```
    /// use rayle_physics::character::AllometricProfile;
    ///
    /// let unit = AllometricProfile::at_scale(0.0).unwrap();
    /// assert_eq!(unit.height_m, 1.0);
    /// assert_eq!(unit.mass_kg, 10.0);
    /// ```
    pub fn at_scale(scale: f64) -> Result<Self> {
        if !scale.is_finite() {
            return Err(PhysicsError::InvalidScale { scale });
        }
        let s = scale.clamp(MIN_SCALE, MAX_SCALE);

        let height_m = 2.0_f64.powf(s);
        let mass_kg = 10.0 * 10.0_f64.powf(s);
        let width_m = 8.0 / 11.0 * 5.0_f64.sqrt().powf(s);
        Ok(AllometricProfile {
            scale: s,
            height_m,
            width_m,
            mass_kg,
            top_speed_mps: 4.0 * 1.1_f64.powf(s),
            time_scale: 2.0_f64.powf(s).sqrt(),
            jump_velocity_mps: 3.0 * 0.8_f64.powf(s),
            flap_velocity_mps: 0.5 * 0.5_f64.powf(s),
            terminal_velocity_mps: (mass_kg / height_m / width_m).sqrt(),
        })
    }
}

/// Rayle's body in a [`PhysicsWorld`]
///
/// The body's rectangle is anchored at its bottom-center point, which stays
/// fixed when the scale changes.
#[derive(Debug, Clone)]
pub struct Character {
    handle: BodyHandle,
    profile: AllometricProfile,
}

impl Character {
    /// Add a movable body for Rayle standing on `anchor`
    pub fn spawn(world: &mut PhysicsWorld, anchor: Vector, scale: f64) -> Result<Self> {
        let profile = AllometricProfile::at_scale(scale)?;
        let rect = Rectangle::from_bottom_center(anchor, profile.width_m, profile.height_m);
        let handle = world.add_rigid_body(RigidBody::movable(rect, profile.mass_kg)?);
        Ok(Character { handle, profile })
    }

    /// Handle of the character's body
    pub fn handle(&self) -> BodyHandle {
        self.handle
    }

    /// Current profile
    pub fn profile(&self) -> &AllometricProfile {
        &self.profile
    }

    /// Factor to multiply the host frame time by before stepping
    pub fn time_scale(&self) -> f64 {
        self.profile.time_scale
    }

    /// Bottom-center point of the body
    pub fn anchor(&self, world: &PhysicsWorld) -> Result<Vector> {
        let rect = world.try_body(self.handle)?.rect();
        Ok(bottom_center(rect))
    }

    /// Whether the body was supported during the last step
    pub fn grounded(&self, world: &PhysicsWorld) -> Result<bool> {
        Ok(world.try_body(self.handle)?.grounded())
    }

    /// Rescale the character about its anchor, updating extent and mass
    pub fn set_scale(&mut self, world: &mut PhysicsWorld, scale: f64) -> Result<()> {
        let profile = AllometricProfile::at_scale(scale)?;
        let body = world.try_body_mut(self.handle)?;
        let anchor = bottom_center(body.rect());
        body.set_rect(Rectangle::from_bottom_center(
            anchor,
            profile.width_m,
            profile.height_m,
        ))?;
        body.set_movable(profile.mass_kg)?;
        self.profile = profile;
        Ok(())
    }

    /// Move the character so that its anchor is at `anchor`
    pub fn set_position(&self, world: &mut PhysicsWorld, anchor: Vector) -> Result<()> {
        let body = world.try_body_mut(self.handle)?;
        body.set_rect(Rectangle::from_bottom_center(
            anchor,
            self.profile.width_m,
            self.profile.height_m,
        ))
    }
}

fn bottom_center(rect: &Rectangle) -> Vector {
    Vector::new((rect.left + rect.right) / 2.0, rect.bottom)
}

/// Inputs held during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputState {
    /// Run left
    pub left: bool,
    /// Run right
    pub right: bool,
    /// Jump when grounded, flap otherwise
    pub jump: bool,
}

/// Converts held inputs into intents for one character
#[derive(Debug, Clone, Default)]
pub struct CharacterController {
    clock_s: f64,
    next_flap_s: f64,
}

impl CharacterController {
    /// Create a controller with its clock at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time seen by the controller
    pub fn clock(&self) -> f64 {
        self.clock_s
    }

    /// Advance the controller clock by the time just simulated
    pub fn advance(&mut self, dt: f64) {
        self.clock_s += dt;
    }

    /// Intents for this frame
    ///
    /// While grounded, horizontal velocity follows the run inputs (left wins
    /// over right) and drops to zero when neither is held; airborne bodies
    /// keep their horizontal velocity. Holding jump flaps at most once per
    /// [`FLAP_COOLDOWN_S`], and a grounded jump sets the vertical velocity,
    /// overriding any flap in the same frame.
    pub fn intents(
        &mut self,
        profile: &AllometricProfile,
        grounded: bool,
        input: InputState,
    ) -> Vec<Intent> {
        let mut intents = Vec::new();
        if grounded {
            let vx = if input.left {
                -profile.top_speed_mps
            } else if input.right {
                profile.top_speed_mps
            } else {
                0.0
            };
            intents.push(Intent::SetVelocityX(vx));
        }
        if input.jump {
            if self.clock_s > self.next_flap_s {
                self.next_flap_s = self.clock_s + FLAP_COOLDOWN_S;
                intents.push(Intent::AddVelocity(Vector::new(
                    0.0,
                    profile.flap_velocity_mps,
                )));
            }
            if grounded {
                intents.push(Intent::SetVelocityY(profile.jump_velocity_mps));
            }
        }
        intents
    }

    /// Compute this frame's intents for `character` and submit them
    pub fn drive(
        &mut self,
        world: &mut PhysicsWorld,
        character: &Character,
        input: InputState,
    ) -> Result<()> {
        let grounded = character.grounded(world)?;
        for intent in self.intents(character.profile(), grounded, input) {
            world.submit(character.handle(), intent)?;
        }
        Ok(())
    }
}
