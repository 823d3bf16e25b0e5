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
//! Host intents
//!
//! Input handling does not write into bodies mid-frame. Instead the host
//! submits [`Intent`]s to the world between frames; they are applied in
//! submission order at the top of the next
//! [`step`](crate::world::PhysicsWorld::step), before forces are integrated.

use crate::body::RigidBody;
use crate::math::Vector;
use tracing::warn;

/// A velocity or force change requested by the host
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intent {
    /// Overwrite the horizontal velocity (m/s)
    SetVelocityX(f64),
    /// Overwrite the vertical velocity (m/s)
    SetVelocityY(f64),
    /// Add to the velocity (m/s)
    AddVelocity(Vector),
    /// Queue a force for this step (N)
    Force(Vector),
    /// Queue an impulse for this step (N·s)
    Impulse(Vector),
}

impl Intent {
    /// Check that the payload is finite
    pub fn is_valid(&self) -> bool {
        match self {
            Intent::SetVelocityX(v) | Intent::SetVelocityY(v) => v.is_finite(),
            Intent::AddVelocity(v) | Intent::Force(v) | Intent::Impulse(v) => v.is_valid(),
        }
    }

    /// Apply to `body`; immovable bodies and non-finite payloads are ignored
    pub(crate) fn apply(self, body: &mut RigidBody) {
        if !self.is_valid() {
            warn!(intent = ?self, "dropping non-finite intent");
            return;
        }
        match self {
            Intent::SetVelocityX(vx) => body.set_velocity_x(vx),
            Intent::SetVelocityY(vy) => body.set_velocity_y(vy),
            Intent::AddVelocity(delta) => body.add_velocity(delta),
            Intent::Force(force) => body.add_force(force),
            Intent::Impulse(impulse) => body.add_impulse(impulse),
        }
    }
}
