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
//! The physics world
//!
//! [`PhysicsWorld`] owns every body in insertion order and advances them with
//! [`PhysicsWorld::step`]. Each step runs these phases:
//!
//! 1. Queued [`Intent`]s are applied in submission order.
//! 2. `grounded` flags are reset (see [`GroundingReset`]).
//! 3. Force sources and gravity are accumulated on every movable body, then
//!    the accumulators are drained: `v += J/m`, `a = F/m`.
//! 4. The frame is split into `sub_steps` equal sub-steps. Each sub-step
//!    integrates with semi-implicit Euler (`v += a·dt`, then `x += v·dt`),
//!    runs the broad phase, and steps every colliding body back by exactly
//!    `-v·dt`. A body whose collision region lies beneath it has its vertical
//!    velocity zeroed and is marked grounded.
//!
//! Stepping back cancels the whole sub-step displacement rather than pushing
//! out by the penetration depth, so bodies stop at the last non-penetrating
//! position instead of sliding along surfaces. Bodies that travel further
//! than their own size in one sub-step can tunnel through thin obstacles.
//!
//! Body iteration order is insertion order and determines the order in which
//! colliding bodies are resolved.

mod collision;
mod intent;

pub use intent::Intent;

use crate::body::{BodyHandle, ForceSource, RigidBody};
use crate::config::{GroundingReset, SimulationConfig};
use crate::error::{PhysicsError, Result};
use crate::math::{Rectangle, Vector};
use tracing::{debug, trace, warn};

/// Summary of one [`PhysicsWorld::step`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StepStats {
    /// Sub-steps executed (0 for a zero-length step)
    pub sub_steps: u32,
    /// Collision resolutions summed over all sub-steps
    pub contacts: usize,
    /// Bodies grounded when the step finished
    pub grounded_bodies: usize,
}

/// Container and stepper for rigid bodies
///
/// # Examples
///
/// ```
/// use rayle_physics::body::RigidBody;
/// use rayle_physics::math::Rectangle;
/// use rayle_physics::world::PhysicsWorld;
///
/// let mut world = PhysicsWorld::new();
/// let player = world.add_rigid_body(
///     RigidBody::movable(Rectangle::new(-0.5, 0.5, 1.0, 0.0), 1.0).unwrap(),
/// );
/// world.add_rigid_body(RigidBody::new(Rectangle::new(-10.0, 10.0, 0.0, -1.0)).unwrap());
///
/// world.step(1.0 / 60.0).unwrap();
/// assert!(world.body(player).unwrap().grounded());
/// ```
pub struct PhysicsWorld {
    bodies: Vec<RigidBody>,
    config: SimulationConfig,
    sources: Vec<Box<dyn ForceSource>>,
    intents: Vec<(BodyHandle, Intent)>,
    regions: Vec<Option<Rectangle>>,
}

impl PhysicsWorld {
    /// Create an empty world with the default configuration
    pub fn new() -> Self {
        PhysicsWorld {
            bodies: Vec::new(),
            config: SimulationConfig::default(),
            sources: Vec::new(),
            intents: Vec::new(),
            regions: Vec::new(),
        }
    }

    /// Create an empty world with a validated configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(PhysicsWorld {
            config,
            ..PhysicsWorld::new()
        })
    }

    /// The active configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Register a body; it is simulated from the next step on
    pub fn add_rigid_body(&mut self, body: RigidBody) -> BodyHandle {
        let handle = BodyHandle::new(self.bodies.len());
        debug!(%handle, movable = body.can_move(), rect = %body.rect(), "added rigid body");
        self.bodies.push(body);
        handle
    }

    /// Register a force source consulted at the top of every step
    pub fn add_force_source(&mut self, source: Box<dyn ForceSource>) {
        debug!(source = source.name(), "registered force source");
        self.sources.push(source);
    }

    /// Number of registered force sources
    pub fn force_source_count(&self) -> usize {
        self.sources.len()
    }

    /// Look up a body
    pub fn body(&self, handle: BodyHandle) -> Option<&RigidBody> {
        self.bodies.get(handle.index())
    }

    /// Look up a body mutably
    pub fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut RigidBody> {
        self.bodies.get_mut(handle.index())
    }

    /// Look up a body, failing for unknown handles
    pub fn try_body(&self, handle: BodyHandle) -> Result<&RigidBody> {
        self.body(handle)
            .ok_or(PhysicsError::UnknownBody { handle })
    }

    /// Look up a body mutably, failing for unknown handles
    pub fn try_body_mut(&mut self, handle: BodyHandle) -> Result<&mut RigidBody> {
        self.body_mut(handle)
            .ok_or(PhysicsError::UnknownBody { handle })
    }

    /// All bodies in insertion order
    pub fn bodies(&self) -> &[RigidBody] {
        &self.bodies
    }

    /// Handles of all bodies in insertion order
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> {
        (0..self.bodies.len()).map(BodyHandle::new)
    }

    /// Number of bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Queue an intent for `handle`, applied at the top of the next step
    pub fn submit(&mut self, handle: BodyHandle, intent: Intent) -> Result<()> {
        self.try_body(handle)?;
        self.intents.push((handle, intent));
        Ok(())
    }

    /// Number of intents waiting for the next step
    pub fn pending_intents(&self) -> usize {
        self.intents.len()
    }

    /// Collision regions from the last sub-step, indexed by body slot
    pub fn last_contacts(&self) -> &[Option<Rectangle>] {
        &self.regions
    }

    /// Advance the world by `dt` seconds
    ///
    /// A zero `dt` returns immediately and leaves all state, including
    /// queued intents and forces, untouched. Negative or non-finite `dt` is
    /// rejected, as is a world containing a body with non-finite state; in
    /// both cases nothing is mutated. Forces and impulses that would push a
    /// body's state past the finite range are discarded with a warning, and
    /// the body falls under gravity alone for that frame.
    pub fn step(&mut self, dt: f64) -> Result<StepStats> {
        if !(dt >= 0.0 && dt.is_finite()) {
            return Err(PhysicsError::InvalidTimestep { dt });
        }
        if dt == 0.0 {
            return Ok(StepStats::default());
        }
        if let Some(index) = self.bodies.iter().position(|body| !body.is_valid()) {
            return Err(PhysicsError::NonFiniteState {
                handle: BodyHandle::new(index),
            });
        }

        self.apply_intents();
        self.begin_frame(dt);

        let sub_steps = self.config.sub_steps;
        let sub_dt = dt / f64::from(sub_steps);
        let mut stats = StepStats {
            sub_steps,
            ..StepStats::default()
        };
        for _ in 0..sub_steps {
            stats.contacts += self.sub_step(sub_dt);
        }
        stats.grounded_bodies = self.bodies.iter().filter(|body| body.grounded).count();

        debug!(
            dt,
            bodies = self.bodies.len(),
            contacts = stats.contacts,
            grounded = stats.grounded_bodies,
            "physics step"
        );
        Ok(stats)
    }

    fn apply_intents(&mut self) {
        for (handle, intent) in self.intents.drain(..) {
            // Handles were checked on submit and bodies are never removed
            if let Some(body) = self.bodies.get_mut(handle.index()) {
                intent.apply(body);
            }
        }
    }

    fn begin_frame(&mut self, dt: f64) {
        let reset_grounded = self.config.grounding == GroundingReset::PerFrame;
        for (index, body) in self.bodies.iter_mut().enumerate() {
            if reset_grounded {
                body.grounded = false;
            }
            if !body.can_move {
                continue;
            }

            let handle = BodyHandle::new(index);
            for source in &self.sources {
                let Some(force) = source.force_on(handle, body) else {
                    continue;
                };
                if !force.is_valid() {
                    warn!(source = source.name(), %handle, "force source produced non-finite force");
                    continue;
                }
                body.forces.add_force(force);
            }

            if body.forces.clamp_force(self.config.max_force_magnitude_n) {
                warn!(
                    %handle,
                    limit = self.config.max_force_magnitude_n,
                    "net force exceeds limit, clamping"
                );
            }

            // Gravity is an acceleration so it never meets the force limit
            let gravity = self.config.gravity_mps2;
            let net = body.forces.take();
            let inverse_mass = 1.0 / body.mass_kg;
            let mut velocity = body.velocity_mps;
            velocity.add_scaled(&net.impulse(), inverse_mass);
            let mut acceleration = net.force().scaled(inverse_mass);
            acceleration.add(&gravity);

            if frame_stays_finite(&body.rect, &velocity, &acceleration, dt) {
                body.velocity_mps = velocity;
                body.acceleration_mps2 = acceleration;
            } else {
                warn!(%handle, "forces and impulses would make body state non-finite, discarding them");
                body.acceleration_mps2 = gravity;
            }
        }
    }

    /// Integrate, detect and resolve once; returns the number of resolutions
    fn sub_step(&mut self, dt: f64) -> usize {
        let reset_grounded = self.config.grounding == GroundingReset::PerSubStep;
        for body in self.bodies.iter_mut() {
            if reset_grounded {
                body.grounded = false;
            }
            if !body.can_move {
                continue;
            }
            body.velocity_mps.add_scaled(&body.acceleration_mps2, dt);
            body.rect.add_scaled(&body.velocity_mps, dt);
        }

        collision::detect_collisions(
            &self.bodies,
            &mut self.regions,
            self.config.parallel_threshold,
        );

        let mut contacts = 0;
        for (index, (body, region)) in self.bodies.iter_mut().zip(&self.regions).enumerate() {
            let Some(region) = region else {
                continue;
            };
            contacts += 1;
            body.rect.add_scaled(&body.velocity_mps, -dt);

            let supported = self.config.classify_grounding && body.rect.is_below(region);
            if supported {
                body.velocity_mps.y = 0.0;
                body.grounded = true;
            }
            trace!(handle = index, region = %region, supported, "resolved collision");
        }
        contacts
    }
}

/// Whether a frame of length `dt` starting from this state keeps every
/// velocity and edge finite
///
/// Sub-step velocities lie between `velocity` and its end-of-frame value, so
/// checking the rectangle displaced by both bounds the whole frame.
fn frame_stays_finite(rect: &Rectangle, velocity: &Vector, acceleration: &Vector, dt: f64) -> bool {
    let mut end_velocity = *velocity;
    end_velocity.add_scaled(acceleration, dt);
    let mut start_bound = *rect;
    start_bound.add_scaled(velocity, dt);
    let mut end_bound = *rect;
    end_bound.add_scaled(&end_velocity, dt);
    velocity.is_valid()
        && acceleration.is_valid()
        && end_velocity.is_valid()
        && start_bound.is_valid()
        && end_bound.is_valid()
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}
