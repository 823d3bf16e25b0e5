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
//! Simulation configuration
//!
//! All tunables live in an explicit [`SimulationConfig`] value handed to the
//! world at construction. Nothing in the crate reads process-wide state.

use crate::error::{PhysicsError, Result};
use crate::math::Vector;

/// Standard gravitational acceleration near the Earth's surface (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.81;

/// Default number of integrate+collide passes per frame
pub const DEFAULT_SUB_STEPS: u32 = 4;

/// When the per-body `grounded` flag is cleared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GroundingReset {
    /// Cleared once at the top of every `step`; any floor contact during any
    /// sub-step leaves the body grounded for the frame.
    #[default]
    PerFrame,
    /// Cleared at the top of every sub-step; only contact in the final
    /// sub-step counts.
    PerSubStep,
}

/// Configuration for a [`PhysicsWorld`](crate::world::PhysicsWorld)
///
/// # Examples
///
/// ```
/// use rayle_physics::config::{GroundingReset, SimulationConfig};
///
/// let config = SimulationConfig::default()
///     .with_sub_steps(8)
///     .with_grounding(GroundingReset::PerSubStep);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Acceleration applied to every movable body
    pub gravity_mps2: Vector,
    /// Number of equal sub-steps a frame is divided into
    pub sub_steps: u32,
    /// Grounded flag reset timing
    pub grounding: GroundingReset,
    /// Zero vertical velocity and mark bodies grounded on floor contact
    pub classify_grounding: bool,
    /// Net forces above this magnitude are clamped (Newtons)
    pub max_force_magnitude_n: f64,
    /// Body count at which the broad phase runs in parallel
    pub parallel_threshold: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            gravity_mps2: Vector::new(0.0, -STANDARD_GRAVITY),
            sub_steps: DEFAULT_SUB_STEPS,
            grounding: GroundingReset::PerFrame,
            classify_grounding: true,
            max_force_magnitude_n: 1e10,
            parallel_threshold: 64,
        }
    }
}

impl SimulationConfig {
    /// Set the gravitational acceleration
    pub fn with_gravity(mut self, gravity_mps2: Vector) -> Self {
        self.gravity_mps2 = gravity_mps2;
        self
    }

    /// Set the number of sub-steps per frame
    pub fn with_sub_steps(mut self, sub_steps: u32) -> Self {
        self.sub_steps = sub_steps;
        self
    }

    /// Set when the grounded flag is reset
    pub fn with_grounding(mut self, grounding: GroundingReset) -> Self {
        self.grounding = grounding;
        self
    }

    /// Enable or disable floor-contact classification
    pub fn with_grounding_classification(mut self, enabled: bool) -> Self {
        self.classify_grounding = enabled;
        self
    }

    /// Set the net force clamp
    pub fn with_max_force_magnitude(mut self, max_force_magnitude_n: f64) -> Self {
        self.max_force_magnitude_n = max_force_magnitude_n;
        self
    }

    /// Set the body count at which the broad phase fans out over threads
    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Check the configuration for values the step loop cannot handle
    pub fn validate(&self) -> Result<()> {
        if self.sub_steps == 0 {
            return Err(PhysicsError::InvalidConfig {
                reason: "sub_steps must be at least 1".to_string(),
            });
        }
        if !self.gravity_mps2.is_valid() {
            return Err(PhysicsError::InvalidConfig {
                reason: format!("gravity {} is not finite", self.gravity_mps2),
            });
        }
        if !(self.max_force_magnitude_n > 0.0) {
            return Err(PhysicsError::InvalidConfig {
                reason: format!(
                    "max_force_magnitude_n {} must be positive",
                    self.max_force_magnitude_n
                ),
            });
        }
        Ok(())
    }
}
