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
//! Error types for the physics core
//!
//! Invariants are checked where state enters the simulation (attaching a
//! rectangle, making a body movable, configuring the world, stepping). Once a
//! step has started it runs to completion without failing.

use crate::body::BodyHandle;
use crate::math::Rectangle;
use thiserror::Error;

/// Errors reported by the physics core
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Mass must be positive and finite for a movable body
    #[error("Invalid mass {mass_kg} kg: must be positive and finite")]
    InvalidMass {
        /// Rejected mass in kilograms
        mass_kg: f64,
    },

    /// Rectangle edges must be finite with `left <= right` and `bottom <= top`
    #[error("Invalid rectangle {rect}: edges must be finite and not inverted")]
    InvalidRectangle {
        /// Rejected rectangle
        rect: Rectangle,
    },

    /// Frame delta time must be non-negative and finite
    #[error("Invalid timestep {dt}s: must be non-negative and finite")]
    InvalidTimestep {
        /// Rejected delta time in seconds
        dt: f64,
    },

    /// Simulation configuration failed validation
    #[error("Invalid simulation config: {reason}")]
    InvalidConfig {
        /// What was wrong
        reason: String,
    },

    /// The handle does not refer to a body in this world
    #[error("Unknown body {handle}")]
    UnknownBody {
        /// Offending handle
        handle: BodyHandle,
    },

    /// A body holds NaN or infinite state and cannot be simulated
    #[error("{handle} has non-finite velocity, acceleration or rectangle")]
    NonFiniteState {
        /// Offending body
        handle: BodyHandle,
    },

    /// Drag coefficient must be non-negative and finite
    #[error("Invalid drag coefficient {coefficient}: must be non-negative and finite")]
    InvalidDragCoefficient {
        /// Rejected coefficient in N·s/m
        coefficient: f64,
    },

    /// Character scale must be finite
    #[error("Invalid character scale {scale}")]
    InvalidScale {
        /// Rejected scale exponent
        scale: f64,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PhysicsError>;
