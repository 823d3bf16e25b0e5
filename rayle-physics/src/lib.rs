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
//! # Rayle Physics
//!
//! Sub-stepped 2D rigid-body physics with axis-aligned bounding box
//! collision resolution, built for the Rayle platformer.
//!
//! ## Features
//!
//! - **Axis-aligned bodies**: non-rotating rectangles with mass and velocity
//! - **Force Accumulation**: gravity, force sources and host impulses compose
//!   without overwriting one another
//! - **Sub-stepping**: each frame is integrated in equal semi-implicit Euler
//!   sub-steps
//! - **Step-back resolution**: colliding bodies undo their last sub-step, and
//!   floor contacts mark bodies grounded
//! - **Parallelization**: optional Rayon broad phase for larger scenes
//!
//! ## Example
//!
//! ```rust
//! use rayle_physics::body::RigidBody;
//! use rayle_physics::math::Rectangle;
//! use rayle_physics::world::{Intent, PhysicsWorld};
//!
//! let mut world = PhysicsWorld::new();
//! let player = world.add_rigid_body(
//!     RigidBody::movable(Rectangle::new(-0.5, 0.5, 1.0, 0.0), 1.0).unwrap(),
//! );
//! world.add_rigid_body(RigidBody::new(Rectangle::new(-10.0, 10.0, 0.0, -1.0)).unwrap());
//!
//! world.step(1.0 / 60.0).unwrap();
//! if world.body(player).unwrap().grounded() {
//!     world.submit(player, Intent::SetVelocityY(3.0)).unwrap();
//! }
//! ```
//!
//! A headless run of the opening Rayle scene lives in `demos/` and is
//! registered as the `rayle_headless` cargo example:
//! `cargo run --example rayle_headless`.

#![warn(missing_docs)]

/// Vectors and rectangles
pub mod math;

/// Rigid bodies and force accumulation
pub mod body;

/// The physics world and its step loop
pub mod world;

/// Simulation configuration
pub mod config;

/// Error types
pub mod error;

/// The Rayle player character
pub mod character;

pub use body::{BodyHandle, RigidBody};
pub use config::SimulationConfig;
pub use error::{PhysicsError, Result};
pub use math::{Rectangle, Vector};
pub use world::{Intent, PhysicsWorld, StepStats};
