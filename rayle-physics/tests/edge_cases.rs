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
//! Edge case tests
//!
//! Invalid inputs are rejected at the boundary and leave the world untouched.

use rayle_physics::body::{BodyHandle, ConstantForce, RigidBody};
use rayle_physics::config::SimulationConfig;
use rayle_physics::error::PhysicsError;
use rayle_physics::math::{Rectangle, Vector};
use rayle_physics::world::{Intent, PhysicsWorld, StepStats};

fn unit_body() -> RigidBody {
    RigidBody::movable(Rectangle::new(0.0, 1.0, 1.0, 0.0), 1.0).unwrap()
}

#[test]
fn test_empty_world_steps() {
    let mut world = PhysicsWorld::new();
    let stats = world.step(1.0 / 60.0).unwrap();
    assert_eq!(
        stats,
        StepStats {
            sub_steps: 4,
            contacts: 0,
            grounded_bodies: 0
        }
    );
    assert!(world.last_contacts().is_empty());
}

#[test]
fn test_zero_mass_rejected() {
    let rect = Rectangle::new(0.0, 1.0, 1.0, 0.0);
    assert_eq!(
        RigidBody::movable(rect, 0.0),
        Err(PhysicsError::InvalidMass { mass_kg: 0.0 })
    );
    assert!(RigidBody::movable(rect, -1.0).is_err());
}

#[test]
fn test_inverted_rectangle_rejected() {
    let rect = Rectangle::new(0.0, 1.0, -1.0, 0.0);
    assert_eq!(
        RigidBody::new(rect),
        Err(PhysicsError::InvalidRectangle { rect })
    );
}

#[test]
fn test_negative_timestep_leaves_world_untouched() {
    let mut world = PhysicsWorld::new();
    let handle = world.add_rigid_body(unit_body());
    world.submit(handle, Intent::SetVelocityX(1.0)).unwrap();

    assert_eq!(
        world.step(-1.0 / 60.0),
        Err(PhysicsError::InvalidTimestep { dt: -1.0 / 60.0 })
    );
    assert_eq!(world.pending_intents(), 1);
    assert_eq!(world.body(handle).unwrap().velocity(), Vector::zero());
}

#[test]
fn test_nan_velocity_reported_with_handle() {
    let mut world = PhysicsWorld::new();
    world.add_rigid_body(unit_body());
    let bad = world.add_rigid_body(unit_body());
    world
        .body_mut(bad)
        .unwrap()
        .set_velocity(Vector::new(0.0, f64::NEG_INFINITY));

    let err = world.step(0.01).unwrap_err();
    assert_eq!(err, PhysicsError::NonFiniteState { handle: bad });
    assert_eq!(
        err.to_string(),
        "Body(1) has non-finite velocity, acceleration or rectangle"
    );

    // Recoverable once the host repairs the body
    world.body_mut(bad).unwrap().set_velocity(Vector::zero());
    assert!(world.step(0.01).is_ok());
}

#[test]
fn test_non_finite_intent_does_not_poison_world() {
    let mut world = PhysicsWorld::new();
    let handle = world.add_rigid_body(unit_body());
    world.submit(handle, Intent::Impulse(Vector::new(f64::NAN, 0.0))).unwrap();
    world.submit(handle, Intent::SetVelocityY(f64::INFINITY)).unwrap();

    world.step(0.01).unwrap();
    assert!(world.body(handle).unwrap().is_valid());
    assert!(world.step(0.01).is_ok());
}

#[test]
fn test_unknown_handle() {
    let mut world = PhysicsWorld::new();
    world.add_rigid_body(unit_body());
    let stranger = BodyHandle::new(1);
    assert!(world.body(stranger).is_none());
    assert_eq!(
        world.try_body_mut(stranger).err(),
        Some(PhysicsError::UnknownBody { handle: stranger })
    );
}

#[test]
fn test_pre_overlapping_bodies_stay_put() {
    // Resolution never pushes out; a body spawned inside geometry is stuck
    let mut world = PhysicsWorld::new();
    let body = world.add_rigid_body(RigidBody::movable(Rectangle::new(0.0, 1.0, 1.0, -0.5), 1.0).unwrap());
    world.add_rigid_body(RigidBody::new(Rectangle::new(-5.0, 5.0, 0.0, -1.0)).unwrap());
    world.add_force_source(Box::new(ConstantForce::new("wind", Vector::new(50.0, 0.0))));

    for _ in 0..30 {
        world.step(1.0 / 60.0).unwrap();
    }
    let rect = world.body(body).unwrap().rect();
    assert!((rect.left - 0.0).abs() < 1e-9);
    assert!((rect.bottom + 0.5).abs() < 1e-9);
}

#[test]
fn test_large_timestep_still_resolves() {
    let config = SimulationConfig::default().with_sub_steps(16);
    let mut world = PhysicsWorld::with_config(config).unwrap();
    let body = world.add_rigid_body(RigidBody::movable(Rectangle::new(-0.5, 0.5, 1.5, 0.5), 1.0).unwrap());
    world.add_rigid_body(RigidBody::new(Rectangle::new(-10.0, 10.0, 0.0, -1.0)).unwrap());

    world.step(0.5).unwrap();
    let b = world.body(body).unwrap();
    assert!(b.rect().bottom >= 0.0);
    assert!(b.grounded());
}
