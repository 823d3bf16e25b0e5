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
//! Headless Rayle scene
//!
//! Builds the opening level (a long floor with a wall on the left), then
//! plays a scripted run of inputs through the character controller and logs
//! Rayle's state once per simulated second. Rayle's scale follows the
//! horizontal position, so hopping right makes them bigger and slower.
//!
//! Run with `RUST_LOG=rayle_physics=debug` to see per-step diagnostics.

use std::error::Error;

use rayle_physics::body::RigidBody;
use rayle_physics::character::{Character, CharacterController, InputState};
use rayle_physics::math::{Rectangle, Vector};
use rayle_physics::world::PhysicsWorld;
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME_DT: f64 = 1.0 / 60.0;
const FRAMES: u32 = 1200;

fn scripted_input(frame: u32) -> InputState {
    match frame {
        0..=119 => InputState::default(),
        120..=479 => InputState {
            right: true,
            jump: true,
            ..InputState::default()
        },
        480..=599 => InputState::default(),
        600..=959 => InputState {
            left: true,
            jump: true,
            ..InputState::default()
        },
        _ => InputState::default(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut world = PhysicsWorld::new();
    let mut rayle = Character::spawn(&mut world, Vector::new(0.0, -8.0), 0.0)?;
    world.add_rigid_body(RigidBody::new(Rectangle::new(-50.0, 50.0, -9.5, -10.0))?);
    world.add_rigid_body(RigidBody::new(Rectangle::new(-15.0, -14.0, 10.0, -10.0))?);
    let mut controller = CharacterController::new();

    info!(bodies = world.len(), "scene ready");

    for frame in 0..FRAMES {
        let dt = FRAME_DT * rayle.time_scale();
        world.step(dt)?;
        controller.advance(dt);

        let center = world.try_body(rayle.handle())?.rect().center();
        rayle.set_scale(&mut world, 0.3 * center.x)?;
        controller.drive(&mut world, &rayle, scripted_input(frame))?;

        if frame % 60 == 0 {
            let body = world.try_body(rayle.handle())?;
            info!(
                t = controller.clock(),
                scale = rayle.profile().scale,
                grounded = body.grounded(),
                "rayle at {} moving {}",
                rayle.anchor(&world)?,
                body.velocity()
            );
        }
    }

    Ok(())
}
