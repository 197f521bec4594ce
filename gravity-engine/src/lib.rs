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
//! # Gravity Engine
//!
//! A real-time 2D gravity sandbox engine. Bodies attract each other under a
//! softened pairwise law, are advanced with velocity Verlet at a unit
//! timestep, bounce off or fuse with each other on contact, and are culled
//! once they drift far outside the play region.
//!
//! ## Features
//!
//! - **Entity store**: generational handles over a dense, insertion-ordered arena
//! - **Velocity Verlet**: symplectic integration with optional friction
//! - **Collisions**: positional separation plus restitution impulses, or
//!   momentum-conserving merges that emit ejecta bursts
//! - **Boundaries**: optional screen-edge bounce and mandatory distance culling
//! - **Parallelization**: optional Rayon acceleration pass (`parallel` feature)
//!
//! ## Example
//!
//! ```rust
//! use gravity_engine::World;
//! use gravity_engine::store::Velocity;
//!
//! let mut world = World::new();
//! world.set_merge_on_collision(true);
//!
//! let a = world.create(790.0, 600.0, 10);
//! let b = world.create(810.0, 600.0, 10);
//! world.get_mut(a).unwrap().set_velocity(Velocity::new(0.5, 0.0));
//! world.get_mut(b).unwrap().set_velocity(Velocity::new(-0.5, 0.0));
//!
//! let stats = world.step();
//! assert_eq!(stats.merges, 1);
//! assert_eq!(world.len(), 1);
//! ```

#![warn(missing_docs)]

/// Boundary bounce and culling
pub mod boundary;

/// Collision detection, response and merging
pub mod collision;

/// Simulation configuration and validation
pub mod config;

/// Ejecta particles emitted by merges
pub mod ejecta;

/// Gravitational force law
pub mod forces;

/// Numerical integration methods
pub mod integration;

/// Scene presets
pub mod scenario;

/// Simulation speed and substep control
pub mod speed;

/// Entity store and world stepping
pub mod store;

pub use config::{ConfigError, SimulationConfig};
pub use store::{Body, BodyId, StepStats, World};
