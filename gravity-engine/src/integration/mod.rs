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
//! Numerical integration of body motion
//!
//! The engine advances with a unit timestep: one call to
//! [`Integrator::integrate`] is one simulation tick.
//!
//! # Integrators
//!
//! - **Velocity Verlet**: symmetric two-phase scheme with good long-run
//!   energy behavior for orbits. The only scheme the stepping pipeline uses.

use crate::forces::SoftenedGravity;
use crate::store::Body;

mod verlet;

pub use verlet::VelocityVerletIntegrator;

/// Kinetic energy of a single body, `½·m·v²`
///
/// Pinned bodies contribute nothing.
pub fn kinetic_energy(body: &Body) -> f64 {
    if body.is_pinned() {
        return 0.0;
    }
    let speed = body.velocity().magnitude();
    0.5 * body.mass() * speed * speed
}

/// Total kinetic energy of a set of bodies
pub fn total_kinetic_energy<'a, I>(bodies: I) -> f64
where
    I: IntoIterator<Item = &'a Body>,
{
    bodies.into_iter().map(kinetic_energy).sum()
}

/// Trait for per-tick integration schemes
///
/// Integrators update the position, velocity and cached acceleration of
/// every unpinned body. Pinned bodies must be left bit-for-bit unchanged.
pub trait Integrator: Send + Sync {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Advance all unpinned bodies by one tick
    ///
    /// `friction`, when present, is the per-tick velocity loss applied after
    /// the velocity update. Returns the number of bodies updated.
    fn integrate(
        &mut self,
        bodies: &mut [Body],
        gravity: &SoftenedGravity,
        friction: Option<f64>,
    ) -> usize;
}
