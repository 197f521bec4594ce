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
//! Velocity Verlet integrator implementation
//!
//! # Algorithm
//!
//! With a unit timestep, each tick runs three phases over the unpinned
//! bodies:
//!
//! ```text
//! x(t + 1) = x(t) + v(t) + 0.5*a(t)
//! a(t + 1) = gravity at the new positions
//! v(t + 1) = v(t) + 0.5*(a(t) + a(t + 1))
//! ```
//!
//! `a(t)` is the acceleration cached on the body by the previous tick, so
//! only one force evaluation is needed per tick. Friction, when enabled,
//! scales the new velocity by `1 - coefficient` afterwards.
//!
//! # References
//!
//! - Swope, W. C., Andersen, H. C., Berens, P. H., & Wilson, K. R. (1982).
//!   The Journal of Chemical Physics, 76(1), 637-649.
//! - Verlet, L. (1967). Physical Review, 159(1), 98-103.

use super::Integrator;
use crate::forces::SoftenedGravity;
use crate::store::{Acceleration, Body, Velocity};

/// Velocity Verlet integrator with a unit timestep
///
/// Keeps its acceleration scratch buffer between ticks to avoid per-tick
/// allocation.
///
/// # Example
///
/// ```
/// use gravity_engine::integration::{Integrator, VelocityVerletIntegrator};
///
/// let integrator = VelocityVerletIntegrator::new();
/// assert_eq!(integrator.name(), "Velocity Verlet");
/// ```
#[derive(Debug, Default)]
pub struct VelocityVerletIntegrator {
    new_accelerations: Vec<Acceleration>,
    warn_on_invalid: bool,
}

impl VelocityVerletIntegrator {
    /// Create a new integrator
    pub fn new() -> Self {
        VelocityVerletIntegrator {
            new_accelerations: Vec::new(),
            warn_on_invalid: true,
        }
    }

    /// Set whether to log a warning for bodies left in a non-finite state
    pub fn set_warn_on_invalid(&mut self, warn: bool) {
        self.warn_on_invalid = warn;
    }
}

impl Integrator for VelocityVerletIntegrator {
    fn name(&self) -> &str {
        "Velocity Verlet"
    }

    fn integrate(
        &mut self,
        bodies: &mut [Body],
        gravity: &SoftenedGravity,
        friction: Option<f64>,
    ) -> usize {
        // Step 1: x(t + 1) = x(t) + v(t) + 0.5*a(t)
        for body in bodies.iter_mut().filter(|b| !b.is_pinned()) {
            let vel = body.velocity();
            let acc = body.acceleration();
            let pos = body.position_mut();
            pos.set_x(pos.x() + vel.dx() + 0.5 * acc.ax());
            pos.set_y(pos.y() + vel.dy() + 0.5 * acc.ay());
        }

        // Step 2: accelerations at the new positions
        gravity.compute_accelerations(bodies, &mut self.new_accelerations);

        // Step 3: v(t + 1) = v(t) + 0.5*(a(t) + a(t + 1))
        let mut updated_count = 0;
        for (body, new_acc) in bodies.iter_mut().zip(self.new_accelerations.iter()) {
            if body.is_pinned() {
                continue;
            }

            let old_acc = body.acceleration();
            let vel = body.velocity();
            let mut new_vel = Velocity::new(
                vel.dx() + 0.5 * (old_acc.ax() + new_acc.ax()),
                vel.dy() + 0.5 * (old_acc.ay() + new_acc.ay()),
            );
            if let Some(coefficient) = friction {
                new_vel = Velocity::new(
                    new_vel.dx() * (1.0 - coefficient),
                    new_vel.dy() * (1.0 - coefficient),
                );
            }

            body.set_velocity(new_vel);
            body.set_acceleration(*new_acc);

            if self.warn_on_invalid && !(body.position().is_valid() && new_vel.is_valid()) {
                tracing::warn!(body = %body.id(), "non-finite state after Verlet update");
            }

            updated_count += 1;
        }

        updated_count
    }
}
