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
//! Softened pairwise gravity
//!
//! Every body attracts every other body. The acceleration a body `i`
//! receives from a body `j` is
//!
//! ```text
//! a_i += G * (m_j / m_i) * (p_j - p_i) / (|p_j - p_i|² + ε²)
//! ```
//!
//! Two properties of this law differ from textbook Newtonian gravity and are
//! load-bearing for the sandbox tuning:
//!
//! - The contribution is divided by the receiving body's own mass, so a
//!   light body is pulled harder toward a heavy one than Newton would allow.
//!   Overriding a central body's mass (a "sun" of mass 10000) relies on it.
//! - The displacement is divided by the softened squared distance rather than
//!   its 3/2 power, so at range the pull falls off as 1/r.
//!
//! The softening length ε keeps the pull finite when two centers coincide.
//!
//! ## Parallel Computation
//!
//! With the `parallel` feature the per-body sums are spread over Rayon's
//! thread pool. Each body's sum is still accumulated in store order, so the
//! result is bit-identical to the sequential path.

use crate::config::SimulationConfig;
use crate::store::{Acceleration, Body, Position};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Softened, self-mass-dividing gravity law
///
/// # Example
///
/// ```
/// use gravity_engine::forces::SoftenedGravity;
/// use gravity_engine::store::Position;
///
/// let gravity = SoftenedGravity::new(0.005, 10.0);
/// let acc = gravity.pairwise_acceleration(
///     Position::new(0.0, 0.0), 25.0,
///     Position::new(100.0, 0.0), 10000.0,
/// );
/// assert!(acc.ax() > 0.0);
/// assert_eq!(acc.ay(), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoftenedGravity {
    g_constant: f64,
    softening: f64,
}

impl SoftenedGravity {
    /// Create a gravity law from a constant and a softening length
    ///
    /// # Panics
    ///
    /// Panics if either value is negative or not finite.
    pub fn new(g_constant: f64, softening: f64) -> Self {
        assert!(
            g_constant >= 0.0 && g_constant.is_finite(),
            "Gravitational constant must be non-negative and finite"
        );
        assert!(
            softening >= 0.0 && softening.is_finite(),
            "Softening factor must be non-negative and finite"
        );
        SoftenedGravity {
            g_constant,
            softening,
        }
    }

    /// Gravity law described by a (validated) configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.gravitational_constant, config.softening)
    }

    /// Gravitational constant
    pub fn g_constant(&self) -> f64 {
        self.g_constant
    }

    /// Softening length
    pub fn softening(&self) -> f64 {
        self.softening
    }

    /// Acceleration a target body receives from a single source body
    ///
    /// Returns zero when the softened distance vanishes, which can only
    /// happen with zero softening and coincident centers.
    pub fn pairwise_acceleration(
        &self,
        target: Position,
        target_mass: f64,
        source: Position,
        source_mass: f64,
    ) -> Acceleration {
        let dx = source.x() - target.x();
        let dy = source.y() - target.y();
        let dist_sq = dx * dx + dy * dy + self.softening * self.softening;
        if dist_sq == 0.0 {
            return Acceleration::zero();
        }

        let mass_ratio = source_mass / target_mass;
        Acceleration::new(
            self.g_constant * mass_ratio * dx / dist_sq,
            self.g_constant * mass_ratio * dy / dist_sq,
        )
    }

    /// Total acceleration on `bodies[index]` from every other body
    ///
    /// Pinned bodies act as sources like any other body.
    pub fn acceleration_on(&self, index: usize, bodies: &[Body]) -> Acceleration {
        let target = &bodies[index];
        let mut total = Acceleration::zero();

        for (j, source) in bodies.iter().enumerate() {
            if j == index {
                continue;
            }
            total.add(&self.pairwise_acceleration(
                target.position(),
                target.mass(),
                source.position(),
                source.mass(),
            ));
        }

        total
    }

    /// Compute the acceleration of every body into `out`, index-aligned with `bodies`
    ///
    /// Pinned bodies get a zero entry; nothing reads it.
    pub fn compute_accelerations(&self, bodies: &[Body], out: &mut Vec<Acceleration>) {
        #[cfg(feature = "parallel")]
        {
            bodies
                .par_iter()
                .enumerate()
                .map(|(i, body)| self.acceleration_or_zero(i, body, bodies))
                .collect_into_vec(out);
        }

        #[cfg(not(feature = "parallel"))]
        {
            out.clear();
            out.extend(
                bodies
                    .iter()
                    .enumerate()
                    .map(|(i, body)| self.acceleration_or_zero(i, body, bodies)),
            );
        }
    }

    fn acceleration_or_zero(&self, index: usize, body: &Body, bodies: &[Body]) -> Acceleration {
        if body.is_pinned() {
            Acceleration::zero()
        } else {
            self.acceleration_on(index, bodies)
        }
    }

    /// Speed that keeps an orbiter on a circle of radius `distance` around a
    /// fixed central body, under this force law
    ///
    /// From `v²/r = G·(M/m)·r/(r² + ε²)`. For unit-mass orbiters far outside
    /// the softening length this tends to `sqrt(G·M)`, not `sqrt(G·M/r)`.
    pub fn circular_orbit_speed(&self, central_mass: f64, orbiter_mass: f64, distance: f64) -> f64 {
        let r_sq = distance * distance;
        let softened = r_sq + self.softening * self.softening;
        (self.g_constant * (central_mass / orbiter_mass) * r_sq / softened).sqrt()
    }
}

impl Default for SoftenedGravity {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}
