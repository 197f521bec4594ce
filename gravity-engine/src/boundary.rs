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
//! Region boundary and distance culling
//!
//! Two policies act on unpinned bodies after collisions are resolved:
//!
//! - **Screen bounce** (optional): a body whose leading edge is past an edge
//!   of the rectangular region while still moving outward has that velocity
//!   component reversed and scaled by the bounce efficiency.
//! - **Culling** (always on): a body farther than the cull distance from
//!   the region center is removed. Slingshot ejections would otherwise keep
//!   the body alive forever.

use crate::config::SimulationConfig;
use crate::store::{Body, Position};

/// Rectangular region `[0, width] × [0, height]` with a culling radius around its center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    width: f64,
    height: f64,
    bounce_efficiency: f64,
    cull_distance: f64,
}

impl Boundary {
    /// Create a boundary
    pub fn new(width: f64, height: f64, bounce_efficiency: f64, cull_distance: f64) -> Self {
        Boundary {
            width,
            height,
            bounce_efficiency,
            cull_distance,
        }
    }

    /// Boundary matching a configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.width,
            config.height,
            config.bounce_efficiency,
            config.cull_distance,
        )
    }

    /// Culling reference point
    pub fn center(&self) -> Position {
        Position::new(self.width / 2.0, self.height / 2.0)
    }

    /// Reflect a single body off the region edges
    ///
    /// Returns true if either velocity component was reflected.
    pub fn bounce(&self, body: &mut Body) -> bool {
        if body.is_pinned() {
            return false;
        }

        let r = body.radius();
        let pos = body.position();
        let mut vel = body.velocity();
        let mut bounced = false;

        if (pos.x() - r < 0.0 && vel.dx() < 0.0) || (pos.x() + r > self.width && vel.dx() > 0.0) {
            vel.set_dx(-vel.dx() * self.bounce_efficiency);
            bounced = true;
        }
        if (pos.y() - r < 0.0 && vel.dy() < 0.0) || (pos.y() + r > self.height && vel.dy() > 0.0) {
            vel.set_dy(-vel.dy() * self.bounce_efficiency);
            bounced = true;
        }

        if bounced {
            body.set_velocity(vel);
        }
        bounced
    }

    /// Reflect every body; returns how many bounced
    pub fn bounce_all(&self, bodies: &mut [Body]) -> usize {
        bodies.iter_mut().map(|b| self.bounce(b)).filter(|&bounced| bounced).count()
    }

    /// Whether a body has drifted past the cull distance
    pub fn is_out_of_range(&self, body: &Body) -> bool {
        !body.is_pinned()
            && body.position().distance_squared_to(self.center())
                > self.cull_distance * self.cull_distance
    }

    /// Store indices of bodies to cull, ascending
    pub fn cull_indices(&self, bodies: &[Body]) -> Vec<usize> {
        bodies
            .iter()
            .enumerate()
            .filter(|(_, b)| self.is_out_of_range(b))
            .map(|(i, _)| i)
            .collect()
    }
}

impl Default for Boundary {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}
