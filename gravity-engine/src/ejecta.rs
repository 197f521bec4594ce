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
//! Cosmetic merge debris
//!
//! Each merge throws out a short-lived radial fan of particles. Ejecta never
//! attract, collide with, or otherwise influence bodies; they exist only for
//! the presentation layer to draw.

use crate::store::{Position, Velocity};
use std::f64::consts::PI;

/// Most particles a single burst may emit
pub const MAX_BURST: usize = 16;

/// Velocity retained per tick
pub const EJECTA_DRAG: f64 = 0.97;

/// Life lost per tick; a particle lives about 67 ticks
pub const LIFE_DECAY: f64 = 0.015;

/// Number of particles a merge with the given impact speed emits
///
/// `min(16, 8 + floor(speed))`.
pub fn burst_size(impact_speed: f64) -> usize {
    (8 + impact_speed.max(0.0).floor() as usize).min(MAX_BURST)
}

/// A single debris particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ejecta {
    position: Position,
    velocity: Velocity,
    life: f64,
    size: f64,
}

impl Ejecta {
    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Remaining life, from 1.0 at spawn down to 0.0
    pub fn life(&self) -> f64 {
        self.life
    }

    /// Initial size in world units
    pub fn size(&self) -> f64 {
        self.size
    }
}

/// The live ejecta collection
#[derive(Debug, Clone, Default)]
pub struct EjectaField {
    particles: Vec<Ejecta>,
}

impl EjectaField {
    /// Create an empty field
    pub fn new() -> Self {
        EjectaField {
            particles: Vec::new(),
        }
    }

    /// Emit a radial fan of `count` particles (at most [`MAX_BURST`]) from `center`
    ///
    /// Particle `i` leaves at angle `2π·i/count` with `speed` scaled by a
    /// fixed per-index jitter. Returns the number emitted.
    pub fn spawn_burst(&mut self, center: Position, speed: f64, count: usize) -> usize {
        let count = count.min(MAX_BURST);
        self.particles.reserve(count);

        for i in 0..count {
            let angle = 2.0 * PI * i as f64 / count as f64;
            let jittered = speed * (0.5 + 0.8 * ((i * 7 + 3) % 10) as f64 / 10.0);
            self.particles.push(Ejecta {
                position: center,
                velocity: Velocity::new(angle.cos() * jittered, angle.sin() * jittered),
                life: 1.0,
                size: 2.0 + (i % 3) as f64,
            });
        }

        count
    }

    /// Age every particle by one tick and drop the expired ones
    pub fn update(&mut self) {
        self.particles.retain_mut(|e| {
            e.position = Position::new(
                e.position.x() + e.velocity.dx(),
                e.position.y() + e.velocity.dy(),
            );
            e.velocity = Velocity::new(
                e.velocity.dx() * EJECTA_DRAG,
                e.velocity.dy() * EJECTA_DRAG,
            );
            e.life -= LIFE_DECAY;
            e.life > 0.0
        });
    }

    /// Live particles, oldest first
    pub fn particles(&self) -> &[Ejecta] {
        &self.particles
    }

    /// Iterate over live particles
    pub fn iter(&self) -> impl Iterator<Item = &Ejecta> {
        self.particles.iter()
    }

    /// Number of live particles
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether no particles are alive
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Drop every particle
    pub fn clear(&mut self) {
        self.particles.clear();
    }
}
