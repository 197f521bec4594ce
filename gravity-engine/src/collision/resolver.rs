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
//! Pairwise contact resolution
//!
//! A single pass visits every unordered pair `(i, j)`, `i < j`, in store
//! order. Overlapping pairs are pushed apart immediately and either bounce
//! (impulse with restitution) or, in merge mode, are recorded as a
//! [`PendingMerge`]. Merges are applied only after the whole pass, so a body
//! already marked for absorption keeps taking part in later pairs of the
//! same tick.

use crate::config::SimulationConfig;
use crate::store::{Body, Position, Velocity};

/// Floor applied to center distance before normalizing the contact normal
pub const MIN_CONTACT_DISTANCE: f64 = 0.001;

/// A merge detected during the pairwise pass, applied after it completes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingMerge {
    /// Store index of the lower-indexed body
    pub survivor: usize,
    /// Store index of the higher-indexed body
    pub absorbed: usize,
    /// Midpoint of the two centers after separation
    pub midpoint: Position,
    /// Relative speed at contact plus one, sizes the ejecta burst
    pub impact_speed: f64,
}

/// What happened to a pair of bodies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Circles do not overlap
    None,
    /// Both bodies are pinned; nothing can move
    Blocked,
    /// Bodies were separated and exchanged an impulse
    Bounced,
    /// Bodies were separated and should fuse
    Merge,
}

/// Overlap detection, separation and impulse response
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    restitution: f64,
    merge: bool,
}

impl CollisionResolver {
    /// Create a resolver with a coefficient of restitution and merge policy
    pub fn new(restitution: f64, merge: bool) -> Self {
        CollisionResolver { restitution, merge }
    }

    /// Resolver matching a configuration
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(config.restitution, config.merge_on_collision)
    }

    /// Coefficient of restitution
    pub fn restitution(&self) -> f64 {
        self.restitution
    }

    /// Whether overlapping unpinned bodies are marked for merging
    pub fn merges(&self) -> bool {
        self.merge
    }

    /// Run the pairwise pass over `bodies`
    ///
    /// Merges found are appended to `pending` in detection order. Returns the
    /// number of overlapping pairs.
    pub fn resolve(&self, bodies: &mut [Body], pending: &mut Vec<PendingMerge>) -> usize {
        let mut contacts = 0;

        for i in 0..bodies.len() {
            let (head, tail) = bodies.split_at_mut(i + 1);
            let first = &mut head[i];
            for (offset, second) in tail.iter_mut().enumerate() {
                match self.resolve_pair(first, second) {
                    Contact::None => {}
                    Contact::Blocked | Contact::Bounced => contacts += 1,
                    Contact::Merge => {
                        contacts += 1;
                        pending.push(PendingMerge {
                            survivor: i,
                            absorbed: i + 1 + offset,
                            midpoint: midpoint(first.position(), second.position()),
                            impact_speed: relative_speed(first.velocity(), second.velocity()) + 1.0,
                        });
                    }
                }
            }
        }

        contacts
    }

    /// Resolve a single pair, `a` being the lower-indexed body
    pub fn resolve_pair(&self, a: &mut Body, b: &mut Body) -> Contact {
        let dx = b.position().x() - a.position().x();
        let dy = b.position().y() - a.position().y();
        let mut distance = (dx * dx + dy * dy).sqrt();
        let min_distance = a.radius() + b.radius();

        if distance >= min_distance {
            return Contact::None;
        }
        if a.is_pinned() && b.is_pinned() {
            return Contact::Blocked;
        }
        if distance < MIN_CONTACT_DISTANCE {
            distance = MIN_CONTACT_DISTANCE;
        }

        let nx = dx / distance;
        let ny = dy / distance;
        let overlap = min_distance - distance;
        let total_mass = a.mass() + b.mass();

        if a.is_pinned() {
            shift(b, nx * overlap, ny * overlap);
        } else if b.is_pinned() {
            shift(a, -nx * overlap, -ny * overlap);
        } else {
            let a_share = overlap * (b.mass() / total_mass);
            let b_share = overlap * (a.mass() / total_mass);
            shift(a, -nx * a_share, -ny * a_share);
            shift(b, nx * b_share, ny * b_share);
        }

        if self.merge && !a.is_pinned() && !b.is_pinned() {
            return Contact::Merge;
        }

        let a_proj = a.velocity().dot(nx, ny);
        let b_proj = b.velocity().dot(nx, ny);
        let bounce = 1.0 + self.restitution;

        if a.is_pinned() {
            kick(b, -bounce * (b_proj - a_proj), nx, ny);
        } else if b.is_pinned() {
            kick(a, -bounce * (a_proj - b_proj), nx, ny);
        } else {
            let impulse = bounce * (a_proj - b_proj) / total_mass;
            kick(a, -impulse * b.mass(), nx, ny);
            kick(b, impulse * a.mass(), nx, ny);
        }

        Contact::Bounced
    }
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::from_config(&SimulationConfig::default())
    }
}

fn shift(body: &mut Body, dx: f64, dy: f64) {
    let pos = body.position_mut();
    pos.set_x(pos.x() + dx);
    pos.set_y(pos.y() + dy);
}

fn kick(body: &mut Body, amount: f64, nx: f64, ny: f64) {
    let vel = body.velocity_mut();
    vel.set_dx(vel.dx() + amount * nx);
    vel.set_dy(vel.dy() + amount * ny);
}

fn midpoint(a: Position, b: Position) -> Position {
    Position::new((a.x() + b.x()) / 2.0, (a.y() + b.y()) / 2.0)
}

fn relative_speed(a: Velocity, b: Velocity) -> f64 {
    Velocity::new(a.dx() - b.dx(), a.dy() - b.dy()).magnitude()
}
