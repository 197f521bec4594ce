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
//! World management
//!
//! The World owns the live bodies, the ejecta, and the simulation
//! configuration, and runs the per-tick pipeline:
//!
//! 1. integrate unpinned bodies (velocity Verlet under softened gravity)
//! 2. resolve overlaps: separate, bounce, or mark for merging; then merge
//! 3. optional screen bounce, then mandatory distance culling
//! 4. advance cosmetic rotation and merge animations
//! 5. age and prune ejecta

use std::ops::AddAssign;

use crate::boundary::Boundary;
use crate::collision::{apply_merges, CollisionResolver, PendingMerge};
use crate::config::{ConfigError, SimulationConfig};
use crate::ejecta::EjectaField;
use crate::forces::SoftenedGravity;
use crate::integration::{Integrator, VelocityVerletIntegrator};
use crate::store::{Body, BodyId, Color, Position};

/// Counters describing what a step (or run of steps) did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Bodies advanced by the integrator
    pub integrated: usize,
    /// Overlapping pairs found by the collision pass
    pub contacts: usize,
    /// Bodies absorbed by merges
    pub merges: usize,
    /// Ejecta particles emitted
    pub ejecta_spawned: usize,
    /// Bodies reflected off the region boundary
    pub bounces: usize,
    /// Bodies removed for drifting out of range
    pub culled: usize,
}

impl AddAssign for StepStats {
    fn add_assign(&mut self, other: StepStats) {
        self.integrated += other.integrated;
        self.contacts += other.contacts;
        self.merges += other.merges;
        self.ejecta_spawned += other.ejecta_spawned;
        self.bounces += other.bounces;
        self.culled += other.culled;
    }
}

/// Saved bodies and configuration, for collaborators that temporarily take over the scene
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    bodies: Vec<Body>,
    config: SimulationConfig,
}

impl SceneSnapshot {
    /// Saved bodies in store order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Saved configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    generation: u32,
    index: Option<usize>,
}

/// The simulation: entity store plus stepping pipeline
///
/// Bodies are kept densely in insertion order, which is the order every
/// pass visits them in and the order [`World::bodies`] reports them.
/// Handles resolve through a slot table.
///
/// # Example
///
/// ```
/// use gravity_engine::World;
///
/// let mut world = World::new();
/// let a = world.create(100.0, 100.0, 10);
/// let b = world.create(400.0, 100.0, 10);
/// world.step();
///
/// assert_eq!(world.len(), 2);
/// assert_eq!(world.find_near(100.0, 100.0, 1.0), Some(a));
/// assert!(world.get(b).unwrap().velocity().dx() < 0.0);
/// ```
pub struct World {
    bodies: Vec<Body>,
    slots: Vec<Slot>,
    free_slots: Vec<u32>,
    next_generation: u32,
    created: usize,
    ejecta: EjectaField,
    config: SimulationConfig,
    integrator: VelocityVerletIntegrator,
    pending_merges: Vec<PendingMerge>,
    tick: u64,
}

impl World {
    /// Create an empty world with the default configuration
    pub fn new() -> Self {
        World {
            bodies: Vec::new(),
            slots: Vec::new(),
            free_slots: Vec::new(),
            next_generation: 0,
            created: 0,
            ejecta: EjectaField::new(),
            config: SimulationConfig::default(),
            integrator: VelocityVerletIntegrator::new(),
            pending_merges: Vec::new(),
            tick: 0,
        }
    }

    /// Create an empty world with a custom configuration
    pub fn with_config(config: SimulationConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut world = Self::new();
        world.config = config;
        Ok(world)
    }

    /// Add a body at `(x, y)` with mass `radius²`, at rest
    ///
    /// `radius` must be at least 1. The display color is picked from the
    /// palette by creation order.
    pub fn create(&mut self, x: f64, y: f64, radius: impl Into<f64>) -> BodyId {
        let generation = self.next_generation;
        self.next_generation = self.next_generation.wrapping_add(1);

        let slot = match self.free_slots.pop() {
            Some(slot) => slot,
            None => {
                self.slots.push(Slot {
                    generation,
                    index: None,
                });
                (self.slots.len() - 1) as u32
            }
        };
        self.slots[slot as usize] = Slot {
            generation,
            index: Some(self.bodies.len()),
        };

        let id = BodyId::new(slot, generation);
        let color = Color::for_index(self.created);
        self.created += 1;
        self.bodies
            .push(Body::new(id, Position::new(x, y), radius.into(), color));
        id
    }

    /// Remove a body; returns false if the handle no longer resolves
    pub fn remove(&mut self, id: BodyId) -> bool {
        match self.index_of(id) {
            Some(index) => {
                self.remove_at(&[index]);
                true
            }
            None => false,
        }
    }

    /// First body, in insertion order, whose center is closer to `(x, y)`
    /// than `query_radius` plus its own radius
    ///
    /// First match, not nearest: when candidates overlap the earliest-created
    /// body wins.
    pub fn find_near(&self, x: f64, y: f64, query_radius: f64) -> Option<BodyId> {
        let point = Position::new(x, y);
        self.bodies
            .iter()
            .find(|body| {
                let threshold = query_radius + body.radius();
                body.position().distance_squared_to(point) < threshold * threshold
            })
            .map(Body::id)
    }

    /// Look up a body
    pub fn get(&self, id: BodyId) -> Option<&Body> {
        self.index_of(id).map(|i| &self.bodies[i])
    }

    /// Look up a body for direct mutation (dragging, launching, pinning)
    pub fn get_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        let index = self.index_of(id)?;
        Some(&mut self.bodies[index])
    }

    /// Whether the handle refers to a live body
    pub fn contains(&self, id: BodyId) -> bool {
        self.index_of(id).is_some()
    }

    /// Number of live bodies
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Whether the world has no bodies
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Live bodies in insertion order
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Live bodies in insertion order, mutably
    pub fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    /// Handles of the live bodies in insertion order
    pub fn ids(&self) -> impl Iterator<Item = BodyId> + '_ {
        self.bodies.iter().map(Body::id)
    }

    /// Live ejecta
    pub fn ejecta(&self) -> &EjectaField {
        &self.ejecta
    }

    /// Number of completed steps
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Current configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Install a new configuration, returning the previous one
    pub fn set_config(
        &mut self,
        config: SimulationConfig,
    ) -> Result<SimulationConfig, ConfigError> {
        config.validate()?;
        Ok(std::mem::replace(&mut self.config, config))
    }

    /// Enable or disable merge mode
    pub fn set_merge_on_collision(&mut self, merge: bool) {
        self.config.merge_on_collision = merge;
    }

    /// Flip merge mode; returns the new state
    pub fn toggle_merge_on_collision(&mut self) -> bool {
        self.config.merge_on_collision = !self.config.merge_on_collision;
        self.config.merge_on_collision
    }

    /// Enable or disable friction
    pub fn set_friction_enabled(&mut self, enabled: bool) {
        self.config.friction_enabled = enabled;
    }

    /// Flip friction; returns the new state
    pub fn toggle_friction(&mut self) -> bool {
        self.config.friction_enabled = !self.config.friction_enabled;
        self.config.friction_enabled
    }

    /// Enable or disable screen-edge bouncing
    pub fn set_screen_bounce(&mut self, enabled: bool) {
        self.config.screen_bounce = enabled;
    }

    /// Enable or disable the bouncing collision pass
    pub fn set_particle_collisions(&mut self, enabled: bool) {
        self.config.particle_collisions = enabled;
    }

    /// Sum of all body masses
    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(Body::mass).sum()
    }

    /// Sum of `m·v` over unpinned bodies
    pub fn total_momentum(&self) -> (f64, f64) {
        self.bodies
            .iter()
            .filter(|b| !b.is_pinned())
            .map(Body::momentum)
            .fold((0.0, 0.0), |(px, py), (mx, my)| (px + mx, py + my))
    }

    /// Advance the simulation by one tick
    pub fn step(&mut self) -> StepStats {
        let mut stats = StepStats::default();

        let gravity = SoftenedGravity::from_config(&self.config);
        let friction = self
            .config
            .friction_enabled
            .then_some(self.config.friction_coefficient);
        self.integrator.set_warn_on_invalid(self.config.warn_on_invalid);
        stats.integrated = self.integrator.integrate(&mut self.bodies, &gravity, friction);

        if self.config.particle_collisions || self.config.merge_on_collision {
            let resolver = CollisionResolver::from_config(&self.config);
            self.pending_merges.clear();
            stats.contacts = resolver.resolve(&mut self.bodies, &mut self.pending_merges);

            if !self.pending_merges.is_empty() {
                let applied =
                    apply_merges(&mut self.bodies, &self.pending_merges, &mut self.ejecta);
                stats.merges = applied.absorbed.len();
                stats.ejecta_spawned = applied.ejecta_spawned;
                self.remove_at(&applied.absorbed);
            }
        }

        let boundary = Boundary::from_config(&self.config);
        if self.config.screen_bounce {
            stats.bounces = boundary.bounce_all(&mut self.bodies);
        }
        let culled = boundary.cull_indices(&self.bodies);
        for &index in &culled {
            tracing::debug!(body = %self.bodies[index].id(), "culled out-of-range body");
        }
        stats.culled = culled.len();
        self.remove_at(&culled);

        for body in &mut self.bodies {
            body.advance_cosmetics();
        }
        self.ejecta.update();

        self.tick += 1;
        tracing::trace!(tick = self.tick, ?stats, "step complete");
        stats
    }

    /// Run `substeps` ticks back to back, e.g. one rendered frame's worth
    pub fn advance(&mut self, substeps: usize) -> StepStats {
        let mut total = StepStats::default();
        for _ in 0..substeps {
            total += self.step();
        }
        total
    }

    /// Remove every body and all ejecta
    pub fn clear_bodies(&mut self) {
        let all: Vec<usize> = (0..self.bodies.len()).collect();
        self.remove_at(&all);
        self.ejecta.clear();
    }

    /// Capture the current bodies and configuration
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            bodies: self.bodies.clone(),
            config: self.config.clone(),
        }
    }

    /// Replace the scene with a snapshot
    ///
    /// Current bodies and ejecta are discarded. Handles that were valid when
    /// the snapshot was taken resolve again; handles to bodies created since
    /// do not.
    pub fn restore(&mut self, snapshot: SceneSnapshot) {
        self.clear_bodies();

        for body in &snapshot.bodies {
            let slot = body.id().slot() as usize;
            if slot >= self.slots.len() {
                self.slots.resize(
                    slot + 1,
                    Slot {
                        generation: 0,
                        index: None,
                    },
                );
            }
        }
        self.bodies = snapshot.bodies;
        self.config = snapshot.config;

        for slot in &mut self.slots {
            slot.index = None;
        }
        for (index, body) in self.bodies.iter().enumerate() {
            self.slots[body.id().slot() as usize] = Slot {
                generation: body.id().generation(),
                index: Some(index),
            };
        }
        self.free_slots = (0..self.slots.len() as u32)
            .rev()
            .filter(|&s| self.slots[s as usize].index.is_none())
            .collect();
    }

    fn index_of(&self, id: BodyId) -> Option<usize> {
        let slot = self.slots.get(id.slot() as usize)?;
        if slot.generation == id.generation() {
            slot.index
        } else {
            None
        }
    }

    /// Remove bodies at ascending, unique store indices, keeping the order of the rest
    fn remove_at(&mut self, indices: &[usize]) {
        if indices.is_empty() {
            return;
        }

        let mut removed = Vec::with_capacity(indices.len());
        let mut next = 0;
        let mut position = 0;
        self.bodies.retain(|body| {
            let drop = next < indices.len() && indices[next] == position;
            if drop {
                next += 1;
                removed.push(body.id());
            }
            position += 1;
            !drop
        });

        for id in removed {
            self.slots[id.slot() as usize].index = None;
            self.free_slots.push(id.slot());
        }
        for (index, body) in self.bodies.iter().enumerate() {
            self.slots[body.id().slot() as usize].index = Some(index);
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Velocity;

    #[test]
    fn test_world_body_lifecycle() {
        let mut world = World::new();

        let a = world.create(0.0, 0.0, 5);
        let b = world.create(50.0, 0.0, 3);

        assert_eq!(world.len(), 2);
        assert!(world.contains(a));
        assert_eq!(world.get(b).unwrap().mass(), 9.0);

        assert!(world.remove(a));
        assert_eq!(world.len(), 1);
        assert!(!world.contains(a));
        assert!(world.contains(b));

        // Removing again is a no-op
        assert!(!world.remove(a));
        assert_eq!(world.len(), 1);
    }

    #[test]
    fn test_stale_handle_after_slot_reuse() {
        let mut world = World::new();
        let a = world.create(0.0, 0.0, 2);
        world.remove(a);
        let b = world.create(10.0, 0.0, 2);

        assert_eq!(a.slot(), b.slot());
        assert_ne!(a.generation(), b.generation());
        assert!(world.get(a).is_none());
        assert!(world.get(b).is_some());
    }

    #[test]
    fn test_removal_keeps_insertion_order() {
        let mut world = World::new();
        let ids: Vec<_> = (0..5).map(|i| world.create(i as f64 * 100.0, 0.0, 1)).collect();

        world.remove(ids[1]);
        world.remove(ids[3]);

        let remaining: Vec<_> = world.ids().collect();
        assert_eq!(remaining, vec![ids[0], ids[2], ids[4]]);
        for id in &remaining {
            assert_eq!(world.get(*id).unwrap().id(), *id);
        }
    }

    #[test]
    fn test_palette_by_creation_order() {
        let mut world = World::new();
        let ids: Vec<_> = (0..9).map(|i| world.create(i as f64 * 100.0, 0.0, 1)).collect();
        assert_eq!(world.get(ids[0]).unwrap().color(), Color::for_index(0));
        assert_eq!(world.get(ids[8]).unwrap().color(), Color::for_index(0));
        assert_ne!(world.get(ids[1]).unwrap().color(), Color::for_index(0));
    }

    #[test]
    fn test_find_near_first_match_wins() {
        let mut world = World::new();
        let first = world.create(0.0, 0.0, 10);
        let closer = world.create(2.0, 0.0, 10);

        // Query point sits on the second body, but the first qualifies too
        assert_eq!(world.find_near(2.0, 0.0, 1.0), Some(first));
        assert_eq!(world.find_near(500.0, 500.0, 15.0), None);

        world.remove(first);
        assert_eq!(world.find_near(2.0, 0.0, 1.0), Some(closer));
    }

    #[test]
    fn test_find_near_threshold_is_strict() {
        let mut world = World::new();
        world.create(0.0, 0.0, 5);
        assert_eq!(world.find_near(20.0, 0.0, 15.0), None);
        assert!(world.find_near(19.9, 0.0, 15.0).is_some());
    }

    #[test]
    fn test_with_config_validates() {
        let bad = SimulationConfig::default().with_restitution(-0.1);
        assert!(World::with_config(bad).is_err());

        let world = World::with_config(SimulationConfig::default().with_merge_on_collision(true))
            .unwrap();
        assert!(world.config().merge_on_collision);
    }

    #[test]
    fn test_config_save_and_restore() {
        let mut world = World::new();
        let saved = world
            .set_config(SimulationConfig::default().with_merge_on_collision(true))
            .unwrap();
        assert!(world.config().merge_on_collision);
        assert!(!saved.merge_on_collision);

        world.set_config(saved).unwrap();
        assert!(!world.config().merge_on_collision);

        assert!(world.toggle_friction());
        assert!(!world.toggle_friction());
        assert!(world.toggle_merge_on_collision());
    }

    #[test]
    fn test_invalid_config_rejected_and_kept() {
        let mut world = World::new();
        let result = world.set_config(SimulationConfig::default().with_cull_distance(0.0));
        assert!(result.is_err());
        assert_eq!(world.config(), &SimulationConfig::default());
    }

    #[test]
    fn test_snapshot_restore_round_trip() {
        let mut world = World::new();
        let sun = world.create(800.0, 600.0, 30);
        let planet = world.create(900.0, 600.0, 5);
        world.get_mut(sun).unwrap().set_pinned(true);
        world.get_mut(planet).unwrap().set_velocity(Velocity::new(0.0, 1.0));

        let snapshot = world.snapshot();

        world.clear_bodies();
        world.set_merge_on_collision(true);
        let intruder = world.create(100.0, 100.0, 8);
        assert!(!world.contains(sun));

        world.restore(snapshot);

        assert_eq!(world.len(), 2);
        assert!(!world.contains(intruder));
        assert!(world.get(sun).unwrap().is_pinned());
        assert_eq!(world.get(planet).unwrap().velocity(), Velocity::new(0.0, 1.0));
        assert!(!world.config().merge_on_collision);

        // New bodies never reuse a restored handle
        let fresh = world.create(0.0, 0.0, 1);
        assert_ne!(fresh, sun);
        assert_ne!(fresh, planet);
        assert_eq!(world.len(), 3);
    }

    #[test]
    fn test_step_counts_ticks() {
        let mut world = World::new();
        world.create(800.0, 600.0, 5);
        let stats = world.advance(3);
        assert_eq!(world.tick(), 3);
        assert_eq!(stats.integrated, 3);
    }
}
