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
//! Momentum-conserving body fusion
//!
//! When two bodies merge the lower-indexed one survives and takes on:
//!
//! - radius `sqrt(r_i² + r_j²)` and mass `radius²`, so area is conserved
//!   exactly and any earlier mass override is dropped,
//! - the center-of-mass position and velocity, weighted by the pre-merge
//!   masses (linear momentum),
//! - a spin rate carrying the pair's total angular momentum: orbital
//!   `m·(r × u)` of both bodies about the new center of mass plus each
//!   body's own spin `½·m·r²·ω`.

use super::resolver::PendingMerge;
use crate::ejecta::{burst_size, EjectaField};
use crate::store::{Body, Position, Velocity};

/// Result of applying a tick's pending merges
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedMerges {
    /// Store indices of absorbed bodies, ascending; remove these
    pub absorbed: Vec<usize>,
    /// Number of ejecta particles emitted
    pub ejecta_spawned: usize,
}

/// Fold `absorbed` into `survivor`
pub fn fuse(survivor: &mut Body, absorbed: &Body) {
    let m1 = survivor.mass();
    let m2 = absorbed.mass();
    let combined = m1 + m2;

    let (p1, p2) = (survivor.position(), absorbed.position());
    let (v1, v2) = (survivor.velocity(), absorbed.velocity());

    let velocity = Velocity::new(
        (m1 * v1.dx() + m2 * v2.dx()) / combined,
        (m1 * v1.dy() + m2 * v2.dy()) / combined,
    );
    let center = Position::new(
        (m1 * p1.x() + m2 * p2.x()) / combined,
        (m1 * p1.y() + m2 * p2.y()) / combined,
    );

    // Angular momentum about the new center of mass, in its rest frame
    let orbital = |m: f64, p: Position, v: Velocity| {
        let (rx, ry) = (p.x() - center.x(), p.y() - center.y());
        let (ux, uy) = (v.dx() - velocity.dx(), v.dy() - velocity.dy());
        m * (rx * uy - ry * ux)
    };
    let spin = survivor.moment_of_inertia() * survivor.angular_velocity()
        + absorbed.moment_of_inertia() * absorbed.angular_velocity();
    let total_angular_momentum = orbital(m1, p1, v1) + orbital(m2, p2, v2) + spin;

    let r1 = survivor.radius();
    let r2 = absorbed.radius();
    let radius = (r1 * r1 + r2 * r2).sqrt();
    let mass = radius * radius;
    let inertia = 0.5 * mass * radius * radius;
    let angular_velocity = if inertia > 0.0 {
        total_angular_momentum / inertia
    } else {
        survivor.angular_velocity()
    };

    survivor.absorb_state(center, velocity, radius, mass, angular_velocity);
}

/// Apply the merges recorded by a collision pass
///
/// Pairs are processed in detection order. If either body of a pair was
/// already absorbed earlier in this call, the pair is redirected to the body
/// that absorbed it; the lower store index of the two resulting bodies
/// survives, and pairs that resolve to one body are skipped. Every merge
/// emits an ejecta burst at the pair's contact midpoint.
pub fn apply_merges(
    bodies: &mut [Body],
    pending: &[PendingMerge],
    ejecta: &mut EjectaField,
) -> AppliedMerges {
    let mut absorbed_by: Vec<Option<usize>> = vec![None; bodies.len()];
    let mut applied = AppliedMerges::default();

    for merge in pending {
        let a = survivor_of(&absorbed_by, merge.survivor);
        let b = survivor_of(&absorbed_by, merge.absorbed);
        if a == b {
            continue;
        }

        let (keep, gone) = (a.min(b), a.max(b));
        let (head, tail) = bodies.split_at_mut(gone);
        fuse(&mut head[keep], &tail[0]);
        absorbed_by[gone] = Some(keep);
        applied.absorbed.push(gone);

        tracing::debug!(
            survivor = %head[keep].id(),
            absorbed = %tail[0].id(),
            radius = head[keep].radius(),
            "bodies merged"
        );

        applied.ejecta_spawned += ejecta.spawn_burst(
            merge.midpoint,
            merge.impact_speed,
            burst_size(merge.impact_speed),
        );
    }

    applied.absorbed.sort_unstable();
    applied
}

fn survivor_of(absorbed_by: &[Option<usize>], mut index: usize) -> usize {
    while let Some(next) = absorbed_by[index] {
        index = next;
    }
    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::World;

    fn merge(survivor: usize, absorbed: usize) -> PendingMerge {
        PendingMerge {
            survivor,
            absorbed,
            midpoint: Position::zero(),
            impact_speed: 1.0,
        }
    }

    #[test]
    fn test_fuse_conserves_mass_and_momentum() {
        let mut world = World::new();
        let a = world.create(0.0, 0.0, 3.0);
        let b = world.create(4.0, 0.0, 4.0);
        world.get_mut(a).unwrap().set_velocity(Velocity::new(2.0, 1.0));
        world.get_mut(b).unwrap().set_velocity(Velocity::new(-1.0, 0.5));

        let before_a = world.get(a).unwrap().clone();
        let before_b = world.get(b).unwrap().clone();
        let (head, tail) = world.bodies_mut().split_at_mut(1);
        fuse(&mut head[0], &tail[0]);

        let merged = &world.bodies()[0];
        assert_eq!(merged.radius(), 5.0);
        assert_eq!(merged.mass(), 25.0);
        assert_eq!(merged.radius() * merged.radius(), 9.0 + 16.0);

        let (px, py) = merged.momentum();
        let expected_x = before_a.momentum().0 + before_b.momentum().0;
        let expected_y = before_a.momentum().1 + before_b.momentum().1;
        assert!((px - expected_x).abs() < 1e-12);
        assert!((py - expected_y).abs() < 1e-12);

        // Center of mass: (9 * 0 + 16 * 4) / 25
        assert!((merged.position().x() - 64.0 / 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_fuse_conserves_angular_momentum() {
        let mut world = World::new();
        let a = world.create(0.0, 5.0, 5.0);
        let b = world.create(0.0, -5.0, 5.0);
        // Grazing pass: opposite tangential velocities around the midpoint
        world.get_mut(a).unwrap().set_velocity(Velocity::new(1.0, 0.0));
        world.get_mut(b).unwrap().set_velocity(Velocity::new(-1.0, 0.0));
        world.get_mut(a).unwrap().set_angular_velocity(0.1);

        let (head, tail) = world.bodies_mut().split_at_mut(1);
        fuse(&mut head[0], &tail[0]);

        // L = 25*(5*(-1)... ) per body: r × u = rx*uy - ry*ux
        let orbital = 25.0 * (0.0 * 0.0 - 5.0 * 1.0) + 25.0 * (0.0 * 0.0 - (-5.0) * (-1.0));
        let spin = 0.5 * 25.0 * 25.0 * 0.1;
        let radius_sq = 50.0;
        let expected = (orbital + spin) / (0.5 * 50.0 * radius_sq);

        let merged = &world.bodies()[0];
        assert!((merged.angular_velocity() - expected).abs() < 1e-12);
        assert_eq!(merged.velocity(), Velocity::zero());
        assert_eq!(merged.merge_animation().timer(), 1.0);
    }

    #[test]
    fn test_fuse_resets_overridden_mass_to_radius_squared() {
        let mut world = World::new();
        let sun = world.create(0.0, 0.0, 30.0);
        let planet = world.create(30.0, 0.0, 5.0);
        world.get_mut(sun).unwrap().set_mass(10_000.0);
        world.get_mut(planet).unwrap().set_velocity(Velocity::new(0.0, 2.0));

        let (head, tail) = world.bodies_mut().split_at_mut(1);
        fuse(&mut head[0], &tail[0]);

        let merged = &world.bodies()[0];
        assert!((merged.radius() - 925.0_f64.sqrt()).abs() < 1e-12);
        assert!((merged.mass() - 925.0).abs() < 1e-9);
        assert!((merged.mass() - merged.radius() * merged.radius()).abs() < 1e-9);

        // Velocity and center still weighted by the pre-merge masses
        assert!((merged.velocity().dy() - 2.0 * 25.0 / 10_025.0).abs() < 1e-12);
        assert!((merged.position().x() - 30.0 * 25.0 / 10_025.0).abs() < 1e-12);
    }

    #[test]
    fn test_chained_merges_keep_all_mass() {
        let mut world = World::new();
        for i in 0..3 {
            world.create(i as f64, 0.0, 2.0);
        }

        let mut ejecta = EjectaField::new();
        let pending = [merge(0, 1), merge(1, 2)];
        let applied = apply_merges(world.bodies_mut(), &pending, &mut ejecta);

        assert_eq!(applied.absorbed, vec![1, 2]);
        assert!((world.bodies()[0].mass() - 12.0).abs() < 1e-12);
        assert!((world.bodies()[0].radius() - 12.0_f64.sqrt()).abs() < 1e-12);
        assert_eq!(applied.ejecta_spawned, 2 * burst_size(1.0));
        assert_eq!(ejecta.len(), applied.ejecta_spawned);
    }

    #[test]
    fn test_pair_resolving_to_one_body_is_skipped() {
        let mut world = World::new();
        for i in 0..3 {
            world.create(i as f64, 0.0, 1.0);
        }

        let mut ejecta = EjectaField::new();
        let pending = [merge(0, 1), merge(0, 2), merge(1, 2)];
        let applied = apply_merges(world.bodies_mut(), &pending, &mut ejecta);

        assert_eq!(applied.absorbed, vec![1, 2]);
        assert!((world.bodies()[0].mass() - 3.0).abs() < 1e-12);
    }
}
