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
//! End-to-end scenarios driven through the public `World` API

use gravity_engine::scenario::{solar_system, SUN_MASS};
use gravity_engine::speed::SimulationSpeed;
use gravity_engine::store::Velocity;
use gravity_engine::{BodyId, SimulationConfig, World};

/// Two radius-10 bodies just touching at the region center, each closing at `speed`
fn head_on_pair(world: &mut World, speed: f64) -> (BodyId, BodyId) {
    let a = world.create(790.0, 600.0, 10);
    let b = world.create(810.0, 600.0, 10);
    world.get_mut(a).unwrap().set_velocity(Velocity::new(speed, 0.0));
    world.get_mut(b).unwrap().set_velocity(Velocity::new(-speed, 0.0));
    (a, b)
}

#[test]
fn test_head_on_merge() {
    let mut world = World::new();
    world.set_merge_on_collision(true);
    let (a, b) = head_on_pair(&mut world, 1.0);

    let stats = world.step();

    assert_eq!(stats.merges, 1);
    assert_eq!(world.len(), 1);
    assert!(!world.contains(b));

    let merged = world.get(a).unwrap();
    assert!((merged.radius() - 200.0_f64.sqrt()).abs() < 1e-9);
    assert!((merged.mass() - 200.0).abs() < 1e-9);
    assert!(merged.velocity().magnitude() < 1e-12);
    assert!((merged.position().x() - 800.0).abs() < 1e-9);
    assert!(merged.merge_animation().is_active());

    // Impact speed just over 3 gives a burst of 8 + 3 particles
    assert_eq!(stats.ejecta_spawned, 11);
    assert_eq!(world.ejecta().len(), 11);
}

#[test]
fn test_head_on_bounce() {
    let mut world = World::new();
    let (a, b) = head_on_pair(&mut world, 0.5);

    let stats = world.step();

    assert_eq!(stats.merges, 0);
    assert_eq!(stats.contacts, 1);
    assert_eq!(world.len(), 2);

    // Equal masses with restitution 0.8: each rebounds at 0.4
    let va = world.get(a).unwrap().velocity();
    let vb = world.get(b).unwrap().velocity();
    assert!((va.dx() + 0.4).abs() < 1e-3, "a rebounds at {}", va.dx());
    assert!((vb.dx() - 0.4).abs() < 1e-3, "b rebounds at {}", vb.dx());
    assert!(world.ejecta().is_empty());
}

#[test]
fn test_ejecta_fade_out() {
    let mut world = World::new();
    world.set_merge_on_collision(true);
    head_on_pair(&mut world, 1.0);

    world.step();
    assert!(!world.ejecta().is_empty());

    world.advance(70);
    assert!(world.ejecta().is_empty());
}

#[test]
fn test_solar_system_runs() {
    let mut world = World::new();
    let scene = solar_system(&mut world);

    world.advance(100);

    let sun = world.get(scene.sun).unwrap();
    assert_eq!(sun.mass(), SUN_MASS);
    assert_eq!(sun.position().x(), 800.0);
    for body in world.bodies() {
        assert!(body.position().is_valid());
        assert!(body.velocity().is_valid());
    }
}

#[test]
fn test_game_mode_takeover_and_restore() {
    let mut world = World::new();
    let scene = solar_system(&mut world);
    world.advance(10);

    let saved = world.snapshot();
    let saved_positions: Vec<_> = saved.bodies().iter().map(|b| b.position()).collect();

    world.clear_bodies();
    let previous = world
        .set_config(SimulationConfig::default().with_merge_on_collision(true))
        .unwrap();
    assert!(!previous.merge_on_collision);
    head_on_pair(&mut world, 1.0);
    world.advance(5);

    world.restore(saved);

    assert_eq!(world.len(), 7);
    assert!(!world.config().merge_on_collision);
    assert!(world.contains(scene.sun));
    for id in &scene.planets {
        assert!(world.contains(*id));
    }
    let positions: Vec<_> = world.bodies().iter().map(|b| b.position()).collect();
    assert_eq!(positions, saved_positions);
}

#[test]
fn test_speed_controls_substeps() {
    let mut world = World::new();
    world.create(800.0, 600.0, 5);

    let mut speed = SimulationSpeed::default();
    world.advance(speed.substeps());
    assert_eq!(world.tick(), 2);

    speed.faster();
    speed.faster();
    let stats = world.advance(speed.substeps());
    assert_eq!(stats.integrated, 4);
    assert_eq!(world.tick(), 6);
}
