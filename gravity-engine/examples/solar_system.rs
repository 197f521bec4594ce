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
//! Solar System Sandbox Example
//!
//! Builds the solar-system preset, runs it for a while at a chosen speed,
//! then drops a stray rock through the inner system in merge mode and
//! reports what happened.
//!
//! # Running
//!
//! ```bash
//! # Default: 600 frames at normal speed
//! cargo run --example solar_system --release
//!
//! # Fast-forward and show per-merge logs
//! RUST_LOG=gravity_engine=debug \
//!     cargo run --example solar_system --release -- --frames 300 --faster 3
//! ```

use gravity_engine::integration::total_kinetic_energy;
use gravity_engine::scenario::solar_system;
use gravity_engine::speed::SimulationSpeed;
use gravity_engine::store::Velocity;
use gravity_engine::World;

struct Options {
    frames: usize,
    faster: usize,
}

fn parse_args() -> Options {
    let mut options = Options {
        frames: 600,
        faster: 0,
    };
    let args: Vec<String> = std::env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--frames" if i + 1 < args.len() => {
                options.frames = args[i + 1].parse().unwrap_or(options.frames);
                i += 1;
            }
            "--faster" if i + 1 < args.len() => {
                options.faster = args[i + 1].parse().unwrap_or(0);
                i += 1;
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }
    options
}

fn report(world: &World, label: &str) {
    let (px, py) = world.total_momentum();
    print!(
        "{:<10} tick {:>6}  bodies {:>2}  ejecta {:>3}  ",
        label,
        world.tick(),
        world.len(),
        world.ejecta().len(),
    );
    println!(
        "mass {:>9.1}  momentum ({:>8.3}, {:>8.3})  KE {:>10.3}",
        world.total_mass(),
        px,
        py,
        total_kinetic_energy(world.bodies()),
    );
}

fn main() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let options = parse_args();
    let mut speed = SimulationSpeed::default();
    for _ in 0..options.faster {
        speed.faster();
    }
    println!(
        "Speed x{:.2}: {} step(s) per frame, {} frames",
        speed.value(),
        speed.substeps(),
        options.frames
    );

    let mut world = World::new();
    let scene = solar_system(&mut world);
    report(&world, "start");

    let mut totals = gravity_engine::StepStats::default();
    for frame in 0..options.frames {
        totals += world.advance(speed.substeps());
        if frame % 100 == 99 {
            report(&world, "orbiting");
        }
    }

    world.set_merge_on_collision(true);
    let (cx, cy) = world.config().center();
    let rock = world.create(cx - 400.0, cy - 60.0, 8);
    if let Some(body) = world.get_mut(rock) {
        body.set_velocity(Velocity::new(3.0, 0.0));
    }
    report(&world, "rock in");

    for _ in 0..options.frames {
        totals += world.advance(speed.substeps());
    }
    report(&world, "end");

    println!();
    println!("Sun still present: {}", world.contains(scene.sun));
    println!(
        "Planets remaining: {}/{}",
        scene.planets.iter().filter(|id| world.contains(**id)).count(),
        scene.planets.len()
    );
    println!(
        "Totals: {} contacts, {} merges, {} ejecta, {} culled",
        totals.contacts, totals.merges, totals.ejecta_spawned, totals.culled
    );
}
