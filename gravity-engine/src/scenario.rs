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
//! Scene presets
//!
//! Helpers that populate a [`World`] with ready-made arrangements.

use crate::forces::SoftenedGravity;
use crate::store::{BodyId, Color, Velocity, World};

/// Radius of the solar-system sun
pub const SUN_RADIUS: f64 = 30.0;

/// Mass of the solar-system sun
pub const SUN_MASS: f64 = 10_000.0;

/// Color of the solar-system sun
pub const SUN_COLOR: Color = Color::rgb(255, 220, 50);

struct PlanetOrbit {
    longitude_deg: f64,
    distance: f64,
    radius: f64,
    color: Color,
}

const PLANETS: [PlanetOrbit; 6] = [
    PlanetOrbit {
        longitude_deg: 73.0,
        distance: 80.0,
        radius: 3.0,
        color: Color::rgb(180, 160, 140),
    },
    PlanetOrbit {
        longitude_deg: 346.0,
        distance: 130.0,
        radius: 5.0,
        color: Color::rgb(230, 200, 150),
    },
    PlanetOrbit {
        longitude_deg: 148.0,
        distance: 190.0,
        radius: 5.0,
        color: Color::rgb(100, 150, 255),
    },
    PlanetOrbit {
        longitude_deg: 317.0,
        distance: 260.0,
        radius: 4.0,
        color: Color::rgb(220, 100, 60),
    },
    PlanetOrbit {
        longitude_deg: 108.0,
        distance: 480.0,
        radius: 14.0,
        color: Color::rgb(200, 170, 130),
    },
    PlanetOrbit {
        longitude_deg: 9.0,
        distance: 720.0,
        radius: 11.0,
        color: Color::rgb(220, 200, 150),
    },
];

/// The bodies created by [`solar_system`]
#[derive(Debug, Clone, PartialEq)]
pub struct SolarSystem {
    /// The pinned sun
    pub sun: BodyId,
    /// Planets, innermost first
    pub planets: Vec<BodyId>,
}

/// Add a pinned sun at the region center and six planets around it
///
/// Planets sit at fixed mean longitudes (measured counter-clockwise with the
/// screen's Y axis pointing down) and are launched tangentially, counter-
/// clockwise, at the Newtonian circular speed `sqrt(G·M/r)`. Existing bodies
/// are left alone.
pub fn solar_system(world: &mut World) -> SolarSystem {
    let (cx, cy) = world.config().center();
    let g = world.config().gravitational_constant;

    let sun = world.create(cx, cy, SUN_RADIUS);
    if let Some(body) = world.get_mut(sun) {
        body.set_pinned(true);
        body.set_mass(SUN_MASS);
        body.set_color(SUN_COLOR);
    }

    let planets = PLANETS
        .iter()
        .map(|planet| {
            let angle = planet.longitude_deg.to_radians();
            let (sin, cos) = angle.sin_cos();
            let speed = (g * SUN_MASS / planet.distance).sqrt();

            let id = world.create(
                cx + planet.distance * cos,
                cy - planet.distance * sin,
                planet.radius,
            );
            if let Some(body) = world.get_mut(id) {
                body.set_velocity(Velocity::new(-speed * sin, -speed * cos));
                body.set_color(planet.color);
            }
            id
        })
        .collect();

    tracing::debug!(sun = %sun, "solar system scene created");
    SolarSystem { sun, planets }
}

/// Place a body on a circular counter-clockwise orbit around `center`
///
/// `angle` is in radians, measured like [`solar_system`]'s longitudes. The
/// launch speed is [`SoftenedGravity::circular_orbit_speed`] for the world's
/// gravity settings, so the orbit stays circular under this engine's force
/// law as long as no other body perturbs it. The orbiter also inherits the
/// center's velocity. Returns `None` if `center` is not a live body.
pub fn place_in_orbit(
    world: &mut World,
    center: BodyId,
    distance: f64,
    angle: f64,
    radius: f64,
) -> Option<BodyId> {
    let central = world.get(center)?;
    let origin = central.position();
    let base = central.velocity();
    let central_mass = central.mass();

    let gravity = SoftenedGravity::from_config(world.config());
    let (sin, cos) = angle.sin_cos();
    let id = world.create(origin.x() + distance * cos, origin.y() - distance * sin, radius);

    let body = world.get_mut(id)?;
    let speed = gravity.circular_orbit_speed(central_mass, body.mass(), distance);
    body.set_velocity(Velocity::new(base.dx() - speed * sin, base.dy() - speed * cos));
    Some(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GRAVITATIONAL_CONSTANT;

    #[test]
    fn test_solar_system_layout() {
        let mut world = World::new();
        let scene = solar_system(&mut world);

        assert_eq!(world.len(), 7);
        assert_eq!(scene.planets.len(), 6);

        let sun = world.get(scene.sun).unwrap();
        assert!(sun.is_pinned());
        assert_eq!(sun.mass(), SUN_MASS);
        assert_eq!(sun.radius(), SUN_RADIUS);
        assert_eq!(sun.color(), SUN_COLOR);
        assert_eq!(sun.position().x(), 800.0);
        assert_eq!(sun.position().y(), 600.0);
    }

    #[test]
    fn test_planets_launched_tangentially() {
        let mut world = World::new();
        let scene = solar_system(&mut world);
        let center = world.get(scene.sun).unwrap().position();

        for (planet, orbit) in scene.planets.iter().zip(PLANETS.iter()) {
            let body = world.get(*planet).unwrap();
            let rx = body.position().x() - center.x();
            let ry = body.position().y() - center.y();

            assert!((body.position().distance_to(center) - orbit.distance).abs() < 1e-9);
            assert_eq!(body.radius(), orbit.radius);

            // Velocity perpendicular to the radius vector
            let dot = body.velocity().dot(rx, ry);
            assert!(dot.abs() < 1e-9, "radial velocity component {}", dot);

            let expected = (GRAVITATIONAL_CONSTANT * SUN_MASS / orbit.distance).sqrt();
            assert!((body.velocity().magnitude() - expected).abs() < 1e-12);

            // Counter-clockwise on screen: cross product negative with Y down
            let cross = rx * body.velocity().dy() - ry * body.velocity().dx();
            assert!(cross < 0.0);
        }
    }

    #[test]
    fn test_place_in_orbit_missing_center() {
        let mut world = World::new();
        let center = world.create(0.0, 0.0, 10);
        world.remove(center);
        assert!(place_in_orbit(&mut world, center, 100.0, 0.0, 2.0).is_none());
        assert!(world.is_empty());
    }

    #[test]
    fn test_place_in_orbit_speed() {
        let mut world = World::new();
        let center = world.create(800.0, 600.0, 40);
        world.get_mut(center).unwrap().set_mass(10_000.0);

        let id = place_in_orbit(&mut world, center, 100.0, 0.0, 5.0).unwrap();
        let body = world.get(id).unwrap();

        assert!((body.position().x() - 900.0).abs() < 1e-9);
        assert!((body.position().y() - 600.0).abs() < 1e-9);

        let gravity = SoftenedGravity::default();
        let expected = gravity.circular_orbit_speed(10_000.0, 25.0, 100.0);
        assert!(body.velocity().dx().abs() < 1e-9);
        assert!((body.velocity().dy() + expected).abs() < 1e-12);
    }
}
