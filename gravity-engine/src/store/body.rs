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
//! The simulated body
//!
//! A body is a circle with a mass, a kinematic state and a few cosmetic
//! attributes. Collaborators mutate position, velocity and the pinned flag
//! directly between steps (drag-and-drop, slingshot launch, pin toggling).

use super::components::{Acceleration, Color, MergeAnimation, Position, Velocity};
use super::handle::BodyId;

/// A circular body taking part in the simulation
///
/// Mass defaults to `radius²`. A pinned body never moves on its own: the
/// integrator, the separation step and the boundary pass all leave its
/// position and velocity untouched, but it still attracts and collides with
/// other bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    id: BodyId,
    position: Position,
    velocity: Velocity,
    acceleration: Acceleration,
    radius: f64,
    mass: f64,
    pinned: bool,
    color: Color,
    angle: f64,
    angular_velocity: f64,
    merge_animation: MergeAnimation,
}

impl Body {
    /// Create a body at rest with mass `radius²`
    ///
    /// `radius` must be at least 1; the engine relies on a positive mass
    /// wherever it divides by one and does not re-check it.
    pub(crate) fn new(id: BodyId, position: Position, radius: f64, color: Color) -> Self {
        Body {
            id,
            position,
            velocity: Velocity::zero(),
            acceleration: Acceleration::zero(),
            radius,
            mass: radius * radius,
            pinned: false,
            color,
            angle: 0.0,
            angular_velocity: 0.0,
            merge_animation: MergeAnimation::default(),
        }
    }

    /// Handle of this body
    pub fn id(&self) -> BodyId {
        self.id
    }

    /// Current position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Move the body
    pub fn set_position(&mut self, position: Position) {
        self.position = position;
    }

    /// Current velocity
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Overwrite the velocity
    pub fn set_velocity(&mut self, velocity: Velocity) {
        self.velocity = velocity;
    }

    /// Acceleration cached from the previous tick
    pub fn acceleration(&self) -> Acceleration {
        self.acceleration
    }

    pub(crate) fn set_acceleration(&mut self, acceleration: Acceleration) {
        self.acceleration = acceleration;
    }

    /// Radius
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Mass (`radius²` unless overridden)
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Override the mass, e.g. to make a dominant central body
    pub fn set_mass(&mut self, mass: f64) {
        self.mass = mass;
    }

    /// Whether the body is pinned in place
    pub fn is_pinned(&self) -> bool {
        self.pinned
    }

    /// Pin or release the body
    pub fn set_pinned(&mut self, pinned: bool) {
        self.pinned = pinned;
    }

    /// Display color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Override the display color
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Rotation angle in radians
    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Spin rate in radians per tick
    pub fn angular_velocity(&self) -> f64 {
        self.angular_velocity
    }

    /// Set the spin rate
    pub fn set_angular_velocity(&mut self, angular_velocity: f64) {
        self.angular_velocity = angular_velocity;
    }

    /// Merge animation state
    pub fn merge_animation(&self) -> MergeAnimation {
        self.merge_animation
    }

    /// Spin moment of inertia of a uniform disc, `½·m·r²`
    pub fn moment_of_inertia(&self) -> f64 {
        0.5 * self.mass * self.radius * self.radius
    }

    /// Linear momentum `m·v`
    pub fn momentum(&self) -> (f64, f64) {
        (self.mass * self.velocity.dx(), self.mass * self.velocity.dy())
    }

    pub(crate) fn position_mut(&mut self) -> &mut Position {
        &mut self.position
    }

    pub(crate) fn velocity_mut(&mut self) -> &mut Velocity {
        &mut self.velocity
    }

    /// Take over the combined state produced by a merge
    pub(crate) fn absorb_state(
        &mut self,
        position: Position,
        velocity: Velocity,
        radius: f64,
        mass: f64,
        angular_velocity: f64,
    ) {
        self.position = position;
        self.velocity = velocity;
        self.radius = radius;
        self.mass = mass;
        self.angular_velocity = angular_velocity;
        self.merge_animation = MergeAnimation::triggered(radius);
    }

    /// Advance rotation and merge animation by one tick
    pub(crate) fn advance_cosmetics(&mut self) {
        self.angle += self.angular_velocity;
        self.merge_animation.decay();
    }
}
