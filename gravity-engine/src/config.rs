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
//! Simulation configuration
//!
//! Every tuning knob and mode flag of the engine lives in a
//! single [`SimulationConfig`] value owned by the [`World`](crate::World).
//! Collaborators that temporarily take over the scene (scripted game modes)
//! can read the current value, install their own, and put the old one back.
//!
//! # Units
//!
//! The engine runs with a unit timestep: velocities are in world units per
//! tick and accelerations in world units per tick².

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Gravitational constant used by the sandbox tuning
pub const GRAVITATIONAL_CONSTANT: f64 = 0.005;

/// Softening length ε added (squared) to every pairwise distance
pub const DEFAULT_SOFTENING: f64 = 10.0;

/// Default coefficient of restitution for bouncing collisions
pub const DEFAULT_RESTITUTION: f64 = 0.8;

/// Default per-tick friction coefficient (only applied when friction is enabled)
pub const DEFAULT_FRICTION: f64 = 0.001;

/// Fraction of velocity kept when bouncing off the screen boundary
pub const SCREEN_BOUNCE_EFFICIENCY: f64 = 0.5;

/// Width of the simulated region
pub const DEFAULT_WIDTH: f64 = 1600.0;

/// Height of the simulated region
pub const DEFAULT_HEIGHT: f64 = 1200.0;

/// Bodies farther than this from the region center are culled
pub const DEFAULT_CULL_DISTANCE: f64 = 5000.0;

/// Errors reported when validating a [`SimulationConfig`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Gravitational constant is negative, NaN, or infinite
    #[error("gravitational constant must be non-negative and finite, got {0}")]
    InvalidGravitationalConstant(f64),
    /// Softening length is negative, NaN, or infinite
    #[error("softening length must be non-negative and finite, got {0}")]
    InvalidSoftening(f64),
    /// Restitution outside [0, 1]
    #[error("restitution must lie in [0, 1], got {0}")]
    InvalidRestitution(f64),
    /// Friction outside [0, 1)
    #[error("friction coefficient must lie in [0, 1), got {0}")]
    InvalidFriction(f64),
    /// Bounce efficiency outside [0, 1]
    #[error("screen bounce efficiency must lie in [0, 1], got {0}")]
    InvalidBounceEfficiency(f64),
    /// Region width or height is not positive and finite
    #[error("bounds must be positive and finite, got {width} x {height}")]
    InvalidBounds {
        /// Requested width
        width: f64,
        /// Requested height
        height: f64,
    },
    /// Cull distance is not positive and finite
    #[error("cull distance must be positive and finite, got {0}")]
    InvalidCullDistance(f64),
}

/// Engine-wide tuning and feature toggles
///
/// # Example
///
/// ```
/// use gravity_engine::config::SimulationConfig;
///
/// let config = SimulationConfig::default()
///     .with_merge_on_collision(true)
///     .with_restitution(0.5);
/// assert!(config.validate().is_ok());
/// assert!(config.merge_on_collision);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimulationConfig {
    /// Overlapping unpinned bodies fuse instead of bouncing
    pub merge_on_collision: bool,
    /// Run the pairwise collision pass even when merge mode is off
    pub particle_collisions: bool,
    /// Scale velocities by `1 - friction_coefficient` every tick
    pub friction_enabled: bool,
    /// Per-tick velocity loss when friction is enabled
    pub friction_coefficient: f64,
    /// Coefficient of restitution for impulse responses
    pub restitution: f64,
    /// Reflect bodies off the rectangular region boundary
    pub screen_bounce: bool,
    /// Velocity fraction kept after a boundary bounce
    pub bounce_efficiency: f64,
    /// Width of the simulated region (origin at the top-left corner)
    pub width: f64,
    /// Height of the simulated region
    pub height: f64,
    /// Maximum distance from the region center before a body is culled
    pub cull_distance: f64,
    /// Gravitational constant G
    pub gravitational_constant: f64,
    /// Softening length ε
    pub softening: f64,
    /// Log a warning when integration produces a non-finite body state
    pub warn_on_invalid: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            merge_on_collision: false,
            particle_collisions: true,
            friction_enabled: false,
            friction_coefficient: DEFAULT_FRICTION,
            restitution: DEFAULT_RESTITUTION,
            screen_bounce: false,
            bounce_efficiency: SCREEN_BOUNCE_EFFICIENCY,
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            cull_distance: DEFAULT_CULL_DISTANCE,
            gravitational_constant: GRAVITATIONAL_CONSTANT,
            softening: DEFAULT_SOFTENING,
            warn_on_invalid: true,
        }
    }
}

impl SimulationConfig {
    /// Enable or disable merge mode
    pub fn with_merge_on_collision(mut self, merge: bool) -> Self {
        self.merge_on_collision = merge;
        self
    }

    /// Enable or disable the bouncing collision pass
    pub fn with_particle_collisions(mut self, enabled: bool) -> Self {
        self.particle_collisions = enabled;
        self
    }

    /// Enable friction with the given coefficient
    pub fn with_friction(mut self, coefficient: f64) -> Self {
        self.friction_enabled = true;
        self.friction_coefficient = coefficient;
        self
    }

    /// Set the coefficient of restitution
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Enable or disable screen-edge bouncing
    pub fn with_screen_bounce(mut self, enabled: bool) -> Self {
        self.screen_bounce = enabled;
        self
    }

    /// Set the region size; the culling reference point follows its center
    pub fn with_bounds(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the cull distance
    pub fn with_cull_distance(mut self, distance: f64) -> Self {
        self.cull_distance = distance;
        self
    }

    /// Set the gravitational constant and softening length
    pub fn with_gravity(mut self, g_constant: f64, softening: f64) -> Self {
        self.gravitational_constant = g_constant;
        self.softening = softening;
        self
    }

    /// Center of the simulated region, used as the culling reference point
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Check every tunable for a usable value
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.gravitational_constant >= 0.0 && self.gravitational_constant.is_finite()) {
            return Err(ConfigError::InvalidGravitationalConstant(self.gravitational_constant));
        }
        if !(self.softening >= 0.0 && self.softening.is_finite()) {
            return Err(ConfigError::InvalidSoftening(self.softening));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ConfigError::InvalidRestitution(self.restitution));
        }
        if !(0.0..1.0).contains(&self.friction_coefficient) {
            return Err(ConfigError::InvalidFriction(self.friction_coefficient));
        }
        if !(0.0..=1.0).contains(&self.bounce_efficiency) {
            return Err(ConfigError::InvalidBounceEfficiency(self.bounce_efficiency));
        }
        let bounds_ok = |v: f64| v > 0.0 && v.is_finite();
        if !bounds_ok(self.width) || !bounds_ok(self.height) {
            return Err(ConfigError::InvalidBounds {
                width: self.width,
                height: self.height,
            });
        }
        if !bounds_ok(self.cull_distance) {
            return Err(ConfigError::InvalidCullDistance(self.cull_distance));
        }
        Ok(())
    }
}
