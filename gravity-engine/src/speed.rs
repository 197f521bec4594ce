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
//! Simulation speed control
//!
//! The engine always steps with a unit timestep. Running faster or slower
//! means running more or fewer fixed steps per rendered frame, never a
//! larger timestep.

/// Slowest selectable speed
pub const MIN_SPEED: f64 = 0.25;

/// Fastest selectable speed
pub const MAX_SPEED: f64 = 4.0;

/// Multiplier applied by [`SimulationSpeed::faster`] and divided out by
/// [`SimulationSpeed::slower`]
pub const SPEED_STEP: f64 = 1.5;

/// Speed multiplier, clamped to `[MIN_SPEED, MAX_SPEED]`
///
/// # Example
///
/// ```
/// use gravity_engine::speed::SimulationSpeed;
///
/// let mut speed = SimulationSpeed::default();
/// assert_eq!(speed.substeps(), 2);
///
/// speed.faster();
/// assert_eq!(speed.substeps(), 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationSpeed {
    value: f64,
}

impl SimulationSpeed {
    /// Create a speed, clamping into range
    ///
    /// # Panics
    ///
    /// Panics if `value` is not finite.
    pub fn new(value: f64) -> Self {
        assert!(value.is_finite(), "Simulation speed must be finite");
        SimulationSpeed {
            value: value.clamp(MIN_SPEED, MAX_SPEED),
        }
    }

    /// Current multiplier
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Speed up by one notch; returns the new value
    pub fn faster(&mut self) -> f64 {
        self.value = (self.value * SPEED_STEP).min(MAX_SPEED);
        self.value
    }

    /// Slow down by one notch; returns the new value
    pub fn slower(&mut self) -> f64 {
        self.value = (self.value / SPEED_STEP).max(MIN_SPEED);
        self.value
    }

    /// Fixed steps to run per rendered frame, at least one
    pub fn substeps(&self) -> usize {
        ((self.value * 2.0).floor() as usize).max(1)
    }
}

impl Default for SimulationSpeed {
    fn default() -> Self {
        SimulationSpeed { value: 1.0 }
    }
}
