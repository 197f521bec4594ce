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
//! Body components
//!
//! Plain 2D value types carried by every [`Body`](super::Body): kinematic
//! state (position, velocity, cached acceleration) and the purely cosmetic
//! attributes the presentation layer reads (color, merge animation).

/// 2D position in world coordinates
///
/// # Examples
///
/// ```
/// use gravity_engine::store::Position;
///
/// let pos = Position::new(3.0, 4.0);
/// assert_eq!(pos.distance_squared_to(Position::zero()), 25.0);
/// assert!(pos.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    x: f64,
    y: f64,
}

impl Position {
    /// Create a new position with the given coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Position { x, y }
    }

    /// Create a position at the origin
    pub fn zero() -> Self {
        Position::new(0.0, 0.0)
    }

    /// Get the x coordinate
    pub fn x(&self) -> f64 {
        self.x
    }

    /// Get the y coordinate
    pub fn y(&self) -> f64 {
        self.y
    }

    /// Set the x coordinate
    pub fn set_x(&mut self, x: f64) {
        self.x = x;
    }

    /// Set the y coordinate
    pub fn set_y(&mut self, y: f64) {
        self.y = y;
    }

    /// Squared distance to another point
    pub fn distance_squared_to(&self, other: Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dx * dx + dy * dy
    }

    /// Distance to another point
    pub fn distance_to(&self, other: Position) -> f64 {
        self.distance_squared_to(other).sqrt()
    }

    /// Check if both coordinates are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// 2D velocity in world units per tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Velocity {
    dx: f64,
    dy: f64,
}

impl Velocity {
    /// Create a new velocity with the given components
    pub fn new(dx: f64, dy: f64) -> Self {
        Velocity { dx, dy }
    }

    /// Create a zero velocity (at rest)
    pub fn zero() -> Self {
        Velocity::new(0.0, 0.0)
    }

    /// Get the x component
    pub fn dx(&self) -> f64 {
        self.dx
    }

    /// Get the y component
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Set the x component
    pub fn set_dx(&mut self, dx: f64) {
        self.dx = dx;
    }

    /// Set the y component
    pub fn set_dy(&mut self, dy: f64) {
        self.dy = dy;
    }

    /// Projection onto a (unit) direction
    pub fn dot(&self, nx: f64, ny: f64) -> f64 {
        self.dx * nx + self.dy * ny
    }

    /// Calculate the magnitude (speed) of the velocity vector
    pub fn magnitude(&self) -> f64 {
        (self.dx * self.dx + self.dy * self.dy).sqrt()
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.dx.is_finite() && self.dy.is_finite()
    }
}

/// 2D acceleration in world units per tick²
///
/// Cached on each body between ticks for the two-phase Verlet update.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Acceleration {
    ax: f64,
    ay: f64,
}

impl Acceleration {
    /// Create a new acceleration with the given components
    pub fn new(ax: f64, ay: f64) -> Self {
        Acceleration { ax, ay }
    }

    /// Create a zero acceleration
    pub fn zero() -> Self {
        Acceleration::new(0.0, 0.0)
    }

    /// Get the x component
    pub fn ax(&self) -> f64 {
        self.ax
    }

    /// Get the y component
    pub fn ay(&self) -> f64 {
        self.ay
    }

    /// Add another acceleration to this one
    pub fn add(&mut self, other: &Acceleration) {
        self.ax += other.ax;
        self.ay += other.ay;
    }

    /// Check if both components are finite (not NaN or infinite)
    pub fn is_valid(&self) -> bool {
        self.ax.is_finite() && self.ay.is_finite()
    }
}

/// Opaque RGB display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(pub [u8; 3]);

impl Color {
    /// Create a color from its red, green and blue channels
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color([r, g, b])
    }

    /// Palette color for the n-th created body
    pub fn for_index(index: usize) -> Self {
        PALETTE[index % PALETTE.len()]
    }
}

/// Round-robin palette assigned at creation
pub const PALETTE: [Color; 8] = [
    Color::rgb(255, 255, 255), // white
    Color::rgb(100, 180, 255), // light blue
    Color::rgb(255, 130, 100), // salmon
    Color::rgb(130, 255, 130), // light green
    Color::rgb(255, 220, 100), // yellow
    Color::rgb(200, 140, 255), // purple
    Color::rgb(255, 160, 200), // pink
    Color::rgb(100, 255, 220), // cyan
];

/// Merge-flash state left on the surviving body of a merge
///
/// Three independently decaying scalars for the presentation layer. The
/// engine decays them once per tick and never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MergeAnimation {
    timer: f64,
    radius: f64,
    flash: f64,
}

impl MergeAnimation {
    /// Timer lost per tick
    pub const TIMER_DECAY: f64 = 0.015;
    /// Ring growth per tick while the timer runs
    pub const RING_GROWTH: f64 = 5.0;
    /// Flash intensity lost per tick
    pub const FLASH_DECAY: f64 = 0.03;

    /// Fresh animation for a body that just reached `radius`
    pub fn triggered(radius: f64) -> Self {
        MergeAnimation {
            timer: 1.0,
            radius,
            flash: 1.0,
        }
    }

    /// Expansion timer, 1.0 right after a merge and 0.0 once finished
    pub fn timer(&self) -> f64 {
        self.timer
    }

    /// Radius of the expanding ring
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Flash intensity, 1.0 right after a merge
    pub fn flash(&self) -> f64 {
        self.flash
    }

    /// Whether any part of the animation is still running
    pub fn is_active(&self) -> bool {
        self.timer > 0.0 || self.flash > 0.0
    }

    /// Advance the animation by one tick
    pub fn decay(&mut self) {
        if self.timer > 0.0 {
            self.timer = (self.timer - Self::TIMER_DECAY).max(0.0);
            self.radius += Self::RING_GROWTH;
        }
        if self.flash > 0.0 {
            self.flash = (self.flash - Self::FLASH_DECAY).max(0.0);
        }
    }
}
