//! Fundamental geometric and simulation types.

use serde::{Deserialize, Serialize};

/// 3D position in controller space (meters, Cartesian).
/// x = East, y = North, z = Up (altitude).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Per-tick displacement correction (meters).
///
/// Avoidance, wind counter, and rain climb terms are all expressed as
/// corrections and summed by the integrator before being applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Correction {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Control-loop time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed control time in seconds.
    pub elapsed_secs: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Range to another position in meters (3D distance).
    pub fn range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        let dz = other.z - self.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// Horizontal range (ignoring altitude).
    pub fn horizontal_range_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Horizontal bearing to another position in radians
    /// (math convention: 0 = +x East, counterclockwise).
    pub fn bearing_to(&self, other: &Position) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        dy.atan2(dx).rem_euclid(std::f64::consts::TAU)
    }

    /// Apply a correction, yielding the next position.
    pub fn offset_by(&self, c: &Correction) -> Position {
        Position::new(self.x + c.x, self.y + c.y, self.z + c.z)
    }
}

impl Correction {
    pub const ZERO: Correction = Correction {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean magnitude (meters).
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Accumulate another correction in place.
    pub fn add(&mut self, other: &Correction) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }

    /// Scale by a factor.
    pub fn scaled(&self, factor: f64) -> Correction {
        Correction::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Clamp the magnitude to `cap`, preserving direction.
    /// This is the final step of the avoidance pipeline; it is applied to
    /// the combined vector, never to individual contributors.
    pub fn clamped(&self, cap: f64) -> Correction {
        let mag = self.magnitude();
        if mag > cap && mag > 0.0 {
            self.scaled(cap / mag)
        } else {
            *self
        }
    }

    /// True if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl SimTime {
    /// Seconds per tick at the control-loop rate.
    pub fn dt(&self) -> f64 {
        1.0 / crate::constants::TICK_RATE as f64
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}
