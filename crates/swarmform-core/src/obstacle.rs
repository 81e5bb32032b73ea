//! Environment-perceived obstacles.
//!
//! The obstacle list is supplied externally each tick (simulated feed or a
//! real perception pipeline) and treated as a read-only snapshot valid for
//! exactly one tick. The controller never owns or retains it.

use serde::{Deserialize, Serialize};

use crate::enums::ObstacleClass;
use crate::types::Position;

/// A single perceived obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Position,
    pub class: ObstacleClass,
}

impl Obstacle {
    pub fn new(position: Position, class: ObstacleClass) -> Self {
        Self { position, class }
    }

    /// Convenience constructor for a static obstacle.
    pub fn fixed(x: f64, y: f64, z: f64) -> Self {
        Self::new(Position::new(x, y, z), ObstacleClass::Static)
    }

    /// Convenience constructor for a human-classified contact.
    pub fn human(x: f64, y: f64, z: f64) -> Self {
        Self::new(Position::new(x, y, z), ObstacleClass::Human)
    }
}
