//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Controller logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::types::Position;

/// Stable fleet index, 0..fleet_size. Assigned at spawn, never changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitId {
    pub index: usize,
}

/// Current formation target for a unit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TargetPosition {
    pub position: Position,
}

/// Recent positions for telemetry trails (newest first),
/// up to MAX_TRAIL_POSITIONS.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrailHistory {
    pub positions: Vec<Position>,
}

// Position (types.rs) doubles as the position component.
