//! Fleet snapshot — the complete controller state published after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{Formation, SensorKind};
use crate::events::FleetEvent;
use crate::types::{Position, SimTime};

/// Complete fleet state published to mission logic after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FleetSnapshot {
    pub time: SimTime,
    /// Active formation, if one has been deployed.
    pub formation: Option<Formation>,
    pub units: Vec<UnitView>,
    pub environment: EnvironmentView,
    pub sensing: SensingView,
    pub events: Vec<FleetEvent>,
}

/// Per-unit telemetry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitView {
    pub unit_id: usize,
    pub position: Position,
    pub target: Position,
    /// Remaining station-keeping error (meters).
    pub distance_to_target: f64,
    /// Recent positions for trail display (newest first).
    pub trail: Vec<Position>,
}

/// Environment snapshot the tick was computed against.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EnvironmentView {
    pub wind_speed_kmh: f64,
    pub wind_dir_deg: f64,
    pub rain_mm_h: f64,
    pub fog_density: f64,
    pub light_lux: f64,
}

/// Sensor arbitration outcome for the tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensingView {
    /// Primary modality selected by arbitration.
    pub primary: SensorKind,
    /// Fused effective detection range (meters).
    pub effective_range: f64,
    /// Safety-margin multiplier applied to the minimum separation.
    pub safety_margin: f64,
    /// Confidence factor scaling the deflection cap (<= 1).
    pub confidence: f64,
}

impl Default for SensingView {
    fn default() -> Self {
        Self {
            primary: SensorKind::Lidar,
            effective_range: 0.0,
            safety_margin: 1.0,
            confidence: 1.0,
        }
    }
}
