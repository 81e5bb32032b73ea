//! Commands sent from mission logic to the controller.
//!
//! Commands are queued and processed at the next tick boundary, so the
//! environment and targets never change mid-tick.

use serde::{Deserialize, Serialize};

use crate::enums::Formation;
use crate::types::Position;

/// All external controller inputs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FleetCommand {
    /// Deploy a named formation around a center point.
    SetFormation {
        formation: Formation,
        center: Position,
    },
    /// Update the environment snapshot. Out-of-range values are clamped.
    SetEnvironment {
        wind_speed_kmh: f64,
        wind_dir_deg: f64,
        rain_mm_h: f64,
        fog_density: f64,
        light_lux: f64,
    },
}
