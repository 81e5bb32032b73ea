//! Events emitted by the controller for mission-logic feedback.

use serde::{Deserialize, Serialize};

use crate::enums::{Formation, SensorKind};

/// Per-tick controller events, embedded in the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FleetEvent {
    /// A formation was deployed and targets were rewritten.
    FormationDeployed { formation: Formation },
    /// Sensor arbitration switched the primary modality.
    PrimarySensorChanged { from: SensorKind, to: SensorKind },
    /// A unit breached the ultrasonic safety floor against a peer or
    /// obstacle; the close-range override fired.
    ProximityAlert { unit: usize, distance: f64 },
}
