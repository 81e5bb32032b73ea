//! Enumeration types used throughout the controller.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::SwarmError;

/// Sensing modality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorKind {
    /// Short range, precise in clear air, degrades sharply in fog.
    #[default]
    Lidar,
    /// Medium range, fog-stable, modest noise.
    Radar,
    /// Long range, preferred in fog and darkness.
    Thermal,
    /// Very short range contact-avoidance backup; never primary.
    Ultrasonic,
}

impl SensorKind {
    /// Nominal maximum detection range in meters.
    pub fn nominal_range(&self) -> f64 {
        match self {
            SensorKind::Lidar => LIDAR_RANGE,
            SensorKind::Radar => RADAR_RANGE,
            SensorKind::Thermal => THERMAL_RANGE,
            SensorKind::Ultrasonic => ULTRASONIC_RANGE,
        }
    }

    /// Nominal ranging-noise coefficient (fraction of true distance).
    /// Ultrasonic is treated as noise-free; it is cone-limited instead.
    pub fn noise_coefficient(&self) -> f64 {
        match self {
            SensorKind::Lidar => LIDAR_NOISE,
            SensorKind::Radar => RADAR_NOISE,
            SensorKind::Thermal => THERMAL_NOISE,
            SensorKind::Ultrasonic => 0.0,
        }
    }
}

/// Named closed-form formation layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formation {
    /// 3-unit equilateral triangle; remaining units hold their last target.
    Trinity,
    /// Evenly spaced circle.
    Circle,
    /// Expanding logarithmic spiral with a gentle climb.
    Spiral,
    /// Parametric heart curve.
    Heart,
    /// Hexagonal grid with row-offset striping.
    HexLattice,
    /// V-shaped wedge rows.
    VWedge,
    /// Concentric octagonal rings.
    Diamond,
    /// Radial arms.
    Starburst,
    /// Vertical helix.
    Helix,
    /// Staggered grid with alternating altitude.
    LatticeWeave,
}

impl Formation {
    /// Parse a formation from its wire name.
    ///
    /// `hex` is accepted as a legacy alias for `hex_lattice`.
    /// Unknown names are reported to the caller; targets stay unchanged.
    pub fn parse(name: &str) -> Result<Formation, SwarmError> {
        match name {
            "trinity" => Ok(Formation::Trinity),
            "circle" => Ok(Formation::Circle),
            "spiral" => Ok(Formation::Spiral),
            "heart" => Ok(Formation::Heart),
            "hex_lattice" | "hex" => Ok(Formation::HexLattice),
            "v_wedge" => Ok(Formation::VWedge),
            "diamond" => Ok(Formation::Diamond),
            "starburst" => Ok(Formation::Starburst),
            "helix" => Ok(Formation::Helix),
            "lattice_weave" => Ok(Formation::LatticeWeave),
            other => Err(SwarmError::UnknownFormation(other.to_string())),
        }
    }

    /// Canonical wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Formation::Trinity => "trinity",
            Formation::Circle => "circle",
            Formation::Spiral => "spiral",
            Formation::Heart => "heart",
            Formation::HexLattice => "hex_lattice",
            Formation::VWedge => "v_wedge",
            Formation::Diamond => "diamond",
            Formation::Starburst => "starburst",
            Formation::Helix => "helix",
            Formation::LatticeWeave => "lattice_weave",
        }
    }
}

/// Obstacle classification from the perception feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleClass {
    /// Fixed structure, terrain, parked vehicle.
    #[default]
    Static,
    /// Human-classified contact: priority-weighted in avoidance.
    Human,
}
