//! Environment state: wind, rain, fog, ambient light.
//!
//! One immutable snapshot is read at the start of every tick; external
//! telemetry mutates it only through the clamping setters between ticks.
//! Derived factors are pure so the sensing and disturbance systems can
//! query the same snapshot without hidden state.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Global disturbance parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Wind speed (km/h, >= 0).
    wind_speed_kmh: f64,
    /// Wind direction (degrees, [0, 360)), the direction the wind blows toward.
    wind_dir_deg: f64,
    /// Rain intensity (mm/h, clamped to [0, 50]).
    rain_mm_h: f64,
    /// Fog density (clamped to [0, 1]).
    fog_density: f64,
    /// Ambient light (lux, >= 0).
    light_lux: f64,
}

impl Default for Environment {
    /// Clear daylight, no wind.
    fn default() -> Self {
        Self {
            wind_speed_kmh: 0.0,
            wind_dir_deg: 0.0,
            rain_mm_h: 0.0,
            fog_density: 0.0,
            light_lux: 10_000.0,
        }
    }
}

impl Environment {
    /// Set every field at once; each input is clamped to its valid bounds.
    pub fn set(
        &mut self,
        wind_speed_kmh: f64,
        wind_dir_deg: f64,
        rain_mm_h: f64,
        fog_density: f64,
        light_lux: f64,
    ) {
        self.set_wind(wind_speed_kmh, wind_dir_deg);
        self.set_rain(rain_mm_h);
        self.set_fog(fog_density);
        self.set_light(light_lux);
    }

    pub fn set_wind(&mut self, speed_kmh: f64, dir_deg: f64) {
        self.wind_speed_kmh = speed_kmh.max(0.0);
        self.wind_dir_deg = dir_deg.rem_euclid(360.0);
    }

    pub fn set_rain(&mut self, mm_h: f64) {
        self.rain_mm_h = mm_h.clamp(0.0, RAIN_MAX);
    }

    pub fn set_fog(&mut self, density: f64) {
        self.fog_density = density.clamp(0.0, 1.0);
    }

    pub fn set_light(&mut self, lux: f64) {
        self.light_lux = lux.max(0.0);
    }

    pub fn wind_speed_kmh(&self) -> f64 {
        self.wind_speed_kmh
    }

    pub fn wind_dir_deg(&self) -> f64 {
        self.wind_dir_deg
    }

    pub fn rain_mm_h(&self) -> f64 {
        self.rain_mm_h
    }

    pub fn fog_density(&self) -> f64 {
        self.fog_density
    }

    pub fn light_lux(&self) -> f64 {
        self.light_lux
    }

    // --- Derived factors ---

    /// Lidar visibility factor under fog: 1 at clear air, 0.2 at fog = 1.
    pub fn fog_visibility_factor(&self) -> f64 {
        1.0 - FOG_VISIBILITY_LOSS * self.fog_density
    }

    /// Rain noise/drag factor: intensity² / 2500, in [0, 1].
    pub fn rain_noise_factor(&self) -> f64 {
        (self.rain_mm_h * self.rain_mm_h) / RAIN_DRAG_DENOM
    }

    /// Rotor lift loss from rain: intensity / 200, capped at 25%.
    pub fn rain_lift_loss(&self) -> f64 {
        (self.rain_mm_h / RAIN_LIFT_DENOM).min(RAIN_MAX / RAIN_LIFT_DENOM)
    }

    /// Formation tighten factor: up to 12.5% pull toward the swarm
    /// centroid at maximum rain intensity.
    pub fn formation_tighten(&self) -> f64 {
        (self.rain_mm_h / RAIN_MAX) * RAIN_TIGHTEN_MAX
    }

    /// Wind speed in m/s.
    pub fn wind_speed_ms(&self) -> f64 {
        self.wind_speed_kmh / 3.6
    }

    /// Horizontal unit vector the wind blows toward (x = East, y = North).
    pub fn wind_unit(&self) -> (f64, f64) {
        let rad = self.wind_dir_deg.to_radians();
        (rad.cos(), rad.sin())
    }
}
