//! Sensor model and arbitration.
//!
//! Each tick, arbitration picks the primary modality from environment
//! thresholds, and `perceive` turns true distances into noisy perceived
//! distances (or misses). Ranges, coefficients, and thresholds are the
//! behavioral contract; see constants.rs.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use swarmform_core::constants::*;
use swarmform_core::enums::SensorKind;
use swarmform_core::environment::Environment;

/// Arbitration outcome for one control step, computed once per tick and
/// shared by every unit's avoidance pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensingPlan {
    pub primary: SensorKind,
    /// Effective detection range of the primary modality (meters).
    pub effective_range: f64,
    /// Safety-margin multiplier for the minimum separation (>= 1).
    pub safety_margin: f64,
    /// Confidence factor scaling the deflection cap (<= 1).
    pub confidence: f64,
}

/// Compute the sensing plan for the current environment.
pub fn plan(env: &Environment) -> SensingPlan {
    let primary = select_primary(env);
    SensingPlan {
        primary,
        effective_range: effective_range(primary, env),
        safety_margin: safety_margin(primary, env),
        confidence: confidence(primary, env),
    }
}

/// Select the primary modality: thermal in dense fog or darkness, radar in
/// moderate fog, lidar otherwise. Ultrasonic is never primary; it is a
/// hard close-range override summed in by the avoidance engine.
pub fn select_primary(env: &Environment) -> SensorKind {
    if env.fog_density() > FOG_THERMAL_THRESHOLD || env.light_lux() < LOW_LIGHT_THRESHOLD {
        SensorKind::Thermal
    } else if env.fog_density() > FOG_RADAR_THRESHOLD {
        SensorKind::Radar
    } else {
        SensorKind::Lidar
    }
}

/// Effective detection range under the current environment.
/// Only lidar degrades with fog; the other modalities hold nominal range.
pub fn effective_range(kind: SensorKind, env: &Environment) -> f64 {
    match kind {
        SensorKind::Lidar => LIDAR_RANGE * env.fog_visibility_factor(),
        other => other.nominal_range(),
    }
}

/// Probabilistic miss chance for a detection inside the effective range.
/// Fog blinds lidar up to 50%; radar and thermal are near-miss-proof;
/// ultrasonic never misses probabilistically (it is cone-limited instead).
pub fn miss_chance(kind: SensorKind, env: &Environment) -> f64 {
    match kind {
        SensorKind::Lidar => LIDAR_FOG_MISS_MAX * env.fog_density(),
        SensorKind::Radar => RADAR_MISS_CHANCE,
        SensorKind::Thermal => THERMAL_MISS_CHANCE,
        SensorKind::Ultrasonic => 0.0,
    }
}

/// Perceive a true distance: `None` is a miss, `Some` is the noisy range.
///
/// Noise is a bounded symmetric draw scaled by the modality coefficient;
/// rain adds variance of intensity²/2500 on top.
pub fn perceive(
    kind: SensorKind,
    true_distance: f64,
    env: &Environment,
    rng: &mut ChaCha8Rng,
) -> Option<f64> {
    if true_distance > effective_range(kind, env) {
        return None;
    }
    let miss = miss_chance(kind, env);
    if miss > 0.0 && rng.gen_bool(miss.clamp(0.0, 1.0)) {
        return None;
    }
    let coefficient = kind.noise_coefficient() + env.rain_noise_factor();
    let noise = rng.gen_range(-1.0..=1.0) * coefficient;
    Some(true_distance * (1.0 + noise))
}

/// Safety-margin multiplier for the minimum separation distance.
///
/// Thermal ×1.3, radar/lidar ×1.4; lidar in fog scales further by the
/// inverse visibility factor. The multiplier only ever grows caution —
/// it never drops below 1, so the base bubble is a floor.
pub fn safety_margin(primary: SensorKind, env: &Environment) -> f64 {
    let base = match primary {
        SensorKind::Thermal => SAFETY_MARGIN_THERMAL,
        _ => SAFETY_MARGIN_RADAR_LIDAR,
    };
    let margin = if primary == SensorKind::Lidar {
        base / env.fog_visibility_factor()
    } else {
        base
    };
    margin.max(1.0)
}

/// Sensing confidence in [0, 1]; scales the deflection cap down, never up.
pub fn confidence(primary: SensorKind, env: &Environment) -> f64 {
    let mut factor = 1.0;
    if matches!(primary, SensorKind::Radar | SensorKind::Lidar) {
        factor *= RADAR_LIDAR_CONFIDENCE;
    }
    factor *= 1.0 - RAIN_CONFIDENCE_LOSS * env.rain_noise_factor();
    if primary == SensorKind::Lidar {
        factor *= env.fog_visibility_factor();
    }
    factor.clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn env_with_fog(fog: f64) -> Environment {
        let mut env = Environment::default();
        env.set_fog(fog);
        env
    }

    #[test]
    fn test_arbitration_thresholds() {
        assert_eq!(select_primary(&Environment::default()), SensorKind::Lidar);
        assert_eq!(select_primary(&env_with_fog(0.5)), SensorKind::Radar);
        assert_eq!(select_primary(&env_with_fog(0.7)), SensorKind::Thermal);

        // Darkness forces thermal even in clear air.
        let mut dark = Environment::default();
        dark.set_light(50.0);
        assert_eq!(select_primary(&dark), SensorKind::Thermal);
    }

    #[test]
    fn test_lidar_range_monotonic_in_fog() {
        let mut previous = f64::INFINITY;
        for step in 0..=10 {
            let env = env_with_fog(step as f64 / 10.0);
            let range = effective_range(SensorKind::Lidar, &env);
            assert!(
                range <= previous,
                "Lidar range must not grow with fog: {range} > {previous}"
            );
            previous = range;
        }
        // At fog = 1, effective lidar range is 20% of nominal.
        let range = effective_range(SensorKind::Lidar, &env_with_fog(1.0));
        assert!(range <= 0.2 * LIDAR_RANGE + 1e-12, "got {range}");
    }

    #[test]
    fn test_radar_range_fog_stable() {
        assert_eq!(
            effective_range(SensorKind::Radar, &env_with_fog(1.0)),
            RADAR_RANGE
        );
    }

    #[test]
    fn test_perceive_beyond_range_misses() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let env = Environment::default();
        assert_eq!(perceive(SensorKind::Lidar, 16.0, &env, &mut rng), None);
        assert_eq!(perceive(SensorKind::Ultrasonic, 4.5, &env, &mut rng), None);
    }

    #[test]
    fn test_perceive_noise_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let env = Environment::default();
        for _ in 0..500 {
            if let Some(d) = perceive(SensorKind::Lidar, 10.0, &env, &mut rng) {
                assert!((d - 10.0).abs() <= 10.0 * LIDAR_NOISE + 1e-9, "noisy {d}");
            }
        }
    }

    #[test]
    fn test_rain_widens_noise() {
        let mut rainy = Environment::default();
        rainy.set_rain(50.0);
        let mut rng = ChaCha8Rng::seed_from_u64(13);
        let bound = 10.0 * (RADAR_NOISE + rainy.rain_noise_factor());
        let mut seen_past_dry_bound = false;
        for _ in 0..500 {
            if let Some(d) = perceive(SensorKind::Radar, 10.0, &rainy, &mut rng) {
                assert!((d - 10.0).abs() <= bound + 1e-9);
                if (d - 10.0).abs() > 10.0 * RADAR_NOISE {
                    seen_past_dry_bound = true;
                }
            }
        }
        assert!(seen_past_dry_bound, "Rain should add variance beyond dry noise");
    }

    #[test]
    fn test_safety_margin_never_shrinks() {
        for fog_step in 0..=10 {
            let env = env_with_fog(fog_step as f64 / 10.0);
            let primary = select_primary(&env);
            assert!(safety_margin(primary, &env) >= 1.0);
        }
        // Lidar in light fog costs more margin than in clear air.
        let clear = Environment::default();
        let hazy = env_with_fog(0.3);
        assert!(
            safety_margin(SensorKind::Lidar, &hazy) > safety_margin(SensorKind::Lidar, &clear)
        );
    }

    #[test]
    fn test_confidence_bounds() {
        let mut env = Environment::default();
        env.set_rain(50.0);
        env.set_fog(0.3);
        for kind in [SensorKind::Lidar, SensorKind::Radar, SensorKind::Thermal] {
            let c = confidence(kind, &env);
            assert!((0.0..=1.0).contains(&c), "confidence {c} out of bounds");
        }
        // Degraded lidar is less trusted than thermal in the same weather.
        assert!(confidence(SensorKind::Lidar, &env) < confidence(SensorKind::Thermal, &env));
    }
}
