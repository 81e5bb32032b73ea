//! Disturbance compensator: wind counter-thrust and rain compensation.
//!
//! Both terms are additive to the target-seeking and avoidance vectors,
//! never a replacement for them.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use swarmform_core::constants::*;
use swarmform_core::environment::Environment;
use swarmform_core::types::Correction;

/// Horizontal counter-vector opposing the wind, capped at the maximum
/// counter-thrust so drift is suppressed but never overcorrected.
/// Gusts jitter the instantaneous wind speed by a bounded ±10%.
pub fn wind_counter(env: &Environment, rng: &mut ChaCha8Rng) -> Correction {
    let speed = env.wind_speed_ms();
    if speed <= 0.0 {
        return Correction::ZERO;
    }
    let gust = 1.0 + WIND_GUST_JITTER * rng.gen_range(-1.0..=1.0);
    let magnitude = (speed * gust).clamp(0.0, WIND_COUNTER_CAP);
    let (ux, uy) = env.wind_unit();
    Correction::new(-ux * magnitude, -uy * magnitude, 0.0)
}

/// Vertical climb term compensating rain-induced lift loss
/// (proportional to intensity/200, capped at 25%).
pub fn rain_climb(env: &Environment) -> Correction {
    Correction::new(0.0, 0.0, env.rain_lift_loss())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_no_wind_no_counter() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let env = Environment::default();
        assert_eq!(wind_counter(&env, &mut rng), Correction::ZERO);
    }

    #[test]
    fn test_wind_counter_opposes_wind() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut env = Environment::default();
        // 36 km/h blowing East: counter must point West.
        env.set_wind(36.0, 0.0);
        for _ in 0..100 {
            let counter = wind_counter(&env, &mut rng);
            assert!(counter.x < 0.0);
            assert!(counter.y.abs() < 1e-9);
            assert_eq!(counter.z, 0.0);
        }
    }

    #[test]
    fn test_wind_counter_capped() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut env = Environment::default();
        env.set_wind(200.0, 135.0);
        for _ in 0..100 {
            let counter = wind_counter(&env, &mut rng);
            assert!(counter.magnitude() <= WIND_COUNTER_CAP + 1e-9);
        }
    }

    #[test]
    fn test_light_wind_under_cap() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut env = Environment::default();
        // 3.6 km/h = 1 m/s; with ±10% gust the counter stays near 1.
        env.set_wind(3.6, 90.0);
        let counter = wind_counter(&env, &mut rng);
        assert!(counter.magnitude() < WIND_COUNTER_CAP);
        assert!((counter.magnitude() - 1.0).abs() <= WIND_GUST_JITTER + 1e-9);
    }

    #[test]
    fn test_rain_climb_proportional_and_capped() {
        let mut env = Environment::default();
        assert_eq!(rain_climb(&env), Correction::ZERO);

        env.set_rain(20.0);
        assert!((rain_climb(&env).z - 0.1).abs() < 1e-12);

        env.set_rain(50.0);
        assert!((rain_climb(&env).z - 0.25).abs() < 1e-12);
    }
}
