//! Avoidance engine.
//!
//! Per unit: inverse-square repulsion from peers and obstacles whose
//! perceived distance falls inside 1.5× the margin-scaled safety bubble,
//! plus the unconditional ultrasonic close-range override, with a single
//! confidence-scaled clamp applied to the combined vector as the last step.
//!
//! Force magnitude uses the perceived (noisy) distance; force direction
//! always uses the true separation unit vector — range estimation is
//! noisy, bearing is assumed reliable.

use rand_chacha::ChaCha8Rng;
use tracing::warn;

use swarmform_core::constants::*;
use swarmform_core::enums::{ObstacleClass, SensorKind};
use swarmform_core::environment::Environment;
use swarmform_core::events::FleetEvent;
use swarmform_core::obstacle::Obstacle;
use swarmform_core::types::{Correction, Position};

use super::sensing::{self, SensingPlan};

/// Compute the bounded avoidance correction for one unit.
///
/// `positions` is the consistent start-of-tick snapshot of every unit;
/// `slot` indexes this unit within it and `unit_index` is its fleet id
/// (used for proximity events).
#[allow(clippy::too_many_arguments)]
pub fn avoidance_for(
    slot: usize,
    unit_index: usize,
    positions: &[Position],
    obstacles: &[Obstacle],
    plan: &SensingPlan,
    env: &Environment,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<FleetEvent>,
) -> Correction {
    let me = positions[slot];
    let bubble = MIN_SEPARATION * plan.safety_margin * BUBBLE_TRIGGER_FACTOR;
    let mut total = Correction::ZERO;

    for (peer_slot, peer) in positions.iter().enumerate() {
        if peer_slot == slot {
            continue;
        }
        total.add(&repulsion(&me, peer, 1.0, bubble, plan, env, rng));
    }

    for obstacle in obstacles {
        let weight = priority_weight(obstacle.class, plan.primary);
        total.add(&repulsion(&me, &obstacle.position, weight, bubble, plan, env, rng));
    }

    // Ultrasonic hard floor: summed in unconditionally after the primary
    // modality's verdict, cannot be disabled by arbitration.
    let mut closest_breach = f64::INFINITY;
    for (peer_slot, peer) in positions.iter().enumerate() {
        if peer_slot == slot {
            continue;
        }
        if let Some((force, distance)) = ultrasonic_override(&me, peer) {
            total.add(&force);
            closest_breach = closest_breach.min(distance);
        }
    }
    for obstacle in obstacles {
        if let Some((force, distance)) = ultrasonic_override(&me, &obstacle.position) {
            total.add(&force);
            closest_breach = closest_breach.min(distance);
        }
    }

    if closest_breach.is_finite() {
        warn!(
            unit = unit_index,
            distance = closest_breach,
            "ultrasonic safety floor breached"
        );
        events.push(FleetEvent::ProximityAlert {
            unit: unit_index,
            distance: closest_breach,
        });
    }

    // The clamp is always the last step, on the combined vector.
    let cap = DEFLECTION_CAP * plan.confidence;
    total.clamped(cap)
}

/// Priority weight for an obstacle class under the active primary sensor.
/// Human contacts weigh double, triple when thermal confirms the signature.
fn priority_weight(class: ObstacleClass, primary: SensorKind) -> f64 {
    match class {
        ObstacleClass::Static => 1.0,
        ObstacleClass::Human => {
            if primary == SensorKind::Thermal {
                HUMAN_PRIORITY_THERMAL
            } else {
                HUMAN_PRIORITY
            }
        }
    }
}

/// Single repulsive contribution from a perceived contact, or zero when
/// out of range, missed, outside the bubble, or coincident.
fn repulsion(
    me: &Position,
    other: &Position,
    weight: f64,
    bubble: f64,
    plan: &SensingPlan,
    env: &Environment,
    rng: &mut ChaCha8Rng,
) -> Correction {
    let true_distance = me.range_to(other);
    // Coincident points have no separation direction; contribute nothing
    // rather than a non-finite or arbitrary vector.
    if true_distance < MIN_DISTANCE_FLOOR {
        return Correction::ZERO;
    }
    if true_distance > plan.effective_range {
        return Correction::ZERO;
    }
    let Some(perceived) = sensing::perceive(plan.primary, true_distance, env, rng) else {
        return Correction::ZERO;
    };
    if perceived >= bubble {
        return Correction::ZERO;
    }
    let distance = perceived.max(MIN_DISTANCE_FLOOR);
    let force = REPULSION_K * weight / (distance * distance);
    away_unit(me, other, true_distance).scaled(force)
}

/// Ultrasonic ring check: 8 sensors at 45° spacing, each with a 37°
/// half-cone. Returns the override force and the true breach distance.
///
/// A contact with no horizontal offset (directly above/below) has no
/// defined bearing and is treated as covered — the override then acts
/// along the vertical separation.
fn ultrasonic_override(me: &Position, other: &Position) -> Option<(Correction, f64)> {
    let true_distance = me.range_to(other);
    if true_distance >= ULTRA_BUBBLE || true_distance < MIN_DISTANCE_FLOOR {
        return None;
    }
    if me.horizontal_range_to(other) >= MIN_DISTANCE_FLOOR {
        let bearing_deg = me.bearing_to(other).to_degrees();
        let boresight = (bearing_deg / ULTRA_SENSOR_SPACING_DEG).round() * ULTRA_SENSOR_SPACING_DEG;
        if (bearing_deg - boresight).abs() > ULTRA_HALF_CONE_DEG {
            return None;
        }
    }
    let distance = true_distance.max(MIN_DISTANCE_FLOOR);
    let force = ULTRA_REPULSION_K / (distance * distance);
    Some((away_unit(me, other, true_distance).scaled(force), true_distance))
}

/// True separation unit vector pointing away from the contact.
fn away_unit(me: &Position, other: &Position, true_distance: f64) -> Correction {
    Correction::new(
        (me.x - other.x) / true_distance,
        (me.y - other.y) / true_distance,
        (me.z - other.z) / true_distance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn clear_plan() -> SensingPlan {
        sensing::plan(&Environment::default())
    }

    #[test]
    fn test_single_unit_no_correction() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut events = Vec::new();
        let positions = [Position::new(0.0, 0.0, 10.0)];
        let c = avoidance_for(
            0,
            0,
            &positions,
            &[],
            &clear_plan(),
            &Environment::default(),
            &mut rng,
            &mut events,
        );
        assert_eq!(c, Correction::ZERO);
        assert!(events.is_empty());
    }

    #[test]
    fn test_coincident_units_finite_zero() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut events = Vec::new();
        let p = Position::new(5.0, 5.0, 20.0);
        let positions = [p, p, p];
        for slot in 0..3 {
            let c = avoidance_for(
                slot,
                slot,
                &positions,
                &[],
                &clear_plan(),
                &Environment::default(),
                &mut rng,
                &mut events,
            );
            assert!(c.is_finite());
            assert_eq!(c, Correction::ZERO);
        }
    }

    #[test]
    fn test_repulsion_points_away() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut events = Vec::new();
        // Peer 6 m due East; well inside the clear-air bubble.
        let positions = [
            Position::new(0.0, 0.0, 10.0),
            Position::new(6.0, 0.0, 10.0),
        ];
        let c = avoidance_for(
            0,
            0,
            &positions,
            &[],
            &clear_plan(),
            &Environment::default(),
            &mut rng,
            &mut events,
        );
        assert!(c.x < 0.0, "Unit should be pushed West, got {c:?}");
        assert!(c.y.abs() < 1e-9);
    }

    #[test]
    fn test_ultrasonic_floor_fires_under_three_meters() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut events = Vec::new();
        let positions = [
            Position::new(0.0, 0.0, 10.0),
            Position::new(2.0, 0.0, 10.0),
        ];
        let c = avoidance_for(
            0,
            0,
            &positions,
            &[],
            &clear_plan(),
            &Environment::default(),
            &mut rng,
            &mut events,
        );
        assert!(c.magnitude() > 0.0);
        assert!(c.x < 0.0);
        assert!(
            events
                .iter()
                .any(|e| matches!(e, FleetEvent::ProximityAlert { unit: 0, .. })),
            "breach should raise a proximity alert"
        );
    }

    #[test]
    fn test_overhead_contact_repelled_vertically() {
        let peer_below = Position::new(0.0, 0.0, 8.0);
        let me = Position::new(0.0, 0.0, 10.0);
        let (force, distance) = ultrasonic_override(&me, &peer_below).unwrap();
        assert!((distance - 2.0).abs() < 1e-12);
        assert!(force.z > 0.0, "should push up and away, got {force:?}");
        assert!(force.x.abs() < 1e-9 && force.y.abs() < 1e-9);
    }

    #[test]
    fn test_combined_vector_clamped() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let mut events = Vec::new();
        // Dense cluster: several peers and a human obstacle within 2 m.
        let positions = [
            Position::new(0.0, 0.0, 10.0),
            Position::new(1.0, 0.0, 10.0),
            Position::new(0.0, 1.2, 10.0),
            Position::new(-0.8, -0.5, 10.0),
        ];
        let obstacles = [Obstacle::human(0.5, 0.5, 10.0)];
        let plan = clear_plan();
        let c = avoidance_for(
            0,
            0,
            &positions,
            &obstacles,
            &plan,
            &Environment::default(),
            &mut rng,
            &mut events,
        );
        let cap = DEFLECTION_CAP * plan.confidence;
        assert!(
            c.magnitude() <= cap + 1e-9,
            "magnitude {} exceeds cap {cap}",
            c.magnitude()
        );
        assert!(c.is_finite());
    }

    #[test]
    fn test_human_obstacle_weighted() {
        assert_eq!(
            priority_weight(ObstacleClass::Human, SensorKind::Thermal),
            HUMAN_PRIORITY_THERMAL
        );
        assert_eq!(
            priority_weight(ObstacleClass::Human, SensorKind::Lidar),
            HUMAN_PRIORITY
        );
        assert_eq!(priority_weight(ObstacleClass::Static, SensorKind::Thermal), 1.0);
    }
}
