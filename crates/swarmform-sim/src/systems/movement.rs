//! Integrator: combines target-seeking, avoidance, and disturbance
//! compensation into one position update per unit per tick.
//!
//! Two phases with a barrier between them: every unit's correction is
//! computed from a single consistent snapshot of start-of-tick positions,
//! then all positions are written. No unit ever reads a peer's
//! already-updated position within a tick.

use std::collections::HashMap;

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use swarmform_core::components::{TargetPosition, TrailHistory, UnitId};
use swarmform_core::constants::*;
use swarmform_core::environment::Environment;
use swarmform_core::events::FleetEvent;
use swarmform_core::obstacle::Obstacle;
use swarmform_core::types::{Correction, Position};

use super::{avoidance, disturbance, sensing::SensingPlan};

/// Run one integration step for the whole fleet.
pub fn run(
    world: &mut World,
    obstacles: &[Obstacle],
    plan: &SensingPlan,
    env: &Environment,
    rng: &mut ChaCha8Rng,
    events: &mut Vec<FleetEvent>,
) {
    // Phase 1: consistent snapshot, ordered by fleet index so the rng
    // stream (and therefore the whole tick) is deterministic.
    let mut units: Vec<(Entity, usize, Position, Position)> = world
        .query_mut::<(&UnitId, &Position, &TargetPosition)>()
        .into_iter()
        .map(|(entity, (unit, pos, target))| (entity, unit.index, *pos, target.position))
        .collect();
    units.sort_by_key(|(_, index, _, _)| *index);

    if units.is_empty() {
        return;
    }

    let positions: Vec<Position> = units.iter().map(|(_, _, pos, _)| *pos).collect();
    let centroid = centroid_of(&positions);
    let tighten = env.formation_tighten();

    // Disturbance terms are fleet-wide for the tick.
    let wind = disturbance::wind_counter(env, rng);
    let climb = disturbance::rain_climb(env);

    // Phase 2: compute every correction against the snapshot.
    let mut next: HashMap<Entity, Position> = HashMap::with_capacity(units.len());
    for (slot, (entity, index, pos, target)) in units.iter().enumerate() {
        let avoid = avoidance::avoidance_for(
            slot, *index, &positions, obstacles, plan, env, rng, events,
        );

        // Rain tightening pulls the effective target toward the swarm
        // centroid for stability at high intensity.
        let effective_target = Position::new(
            target.x + (centroid.x - target.x) * tighten,
            target.y + (centroid.y - target.y) * tighten,
            target.z + (centroid.z - target.z) * tighten,
        );

        let mut total = Correction::new(
            (effective_target.x - pos.x) * TARGET_GAIN,
            (effective_target.y - pos.y) * TARGET_GAIN,
            (effective_target.z - pos.z) * TARGET_GAIN,
        );
        total.add(&avoid);
        total.add(&wind);
        total.add(&climb);

        debug_assert!(total.is_finite(), "non-finite correction for unit {index}");
        next.insert(*entity, pos.offset_by(&total));
    }

    // Phase 3: commit all positions at once.
    for (entity, pos) in world.query_mut::<&mut Position>() {
        if let Some(updated) = next.get(&entity) {
            *pos = *updated;
        }
    }
}

/// Record telemetry trails, one sample every TRAIL_INTERVAL ticks.
pub fn update_trails(world: &mut World, current_tick: u64) {
    if current_tick == 0 || current_tick % TRAIL_INTERVAL as u64 != 0 {
        return;
    }

    for (_entity, (pos, trail)) in world.query_mut::<(&Position, &mut TrailHistory)>() {
        trail.positions.insert(0, *pos);
        trail.positions.truncate(MAX_TRAIL_POSITIONS);
    }
}

/// Mean position of the fleet. Callers guard the empty case.
fn centroid_of(positions: &[Position]) -> Position {
    let n = positions.len() as f64;
    let mut c = Position::default();
    for p in positions {
        c.x += p.x;
        c.y += p.y;
        c.z += p.z;
    }
    Position::new(c.x / n, c.y / n, c.z / n)
}
