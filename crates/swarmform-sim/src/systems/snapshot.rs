//! Snapshot builder: assembles the FleetSnapshot published after each tick.

use hecs::World;

use swarmform_core::components::{TargetPosition, TrailHistory, UnitId};
use swarmform_core::enums::Formation;
use swarmform_core::environment::Environment;
use swarmform_core::events::FleetEvent;
use swarmform_core::state::{EnvironmentView, FleetSnapshot, SensingView, UnitView};
use swarmform_core::types::SimTime;

use super::sensing::SensingPlan;

/// Build the complete fleet snapshot from the world.
pub fn build(
    world: &World,
    time: &SimTime,
    formation: Option<Formation>,
    env: &Environment,
    plan: &SensingPlan,
    events: Vec<FleetEvent>,
) -> FleetSnapshot {
    let mut units: Vec<UnitView> = world
        .query::<(&UnitId, &swarmform_core::types::Position, &TargetPosition, &TrailHistory)>()
        .iter()
        .map(|(_entity, (unit, pos, target, trail))| UnitView {
            unit_id: unit.index,
            position: *pos,
            target: target.position,
            distance_to_target: pos.range_to(&target.position),
            trail: trail.positions.clone(),
        })
        .collect();
    units.sort_by_key(|view| view.unit_id);

    FleetSnapshot {
        time: *time,
        formation,
        units,
        environment: EnvironmentView {
            wind_speed_kmh: env.wind_speed_kmh(),
            wind_dir_deg: env.wind_dir_deg(),
            rain_mm_h: env.rain_mm_h(),
            fog_density: env.fog_density(),
            light_lux: env.light_lux(),
        },
        sensing: SensingView {
            primary: plan.primary,
            effective_range: plan.effective_range,
            safety_margin: plan.safety_margin,
            confidence: plan.confidence,
        },
        events,
    }
}
