//! Fleet spawn factory.

use hecs::World;

use swarmform_core::components::{TargetPosition, TrailHistory, UnitId};
use swarmform_core::types::Position;

/// Staging line spacing (meters). Wider than every sensor's nominal range
/// so a freshly spawned fleet starts with zero mutual repulsion.
const STAGING_SPACING: f64 = 60.0;

/// Spawn the fleet on a staging line along the x axis. Each unit's initial
/// target is its own staging position, so the fleet holds station until a
/// formation is deployed.
pub fn spawn_fleet(world: &mut World, fleet_size: usize) {
    for index in 0..fleet_size {
        let position = staging_position(index);
        world.spawn((
            UnitId { index },
            position,
            TargetPosition { position },
            TrailHistory::default(),
        ));
    }
}

/// Deterministic launch position for a fleet index.
pub fn staging_position(index: usize) -> Position {
    Position::new(index as f64 * STAGING_SPACING, 0.0, 0.0)
}
