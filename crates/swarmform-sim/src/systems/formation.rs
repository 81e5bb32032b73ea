//! Formation generator.
//!
//! Maps a named formation plus a center point to per-unit targets using
//! closed-form geometry. Every layout is a pure function of
//! (formation, index, fleet_size, center): same inputs, same target,
//! no randomness.

use hecs::World;

use swarmform_core::components::{TargetPosition, UnitId};
use swarmform_core::constants::*;
use swarmform_core::enums::Formation;
use swarmform_core::types::Position;

/// Write targets for the whole fleet.
///
/// A `None` from `target_for` means the unit holds its previous target
/// (trinity only places the first three units).
pub fn run(world: &mut World, formation: Formation, center: Position) {
    let fleet_size = world.query_mut::<&UnitId>().into_iter().count();

    for (_entity, (unit, target)) in world.query_mut::<(&UnitId, &mut TargetPosition)>() {
        if let Some(position) = target_for(formation, unit.index, fleet_size, center) {
            target.position = position;
        }
    }
}

/// Closed-form target for one unit, or `None` to hold the previous target.
pub fn target_for(
    formation: Formation,
    index: usize,
    fleet_size: usize,
    center: Position,
) -> Option<Position> {
    match formation {
        Formation::Trinity => trinity(index, center),
        Formation::Circle => Some(circle(index, fleet_size, center)),
        Formation::Spiral => Some(spiral(index, fleet_size, center)),
        Formation::Heart => Some(heart(index, fleet_size, center)),
        Formation::HexLattice => Some(hex_lattice(index, fleet_size, center)),
        Formation::VWedge => Some(v_wedge(index, center)),
        Formation::Diamond => Some(diamond(index, center)),
        Formation::Starburst => Some(starburst(index, center)),
        Formation::Helix => Some(helix(index, center)),
        Formation::LatticeWeave => Some(lattice_weave(index, fleet_size, center)),
    }
}

/// 3-unit equilateral triangle at 0°/120°/240°; extra units hold station.
fn trinity(index: usize, center: Position) -> Option<Position> {
    if index >= 3 {
        return None;
    }
    let angle = (120.0 * index as f64).to_radians();
    Some(Position::new(
        center.x + TRINITY_RADIUS * angle.cos(),
        center.y + TRINITY_RADIUS * angle.sin(),
        center.z + TRINITY_ALTITUDE,
    ))
}

/// Evenly spaced circle: angle(i) = 2πi / fleet_size.
fn circle(index: usize, fleet_size: usize, center: Position) -> Position {
    let angle = std::f64::consts::TAU * index as f64 / fleet_size as f64;
    Position::new(
        center.x + CIRCLE_RADIUS * angle.cos(),
        center.y + CIRCLE_RADIUS * angle.sin(),
        center.z + CIRCLE_ALTITUDE,
    )
}

/// Logarithmic spiral: 5 turns out to the max radius, linear climb.
fn spiral(index: usize, fleet_size: usize, center: Position) -> Position {
    let frac = index as f64 / fleet_size as f64;
    let theta = SPIRAL_TURNS * std::f64::consts::TAU * frac;
    let radius = SPIRAL_MAX_RADIUS * frac;
    Position::new(
        center.x + radius * theta.cos(),
        center.y + radius * theta.sin(),
        center.z + SPIRAL_BASE_ALTITUDE + index as f64 * SPIRAL_CLIMB_PER_UNIT,
    )
}

/// Parametric heart curve: 16sin³t / 13cos t − 5cos 2t − 2cos 3t − cos 4t.
fn heart(index: usize, fleet_size: usize, center: Position) -> Position {
    let t = std::f64::consts::TAU * index as f64 / fleet_size as f64;
    let x = HEART_SCALE * 16.0 * t.sin().powi(3);
    let y = HEART_SCALE
        * (13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
    Position::new(center.x + x, center.y + y, center.z + HEART_ALTITUDE)
}

/// Hexagonal grid: ⌊√fleet_size⌋+1 columns, odd rows offset by half a cell.
fn hex_lattice(index: usize, fleet_size: usize, center: Position) -> Position {
    let cols = (fleet_size as f64).sqrt() as usize + 1;
    let row = index / cols;
    let col = index % cols;
    let offset = (row % 2) as f64 * HEX_SPACING / 2.0;
    Position::new(
        center.x + col as f64 * HEX_SPACING + offset,
        center.y + row as f64 * HEX_SPACING * 3.0_f64.sqrt() / 2.0,
        center.z + HEX_ALTITUDE,
    )
}

/// V-wedge: apex at center, rows trailing back along two arms.
fn v_wedge(index: usize, center: Position) -> Position {
    if index == 0 {
        return Position::new(center.x, center.y, center.z + WEDGE_ALTITUDE);
    }
    let row = (index + 1) / 2;
    let side = if index % 2 == 1 { 1.0 } else { -1.0 };
    let lateral = WEDGE_HALF_ANGLE_DEG.to_radians().tan();
    Position::new(
        center.x - row as f64 * WEDGE_SPACING,
        center.y + side * row as f64 * WEDGE_SPACING * lateral,
        center.z + WEDGE_ALTITUDE,
    )
}

/// Concentric octagonal rings, 8 units per ring, alternate rings staggered.
fn diamond(index: usize, center: Position) -> Position {
    if index == 0 {
        return Position::new(center.x, center.y, center.z + DIAMOND_ALTITUDE);
    }
    let ring = (index - 1) / 8 + 1;
    let slot = (index - 1) % 8;
    let stagger = if ring % 2 == 0 { 22.5 } else { 0.0 };
    let angle = (slot as f64 * 45.0 + stagger).to_radians();
    let radius = ring as f64 * DIAMOND_RING_SPACING;
    Position::new(
        center.x + radius * angle.cos(),
        center.y + radius * angle.sin(),
        center.z + DIAMOND_ALTITUDE,
    )
}

/// Radial arms: units step outward along STARBURST_ARMS evenly spread arms.
fn starburst(index: usize, center: Position) -> Position {
    let arm = index % STARBURST_ARMS;
    let step = (index / STARBURST_ARMS + 1) as f64;
    let angle = (arm as f64 * 360.0 / STARBURST_ARMS as f64).to_radians();
    Position::new(
        center.x + step * STARBURST_STEP * angle.cos(),
        center.y + step * STARBURST_STEP * angle.sin(),
        center.z + STARBURST_ALTITUDE,
    )
}

/// Vertical helix: fixed radius, 8 units per turn, constant climb.
fn helix(index: usize, center: Position) -> Position {
    let angle = std::f64::consts::TAU * index as f64 / HELIX_UNITS_PER_TURN as f64;
    Position::new(
        center.x + HELIX_RADIUS * angle.cos(),
        center.y + HELIX_RADIUS * angle.sin(),
        center.z + HELIX_BASE_ALTITUDE + index as f64 * HELIX_CLIMB_PER_UNIT,
    )
}

/// Staggered grid with a 2-meter altitude weave on alternating cells.
fn lattice_weave(index: usize, fleet_size: usize, center: Position) -> Position {
    let cols = (fleet_size as f64).sqrt().ceil().max(1.0) as usize;
    let row = index / cols;
    let col = index % cols;
    let stagger = (row % 2) as f64 * WEAVE_SPACING / 2.0;
    let weave = ((row + col) % 2) as f64 * WEAVE_ALTITUDE_STAGGER;
    Position::new(
        center.x + col as f64 * WEAVE_SPACING + stagger,
        center.y + row as f64 * WEAVE_SPACING,
        center.z + WEAVE_ALTITUDE + weave,
    )
}
