//! Control-loop systems, run in a fixed order each tick by the engine.

pub mod avoidance;
pub mod disturbance;
pub mod formation;
pub mod movement;
pub mod sensing;
pub mod snapshot;
