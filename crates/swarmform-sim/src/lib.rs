//! Swarm formation controller engine.
//!
//! Owns the hecs ECS world, runs the control systems at a fixed 42 Hz
//! tick rate, and produces FleetSnapshots for mission logic.

pub mod engine;
pub mod fleet;
pub mod runner;
pub mod systems;

pub use engine::{SwarmConfig, SwarmEngine};
pub use runner::{FleetRunner, NoObstacles, ObstacleSource, RunnerCommand};
pub use swarmform_core;
