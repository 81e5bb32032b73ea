//! Controller engine — the core of the swarm.
//!
//! `SwarmEngine` owns the hecs ECS world, processes fleet commands, runs
//! all systems once per tick, and produces `FleetSnapshot`s. Completely
//! headless (no transport dependency), enabling deterministic testing.

use std::collections::VecDeque;

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use swarmform_core::commands::FleetCommand;
#[cfg(test)]
use swarmform_core::components::{TargetPosition, UnitId};
use swarmform_core::constants::DEFAULT_FLEET_SIZE;
use swarmform_core::enums::{Formation, SensorKind};
use swarmform_core::environment::Environment;
use swarmform_core::error::SwarmError;
use swarmform_core::events::FleetEvent;
use swarmform_core::obstacle::Obstacle;
use swarmform_core::state::{FleetSnapshot, UnitView};
use swarmform_core::types::{Position, SimTime};

use crate::fleet;
use crate::systems;

/// Configuration for constructing a controller.
pub struct SwarmConfig {
    /// Number of units; immutable after construction.
    pub fleet_size: usize,
    /// RNG seed for determinism. Same seed = same sensor noise stream.
    pub seed: u64,
}

impl Default for SwarmConfig {
    fn default() -> Self {
        Self {
            fleet_size: DEFAULT_FLEET_SIZE,
            seed: 42,
        }
    }
}

/// The swarm controller. Owns the ECS world and all control state.
pub struct SwarmEngine {
    world: World,
    time: SimTime,
    fleet_size: usize,
    formation: Option<Formation>,
    environment: Environment,
    rng: ChaCha8Rng,
    command_queue: VecDeque<FleetCommand>,
    events: Vec<FleetEvent>,
    last_primary: Option<SensorKind>,
}

impl SwarmEngine {
    /// Create a controller and spawn its fleet.
    pub fn new(config: SwarmConfig) -> Self {
        let mut world = World::new();
        fleet::spawn_fleet(&mut world, config.fleet_size);
        Self {
            world,
            time: SimTime::default(),
            fleet_size: config.fleet_size,
            formation: None,
            environment: Environment::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            events: Vec::new(),
            last_primary: None,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: FleetCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = FleetCommand>) {
        self.command_queue.extend(commands);
    }

    /// Deploy a formation by wire name. An unrecognized name is reported
    /// to the caller and leaves every target unchanged.
    pub fn deploy_formation_named(
        &mut self,
        name: &str,
        center: Position,
    ) -> Result<(), SwarmError> {
        let formation = Formation::parse(name)?;
        self.deploy_formation(formation, center);
        Ok(())
    }

    /// Deploy a parsed formation around a center point.
    pub fn deploy_formation(&mut self, formation: Formation, center: Position) {
        systems::formation::run(&mut self.world, formation, center);
        self.formation = Some(formation);
        self.events.push(FleetEvent::FormationDeployed { formation });
        debug!(formation = formation.name(), "formation deployed");
    }

    /// Update the environment snapshot; out-of-range inputs are clamped.
    pub fn set_environment(
        &mut self,
        wind_speed_kmh: f64,
        wind_dir_deg: f64,
        rain_mm_h: f64,
        fog_density: f64,
        light_lux: f64,
    ) {
        self.environment
            .set(wind_speed_kmh, wind_dir_deg, rain_mm_h, fog_density, light_lux);
    }

    /// Advance the controller by one tick against the supplied obstacle
    /// snapshot and return the resulting fleet snapshot. The obstacle
    /// list is valid for exactly this tick and is not retained.
    pub fn tick(&mut self, obstacles: &[Obstacle]) -> FleetSnapshot {
        self.process_commands();

        let plan = systems::sensing::plan(&self.environment);
        if let Some(previous) = self.last_primary {
            if previous != plan.primary {
                self.events.push(FleetEvent::PrimarySensorChanged {
                    from: previous,
                    to: plan.primary,
                });
                debug!(from = ?previous, to = ?plan.primary, "primary sensor switched");
            }
        }
        self.last_primary = Some(plan.primary);

        systems::movement::run(
            &mut self.world,
            obstacles,
            &plan,
            &self.environment,
            &mut self.rng,
            &mut self.events,
        );
        self.time.advance();
        systems::movement::update_trails(&mut self.world, self.time.tick);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build(
            &self.world,
            &self.time,
            self.formation,
            &self.environment,
            &plan,
            events,
        )
    }

    /// Per-unit telemetry without advancing the controller.
    pub fn telemetry(&self) -> Vec<UnitView> {
        let plan = systems::sensing::plan(&self.environment);
        systems::snapshot::build(
            &self.world,
            &self.time,
            self.formation,
            &self.environment,
            &plan,
            Vec::new(),
        )
        .units
    }

    /// Get the current control time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Fleet size fixed at construction.
    pub fn fleet_size(&self) -> usize {
        self.fleet_size
    }

    /// Active formation, if one has been deployed.
    pub fn formation(&self) -> Option<Formation> {
        self.formation
    }

    /// Current environment snapshot.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Teleport a unit and hold station there (for tests).
    #[cfg(test)]
    pub fn place_unit(&mut self, index: usize, position: Position) {
        for (_entity, (unit, pos, target)) in self
            .world
            .query_mut::<(&UnitId, &mut Position, &mut TargetPosition)>()
        {
            if unit.index == index {
                *pos = position;
                target.position = position;
            }
        }
    }

    /// Current position of a unit (for tests).
    #[cfg(test)]
    pub fn unit_position(&self, index: usize) -> Option<Position> {
        self.world
            .query::<(&UnitId, &Position)>()
            .iter()
            .find(|(_, (unit, _))| unit.index == index)
            .map(|(_, (_, pos))| *pos)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                FleetCommand::SetFormation { formation, center } => {
                    self.deploy_formation(formation, center);
                }
                FleetCommand::SetEnvironment {
                    wind_speed_kmh,
                    wind_dir_deg,
                    rain_mm_h,
                    fog_density,
                    light_lux,
                } => {
                    self.set_environment(
                        wind_speed_kmh,
                        wind_dir_deg,
                        rain_mm_h,
                        fog_density,
                        light_lux,
                    );
                }
            }
        }
    }
}
