//! Real-time loop harness.
//!
//! Runs a `SwarmEngine` at the fixed 42 Hz control rate on a background
//! thread. Commands arrive over an mpsc channel and are drained at each
//! tick boundary; obstacle snapshots come from an injected
//! `ObstacleSource`; the latest fleet snapshot is shared behind a mutex.
//! Halting takes effect between ticks — no tick is ever partially applied.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::trace;

use swarmform_core::commands::FleetCommand;
use swarmform_core::constants::TICK_RATE;
use swarmform_core::obstacle::Obstacle;
use swarmform_core::state::FleetSnapshot;

use crate::engine::{SwarmConfig, SwarmEngine};

/// Per-tick obstacle feed, injected by a test harness or a real
/// perception pipeline.
pub trait ObstacleSource: Send {
    /// Produce the obstacle snapshot for the next tick.
    fn next_obstacles(&mut self) -> Vec<Obstacle>;
}

impl<F> ObstacleSource for F
where
    F: FnMut() -> Vec<Obstacle> + Send,
{
    fn next_obstacles(&mut self) -> Vec<Obstacle> {
        self()
    }
}

/// Obstacle source for clear airspace.
pub struct NoObstacles;

impl ObstacleSource for NoObstacles {
    fn next_obstacles(&mut self) -> Vec<Obstacle> {
        Vec::new()
    }
}

/// Commands accepted by the runner thread.
#[derive(Debug)]
pub enum RunnerCommand {
    /// Forward a controller command to the engine.
    Fleet(FleetCommand),
    /// Stop ticking; the engine state is frozen between ticks.
    Halt,
    /// Resume ticking.
    Resume,
    /// Terminate the loop thread.
    Shutdown,
}

/// Handle to a running control loop.
pub struct FleetRunner {
    command_tx: mpsc::Sender<RunnerCommand>,
    snapshot: Arc<Mutex<FleetSnapshot>>,
    handle: Option<JoinHandle<()>>,
}

impl FleetRunner {
    /// Start the control loop on a background thread.
    pub fn start(config: SwarmConfig, source: impl ObstacleSource + 'static) -> FleetRunner {
        let (tx, rx) = mpsc::channel();
        let snapshot = Arc::new(Mutex::new(FleetSnapshot::default()));
        let shared = Arc::clone(&snapshot);

        let handle = thread::spawn(move || {
            run_loop(rx, shared, config, source);
        });

        FleetRunner {
            command_tx: tx,
            snapshot,
            handle: Some(handle),
        }
    }

    /// Send a command to the loop; dropped silently if the loop is gone.
    pub fn send(&self, command: RunnerCommand) {
        self.command_tx.send(command).ok();
    }

    /// Clone of the most recent fleet snapshot.
    pub fn latest_snapshot(&self) -> FleetSnapshot {
        self.snapshot
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Shut the loop down and wait for the thread to exit.
    pub fn shutdown(mut self) {
        self.command_tx.send(RunnerCommand::Shutdown).ok();
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

impl Drop for FleetRunner {
    fn drop(&mut self) {
        self.command_tx.send(RunnerCommand::Shutdown).ok();
        if let Some(handle) = self.handle.take() {
            handle.join().ok();
        }
    }
}

fn run_loop(
    rx: mpsc::Receiver<RunnerCommand>,
    snapshot: Arc<Mutex<FleetSnapshot>>,
    config: SwarmConfig,
    mut source: impl ObstacleSource,
) {
    let mut engine = SwarmEngine::new(config);
    let tick_duration = Duration::from_secs_f64(1.0 / TICK_RATE as f64);
    let mut halted = false;

    loop {
        let start = Instant::now();

        // Drain all pending commands at the tick boundary.
        while let Ok(command) = rx.try_recv() {
            match command {
                RunnerCommand::Fleet(cmd) => engine.queue_command(cmd),
                RunnerCommand::Halt => halted = true,
                RunnerCommand::Resume => halted = false,
                RunnerCommand::Shutdown => return,
            }
        }

        if !halted {
            let obstacles = source.next_obstacles();
            let snap = engine.tick(&obstacles);
            trace!(tick = snap.time.tick, "tick complete");
            if let Ok(mut guard) = snapshot.lock() {
                *guard = snap;
            }
        }

        let elapsed = start.elapsed();
        if elapsed < tick_duration {
            thread::sleep(tick_duration - elapsed);
        }
    }
}
