//! Core types and definitions for the swarm formation controller.
//!
//! This crate defines the vocabulary shared across the workspace:
//! geometric types, components, commands, snapshots, events, environment
//! state, and constants. It has no dependency on the ECS or any runtime.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod environment;
pub mod error;
pub mod events;
pub mod obstacle;
pub mod state;
pub mod types;
