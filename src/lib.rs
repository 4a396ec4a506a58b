//! # Swarm core
//!
//! This crate is the real-time flight coordination core of a multi-quadrotor swarm driven
//! by an external optical motion-capture tracker. For each tracker frame it matches
//! markers to known agents, pushes the fused position back to each vehicle, evaluates
//! each agent's per-mode control law, and emits one low-level command to each vehicle —
//! all within the inter-frame budget.
//!
//! ## Status
//!
//! | Component | Support |
//! |-----------|---------|
//! | Tracker matcher | Full |
//! | Mode state machine | Full |
//! | Avoidance field | Full |
//! | Consensus laws (z, xy) | Full |
//! | Thrust PID / yaw-rate | Full |
//! | Real-time tick / overrun | Full |
//! | Safety monitor | Full |
//! | Tracker transport | Out of scope (see [marker]) |
//! | Vehicle radio link | Out of scope (see [link]) |
//! | Joystick device | Out of scope (see [joystick]) |
//!
//! ## Usage
//!
//! The basic procedure to use the crate is:
//!  - Build one [agent::Agent] per vehicle from its [agent::AgentConfig].
//!  - Create a [swarm::Swarm], add each agent together with its [link::VehicleLink]
//!    implementation.
//!  - Feed tracker frames to a [tick::TickDriver] running [swarm::Swarm::dispatch_tick].
//!  - Issue operator commands (`command_takeoff`, `command_land`, ...) as they arrive.
//!
//! All of the control laws in [control] and [subsystems] are plain functions of their
//! inputs, so they can be exercised directly without a running swarm.

pub mod agent;
pub mod control;
pub mod error;
pub mod geometry;
pub mod joystick;
pub mod link;
pub mod marker;
pub mod params_file;
pub mod subsystems;
pub mod swarm;
pub mod telemetry;
pub mod tick;

pub use crate::error::{Error, Result};
pub use crate::swarm::Swarm;
