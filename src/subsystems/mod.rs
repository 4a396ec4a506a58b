//! # Control subsystems
//!
//! The control loop is organized in logical subsystems, each with one role. Tracking
//! resolves markers to agents; avoidance, consensus, pid and yaw implement the control
//! laws dispatched per agent mode; safety watches attitude telemetry independently of the
//! tick; commander is the thin wrapper around a [crate::link::VehicleLink] that turns a
//! computed setpoint into an outbound call.
//!
//! Modules here are the main way the supervisor and the tick driver interact with an
//! agent's control law and its vehicle.

pub mod avoidance;
pub mod commander;
pub mod consensus;
pub mod pid;
pub mod safety;
pub mod tracking;
pub mod yaw;
