//! Per-vehicle agent state: configuration, live telemetry, mode and controller memory.

use std::collections::HashSet;

use crate::geometry::Point3;

/// Flight mode of a single agent. `NotFlying` is the initial state and, once re-entered,
/// absorbing: an agent may transition into it from any other state but never back out
/// during the same run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    NotFlying,
    Standby,
    Takeoff,
    Land,
    Manual,
    ZConsensus,
    XyConsensus,
    BackToInit,
}

impl Mode {
    pub fn is_in_flight(&self) -> bool {
        *self != Mode::NotFlying
    }
}

/// Static, operator-provided configuration for one agent.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub name: String,
    pub link_address: String,
    pub max_roll_deg: f64,
    pub max_pitch_deg: f64,
    pub position_min: Point3,
    pub position_max: Point3,
    pub takeoff_height: f64,
    pub initial_position: Point3,
    /// Names of peers this agent runs consensus against.
    pub consensus_connectivity: HashSet<String>,
    /// Formation offset used in xy-consensus: (r, rho).
    pub xy_formation_offset: (f64, f64),
    /// Names of peers this agent must avoid (standby / back-to-init AVOID field).
    pub peers_to_avoid: HashSet<String>,
    pub manual: bool,
    pub enabled: bool,
}

impl AgentConfig {
    /// `true` if `name` never appears as one of its own peers — the swarm-wide invariant
    /// that `consensus_connectivity` never contains the agent's own name.
    pub fn is_well_formed(&self) -> bool {
        !self.consensus_connectivity.contains(&self.name)
    }
}

/// Anchors captured at mode-entry time and reused by position-tracking control laws.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anchors {
    pub takeoff: Point3,
    pub land: Point3,
    pub standby: Point3,
    /// (x, y) captured on entry into z-consensus.
    pub z_consensus_xy: (f64, f64),
    /// z captured on entry into xy-consensus.
    pub xy_consensus_z: f64,
    pub land_yaw_deg: f64,
    pub takeoff_yaw_deg: f64,
}

/// Controller memory carried across ticks.
#[derive(Debug, Clone, Copy, Default)]
pub struct ControllerState {
    pub previous_integral_z: f64,
}

/// Live, per-tick telemetry for one agent.
#[derive(Debug, Clone, Copy)]
pub struct LiveState {
    pub position: Point3,
    pub velocity: Point3,
    pub yaw_deg: f64,
    pub marker_id: Option<u32>,
    pub last_timestamp_us: Option<u64>,
    pub dt_s: f64,
}

impl Default for LiveState {
    fn default() -> Self {
        LiveState {
            position: Point3::default(),
            velocity: Point3::default(),
            yaw_deg: 0.0,
            marker_id: None,
            last_timestamp_us: None,
            dt_s: 0.0,
        }
    }
}

/// One vehicle: configuration, live state, mode and controller memory, owned by the
/// supervisor.
#[derive(Debug, Clone)]
pub struct Agent {
    pub config: AgentConfig,
    pub live: LiveState,
    pub mode: Mode,
    pub anchors: Anchors,
    pub controller: ControllerState,
    pub is_flying: bool,
    pub battery_ok: bool,
    pub position_ok: bool,
    pub setup_finished: bool,
    pub error: Option<String>,
}

impl Agent {
    pub fn new(config: AgentConfig) -> Self {
        Agent {
            config,
            live: LiveState::default(),
            mode: Mode::NotFlying,
            anchors: Anchors::default(),
            controller: ControllerState::default(),
            is_flying: false,
            battery_ok: false,
            position_ok: false,
            setup_finished: false,
            error: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Applies a new position sample. Rejects (returns `false`) a timestamp that is not
    /// strictly greater than the last accepted one; the caller treats that as fatal for
    /// this agent.
    pub fn update_position(&mut self, timestamp_us: u64, marker_id: u32, position: Point3) -> bool {
        if let Some(last) = self.live.last_timestamp_us {
            if timestamp_us <= last {
                return false;
            }
        }
        let dt_s = match self.live.last_timestamp_us {
            Some(last) => (timestamp_us - last) as f64 / 1_000_000.0,
            None => 0.0,
        };
        let velocity = if dt_s > 0.0 {
            Point3::new(
                (position.x - self.live.position.x) / dt_s,
                (position.y - self.live.position.y) / dt_s,
                (position.z - self.live.position.z) / dt_s,
            )
        } else {
            Point3::default()
        };
        self.live.velocity = velocity;
        self.live.position = position;
        self.live.marker_id = Some(marker_id);
        self.live.last_timestamp_us = Some(timestamp_us);
        self.live.dt_s = dt_s;
        true
    }

    /// Latches a failure reason and transitions into the absorbing `NotFlying` mode.
    pub fn fail(&mut self, reason: impl Into<String>) {
        self.error = Some(reason.into());
        self.mode = Mode::NotFlying;
        self.is_flying = false;
    }

    pub fn ready(&self) -> bool {
        self.battery_ok && self.position_ok
    }
}
