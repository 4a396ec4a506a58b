//! The swarm supervisor (spec §4.5): owns the agents, dispatches the per-tick mode laws,
//! maintains the readiness latch, and handles admission/removal.

use std::collections::HashMap;
use std::sync::Arc;

use crate::agent::{Agent, ControllerState, Mode};
use crate::control::{self, PeerSnapshot};
use crate::error::{Error, Result};
use crate::geometry::Point3;
use crate::joystick::ManualAxes;
use crate::link::VehicleLink;
use crate::marker::Frame;
use crate::subsystems::avoidance::Bounds;
use crate::subsystems::commander::{Commander, Setpoint};
use crate::subsystems::tracking::TrackerMatcher;

/// One setpoint emitted for one agent during a tick, paired with the agent's name for
/// logging/telemetry.
pub struct Dispatched {
    pub name: String,
    pub setpoint: Setpoint,
}

/// Holds the swarm, consumes ticks, dispatches mode laws, maintains the readiness latch.
pub struct Swarm {
    agents: HashMap<String, Agent>,
    /// Insertion order; mode dispatch within one tick follows this order (spec §5).
    order: Vec<String>,
    commanders: HashMap<String, Commander>,
    bounds: Bounds,
    pub manual: ManualAxes,
    ready_latch: bool,
    matcher: TrackerMatcher,
}

impl Swarm {
    pub fn new(bounds: Bounds) -> Self {
        Swarm {
            agents: HashMap::new(),
            order: Vec::new(),
            commanders: HashMap::new(),
            bounds,
            manual: ManualAxes::default(),
            ready_latch: false,
            matcher: TrackerMatcher::new(),
        }
    }

    /// Appends a new agent with its vehicle link. Fails if the name is already taken or
    /// if the agent's own name appears in its own connectivity set.
    pub fn add_agent(&mut self, agent: Agent, link: Arc<dyn VehicleLink>) -> Result<()> {
        if self.agents.contains_key(agent.name()) {
            return Err(Error::ConversionError(format!(
                "duplicate agent name: {}",
                agent.name()
            )));
        }
        if !agent.config.is_well_formed() {
            return Err(Error::ConversionError(format!(
                "{} lists itself as its own consensus peer",
                agent.name()
            )));
        }
        let name = agent.name().to_string();
        self.order.push(name.clone());
        self.commanders.insert(name.clone(), Commander::new(link));
        self.agents.insert(name, agent);
        Ok(())
    }

    /// Removes an agent by name from both the name list and the agent map.
    pub fn remove_agent(&mut self, name: &str) {
        self.order.retain(|n| n != name);
        self.agents.remove(name);
        self.commanders.remove(name);
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.agents.get(name)
    }

    pub fn in_flight_agents(&self) -> impl Iterator<Item = &str> {
        self.order
            .iter()
            .filter(move |n| self.agents[n.as_str()].mode.is_in_flight())
            .map(|n| n.as_str())
    }

    pub fn ready(&self) -> bool {
        self.ready_latch
    }

    /// Re-checks the readiness gate. Once every agent has `battery_ok && position_ok` the
    /// latch is set and never cleared again.
    pub fn check_readiness(&mut self) -> bool {
        if self.ready_latch {
            return true;
        }
        if self.agents.values().all(|a| a.ready()) && !self.agents.is_empty() {
            self.ready_latch = true;
        }
        self.ready_latch
    }

    // --- operator commands (spec §4.3) ---

    pub fn command_takeoff(&mut self, name: &str) {
        if let Some(agent) = self.agents.get_mut(name) {
            if agent.config.enabled && !agent.is_flying {
                agent.anchors.takeoff = Point3::new(
                    agent.live.position.x,
                    agent.live.position.y,
                    agent.config.takeoff_height,
                );
                agent.anchors.takeoff_yaw_deg = agent.live.yaw_deg;
                agent.mode = Mode::Takeoff;
                agent.is_flying = true;
            }
        }
    }

    pub fn command_land(&mut self, name: &str) {
        if let Some(agent) = self.agents.get_mut(name) {
            if matches!(
                agent.mode,
                Mode::Standby | Mode::Manual | Mode::ZConsensus | Mode::XyConsensus | Mode::BackToInit
            ) {
                agent.anchors.land = Point3::new(agent.live.position.x, agent.live.position.y, 0.0);
                agent.anchors.land_yaw_deg = agent.live.yaw_deg;
                agent.mode = Mode::Land;
            }
        }
    }

    pub fn command_standby(&mut self, name: &str) {
        self.set_flying_mode(name, Mode::Standby);
    }

    pub fn command_manual(&mut self, name: &str) {
        self.set_flying_mode(name, Mode::Manual);
    }

    pub fn command_back_to_init(&mut self, name: &str) {
        self.set_flying_mode(name, Mode::BackToInit);
    }

    pub fn command_z_consensus(&mut self, name: &str) {
        if let Some(agent) = self.agents.get_mut(name) {
            if is_reachable_from(agent.mode) {
                agent.anchors.z_consensus_xy = (agent.live.position.x, agent.live.position.y);
                agent.mode = Mode::ZConsensus;
            }
        }
    }

    pub fn command_xy_consensus(&mut self, name: &str) {
        if let Some(agent) = self.agents.get_mut(name) {
            if is_reachable_from(agent.mode) {
                agent.anchors.xy_consensus_z = agent.live.position.z;
                agent.mode = Mode::XyConsensus;
            }
        }
    }

    /// Operator emergency-stop for one agent: stops and transitions it to `NotFlying`.
    pub fn command_stop(&mut self, name: &str) {
        if let Some(agent) = self.agents.get_mut(name) {
            agent.mode = Mode::NotFlying;
            agent.is_flying = false;
        }
    }

    fn set_flying_mode(&mut self, name: &str, mode: Mode) {
        if let Some(agent) = self.agents.get_mut(name) {
            if is_reachable_from(agent.mode) {
                agent.mode = mode;
            }
        }
    }

    /// Builds peer snapshots for `names`, restricted to in-flight peers. Fails if a
    /// connectivity peer is no longer part of the swarm (the agent calling this is
    /// demoted to Standby and the error latched, per the supervisor's failure semantics).
    fn peer_snapshots(&self, names: impl Iterator<Item = impl AsRef<str>>) -> Result<Vec<PeerSnapshot>> {
        let mut out = Vec::new();
        for name in names {
            let peer = self.agents.get(name.as_ref()).ok_or_else(|| {
                Error::ControlLawFault(format!("unknown consensus peer {}", name.as_ref()))
            })?;
            out.push(PeerSnapshot {
                position: peer.live.position,
                velocity: peer.live.velocity,
                yaw_deg: peer.live.yaw_deg,
                is_flying: peer.mode.is_in_flight(),
            });
        }
        Ok(out)
    }

    fn avoid_peer_snapshots(&self, names: &std::collections::HashSet<String>) -> Vec<PeerSnapshot> {
        names
            .iter()
            .filter_map(|n| self.agents.get(n))
            .map(|peer| PeerSnapshot {
                position: peer.live.position,
                velocity: peer.live.velocity,
                yaw_deg: peer.live.yaw_deg,
                is_flying: peer.mode.is_in_flight(),
            })
            .collect()
    }

    /// Sends a stop setpoint to every agent and transitions each to `NotFlying`. Used on
    /// operator escape-key, tracker disconnect and overrun.
    pub async fn stop_all(&mut self) {
        for name in self.order.clone() {
            if let Some(commander) = self.commanders.get(&name) {
                let _ = commander.send(Setpoint::Stop).await;
            }
            if let Some(agent) = self.agents.get_mut(&name) {
                agent.mode = Mode::NotFlying;
                agent.is_flying = false;
            }
        }
    }

    /// Runs one tick: tracker update, readiness gate, mode dispatch and setpoint sends.
    ///
    /// `dt_s` is the tick period, used by the thrust PID. Returns the setpoints emitted,
    /// in dispatch order, for telemetry/testing.
    pub async fn dispatch_tick(&mut self, frame: &Frame, dt_s: f64) -> Result<Vec<Dispatched>> {
        let lost = self.matcher.track_frame(frame, &mut self.agents);

        for name in &self.order {
            let commander = &self.commanders[name];
            let agent = &self.agents[name];
            if agent.config.enabled {
                let _ = commander
                    .send_extpos(agent.live.position.x, agent.live.position.y, agent.live.position.z)
                    .await;
            }
        }

        if !self.check_readiness() {
            return Ok(Vec::new());
        }

        let manual_yaw_targets: Vec<f64> = self
            .order
            .iter()
            .filter(|n| self.agents[n.as_str()].mode == Mode::Manual)
            .map(|_| self.manual.yaw_deg)
            .collect();

        let mut dispatched = Vec::new();
        let mut pending_removals: Vec<String> = lost;
        let mut auto_transitions: Vec<(String, Mode, Option<Point3>)> = Vec::new();
        let mut controller_updates: Vec<(String, ControllerState)> = Vec::new();

        for name in self.order.clone() {
            let setpoint = {
                let agent = &self.agents[&name];
                if !agent.config.enabled || agent.mode == Mode::NotFlying {
                    Setpoint::Stop
                } else {
                    match self.compute_setpoint(
                        agent,
                        &manual_yaw_targets,
                        dt_s,
                        &mut auto_transitions,
                        &mut pending_removals,
                        &mut controller_updates,
                    ) {
                        Ok(sp) => sp,
                        Err(_) => {
                            auto_transitions.push((name.clone(), Mode::Standby, None));
                            Setpoint::VelocityWorld {
                                vx: 0.0,
                                vy: 0.0,
                                vz: 0.0,
                                yaw_rate_deg_per_s: 0.0,
                            }
                        }
                    }
                }
            };

            if let Some(commander) = self.commanders.get(&name) {
                let _ = commander.send(setpoint).await;
            }
            dispatched.push(Dispatched { name, setpoint });
        }

        for (name, mode, anchor) in auto_transitions {
            if let Some(agent) = self.agents.get_mut(&name) {
                agent.mode = mode;
                if let Some(standby_anchor) = anchor {
                    agent.anchors.standby = standby_anchor;
                }
            }
        }

        for (name, controller) in controller_updates {
            if let Some(agent) = self.agents.get_mut(&name) {
                agent.controller = controller;
            }
        }

        for name in pending_removals {
            self.remove_agent(&name);
        }

        Ok(dispatched)
    }

    fn compute_setpoint(
        &self,
        agent: &Agent,
        manual_yaw_targets: &[f64],
        dt_s: f64,
        auto_transitions: &mut Vec<(String, Mode, Option<Point3>)>,
        pending_removals: &mut Vec<String>,
        controller_updates: &mut Vec<(String, ControllerState)>,
    ) -> Result<Setpoint> {
        match agent.mode {
            Mode::NotFlying => Ok(Setpoint::Stop),
            Mode::Takeoff => {
                let (setpoint, done) = control::anchor_tracking_law(
                    agent.live.position,
                    agent.anchors.takeoff,
                    agent.anchors.takeoff_yaw_deg,
                    false,
                );
                if done {
                    let standby_anchor = Point3::new(
                        agent.live.position.x,
                        agent.live.position.y,
                        agent.config.takeoff_height,
                    );
                    auto_transitions.push((agent.name().to_string(), Mode::Standby, Some(standby_anchor)));
                }
                Ok(setpoint)
            }
            Mode::Land => {
                let (setpoint, done) = control::anchor_tracking_law(
                    agent.live.position,
                    agent.anchors.land,
                    agent.anchors.land_yaw_deg,
                    true,
                );
                if done {
                    auto_transitions.push((agent.name().to_string(), Mode::NotFlying, None));
                    pending_removals.push(agent.name().to_string());
                }
                Ok(setpoint)
            }
            Mode::Manual => Ok(control::manual_law(
                agent.live.position,
                self.manual.x,
                self.manual.y,
                self.manual.z,
                self.manual.yaw_deg,
                agent.config.position_min,
                agent.config.position_max,
            )),
            Mode::Standby => {
                let peers = self.avoid_peer_snapshots(&agent.config.peers_to_avoid);
                Ok(control::standby_like_law(
                    agent.live.position,
                    agent.anchors.standby.xy(),
                    agent.anchors.standby.z,
                    &peers,
                    &self.bounds,
                ))
            }
            Mode::BackToInit => {
                let peers = self.avoid_peer_snapshots(&agent.config.peers_to_avoid);
                Ok(control::standby_like_law(
                    agent.live.position,
                    agent.config.initial_position.xy(),
                    agent.config.takeoff_height,
                    &peers,
                    &self.bounds,
                ))
            }
            Mode::ZConsensus => {
                let peers = self.peer_snapshots(agent.config.consensus_connectivity.iter())?;
                let anchor_xy = crate::geometry::Vec2::new(
                    agent.anchors.z_consensus_xy.0,
                    agent.anchors.z_consensus_xy.1,
                );
                Ok(control::z_consensus_law(agent.live.position, anchor_xy, &peers))
            }
            Mode::XyConsensus => {
                let peers = self.peer_snapshots(agent.config.consensus_connectivity.iter())?;
                let (setpoint, controller) = control::xy_consensus_law(
                    agent,
                    agent.anchors.xy_consensus_z,
                    &peers,
                    manual_yaw_targets,
                    dt_s,
                );
                controller_updates.push((agent.name().to_string(), controller));
                Ok(setpoint)
            }
        }
    }
}

fn is_reachable_from(mode: Mode) -> bool {
    matches!(
        mode,
        Mode::Standby | Mode::Manual | Mode::ZConsensus | Mode::XyConsensus | Mode::BackToInit
    )
}
