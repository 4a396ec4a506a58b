//! Per-mode control laws (spec §4.4): they turn one agent's state plus a snapshot of its
//! peers into a [Setpoint](crate::subsystems::commander::Setpoint).
//!
//! Laws are pure functions of their inputs so they can be unit-tested without a running
//! swarm; [crate::swarm::Swarm] owns the state they read and write back (anchors,
//! controller memory, mode transitions).

use crate::agent::{Agent, ControllerState};
use crate::geometry::{clamp, Point3, Vec2};
use crate::subsystems::avoidance::{avoid, Bounds, Peer};
use crate::subsystems::commander::Setpoint;
use crate::subsystems::consensus::{
    xy_consensus_attitude, z_consensus_velocity, PeerXy, PeerZ,
};
use crate::subsystems::pid::ThrustPid;
use crate::subsystems::yaw::yaw_rate_deg_per_s;

/// 3D distance below which takeoff/land is considered complete.
pub const ANCHOR_DISTANCE_THRESHOLD_M: f64 = 0.05;
/// Clamp margin subtracted from each axis bound in manual flight.
pub const MANUAL_AXIS_MARGIN_M: f64 = 0.15;
/// Gain applied to the square-root manual displacement law.
pub const MANUAL_GAIN: f64 = 0.45;

/// A snapshot of one peer agent's state, as read by a control law.
#[derive(Debug, Clone, Copy)]
pub struct PeerSnapshot {
    pub position: Point3,
    pub velocity: Point3,
    pub yaw_deg: f64,
    pub is_flying: bool,
}

/// Position setpoint tracker shared by takeoff and land: drives toward `anchor` and
/// reports whether the anchor has been reached.
///
/// `vertical_only` selects the land termination criterion (vertical distance) over the
/// takeoff one (3D distance).
pub fn anchor_tracking_law(
    position: Point3,
    anchor: Point3,
    anchor_yaw_deg: f64,
    vertical_only: bool,
) -> (Setpoint, bool) {
    let setpoint = Setpoint::Position {
        x: anchor.x,
        y: anchor.y,
        z: anchor.z,
        yaw_deg: anchor_yaw_deg,
    };
    let distance = if vertical_only {
        position.vertical_distance(&anchor)
    } else {
        position.distance(&anchor)
    };
    (setpoint, distance <= ANCHOR_DISTANCE_THRESHOLD_M)
}

/// Manual flight law: position setpoint driven by the operator's joystick axes.
pub fn manual_law(
    position: Point3,
    manual_x: f64,
    manual_y: f64,
    manual_z: f64,
    manual_yaw_deg: f64,
    position_min: Point3,
    position_max: Point3,
) -> Setpoint {
    let target_x = position.x - manual_x.signum() * MANUAL_GAIN * manual_x.abs().sqrt();
    let target_y = position.y - manual_y.signum() * MANUAL_GAIN * manual_y.abs().sqrt();
    let target_z = manual_z;

    let x = clamp(
        target_x,
        position_min.x + MANUAL_AXIS_MARGIN_M,
        position_max.x - MANUAL_AXIS_MARGIN_M,
    );
    let y = clamp(
        target_y,
        position_min.y + MANUAL_AXIS_MARGIN_M,
        position_max.y - MANUAL_AXIS_MARGIN_M,
    );
    let z = clamp(
        target_z,
        position_min.z + MANUAL_AXIS_MARGIN_M,
        position_max.z - MANUAL_AXIS_MARGIN_M,
    );

    Setpoint::Position {
        x,
        y,
        z,
        yaw_deg: manual_yaw_deg,
    }
}

/// Standby / back-to-initial-position law: velocity setpoint with inter-agent avoidance.
pub fn standby_like_law(
    position: Point3,
    objective_xy: Vec2,
    objective_z: f64,
    peers_to_avoid: &[PeerSnapshot],
    bounds: &Bounds,
) -> Setpoint {
    let peers: Vec<Peer> = peers_to_avoid
        .iter()
        .filter(|p| p.is_flying)
        .map(|p| Peer {
            position: p.position.xy(),
            velocity: p.velocity.xy(),
        })
        .collect();

    let v_xy = avoid(position.xy(), objective_xy, &peers, bounds);
    let v_z = objective_z - position.z;

    Setpoint::VelocityWorld {
        vx: v_xy.x,
        vy: v_xy.y,
        vz: v_z,
        yaw_rate_deg_per_s: 0.0,
    }
}

/// z-consensus law: peer-averaged vertical velocity, horizontal velocity tracking the
/// anchored (x, y).
pub fn z_consensus_law(position: Point3, anchor_xy: Vec2, peers: &[PeerSnapshot]) -> Setpoint {
    let peer_z: Vec<PeerZ> = peers
        .iter()
        .filter(|p| p.is_flying)
        .map(|p| PeerZ { z: p.position.z })
        .collect();
    let vz = z_consensus_velocity(position.z, &peer_z);
    let horizontal = anchor_xy.sub(&position.xy());

    Setpoint::VelocityWorld {
        vx: horizontal.x,
        vy: horizontal.y,
        vz,
        yaw_rate_deg_per_s: 0.0,
    }
}

/// xy-consensus law: double-integrator formation attitude plus altitude-hold thrust PID
/// and the yaw-rate wrap-around law. Returns the attitude setpoint and the updated
/// controller memory (integral term).
pub fn xy_consensus_law(
    agent: &Agent,
    anchor_z: f64,
    peers: &[PeerSnapshot],
    manual_yaw_targets_deg: &[f64],
    dt_s: f64,
) -> (Setpoint, ControllerState) {
    let position = agent.live.position;
    let velocity = agent.live.velocity;

    let peer_xy: Vec<PeerXy> = peers
        .iter()
        .filter(|p| p.is_flying)
        .map(|p| PeerXy {
            position: p.position.xy(),
            velocity: p.velocity.xy(),
        })
        .collect();

    let (roll_deg, pitch_deg) = xy_consensus_attitude(
        position.xy(),
        velocity.xy(),
        agent.live.yaw_deg,
        &peer_xy,
        agent.config.xy_formation_offset,
    );

    let (thrust, integral) = ThrustPid::step(
        anchor_z,
        position.z,
        velocity.z,
        dt_s,
        agent.controller.previous_integral_z,
    );

    let target_yaw_deg = if manual_yaw_targets_deg.is_empty() {
        0.0
    } else {
        manual_yaw_targets_deg.iter().sum::<f64>() / manual_yaw_targets_deg.len() as f64
    };
    let yaw_rate = yaw_rate_deg_per_s(target_yaw_deg, agent.live.yaw_deg);

    (
        Setpoint::Attitude {
            roll_deg,
            pitch_deg,
            yaw_rate_deg_per_s: yaw_rate,
            thrust,
        },
        ControllerState {
            previous_integral_z: integral,
        },
    )
}
