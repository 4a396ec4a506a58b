//! Consensus laws: linear z-averaging and the double-integrator xy formation law (spec §4.4).

use crate::geometry::{clamp, degrees, Vec2};

/// z-consensus gain.
pub const Z_CONSENSUS_KP: f64 = 1.0;
/// xy-consensus proportional gain.
pub const XY_CONSENSUS_KP: f64 = 1.0;
/// xy-consensus velocity-damping gain (the recommended, velocity-damped single-pass form).
pub const XY_CONSENSUS_XI: f64 = 0.7;
/// Attitude clamp applied to both roll and pitch, in degrees.
pub const ATTITUDE_CLAMP_DEG: f64 = 20.0;

/// One peer's state as seen by a consensus law: altitude, or horizontal position/velocity.
#[derive(Debug, Clone, Copy)]
pub struct PeerZ {
    pub z: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct PeerXy {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// z-consensus velocity: the signed sum of peer-minus-self altitudes, scaled by `k_p`.
///
/// `peers` must already be restricted to in-flight agents in the connectivity graph,
/// excluding self.
pub fn z_consensus_velocity(self_z: f64, peers: &[PeerZ]) -> f64 {
    peers.iter().map(|p| (p.z - self_z) * Z_CONSENSUS_KP).sum()
}

/// Desired roll/pitch attitude (degrees, clamped) for the xy double-integrator consensus
/// law, given the agent's own position/velocity/yaw and its connected peers.
///
/// `offset` is the agent's formation offset `(r, rho)` added to the summed position error
/// before the proportional term is applied.
pub fn xy_consensus_attitude(
    self_position: Vec2,
    self_velocity: Vec2,
    yaw_deg: f64,
    peers: &[PeerXy],
    offset: (f64, f64),
) -> (f64, f64) {
    let yaw_rad = yaw_deg.to_radians();

    let mut sum_x_n = 0.0;
    let mut sum_y_n = 0.0;
    let mut sum_vx_n = 0.0;
    let mut sum_vy_n = 0.0;

    for peer in peers {
        let position_err = peer.position.sub(&self_position);
        let velocity_err = peer.velocity.sub(&self_velocity);
        let position_n = position_err.rotate_to_body(yaw_rad);
        let velocity_n = velocity_err.rotate_to_body(yaw_rad);
        sum_x_n += position_n.x;
        sum_y_n += position_n.y;
        sum_vx_n += velocity_n.x;
        sum_vy_n += velocity_n.y;
    }

    let a_xn = XY_CONSENSUS_KP * (sum_x_n + offset.0) + XY_CONSENSUS_XI * sum_vx_n;
    let a_yn = XY_CONSENSUS_KP * (sum_y_n + offset.1) + XY_CONSENSUS_XI * sum_vy_n;

    let pitch_deg = degrees(a_xn);
    let roll_deg = degrees(-a_yn);

    (
        clamp(roll_deg, -ATTITUDE_CLAMP_DEG, ATTITUDE_CLAMP_DEG),
        clamp(pitch_deg, -ATTITUDE_CLAMP_DEG, ATTITUDE_CLAMP_DEG),
    )
}
