//! Auto-avoidance velocity field (spec §4.4, AVOID).
//!
//! Computes a velocity command that steers an agent toward an objective while staying
//! clear of moving peers and the arena boundary.

use crate::geometry::{clamp, Vec2};

/// Default avoidance standoff distance, in meters.
pub const D0_M: f64 = 0.85;
/// Avoidance repulsion gain.
pub const K_PO: f64 = 2.5;
/// Objective attraction gain.
pub const K_PG: f64 = 1.0;
/// Peer velocity look-ahead horizon used to project a moving peer's future position.
pub const K_V: f64 = 1.0;
/// Peer speed, in m/s, above which its velocity is taken into account for the projection.
pub const PEER_MOVING_THRESHOLD_MS: f64 = 0.25;
const EPSILON: f64 = 0.001;

/// One peer's horizontal position and velocity, as seen by the avoidance field.
#[derive(Debug, Clone, Copy)]
pub struct Peer {
    pub position: Vec2,
    pub velocity: Vec2,
}

/// Axis-aligned horizontal bounds of the arena, used for the soft-border clamp.
#[derive(Debug, Clone, Copy)]
pub struct Bounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Bounds {
    /// Half-diagonal of the arena, used as the objective pull's length scale `d1 = pi/(2*omega)`.
    pub fn half_diagonal(&self) -> f64 {
        let dx = self.x_max - self.x_min;
        let dy = self.y_max - self.y_min;
        (dx * dx + dy * dy).sqrt() / 2.0
    }
}

/// Returns the horizontal distance from `position` to the reference point used for the
/// repulsion term, and that reference point itself.
fn reference_point(position: Vec2, peer: &Peer) -> (f64, Vec2) {
    let speed = peer.velocity.norm();
    if speed <= PEER_MOVING_THRESHOLD_MS {
        return (position.sub(&peer.position).norm(), peer.position);
    }

    let projected = peer.position.add(&peer.velocity.scale(K_V));
    let segment = projected.sub(&peer.position);
    let to_position = position.sub(&peer.position);
    let t = if segment.x.abs() < 1e-9 && segment.y.abs() < 1e-9 {
        0.0
    } else {
        (to_position.x * segment.x + to_position.y * segment.y)
            / (segment.x * segment.x + segment.y * segment.y)
    };
    let reference = if t <= 0.0 {
        peer.position
    } else if t >= 1.0 {
        projected
    } else {
        peer.position.add(&segment.scale(t))
    };
    (position.sub(&reference).norm(), reference)
}

/// Computes the AVOID velocity command for an agent at `position` heading to `objective`,
/// repelled by `peers`, within arena `bounds`.
pub fn avoid(position: Vec2, objective: Vec2, peers: &[Peer], bounds: &Bounds) -> Vec2 {
    let mut v = Vec2::new(0.0, 0.0);

    for peer in peers {
        let (d, reference) = reference_point(position, peer);
        if d <= D0_M {
            let toward = reference.sub(&position);
            let norm = toward.norm() + EPSILON;
            let unit = Vec2::new(toward.x / norm, toward.y / norm);
            let magnitude = K_PO * ((-d).exp() - (-D0_M).exp());
            v = v.sub(&unit.scale(magnitude));
        }
    }

    let d1 = bounds.half_diagonal();
    let to_objective = objective.sub(&position);
    let distance = to_objective.norm();
    let well = 2.0 * d1 * ((distance + EPSILON) / d1).sqrt();
    if well > EPSILON {
        v = v.add(&to_objective.scale(K_PG / well));
    }

    let x_min_soft = bounds.x_min + 0.2 * (bounds.x_max - bounds.x_min);
    let x_max_soft = bounds.x_max - 0.2 * (bounds.x_max - bounds.x_min);
    let y_min_soft = bounds.y_min + 0.2 * (bounds.y_max - bounds.y_min);
    let y_max_soft = bounds.y_max - 0.2 * (bounds.y_max - bounds.y_min);

    let mut vx = v.x;
    let mut vy = v.y;
    if position.x < x_min_soft && vx < 0.0 {
        vx = 0.0;
    }
    if position.x > x_max_soft && vx > 0.0 {
        vx = 0.0;
    }
    if position.y < y_min_soft && vy < 0.0 {
        vy = 0.0;
    }
    if position.y > y_max_soft && vy > 0.0 {
        vy = 0.0;
    }

    Vec2::new(clamp(vx, -10.0, 10.0), clamp(vy, -10.0, 10.0))
}
