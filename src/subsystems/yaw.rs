//! Yaw-rate wrap-around controller (spec §4.4).

use crate::geometry::{clamp, degrees, radians, shortest_angle_delta};

const KP: f64 = 5.0;
const MAX_YAW_RATE_DEG_PER_S: f64 = 180.0;

/// Computes the yaw-rate setpoint, in degrees/second, driving `measured_deg` toward
/// `target_deg` along the shortest angular path.
pub fn yaw_rate_deg_per_s(target_deg: f64, measured_deg: f64) -> f64 {
    let delta_rad = shortest_angle_delta(radians(target_deg), radians(measured_deg));
    let delta_deg = degrees(delta_rad);
    clamp(
        -(KP * delta_deg).round(),
        -MAX_YAW_RATE_DEG_PER_S,
        MAX_YAW_RATE_DEG_PER_S,
    )
}
