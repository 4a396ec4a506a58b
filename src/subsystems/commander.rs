//! The commander subsystem: turns a computed [Setpoint] into one outbound call on an
//! agent's [VehicleLink].
//!
//! This mirrors the vehicle link interface: one call per enabled, in-flight agent per
//! tick, plus the independent `send_extpos` push that runs every tick regardless of mode.

use std::sync::Arc;

use crate::error::Result;
use crate::link::VehicleLink;

/// The setpoint a mode's control law produces for one tick.
#[derive(Debug, Clone, Copy)]
pub enum Setpoint {
    Position { x: f64, y: f64, z: f64, yaw_deg: f64 },
    VelocityWorld { vx: f64, vy: f64, vz: f64, yaw_rate_deg_per_s: f64 },
    Attitude { roll_deg: f64, pitch_deg: f64, yaw_rate_deg_per_s: f64, thrust: u16 },
    Stop,
}

/// Wraps one agent's [VehicleLink] and exposes the setpoint calls the control laws use.
pub struct Commander {
    link: Arc<dyn VehicleLink>,
}

impl Commander {
    pub fn new(link: Arc<dyn VehicleLink>) -> Self {
        Commander { link }
    }

    /// Sends `setpoint` using the matching outbound call.
    pub async fn send(&self, setpoint: Setpoint) -> Result<()> {
        match setpoint {
            Setpoint::Position { x, y, z, yaw_deg } => {
                self.link.send_position_setpoint(x, y, z, yaw_deg).await
            }
            Setpoint::VelocityWorld { vx, vy, vz, yaw_rate_deg_per_s } => {
                self.link
                    .send_velocity_world_setpoint(vx, vy, vz, yaw_rate_deg_per_s)
                    .await
            }
            Setpoint::Attitude { roll_deg, pitch_deg, yaw_rate_deg_per_s, thrust } => {
                self.link
                    .send_setpoint(roll_deg, pitch_deg, yaw_rate_deg_per_s, thrust)
                    .await
            }
            Setpoint::Stop => self.link.send_stop_setpoint().await,
        }
    }

    /// Pushes the fused tracker position to the vehicle's estimator.
    pub async fn send_extpos(&self, x: f64, y: f64, z: f64) -> Result<()> {
        self.link.send_extpos(x, y, z).await
    }

    /// Startup configuration: EKF estimator, high-level position-set flag reset.
    pub async fn configure(&self) -> Result<()> {
        self.link.configure_estimator().await
    }
}
