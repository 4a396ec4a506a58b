//! Vehicle link: the outbound interface to one flying vehicle.
//!
//! The radio/transport implementation is out of scope for this crate (see the crate
//! documentation); only the interface is specified here. A real link driver implements
//! [VehicleLink] and is handed to a [crate::subsystems::commander::Commander].

use async_trait::async_trait;

use crate::error::Result;

/// Outbound commands sent to one vehicle, once per enabled in-flight agent per tick.
#[async_trait]
pub trait VehicleLink: Send + Sync {
    /// Absolute position setpoint, yaw in degrees.
    async fn send_position_setpoint(&self, x: f64, y: f64, z: f64, yaw_deg: f64) -> Result<()>;

    /// World-frame velocity setpoint, yaw rate in degrees/second.
    async fn send_velocity_world_setpoint(
        &self,
        vx: f64,
        vy: f64,
        vz: f64,
        yaw_rate_deg_per_s: f64,
    ) -> Result<()>;

    /// Low-level attitude/thrust setpoint.
    async fn send_setpoint(
        &self,
        roll_deg: f64,
        pitch_deg: f64,
        yaw_rate_deg_per_s: f64,
        thrust: u16,
    ) -> Result<()>;

    /// Commands the vehicle to stop (zero everything).
    async fn send_stop_setpoint(&self) -> Result<()>;

    /// Pushes the fused tracker position back to the vehicle's estimator. Called every
    /// tick right after the tracking update, independently of the mode dispatch.
    async fn send_extpos(&self, x: f64, y: f64, z: f64) -> Result<()>;

    /// One-time startup configuration: selects the EKF estimator and resets the
    /// high-level position-set flag.
    async fn configure_estimator(&self) -> Result<()> {
        Ok(())
    }
}
