//! Safety monitor: attitude/envelope/battery checks run asynchronously off vehicle telemetry
//! (spec §4.2, §5).

use crate::agent::{Agent, Mode};
use crate::error::Error;

/// One attitude/power telemetry sample, as delivered by a vehicle's ~20 Hz log stream.
#[derive(Debug, Clone, Copy)]
pub struct AttitudeSample {
    pub roll_deg: f64,
    pub pitch_deg: f64,
    pub yaw_deg: f64,
    /// Firmware power-state code; `3` means low-energy.
    pub power_state: u8,
}

/// Power-state code signalling the vehicle is low on energy.
pub const POWER_STATE_LOW_ENERGY: u8 = 3;

/// Applies one attitude telemetry sample to `agent`.
///
/// Updates yaw. Fails the agent with [Error::EnvelopeViolation] if roll, pitch or position
/// is outside its configured envelope, transitioning it to `NotFlying` (callers must then
/// send it a stop setpoint). A low-energy power state triggers an automatic, one-time
/// transition to `Land`.
pub fn apply_attitude_sample(agent: &mut Agent, sample: &AttitudeSample) {
    agent.live.yaw_deg = sample.yaw_deg;

    if !agent.is_flying {
        return;
    }

    let envelope_violated = sample.roll_deg.abs() > agent.config.max_roll_deg
        || sample.pitch_deg.abs() > agent.config.max_pitch_deg
        || out_of_bounds(agent);

    if envelope_violated {
        agent.fail(format!("{}", Error::EnvelopeViolation(agent.name().to_string())));
        return;
    }

    if sample.power_state == POWER_STATE_LOW_ENERGY && agent.mode != Mode::Land {
        agent.mode = Mode::Land;
    }
}

fn out_of_bounds(agent: &Agent) -> bool {
    let p = agent.live.position;
    let min = agent.config.position_min;
    let max = agent.config.position_max;
    p.x < min.x || p.x > max.x || p.y < min.y || p.y > max.y || p.z < min.z || p.z > max.z
}
