//! Joystick axis mapping (spec §6).
//!
//! The joystick device and its event transport are out of scope; only the mapping from
//! raw axes/buttons to the swarm's global manual axes is specified here.

use crate::geometry::clamp;

const DEADBAND: f64 = 0.01;
const YAW_STEP_PER_BUTTON_DEG: f64 = 22.5;
const YAW_STEP_PER_TICK_GAIN: f64 = 2.0;
const INCREMENTAL_Z_GAIN: f64 = 0.01;

/// The two mutually-exclusive `manual_z` mappings present in the source corpus (see the
/// design notes): absolute height-axis mapping, or an incremental per-tick step. The
/// device profile picks one at startup; implementers must not mix them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualZMapping {
    Absolute,
    Incremental,
}

/// Global manual axes, updated by joystick input and read by the manual-flight control law.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualAxes {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub yaw_deg: f64,
}

/// Joystick-driven state machine for the global manual axes.
pub struct JoystickState {
    pub z_mapping: ManualZMapping,
    pub axes: ManualAxes,
}

impl JoystickState {
    pub fn new(z_mapping: ManualZMapping) -> Self {
        JoystickState {
            z_mapping,
            axes: ManualAxes::default(),
        }
    }

    fn cubic(axis: f64) -> f64 {
        if axis.abs() < DEADBAND {
            0.0
        } else {
            axis.powi(3)
        }
    }

    /// Applies one tick's worth of raw roll/pitch/yaw/height axis readings.
    pub fn update_axes(&mut self, roll_axis: f64, pitch_axis: f64, yaw_axis: f64, height_axis: f64) {
        self.axes.x = Self::cubic(roll_axis);
        self.axes.y = Self::cubic(pitch_axis);
        self.axes.yaw_deg -= YAW_STEP_PER_TICK_GAIN * yaw_axis.powi(3);

        self.axes.z = match self.z_mapping {
            ManualZMapping::Absolute => clamp((1.0 - height_axis) / 2.0, 0.0, 1.0),
            ManualZMapping::Incremental => self.axes.z - INCREMENTAL_Z_GAIN * height_axis,
        };
    }

    /// Applies a discrete yaw-minus button press.
    pub fn yaw_minus(&mut self) {
        self.axes.yaw_deg -= YAW_STEP_PER_BUTTON_DEG;
    }

    /// Applies a discrete yaw-plus button press.
    pub fn yaw_plus(&mut self) {
        self.axes.yaw_deg += YAW_STEP_PER_BUTTON_DEG;
    }
}

/// Buttons the joystick maps to operator commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Stop,
    TakeoffLand,
    Standby,
    ManualFlight,
    YawMinus,
    YawPlus,
    InitialPosition,
    XyConsensus,
    ZConsensus,
}
