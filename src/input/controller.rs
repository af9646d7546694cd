use crate::math::{euler_from_quat, Quat};
use serde::{Deserialize, Serialize};

/// Keeps the gain strictly positive when the thumbstick is pulled fully back.
const GAIN_BIAS: f32 = 0.000005;

/// Per-frame VR controller snapshot supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllerState {
    /// True on the frame the `a` button went down.
    pub a_pressed: bool,
    /// Thumbstick vertical axis in `[-1, 1]`.
    pub thumbstick_y: f32,
    pub grip_rotation: Quat,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            a_pressed: false,
            thumbstick_y: 0.0,
            grip_rotation: Quat::IDENTITY,
        }
    }
}

impl ControllerState {
    /// Grip roll in radians (Euler angle about Z).
    pub fn grip_roll(&self) -> f32 {
        euler_from_quat(self.grip_rotation).z
    }
}

/// Turns controller roll into per-frame joint deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerMapping {
    /// Degrees of joint rotation per degree of roll.
    pub rotation_scale: f32,
    /// Scene units of joint travel per degree of roll.
    pub translation_scale: f32,
    pub dead_zone_degrees: f32,
    pub saturation_degrees: f32,
    /// Extra factor on accepted trajectory deltas.
    pub trajectory_gain: f32,
}

impl Default for ControllerMapping {
    fn default() -> Self {
        Self {
            rotation_scale: 0.001,
            translation_scale: 0.05,
            dead_zone_degrees: 5.0,
            saturation_degrees: 90.0,
            trajectory_gain: 0.2,
        }
    }
}

impl ControllerMapping {
    /// Thumbstick forward speeds motion up, back slows it down.
    pub fn gain(&self, scale: f32, thumbstick_y: f32) -> f32 {
        (1.0 + thumbstick_y + GAIN_BIAS) * scale
    }

    fn shape(&self, degrees: f32, gain: f32) -> f32 {
        let magnitude = degrees.abs();
        if magnitude < self.dead_zone_degrees {
            0.0
        } else if magnitude > self.saturation_degrees {
            self.saturation_degrees.copysign(degrees) * gain
        } else {
            degrees * gain
        }
    }

    /// Rotation delta in degrees for a grip roll given in radians.
    pub fn rotation_delta(&self, grip_roll: f32, thumbstick_y: f32) -> f32 {
        let gain = self.gain(self.rotation_scale, thumbstick_y);
        self.shape(grip_roll.to_degrees(), gain)
    }

    /// Translation delta in scene units. Rolling clockwise moves the joint
    /// toward its positive end.
    pub fn translation_delta(&self, grip_roll: f32, thumbstick_y: f32) -> f32 {
        let gain = self.gain(self.translation_scale, thumbstick_y);
        self.shape(-grip_roll.to_degrees(), gain)
    }
}
