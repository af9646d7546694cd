use crate::math::{Axis, Vec3};
use crate::rig::Limits;

/// One of the five inputs describing a kinematic target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KinematicInput {
    X,
    Y,
    Z,
    Polar,
    Azimuth,
}

impl KinematicInput {
    pub const ALL: [KinematicInput; 5] = [
        KinematicInput::X,
        KinematicInput::Y,
        KinematicInput::Z,
        KinematicInput::Polar,
        KinematicInput::Azimuth,
    ];

    pub fn label(self) -> &'static str {
        match self {
            KinematicInput::X => "X",
            KinematicInput::Y => "Y",
            KinematicInput::Z => "Z",
            KinematicInput::Polar => "Polar",
            KinematicInput::Azimuth => "Azimuth",
        }
    }

    /// Slider range. Offsets in scene units, angles in degrees.
    pub fn range(self) -> Limits {
        match self {
            KinematicInput::X => Limits::new(-100.0, 100.0),
            KinematicInput::Y => Limits::new(-50.0, 150.0),
            KinematicInput::Z => Limits::new(-100.0, 100.0),
            KinematicInput::Polar => Limits::new(0.0, 120.0),
            KinematicInput::Azimuth => Limits::new(-51.0, 51.0),
        }
    }

    pub fn header(self, value: f32) -> String {
        format!("{}: {}", self.label(), value)
    }
}

/// Pose of the scene markers previewing a target: the polar marker sits at
/// the target offset and tilts by the polar angle, the azimuth marker turns
/// about its vertical axis. Euler angles in radians.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetMarkers {
    pub position: Vec3,
    pub polar_rotation: Vec3,
    pub azimuth_rotation: Vec3,
}

/// Desired pose of the needle tip: an offset plus polar and azimuth angles
/// in radians.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct KinematicTarget {
    pub position: Vec3,
    pub polar: f32,
    pub azimuth: f32,
}

impl KinematicTarget {
    pub fn new(position: Vec3, polar_degrees: f32, azimuth_degrees: f32) -> Self {
        let mut target = Self {
            position,
            ..Self::default()
        };
        target.set_input(KinematicInput::Polar, polar_degrees);
        target.set_input(KinematicInput::Azimuth, azimuth_degrees);
        target
    }

    /// Applies a slider value. The azimuth is stored negated: a positive
    /// slider value turns the needle the negative way about its axis.
    pub fn set_input(&mut self, input: KinematicInput, value: f32) {
        let value = input.range().clamp(value);
        match input {
            KinematicInput::X => Axis::X.set_component(&mut self.position, value),
            KinematicInput::Y => Axis::Y.set_component(&mut self.position, value),
            KinematicInput::Z => Axis::Z.set_component(&mut self.position, value),
            KinematicInput::Polar => self.polar = value.to_radians(),
            KinematicInput::Azimuth => self.azimuth = -value.to_radians(),
        }
    }

    /// Slider value for `input`, the inverse of [`set_input`](Self::set_input).
    pub fn input(&self, input: KinematicInput) -> f32 {
        match input {
            KinematicInput::X => self.position.x,
            KinematicInput::Y => self.position.y,
            KinematicInput::Z => self.position.z,
            KinematicInput::Polar => self.polar.to_degrees(),
            KinematicInput::Azimuth => -self.azimuth.to_degrees(),
        }
    }

    pub fn markers(&self) -> TargetMarkers {
        TargetMarkers {
            position: self.position,
            polar_rotation: Vec3::new(-self.polar, 0.0, 0.0),
            azimuth_rotation: Vec3::new(0.0, -self.azimuth, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn azimuth_is_negated() {
        let mut target = KinematicTarget::default();
        target.set_input(KinematicInput::Azimuth, 10.0);
        assert!((target.azimuth + 10.0f32.to_radians()).abs() < 1e-6);
        assert!((target.input(KinematicInput::Azimuth) - 10.0).abs() < 1e-4);
    }

    #[test]
    fn inputs_clamp_to_slider_range() {
        let mut target = KinematicTarget::default();
        target.set_input(KinematicInput::Y, 400.0);
        target.set_input(KinematicInput::Polar, -30.0);
        assert_eq!(target.position.y, 150.0);
        assert_eq!(target.polar, 0.0);
    }

    #[test]
    fn markers_follow_slider_values() {
        let target = KinematicTarget::new(Vec3::new(1.0, 2.0, 3.0), 30.0, 10.0);
        let markers = target.markers();
        assert_eq!(markers.position, Vec3::new(1.0, 2.0, 3.0));
        assert!((markers.polar_rotation.x + 30.0f32.to_radians()).abs() < 1e-6);
        // The azimuth marker turns with the slider, not with the stored target.
        assert!((markers.azimuth_rotation.y - 10.0f32.to_radians()).abs() < 1e-6);
    }

    #[test]
    fn header_formats_label_and_value() {
        assert_eq!(KinematicInput::Polar.header(30.0), "Polar: 30");
    }
}
