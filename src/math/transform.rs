use super::Axis;
use glam::{EulerRot, Mat4, Quat, Vec3};

/// Euler convention used by the host scene graph: yaw about Y, then pitch
/// about X, then roll about Z. Angles are stored as `(x, y, z)`.
pub const EULER_ORDER: EulerRot = EulerRot::YXZ;

pub fn quat_from_euler(angles: Vec3) -> Quat {
    Quat::from_euler(EULER_ORDER, angles.y, angles.x, angles.z)
}

pub fn euler_from_quat(rotation: Quat) -> Vec3 {
    let (y, x, z) = rotation.to_euler(EULER_ORDER);
    Vec3::new(x, y, z)
}

/// How a node stores its rotation.
///
/// Nodes in Euler mode keep their angles verbatim, so reading an angle back
/// never goes through a quaternion decomposition. Quaternion nodes expose
/// Euler angles by decomposing on read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Orientation {
    Euler(Vec3),
    Quaternion(Quat),
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::Quaternion(Quat::IDENTITY)
    }
}

impl Orientation {
    pub fn to_quat(self) -> Quat {
        match self {
            Orientation::Euler(angles) => quat_from_euler(angles),
            Orientation::Quaternion(q) => q,
        }
    }

    pub fn to_euler(self) -> Vec3 {
        match self {
            Orientation::Euler(angles) => angles,
            Orientation::Quaternion(q) => euler_from_quat(q),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub orientation: Orientation,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    pub const IDENTITY: Self = Self {
        position: Vec3::ZERO,
        orientation: Orientation::Quaternion(Quat::IDENTITY),
        scale: Vec3::ONE,
    };

    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::IDENTITY
        }
    }

    pub fn from_euler(position: Vec3, angles: Vec3) -> Self {
        Self {
            position,
            orientation: Orientation::Euler(angles),
            scale: Vec3::ONE,
        }
    }

    pub fn rotation(&self) -> Quat {
        self.orientation.to_quat()
    }

    pub fn euler_angles(&self) -> Vec3 {
        self.orientation.to_euler()
    }

    /// Angle in radians about `axis`, in the Euler decomposition.
    pub fn angle_about(&self, axis: Axis) -> f32 {
        axis.component(self.euler_angles())
    }

    /// Replaces the Euler angle about `axis`, keeping the other two.
    pub fn set_angle_about(&mut self, axis: Axis, radians: f32) {
        self.orientation = match self.orientation {
            Orientation::Euler(angles) => Orientation::Euler(axis.with_component(angles, radians)),
            Orientation::Quaternion(q) => {
                let angles = axis.with_component(euler_from_quat(q), radians);
                Orientation::Quaternion(quat_from_euler(angles))
            }
        };
    }

    pub fn add_angle_about(&mut self, axis: Axis, radians: f32) {
        let current = self.angle_about(axis);
        self.set_angle_about(axis, current + radians);
    }

    pub fn set_rotation(&mut self, rotation: Quat) {
        self.orientation = Orientation::Quaternion(rotation);
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.position)
    }
}
