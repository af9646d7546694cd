use super::limits::Limits;
use crate::error::{Result, RigError};
use crate::math::{Axis, Transform, Vec3};
use crate::scene::{NodeId, TransformStore};
use serde::{Deserialize, Serialize};

/// Index of a joint inside its [`Rig`](super::Rig).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct JointId(pub usize);

/// The part of the mechanism a joint drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JointRole {
    Needle,
    SupportArm,
    Gimbal,
    StandLowerLeft,
    StandLowerRight,
    StandUpperLeft,
    StandUpperRight,
    Trajectory,
}

/// Degree of freedom of a joint. Rotation limits are in degrees, translation
/// limits in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JointKind {
    Rotation { limits: Limits },
    Translation { limits: Limits },
}

impl JointKind {
    pub fn limits(&self) -> Limits {
        match self {
            JointKind::Rotation { limits } | JointKind::Translation { limits } => *limits,
        }
    }

    pub fn is_rotation(&self) -> bool {
        matches!(self, JointKind::Rotation { .. })
    }
}

#[derive(Debug, Clone)]
pub struct Joint {
    pub name: String,
    pub label: String,
    pub role: JointRole,
    pub kind: JointKind,
    pub axis: Axis,
    pub selectable: bool,
    pub parent: Option<String>,
    /// Euler angles in degrees applied when the hierarchy is built. Joints
    /// with a rest rotation are driven in Euler mode.
    pub rest_rotation: Option<Vec3>,
    pub(crate) node: Option<NodeId>,
}

impl Joint {
    pub fn new(name: impl Into<String>, label: impl Into<String>, role: JointRole, kind: JointKind, axis: Axis) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            role,
            kind,
            axis,
            selectable: true,
            parent: None,
            rest_rotation: None,
            node: None,
        }
    }

    pub fn limits(&self) -> Limits {
        self.kind.limits()
    }

    pub fn is_bound(&self) -> bool {
        self.node.is_some()
    }

    pub fn node(&self) -> Result<NodeId> {
        self.node.ok_or_else(|| RigError::Unbound(self.name.clone()))
    }

    pub fn transform<'s, S: TransformStore + ?Sized>(&self, store: &'s S) -> Result<&'s Transform> {
        let node = self.node()?;
        store.transform(node).ok_or(RigError::UnknownNode(node))
    }

    fn transform_mut<'s, S: TransformStore + ?Sized>(&self, store: &'s mut S) -> Result<&'s mut Transform> {
        let node = self.node()?;
        store.transform_mut(node).ok_or(RigError::UnknownNode(node))
    }

    /// Current value along the joint's axis: degrees for rotations, scene
    /// units for translations.
    pub fn current_value<S: TransformStore + ?Sized>(&self, store: &S) -> Result<f32> {
        let transform = self.transform(store)?;
        Ok(match self.kind {
            JointKind::Rotation { .. } => transform.angle_about(self.axis).to_degrees(),
            JointKind::Translation { .. } => self.axis.component(transform.position),
        })
    }

    /// The part of `delta` the joint's limits allow from its current value.
    pub fn checked_delta<S: TransformStore + ?Sized>(&self, store: &S, delta: f32) -> Result<f32> {
        let current = self.current_value(store)?;
        Ok(self.limits().check(current, delta))
    }

    /// Applies `delta` as-is, without consulting the limits.
    pub(crate) fn offset<S: TransformStore + ?Sized>(&self, store: &mut S, delta: f32) -> Result<()> {
        let axis = self.axis;
        let rotation = self.kind.is_rotation();
        let transform = self.transform_mut(store)?;
        if rotation {
            transform.add_angle_about(axis, delta.to_radians());
        } else {
            let value = axis.component(transform.position) + delta;
            axis.set_component(&mut transform.position, value);
        }
        Ok(())
    }

    /// Moves the joint by `delta` if its limits allow it, returning the
    /// delta actually applied.
    pub fn apply_delta<S: TransformStore + ?Sized>(&self, store: &mut S, delta: f32) -> Result<f32> {
        let accepted = self.checked_delta(store, delta)?;
        if accepted != 0.0 {
            self.offset(store, accepted)?;
        }
        Ok(accepted)
    }

    /// Writes an absolute value, clamped into the limits. Returns the value
    /// written.
    pub fn set_value<S: TransformStore + ?Sized>(&self, store: &mut S, value: f32) -> Result<f32> {
        let value = self.limits().clamp(value);
        let axis = self.axis;
        let rotation = self.kind.is_rotation();
        let transform = self.transform_mut(store)?;
        if rotation {
            transform.set_angle_about(axis, value.to_radians());
        } else {
            axis.set_component(&mut transform.position, value);
        }
        Ok(value)
    }
}
