//! Rig configuration loaded from TOML

use crate::animation::AnimationTiming;
use crate::error::Result;
use crate::input::ControllerMapping;
use crate::math::{Axis, Vec3};
use crate::rig::{Joint, JointKind, JointRole, Limits, Rig, RigBuilder};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JointKindConfig {
    Rotation,
    Translation,
}

/// One `[[joints]]` entry. Rotation limits are degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JointConfig {
    pub name: String,
    pub label: String,
    pub role: JointRole,
    pub kind: JointKindConfig,
    pub axis: Axis,
    pub low: f32,
    pub high: f32,
    #[serde(default = "default_selectable")]
    pub selectable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rest_rotation: Option<[f32; 3]>,
}

fn default_selectable() -> bool {
    true
}

impl JointConfig {
    fn new(
        name: &str,
        label: &str,
        role: JointRole,
        kind: JointKindConfig,
        axis: Axis,
        low: f32,
        high: f32,
    ) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            role,
            kind,
            axis,
            low,
            high,
            selectable: true,
            parent: None,
            rest_rotation: None,
        }
    }

    fn parent(mut self, parent: &str) -> Self {
        self.parent = Some(parent.to_string());
        self
    }

    fn hidden(mut self) -> Self {
        self.selectable = false;
        self
    }

    fn to_joint(&self) -> Joint {
        let limits = Limits::new(self.low, self.high);
        let kind = match self.kind {
            JointKindConfig::Rotation => JointKind::Rotation { limits },
            JointKindConfig::Translation => JointKind::Translation { limits },
        };
        let mut joint = Joint::new(self.name.as_str(), self.label.as_str(), self.role, kind, self.axis);
        joint.selectable = self.selectable;
        joint.parent = self.parent.clone();
        joint.rest_rotation = self.rest_rotation.map(Vec3::from_array);
        joint
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RigConfig {
    pub joints: Vec<JointConfig>,
    #[serde(default)]
    pub controller: ControllerMapping,
    #[serde(default)]
    pub animation: AnimationTiming,
}

impl Default for RigConfig {
    /// The needle rig: a needle on a gimbal carried by a rotating support
    /// arm, which sits on two pairs of sliding stands.
    fn default() -> Self {
        use JointKindConfig::{Rotation, Translation};
        let joints = vec![
            JointConfig::new("needle", "Needle", JointRole::Needle, Rotation, Axis::Z, -51.0, 51.0)
                .parent("gimbal"),
            JointConfig {
                rest_rotation: Some([90.0, 180.0, 0.0]),
                ..JointConfig::new("supportArm", "Support Arm", JointRole::SupportArm, Rotation, Axis::X, 90.0, 196.0)
                    .parent("standUpperLeft")
            },
            JointConfig::new("gimbal", "Gimbal", JointRole::Gimbal, Translation, Axis::X, -100.0, 100.0)
                .parent("supportArm"),
            JointConfig::new("standLowerLeft", "Lower Stand", JointRole::StandLowerLeft, Translation, Axis::Y, -100.0, 100.0)
                .hidden(),
            JointConfig::new("standLowerRight", "Lower Stand", JointRole::StandLowerRight, Translation, Axis::Y, -100.0, 100.0),
            JointConfig::new("standUpperLeft", "Upper Stand", JointRole::StandUpperLeft, Translation, Axis::Z, -60.0, 60.0)
                .parent("standLowerLeft")
                .hidden(),
            JointConfig::new("standUpperRight", "Upper Stand", JointRole::StandUpperRight, Translation, Axis::Z, -60.0, 60.0),
            JointConfig::new("trajectory", "Trajectory", JointRole::Trajectory, Translation, Axis::Y, -80.0, 50.0)
                .parent("needle"),
        ];
        Self {
            joints,
            controller: ControllerMapping::default(),
            animation: AnimationTiming::default(),
        }
    }
}

impl RigConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source)?;
        config.animation.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded {} joints from {}", config.joints.len(), path.display());
        Ok(config)
    }

    pub fn build_rig(&self) -> Result<Rig> {
        self.joints
            .iter()
            .fold(RigBuilder::new(), |builder, joint| builder.add_joint(joint.to_joint()))
            .build()
    }
}
