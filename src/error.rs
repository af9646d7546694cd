//! Error types for rig operations

use crate::rig::JointRole;
use crate::scene::NodeId;
use thiserror::Error;

/// The main error type for rig operations
#[derive(Debug, Error)]
pub enum RigError {
    #[error("Unknown joint: {0}")]
    UnknownJoint(String),

    #[error("Unknown scene node: {0:?}")]
    UnknownNode(NodeId),

    #[error("Joint '{0}' has no transform bound")]
    Unbound(String),

    #[error("Joint '{0}' is already bound to a transform")]
    AlreadyBound(String),

    #[error("Duplicate joint name: {0}")]
    DuplicateJoint(String),

    #[error("Role {0:?} is assigned to more than one joint")]
    DuplicateRole(JointRole),

    #[error("No joint with role {0:?}")]
    MissingRole(JointRole),

    #[error("Invalid limits for '{name}': low {low} is above high {high}")]
    InvalidLimits { name: String, low: f32, high: f32 },

    #[error("Joint '{joint}' names unknown parent '{parent}'")]
    UnknownParent { joint: String, parent: String },

    #[error("Invalid animation timing: frame rate {frame_rate}, end frame {end_frame}")]
    InvalidTiming { frame_rate: f32, end_frame: f32 },

    #[error("No joint is selected")]
    NoSelection,

    #[error("Config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RigError>;
