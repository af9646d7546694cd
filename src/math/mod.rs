//! Math utilities module
//!
//! Principal axes, the Euler convention shared with the host scene graph, and
//! the per-node transform joints read and write.

mod axis;
mod transform;

pub use axis::Axis;
pub use transform::{euler_from_quat, quat_from_euler, Orientation, Transform, EULER_ORDER};

// Re-export commonly used glam types
pub use glam::{Mat4, Quat, Vec3};
