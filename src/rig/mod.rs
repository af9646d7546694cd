//! Rig module
//!
//! Typed joints with limits, the mechanism they form, and the selection
//! context the input handlers operate on.

pub mod joint;
pub mod limits;
pub mod mechanism;
pub mod selection;

pub use joint::{Joint, JointId, JointKind, JointRole};
pub use limits::{check_bounds, Limits};
pub use mechanism::{Rig, RigBuilder};
pub use selection::{Selection, SelectionChange};
