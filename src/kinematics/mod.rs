//! Kinematic targeting
//!
//! A target pose entered through five sliders and the fixed mapping that
//! turns it into per-joint end values.

pub mod resolver;
pub mod target;

pub use resolver::{EndValue, JointTarget, ResolvedTargets, TargetResolver};
pub use target::{KinematicInput, KinematicTarget, TargetMarkers};
