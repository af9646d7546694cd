//! Two-sample keyframe animations and a minimal player for them.

mod keyframe;
mod player;

pub use keyframe::{Interpolatable, Keyframe, KeyframeTrack};
pub use player::{AnimatedProperty, AnimationPlayer, AnimationTiming, JointAnimation, Track};
