//! # rig-kinematics
//!
//! Bounded joint control and direct target resolution for an interactive
//! machine rig: a needle on a gimbal, carried by a rotating support arm on
//! sliding stands.
//!
//! ## Features
//! - Typed rotation/translation joints with inclusive limits
//! - Bounds checking that refuses motion across a limit
//! - Direct polar/azimuth/offset target resolution into keyframe animations
//! - Slider and VR controller input mapping with an explicit selection context
//! - Cross-platform: Native + WASM support
//!
//! ## Example
//! ```rust,ignore
//! use rig_kinematics::{ControllerState, RigConfig, SceneGraph, Session};
//! use rig_kinematics::kinematics::KinematicInput;
//!
//! let mut session = Session::from_config(&RigConfig::default())?;
//! let mut scene = SceneGraph::new();
//! session.rig_mut().instantiate(&mut scene)?;
//!
//! session.select_by_name(&scene, "gimbal")?;
//! session.on_slider_changed(&mut scene, 25.0)?;
//!
//! session.set_kinematic_input(KinematicInput::Polar, 30.0);
//! session.perform_kinematics(&scene)?;
//! session.update(&mut scene, &ControllerState::default(), 1.0 / 60.0)?;
//! ```

pub mod animation;
pub mod config;
pub mod error;
pub mod input;
pub mod kinematics;
pub mod math;
pub mod rig;
pub mod scene;
pub mod session;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animation::{AnimationPlayer, AnimationTiming, JointAnimation};
pub use config::RigConfig;
pub use error::{Result, RigError};
pub use input::{ControllerMapping, ControllerState, SliderConfig};
pub use kinematics::{KinematicTarget, TargetResolver};
pub use math::{Axis, Transform};
pub use rig::{check_bounds, Joint, JointId, JointKind, JointRole, Limits, Rig, Selection};
pub use scene::{NodeId, SceneGraph, TransformStore};
pub use session::{FrameOutcome, Mode, Session};
