use super::keyframe::KeyframeTrack;
use crate::error::{Result, RigError};
use crate::math::{Axis, Quat};
use crate::scene::{NodeId, TransformStore};
use serde::{Deserialize, Serialize};

/// Playback timing for generated animations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationTiming {
    pub frame_rate: f32,
    pub end_frame: f32,
}

impl Default for AnimationTiming {
    fn default() -> Self {
        Self {
            frame_rate: 30.0,
            end_frame: 60.0,
        }
    }
}

impl AnimationTiming {
    /// Playback needs a positive frame rate to ever reach the end key.
    pub fn validate(&self) -> Result<()> {
        let rate_ok = self.frame_rate.is_finite() && self.frame_rate > 0.0;
        let end_ok = self.end_frame.is_finite() && self.end_frame >= 0.0;
        if rate_ok && end_ok {
            Ok(())
        } else {
            Err(RigError::InvalidTiming {
                frame_rate: self.frame_rate,
                end_frame: self.end_frame,
            })
        }
    }

    pub fn duration_seconds(&self) -> f32 {
        if self.frame_rate <= 0.0 {
            0.0
        } else {
            self.end_frame / self.frame_rate
        }
    }
}

/// Which part of a node's transform a track writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimatedProperty {
    /// One position component, scene units.
    Position(Axis),
    /// One Euler angle, radians.
    EulerAngle(Axis),
    /// The whole rotation.
    Rotation,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Track {
    Scalar(KeyframeTrack<f32>),
    Rotation(KeyframeTrack<Quat>),
}

impl Track {
    fn last_frame(&self) -> f32 {
        match self {
            Track::Scalar(t) => t.last_frame(),
            Track::Rotation(t) => t.last_frame(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct JointAnimation {
    pub name: String,
    pub node: NodeId,
    pub property: AnimatedProperty,
    pub track: Track,
}

impl JointAnimation {
    /// Writes the value at `frame` into the node. Returns false when the
    /// track and property disagree or the node is gone.
    fn apply<S: TransformStore + ?Sized>(&self, store: &mut S, frame: f32) -> bool {
        let Some(transform) = store.transform_mut(self.node) else {
            return false;
        };
        match (&self.track, self.property) {
            (Track::Scalar(track), AnimatedProperty::Position(axis)) => {
                let Some(value) = track.sample(frame) else { return false };
                axis.set_component(&mut transform.position, value);
            }
            (Track::Scalar(track), AnimatedProperty::EulerAngle(axis)) => {
                let Some(value) = track.sample(frame) else { return false };
                transform.set_angle_about(axis, value);
            }
            (Track::Rotation(track), AnimatedProperty::Rotation) => {
                let Some(value) = track.sample(frame) else { return false };
                transform.set_rotation(value);
            }
            _ => return false,
        }
        true
    }
}

#[derive(Debug, Clone)]
struct Playback {
    animation: JointAnimation,
    frame: f32,
}

/// Advances non-looping animations against a transform store.
#[derive(Debug, Clone)]
pub struct AnimationPlayer {
    frame_rate: f32,
    active: Vec<Playback>,
}

impl AnimationPlayer {
    pub fn new(frame_rate: f32) -> Self {
        Self {
            frame_rate,
            active: Vec::new(),
        }
    }

    /// Starts `animation` from frame 0, replacing whatever was playing on
    /// the same node.
    pub fn begin(&mut self, animation: JointAnimation) {
        self.active.retain(|p| p.animation.node != animation.node);
        log::info!("Starting animation '{}' on node {:?}", animation.name, animation.node);
        self.active.push(Playback { animation, frame: 0.0 });
    }

    pub fn is_playing(&self) -> bool {
        !self.active.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Moves every animation forward by `dt` seconds and writes the sampled
    /// values. Finished animations are written at their last key and
    /// dropped. Returns how many finished this step.
    pub fn advance<S: TransformStore + ?Sized>(&mut self, store: &mut S, dt: f32) -> usize {
        if dt <= 0.0 || self.active.is_empty() {
            return 0;
        }

        let step = dt * self.frame_rate;
        let before = self.active.len();
        self.active.retain_mut(|playback| {
            playback.frame += step;
            let last = playback.animation.track.last_frame();
            if !playback.animation.apply(store, playback.frame.min(last)) {
                log::warn!("Dropping animation '{}': cannot apply", playback.animation.name);
                return false;
            }
            playback.frame < last
        });
        before - self.active.len()
    }
}

impl Default for AnimationPlayer {
    fn default() -> Self {
        Self::new(AnimationTiming::default().frame_rate)
    }
}
