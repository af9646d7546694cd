use glam::{Quat, Vec3};

pub trait Interpolatable: Clone + Copy {
    fn interpolate(self, other: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.slerp(other, t)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keyframe<T> {
    pub frame: f32,
    pub value: T,
}

/// Keyframes sorted by frame, sampled with clamping at both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframeTrack<T: Interpolatable> {
    keys: Vec<Keyframe<T>>,
}

impl<T: Interpolatable> KeyframeTrack<T> {
    pub fn new(mut keys: Vec<Keyframe<T>>) -> Self {
        keys.sort_by(|a, b| a.frame.total_cmp(&b.frame));
        Self { keys }
    }

    /// A start key at frame 0 and an end key at `end_frame`.
    pub fn between(start: T, end: T, end_frame: f32) -> Self {
        Self::new(vec![
            Keyframe { frame: 0.0, value: start },
            Keyframe { frame: end_frame, value: end },
        ])
    }

    pub fn keys(&self) -> &[Keyframe<T>] {
        &self.keys
    }

    pub fn last_frame(&self) -> f32 {
        self.keys.last().map_or(0.0, |k| k.frame)
    }

    pub fn start(&self) -> Option<T> {
        self.keys.first().map(|k| k.value)
    }

    pub fn end(&self) -> Option<T> {
        self.keys.last().map(|k| k.value)
    }

    pub fn sample(&self, frame: f32) -> Option<T> {
        let first = self.keys.first()?;
        if frame <= first.frame {
            return Some(first.value);
        }
        let last = self.keys.last()?;
        if frame >= last.frame {
            return Some(last.value);
        }

        let idx = self.keys.partition_point(|k| k.frame <= frame);
        let prev = &self.keys[idx - 1];
        let next = &self.keys[idx];
        let span = next.frame - prev.frame;
        if span <= 0.0 {
            return Some(prev.value);
        }
        let t = (frame - prev.frame) / span;
        Some(prev.value.interpolate(next.value, t))
    }
}
