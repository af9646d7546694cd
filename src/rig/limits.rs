use serde::{Deserialize, Serialize};

/// Rejects a motion delta that would carry `current` past a limit in the
/// direction of travel. Motion back toward the range, and a zero delta, are
/// always accepted even when `current` is already outside `[low, high]`.
pub fn check_bounds(current: f32, low: f32, high: f32, delta: f32) -> f32 {
    let proposed = current + delta;
    if proposed > high && delta > 0.0 {
        0.0
    } else if proposed < low && delta < 0.0 {
        0.0
    } else {
        delta
    }
}

/// Inclusive `[low, high]` range of a joint value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Limits {
    pub low: f32,
    pub high: f32,
}

impl Limits {
    pub fn new(low: f32, high: f32) -> Self {
        Self { low, high }
    }

    pub fn is_valid(&self) -> bool {
        self.low <= self.high
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.low && value <= self.high
    }

    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.low).min(self.high)
    }

    pub fn check(&self, current: f32, delta: f32) -> f32 {
        check_bounds(current, self.low, self.high, delta)
    }
}
