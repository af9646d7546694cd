use crate::error::Result;
use crate::rig::Joint;
use crate::scene::TransformStore;

/// Range, value and caption for the slider bound to the selected joint.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderConfig {
    pub label: String,
    pub min: f32,
    pub max: f32,
    pub value: f32,
}

impl SliderConfig {
    pub fn for_joint<S: TransformStore + ?Sized>(joint: &Joint, store: &S) -> Result<Self> {
        let limits = joint.limits();
        Ok(Self {
            label: joint.label.clone(),
            min: limits.low,
            max: limits.high,
            value: joint.current_value(store)?,
        })
    }

    pub fn header(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RigConfig;
    use crate::scene::SceneGraph;

    #[test]
    fn support_arm_slider_starts_at_rest_angle() {
        let mut rig = RigConfig::default().build_rig().unwrap();
        let mut scene = SceneGraph::new();
        rig.instantiate(&mut scene).unwrap();

        let arm = rig.find("supportArm").and_then(|id| rig.joint(id)).unwrap();
        let slider = SliderConfig::for_joint(arm, &scene).unwrap();
        assert_eq!((slider.min, slider.max), (90.0, 196.0));
        assert!((slider.value - 90.0).abs() < 1e-3);
        assert!(slider.header().starts_with("Support Arm: "));
    }
}
