use super::target::KinematicTarget;
use crate::animation::{AnimatedProperty, AnimationTiming, JointAnimation, KeyframeTrack, Track};
use crate::error::{Result, RigError};
use crate::math::{quat_from_euler, Axis, Quat};
use crate::rig::{Joint, JointId, JointRole, Rig};
use crate::scene::TransformStore;
use std::f32::consts::FRAC_PI_2;

/// End value of one joint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EndValue {
    /// Position along the joint's axis, scene units.
    Offset(f32),
    /// Euler angle about the joint's axis, radians.
    Angle(f32),
    /// Full rotation.
    Orientation(Quat),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointTarget {
    pub joint: JointId,
    pub end: EndValue,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedTargets {
    targets: Vec<JointTarget>,
}

impl ResolvedTargets {
    pub fn iter(&self) -> impl Iterator<Item = &JointTarget> {
        self.targets.iter()
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    pub fn get(&self, joint: JointId) -> Option<EndValue> {
        self.targets.iter().find(|t| t.joint == joint).map(|t| t.end)
    }

    /// One start/end keyframe pair per joint, starting from the joint's
    /// current value in `store`.
    pub fn animations<S: TransformStore + ?Sized>(
        &self,
        rig: &Rig,
        store: &S,
        timing: &AnimationTiming,
    ) -> Result<Vec<JointAnimation>> {
        self.targets
            .iter()
            .map(|target| {
                let joint = rig.get(target.joint)?;
                let node = joint.node()?;
                let transform = joint.transform(store)?;
                let (property, track) = match target.end {
                    EndValue::Offset(end) => (
                        AnimatedProperty::Position(joint.axis),
                        Track::Scalar(KeyframeTrack::between(
                            joint.axis.component(transform.position),
                            end,
                            timing.end_frame,
                        )),
                    ),
                    EndValue::Angle(end) => (
                        AnimatedProperty::EulerAngle(joint.axis),
                        Track::Scalar(KeyframeTrack::between(
                            transform.angle_about(joint.axis),
                            end,
                            timing.end_frame,
                        )),
                    ),
                    EndValue::Orientation(end) => (
                        AnimatedProperty::Rotation,
                        Track::Rotation(KeyframeTrack::between(transform.rotation(), end, timing.end_frame)),
                    ),
                };
                Ok(JointAnimation {
                    name: format!("{}Animation", joint.name),
                    node,
                    property,
                    track,
                })
            })
            .collect()
    }
}

/// Direct mapping from a kinematic target to joint end values.
///
/// The mechanism's axes are decoupled enough that each joint's end value
/// depends only on the target, never on another joint's solution:
///
/// | role              | end value                                  |
/// |-------------------|--------------------------------------------|
/// | gimbal            | `position.x`                               |
/// | stand lower right | `position.y`                               |
/// | stand upper right | `position.z`                               |
/// | support arm       | `polar + 90°` about its axis               |
/// | needle            | current rotation, azimuth about its axis   |
///
/// Offsets are not clamped here.
pub struct TargetResolver;

impl TargetResolver {
    const OFFSET_ROLES: [(JointRole, Axis); 3] = [
        (JointRole::Gimbal, Axis::X),
        (JointRole::StandLowerRight, Axis::Y),
        (JointRole::StandUpperRight, Axis::Z),
    ];

    pub fn resolve<S: TransformStore + ?Sized>(
        rig: &Rig,
        store: &S,
        target: &KinematicTarget,
    ) -> Result<ResolvedTargets> {
        let mut targets = Vec::with_capacity(5);

        for (role, component) in Self::OFFSET_ROLES {
            let id = Self::require(rig, role)?;
            let end = component.component(target.position);
            Self::warn_outside(rig.get(id)?, end);
            targets.push(JointTarget { joint: id, end: EndValue::Offset(end) });
        }

        let support_arm = Self::require(rig, JointRole::SupportArm)?;
        let arm_end = target.polar + FRAC_PI_2;
        Self::warn_outside(rig.get(support_arm)?, arm_end.to_degrees());
        targets.push(JointTarget {
            joint: support_arm,
            end: EndValue::Angle(arm_end),
        });

        let needle_id = Self::require(rig, JointRole::Needle)?;
        let needle = rig.get(needle_id)?;
        let current = needle.transform(store)?.euler_angles();
        let end = quat_from_euler(needle.axis.with_component(current, target.azimuth));
        Self::warn_outside(needle, target.azimuth.to_degrees());
        targets.push(JointTarget {
            joint: needle_id,
            end: EndValue::Orientation(end),
        });

        log::debug!("Resolved {:?} into {} joint targets", target, targets.len());
        Ok(ResolvedTargets { targets })
    }

    fn require(rig: &Rig, role: JointRole) -> Result<JointId> {
        rig.find_role(role).ok_or(RigError::MissingRole(role))
    }

    fn warn_outside(joint: &Joint, value: f32) {
        if !joint.limits().contains(value) {
            log::warn!(
                "Target {:.2} for '{}' lies outside [{}, {}]",
                value,
                joint.name,
                joint.limits().low,
                joint.limits().high
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RigConfig;
    use crate::math::{euler_from_quat, Vec3};
    use crate::rig::RigBuilder;
    use crate::scene::SceneGraph;

    const EPS: f32 = 1e-4;

    fn standard() -> (Rig, SceneGraph) {
        let mut rig = RigConfig::default().build_rig().unwrap();
        let mut scene = SceneGraph::new();
        rig.instantiate(&mut scene).unwrap();
        (rig, scene)
    }

    #[test]
    fn resolves_reference_pose() {
        let (rig, scene) = standard();
        let target = KinematicTarget::new(Vec3::new(5.0, -20.0, 3.0), 30.0, 10.0);
        let resolved = TargetResolver::resolve(&rig, &scene, &target).unwrap();
        assert_eq!(resolved.len(), 5);

        let offset = |role| resolved.get(rig.find_role(role).unwrap());
        assert_eq!(offset(JointRole::Gimbal), Some(EndValue::Offset(5.0)));
        assert_eq!(offset(JointRole::StandLowerRight), Some(EndValue::Offset(-20.0)));
        assert_eq!(offset(JointRole::StandUpperRight), Some(EndValue::Offset(3.0)));

        let Some(EndValue::Angle(arm)) = offset(JointRole::SupportArm) else {
            panic!("support arm should resolve to an angle");
        };
        assert!((arm - (30.0f32.to_radians() + FRAC_PI_2)).abs() < EPS);
        assert!((arm.to_degrees() - 120.0).abs() < 1e-3);

        let Some(EndValue::Orientation(needle)) = offset(JointRole::Needle) else {
            panic!("needle should resolve to an orientation");
        };
        assert!((euler_from_quat(needle).z - (-10.0f32).to_radians()).abs() < EPS);
    }

    #[test]
    fn needle_keeps_current_pitch_and_yaw() {
        let (rig, mut scene) = standard();
        let needle = rig.by_role(JointRole::Needle).unwrap();
        let node = needle.node().unwrap();
        scene
            .transform_mut(node)
            .unwrap()
            .set_rotation(quat_from_euler(Vec3::new(0.1, -0.2, 0.3)));

        let target = KinematicTarget::new(Vec3::ZERO, 0.0, 20.0);
        let resolved = TargetResolver::resolve(&rig, &scene, &target).unwrap();
        let Some(EndValue::Orientation(end)) = resolved.get(rig.find("needle").unwrap()) else {
            panic!("needle should resolve to an orientation");
        };
        let angles = euler_from_quat(end);
        assert!((angles.x - 0.1).abs() < EPS);
        assert!((angles.y + 0.2).abs() < EPS);
        assert!((angles.z + 20.0f32.to_radians()).abs() < EPS);
    }

    #[test]
    fn offsets_are_not_clamped() {
        let (rig, scene) = standard();
        let target = KinematicTarget::new(Vec3::new(0.0, 150.0, 0.0), 0.0, 0.0);
        let resolved = TargetResolver::resolve(&rig, &scene, &target).unwrap();
        let lower = rig.find_role(JointRole::StandLowerRight).unwrap();
        assert_eq!(resolved.get(lower), Some(EndValue::Offset(150.0)));
    }

    #[test]
    fn missing_role_is_an_error() {
        let rig = RigBuilder::new()
            .add_translation("gimbal", "Gimbal", JointRole::Gimbal, -1.0, 1.0, Axis::X)
            .build()
            .unwrap();
        let scene = SceneGraph::new();
        let err = TargetResolver::resolve(&rig, &scene, &KinematicTarget::default()).unwrap_err();
        assert!(matches!(err, RigError::MissingRole(JointRole::StandLowerRight)));
    }

    #[test]
    fn animations_start_from_current_values() {
        let (rig, mut scene) = standard();
        let gimbal = rig.by_role(JointRole::Gimbal).unwrap();
        gimbal.set_value(&mut scene, 12.0).unwrap();

        let target = KinematicTarget::new(Vec3::new(40.0, 0.0, 0.0), 30.0, 0.0);
        let resolved = TargetResolver::resolve(&rig, &scene, &target).unwrap();
        let animations = resolved
            .animations(&rig, &scene, &AnimationTiming::default())
            .unwrap();
        assert_eq!(animations.len(), 5);

        let gimbal_anim = animations.iter().find(|a| a.name == "gimbalAnimation").unwrap();
        assert_eq!(gimbal_anim.property, AnimatedProperty::Position(Axis::X));
        let Track::Scalar(track) = &gimbal_anim.track else {
            panic!("gimbal track should be scalar");
        };
        assert_eq!(track.start(), Some(12.0));
        assert_eq!(track.end(), Some(40.0));
        assert_eq!(track.last_frame(), 60.0);

        let arm_anim = animations.iter().find(|a| a.name == "supportArmAnimation").unwrap();
        let Track::Scalar(arm_track) = &arm_anim.track else {
            panic!("support arm track should be scalar");
        };
        assert!((arm_track.start().unwrap() - FRAC_PI_2).abs() < EPS);
    }
}
