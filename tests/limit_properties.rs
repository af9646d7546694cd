//! Randomized checks of the limit invariants

use proptest::prelude::*;
use rig_kinematics::{check_bounds, ControllerState, RigConfig, SceneGraph, Session};
use rig_kinematics::math::Quat;

fn loaded_session() -> (Session, SceneGraph) {
    let mut session = Session::from_config(&RigConfig::default()).unwrap();
    let mut scene = SceneGraph::new();
    session.rig_mut().instantiate(&mut scene).unwrap();
    (session, scene)
}

fn selectable_names() -> Vec<String> {
    RigConfig::default()
        .joints
        .into_iter()
        .filter(|j| j.selectable)
        .map(|j| j.name)
        .collect()
}

proptest! {
    #[test]
    fn in_range_motion_passes_through(
        low in -500.0f32..0.0,
        high in 0.0f32..500.0,
        current_t in 0.0f32..=1.0,
        delta in -1000.0f32..1000.0,
    ) {
        let current = low + (high - low) * current_t;
        prop_assume!(current >= low && current <= high);
        let proposed = current + delta;
        prop_assume!(proposed >= low && proposed <= high);
        prop_assert_eq!(check_bounds(current, low, high, delta), delta);
    }

    #[test]
    fn accepted_motion_never_leaves_range(
        low in -500.0f32..0.0,
        high in 0.0f32..500.0,
        current_t in 0.0f32..=1.0,
        delta in -1000.0f32..1000.0,
    ) {
        let current = low + (high - low) * current_t;
        prop_assume!(current >= low && current <= high);
        let accepted = check_bounds(current, low, high, delta);
        prop_assert!(accepted == 0.0 || accepted == delta);
        let next = current + accepted;
        prop_assert!(next >= low && next <= high);
    }

    #[test]
    fn nudged_joint_stays_within_limits(
        joint in 0usize..6,
        deltas in prop::collection::vec(-300.0f32..300.0, 1..40),
    ) {
        let (mut session, mut scene) = loaded_session();
        let name = &selectable_names()[joint];
        session.select_by_name(&scene, name).unwrap();

        for delta in deltas {
            session.nudge_selected(&mut scene, delta).unwrap();
            let slider = session.slider_config(&scene).unwrap();
            prop_assert!(slider.value >= slider.min - 1e-3, "{} fell to {}", name, slider.value);
            prop_assert!(slider.value <= slider.max + 1e-3, "{} rose to {}", name, slider.value);
        }
    }

    #[test]
    fn controller_driven_joint_stays_within_limits(
        joint in 0usize..6,
        frames in prop::collection::vec((-180.0f32..180.0, -1.0f32..1.0), 1..60),
    ) {
        let (mut session, mut scene) = loaded_session();
        let name = &selectable_names()[joint];
        session.select_by_name(&scene, name).unwrap();
        session.toggle_controller_mode();

        for (roll, thumbstick_y) in frames {
            let controller = ControllerState {
                thumbstick_y,
                grip_rotation: Quat::from_rotation_z(roll.to_radians()),
                ..ControllerState::default()
            };
            session.update(&mut scene, &controller, 1.0 / 60.0).unwrap();
            let slider = session.slider_config(&scene).unwrap();
            prop_assert!(slider.value >= slider.min - 1e-3, "{} fell to {}", name, slider.value);
            prop_assert!(slider.value <= slider.max + 1e-3, "{} rose to {}", name, slider.value);
        }
    }
}
