//! Interactive session: the state behind the host's event handlers and
//! per-frame hook.

use crate::animation::{AnimationPlayer, AnimationTiming};
use crate::config::RigConfig;
use crate::error::{Result, RigError};
use crate::input::{ControllerMapping, ControllerState, SliderConfig};
use crate::kinematics::{KinematicInput, KinematicTarget, TargetMarkers, TargetResolver};
use crate::rig::{JointId, JointKind, JointRole, Rig, Selection, SelectionChange};
use crate::scene::{NodeId, TransformStore};

/// Which panel the host is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Free manipulation of the selected joint.
    #[default]
    Playground,
    /// Entering a target pose.
    Kinematics,
    /// Host-side settings panel. Leaves rig state alone.
    Settings,
}

/// What happened during one [`Session::update`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameOutcome {
    pub controller_mode: bool,
    /// Selected joint, accepted delta and resulting value when the
    /// controller drove it this frame.
    pub driven: Option<(JointId, f32, f32)>,
    pub finished_animations: usize,
}

pub struct Session {
    rig: Rig,
    selection: Selection,
    target: KinematicTarget,
    player: AnimationPlayer,
    mapping: ControllerMapping,
    timing: AnimationTiming,
    controller_mode: bool,
    mode: Mode,
}

impl Session {
    pub fn new(rig: Rig) -> Self {
        let timing = AnimationTiming::default();
        Self {
            rig,
            selection: Selection::new(),
            target: KinematicTarget::default(),
            player: AnimationPlayer::new(timing.frame_rate),
            mapping: ControllerMapping::default(),
            timing,
            controller_mode: false,
            mode: Mode::default(),
        }
    }

    pub fn from_config(config: &RigConfig) -> Result<Self> {
        Self::new(config.build_rig()?)
            .with_mapping(config.controller)
            .with_timing(config.animation)
    }

    pub fn with_mapping(mut self, mapping: ControllerMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_timing(mut self, timing: AnimationTiming) -> Result<Self> {
        timing.validate()?;
        self.timing = timing;
        self.player = AnimationPlayer::new(timing.frame_rate);
        Ok(self)
    }

    pub fn rig(&self) -> &Rig {
        &self.rig
    }

    /// Mutable access for binding transforms once assets are loaded.
    pub fn rig_mut(&mut self) -> &mut Rig {
        &mut self.rig
    }

    pub fn selection(&self) -> Option<JointId> {
        self.selection.current()
    }

    pub fn target(&self) -> &KinematicTarget {
        &self.target
    }

    pub fn player(&self) -> &AnimationPlayer {
        &self.player
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn controller_mode(&self) -> bool {
        self.controller_mode
    }

    /// Switches panels. Entering kinematics mode drops the selection and
    /// leaves controller mode.
    pub fn set_mode(&mut self, mode: Mode) -> Mode {
        let previous = std::mem::replace(&mut self.mode, mode);
        if mode == Mode::Kinematics {
            self.selection.clear();
            self.controller_mode = false;
        }
        log::debug!("Mode {:?} -> {:?}", previous, mode);
        previous
    }

    pub fn select<S: TransformStore + ?Sized>(
        &mut self,
        store: &S,
        id: JointId,
    ) -> Result<(SelectionChange, SliderConfig)> {
        let joint = self.rig.get(id)?;
        let slider = SliderConfig::for_joint(joint, store)?;
        let change = self.selection.select(id);
        log::debug!("Selected '{}' ({})", joint.name, slider.header());
        Ok((change, slider))
    }

    pub fn select_by_name<S: TransformStore + ?Sized>(
        &mut self,
        store: &S,
        name: &str,
    ) -> Result<(SelectionChange, SliderConfig)> {
        let id = self
            .rig
            .find(name)
            .ok_or_else(|| RigError::UnknownJoint(name.to_string()))?;
        self.select(store, id)
    }

    /// Selects the joint owning a picked node. Picks outside the rig leave
    /// the selection untouched and return `None`.
    pub fn select_node<S: TransformStore + ?Sized>(
        &mut self,
        store: &S,
        node: NodeId,
    ) -> Result<Option<(SelectionChange, SliderConfig)>> {
        match self.rig.joint_for_node(store, node) {
            Some(id) => self.select(store, id).map(Some),
            None => Ok(None),
        }
    }

    pub fn deselect(&mut self) -> Option<JointId> {
        self.selection.clear()
    }

    pub fn slider_config<S: TransformStore + ?Sized>(&self, store: &S) -> Result<SliderConfig> {
        let id = self.selection.current().ok_or(RigError::NoSelection)?;
        SliderConfig::for_joint(self.rig.get(id)?, store)
    }

    /// Slider drag on the selected joint: writes the value (clamped to the
    /// joint's limits) and returns the refreshed slider.
    pub fn on_slider_changed<S: TransformStore + ?Sized>(
        &mut self,
        store: &mut S,
        value: f32,
    ) -> Result<SliderConfig> {
        let id = self.selection.current().ok_or(RigError::NoSelection)?;
        let joint = self.rig.get(id)?;
        let written = joint.set_value(store, value)?;
        log::debug!("Slider set '{}' to {}", joint.name, written);
        SliderConfig::for_joint(joint, store)
    }

    /// Moves the selected joint by a bounded delta and returns the delta
    /// applied.
    pub fn nudge_selected<S: TransformStore + ?Sized>(&mut self, store: &mut S, delta: f32) -> Result<f32> {
        let id = self.selection.current().ok_or(RigError::NoSelection)?;
        self.rig.get(id)?.apply_delta(store, delta)
    }

    /// Kinematic slider change. Returns the slider header text and where
    /// the target markers now sit.
    pub fn set_kinematic_input(&mut self, input: KinematicInput, value: f32) -> (String, TargetMarkers) {
        self.target.set_input(input, value);
        (input.header(self.target.input(input)), self.target.markers())
    }

    pub fn set_target(&mut self, target: KinematicTarget) {
        self.target = target;
    }

    /// Resolves the current target and starts one animation per driven
    /// joint. Returns how many animations were started.
    pub fn perform_kinematics<S: TransformStore + ?Sized>(&mut self, store: &S) -> Result<usize> {
        let resolved = TargetResolver::resolve(&self.rig, store, &self.target)?;
        let animations = resolved.animations(&self.rig, store, &self.timing)?;
        let count = animations.len();
        for animation in animations {
            self.player.begin(animation);
        }
        log::info!("Kinematics started {} animations", count);
        Ok(count)
    }

    pub fn toggle_controller_mode(&mut self) -> bool {
        self.controller_mode = !self.controller_mode;
        log::info!("Controller mode {}", if self.controller_mode { "on" } else { "off" });
        self.controller_mode
    }

    /// Per-frame hook: handles the controller toggle, drives the selected
    /// joint in controller mode and advances running animations.
    pub fn update<S: TransformStore + ?Sized>(
        &mut self,
        store: &mut S,
        controller: &ControllerState,
        dt: f32,
    ) -> Result<FrameOutcome> {
        if controller.a_pressed {
            self.toggle_controller_mode();
        }

        let mut outcome = FrameOutcome {
            controller_mode: self.controller_mode,
            ..FrameOutcome::default()
        };

        if let (true, Some(id)) = (self.controller_mode, self.selection.current()) {
            outcome.driven = Some(self.drive(store, id, controller)?);
        }

        outcome.finished_animations = self.player.advance(store, dt);
        Ok(outcome)
    }

    fn drive<S: TransformStore + ?Sized>(
        &self,
        store: &mut S,
        id: JointId,
        controller: &ControllerState,
    ) -> Result<(JointId, f32, f32)> {
        let joint = self.rig.get(id)?;
        let roll = controller.grip_roll();
        let applied = match joint.kind {
            JointKind::Rotation { .. } => {
                let delta = self.mapping.rotation_delta(roll, controller.thumbstick_y);
                joint.apply_delta(store, delta)?
            }
            JointKind::Translation { .. } => {
                let delta = self.mapping.translation_delta(roll, controller.thumbstick_y);
                let mut accepted = joint.checked_delta(store, delta)?;
                if joint.role == JointRole::Trajectory {
                    accepted *= self.mapping.trajectory_gain;
                }
                if accepted != 0.0 {
                    joint.offset(store, accepted)?;
                }
                accepted
            }
        };
        Ok((id, applied, joint.current_value(store)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{Quat, Vec3};
    use crate::scene::SceneGraph;

    fn session() -> (Session, SceneGraph) {
        let mut session = Session::from_config(&RigConfig::default()).unwrap();
        let mut scene = SceneGraph::new();
        session.rig_mut().instantiate(&mut scene).unwrap();
        (session, scene)
    }

    fn rolled(degrees: f32) -> ControllerState {
        ControllerState {
            grip_rotation: Quat::from_rotation_z(degrees.to_radians()),
            ..ControllerState::default()
        }
    }

    #[test]
    fn slider_requires_selection() {
        let (mut session, mut scene) = session();
        assert!(matches!(session.on_slider_changed(&mut scene, 3.0), Err(RigError::NoSelection)));
    }

    #[test]
    fn slider_moves_selected_joint() {
        let (mut session, mut scene) = session();
        let (change, slider) = session.select_by_name(&scene, "gimbal").unwrap();
        assert_eq!(change.previous, None);
        assert_eq!(slider.value, 0.0);

        let slider = session.on_slider_changed(&mut scene, 42.0).unwrap();
        assert_eq!(slider.value, 42.0);
        assert_eq!(slider.header(), "Gimbal: 42");
    }

    #[test]
    fn reselect_reports_previous() {
        let (mut session, scene) = session();
        let (first, _) = session.select_by_name(&scene, "needle").unwrap();
        let (second, _) = session.select_by_name(&scene, "trajectory").unwrap();
        assert_eq!(second.previous, Some(first.current));
        assert!(session.select_by_name(&scene, "nope").is_err());
    }

    #[test]
    fn a_button_toggles_controller_mode() {
        let (mut session, mut scene) = session();
        let press = ControllerState {
            a_pressed: true,
            ..ControllerState::default()
        };
        assert!(session.update(&mut scene, &press, 0.016).unwrap().controller_mode);
        assert!(!session.update(&mut scene, &press, 0.016).unwrap().controller_mode);
    }

    #[test]
    fn controller_drives_selected_rotation_until_limit() {
        let (mut session, mut scene) = session();
        session.select_by_name(&scene, "needle").unwrap();
        session.toggle_controller_mode();

        let frame = rolled(90.0);
        let mut last = 0.0;
        for _ in 0..100_000 {
            let outcome = session.update(&mut scene, &frame, 0.016).unwrap();
            let (_, applied, value) = outcome.driven.unwrap();
            last = value;
            if applied == 0.0 {
                break;
            }
        }
        assert!(last <= 51.0 + 1e-3);
        assert!(last > 50.0);
    }

    #[test]
    fn trajectory_delta_is_scaled() {
        let (mut session, mut scene) = session();
        session.select_by_name(&scene, "trajectory").unwrap();
        session.toggle_controller_mode();

        let outcome = session.update(&mut scene, &rolled(-30.0), 0.016).unwrap();
        let (_, applied, value) = outcome.driven.unwrap();
        let expected = 30.0 * 0.05 * (1.0 + 0.000005) * 0.2;
        assert!((applied - expected).abs() < 1e-4);
        assert!((value - expected).abs() < 1e-4);
    }

    #[test]
    fn dead_zone_leaves_joint_still() {
        let (mut session, mut scene) = session();
        session.select_by_name(&scene, "gimbal").unwrap();
        session.toggle_controller_mode();
        let outcome = session.update(&mut scene, &rolled(2.0), 0.016).unwrap();
        assert_eq!(outcome.driven.map(|d| d.1), Some(0.0));
    }

    #[test]
    fn kinematics_animates_to_target() {
        let (mut session, mut scene) = session();
        session.set_kinematic_input(KinematicInput::X, 5.0);
        session.set_kinematic_input(KinematicInput::Y, -20.0);
        session.set_kinematic_input(KinematicInput::Z, 3.0);
        session.set_kinematic_input(KinematicInput::Polar, 30.0);
        let (header, markers) = session.set_kinematic_input(KinematicInput::Azimuth, 10.0);
        assert_eq!(header, "Azimuth: 10");
        assert_eq!(markers.position, Vec3::new(5.0, -20.0, 3.0));
        assert!((markers.polar_rotation.x + 30.0f32.to_radians()).abs() < 1e-6);
        assert!((markers.azimuth_rotation.y - 10.0f32.to_radians()).abs() < 1e-6);

        assert_eq!(session.perform_kinematics(&scene).unwrap(), 5);
        let mut finished = 0;
        for _ in 0..200 {
            finished += session
                .update(&mut scene, &ControllerState::default(), 1.0 / 60.0)
                .unwrap()
                .finished_animations;
        }
        assert_eq!(finished, 5);
        assert!(!session.player().is_playing());

        let value = |name: &str| {
            let id = session.rig().find(name).unwrap();
            session.rig().get(id).unwrap().current_value(&scene).unwrap()
        };
        assert!((value("gimbal") - 5.0).abs() < 1e-4);
        assert!((value("standLowerRight") + 20.0).abs() < 1e-4);
        assert!((value("standUpperRight") - 3.0).abs() < 1e-4);
        assert!((value("supportArm") - 120.0).abs() < 1e-3);
        assert!((value("needle") + 10.0).abs() < 1e-3);
    }

    #[test]
    fn kinematics_before_binding_is_an_error() {
        let mut session = Session::from_config(&RigConfig::default()).unwrap();
        let scene = SceneGraph::new();
        assert!(matches!(session.perform_kinematics(&scene), Err(RigError::Unbound(_))));
    }

    #[test]
    fn entering_kinematics_mode_clears_selection() {
        let (mut session, scene) = session();
        session.select_by_name(&scene, "needle").unwrap();
        session.toggle_controller_mode();
        assert_eq!(session.set_mode(Mode::Kinematics), Mode::Playground);
        assert_eq!(session.selection(), None);
        assert!(!session.controller_mode());
    }

    #[test]
    fn settings_mode_keeps_selection_and_controller() {
        let (mut session, scene) = session();
        session.select_by_name(&scene, "needle").unwrap();
        session.toggle_controller_mode();
        session.set_mode(Mode::Settings);
        assert_eq!(session.selection(), session.rig().find("needle"));
        assert!(session.controller_mode());
    }

    #[test]
    fn invalid_timing_is_rejected() {
        let mut config = RigConfig::default();
        config.animation.frame_rate = 0.0;
        assert!(matches!(Session::from_config(&config), Err(RigError::InvalidTiming { .. })));
    }

    #[test]
    fn picking_child_mesh_selects_joint() {
        let (mut session, mut scene) = session();
        let gimbal = session.rig().by_role(JointRole::Gimbal).unwrap().node().unwrap();
        let mesh = scene.add_node("gimbal_mesh", crate::math::Transform::from_position(Vec3::ONE));
        scene.set_parent(mesh, Some(gimbal));

        let picked = session.select_node(&scene, mesh).unwrap();
        assert!(picked.is_some());
        assert_eq!(session.selection(), session.rig().find("gimbal"));
    }
}
