//! WASM entry point - the rig session exposed to a browser host
//!
//! The host page owns rendering and WebXR input. It forwards GUI events and
//! per-frame controller state here, then reads node transforms back to pose
//! its meshes.

use crate::config::RigConfig;
use crate::input::ControllerState;
use crate::kinematics::KinematicInput;
use crate::math::Quat;
use crate::scene::{SceneGraph, TransformStore};
use crate::session::{Mode, Session};
use wasm_bindgen::prelude::*;

fn to_js(err: crate::error::RigError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct WebSession {
    session: Session,
    scene: SceneGraph,
}

#[wasm_bindgen]
impl WebSession {
    /// Builds the rig from a TOML config, or the built-in needle rig when
    /// `config` is empty.
    #[wasm_bindgen(constructor)]
    pub fn new(config: &str) -> Result<WebSession, JsValue> {
        let config = if config.trim().is_empty() {
            RigConfig::default()
        } else {
            RigConfig::from_toml_str(config).map_err(to_js)?
        };
        let session = Session::from_config(&config).map_err(to_js)?;
        Ok(Self {
            session,
            scene: SceneGraph::new(),
        })
    }

    /// Asset-load completion: creates one node per joint and binds them.
    #[wasm_bindgen(js_name = assetsLoaded)]
    pub fn assets_loaded(&mut self) -> Result<(), JsValue> {
        self.session.rig_mut().instantiate(&mut self.scene).map_err(to_js)
    }

    /// Names of the joints to show as selection buttons.
    #[wasm_bindgen(js_name = selectableJoints)]
    pub fn selectable_joints(&self) -> Vec<String> {
        self.session
            .rig()
            .selectable()
            .map(|(_, j)| j.name.clone())
            .collect()
    }

    /// Returns `[min, max, value]` for the slider.
    pub fn select(&mut self, name: &str) -> Result<Vec<f32>, JsValue> {
        let (_, slider) = self.session.select_by_name(&self.scene, name).map_err(to_js)?;
        Ok(vec![slider.min, slider.max, slider.value])
    }

    /// Returns the slider header text.
    #[wasm_bindgen(js_name = sliderChanged)]
    pub fn slider_changed(&mut self, value: f32) -> Result<String, JsValue> {
        let slider = self
            .session
            .on_slider_changed(&mut self.scene, value)
            .map_err(to_js)?;
        Ok(slider.header())
    }

    /// `index` follows the panel order: X, Y, Z, Polar, Azimuth. Returns
    /// the slider header; read `markerTransforms` afterwards to move the
    /// preview markers.
    #[wasm_bindgen(js_name = kinematicSliderChanged)]
    pub fn kinematic_slider_changed(&mut self, index: usize, value: f32) -> Option<String> {
        let input = KinematicInput::ALL.get(index)?;
        let (header, _) = self.session.set_kinematic_input(*input, value);
        Some(header)
    }

    /// Target preview markers as `[px, py, pz, polar x, polar y, polar z,
    /// azimuth x, azimuth y, azimuth z]`, rotations as Euler radians.
    #[wasm_bindgen(js_name = markerTransforms)]
    pub fn marker_transforms(&self) -> Vec<f32> {
        let markers = self.session.target().markers();
        [markers.position, markers.polar_rotation, markers.azimuth_rotation]
            .iter()
            .flat_map(|v| v.to_array())
            .collect()
    }

    #[wasm_bindgen(js_name = enterKinematics)]
    pub fn enter_kinematics(&mut self) {
        self.session.set_mode(Mode::Kinematics);
    }

    #[wasm_bindgen(js_name = enterPlayground)]
    pub fn enter_playground(&mut self) {
        self.session.set_mode(Mode::Playground);
    }

    pub fn go(&mut self) -> Result<usize, JsValue> {
        self.session.perform_kinematics(&self.scene).map_err(to_js)
    }

    /// Per-frame hook. `grip` is the grip rotation quaternion `[x, y, z, w]`.
    /// Returns the selected joint's value when the controller moved it.
    pub fn update(
        &mut self,
        dt: f32,
        a_pressed: bool,
        thumbstick_y: f32,
        grip: &[f32],
    ) -> Result<Option<f32>, JsValue> {
        let grip_rotation = match grip {
            [x, y, z, w] => Quat::from_xyzw(*x, *y, *z, *w).normalize(),
            _ => Quat::IDENTITY,
        };
        let controller = ControllerState {
            a_pressed,
            thumbstick_y,
            grip_rotation,
        };
        let outcome = self
            .session
            .update(&mut self.scene, &controller, dt)
            .map_err(to_js)?;
        Ok(outcome.driven.map(|(_, _, value)| value))
    }

    /// Local transform of a joint's node as
    /// `[px, py, pz, qx, qy, qz, qw]`, or empty when unknown.
    #[wasm_bindgen(js_name = nodeTransform)]
    pub fn node_transform(&self, name: &str) -> Vec<f32> {
        let Some(transform) = self.scene.find(name).and_then(|n| self.scene.transform(n)) else {
            return Vec::new();
        };
        let p = transform.position;
        let q = transform.rotation();
        vec![p.x, p.y, p.z, q.x, q.y, q.z, q.w]
    }
}

#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Warn).expect("Failed to init logger");
}
