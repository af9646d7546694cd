//! Host input mapping: the slider shown for the selected joint and the VR
//! controller roll mapping used in controller mode.

mod controller;
mod slider;

pub use controller::{ControllerMapping, ControllerState};
pub use slider::SliderConfig;
