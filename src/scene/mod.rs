//! Scene seam
//!
//! Joints never own their transforms. The host scene graph does, and the rig
//! reaches it through [`TransformStore`]. [`SceneGraph`] is a minimal arena
//! implementation for headless use.

mod graph;

pub use graph::{SceneGraph, SceneNode};

use crate::math::Transform;

/// Handle to a transform node owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

pub trait TransformStore {
    fn transform(&self, node: NodeId) -> Option<&Transform>;
    fn transform_mut(&mut self, node: NodeId) -> Option<&mut Transform>;
    fn parent(&self, node: NodeId) -> Option<NodeId>;
}
