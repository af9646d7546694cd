use super::{NodeId, TransformStore};
use crate::math::{Mat4, Transform};

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub transform: Transform,
}

/// Flat arena of named transform nodes with parent links.
///
/// Stands in for the host scene graph when the rig runs headless.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn add_node(&mut self, name: impl Into<String>, transform: Transform) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.into(),
            parent: None,
            transform,
        });
        id
    }

    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.name == name).map(NodeId)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Re-parents `child`, keeping its local transform. Returns false when
    /// either node is unknown or the link would create a cycle.
    pub fn set_parent(&mut self, child: NodeId, parent: Option<NodeId>) -> bool {
        if self.node(child).is_none() {
            return false;
        }
        if let Some(p) = parent {
            if self.node(p).is_none() || p == child || self.ancestors(p).any(|a| a == child) {
                return false;
            }
        }
        self.nodes[child.0].parent = parent;
        true
    }

    /// Parents of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.node(id).and_then(|n| n.parent), move |p| {
            self.node(*p).and_then(|n| n.parent)
        })
    }

    pub fn world_matrix(&self, id: NodeId) -> Option<Mat4> {
        let mut matrix = self.node(id)?.transform.to_matrix();
        for ancestor in self.ancestors(id) {
            matrix = self.nodes[ancestor.0].transform.to_matrix() * matrix;
        }
        Some(matrix)
    }
}

impl TransformStore for SceneGraph {
    fn transform(&self, node: NodeId) -> Option<&Transform> {
        self.nodes.get(node.0).map(|n| &n.transform)
    }

    fn transform_mut(&mut self, node: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(node.0).map(|n| &mut n.transform)
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(node.0).and_then(|n| n.parent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Vec3;

    #[test]
    fn find_returns_first_node_with_name() {
        let mut scene = SceneGraph::new();
        let a = scene.add_node("a", Transform::IDENTITY);
        scene.add_node("b", Transform::IDENTITY);
        assert_eq!(scene.find("a"), Some(a));
        assert_eq!(scene.find("missing"), None);
    }

    #[test]
    fn set_parent_rejects_cycles() {
        let mut scene = SceneGraph::new();
        let a = scene.add_node("a", Transform::IDENTITY);
        let b = scene.add_node("b", Transform::IDENTITY);
        assert!(scene.set_parent(b, Some(a)));
        assert!(!scene.set_parent(a, Some(b)));
        assert!(!scene.set_parent(a, Some(a)));
    }

    #[test]
    fn world_matrix_composes_parents() {
        let mut scene = SceneGraph::new();
        let a = scene.add_node("a", Transform::from_position(Vec3::new(1.0, 0.0, 0.0)));
        let b = scene.add_node("b", Transform::from_position(Vec3::new(0.0, 2.0, 0.0)));
        scene.set_parent(b, Some(a));

        let origin = scene.world_matrix(b).unwrap().transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-5);
        assert_eq!(scene.ancestors(b).collect::<Vec<_>>(), vec![a]);
    }
}
