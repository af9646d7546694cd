use super::joint::{Joint, JointId, JointKind, JointRole};
use super::limits::Limits;
use crate::error::{Result, RigError};
use crate::math::{Axis, Transform, Vec3};
use crate::scene::{NodeId, SceneGraph, TransformStore};
use std::collections::HashSet;

/// A fixed set of joints making up one mechanism.
#[derive(Debug, Clone)]
pub struct Rig {
    pub(crate) joints: Vec<Joint>,
}

impl Rig {
    pub fn builder() -> RigBuilder {
        RigBuilder::new()
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    pub fn joint_count(&self) -> usize {
        self.joints.len()
    }

    pub fn joint(&self, id: JointId) -> Option<&Joint> {
        self.joints.get(id.0)
    }

    pub fn get(&self, id: JointId) -> Result<&Joint> {
        self.joint(id)
            .ok_or_else(|| RigError::UnknownJoint(format!("#{}", id.0)))
    }

    pub fn find(&self, name: &str) -> Option<JointId> {
        self.joints.iter().position(|j| j.name == name).map(JointId)
    }

    pub fn find_role(&self, role: JointRole) -> Option<JointId> {
        self.joints.iter().position(|j| j.role == role).map(JointId)
    }

    pub fn by_role(&self, role: JointRole) -> Result<&Joint> {
        self.find_role(role)
            .and_then(|id| self.joint(id))
            .ok_or(RigError::MissingRole(role))
    }

    /// Joints offered to the user as selection buttons, in rig order.
    pub fn selectable(&self) -> impl Iterator<Item = (JointId, &Joint)> {
        self.joints
            .iter()
            .enumerate()
            .filter(|(_, j)| j.selectable)
            .map(|(i, j)| (JointId(i), j))
    }

    /// Binds a joint to its transform node. A joint is bound exactly once.
    pub fn bind(&mut self, id: JointId, node: NodeId) -> Result<()> {
        let joint = self
            .joints
            .get_mut(id.0)
            .ok_or_else(|| RigError::UnknownJoint(format!("#{}", id.0)))?;
        if joint.node.is_some() {
            return Err(RigError::AlreadyBound(joint.name.clone()));
        }
        log::debug!("Bound joint '{}' to node {:?}", joint.name, node);
        joint.node = Some(node);
        Ok(())
    }

    /// Binds every unbound joint to the scene node carrying its name. Run once
    /// the host finished loading the rig's meshes. Returns how many joints
    /// were bound.
    pub fn bind_from_scene(&mut self, scene: &SceneGraph) -> usize {
        let mut bound = 0;
        for joint in self.joints.iter_mut().filter(|j| j.node.is_none()) {
            match scene.find(&joint.name) {
                Some(node) => {
                    joint.node = Some(node);
                    bound += 1;
                }
                None => log::warn!("No scene node named '{}'", joint.name),
            }
        }
        log::info!("Bound {} of {} joints", bound, self.joints.len());
        bound
    }

    pub fn is_fully_bound(&self) -> bool {
        self.joints.iter().all(Joint::is_bound)
    }

    /// The joint whose node is `node` or its nearest ancestor. Used to map a
    /// picked mesh back to the component it belongs to.
    pub fn joint_for_node<S: TransformStore + ?Sized>(&self, store: &S, node: NodeId) -> Option<JointId> {
        let mut current = Some(node);
        while let Some(n) = current {
            if let Some(i) = self.joints.iter().position(|j| j.node == Some(n)) {
                return Some(JointId(i));
            }
            current = store.parent(n);
        }
        None
    }

    /// Parents joint nodes according to each joint's `parent` and puts
    /// Euler-mode joints at their rest rotation.
    pub fn construct_hierarchy(&self, scene: &mut SceneGraph) -> Result<()> {
        for joint in &self.joints {
            let node = joint.node()?;
            if let Some(parent_name) = &joint.parent {
                let parent = self
                    .find(parent_name)
                    .ok_or_else(|| RigError::UnknownParent {
                        joint: joint.name.clone(),
                        parent: parent_name.clone(),
                    })
                    .and_then(|id| self.get(id)?.node())?;
                if !scene.set_parent(node, Some(parent)) {
                    log::warn!("Could not parent '{}' under '{}'", joint.name, parent_name);
                }
            }
            if let Some(rest) = joint.rest_rotation {
                let transform = scene
                    .transform_mut(node)
                    .ok_or(RigError::UnknownNode(node))?;
                let position = transform.position;
                *transform = Transform::from_euler(position, rest * std::f32::consts::PI / 180.0);
            }
        }
        Ok(())
    }

    /// Adds one scene node per joint, named after it, binds the joints and
    /// builds the hierarchy. Stands in for the host's mesh loading.
    pub fn instantiate(&mut self, scene: &mut SceneGraph) -> Result<()> {
        for joint in &self.joints {
            if scene.find(&joint.name).is_none() {
                scene.add_node(joint.name.clone(), Transform::IDENTITY);
            }
        }
        self.bind_from_scene(scene);
        self.construct_hierarchy(scene)
    }
}

pub struct RigBuilder {
    joints: Vec<Joint>,
}

impl RigBuilder {
    pub fn new() -> Self {
        Self { joints: Vec::new() }
    }

    pub fn add_joint(mut self, joint: Joint) -> Self {
        self.joints.push(joint);
        self
    }

    pub fn add_rotation(
        self,
        name: &str,
        label: &str,
        role: JointRole,
        low_degrees: f32,
        high_degrees: f32,
        axis: Axis,
    ) -> Self {
        let kind = JointKind::Rotation { limits: Limits::new(low_degrees, high_degrees) };
        self.add_joint(Joint::new(name, label, role, kind, axis))
    }

    pub fn add_translation(
        self,
        name: &str,
        label: &str,
        role: JointRole,
        low: f32,
        high: f32,
        axis: Axis,
    ) -> Self {
        let kind = JointKind::Translation { limits: Limits::new(low, high) };
        self.add_joint(Joint::new(name, label, role, kind, axis))
    }

    /// Adjusts the most recently added joint.
    pub fn with_parent(mut self, parent: &str) -> Self {
        if let Some(joint) = self.joints.last_mut() {
            joint.parent = Some(parent.to_string());
        }
        self
    }

    pub fn with_rest_rotation(mut self, degrees: Vec3) -> Self {
        if let Some(joint) = self.joints.last_mut() {
            joint.rest_rotation = Some(degrees);
        }
        self
    }

    pub fn hidden(mut self) -> Self {
        if let Some(joint) = self.joints.last_mut() {
            joint.selectable = false;
        }
        self
    }

    pub fn build(self) -> Result<Rig> {
        self.validate()?;
        Ok(Rig { joints: self.joints })
    }

    fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        let mut roles = HashSet::new();
        for joint in &self.joints {
            if !names.insert(joint.name.as_str()) {
                return Err(RigError::DuplicateJoint(joint.name.clone()));
            }
            if !roles.insert(joint.role) {
                return Err(RigError::DuplicateRole(joint.role));
            }
            let limits = joint.limits();
            if !limits.is_valid() {
                return Err(RigError::InvalidLimits {
                    name: joint.name.clone(),
                    low: limits.low,
                    high: limits.high,
                });
            }
        }
        for joint in &self.joints {
            if let Some(parent) = &joint.parent {
                if !names.contains(parent.as_str()) {
                    return Err(RigError::UnknownParent {
                        joint: joint.name.clone(),
                        parent: parent.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

impl Default for RigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
