//! Arena-backed scene graph

use log::{debug, trace, warn};
use slotmap::{new_key_type, SlotMap};

use crate::debug::DebugDrawSystem;
use crate::foundation::math::{Matrix3, Vector2};

use super::node_transform::{replace_rotation, replace_scale};
use super::{NodeHooks, NodeTransform, SceneError};

new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`]
    pub struct NodeId;
}

#[derive(Debug, Clone)]
struct SceneNode<T> {
    local: Matrix3,
    global: Matrix3,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    payload: T,
}

/// A forest of transform nodes carrying payloads of type `T`
///
/// Nodes start out as unattached roots with an identity transform. The only
/// ways to change a node's parent are [`SceneGraph::add_child`],
/// [`SceneGraph::remove_child`] and destroying the parent.
#[derive(Debug, Clone)]
pub struct SceneGraph<T> {
    nodes: SlotMap<NodeId, SceneNode<T>>,
    roots: Vec<NodeId>,
}

impl<T> Default for SceneGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SceneGraph<T> {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    /// Create a standalone root node
    pub fn create_node(&mut self, payload: T) -> NodeId {
        let id = self.nodes.insert(SceneNode {
            local: Matrix3::identity(),
            global: Matrix3::identity(),
            parent: None,
            children: Vec::new(),
            payload,
        });
        self.roots.push(id);
        trace!("Created scene node {:?}", id);
        id
    }

    /// Create a node and attach it under `parent` in one step
    pub fn create_child(&mut self, parent: NodeId, payload: T) -> Result<NodeId, SceneError> {
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        let id = self.create_node(payload);
        self.add_child(parent, id)?;
        Ok(id)
    }

    /// Attach `child` under `parent`, appending it to the child list
    ///
    /// Fails without touching the tree if `child` already has a parent, if it
    /// is `parent` itself, or if `parent` lies inside `child`'s subtree. On
    /// success the child's subtree gets its global transforms recomputed.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if let Err(err) = self.check_attach(parent, child) {
            warn!("Rejected scene attachment: {}", err);
            return Err(err);
        }

        self.roots.retain(|&root| root != child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        self.propagate(child);
        debug!("Attached {:?} under {:?}", child, parent);
        Ok(())
    }

    fn check_attach(&self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let child_node = self.nodes.get(child).ok_or(SceneError::UnknownNode(child))?;
        if !self.nodes.contains_key(parent) {
            return Err(SceneError::UnknownNode(parent));
        }
        if parent == child {
            return Err(SceneError::SelfAttachment(child));
        }
        if let Some(existing) = child_node.parent {
            return Err(SceneError::AlreadyAttached { child, parent: existing });
        }
        if self.is_ancestor(child, parent) {
            return Err(SceneError::CyclicAttachment { child, parent });
        }
        Ok(())
    }

    /// Detach `child` from `parent`; it becomes a root
    ///
    /// Returns `false` (and does nothing) if `child` is not one of
    /// `parent`'s children.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        let Some(parent_node) = self.nodes.get_mut(parent) else {
            return false;
        };
        let Some(index) = parent_node.children.iter().position(|&c| c == child) else {
            return false;
        };
        parent_node.children.remove(index);

        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        self.roots.push(child);
        self.propagate(child);
        debug!("Detached {:?} from {:?}", child, parent);
        true
    }

    /// Destroy a node, returning its payload
    ///
    /// Its children are orphaned rather than destroyed: each becomes a root,
    /// in child order, with its global transform recomputed.
    pub fn destroy_node(&mut self, id: NodeId) -> Option<T> {
        let node = self.nodes.remove(id)?;

        match node.parent {
            Some(parent) => {
                if let Some(parent_node) = self.nodes.get_mut(parent) {
                    parent_node.children.retain(|&c| c != id);
                }
            }
            None => self.roots.retain(|&root| root != id),
        }

        for &child in &node.children {
            if let Some(child_node) = self.nodes.get_mut(child) {
                child_node.parent = None;
            }
            self.roots.push(child);
            self.propagate(child);
        }

        debug!("Destroyed scene node {:?} ({} children orphaned)", id, node.children.len());
        Some(node.payload)
    }

    /// True if `ancestor` is `node` or lies on `node`'s parent chain
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    /// Parent of a node (`None` for roots and unknown ids)
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// Children of a node in attachment order
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(|node| node.children.as_slice()).unwrap_or(&[])
    }

    /// Number of direct children
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Child at `index`
    pub fn child(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Root nodes in creation/detach order
    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Check if a node is alive
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if there are no nodes
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Payload of a node
    pub fn payload(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id).map(|node| &node.payload)
    }

    /// Mutable payload of a node
    pub fn payload_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id).map(|node| &mut node.payload)
    }

    /// All live nodes with their payloads, in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &T)> {
        self.nodes.iter().map(|(id, node)| (id, &node.payload))
    }

    /// Local transform relative to the parent
    pub fn local_transform(&self, id: NodeId) -> Option<Matrix3> {
        self.nodes.get(id).map(|node| node.local)
    }

    /// Global transform in the root frame
    pub fn global_transform(&self, id: NodeId) -> Option<Matrix3> {
        self.nodes.get(id).map(|node| node.global)
    }

    /// Global position
    pub fn global_position(&self, id: NodeId) -> Option<Vector2> {
        self.nodes.get(id).map(|node| node.global.translation())
    }

    /// Global rotation in radians
    pub fn global_rotation(&self, id: NodeId) -> Option<f32> {
        self.nodes.get(id).map(|node| node.global.rotation_z())
    }

    /// Subtree of `id` in depth-first pre-order, `id` first
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get(current) else {
                continue;
            };
            order.push(current);
            stack.extend(node.children.iter().rev().copied());
        }
        order
    }

    fn mutate_local(&mut self, id: NodeId, f: impl FnOnce(&mut Matrix3)) -> Result<(), SceneError> {
        let node = self.nodes.get_mut(id).ok_or(SceneError::UnknownNode(id))?;
        f(&mut node.local);
        self.propagate(id);
        Ok(())
    }

    /// Replace the whole local transform
    pub fn set_local_transform(&mut self, id: NodeId, local: Matrix3) -> Result<(), SceneError> {
        self.mutate_local(id, |m| *m = local)
    }

    /// Replace the local position, keeping rotation and scale
    pub fn set_position(&mut self, id: NodeId, position: Vector2) -> Result<(), SceneError> {
        self.mutate_local(id, |m| m.set_translation(position.x, position.y))
    }

    /// Replace the local rotation, keeping scale and position
    pub fn set_rotation(&mut self, id: NodeId, radians: f32) -> Result<(), SceneError> {
        self.mutate_local(id, |m| replace_rotation(m, radians))
    }

    /// Replace the local scale, keeping rotation and position
    pub fn set_scale(&mut self, id: NodeId, scale: Vector2) -> Result<(), SceneError> {
        self.mutate_local(id, |m| replace_scale(m, scale))
    }

    /// Move along the node's own axes
    pub fn translate(&mut self, id: NodeId, offset: Vector2) -> Result<(), SceneError> {
        self.mutate_local(id, |m| m.translate(offset.x, offset.y))
    }

    /// Rotate by an additional angle
    pub fn rotate(&mut self, id: NodeId, radians: f32) -> Result<(), SceneError> {
        self.mutate_local(id, |m| m.rotate_z(radians))
    }

    /// Scale by additional factors
    pub fn scale(&mut self, id: NodeId, factors: Vector2) -> Result<(), SceneError> {
        self.mutate_local(id, |m| m.scale(factors.x, factors.y, 1.0))
    }

    /// Recompute global transforms for `id` and its whole subtree
    ///
    /// Called automatically after every mutation; exposed for callers that
    /// want to force a pass.
    pub fn update_transform(&mut self, id: NodeId) -> Result<(), SceneError> {
        if !self.nodes.contains_key(id) {
            return Err(SceneError::UnknownNode(id));
        }
        self.propagate(id);
        Ok(())
    }

    fn parent_global(&self, id: NodeId) -> Matrix3 {
        self.nodes
            .get(id)
            .and_then(|node| node.parent)
            .and_then(|parent| self.nodes.get(parent))
            .map_or_else(Matrix3::identity, |parent| parent.global)
    }

    /// Depth-first, parent before children.
    fn propagate(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let parent_global = self.parent_global(current);
            let Some(node) = self.nodes.get_mut(current) else {
                continue;
            };
            node.global = parent_global * node.local;
            stack.extend(node.children.iter().rev().copied());
        }
    }

    fn propagate_children(&mut self, id: NodeId) {
        let children = self.children(id).to_vec();
        for child in children {
            self.propagate(child);
        }
    }
}

impl<T: NodeHooks> SceneGraph<T> {
    /// Run update hooks over every tree, roots in order, each depth first
    pub fn update(&mut self, delta_time: f32) {
        let roots = self.roots.clone();
        for root in roots {
            self.update_subtree(root, delta_time);
        }
    }

    /// Run update hooks over one subtree, node before children
    ///
    /// When a hook moves its node, the node's descendants are brought up to
    /// date before any of their own hooks run.
    pub fn update_subtree(&mut self, id: NodeId, delta_time: f32) {
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let parent_global = self.parent_global(current);
            let Some(node) = self.nodes.get_mut(current) else {
                continue;
            };

            let SceneNode { local, global, payload, children, .. } = node;
            let mut transform = NodeTransform::new(parent_global, local, global);
            payload.on_update(&mut transform, delta_time);
            let moved = transform.moved();

            stack.extend(children.iter().rev().copied());
            if moved {
                self.propagate_children(current);
            }
        }
    }

    /// Run draw hooks over every tree, roots in order, each depth first
    pub fn draw(&self, draw: &mut DebugDrawSystem) {
        for &root in &self.roots {
            self.draw_subtree(root, draw);
        }
    }

    /// Run draw hooks over one subtree, node before children
    pub fn draw_subtree(&self, id: NodeId, draw: &mut DebugDrawSystem) {
        for current in self.descendants(id) {
            if let Some(node) = self.nodes.get(current) {
                node.payload.on_draw(&node.global, draw);
            }
        }
    }

    /// Destroy every node whose payload asks for removal
    ///
    /// Must run after traversal, never from inside a hook. Children of removed
    /// nodes are orphaned like [`SceneGraph::destroy_node`] does.
    pub fn sweep_removed(&mut self) -> Vec<NodeId> {
        let doomed: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.payload.wants_removal())
            .map(|(id, _)| id)
            .collect();
        for &id in &doomed {
            self.destroy_node(id);
        }
        if !doomed.is_empty() {
            debug!("Swept {} scene nodes", doomed.len());
        }
        doomed
    }
}
