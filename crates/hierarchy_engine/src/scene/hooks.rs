//! Per-node behavior hooks

use crate::debug::DebugDrawSystem;
use crate::foundation::math::Matrix3;

use super::NodeTransform;

/// Per-frame behavior attached to a scene node's payload
///
/// [`SceneGraph::update`](super::SceneGraph::update) and
/// [`SceneGraph::draw`](super::SceneGraph::draw) call these depth first, a
/// node before its children. Hooks only see their own node's transform, so
/// they cannot restructure the tree mid-traversal; a node that wants to go
/// away says so through [`NodeHooks::wants_removal`] and is removed by
/// [`SceneGraph::sweep_removed`](super::SceneGraph::sweep_removed) afterwards.
pub trait NodeHooks {
    /// Advance the payload by `delta_time` seconds
    fn on_update(&mut self, _transform: &mut NodeTransform<'_>, _delta_time: f32) {}

    /// Record debug shapes; `global` is the node's settled global transform
    fn on_draw(&self, _global: &Matrix3, _draw: &mut DebugDrawSystem) {}

    /// True once the node should be removed after the current traversal
    fn wants_removal(&self) -> bool {
        false
    }
}

impl NodeHooks for () {}
