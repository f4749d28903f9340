//! Transform hierarchy
//!
//! Every moving thing in the game hangs off a [`SceneGraph`] node. A node
//! owns a local transform relative to its parent; its global transform is
//! `parent.global * local` (or just `local` for a root) and is recomputed
//! synchronously, depth first, after every mutation.
//!
//! ## Ownership
//!
//! ```text
//! SceneGraph (arena of nodes, ordered roots)
//!      ↓ NodeId
//! parent: Option<NodeId>   children: Vec<NodeId>
//!      ↓
//! payload: T (implements NodeHooks for update/draw)
//! ```
//!
//! Parent links are plain ids into the arena, so destroying a node never
//! leaves a dangling owner: its children simply become roots.

mod hooks;
mod node_transform;
mod scene_graph;

pub use hooks::NodeHooks;
pub use node_transform::NodeTransform;
pub use scene_graph::{NodeId, SceneGraph};

use thiserror::Error;

/// Hierarchy errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneError {
    /// The child already has a parent; detach it first
    #[error("node {child:?} is already attached to {parent:?}")]
    AlreadyAttached {
        /// Node that was to be attached
        child: NodeId,
        /// Its current parent
        parent: NodeId,
    },

    /// Attaching would make a node its own ancestor
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    CyclicAttachment {
        /// Node that was to be attached
        child: NodeId,
        /// Requested parent, a descendant of `child`
        parent: NodeId,
    },

    /// A node cannot be its own child
    #[error("node {0:?} cannot be attached to itself")]
    SelfAttachment(NodeId),

    /// The id does not name a live node
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
}
