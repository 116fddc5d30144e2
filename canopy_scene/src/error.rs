// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by structural scene operations.

use crate::types::NodeId;

/// Reasons a structural edit was rejected.
///
/// A rejected edit leaves the scene unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// The id does not refer to a live node.
    #[error("node {0:?} is not alive")]
    StaleNode(NodeId),
    /// A node was offered as its own child.
    #[error("node {0:?} cannot be its own child")]
    SelfParent(NodeId),
    /// The child is an ancestor of the parent.
    #[error("adding {child:?} under {parent:?} would create a cycle")]
    WouldCycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child, which is an ancestor of `parent`.
        child: NodeId,
    },
    /// The scene root cannot be given a parent.
    #[error("the scene root cannot be reparented")]
    RootReparent,
}
