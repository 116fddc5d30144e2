// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public handle types: node identifiers, flags, owners and listener subscriptions.

use canopy_events::ListenerId;

/// Identifier for a node in a [`Scene`](crate::Scene).
///
/// A small, copyable handle made of a slot index and a generation counter.
///
/// ## Semantics
///
/// - A freshly allocated slot starts at generation `1`.
/// - Destroying a node frees its slot; every `NodeId` pointing at it becomes stale.
/// - Reusing a freed slot bumps its generation, so stale ids never alias a new node.
///
/// Use [`Scene::is_alive`](crate::Scene::is_alive) to check liveness. Every scene operation
/// tolerates stale ids: queries return `None` and mutations do nothing.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    /// The generation of the slot this id was issued for.
    pub const fn generation(self) -> u32 {
        self.1
    }
}

bitflags::bitflags! {
    /// Per-node flags controlling visibility and pointer interaction.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node and its subtree are drawn and can be hit.
        const VISIBLE       = 0b0000_0001;
        /// Node may become a pointer target itself.
        const MOUSE_ENABLED = 0b0000_0010;
        /// Node lets the pointer pass through; only its children can be hit.
        const MOUSE_THROUGH = 0b0000_0100;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::VISIBLE | Self::MOUSE_ENABLED
    }
}

/// Application-defined discriminant for an [`Owner`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct OwnerTag(pub u32);

/// Back-reference from a node to the higher-level object that created it.
///
/// The scene never interprets an owner. Widgets record `(tag, key)` where `tag` names the
/// widget kind and `key` indexes the application's own storage, then recover the key with
/// [`Owner::downcast`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Owner {
    tag: OwnerTag,
    key: u64,
}

impl Owner {
    /// Create an owner reference.
    pub const fn new(tag: OwnerTag, key: u64) -> Self {
        Self { tag, key }
    }

    /// The owner's kind.
    pub const fn tag(self) -> OwnerTag {
        self.tag
    }

    /// The owner's key.
    pub const fn key(self) -> u64 {
        self.key
    }

    /// The key, if this owner is of kind `tag`.
    pub fn downcast(self, tag: OwnerTag) -> Option<u64> {
        (self.tag == tag).then_some(self.key)
    }
}

/// Token returned by [`Scene::on`](crate::Scene::on); pass it to
/// [`Scene::off`](crate::Scene::off) to unregister.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    pub(crate) node: NodeId,
    pub(crate) listener: ListenerId,
}

impl Subscription {
    /// The node the listener was registered on.
    pub const fn node(self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owner_downcast_checks_tag() {
        const BUTTON: OwnerTag = OwnerTag(1);
        const LABEL: OwnerTag = OwnerTag(2);
        let owner = Owner::new(BUTTON, 42);
        assert_eq!(owner.downcast(BUTTON), Some(42));
        assert_eq!(owner.downcast(LABEL), None);
    }

    #[test]
    fn default_flags_are_visible_and_interactive() {
        let f = NodeFlags::default();
        assert!(f.contains(NodeFlags::VISIBLE | NodeFlags::MOUSE_ENABLED));
        assert!(!f.contains(NodeFlags::MOUSE_THROUGH));
    }
}
