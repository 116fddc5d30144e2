// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The node arena: hierarchy, listeners, timers and interaction targets.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::time::Duration;

use canopy_timer::Scheduler;
use kurbo::Size;

use crate::error::SceneError;
use crate::event::{Event, EventData, EventKind};
use crate::node::Node;
use crate::types::{NodeId, Subscription};

/// Nodes that currently receive routed input.
///
/// Every entry is a live node on the stage. Detaching or destroying a node clears any
/// entry inside its subtree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Targets {
    pub(crate) hover: Option<NodeId>,
    /// Press target per button: primary, secondary, middle.
    pub(crate) pressed: [Option<NodeId>; 3],
    pub(crate) capture: Option<NodeId>,
    pub(crate) focus: Option<NodeId>,
}

/// A retained tree of 2D nodes.
///
/// ## Ownership
///
/// The scene owns every node. Parents own their children: destroying a node destroys its
/// subtree. Parent links and interaction targets are plain [`NodeId`]s, checked against
/// the slot generation on every access.
///
/// ## Handlers
///
/// Event listeners and timer callbacks receive `&mut Scene`, so they may freely reparent,
/// destroy, register or cancel while a dispatch is in flight. Dispatch always iterates a
/// snapshot taken before the first handler runs.
pub struct Scene {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    root: NodeId,
    pub(crate) targets: Targets,
    scheduler: Scheduler<Self>,
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("nodes_total", &self.nodes.len())
            .field("nodes_alive", &self.node_count())
            .field("free_list", &self.free_list.len())
            .field("root", &self.root)
            .field("targets", &self.targets)
            .field("scheduler", &self.scheduler)
            .finish()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl Scene {
    /// Create a scene whose root node has the given size.
    pub fn new(size: Size) -> Self {
        let mut scene = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            root: NodeId::new(0, 0),
            targets: Targets::default(),
            scheduler: Scheduler::new(),
        };
        scene.root = scene.alloc();
        scene.node_mut(scene.root).geometry.size = size;
        scene
    }

    /// The root node. It is always alive and never has a parent.
    pub fn root(&self) -> NodeId {
        self.root
    }

    fn alloc(&mut self) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation));
            (idx, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation)));
            self.generations.push(generation);
            (self.nodes.len() - 1, generation)
        };
        #[allow(
            clippy::cast_possible_truncation,
            reason = "NodeId uses 32-bit indices by design."
        )]
        let idx = idx as u32;
        NodeId::new(idx, generation)
    }

    /// Create a detached node with default state.
    pub fn create_node(&mut self) -> NodeId {
        let id = self.alloc();
        tracing::trace!(?id, "node created");
        id
    }

    /// Create a detached node with a name.
    pub fn create_named(&mut self, name: impl Into<String>) -> NodeId {
        let id = self.create_node();
        self.node_mut(id).name = Some(name.into());
        id
    }

    /// Destroy `id` and its subtree.
    ///
    /// The node is detached first (emitting [`EventKind::Removed`] on its parent), every
    /// listener in the subtree is dropped, and interaction targets inside it are cleared.
    /// Returns `false` for stale ids and for the root.
    pub fn destroy(&mut self, id: NodeId) -> bool {
        if id == self.root || !self.is_alive(id) {
            tracing::debug!(?id, "destroy: stale id or root");
            return false;
        }
        let parent = self.unlink(id);
        let mut stack = alloc::vec![id];
        let mut freed = 0_usize;
        while let Some(next) = stack.pop() {
            let Some(mut node) = self.nodes[next.idx()].take() else {
                continue;
            };
            node.dispatcher.clear();
            stack.extend(node.children.drain(..));
            self.free_list.push(next.idx());
            freed += 1;
        }
        tracing::trace!(?id, freed, "subtree destroyed");
        self.prune_targets();
        if let Some(parent) = parent {
            self.notify(parent, EventKind::Removed, EventData::Child(id));
        }
        true
    }

    /// Returns `true` if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Number of live nodes, the root included.
    pub fn node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    pub(crate) fn node_opt(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .get(id.idx())?
            .as_ref()
            .filter(|n| n.generation == id.generation())
    }

    pub(crate) fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes
            .get_mut(id.idx())?
            .as_mut()
            .filter(|n| n.generation == id.generation())
    }

    /// Access a node known to be alive; panics if `id` is stale.
    fn node(&self, id: NodeId) -> &Node {
        self.node_opt(id).expect("dangling NodeId")
    }

    /// Access a node known to be alive; panics if `id` is stale.
    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.node_opt_mut(id).expect("dangling NodeId")
    }

    // --- hierarchy ---

    /// Append `child` to `parent`'s children.
    ///
    /// See [`add_child_at`](Self::add_child_at).
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        let index = self.num_children(parent);
        self.add_child_at(parent, child, index)
    }

    /// Insert `child` into `parent`'s children at `index` (clamped to the child count).
    ///
    /// A child of another parent is detached from it first, emitting
    /// [`EventKind::Removed`] there. [`EventKind::Added`] is then emitted on `parent`.
    /// If `child` already belongs to `parent` it is only moved and no event is emitted.
    ///
    /// On error the scene is left unchanged.
    pub fn add_child_at(
        &mut self,
        parent: NodeId,
        child: NodeId,
        index: usize,
    ) -> Result<(), SceneError> {
        if let Err(err) = self.check_link(parent, child) {
            tracing::debug!(error = %err, "add_child rejected");
            return Err(err);
        }
        if self.node(child).parent == Some(parent) {
            self.set_child_index(parent, child, index);
            return Ok(());
        }
        let previous = self.unlink(child);
        let siblings = &mut self.node_mut(parent).children;
        let index = index.min(siblings.len());
        siblings.insert(index, child);
        self.node_mut(child).parent = Some(parent);
        tracing::trace!(?parent, ?child, index, "child added");

        if let Some(previous) = previous {
            self.prune_targets();
            self.notify(previous, EventKind::Removed, EventData::Child(child));
        }
        self.notify(parent, EventKind::Added, EventData::Child(child));
        Ok(())
    }

    fn check_link(&self, parent: NodeId, child: NodeId) -> Result<(), SceneError> {
        if !self.is_alive(parent) {
            return Err(SceneError::StaleNode(parent));
        }
        if !self.is_alive(child) {
            return Err(SceneError::StaleNode(child));
        }
        if parent == child {
            return Err(SceneError::SelfParent(child));
        }
        if child == self.root {
            return Err(SceneError::RootReparent);
        }
        if self.is_ancestor_of(child, parent) {
            return Err(SceneError::WouldCycle { parent, child });
        }
        Ok(())
    }

    /// Detach `child` from `parent`, emitting [`EventKind::Removed`] on `parent`.
    ///
    /// Returns `false` if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if self.parent_of(child) != Some(parent) {
            tracing::debug!(?parent, ?child, "remove_child: not a child");
            return false;
        }
        self.unlink(child);
        tracing::trace!(?parent, ?child, "child removed");
        self.prune_targets();
        self.notify(parent, EventKind::Removed, EventData::Child(child));
        true
    }

    /// Detach the child at `index`, returning it.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Option<NodeId> {
        let child = self.child_at(parent, index)?;
        self.remove_child(parent, child).then_some(child)
    }

    /// Detach every child of `parent`, returning how many were removed.
    ///
    /// [`EventKind::Removed`] is emitted once per child, in child order.
    pub fn remove_children(&mut self, parent: NodeId) -> usize {
        let Some(node) = self.node_opt_mut(parent) else {
            return 0;
        };
        let children = core::mem::take(&mut node.children);
        for &child in &children {
            self.node_mut(child).parent = None;
        }
        tracing::trace!(?parent, count = children.len(), "children removed");
        self.prune_targets();
        for &child in &children {
            self.notify(parent, EventKind::Removed, EventData::Child(child));
        }
        children.len()
    }

    /// Move `child` to `index` (clamped) within `parent`'s children.
    ///
    /// Returns `false` if `child` is not a child of `parent`.
    pub fn set_child_index(&mut self, parent: NodeId, child: NodeId, index: usize) -> bool {
        let Some(node) = self.node_opt_mut(parent) else {
            return false;
        };
        let Some(from) = node.children.iter().position(|&c| c == child) else {
            return false;
        };
        node.children.remove(from);
        let index = index.min(node.children.len());
        node.children.insert(index, child);
        true
    }

    /// Remove `child` from its parent's list without emitting anything.
    fn unlink(&mut self, child: NodeId) -> Option<NodeId> {
        let parent = self.node_mut(child).parent.take()?;
        let siblings = &mut self.node_mut(parent).children;
        if let Some(pos) = siblings.iter().position(|&c| c == child) {
            siblings.remove(pos);
        }
        Some(parent)
    }

    /// The parent of `id`, if any.
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id)?.parent
    }

    /// Children of `id` in paint order (empty for stale ids).
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.node_opt(id) {
            Some(n) => &n.children,
            None => &[],
        }
    }

    /// Number of children of `id`.
    pub fn num_children(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// The child of `id` at `index`.
    pub fn child_at(&self, id: NodeId, index: usize) -> Option<NodeId> {
        self.children(id).get(index).copied()
    }

    /// Position of `child` within `parent`'s children.
    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// The first direct child of `parent` named `name`.
    pub fn child_by_name(&self, parent: NodeId, name: &str) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.name(c) == Some(name))
    }

    /// Returns `true` if `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor_of(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut cur = self.parent_of(node);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent_of(p);
        }
        false
    }

    /// Returns `true` if `id` is the root or one of its descendants.
    pub fn is_on_stage(&self, id: NodeId) -> bool {
        self.is_alive(id) && (id == self.root || self.is_ancestor_of(self.root, id))
    }

    /// `id` followed by each of its ancestors, ending at the top of its tree.
    pub fn path_to_root(&self, id: NodeId) -> Vec<NodeId> {
        let mut path = Vec::new();
        let mut cur = self.is_alive(id).then_some(id);
        while let Some(n) = cur {
            path.push(n);
            cur = self.parent_of(n);
        }
        path
    }

    // --- listeners ---

    /// Register `handler` for `kind` on `node`.
    ///
    /// Returns `None` for stale nodes.
    pub fn on(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: impl FnMut(&mut Self, &mut Event) + 'static,
    ) -> Option<Subscription> {
        let listener = self.node_opt_mut(node)?.dispatcher.on(kind, handler);
        Some(Subscription { node, listener })
    }

    /// Register `handler` for the next `kind` event on `node` only.
    pub fn once(
        &mut self,
        node: NodeId,
        kind: EventKind,
        handler: impl FnMut(&mut Self, &mut Event) + 'static,
    ) -> Option<Subscription> {
        let listener = self.node_opt_mut(node)?.dispatcher.once(kind, handler);
        Some(Subscription { node, listener })
    }

    /// Unregister a listener. Returns `false` if it is already gone.
    ///
    /// A listener removed while an event is being dispatched does not run later in
    /// that dispatch.
    pub fn off(&mut self, subscription: Subscription) -> bool {
        self.node_opt_mut(subscription.node)
            .is_some_and(|n| n.dispatcher.off(subscription.listener))
    }

    /// Unregister every `kind` listener on `node`, returning how many were removed.
    pub fn off_all(&mut self, node: NodeId, kind: EventKind) -> usize {
        self.node_opt_mut(node)
            .map_or(0, |n| n.dispatcher.off_all(&kind))
    }

    /// Returns `true` if `node` has at least one `kind` listener.
    pub fn has_listeners(&self, node: NodeId, kind: EventKind) -> bool {
        self.node_opt(node)
            .is_some_and(|n| n.dispatcher.has_listeners(&kind))
    }

    /// Run `node`'s listeners for `event.kind` without bubbling.
    ///
    /// Sets `event.current_target` to `node`. Returns the number of handlers invoked.
    pub fn emit(&mut self, node: NodeId, event: &mut Event) -> usize {
        let Some(n) = self.node_opt_mut(node) else {
            return 0;
        };
        let snapshot = n.dispatcher.snapshot(&event.kind);
        event.current_target = Some(node);
        if snapshot.is_empty() {
            return 0;
        }
        snapshot.run_until(self, event, Event::is_immediate_propagation_stopped)
    }

    /// Dispatch `event` to `target` and then to each ancestor up to the root.
    ///
    /// The path is fixed before the first handler runs. Nodes destroyed by a handler are
    /// skipped; [`Event::stop_propagation`] ends the walk after the current node.
    /// Returns the number of handlers invoked.
    pub fn bubble(&mut self, target: NodeId, event: &mut Event) -> usize {
        let mut invoked = 0;
        for node in self.path_to_root(target) {
            if event.is_propagation_stopped() {
                break;
            }
            invoked += self.emit(node, event);
        }
        invoked
    }

    /// Emit a non-bubbling notification about `node`.
    pub(crate) fn notify(&mut self, node: NodeId, kind: EventKind, data: EventData) {
        if !self.has_listeners(node, kind) {
            return;
        }
        let mut event = Event::new(kind, Some(node), data);
        self.emit(node, &mut event);
    }

    // --- timers ---

    /// The scene's timer scheduler.
    pub fn scheduler(&self) -> &Scheduler<Self> {
        &self.scheduler
    }

    /// Mutable access to the scheduler, for registering and cancelling timers.
    pub fn scheduler_mut(&mut self) -> &mut Scheduler<Self> {
        &mut self.scheduler
    }

    /// Advance every timer by `delta` (one frame) and run the due callbacks.
    ///
    /// Returns the number of callbacks invoked.
    pub fn advance_timers(&mut self, delta: Duration) -> usize {
        let due = self.scheduler.collect_due(delta);
        if due.is_empty() {
            return 0;
        }
        let fired = due.run(self);
        tracing::debug!(fired, "timers fired");
        fired
    }

    // --- interaction targets ---

    /// Node under the pointer, as of the last stage update.
    pub fn hover(&self) -> Option<NodeId> {
        self.targets.hover
    }

    /// Node that received the current primary press.
    pub fn pressed(&self) -> Option<NodeId> {
        self.targets.pressed[0]
    }

    /// Node receiving all pointer events regardless of hit testing.
    pub fn capture(&self) -> Option<NodeId> {
        self.targets.capture
    }

    /// Node receiving keyboard events.
    pub fn focus(&self) -> Option<NodeId> {
        self.targets.focus
    }

    /// Route all pointer events to `node` until released.
    ///
    /// Returns `false` (and changes nothing) if `node` is not on the stage.
    pub fn set_capture(&mut self, node: NodeId) -> bool {
        if !self.is_on_stage(node) {
            tracing::debug!(?node, "set_capture: node not on stage");
            return false;
        }
        tracing::trace!(?node, "pointer captured");
        self.targets.capture = Some(node);
        true
    }

    /// Return pointer routing to hit testing.
    pub fn release_capture(&mut self) {
        if let Some(node) = self.targets.capture.take() {
            tracing::trace!(?node, "pointer capture released");
        }
    }

    /// Move keyboard focus, emitting [`EventKind::FocusOut`] on the old target and
    /// [`EventKind::FocusIn`] on the new one.
    ///
    /// Returns `false` (and changes nothing) if `node` is not on the stage.
    pub fn set_focus(&mut self, node: Option<NodeId>) -> bool {
        if let Some(n) = node
            && !self.is_on_stage(n)
        {
            tracing::debug!(node = ?n, "set_focus: node not on stage");
            return false;
        }
        let old = self.targets.focus;
        if old == node {
            return true;
        }
        self.targets.focus = node;
        tracing::trace!(?old, new = ?node, "focus changed");
        if let Some(old) = old {
            self.notify(old, EventKind::FocusOut, EventData::Focus { related: node });
        }
        if let Some(new) = node {
            self.notify(new, EventKind::FocusIn, EventData::Focus { related: old });
        }
        true
    }

    /// Drop targets that are no longer live nodes on the stage.
    fn prune_targets(&mut self) {
        let before = self.targets;
        let keep = |t: Option<NodeId>| t.filter(|&n| self.is_on_stage(n));
        let after = Targets {
            hover: keep(before.hover),
            pressed: before.pressed.map(keep),
            capture: keep(before.capture),
            focus: keep(before.focus),
        };
        if after != before {
            tracing::trace!(?before, ?after, "interaction targets pruned");
            self.targets = after;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::RefCell;

    fn scene_with_chain() -> (Scene, NodeId, NodeId) {
        let mut s = Scene::new(Size::new(100.0, 100.0));
        let a = s.create_node();
        let b = s.create_node();
        s.add_child(s.root(), a).unwrap();
        s.add_child(a, b).unwrap();
        (s, a, b)
    }

    #[test]
    fn rejected_links_leave_scene_unchanged() {
        let (mut s, a, b) = scene_with_chain();
        assert_eq!(s.add_child(a, a), Err(SceneError::SelfParent(a)));
        assert_eq!(
            s.add_child(b, a),
            Err(SceneError::WouldCycle {
                parent: b,
                child: a
            })
        );
        let root = s.root();
        assert_eq!(s.add_child(a, root), Err(SceneError::RootReparent));
        assert_eq!(s.parent_of(a), Some(root));
        assert_eq!(s.children(a), &[b]);
    }

    #[test]
    fn stale_ids_are_tolerated() {
        let (mut s, a, b) = scene_with_chain();
        assert!(s.destroy(a));
        assert!(!s.is_alive(a));
        assert!(!s.is_alive(b), "subtree destroyed with its root");
        assert_eq!(s.add_child(s.root(), b), Err(SceneError::StaleNode(b)));
        assert!(!s.destroy(a));
        assert!(s.on(a, EventKind::Click, |_, _| {}).is_none());
        assert_eq!(s.children(a), &[] as &[NodeId]);

        // Slots are reused with a new generation.
        let c = s.create_node();
        assert!(c.0 == a.0 || c.0 == b.0, "freed slot reused");
        assert_eq!(c.generation(), 2);
    }

    #[test]
    fn root_cannot_be_destroyed() {
        let mut s = Scene::default();
        assert!(!s.destroy(s.root()));
        assert!(s.is_alive(s.root()));
    }

    #[test]
    fn add_at_clamps_and_moves_within_parent() {
        let mut s = Scene::default();
        let root = s.root();
        let [x, y, z] = [s.create_node(), s.create_node(), s.create_node()];
        s.add_child(root, x).unwrap();
        s.add_child_at(root, y, 99).unwrap();
        s.add_child_at(root, z, 0).unwrap();
        assert_eq!(s.children(root), &[z, x, y]);
        s.add_child_at(root, z, 5).unwrap();
        assert_eq!(s.children(root), &[x, y, z]);
        assert_eq!(s.child_index(root, y), Some(1));
    }

    #[test]
    fn reparent_emits_removed_then_added() {
        let (mut s, a, b) = scene_with_chain();
        let root = s.root();
        let log = Rc::new(RefCell::new(Vec::new()));
        for (node, kind) in [(a, EventKind::Removed), (root, EventKind::Added)] {
            let log = Rc::clone(&log);
            s.on(node, kind, move |_, e| log.borrow_mut().push((e.kind, e.data)));
        }
        s.add_child(root, b).unwrap();
        assert_eq!(
            *log.borrow(),
            vec![
                (EventKind::Removed, EventData::Child(b)),
                (EventKind::Added, EventData::Child(b)),
            ]
        );
        assert_eq!(s.parent_of(b), Some(root));
        assert!(s.children(a).is_empty());
    }

    #[test]
    fn remove_child_at_and_children() {
        let mut s = Scene::default();
        let root = s.root();
        let kids: Vec<_> = (0..3).map(|_| s.create_node()).collect();
        for &k in &kids {
            s.add_child(root, k).unwrap();
        }
        assert_eq!(s.remove_child_at(root, 1), Some(kids[1]));
        assert_eq!(s.remove_child_at(root, 7), None);
        assert!(!s.remove_child(root, kids[1]));
        assert_eq!(s.remove_children(root), 2);
        assert!(kids.iter().all(|&k| s.parent_of(k).is_none() && s.is_alive(k)));
    }

    #[test]
    fn detaching_clears_targets_in_subtree() {
        let (mut s, a, b) = scene_with_chain();
        assert!(s.set_focus(Some(b)));
        assert!(s.set_capture(b));
        s.targets.hover = Some(a);
        assert!(s.remove_child(s.root(), a));
        assert_eq!(s.focus(), None);
        assert_eq!(s.capture(), None);
        assert_eq!(s.hover(), None);
        assert!(!s.set_focus(Some(b)), "detached nodes cannot take focus");
    }

    #[test]
    fn focus_change_notifies_both_sides() {
        let (mut s, a, b) = scene_with_chain();
        let log = Rc::new(RefCell::new(Vec::new()));
        for n in [a, b] {
            for kind in [EventKind::FocusIn, EventKind::FocusOut] {
                let log = Rc::clone(&log);
                s.on(n, kind, move |_, e| log.borrow_mut().push((e.target, e.kind)));
            }
        }
        s.set_focus(Some(a));
        s.set_focus(Some(b));
        s.set_focus(Some(b));
        assert_eq!(
            *log.borrow(),
            vec![
                (Some(a), EventKind::FocusIn),
                (Some(a), EventKind::FocusOut),
                (Some(b), EventKind::FocusIn),
            ]
        );
    }

    #[test]
    fn handler_can_destroy_its_own_node() {
        let (mut s, a, b) = scene_with_chain();
        let hits = Rc::new(RefCell::new(0));
        s.on(b, EventKind::Custom(1), |scene, e| {
            let me = e.current_target.unwrap();
            scene.destroy(me);
        });
        {
            let hits = Rc::clone(&hits);
            s.on(b, EventKind::Custom(1), move |_, _| *hits.borrow_mut() += 1);
        }
        {
            let hits = Rc::clone(&hits);
            s.on(a, EventKind::Custom(1), move |_, _| *hits.borrow_mut() += 10);
        }
        let mut ev = Event::new(EventKind::Custom(1), Some(b), EventData::None);
        s.bubble(b, &mut ev);
        assert!(!s.is_alive(b));
        // The second listener on `b` died with it; the parent still hears the event.
        assert_eq!(*hits.borrow(), 10);
    }

    #[test]
    fn stop_propagation_ends_bubbling() {
        let (mut s, a, b) = scene_with_chain();
        let log = Rc::new(RefCell::new(Vec::new()));
        {
            let log = Rc::clone(&log);
            s.on(b, EventKind::Click, move |_, e| {
                log.borrow_mut().push("b1");
                e.stop_propagation();
            });
        }
        {
            let log = Rc::clone(&log);
            s.on(b, EventKind::Click, move |_, _| log.borrow_mut().push("b2"));
        }
        {
            let log = Rc::clone(&log);
            s.on(a, EventKind::Click, move |_, _| log.borrow_mut().push("a"));
        }
        let mut ev = Event::new(EventKind::Click, Some(b), EventData::None);
        assert_eq!(s.bubble(b, &mut ev), 2);
        assert_eq!(*log.borrow(), vec!["b1", "b2"]);

        log.borrow_mut().clear();
        s.off_all(b, EventKind::Click);
        {
            let log = Rc::clone(&log);
            s.on(b, EventKind::Click, move |_, e| {
                log.borrow_mut().push("b1");
                e.stop_immediate_propagation();
            });
        }
        {
            let log = Rc::clone(&log);
            s.on(b, EventKind::Click, move |_, _| log.borrow_mut().push("b2"));
        }
        let mut ev = Event::new(EventKind::Click, Some(b), EventData::None);
        s.bubble(b, &mut ev);
        assert_eq!(*log.borrow(), vec!["b1"]);
    }

    #[test]
    fn timers_receive_the_scene() {
        let mut s = Scene::default();
        let n = s.create_node();
        s.scheduler_mut()
            .after(Duration::from_millis(10), move |scene: &mut Scene| {
                scene.destroy(n);
            });
        assert_eq!(s.advance_timers(Duration::from_millis(5)), 0);
        assert!(s.is_alive(n));
        assert_eq!(s.advance_timers(Duration::from_millis(5)), 1);
        assert!(!s.is_alive(n));
    }
}
