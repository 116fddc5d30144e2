// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Listener registry and snapshot dispatch.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::hash::Hash;

use hashbrown::HashMap;
use smallvec::SmallVec;

/// Token identifying one registration in an [`EventDispatcher`].
///
/// Tokens are allocated from a per-dispatcher counter and never reused, so a stale
/// token passed to [`EventDispatcher::off`] is a harmless no-op.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Returns the raw token value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

type Handler<C, E> = dyn FnMut(&mut C, &mut E);

struct Slot<C: ?Sized, E: ?Sized> {
    live: Cell<bool>,
    handler: RefCell<Box<Handler<C, E>>>,
}

struct Record<C: ?Sized, E: ?Sized> {
    id: ListenerId,
    once: bool,
    slot: Rc<Slot<C, E>>,
}

impl<C: ?Sized, E: ?Sized> Record<C, E> {
    fn is_live(&self) -> bool {
        self.slot.live.get()
    }
}

/// Ordered listener lists keyed by event type.
///
/// - `K` is the event type key.
/// - `C` is the context handed to every handler (for example the scene that owns the
///   dispatcher).
/// - `E` is the event payload; handlers receive it mutably so they can record outcomes
///   such as stopped propagation.
pub struct EventDispatcher<K, C: ?Sized, E: ?Sized> {
    listeners: HashMap<K, Vec<Record<C, E>>>,
    next_id: u64,
}

impl<K, C: ?Sized, E: ?Sized> fmt::Debug for EventDispatcher<K, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total: usize = self.listeners.values().map(Vec::len).sum();
        f.debug_struct("EventDispatcher")
            .field("types", &self.listeners.len())
            .field("listeners", &total)
            .finish_non_exhaustive()
    }
}

impl<K, C: ?Sized, E: ?Sized> Default for EventDispatcher<K, C, E> {
    fn default() -> Self {
        Self {
            listeners: HashMap::new(),
            next_id: 0,
        }
    }
}

impl<K: Hash + Eq, C: ?Sized, E: ?Sized> EventDispatcher<K, C, E> {
    /// Create an empty dispatcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `kind`, appended after existing listeners.
    pub fn on(&mut self, kind: K, handler: impl FnMut(&mut C, &mut E) + 'static) -> ListenerId {
        self.register(kind, false, Box::new(handler))
    }

    /// Register `handler` for `kind`; it is removed after its first invocation.
    pub fn once(
        &mut self,
        kind: K,
        handler: impl FnMut(&mut C, &mut E) + 'static,
    ) -> ListenerId {
        self.register(kind, true, Box::new(handler))
    }

    fn register(&mut self, kind: K, once: bool, handler: Box<Handler<C, E>>) -> ListenerId {
        self.next_id += 1;
        let id = ListenerId(self.next_id);
        self.listeners.entry(kind).or_default().push(Record {
            id,
            once,
            slot: Rc::new(Slot {
                live: Cell::new(true),
                handler: RefCell::new(handler),
            }),
        });
        id
    }

    /// Remove the registration identified by `id`.
    ///
    /// Returns `false` if the token is unknown (already removed, fired as `once`,
    /// or issued by a different dispatcher).
    ///
    /// A `once` listener captured in a snapshot but not yet invoked is still registered,
    /// so removing it here keeps it from running.
    pub fn off(&mut self, id: ListenerId) -> bool {
        let mut removed = None;
        for list in self.listeners.values_mut() {
            if let Some(pos) = list.iter().position(|r| r.id == id) {
                removed = Some(list.remove(pos));
                break;
            }
        }
        self.listeners.retain(|_, list| !list.is_empty());
        // A fired `once` record lingers until the next prune; it no longer counts.
        let Some(record) = removed.filter(Record::is_live) else {
            tracing::trace!(listener = id.0, "off: listener not registered");
            return false;
        };
        record.slot.live.set(false);
        true
    }

    /// Remove every listener registered for `kind`, returning how many were removed.
    pub fn off_all(&mut self, kind: &K) -> usize {
        let Some(list) = self.listeners.remove(kind) else {
            return 0;
        };
        let live = list.iter().filter(|r| r.is_live()).count();
        for record in &list {
            record.slot.live.set(false);
        }
        live
    }

    /// Remove every listener of every type.
    pub fn clear(&mut self) {
        for record in self.listeners.values().flatten() {
            record.slot.live.set(false);
        }
        self.listeners.clear();
    }

    /// Returns `true` if at least one listener is registered for `kind`.
    pub fn has_listeners(&self, kind: &K) -> bool {
        self.listeners
            .get(kind)
            .is_some_and(|l| l.iter().any(Record::is_live))
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: &K) -> usize {
        self.listeners
            .get(kind)
            .map_or(0, |l| l.iter().filter(|r| r.is_live()).count())
    }

    /// Returns `true` if no listeners are registered at all.
    pub fn is_empty(&self) -> bool {
        !self.listeners.values().flatten().any(Record::is_live)
    }

    /// Copy the listener list for `kind` so it can be run after this borrow ends.
    ///
    /// `once` listeners stay registered until the snapshot actually invokes them, so
    /// [`off`](Self::off) can still cancel one that an earlier handler in the same pass
    /// wants gone, and one skipped by a stopped pass fires on the next.
    pub fn snapshot(&mut self, kind: &K) -> Snapshot<C, E> {
        self.prune(kind);
        let Some(list) = self.listeners.get(kind) else {
            return Snapshot::default();
        };
        let entries = list
            .iter()
            .map(|r| (r.once, Rc::clone(&r.slot)))
            .collect();
        Snapshot { entries }
    }

    /// Snapshot the listeners for `kind` and run them against `ctx`.
    ///
    /// Returns the number of handlers invoked.
    pub fn emit(&mut self, ctx: &mut C, kind: &K, event: &mut E) -> usize {
        let invoked = self.snapshot(kind).run(ctx, event);
        self.prune(kind);
        invoked
    }

    /// Drop records for `kind` whose `once` handler has already fired.
    fn prune(&mut self, kind: &K) {
        if let Some(list) = self.listeners.get_mut(kind) {
            list.retain(Record::is_live);
            if list.is_empty() {
                self.listeners.remove(kind);
            }
        }
    }
}

/// An immutable copy of one type's listener list, taken before dispatch.
pub struct Snapshot<C: ?Sized, E: ?Sized> {
    entries: SmallVec<[(bool, Rc<Slot<C, E>>); 4]>,
}

impl<C: ?Sized, E: ?Sized> Default for Snapshot<C, E> {
    fn default() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }
}

impl<C: ?Sized, E: ?Sized> fmt::Debug for Snapshot<C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<C: ?Sized, E: ?Sized> Snapshot<C, E> {
    /// Number of listeners captured.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no listeners were captured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke every captured listener in registration order.
    ///
    /// Returns the number of handlers invoked.
    pub fn run(self, ctx: &mut C, event: &mut E) -> usize {
        self.run_until(ctx, event, |_| false)
    }

    /// Invoke captured listeners in order, stopping as soon as `stop(event)` is true.
    ///
    /// `stop` is checked after each invoked handler, which is how callers implement
    /// "stop immediate propagation".
    ///
    /// Listeners removed since the snapshot was taken are skipped. A handler that is
    /// already running further up the stack (re-entrant dispatch) is skipped as well.
    pub fn run_until(self, ctx: &mut C, event: &mut E, stop: impl Fn(&E) -> bool) -> usize {
        let mut invoked = 0;
        for (once, slot) in self.entries {
            if !slot.live.get() {
                continue;
            }
            let Ok(mut handler) = slot.handler.try_borrow_mut() else {
                continue;
            };
            if once {
                slot.live.set(false);
            }
            (*handler)(&mut *ctx, &mut *event);
            invoked += 1;
            if stop(&*event) {
                break;
            }
        }
        invoked
    }
}
