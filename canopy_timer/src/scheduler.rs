// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timer storage and the per-pass countdown.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::time::Duration;

use smallvec::SmallVec;

/// Handle for a registered timer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    /// Returns the raw handle value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

type Callback<C> = dyn FnMut(&mut C);

#[derive(Clone, Copy, Debug)]
enum Clock {
    Time { remaining: Duration, period: Duration },
    Frames { remaining: u32, interval: u32 },
}

impl Clock {
    /// Count down one pass; returns `true` when the timer is due.
    fn tick(&mut self, delta: Duration) -> bool {
        match self {
            Self::Time { remaining, period } => {
                *remaining = remaining.saturating_sub(delta);
                if remaining.is_zero() {
                    *remaining = *period;
                    true
                } else {
                    false
                }
            }
            Self::Frames {
                remaining,
                interval,
            } => {
                *remaining = remaining.saturating_sub(1);
                if *remaining == 0 {
                    *remaining = *interval;
                    true
                } else {
                    false
                }
            }
        }
    }
}

struct Slot<C: ?Sized> {
    repeat: bool,
    done: Cell<bool>,
    callback: RefCell<Option<Box<Callback<C>>>>,
}

impl<C: ?Sized> Slot<C> {
    fn retire(&self) {
        self.done.set(true);
        // Dropping the callback releases whatever it captured right away.
        if let Ok(mut cb) = self.callback.try_borrow_mut() {
            cb.take();
        }
    }
}

struct Task<C: ?Sized> {
    id: TimerId,
    clock: Clock,
    fired: bool,
    slot: Rc<Slot<C>>,
}

impl<C: ?Sized> Task<C> {
    fn is_pending(&self) -> bool {
        !self.fired && !self.slot.done.get()
    }
}

/// Delay, repeat and frame-count timers.
///
/// `C` is the context passed to every callback.
pub struct Scheduler<C: ?Sized> {
    tasks: Vec<Task<C>>,
    next_id: u64,
}

impl<C: ?Sized> fmt::Debug for Scheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("pending", &self.len())
            .field("next_id", &self.next_id)
            .finish_non_exhaustive()
    }
}

impl<C: ?Sized> Default for Scheduler<C> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            next_id: 0,
        }
    }
}

impl<C: ?Sized> Scheduler<C> {
    /// Create an empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `callback` once, after `delay` has elapsed.
    pub fn after(&mut self, delay: Duration, callback: impl FnMut(&mut C) + 'static) -> TimerId {
        self.push(
            Clock::Time {
                remaining: delay,
                period: delay,
            },
            false,
            Box::new(callback),
        )
    }

    /// Fire `callback` every `period` until cancelled.
    pub fn every(&mut self, period: Duration, callback: impl FnMut(&mut C) + 'static) -> TimerId {
        self.push(
            Clock::Time {
                remaining: period,
                period,
            },
            true,
            Box::new(callback),
        )
    }

    /// Fire `callback` once, after `frames` calls to [`advance`](Self::advance).
    ///
    /// A count of `0` is treated as `1`.
    pub fn frame_once(&mut self, frames: u32, callback: impl FnMut(&mut C) + 'static) -> TimerId {
        let frames = frames.max(1);
        self.push(
            Clock::Frames {
                remaining: frames,
                interval: frames,
            },
            false,
            Box::new(callback),
        )
    }

    /// Fire `callback` every `frames` calls to [`advance`](Self::advance) until cancelled.
    ///
    /// A count of `0` is treated as `1`.
    pub fn frame_loop(&mut self, frames: u32, callback: impl FnMut(&mut C) + 'static) -> TimerId {
        let frames = frames.max(1);
        self.push(
            Clock::Frames {
                remaining: frames,
                interval: frames,
            },
            true,
            Box::new(callback),
        )
    }

    fn push(&mut self, clock: Clock, repeat: bool, callback: Box<Callback<C>>) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.tasks.push(Task {
            id,
            clock,
            fired: false,
            slot: Rc::new(Slot {
                repeat,
                done: Cell::new(false),
                callback: RefCell::new(Some(callback)),
            }),
        });
        id
    }

    /// Cancel a timer and drop its callback.
    ///
    /// This also suppresses a firing that is already part of a [`Due`] batch but has not
    /// run yet. Returns `false` for unknown or already cancelled handles.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let Some(pos) = self
            .tasks
            .iter()
            .position(|t| t.id == id && !t.slot.done.get())
        else {
            return false;
        };
        let task = self.tasks.remove(pos);
        task.slot.retire();
        true
    }

    /// Cancel every timer.
    pub fn cancel_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.slot.retire();
        }
    }

    /// Returns `true` if `id` is registered and has neither fired (one-shot) nor been
    /// cancelled.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.tasks.iter().any(|t| t.id == id && t.is_pending())
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.tasks.iter().filter(|t| t.is_pending()).count()
    }

    /// Returns `true` if no timers are pending.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count every timer down by one pass and collect the ones that are due.
    ///
    /// One-shot timers that come due stay reachable by [`cancel`](Self::cancel) until the
    /// next pass, so cancelling them before [`Due::run`] reaches them still works.
    pub fn collect_due(&mut self, delta: Duration) -> Due<C> {
        self.tasks.retain(|t| !t.fired && !t.slot.done.get());
        let mut entries = SmallVec::new();
        for task in &mut self.tasks {
            if task.clock.tick(delta) {
                if !task.slot.repeat {
                    task.fired = true;
                }
                entries.push(Rc::clone(&task.slot));
            }
        }
        if !entries.is_empty() {
            tracing::trace!(due = entries.len(), "timers due");
        }
        Due { entries }
    }

    /// Advance by `delta` and run due callbacks against `ctx`.
    ///
    /// Returns the number of callbacks invoked.
    pub fn advance(&mut self, ctx: &mut C, delta: Duration) -> usize {
        self.collect_due(delta).run(ctx)
    }
}

/// Timers that came due in one pass, detached from the scheduler.
pub struct Due<C: ?Sized> {
    entries: SmallVec<[Rc<Slot<C>>; 4]>,
}

impl<C: ?Sized> fmt::Debug for Due<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Due")
            .field("len", &self.entries.len())
            .finish()
    }
}

impl<C: ?Sized> Due<C> {
    /// Number of timers in the batch.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing came due.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Invoke the due callbacks in registration order.
    ///
    /// Timers cancelled after [`Scheduler::collect_due`] are skipped. Returns the number of
    /// callbacks invoked.
    pub fn run(self, ctx: &mut C) -> usize {
        let mut invoked = 0;
        for slot in self.entries {
            if slot.done.get() {
                continue;
            }
            // The callback is moved out while it runs so it may cancel its own timer.
            let Some(mut callback) = slot.callback.borrow_mut().take() else {
                continue;
            };
            callback(&mut *ctx);
            invoked += 1;
            if slot.repeat && !slot.done.get() {
                *slot.callback.borrow_mut() = Some(callback);
            } else {
                slot.done.set(true);
            }
        }
        invoked
    }
}
