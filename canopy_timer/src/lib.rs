// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Timer: delay, repeat and frame-count timers.
//!
//! ## Overview
//!
//! A [`Scheduler`] holds timers and fires them when the caller advances it. There is no
//! wall clock: time-based timers count down by the `delta` passed to
//! [`Scheduler::advance`], frame-based timers count down by one per call.
//!
//! - [`Scheduler::after`]: fire once after a delay.
//! - [`Scheduler::every`]: fire every period.
//! - [`Scheduler::frame_once`]: fire once after `n` frames.
//! - [`Scheduler::frame_loop`]: fire every `n` frames.
//!
//! Each registration returns a [`TimerId`]; [`Scheduler::cancel`] drops the handler at once,
//! so a timer that was already due in the current pass does not fire after cancellation.
//!
//! ## Ordering
//!
//! Timers fire in registration order within a pass. Coincident due times are not sorted.
//!
//! ## Embedding
//!
//! Handlers receive `&mut C`. If the scheduler is owned by that context, split the pass:
//! [`Scheduler::collect_due`] advances the clocks and returns a [`Due`] batch that no longer
//! borrows the scheduler, then [`Due::run`] invokes the handlers against the context.
//!
//! ```
//! use core::time::Duration;
//! use canopy_timer::Scheduler;
//!
//! let mut scheduler: Scheduler<u32> = Scheduler::new();
//! scheduler.after(Duration::from_millis(10), |count| *count += 1);
//!
//! let mut count = 0;
//! scheduler.advance(&mut count, Duration::from_millis(5));
//! assert_eq!(count, 0);
//! scheduler.advance(&mut count, Duration::from_millis(5));
//! assert_eq!(count, 1);
//! scheduler.advance(&mut count, Duration::from_millis(10));
//! assert_eq!(count, 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod scheduler;

pub use scheduler::{Due, Scheduler, TimerId};
