// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `canopy_timer` crate.
//!
//! These drive a `Scheduler` the way a frame loop does: one `advance` per frame with the
//! frame's delta, and handlers that reach back into the context.

use std::time::Duration;

use canopy_timer::{Scheduler, TimerId};
use proptest::prelude::*;

#[derive(Default)]
struct Game {
    log: Vec<&'static str>,
    timers: Vec<TimerId>,
}

#[test]
fn timers_fire_in_registration_order() {
    let mut scheduler: Scheduler<Game> = Scheduler::new();
    scheduler.after(Duration::from_millis(20), |g| g.log.push("slow"));
    scheduler.after(Duration::from_millis(10), |g| g.log.push("fast"));
    scheduler.frame_once(1, |g| g.log.push("frame"));

    let mut game = Game::default();
    assert_eq!(scheduler.advance(&mut game, Duration::from_millis(30)), 3);
    assert_eq!(game.log, ["slow", "fast", "frame"]);
    assert!(scheduler.is_empty(), "fired one-shots are no longer pending");
}

#[test]
fn handler_cancels_a_later_timer_in_the_same_pass() {
    let mut scheduler: Scheduler<Game> = Scheduler::new();
    scheduler.after(Duration::from_millis(5), |g| g.log.push("first"));
    let second = scheduler.after(Duration::from_millis(5), |g| g.log.push("second"));

    let mut game = Game::default();
    let due = scheduler.collect_due(Duration::from_millis(5));
    assert_eq!(due.len(), 2);
    // Cancellation between collection and run still prevents the call.
    assert!(scheduler.cancel(second));
    assert_eq!(due.run(&mut game), 1);
    assert_eq!(game.log, ["first"]);
}

#[test]
fn repeating_timer_stops_once_cancelled() {
    let mut scheduler: Scheduler<(Game, Vec<TimerId>)> = Scheduler::new();
    let mut ctx = (Game::default(), Vec::new());
    let id = scheduler.frame_loop(2, |(g, cancel): &mut (Game, Vec<TimerId>)| {
        g.log.push("tick");
        if g.log.len() == 3 {
            cancel.extend(g.timers.drain(..));
        }
    });
    ctx.0.timers.push(id);

    for _ in 0..20 {
        scheduler.advance(&mut ctx, Duration::ZERO);
        for id in ctx.1.drain(..) {
            scheduler.cancel(id);
        }
    }
    assert_eq!(ctx.0.log.len(), 3);
    assert!(!scheduler.is_pending(id));
}

#[test]
fn cancel_all_drops_everything() {
    let mut scheduler: Scheduler<Game> = Scheduler::new();
    let a = scheduler.every(Duration::from_millis(1), |g| g.log.push("a"));
    scheduler.frame_loop(1, |g| g.log.push("b"));
    scheduler.cancel_all();
    assert!(!scheduler.is_pending(a));

    let mut game = Game::default();
    assert_eq!(scheduler.advance(&mut game, Duration::from_secs(1)), 0);
    assert!(game.log.is_empty());
    assert!(!scheduler.cancel(a), "cancelling twice is a no-op");
}

proptest! {
    #[test]
    fn every_fires_once_per_ceil_period(
        period_ms in 1_u64..200,
        delta_ms in 1_u64..50,
        frames in 1_usize..200,
    ) {
        let mut scheduler: Scheduler<u32> = Scheduler::new();
        scheduler.every(Duration::from_millis(period_ms), |n| *n += 1);
        let mut fired = 0;
        for _ in 0..frames {
            scheduler.advance(&mut fired, Duration::from_millis(delta_ms));
        }
        // Overshoot is not carried into the next period.
        let frames_per_fire = period_ms.div_ceil(delta_ms) as usize;
        prop_assert_eq!(fired as usize, frames / frames_per_fire);
    }
}
