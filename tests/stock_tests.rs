// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::time::{Duration, Instant};

use nusabiz::stock::{AdjusterState, StockAdjuster, DEBOUNCE};

#[test]
fn rapid_increments_coalesce_into_one_delta() {
    let mut adjuster = StockAdjuster::new(7, 5, 10);
    let t0 = Instant::now();
    adjuster.increment(t0);
    adjuster.increment(t0 + Duration::from_millis(50));
    adjuster.increment(t0 + Duration::from_millis(100));
    assert_eq!(adjuster.displayed(), 8);

    // Nothing fires while the window is still open.
    assert!(adjuster.poll(t0 + Duration::from_millis(400)).is_none());

    let fired = adjuster
        .poll(t0 + Duration::from_millis(100) + DEBOUNCE)
        .expect("deadline elapsed");
    assert_eq!(fired.product_id, 7);
    assert_eq!(fired.delta, 3);
    assert_eq!(fired.target, 8);
    assert_eq!(adjuster.state(), AdjusterState::Inflight);

    adjuster.commit(fired.target);
    assert_eq!(adjuster.confirmed(), 8);
    assert_eq!(adjuster.state(), AdjusterState::Idle);
}

#[test]
fn a_cancelling_burst_sends_nothing() {
    let mut adjuster = StockAdjuster::new(1, 5, 10);
    let t0 = Instant::now();
    adjuster.increment(t0);
    adjuster.decrement(t0 + Duration::from_millis(20));
    assert!(adjuster.poll(t0 + Duration::from_millis(20) + DEBOUNCE).is_none());
    assert_eq!(adjuster.state(), AdjusterState::Idle);
    assert_eq!(adjuster.displayed(), 5);
}

#[test]
fn counter_clamps_to_capacity_and_zero() {
    let mut adjuster = StockAdjuster::new(1, 9, 10);
    let t0 = Instant::now();
    adjuster.increment(t0);
    adjuster.increment(t0);
    adjuster.increment(t0);
    assert_eq!(adjuster.displayed(), 10);
    let fired = adjuster.poll(t0 + DEBOUNCE).unwrap();
    assert_eq!(fired.delta, 1);

    let mut low = StockAdjuster::new(2, 0, 10);
    low.decrement(t0);
    assert_eq!(low.displayed(), 0);
    assert!(low.poll(t0 + DEBOUNCE).is_none());
}

#[test]
fn rollback_reverts_to_the_confirmed_value() {
    let mut adjuster = StockAdjuster::new(1, 5, 10);
    let t0 = Instant::now();
    adjuster.increment(t0);
    adjuster.increment(t0);
    let fired = adjuster.poll(t0 + DEBOUNCE).unwrap();
    assert_eq!(fired.target, 7);

    let reverted = adjuster.rollback();
    assert_eq!(reverted, 5);
    assert_eq!(adjuster.displayed(), 5);
    assert_eq!(adjuster.confirmed(), 5);
    assert_eq!(adjuster.state(), AdjusterState::Idle);
    assert!(adjuster.next_deadline().is_none());
}

#[test]
fn direct_entry_is_clamped_and_debounced() {
    let mut adjuster = StockAdjuster::new(1, 5, 10);
    let t0 = Instant::now();
    assert!(adjuster.enter_text(" 7 ", t0));
    assert_eq!(adjuster.displayed(), 7);
    assert!(adjuster.enter_text("50", t0));
    assert_eq!(adjuster.displayed(), 10);
    let fired = adjuster.poll(t0 + DEBOUNCE).unwrap();
    assert_eq!(fired.delta, 5);
}

#[test]
fn invalid_entry_changes_nothing() {
    let mut adjuster = StockAdjuster::new(1, 5, 10);
    let t0 = Instant::now();
    assert!(!adjuster.enter_text("abc", t0));
    assert!(!adjuster.enter_text("", t0));
    assert_eq!(adjuster.displayed(), 5);
    assert_eq!(adjuster.state(), AdjusterState::Idle);
    assert!(adjuster.poll(t0 + DEBOUNCE).is_none());

    // An armed deadline survives a later invalid entry.
    adjuster.increment(t0);
    assert!(!adjuster.enter_text("x", t0 + Duration::from_millis(10)));
    assert!(adjuster.poll(t0 + DEBOUNCE).is_some());
}

#[test]
fn adjustments_during_flight_wait_for_resolution() {
    let mut adjuster = StockAdjuster::new(1, 5, 10);
    let t0 = Instant::now();
    adjuster.increment(t0);
    let first = adjuster.poll(t0 + DEBOUNCE).unwrap();
    assert_eq!(first.delta, 1);

    // User keeps clicking while the call is in flight.
    let t1 = t0 + DEBOUNCE + Duration::from_millis(10);
    adjuster.increment(t1);
    assert_eq!(adjuster.state(), AdjusterState::Inflight);
    assert!(adjuster.poll(t1 + DEBOUNCE).is_none());

    adjuster.commit(first.target);
    assert_eq!(adjuster.state(), AdjusterState::PendingDebounce);
    let second = adjuster.poll(t1 + DEBOUNCE).unwrap();
    assert_eq!(second.delta, 1);
    assert_eq!(second.target, 7);
}

#[test]
fn rollback_drops_adjustments_made_during_flight() {
    let mut adjuster = StockAdjuster::new(1, 5, 10);
    let t0 = Instant::now();
    adjuster.increment(t0);
    let fired = adjuster.poll(t0 + DEBOUNCE).unwrap();
    adjuster.increment(t0 + DEBOUNCE + Duration::from_millis(5));
    assert_eq!(fired.target, 6);

    adjuster.rollback();
    assert_eq!(adjuster.displayed(), 5);
    assert!(adjuster.poll(t0 + DEBOUNCE + DEBOUNCE).is_none());
}

#[test]
fn cancel_disarms_a_pending_timer() {
    let mut adjuster = StockAdjuster::new(1, 5, 10);
    let t0 = Instant::now();
    adjuster.increment(t0);
    assert!(adjuster.next_deadline().is_some());
    adjuster.cancel();
    assert_eq!(adjuster.state(), AdjusterState::Idle);
    assert!(adjuster.poll(t0 + DEBOUNCE).is_none());
}

#[test]
fn initial_stock_is_clamped_to_capacity() {
    let adjuster = StockAdjuster::new(1, 50, 10);
    assert_eq!(adjuster.displayed(), 10);
    assert_eq!(adjuster.confirmed(), 10);
    assert_eq!(adjuster.base_stock(), 10);
}
