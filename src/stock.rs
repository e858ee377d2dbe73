// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Debounced optimistic stock adjustment, one instance per product.
//!
//! The counter shown to the user moves immediately; the backend call waits
//! for 500 ms of quiescence and carries a single delta relative to the last
//! value the backend confirmed. Time is injected through `Instant`
//! arguments so the machine can be driven without sleeping.

use std::time::{Duration, Instant};

use crate::models::Product;

pub const DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjusterState {
    Idle,
    PendingDebounce,
    Inflight,
}

/// A mutation ready to send: `delta` relative to the last confirmed value,
/// `target` being the displayed value it would confirm.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockDelta {
    pub product_id: i64,
    pub delta: i64,
    pub target: i64,
}

#[derive(Debug)]
pub struct StockAdjuster {
    product_id: i64,
    base_stock: i64,
    confirmed: i64,
    displayed: i64,
    deadline: Option<Instant>,
    state: AdjusterState,
}

impl StockAdjuster {
    pub fn new(product_id: i64, current_stock: i64, base_stock: i64) -> Self {
        let base = base_stock.max(0);
        let confirmed = current_stock.clamp(0, base);
        Self {
            product_id,
            base_stock: base,
            confirmed,
            displayed: confirmed,
            deadline: None,
            state: AdjusterState::Idle,
        }
    }

    pub fn for_product(product: &Product) -> Self {
        Self::new(product.id, product.current_stock, product.capacity())
    }

    pub fn state(&self) -> AdjusterState {
        self.state
    }

    /// The optimistic counter the user sees.
    pub fn displayed(&self) -> i64 {
        self.displayed
    }

    /// The last value the backend acknowledged.
    pub fn confirmed(&self) -> i64 {
        self.confirmed
    }

    pub fn base_stock(&self) -> i64 {
        self.base_stock
    }

    pub fn increment(&mut self, now: Instant) {
        self.apply(self.displayed + 1, now);
    }

    pub fn decrement(&mut self, now: Instant) {
        self.apply(self.displayed - 1, now);
    }

    pub fn set_value(&mut self, value: i64, now: Instant) {
        self.apply(value, now);
    }

    /// Direct numeric entry. Invalid or empty input leaves the counter and
    /// any armed timer untouched and returns false; valid input is clamped
    /// and takes the normal debounce path.
    pub fn enter_text(&mut self, raw: &str, now: Instant) -> bool {
        match raw.trim().parse::<i64>() {
            Ok(value) => {
                self.apply(value, now);
                true
            }
            Err(_) => false,
        }
    }

    fn apply(&mut self, value: i64, now: Instant) {
        self.displayed = value.clamp(0, self.base_stock);
        self.deadline = Some(now + DEBOUNCE);
        // While a call is in flight the new deadline waits for it to
        // resolve; per-product mutations stay serialized.
        if self.state != AdjusterState::Inflight {
            self.state = AdjusterState::PendingDebounce;
        }
    }

    /// Fire the debounce timer if it has elapsed. A zero delta settles back
    /// to Idle without producing a request; only the final value of a burst
    /// is ever sent.
    pub fn poll(&mut self, now: Instant) -> Option<StockDelta> {
        if self.state != AdjusterState::PendingDebounce {
            return None;
        }
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        let delta = self.displayed - self.confirmed;
        if delta == 0 {
            self.state = AdjusterState::Idle;
            return None;
        }
        self.state = AdjusterState::Inflight;
        Some(StockDelta {
            product_id: self.product_id,
            delta,
            target: self.displayed,
        })
    }

    /// The backend acknowledged `target`. Adjustments made while the call
    /// was in flight keep their armed deadline and fire on a later poll.
    pub fn commit(&mut self, target: i64) {
        self.confirmed = target;
        self.state = if self.deadline.is_some() {
            AdjusterState::PendingDebounce
        } else {
            AdjusterState::Idle
        };
    }

    /// The call failed: revert the counter to the confirmed value, drop any
    /// pending adjustment, and settle to Idle. Returns the reverted value.
    pub fn rollback(&mut self) -> i64 {
        self.displayed = self.confirmed;
        self.deadline = None;
        self.state = AdjusterState::Idle;
        self.confirmed
    }

    /// Teardown: disarm the timer so no stray mutation fires afterwards.
    pub fn cancel(&mut self) {
        self.deadline = None;
        if self.state == AdjusterState::PendingDebounce {
            self.state = AdjusterState::Idle;
        }
    }

    /// When the armed debounce will fire, if one is armed.
    pub fn next_deadline(&self) -> Option<Instant> {
        match self.state {
            AdjusterState::PendingDebounce => self.deadline,
            _ => None,
        }
    }
}
