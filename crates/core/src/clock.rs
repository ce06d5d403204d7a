// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clocks and a ticker that fires an event when the time changes

use crate::error::EventError;
use crate::events;
use chrono::{DateTime, Duration as TimeDelta, Utc};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};

/// A clock that provides the current time
pub trait Clock: Clone + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Real system clock
#[derive(Clone, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Fake clock for testing with controllable time
///
/// With a step set, every read advances the clock by that step afterwards.
#[derive(Clone)]
pub struct FakeClock {
    current: Arc<Mutex<DateTime<Utc>>>,
    step: Arc<Mutex<TimeDelta>>,
}

impl FakeClock {
    pub fn new() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            current: Arc::new(Mutex::new(instant)),
            step: Arc::new(Mutex::new(TimeDelta::zero())),
        }
    }

    /// Advance the clock by the given duration
    pub fn advance(&self, duration: TimeDelta) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += duration;
    }

    /// Set the clock to a specific instant
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current = instant;
    }

    /// Advance by `step` after every read
    pub fn set_step(&self, step: TimeDelta) {
        *self.step.lock().unwrap_or_else(|e| e.into_inner()) = step;
    }
}

impl Default for FakeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for FakeClock {
    fn now(&self) -> DateTime<Utc> {
        let step = *self.step.lock().unwrap_or_else(|e| e.into_inner());
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let now = *current;
        *current += step;
        now
    }
}

/// Payload of [`TickerEvents::second_change`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    /// Time observed when the change was noticed
    pub at: DateTime<Utc>,
    /// 1-based number of this tick since the ticker was created
    pub count: usize,
}

events! {
    pub struct TickerEvents {
        /// Fired when the observed time moves into a new resolution bucket
        second_change: Tick,
        /// Fired once when [`Ticker::run`] finishes, with the number of ticks
        stopped: usize,
    }
}

/// Polls a clock and fires `second_change` whenever the time changes
pub struct Ticker<C: Clock> {
    clock: C,
    resolution_ms: i64,
    last_bucket: Option<i64>,
    ticks: usize,
    events: TickerEvents,
}

impl<C: Clock> Ticker<C> {
    /// A ticker with one-second resolution
    pub fn new(clock: C) -> Self {
        Self::with_resolution(clock, Duration::from_secs(1))
    }

    /// Resolutions below one millisecond are raised to one millisecond
    pub fn with_resolution(clock: C, resolution: Duration) -> Self {
        let resolution_ms = i64::try_from(resolution.as_millis()).unwrap_or(i64::MAX);
        Self {
            clock,
            resolution_ms: resolution_ms.max(1),
            last_bucket: None,
            ticks: 0,
            events: TickerEvents::default(),
        }
    }

    pub fn events(&self) -> &TickerEvents {
        &self.events
    }

    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Read the clock once, firing `second_change` if the time moved into a
    /// new bucket since the last poll
    ///
    /// Returns whether the event fired. The first poll always fires.
    pub fn poll(&mut self) -> Result<bool, EventError> {
        let at = self.clock.now();
        let bucket = at.timestamp_millis().div_euclid(self.resolution_ms);
        if self.last_bucket == Some(bucket) {
            return Ok(false);
        }

        self.last_bucket = Some(bucket);
        self.ticks += 1;
        debug!(tick = self.ticks, at = %at, "time changed");
        self.events.second_change.fire(&Tick {
            at,
            count: self.ticks,
        })?;
        Ok(true)
    }

    /// Poll every `interval` until `limit` ticks have fired, or forever when
    /// no limit is given, then fire `stopped`
    ///
    /// A failing subscriber stops the loop and its error is returned;
    /// `stopped` is not fired in that case.
    pub fn run(&mut self, limit: Option<usize>, interval: Duration) -> Result<usize, EventError> {
        self.run_while(limit, interval, || true)
    }

    /// Like [`Ticker::run`], but also stops once `keep_going` returns false
    ///
    /// `keep_going` is checked before and after each sleep.
    pub fn run_while<F>(
        &mut self,
        limit: Option<usize>,
        interval: Duration,
        keep_going: F,
    ) -> Result<usize, EventError>
    where
        F: Fn() -> bool,
    {
        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        info!(?limit, interval_ms, "ticker started");
        let mut fired = 0;

        while limit.map_or(true, |limit| fired < limit) && keep_going() {
            if !interval.is_zero() {
                std::thread::sleep(interval);
                if !keep_going() {
                    break;
                }
            }
            if self.poll()? {
                fired += 1;
            }
        }

        info!(ticks = fired, "ticker stopped");
        self.events.stopped.fire(&fired)?;
        Ok(fired)
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
