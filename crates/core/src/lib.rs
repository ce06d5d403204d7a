// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! chime-core: in-process events for the chime tools
//!
//! This crate provides:
//! - `Event` - A named, ordered registry of subscribers that can be fired
//! - `EventSlot` and the `events!` macro - Per-instance events declared on a host type
//! - `Ticker` - A clock-driven host that fires when the time changes

pub mod clock;
pub mod error;
pub mod event;
pub mod host;
pub mod subscriber;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock, Tick, Ticker, TickerEvents};
pub use error::{EventError, HandlerError, HandlerResult};
pub use event::Event;
pub use host::{EventHost, EventSlot};
pub use subscriber::{Handler, HandlerId, SubscribeArg, Subscriber, SubscriptionKey};
