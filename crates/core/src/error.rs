// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised by events and event hosts

use thiserror::Error;

/// Error returned by a subscriber when it fails to handle a fired event
pub type HandlerError = Box<dyn std::error::Error + Send + Sync>;

/// Result type every subscriber returns
pub type HandlerResult = Result<(), HandlerError>;

#[derive(Debug, Error)]
pub enum EventError {
    /// A value offered as a subscriber is not callable, or a value assigned
    /// to an event slot is not an event of the slot's type
    #[error("subscriber type error: {value}")]
    SubscriberType { value: String },

    #[error("unknown event '{name}'")]
    UnknownEvent { name: String },

    /// A subscriber failed while the event was firing
    #[error("subscriber of '{event}' failed: {source}")]
    Handler {
        event: String,
        #[source]
        source: HandlerError,
    },
}

impl EventError {
    pub(crate) fn not_callable(value: impl std::fmt::Debug) -> Self {
        EventError::SubscriberType {
            value: format!("handler {:?} does not respond to call", value),
        }
    }

    pub(crate) fn not_an_event(slot: &str, expected: &str) -> Self {
        EventError::SubscriberType {
            value: format!(
                "attempted assignment to '{}' is not an event (expected {})",
                slot, expected
            ),
        }
    }
}
