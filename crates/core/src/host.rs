// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declaring named events on a host type
//!
//! A host declares its events once with the [`events!`](crate::events)
//! macro. Every instance owns its own [`EventSlot`] per declared name, and
//! each slot creates its [`Event`] the first time it is used.
//!
//! ```
//! use chime_core::{events, EventHost};
//!
//! events! {
//!     pub struct DoorEvents {
//!         opened: u32,
//!         closed: (),
//!     }
//! }
//!
//! let events = DoorEvents::default();
//! events.opened().subscribe_fn(|floor| {
//!     println!("opened on {}", floor);
//!     Ok(())
//! });
//! events.opened().fire(&3).unwrap();
//! assert!(!events.closed().is_created());
//! assert_eq!(DoorEvents::DECLARED, &["opened", "closed"]);
//! ```

use crate::error::{EventError, HandlerResult};
use crate::event::Event;
use crate::subscriber::{Subscriber, SubscriptionKey};
use std::any::Any;
use std::fmt;
use std::sync::RwLock;
use tracing::debug;

/// Per-instance storage for one declared event
///
/// Unset until first used; from then on it holds an event for as long as the
/// slot lives. Clearing the event empties its subscribers but keeps it.
pub struct EventSlot<A> {
    name: &'static str,
    event: RwLock<Option<Event<A>>>,
}

impl<A: 'static> EventSlot<A> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            event: RwLock::new(None),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The slot's event, created on first use
    pub fn get(&self) -> Event<A> {
        if let Some(event) = self
            .event
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
        {
            return event.clone();
        }

        let mut slot = self.event.write().unwrap_or_else(|e| e.into_inner());
        slot.get_or_insert_with(|| {
            debug!(event = self.name, "created");
            Event::new(self.name)
        })
        .clone()
    }

    pub fn is_created(&self) -> bool {
        self.event
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn fire(&self, args: &A) -> Result<(), EventError> {
        self.get().fire(args)
    }

    pub fn subscribe(&self, subscriber: Subscriber<A>) -> Event<A> {
        let event = self.get();
        event.subscribe(subscriber);
        event
    }

    pub fn subscribe_fn<F>(&self, f: F) -> Subscriber<A>
    where
        F: Fn(&A) -> HandlerResult + Send + Sync + 'static,
    {
        self.get().subscribe_fn(f)
    }

    pub fn subscribe_named(&self, name: impl Into<String>, subscriber: Subscriber<A>) -> Event<A> {
        let event = self.get();
        event.subscribe_named(name, subscriber);
        event
    }

    pub fn unsubscribe(&self, key: impl Into<SubscriptionKey>) -> Event<A> {
        let event = self.get();
        event.unsubscribe(key);
        event
    }

    /// Replace the slot's event with another one
    pub fn assign(&self, event: Event<A>) {
        debug!(event = self.name, assigned = event.name(), "assigned");
        *self.event.write().unwrap_or_else(|e| e.into_inner()) = Some(event);
    }

    /// Assign a dynamically-typed value, which must be an `Event<A>`
    ///
    /// Any other value fails with [`EventError::SubscriberType`] and leaves
    /// the slot as it was.
    pub fn assign_any(&self, value: Box<dyn Any + Send + Sync>) -> Result<(), EventError> {
        match value.downcast::<Event<A>>() {
            Ok(event) => {
                self.assign(*event);
                Ok(())
            }
            Err(_) => Err(EventError::not_an_event(
                self.name,
                std::any::type_name::<Event<A>>(),
            )),
        }
    }
}

impl<A> fmt::Debug for EventSlot<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let guard = self.event.read().unwrap_or_else(|e| e.into_inner());
        f.debug_struct("EventSlot")
            .field("name", &self.name)
            .field("event", &*guard)
            .finish()
    }
}

/// Name-based access to the events a host type declares
///
/// Implemented by the [`events!`](crate::events) macro.
pub trait EventHost {
    /// Declared event names, in declaration order
    const DECLARED: &'static [&'static str];

    fn is_declared(name: &str) -> bool {
        Self::DECLARED.contains(&name)
    }

    /// Whether the named event has been created on this instance
    fn is_created(&self, name: &str) -> Result<bool, EventError>;

    /// Assign a whole event to the named slot
    fn assign(&self, name: &str, value: Box<dyn Any + Send + Sync>) -> Result<(), EventError>;
}

/// Declare a struct holding one [`EventSlot`] per named event
///
/// Each `name: Args` entry becomes a private field and a same-named accessor
/// returning `&EventSlot<Args>`. The struct gets a `Default` impl that names
/// every slot after its field, and an [`EventHost`] impl.
#[macro_export]
macro_rules! events {
    (
        $(#[$meta:meta])*
        $vis:vis struct $host:ident {
            $(
                $(#[$event_meta:meta])*
                $event:ident : $args:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $host {
            $( $event: $crate::EventSlot<$args>, )*
        }

        #[allow(dead_code)]
        impl $host {
            $(
                $(#[$event_meta])*
                $vis fn $event(&self) -> &$crate::EventSlot<$args> {
                    &self.$event
                }
            )*
        }

        impl ::std::default::Default for $host {
            fn default() -> Self {
                Self {
                    $( $event: $crate::EventSlot::new(stringify!($event)), )*
                }
            }
        }

        impl $crate::EventHost for $host {
            const DECLARED: &'static [&'static str] = &[$( stringify!($event) ),*];

            fn is_created(&self, name: &str) -> ::std::result::Result<bool, $crate::EventError> {
                match name {
                    $( stringify!($event) => Ok(self.$event.is_created()), )*
                    _ => Err($crate::EventError::UnknownEvent { name: name.to_string() }),
                }
            }

            fn assign(
                &self,
                name: &str,
                value: ::std::boxed::Box<dyn ::std::any::Any + Send + Sync>,
            ) -> ::std::result::Result<(), $crate::EventError> {
                match name {
                    $( stringify!($event) => self.$event.assign_any(value), )*
                    _ => {
                        drop(value);
                        Err($crate::EventError::UnknownEvent { name: name.to_string() })
                    }
                }
            }
        }
    };
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
