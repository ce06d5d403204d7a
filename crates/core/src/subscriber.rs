// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subscribers and the keys they are registered under
//!
//! A subscriber is anything implementing [`Handler`]: a closure, or a
//! custom handler type. It is wrapped in a [`Subscriber`] handle whose
//! identity doubles as its subscription key, so the same handle can be used
//! later to unsubscribe.

use crate::error::{EventError, HandlerResult};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Something that can be called when an event fires
pub trait Handler<A>: Send + Sync {
    fn call(&self, args: &A) -> HandlerResult;
}

impl<A, F> Handler<A> for F
where
    F: Fn(&A) -> HandlerResult + Send + Sync,
{
    fn call(&self, args: &A) -> HandlerResult {
        self(args)
    }
}

/// Identity of a subscriber handle
///
/// Assigned when the handle is created and never reused within a process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        HandlerId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Shared handle to a handler
pub struct Subscriber<A> {
    id: HandlerId,
    handler: Arc<dyn Handler<A>>,
}

impl<A: 'static> Subscriber<A> {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) -> HandlerResult + Send + Sync + 'static,
    {
        Self::from_handler(f)
    }

    /// Wrap a custom handler type
    pub fn from_handler<H: Handler<A> + 'static>(handler: H) -> Self {
        Self {
            id: HandlerId::next(),
            handler: Arc::new(handler),
        }
    }

    /// Wrap a closure that cannot fail
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&A) + Send + Sync + 'static,
    {
        Self::new(move |args: &A| {
            f(args);
            Ok(())
        })
    }
}

impl<A> Subscriber<A> {
    pub fn id(&self) -> HandlerId {
        self.id
    }

    pub fn key(&self) -> SubscriptionKey {
        SubscriptionKey::Identity(self.id())
    }

    pub fn call(&self, args: &A) -> HandlerResult {
        self.handler.call(args)
    }
}

impl<A> Clone for Subscriber<A> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<A> PartialEq for Subscriber<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<A> Eq for Subscriber<A> {}

impl<A> fmt::Debug for Subscriber<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Subscriber(#{})", self.id.0)
    }
}

/// Key a subscriber is stored under in an event's registry
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SubscriptionKey {
    /// Registered directly; keyed by the handle itself
    Identity(HandlerId),
    /// Registered under an explicit name
    Name(String),
}

impl<A> From<&Subscriber<A>> for SubscriptionKey {
    fn from(subscriber: &Subscriber<A>) -> Self {
        subscriber.key()
    }
}

impl From<HandlerId> for SubscriptionKey {
    fn from(id: HandlerId) -> Self {
        SubscriptionKey::Identity(id)
    }
}

impl From<&str> for SubscriptionKey {
    fn from(name: &str) -> Self {
        SubscriptionKey::Name(name.to_string())
    }
}

impl From<String> for SubscriptionKey {
    fn from(name: String) -> Self {
        SubscriptionKey::Name(name)
    }
}

impl fmt::Display for SubscriptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscriptionKey::Identity(id) => write!(f, "#{}", id.0),
            SubscriptionKey::Name(name) => write!(f, "{}", name),
        }
    }
}

/// One positional argument of a loosely-typed subscribe call
///
/// See [`Event::subscribe_with`](crate::Event::subscribe_with) for how a list
/// of these is interpreted.
pub enum SubscribeArg<A> {
    Handler(Subscriber<A>),
    /// A value that is not callable: a subscription name when paired with a
    /// block, an error otherwise
    Value(String),
    List(Vec<SubscribeArg<A>>),
    Nil,
}

impl<A> SubscribeArg<A> {
    pub fn is_callable(&self) -> bool {
        matches!(self, SubscribeArg::Handler(_))
    }
}

impl<A> fmt::Debug for SubscribeArg<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubscribeArg::Handler(subscriber) => fmt::Debug::fmt(subscriber, f),
            SubscribeArg::Value(value) => write!(f, "{:?}", value),
            SubscribeArg::List(items) => f.debug_list().entries(items).finish(),
            SubscribeArg::Nil => f.write_str("nil"),
        }
    }
}

impl<A> From<Subscriber<A>> for SubscribeArg<A> {
    fn from(subscriber: Subscriber<A>) -> Self {
        SubscribeArg::Handler(subscriber)
    }
}

impl<A> From<&str> for SubscribeArg<A> {
    fn from(value: &str) -> Self {
        SubscribeArg::Value(value.to_string())
    }
}

impl<A> From<String> for SubscribeArg<A> {
    fn from(value: String) -> Self {
        SubscribeArg::Value(value)
    }
}

impl<A> From<Vec<SubscribeArg<A>>> for SubscribeArg<A> {
    fn from(items: Vec<SubscribeArg<A>>) -> Self {
        SubscribeArg::List(items)
    }
}

impl<A> From<Option<Subscriber<A>>> for SubscribeArg<A> {
    fn from(subscriber: Option<Subscriber<A>>) -> Self {
        subscriber.map_or(SubscribeArg::Nil, SubscribeArg::Handler)
    }
}

/// Flatten nested lists, drop nils, and require every remaining item to be
/// callable. Nothing is returned unless every item passes.
pub(crate) fn collect_handlers<A>(
    args: Vec<SubscribeArg<A>>,
) -> Result<Vec<Subscriber<A>>, EventError> {
    let mut handlers = Vec::with_capacity(args.len());
    let mut pending: Vec<SubscribeArg<A>> = args.into_iter().rev().collect();

    while let Some(arg) = pending.pop() {
        match arg {
            SubscribeArg::Handler(subscriber) => handlers.push(subscriber),
            SubscribeArg::List(items) => pending.extend(items.into_iter().rev()),
            SubscribeArg::Nil => {}
            value @ SubscribeArg::Value(_) => return Err(EventError::not_callable(value)),
        }
    }

    Ok(handlers)
}

#[cfg(test)]
#[path = "subscriber_tests.rs"]
mod tests;
