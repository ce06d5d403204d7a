// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Named event with an ordered registry of subscribers
//!
//! An [`Event`] keeps its subscribers in subscription order, keyed either by
//! the subscriber handle itself or by an explicit name. Firing invokes every
//! subscriber with the same arguments.
//!
//! Registry mutations and the snapshot taken by [`Event::fire`] are
//! serialized by one lock per event. Subscribers run after the lock is
//! released, so a subscriber may subscribe or unsubscribe on the event it is
//! handling without affecting the fire already in progress.

use crate::error::{EventError, HandlerResult};
use crate::subscriber::{collect_handlers, SubscribeArg, Subscriber, SubscriptionKey};
use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace, warn};

type Registry<A> = Vec<(SubscriptionKey, Subscriber<A>)>;

/// A named event
///
/// Cloning an `Event` yields another handle to the same registry.
pub struct Event<A> {
    name: Arc<str>,
    subscribers: Arc<RwLock<Registry<A>>>,
}

impl<A: 'static> Event<A> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            subscribers: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Subscribe a handler keyed by its own identity
    ///
    /// Subscribing a handle that is already registered keeps its original
    /// position.
    pub fn subscribe(&self, subscriber: Subscriber<A>) -> &Self {
        let key = subscriber.key();
        self.insert(key, subscriber);
        self
    }

    /// Subscribe a closure and return its handle for later removal
    pub fn subscribe_fn<F>(&self, f: F) -> Subscriber<A>
    where
        F: Fn(&A) -> HandlerResult + Send + Sync + 'static,
    {
        let subscriber = Subscriber::new(f);
        self.subscribe(subscriber.clone());
        subscriber
    }

    /// Subscribe a handler under an explicit name
    ///
    /// A later subscription under the same name replaces the handler in place.
    pub fn subscribe_named(&self, name: impl Into<String>, subscriber: Subscriber<A>) -> &Self {
        self.insert(SubscriptionKey::Name(name.into()), subscriber);
        self
    }

    /// Subscribe from a loosely-typed argument list plus an optional block
    ///
    /// Exactly one non-callable value together with a block registers the
    /// block under that value as its name. Any other shape is flattened, nils
    /// dropped, and every item must be callable; each is registered under its
    /// own identity. If any item is not callable the call fails with
    /// [`EventError::SubscriberType`] and nothing is registered.
    pub fn subscribe_with(
        &self,
        mut args: Vec<SubscribeArg<A>>,
        block: Option<Subscriber<A>>,
    ) -> Result<&Self, EventError> {
        if let Some(block) = block {
            let named = args.len() == 1 && matches!(args.first(), Some(SubscribeArg::Value(_)));
            if named {
                if let Some(SubscribeArg::Value(name)) = args.pop() {
                    return Ok(self.subscribe_named(name, block));
                }
            }
            args.push(SubscribeArg::Handler(block));
        }

        let handlers = collect_handlers(args)?;
        let mut subscribers = self.write();
        for subscriber in handlers {
            let key = subscriber.key();
            upsert(&mut subscribers, key, subscriber);
        }
        debug!(event = %self.name, subscribers = subscribers.len(), "subscribed");
        Ok(self)
    }

    /// Remove the subscriber registered under `key`; unknown keys are ignored
    pub fn unsubscribe(&self, key: impl Into<SubscriptionKey>) -> &Self {
        self.unsubscribe_all([key])
    }

    pub fn unsubscribe_all<K, I>(&self, keys: I) -> &Self
    where
        K: Into<SubscriptionKey>,
        I: IntoIterator<Item = K>,
    {
        let keys: Vec<SubscriptionKey> = keys.into_iter().map(Into::into).collect();
        let mut subscribers = self.write();
        let before = subscribers.len();
        subscribers.retain(|(key, _)| !keys.contains(key));
        if subscribers.len() != before {
            debug!(
                event = %self.name,
                removed = before - subscribers.len(),
                "unsubscribed"
            );
        }
        self
    }

    /// Invoke every subscriber in subscription order
    ///
    /// The set of subscribers is fixed when the call starts. The first
    /// subscriber failure aborts the remaining invocations and is returned.
    pub fn fire(&self, args: &A) -> Result<(), EventError> {
        let snapshot = self.snapshot();
        trace!(event = %self.name, subscribers = snapshot.len(), "firing");

        for subscriber in &snapshot {
            subscriber.call(args).map_err(|source| EventError::Handler {
                event: self.name.to_string(),
                source,
            })?;
        }
        Ok(())
    }

    /// Invoke every subscriber even if some fail, returning all failures
    ///
    /// Unlike [`Event::fire`], one failing subscriber does not prevent the
    /// rest from running.
    pub fn fire_isolated(&self, args: &A) -> Vec<EventError> {
        let snapshot = self.snapshot();
        trace!(event = %self.name, subscribers = snapshot.len(), "firing isolated");

        let mut failures = Vec::new();
        for subscriber in &snapshot {
            if let Err(source) = subscriber.call(args) {
                warn!(event = %self.name, error = %source, "subscriber failed");
                failures.push(EventError::Handler {
                    event: self.name.to_string(),
                    source,
                });
            }
        }
        failures
    }

    pub fn clear(&self) {
        self.write().clear();
        debug!(event = %self.name, "cleared");
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// True when nothing is subscribed; such an event is effectively unset
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn contains(&self, key: impl Into<SubscriptionKey>) -> bool {
        let key = key.into();
        self.read().iter().any(|(k, _)| *k == key)
    }

    /// Subscription keys in firing order
    pub fn keys(&self) -> Vec<SubscriptionKey> {
        self.read().iter().map(|(key, _)| key.clone()).collect()
    }

    fn insert(&self, key: SubscriptionKey, subscriber: Subscriber<A>) {
        let mut subscribers = self.write();
        upsert(&mut subscribers, key, subscriber);
        debug!(event = %self.name, subscribers = subscribers.len(), "subscribed");
    }

    fn snapshot(&self) -> Vec<Subscriber<A>> {
        self.read().iter().map(|(_, s)| s.clone()).collect()
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry<A>> {
        self.subscribers.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry<A>> {
        self.subscribers.write().unwrap_or_else(|e| e.into_inner())
    }
}

fn upsert<A>(registry: &mut Registry<A>, key: SubscriptionKey, subscriber: Subscriber<A>) {
    match registry.iter_mut().find(|(k, _)| *k == key) {
        Some((_, existing)) => *existing = subscriber,
        None => registry.push((key, subscriber)),
    }
}

impl<A> Clone for Event<A> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

/// Two events are equal when they share one registry
impl<A> PartialEq for Event<A> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.subscribers, &other.subscribers)
    }
}

impl<A> Eq for Event<A> {}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let subscribers = self
            .subscribers
            .read()
            .map(|s| s.len())
            .unwrap_or_else(|e| e.into_inner().len());
        f.debug_struct("Event")
            .field("name", &self.name)
            .field("subscribers", &subscribers)
            .finish()
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
