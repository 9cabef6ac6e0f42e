//! Typed publish/subscribe channel for lifecycle signals.

use std::time::Duration;

use crate::constants::TITLE_REVEAL_TIMEOUT_MS;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    IntroHalfway,
    IntroComplete,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type Handler<E> = Box<dyn FnMut(&E)>;

/// Single-threaded channel; handlers run synchronously in subscription order.
pub struct EventChannel<E> {
    subscribers: Vec<(SubscriptionId, Handler<E>)>,
    next_id: u64,
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }
}

impl<E> EventChannel<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        before != self.subscribers.len()
    }

    /// Delivers `event` to every subscriber; returns how many received it.
    pub fn publish(&mut self, event: &E) -> usize {
        for (_, handler) in self.subscribers.iter_mut() {
            handler(event);
        }
        self.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    pub fn clear(&mut self) {
        self.subscribers.clear();
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealCause {
    Halfway,
    Complete,
    Timeout,
}

/// Reveals the page title once: on the first lifecycle signal, or after a
/// timeout when neither signal shows up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TitleReveal {
    cause: Option<RevealCause>,
    waited: Duration,
    timeout: Duration,
}

impl Default for TitleReveal {
    fn default() -> Self {
        Self::new(Duration::from_millis(TITLE_REVEAL_TIMEOUT_MS))
    }
}

impl TitleReveal {
    pub fn new(timeout: Duration) -> Self {
        Self {
            cause: None,
            waited: Duration::ZERO,
            timeout,
        }
    }

    /// Returns true only for the call that actually revealed the title.
    pub fn on_event(&mut self, event: &LifecycleEvent) -> bool {
        let cause = match event {
            LifecycleEvent::IntroHalfway => RevealCause::Halfway,
            LifecycleEvent::IntroComplete => RevealCause::Complete,
        };
        self.reveal(cause)
    }

    pub fn advance(&mut self, dt: Duration) -> bool {
        if self.cause.is_some() {
            return false;
        }
        self.waited += dt;
        if self.waited >= self.timeout {
            log::info!("[intro] no lifecycle signal after {:?}; revealing title", self.timeout);
            return self.reveal(RevealCause::Timeout);
        }
        false
    }

    pub fn is_revealed(&self) -> bool {
        self.cause.is_some()
    }

    pub fn cause(&self) -> Option<RevealCause> {
        self.cause
    }

    fn reveal(&mut self, cause: RevealCause) -> bool {
        if self.cause.is_some() {
            return false;
        }
        self.cause = Some(cause);
        true
    }
}
