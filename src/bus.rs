//! Host notification bus
//!
//! A single-threaded publish/subscribe bus keyed by [`Topic`]. Subscribing
//! returns a [`Subscription`] guard; dropping the guard unsubscribes, so a
//! listener lives exactly as long as whatever owns its guard.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::messages::{HostEvent, Topic};

type Handler = Rc<dyn Fn(&HostEvent)>;

#[derive(Default)]
struct BusInner {
    next_id: u64,
    handlers: Vec<(u64, Topic, Handler)>,
}

/// Publish/subscribe hub for host-wide notifications
#[derive(Clone, Default)]
pub struct MessageBus {
    inner: Rc<RefCell<BusInner>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `topic` until the returned guard is dropped
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe(&self, topic: Topic, handler: impl Fn(&HostEvent) + 'static) -> Subscription {
        let mut inner = self.inner.borrow_mut();
        inner.next_id += 1;
        let id = inner.next_id;
        inner.handlers.push((id, topic, Rc::new(handler)));
        tracing::trace!(id, ?topic, "subscribed");

        Subscription {
            id,
            topic,
            bus: Rc::downgrade(&self.inner),
        }
    }

    /// Deliver `event` to every handler of its topic, in subscription order
    ///
    /// Handlers may subscribe or unsubscribe while the event is delivered;
    /// such changes take effect from the next publish.
    pub fn publish(&self, event: &HostEvent) {
        let topic = event.topic();
        let handlers: Vec<Handler> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .filter(|(_, t, _)| *t == topic)
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();

        tracing::trace!(?topic, listeners = handlers.len(), "publishing");
        for handler in handlers {
            handler(event);
        }
    }

    /// Number of live subscriptions for `topic`
    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.inner
            .borrow()
            .handlers
            .iter()
            .filter(|(_, t, _)| *t == topic)
            .count()
    }
}

impl fmt::Debug for MessageBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MessageBus")
            .field("subscriptions", &self.inner.borrow().handlers.len())
            .finish()
    }
}

/// Guard for one bus registration
pub struct Subscription {
    id: u64,
    topic: Topic,
    bus: Weak<RefCell<BusInner>>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.borrow_mut().handlers.retain(|(id, _, _)| *id != self.id);
            tracing::trace!(id = self.id, topic = ?self.topic, "unsubscribed");
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("topic", &self.topic)
            .finish()
    }
}
