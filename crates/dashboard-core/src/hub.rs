//! Single-threaded stream hub.
//!
//! One channel per topic. Each channel keeps its subscribers in
//! registration order and the last published value, which is replayed to
//! every new subscriber before live events.
//!
//! Events published from inside a handler are queued and delivered after
//! the current event has reached every subscriber, so all subscribers see
//! one hub-wide publish order.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::rc::Rc;

use crate::service::ServiceError;
use crate::topic::Topic;

/// Identifier of one registration on the hub.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub#{}", self.0)
    }
}

/// An event delivered on a stream.
#[derive(Debug)]
pub enum StreamEvent<T> {
    /// A new value replacing whatever came before.
    Value(T),
    /// The producer failed to produce a value.
    Error(ServiceError),
    /// The stream will not emit anything else.
    Completed,
}

type Handler<T> = Rc<dyn Fn(&StreamEvent<T>)>;

/// Fan-out of one accepted event, waiting for its turn.
type Delivery = Box<dyn FnOnce(&StreamHub)>;

struct Channel<T> {
    subscribers: Vec<(SubscriptionId, Handler<T>)>,
    latest: Option<T>,
    completed: bool,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        Self {
            subscribers: Vec::new(),
            latest: None,
            completed: false,
        }
    }
}

impl<T: Clone> Channel<T> {
    fn replay(&self) -> Vec<StreamEvent<T>> {
        let mut events = Vec::new();
        if let Some(latest) = &self.latest {
            events.push(StreamEvent::Value(latest.clone()));
        }
        if self.completed {
            events.push(StreamEvent::Completed);
        }
        events
    }
}

/// Type-erased view of a channel so unsubscribe works from an id alone.
trait ErasedChannel {
    fn remove(&mut self, id: SubscriptionId) -> bool;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: 'static> ErasedChannel for Channel<T> {
    fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    channels: HashMap<TypeId, Box<dyn ErasedChannel>>,
    owners: HashMap<SubscriptionId, TypeId>,
}

impl HubInner {
    fn channel_mut<T: Topic>(&mut self) -> &mut Channel<T::Payload> {
        self.channels
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Channel::<T::Payload>::default()))
            .as_any_mut()
            .downcast_mut::<Channel<T::Payload>>()
            .expect("channels are keyed by their topic type")
    }
}

/// Shared registry of topic channels.
///
/// Cloning yields another handle to the same hub.
#[derive(Clone, Default)]
pub struct StreamHub {
    inner: Rc<RefCell<HubInner>>,
    pending: Rc<RefCell<VecDeque<Delivery>>>,
    delivering: Rc<Cell<bool>>,
}

/// Clears the delivering flag even if a handler panics.
struct DeliveringGuard<'a>(&'a Cell<bool>);

impl Drop for DeliveringGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl StreamHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` on topic `T`.
    ///
    /// The last value (and completion, if any) is replayed synchronously
    /// before this returns.
    pub fn subscribe<T: Topic>(
        &self,
        handler: impl Fn(&StreamEvent<T::Payload>) + 'static,
    ) -> SubscriptionId {
        let handler: Handler<T::Payload> = Rc::new(handler);

        let (id, replay) = {
            let mut inner = self.inner.borrow_mut();
            let id = SubscriptionId(inner.next_id);
            inner.next_id += 1;
            inner.owners.insert(id, TypeId::of::<T>());

            let channel = inner.channel_mut::<T>();
            channel.subscribers.push((id, Rc::clone(&handler)));
            (id, channel.replay())
        };

        tracing::debug!(topic = T::NAME, %id, replayed = replay.len(), "subscribed");

        for event in &replay {
            if !self.is_subscribed(id) {
                break;
            }
            handler(event);
        }

        id
    }

    /// Remove a registration. Unknown or already removed ids are ignored.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let Some(type_id) = inner.owners.remove(&id) else {
            return false;
        };
        let removed = inner
            .channels
            .get_mut(&type_id)
            .is_some_and(|channel| channel.remove(id));
        tracing::debug!(%id, removed, "unsubscribed");
        removed
    }

    pub fn is_subscribed(&self, id: SubscriptionId) -> bool {
        self.inner.borrow().owners.contains_key(&id)
    }

    /// Number of live registrations on topic `T`.
    pub fn subscriber_count<T: Topic>(&self) -> usize {
        self.inner.borrow_mut().channel_mut::<T>().subscribers.len()
    }

    /// Last value published on topic `T`, if any.
    pub fn latest<T: Topic>(&self) -> Option<T::Payload> {
        self.inner.borrow_mut().channel_mut::<T>().latest.clone()
    }

    /// Whether topic `T` has completed and drops further events.
    pub fn is_completed<T: Topic>(&self) -> bool {
        self.inner.borrow_mut().channel_mut::<T>().completed
    }

    /// Deliver `event` to every subscriber of `T` in registration order.
    ///
    /// Returns `false` when the event was dropped because the stream had
    /// already completed. The last value and completion are recorded
    /// immediately; the fan-out waits behind any delivery in progress. A
    /// subscriber removed by an earlier handler is skipped.
    pub fn publish<T: Topic>(&self, event: StreamEvent<T::Payload>) -> bool {
        let handlers = {
            let mut inner = self.inner.borrow_mut();
            let channel = inner.channel_mut::<T>();
            if channel.completed {
                tracing::debug!(topic = T::NAME, "dropping event on completed stream");
                return false;
            }
            match &event {
                StreamEvent::Value(value) => channel.latest = Some(value.clone()),
                StreamEvent::Completed => channel.completed = true,
                StreamEvent::Error(_) => {}
            }
            channel.subscribers.clone()
        };

        tracing::debug!(topic = T::NAME, subscribers = handlers.len(), "publishing");

        self.pending
            .borrow_mut()
            .push_back(Box::new(move |hub: &StreamHub| {
                for (id, handler) in handlers {
                    if hub.is_subscribed(id) {
                        handler(&event);
                    }
                }
            }));
        self.drain();
        true
    }

    /// Run queued deliveries in FIFO order unless an outer call already is.
    fn drain(&self) {
        if self.delivering.replace(true) {
            return;
        }
        let _guard = DeliveringGuard(&self.delivering);
        loop {
            let next = self.pending.borrow_mut().pop_front();
            let Some(delivery) = next else {
                break;
            };
            delivery(self);
        }
    }

    pub fn publish_value<T: Topic>(&self, value: T::Payload) -> bool {
        self.publish::<T>(StreamEvent::Value(value))
    }

    /// Close topic `T`: subscribers get `Completed` and later events are
    /// dropped.
    ///
    /// This is the producer side of stream completion. `TigApiService`
    /// calls it from `close`.
    pub fn complete<T: Topic>(&self) -> bool {
        self.publish::<T>(StreamEvent::Completed)
    }
}

impl fmt::Debug for StreamHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("StreamHub")
            .field("channels", &inner.channels.len())
            .field("subscriptions", &inner.owners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MainnetInfo;
    use crate::topic::{MainnetInfoTopic, SlaveStatsTopic};
    use std::cell::RefCell;

    fn info(height: u64) -> MainnetInfo {
        MainnetInfo {
            block_height: height,
            algorithms: vec![],
        }
    }

    fn recorder() -> (Rc<RefCell<Vec<u64>>>, impl Fn(&StreamEvent<MainnetInfo>)) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let handler = move |event: &StreamEvent<MainnetInfo>| {
            if let StreamEvent::Value(info) = event {
                sink.borrow_mut().push(info.block_height);
            }
        };
        (seen, handler)
    }

    #[test]
    fn test_publish_preserves_order() {
        let hub = StreamHub::new();
        let (seen, handler) = recorder();
        hub.subscribe::<MainnetInfoTopic>(handler);

        for height in [5, 3, 9] {
            hub.publish_value::<MainnetInfoTopic>(info(height));
        }

        assert_eq!(*seen.borrow(), vec![5, 3, 9]);
    }

    #[test]
    fn test_late_subscriber_gets_latest_replayed() {
        let hub = StreamHub::new();
        hub.publish_value::<MainnetInfoTopic>(info(1));
        hub.publish_value::<MainnetInfoTopic>(info(2));

        let (seen, handler) = recorder();
        hub.subscribe::<MainnetInfoTopic>(handler);

        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[test]
    fn test_unsubscribe_is_idempotent() {
        let hub = StreamHub::new();
        let (seen, handler) = recorder();
        let id = hub.subscribe::<MainnetInfoTopic>(handler);

        assert!(hub.unsubscribe(id));
        assert!(!hub.unsubscribe(id));
        hub.publish_value::<MainnetInfoTopic>(info(4));

        assert!(seen.borrow().is_empty());
        assert_eq!(hub.subscriber_count::<MainnetInfoTopic>(), 0);
    }

    #[test]
    fn test_topics_are_isolated() {
        let hub = StreamHub::new();
        let (seen, handler) = recorder();
        hub.subscribe::<MainnetInfoTopic>(handler);

        hub.publish_value::<SlaveStatsTopic>(vec![]);

        assert!(seen.borrow().is_empty());
        assert_eq!(hub.latest::<SlaveStatsTopic>(), Some(vec![]));
        assert_eq!(hub.latest::<MainnetInfoTopic>(), None);
    }

    #[test]
    fn test_completed_stream_drops_later_events() {
        let hub = StreamHub::new();
        let (seen, handler) = recorder();
        hub.subscribe::<MainnetInfoTopic>(handler);

        hub.publish_value::<MainnetInfoTopic>(info(1));
        hub.complete::<MainnetInfoTopic>();
        hub.publish_value::<MainnetInfoTopic>(info(2));

        assert_eq!(*seen.borrow(), vec![1]);
        assert_eq!(hub.latest::<MainnetInfoTopic>(), Some(info(1)));
        assert!(hub.is_completed::<MainnetInfoTopic>());
        assert!(!hub.publish_value::<MainnetInfoTopic>(info(3)));
        assert!(!hub.complete::<MainnetInfoTopic>());
    }

    #[test]
    fn test_republish_from_handler_keeps_order() {
        let hub = StreamHub::new();
        {
            let hub_handle = hub.clone();
            hub.subscribe::<MainnetInfoTopic>(move |event| {
                if let StreamEvent::Value(value) = event {
                    if value.block_height == 1 {
                        hub_handle.publish_value::<MainnetInfoTopic>(info(2));
                    }
                }
            });
        }
        let (seen, handler) = recorder();
        hub.subscribe::<MainnetInfoTopic>(handler);

        hub.publish_value::<MainnetInfoTopic>(info(1));

        assert_eq!(*seen.borrow(), vec![1, 2]);
        assert_eq!(hub.latest::<MainnetInfoTopic>(), Some(info(2)));
    }

    #[test]
    fn test_completion_from_handler_delivered_after_current_event() {
        let hub = StreamHub::new();
        {
            let hub_handle = hub.clone();
            hub.subscribe::<SlaveStatsTopic>(move |event| {
                if matches!(event, StreamEvent::Value(_)) {
                    hub_handle.complete::<SlaveStatsTopic>();
                }
            });
        }
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        hub.subscribe::<SlaveStatsTopic>(move |event| {
            sink.borrow_mut().push(match event {
                StreamEvent::Value(_) => "value",
                StreamEvent::Error(_) => "error",
                StreamEvent::Completed => "completed",
            });
        });

        hub.publish_value::<SlaveStatsTopic>(vec![]);

        assert_eq!(*events.borrow(), vec!["value", "completed"]);
    }

    #[test]
    fn test_handler_can_unsubscribe_later_subscriber() {
        let hub = StreamHub::new();
        let victim: Rc<RefCell<Option<SubscriptionId>>> = Rc::new(RefCell::new(None));

        {
            let hub_handle = hub.clone();
            let victim = Rc::clone(&victim);
            hub.subscribe::<MainnetInfoTopic>(move |_| {
                if let Some(id) = victim.borrow_mut().take() {
                    hub_handle.unsubscribe(id);
                }
            });
        }
        let (seen, handler) = recorder();
        *victim.borrow_mut() = Some(hub.subscribe::<MainnetInfoTopic>(handler));

        hub.publish_value::<MainnetInfoTopic>(info(8));

        assert!(seen.borrow().is_empty());
    }
}
