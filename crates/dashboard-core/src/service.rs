//! Data service boundary consumed by pages.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::channel::oneshot;
use futures::future::LocalBoxFuture;
use thiserror::Error;

use crate::hub::{StreamEvent, StreamHub, SubscriptionId};
use crate::topic::Topic;

/// Failures produced while fetching or decoding stream data.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    #[error("malformed payload on stream '{topic}': {source}")]
    Payload {
        topic: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Fetches raw JSON for a topic path.
pub trait Transport {
    fn fetch(&self, path: &str) -> LocalBoxFuture<'static, Result<serde_json::Value, ServiceError>>;
}

/// Runs fire-and-forget tasks on the local executor.
pub trait Spawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}

impl Spawner for futures::executor::LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        if let Err(err) = futures::task::LocalSpawnExt::spawn_local(self, task) {
            tracing::warn!("failed to spawn task: {err}");
        }
    }
}

/// The operations a page needs from its data source.
pub trait DataService {
    /// Register `handler` on the stream for topic `T`.
    fn subscribe<T: Topic>(
        &self,
        handler: impl Fn(&StreamEvent<T::Payload>) + 'static,
    ) -> Subscription;

    /// Release a registration. Idempotent.
    fn unsubscribe(&self, id: SubscriptionId);

    /// Ask the service to (re)produce the stream for `T`.
    ///
    /// The outcome is observed on the stream. The returned completion may
    /// be dropped without cancelling the request.
    fn trigger<T: Topic>(&self) -> TriggerCompletion;
}

/// Live registration on a stream. Dropping it unsubscribes.
pub struct Subscription {
    id: SubscriptionId,
    release: Option<Box<dyn FnOnce(SubscriptionId)>>,
}

impl Subscription {
    pub fn new(id: SubscriptionId, release: impl FnOnce(SubscriptionId) + 'static) -> Self {
        Self {
            id,
            release: Some(Box::new(release)),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn is_released(&self) -> bool {
        self.release.is_none()
    }

    /// Unsubscribe now. Later calls do nothing.
    pub fn release(&mut self) {
        if let Some(release) = self.release.take() {
            release(self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("released", &self.is_released())
            .finish()
    }
}

/// How a triggered fetch ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// A value was published on the stream.
    Delivered,
    /// An error was published on the stream.
    Failed,
    /// The stream had completed, so nothing was fetched or published.
    Dropped,
    /// The task was dropped before finishing.
    Abandoned,
}

/// Discardable signal resolving once a triggered fetch has finished.
#[derive(Debug)]
pub struct TriggerCompletion {
    rx: oneshot::Receiver<Completion>,
}

impl TriggerCompletion {
    pub fn channel() -> (oneshot::Sender<Completion>, Self) {
        let (tx, rx) = oneshot::channel();
        (tx, Self { rx })
    }
}

impl Future for TriggerCompletion {
    type Output = Completion;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx)
            .poll(cx)
            .map(|result| result.unwrap_or(Completion::Abandoned))
    }
}

/// Benchmarker master API exposed as push streams.
///
/// Triggers fetch through the transport on the spawner, validate the JSON
/// against the topic schema and publish the outcome on the hub.
pub struct TigApiService<Tr, Sp> {
    hub: StreamHub,
    transport: Rc<Tr>,
    spawner: Sp,
}

impl<Tr, Sp> TigApiService<Tr, Sp>
where
    Tr: Transport + 'static,
    Sp: Spawner,
{
    pub fn new(transport: Tr, spawner: Sp) -> Self {
        Self {
            hub: StreamHub::new(),
            transport: Rc::new(transport),
            spawner,
        }
    }

    pub fn hub(&self) -> &StreamHub {
        &self.hub
    }

    pub fn transport(&self) -> &Tr {
        &self.transport
    }

    /// Complete the stream for `T`. Subscribers get `Completed` and later
    /// triggers resolve to `Completion::Dropped` without fetching.
    pub fn close<T: Topic>(&self) {
        if self.hub.complete::<T>() {
            tracing::info!(topic = T::NAME, "stream closed");
        }
    }

    /// Whether both handles point at the same hub and transport.
    pub fn same_service(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.transport, &other.transport)
    }
}

impl<Tr, Sp: Clone> Clone for TigApiService<Tr, Sp> {
    fn clone(&self) -> Self {
        Self {
            hub: self.hub.clone(),
            transport: Rc::clone(&self.transport),
            spawner: self.spawner.clone(),
        }
    }
}

impl<Tr, Sp> DataService for TigApiService<Tr, Sp>
where
    Tr: Transport + 'static,
    Sp: Spawner,
{
    fn subscribe<T: Topic>(
        &self,
        handler: impl Fn(&StreamEvent<T::Payload>) + 'static,
    ) -> Subscription {
        let id = self.hub.subscribe::<T>(handler);
        let hub = self.hub.clone();
        Subscription::new(id, move |id| {
            hub.unsubscribe(id);
        })
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.hub.unsubscribe(id);
    }

    fn trigger<T: Topic>(&self) -> TriggerCompletion {
        let (tx, completion) = TriggerCompletion::channel();

        if self.hub.is_completed::<T>() {
            tracing::debug!(topic = T::NAME, "stream completed, skipping fetch");
            let _ = tx.send(Completion::Dropped);
            return completion;
        }

        let hub = self.hub.clone();
        let transport = Rc::clone(&self.transport);

        tracing::info!(topic = T::NAME, path = T::PATH, "triggering fetch");

        self.spawner.spawn(Box::pin(async move {
            let (event, outcome) = match transport.fetch(T::PATH).await.and_then(T::decode) {
                Ok(payload) => (StreamEvent::Value(payload), Completion::Delivered),
                Err(err) => {
                    tracing::warn!(topic = T::NAME, "fetch failed: {err}");
                    (StreamEvent::Error(err), Completion::Failed)
                }
            };
            // The stream may have completed while the fetch was in flight.
            let outcome = if hub.publish::<T>(event) {
                outcome
            } else {
                Completion::Dropped
            };
            // Nobody waiting is fine.
            let _ = tx.send(outcome);
        }));

        completion
    }
}
