//! Data page lifecycle.
//!
//! A `DataPage` subscribes to one topic on activation, fires one trigger
//! and keeps the latest received value. Dropping or destroying the page
//! releases its subscription.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use thiserror::Error;

use crate::hub::StreamEvent;
use crate::service::{DataService, Subscription};
use crate::topic::Topic;

/// Latest value held by a page.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PageState<T> {
    /// Nothing received yet.
    #[default]
    Absent,
    Populated(T),
}

impl<T> PageState<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, PageState::Absent)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            PageState::Absent => None,
            PageState::Populated(value) => Some(value),
        }
    }
}

/// Everything a view needs to render a data page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView<T> {
    pub state: PageState<T>,
    /// Message of the last stream error since the last value.
    pub last_error: Option<String>,
    /// The stream completed; no further updates will arrive.
    pub completed: bool,
}

impl<T> Default for PageView<T> {
    fn default() -> Self {
        Self {
            state: PageState::Absent,
            last_error: None,
            completed: false,
        }
    }
}

impl<T: Clone> PageView<T> {
    fn apply(&mut self, event: &StreamEvent<T>) {
        match event {
            StreamEvent::Value(value) => {
                self.state = PageState::Populated(value.clone());
                self.last_error = None;
            }
            StreamEvent::Error(err) => self.last_error = Some(err.to_string()),
            StreamEvent::Completed => self.completed = true,
        }
    }
}

/// Observable lifecycle phase of a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePhase {
    Unmounted,
    /// Subscribed, no value yet.
    Absent,
    /// Subscribed, holding the latest value.
    Populated,
    Destroyed,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page is already active")]
    AlreadyActive,
    #[error("page has been destroyed")]
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Unmounted,
    Active,
    Destroyed,
}

type ChangeHook<T> = Rc<dyn Fn(&PageView<T>)>;

/// A page bound to one topic of a data service.
pub struct DataPage<T: Topic, S: DataService> {
    service: S,
    view: Rc<RefCell<PageView<T::Payload>>>,
    subscription: Option<Subscription>,
    lifecycle: Lifecycle,
    on_change: Option<ChangeHook<T::Payload>>,
}

impl<T: Topic, S: DataService> DataPage<T, S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            view: Rc::new(RefCell::new(PageView::default())),
            subscription: None,
            lifecycle: Lifecycle::Unmounted,
            on_change: None,
        }
    }

    /// Call `hook` after every update applied to the page.
    #[must_use]
    pub fn on_change(mut self, hook: impl Fn(&PageView<T::Payload>) + 'static) -> Self {
        self.on_change = Some(Rc::new(hook));
        self
    }

    /// Subscribe to the topic and issue a single trigger.
    pub fn activate(&mut self) -> Result<(), PageError> {
        match self.lifecycle {
            Lifecycle::Active => return Err(PageError::AlreadyActive),
            Lifecycle::Destroyed => return Err(PageError::Destroyed),
            Lifecycle::Unmounted => {}
        }

        let view = Rc::downgrade(&self.view);
        let on_change = self.on_change.clone();
        let subscription = self
            .service
            .subscribe::<T>(move |event| apply_event(&view, on_change.as_ref(), event));

        tracing::debug!(topic = T::NAME, subscription = %subscription.id(), "page activated");
        self.subscription = Some(subscription);
        self.lifecycle = Lifecycle::Active;

        // The outcome arrives on the stream.
        drop(self.service.trigger::<T>());
        Ok(())
    }

    /// Release the subscription. The page accepts no further updates.
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        if let Some(mut subscription) = self.subscription.take() {
            subscription.release();
        }
        self.lifecycle = Lifecycle::Destroyed;
        tracing::debug!(topic = T::NAME, "page destroyed");
    }

    pub fn phase(&self) -> PagePhase {
        match self.lifecycle {
            Lifecycle::Unmounted => PagePhase::Unmounted,
            Lifecycle::Destroyed => PagePhase::Destroyed,
            Lifecycle::Active if self.view.borrow().state.is_absent() => PagePhase::Absent,
            Lifecycle::Active => PagePhase::Populated,
        }
    }

    pub fn state(&self) -> PageState<T::Payload> {
        self.view.borrow().state.clone()
    }

    pub fn view(&self) -> PageView<T::Payload> {
        self.view.borrow().clone()
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}

fn apply_event<P: Clone>(
    view: &Weak<RefCell<PageView<P>>>,
    on_change: Option<&ChangeHook<P>>,
    event: &StreamEvent<P>,
) {
    let Some(view) = view.upgrade() else {
        return;
    };
    if view.borrow().completed {
        return;
    }
    view.borrow_mut().apply(event);
    if let Some(hook) = on_change {
        let snapshot = view.borrow().clone();
        hook(&snapshot);
    }
}

impl<T: Topic, S: DataService> Drop for DataPage<T, S> {
    fn drop(&mut self) {
        self.destroy();
    }
}
