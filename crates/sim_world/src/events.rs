//! Synchronous publish/subscribe for named events.
//!
//! An [`EventBus`] is a cheap, cloneable handle. [`Observer`]s created from
//! it register callbacks per event name with [`Observer::watch`], and
//! [`EventBus::fire`] invokes every matching callback of every observer that
//! is still alive, in registration order.
//!
//! The bus only holds weak references to observers: dropping an observer
//! unsubscribes all of its callbacks.
//!
//! Dispatch is reentrant. A callback may fire further events or register new
//! watches; callbacks registered during a dispatch are first invoked by the
//! next `fire`. Nesting is capped at [`EventBus::DEFAULT_MAX_DEPTH`] unless
//! configured otherwise, past which `fire` returns
//! [`EventError::RecursionLimit`].

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use sim_component::EntityId;
use sim_math::Axis;
use tracing::trace;

use crate::error::EventError;

/// Data carried by an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// No data.
    Empty,
    /// `acting` was resolved against `other` on `axis`.
    Collision {
        acting: EntityId,
        other: EntityId,
        axis: Axis,
    },
    /// `entity` was pinned to `anchor` by its STICK policy.
    Stuck { entity: EntityId, anchor: EntityId },
    /// Current score.
    Score(u32),
    /// Free-form script data.
    Text(String),
}

/// A fired event as seen by callbacks.
#[derive(Debug, Clone, Copy)]
pub struct Event<'a> {
    pub name: &'a str,
    pub payload: &'a Payload,
}

type Callback = Rc<dyn Fn(&Event<'_>)>;

#[derive(Default)]
struct ObserverTable {
    callbacks: RefCell<HashMap<String, Vec<Callback>>>,
}

struct BusInner {
    observers: RefCell<Vec<Weak<ObserverTable>>>,
    depth: Cell<usize>,
    max_depth: usize,
}

/// Handle to a shared event bus.
#[derive(Clone)]
pub struct EventBus {
    inner: Rc<BusInner>,
}

impl EventBus {
    /// Default nesting limit for reentrant dispatch.
    pub const DEFAULT_MAX_DEPTH: usize = 32;

    /// Create a new bus with the default nesting limit.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_depth(Self::DEFAULT_MAX_DEPTH)
    }

    /// Create a new bus that allows `max_depth` nested dispatches.
    #[must_use]
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            inner: Rc::new(BusInner {
                observers: RefCell::new(Vec::new()),
                depth: Cell::new(0),
                max_depth,
            }),
        }
    }

    /// Create an observer subscribed to this bus.
    #[must_use]
    pub fn observer(&self) -> Observer {
        let table = Rc::new(ObserverTable::default());
        self.inner.observers.borrow_mut().push(Rc::downgrade(&table));
        Observer { table }
    }

    /// Number of observers still alive.
    #[must_use]
    pub fn observer_count(&self) -> usize {
        self.inner
            .observers
            .borrow()
            .iter()
            .filter(|w| w.strong_count() > 0)
            .count()
    }

    /// Invoke every callback watching `name` with `payload`.
    ///
    /// Returns the number of callbacks invoked, including none.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::RecursionLimit`] if this call would nest deeper
    /// than the bus allows. Errors from nested `fire` calls are the
    /// callback's to handle.
    pub fn fire(&self, name: &str, payload: &Payload) -> Result<usize, EventError> {
        let depth = self.inner.depth.get();
        if depth >= self.inner.max_depth {
            return Err(EventError::RecursionLimit {
                event: name.to_string(),
                limit: self.inner.max_depth,
            });
        }

        // Snapshot the callbacks so none of the tables stay borrowed while
        // user code runs.
        let mut callbacks: Vec<Callback> = Vec::new();
        {
            let mut observers = self.inner.observers.borrow_mut();
            observers.retain(|w| w.strong_count() > 0);
            for table in observers.iter().filter_map(Weak::upgrade) {
                if let Some(watching) = table.callbacks.borrow().get(name) {
                    callbacks.extend(watching.iter().cloned());
                }
            }
        }

        trace!(event = name, depth, callbacks = callbacks.len(), "firing event");

        let _guard = DepthGuard::enter(&self.inner.depth);
        let event = Event { name, payload };
        for callback in &callbacks {
            callback(&event);
        }
        Ok(callbacks.len())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observer_count())
            .field("max_depth", &self.inner.max_depth)
            .finish()
    }
}

struct DepthGuard<'a>(&'a Cell<usize>);

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self(depth)
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get() - 1);
    }
}

/// A set of event callbacks subscribed to one bus.
///
/// Keep the observer alive for as long as its callbacks should run.
pub struct Observer {
    table: Rc<ObserverTable>,
}

impl Observer {
    /// Register `callback` for events named `name`. Several callbacks may
    /// watch the same name; they run in registration order.
    pub fn watch(&self, name: impl Into<String>, callback: impl Fn(&Event<'_>) + 'static) {
        self.table
            .callbacks
            .borrow_mut()
            .entry(name.into())
            .or_default()
            .push(Rc::new(callback));
    }

    /// Returns `true` if any callback watches `name`.
    #[must_use]
    pub fn is_watching(&self, name: &str) -> bool {
        self.table.callbacks.borrow().contains_key(name)
    }
}

impl fmt::Debug for Observer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.table.callbacks.borrow().keys().cloned().collect();
        f.debug_struct("Observer").field("watching", &names).finish()
    }
}
