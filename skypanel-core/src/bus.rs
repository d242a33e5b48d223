//! Synchronous Publish/Subscribe Event Bus
//!
//! ## Overview
//!
//! Panels on the dashboard never talk to each other. The component that
//! ingests forecast data publishes events here, and every panel that cares
//! has registered a handler for that kind of event:
//!
//! ```text
//!                        ┌──────────────────────────────┐
//!  IngestionOrchestrator │  EventBus<DashboardEvent>    │
//!  ──── publish(event) ─►│                              │
//!                        │  today-highlights ─► [h1,h2] │──► HighlightsPanel
//!                        │  week-forecast    ─► [w1]    │──► WeekForecastPanel
//!                        │  location-changed ─► [h3,w2] │──► both
//!                        └──────────────────────────────┘
//! ```
//!
//! ## Design Philosophy
//!
//! ### Closed, typed events
//!
//! The bus is generic over one event type implementing [`BusEvent`]. Each
//! variant carries its own payload shape, and the bus routes on
//! [`BusEvent::kind`]. A handler can only ever be registered for a kind that
//! exists and only ever receives the event type it was written for.
//!
//! ### Weak owners
//!
//! A subscription is the triple `(kind, owner, handler)`. The bus keeps a
//! [`Weak`] reference to the owner and compares owners by address only, so
//! registering never keeps a panel alive. Once the owner is dropped its
//! subscriptions stop firing and are pruned on the next registry mutation
//! or publish.
//!
//! ### Failure isolation
//!
//! Handlers return [`HandlerResult`]. An `Err` or a panic inside one handler
//! is logged and counted in the [`DispatchReport`]; the remaining handlers
//! still run.
//!
//! ## Concurrency
//!
//! Dispatch is synchronous: `publish` returns after every handler ran.
//! Registry mutation goes through one `Mutex`. Dispatch works on a snapshot
//! taken under the lock and calls handlers with the lock released, so a
//! handler may subscribe, unsubscribe or publish without deadlocking. An
//! entry unsubscribed mid-dispatch is not called afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use skypanel_core::bus::EventBus;
//! use skypanel_core::events::{DashboardEvent, EventKind, LocationChanged};
//! use skypanel_core::HandlerResult;
//!
//! struct Banner { resets: Mutex<u32> }
//!
//! fn on_location(banner: &Banner, _event: &DashboardEvent) -> HandlerResult {
//!     if let Ok(mut resets) = banner.resets.lock() {
//!         *resets += 1;
//!     }
//!     Ok(())
//! }
//!
//! let bus = EventBus::new();
//! let banner = Arc::new(Banner { resets: Mutex::new(0) });
//! bus.subscribe(EventKind::LocationChanged, &banner, on_location);
//!
//! let report = bus.publish(DashboardEvent::LocationChanged(LocationChanged { changed: true }));
//! assert_eq!(report.delivered, 1);
//! assert_eq!(*banner.resets.lock().unwrap(), 1);
//! ```

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use log::{debug, warn};

use crate::errors::HandlerResult;

/// Event type a bus can route
pub trait BusEvent: Send + Sync + 'static {
    /// Routing key, one per variant
    type Kind: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static;

    /// Routing key of this event
    fn kind(&self) -> Self::Kind;
}

/// Handler signature: the owner plus the published event
pub type Handler<O, E> = fn(&O, &E) -> HandlerResult;

/// Outcome of one `publish`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Handlers that returned `Ok`
    pub delivered: usize,
    /// Handlers that returned `Err` or panicked
    pub failed: usize,
}

impl DispatchReport {
    /// True when no handler failed
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

/// Type-erased (owner, handler) pair
trait Subscriber<E>: Send + Sync {
    /// `None` when the owner is gone
    fn deliver(&self, event: &E) -> Option<HandlerResult>;

    fn is_alive(&self) -> bool;
}

struct WeakSubscriber<O, E> {
    owner: Weak<O>,
    handler: Handler<O, E>,
}

impl<O, E> Subscriber<E> for WeakSubscriber<O, E>
where
    O: Send + Sync + 'static,
    E: 'static,
{
    fn deliver(&self, event: &E) -> Option<HandlerResult> {
        let owner = self.owner.upgrade()?;
        Some((self.handler)(&owner, event))
    }

    fn is_alive(&self) -> bool {
        self.owner.strong_count() > 0
    }
}

struct Entry<E> {
    owner_id: usize,
    handler_id: usize,
    active: Arc<AtomicBool>,
    subscriber: Arc<dyn Subscriber<E>>,
}

impl<E> Entry<E> {
    fn matches(&self, owner_id: usize, handler_id: usize) -> bool {
        self.owner_id == owner_id && self.handler_id == handler_id
    }

    fn retire(&self) {
        self.active.store(false, Ordering::Release);
    }
}

impl<E> Clone for Entry<E> {
    fn clone(&self) -> Self {
        Self {
            owner_id: self.owner_id,
            handler_id: self.handler_id,
            active: Arc::clone(&self.active),
            subscriber: Arc::clone(&self.subscriber),
        }
    }
}

fn owner_id<O>(owner: *const O) -> usize {
    owner as *const () as usize
}

fn handler_id<O, E>(handler: Handler<O, E>) -> usize {
    handler as usize
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.as_str()
    } else {
        "non-string panic payload"
    }
}

/// Process-local publish/subscribe registry
pub struct EventBus<E: BusEvent> {
    registry: Mutex<HashMap<E::Kind, Vec<Entry<E>>>>,
}

impl<E: BusEvent> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: BusEvent> fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.lock();
        let mut map = f.debug_map();
        for (kind, entries) in registry.iter() {
            map.entry(kind, &entries.len());
        }
        map.finish()
    }
}

impl<E: BusEvent> EventBus<E> {
    /// Create an empty bus
    pub fn new() -> Self {
        Self {
            registry: Mutex::new(HashMap::new()),
        }
    }

    /// Create an empty bus ready to be shared between panels
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<E::Kind, Vec<Entry<E>>>> {
        // A handler never runs under this lock, so a poisoned registry is still consistent
        self.registry.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `handler` on `owner` for events of `kind`.
    ///
    /// Returns `false` (and changes nothing) when the identical triple is
    /// already registered.
    pub fn subscribe<O>(&self, kind: E::Kind, owner: &Arc<O>, handler: Handler<O, E>) -> bool
    where
        O: Send + Sync + 'static,
    {
        self.subscribe_weak(kind, &Arc::downgrade(owner), handler)
    }

    /// Like [`subscribe`](Self::subscribe) for an owner only held weakly.
    ///
    /// An owner that is already gone counts as absent: nothing is registered.
    pub fn subscribe_weak<O>(&self, kind: E::Kind, owner: &Weak<O>, handler: Handler<O, E>) -> bool
    where
        O: Send + Sync + 'static,
    {
        if owner.strong_count() == 0 {
            debug!("Ignoring {:?} subscription for a dropped owner", kind);
            return false;
        }

        let owner_id = owner_id(owner.as_ptr());
        let handler_id = handler_id(handler);

        let mut registry = self.lock();
        let entries = registry.entry(kind).or_default();
        prune(entries);

        if entries.iter().any(|entry| entry.matches(owner_id, handler_id)) {
            debug!("Duplicate {:?} subscription ignored", kind);
            return false;
        }

        entries.push(Entry {
            owner_id,
            handler_id,
            active: Arc::new(AtomicBool::new(true)),
            subscriber: Arc::new(WeakSubscriber {
                owner: owner.clone(),
                handler,
            }),
        });
        debug!("Subscribed to {:?} ({} subscriber(s))", kind, entries.len());
        true
    }

    /// Remove the registration matching the triple.
    ///
    /// Returns `false` when no such registration exists.
    pub fn unsubscribe<O>(&self, kind: E::Kind, owner: &O, handler: Handler<O, E>) -> bool {
        let owner_id = owner_id(owner as *const O);
        let handler_id = handler_id(handler);

        let mut registry = self.lock();
        let Some(entries) = registry.get_mut(&kind) else {
            return false;
        };

        let Some(position) = entries
            .iter()
            .position(|entry| entry.matches(owner_id, handler_id))
        else {
            debug!("Unsubscribe from {:?} matched nothing", kind);
            return false;
        };

        let entry = entries.remove(position);
        entry.retire();
        prune(entries);
        if entries.is_empty() {
            registry.remove(&kind);
        }
        debug!("Unsubscribed from {:?}", kind);
        true
    }

    /// Remove every registration held by `owner`, for all kinds.
    ///
    /// Returns the number of registrations removed.
    pub fn unsubscribe_owner<O>(&self, owner: &O) -> usize {
        let owner_id = owner_id(owner as *const O);
        let mut removed = 0;

        let mut registry = self.lock();
        registry.retain(|_, entries| {
            entries.retain(|entry| {
                if entry.owner_id == owner_id {
                    entry.retire();
                    removed += 1;
                    false
                } else {
                    true
                }
            });
            prune(entries);
            !entries.is_empty()
        });
        removed
    }

    /// Deliver `event` to every live handler registered for its kind, in
    /// registration order. Returns once all handlers have run.
    pub fn publish(&self, event: E) -> DispatchReport {
        let kind = event.kind();
        let snapshot: Vec<Entry<E>> = {
            let mut registry = self.lock();
            match registry.get_mut(&kind) {
                Some(entries) => {
                    prune(entries);
                    entries.clone()
                }
                None => Vec::new(),
            }
        };

        let mut report = DispatchReport::default();
        for entry in &snapshot {
            if !entry.active.load(Ordering::Acquire) {
                continue;
            }

            let outcome = catch_unwind(AssertUnwindSafe(|| entry.subscriber.deliver(&event)));
            match outcome {
                Ok(Some(Ok(()))) => report.delivered += 1,
                Ok(Some(Err(err))) => {
                    warn!("{:?} handler failed: {}", kind, err);
                    report.failed += 1;
                }
                Ok(None) => debug!("{:?} handler skipped, owner dropped", kind),
                Err(payload) => {
                    warn!("{:?} handler panicked: {}", kind, panic_message(payload.as_ref()));
                    report.failed += 1;
                }
            }
        }

        debug!(
            "Published {:?}: {} delivered, {} failed",
            kind, report.delivered, report.failed
        );
        report
    }

    /// Number of live registrations for `kind`
    pub fn subscriber_count(&self, kind: E::Kind) -> usize {
        self.lock()
            .get(&kind)
            .map(|entries| entries.iter().filter(|entry| entry.subscriber.is_alive()).count())
            .unwrap_or(0)
    }

    /// Whether the triple is currently registered
    pub fn is_subscribed<O>(&self, kind: E::Kind, owner: &O, handler: Handler<O, E>) -> bool {
        let owner_id = owner_id(owner as *const O);
        let handler_id = handler_id(handler);
        self.lock().get(&kind).is_some_and(|entries| {
            entries
                .iter()
                .any(|entry| entry.matches(owner_id, handler_id) && entry.subscriber.is_alive())
        })
    }
}

fn prune<E>(entries: &mut Vec<Entry<E>>) {
    entries.retain(|entry| {
        let alive = entry.subscriber.is_alive();
        if !alive {
            entry.retire();
        }
        alive
    });
}
