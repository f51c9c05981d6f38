//! Event Handling and Message Passing
//!
//! Typed publish/subscribe channels connecting the prompt, the history
//! display and whatever drives them. Every subscriber gets its own
//! unbounded queue; publishing never blocks and handlers run when their
//! owner drains the queue, so all work stays on the caller's thread.
//!
//! Raw key input is claimed through [`KeyBatons`]. Exactly one set exists
//! per [`EventHub`] and it cannot be cloned, so only one component can own
//! keyboard handling at a time.

use std::fmt;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

/// Signals exchanged over the shared hub
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// The prompt submitted a line (raw, before any processing)
    CommandSubmitted(String),
    /// A line reached its final submitted form and should be recorded
    CommandSubmittedPassive(String),
    /// Replay the last N history entries as one command
    RollupCommands(usize),
    /// Prune every finished command from the scrollback
    ClearOldCommands,
    /// Recompute scrolling and snap to the bottom when needed
    ScrollDown,
}

/// Decides which events a subscriber wants
pub type EventFilter<T> = fn(&T) -> bool;

struct Subscription<T> {
    tx: mpsc::UnboundedSender<T>,
    filter: Option<EventFilter<T>>,
}

impl<T> Subscription<T> {
    fn wants(&self, event: &T) -> bool {
        self.filter.map_or(true, |filter| filter(event))
    }
}

/// A typed fan-out channel
pub struct EventBus<T> {
    subscribers: Arc<Mutex<Vec<Subscription<T>>>>,
}

impl<T> Clone for EventBus<T> {
    fn clone(&self) -> Self {
        Self {
            subscribers: Arc::clone(&self.subscribers),
        }
    }
}

impl<T: Clone> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> EventBus<T> {
    /// Create a bus with no subscribers
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register a new subscriber; dropping it unsubscribes
    pub fn subscribe(&self) -> Subscriber<T> {
        self.register(None)
    }

    /// Register a subscriber that only queues events accepted by `filter`
    pub fn subscribe_where(&self, filter: EventFilter<T>) -> Subscriber<T> {
        self.register(Some(filter))
    }

    fn register(&self, filter: Option<EventFilter<T>>) -> Subscriber<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().push(Subscription { tx, filter });
        Subscriber { rx }
    }

    /// Deliver an event to every live subscriber that wants it, returning
    /// how many got it
    pub fn publish(&self, event: T) -> usize {
        let mut subscribers = self.lock();
        let mut delivered = 0;
        subscribers.retain(|sub| {
            if !sub.wants(&event) {
                return !sub.tx.is_closed();
            }
            let sent = sub.tx.send(event.clone()).is_ok();
            delivered += usize::from(sent);
            sent
        });
        delivered
    }

    /// Number of live subscribers
    pub fn subscriber_count(&self) -> usize {
        let mut subscribers = self.lock();
        subscribers.retain(|sub| !sub.tx.is_closed());
        subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Subscription<T>>> {
        // A panic mid-publish leaves the list intact, keep using it
        self.subscribers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Receiving end of an [`EventBus`] subscription
#[derive(Debug)]
pub struct Subscriber<T> {
    rx: mpsc::UnboundedReceiver<T>,
}

impl<T> Subscriber<T> {
    /// Take the next pending event, if any
    pub fn try_next(&mut self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Number of events waiting to be taken
    pub fn pending(&self) -> usize {
        self.rx.len()
    }

    /// Take every pending event in publish order
    pub fn drain(&mut self) -> Vec<T> {
        let mut events = Vec::new();
        while let Ok(event) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}

/// Category of raw input that can be claimed exclusively
pub trait InputCategory {
    const NAME: &'static str;
}

/// Key-down events
#[derive(Debug)]
pub struct KeyDown;

/// Key-up events
#[derive(Debug)]
pub struct KeyUp;

impl InputCategory for KeyDown {
    const NAME: &'static str = "keydown";
}

impl InputCategory for KeyUp {
    const NAME: &'static str = "keyup";
}

/// Exclusive claim on one input category. Not `Clone`.
#[derive(Debug)]
pub struct Baton<C: InputCategory> {
    _category: PhantomData<C>,
}

impl<C: InputCategory> Baton<C> {
    fn new() -> Self {
        Self {
            _category: PhantomData,
        }
    }

    /// Name of the claimed input category
    pub fn category(&self) -> &'static str {
        C::NAME
    }
}

/// The keyboard claims handed out once per hub.
///
/// The set carries the hub it was minted with, so whoever holds it talks
/// to that hub and no other.
pub struct KeyBatons {
    pub key_down: Baton<KeyDown>,
    pub key_up: Baton<KeyUp>,
    hub: EventHub,
}

impl KeyBatons {
    /// The hub these batons belong to
    pub fn hub(&self) -> &EventHub {
        &self.hub
    }
}

impl fmt::Debug for KeyBatons {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyBatons")
            .field("key_down", &self.key_down)
            .field("key_up", &self.key_up)
            .field("hub", &self.hub.id())
            .finish()
    }
}

static NEXT_HUB_ID: AtomicU64 = AtomicU64::new(1);

/// Shared signal hub. Clones share subscribers and identity.
#[derive(Clone)]
pub struct EventHub {
    id: u64,
    signals: EventBus<Signal>,
}

impl EventHub {
    /// Create a hub together with its only set of key batons
    pub fn new() -> (Self, KeyBatons) {
        let hub = Self {
            id: NEXT_HUB_ID.fetch_add(1, Ordering::Relaxed),
            signals: EventBus::new(),
        };
        debug!("Creating event hub {}", hub.id);
        let batons = KeyBatons {
            key_down: Baton::new(),
            key_up: Baton::new(),
            hub: hub.clone(),
        };
        (hub, batons)
    }

    /// Identity shared by every clone of this hub
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Subscribe to all signals
    pub fn subscribe(&self) -> Subscriber<Signal> {
        self.signals.subscribe()
    }

    /// Subscribe to the signals `filter` accepts
    pub fn subscribe_where(&self, filter: EventFilter<Signal>) -> Subscriber<Signal> {
        self.signals.subscribe_where(filter)
    }

    /// Publish a signal to every subscriber
    pub fn publish(&self, signal: Signal) -> usize {
        trace!("Publishing {:?}", signal);
        self.signals.publish(signal)
    }

    /// Ask the history display to recompute scrolling
    pub fn scroll_down(&self) {
        self.publish(Signal::ScrollDown);
    }

    /// Ask the prompt to replay the last `count` commands
    pub fn rollup_commands(&self, count: usize) {
        self.publish(Signal::RollupCommands(count));
    }

    /// Ask the history display to prune finished commands
    pub fn clear_old_commands(&self) {
        self.publish(Signal::ClearOldCommands);
    }

    /// Announce a finished submission so it gets recorded in history
    pub fn command_submitted_passive(&self, value: impl Into<String>) {
        self.publish(Signal::CommandSubmittedPassive(value.into()));
    }
}
