//! MediaMonitor: tracks which breakpoints match the viewport and notifies
//! subscribers when that changes.
//!
//! Listeners live in a slotmap arena keyed by [`SubscriptionId`]. Delivery
//! takes each listener out of its slot before calling it, so no borrow of the
//! monitor is held across user code: a listener may read the monitor, push a
//! new viewport, or drop its own subscription while it runs.
//!
//! Deliveries go through a queue. A change raised while another is being
//! delivered is queued and delivered once the current one has reached every
//! listener, so all listeners see all changes in the same order.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use slotmap::{new_key_type, SlotMap};
use tokio::sync::mpsc;

use crate::breakpoint::BreakpointRegistry;
use crate::media::viewport::Viewport;

new_key_type! {
    /// Identifies a listener registered with a [`MediaMonitor`].
    pub struct SubscriptionId;
}

// ---------------------------------------------------------------------------
// MediaChange
// ---------------------------------------------------------------------------

/// Snapshot of the matching breakpoints after a viewport transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaChange {
    /// Suffix of the most specific matching breakpoint; `None` when nothing matches.
    pub suffix: Option<String>,
    /// Suffixes of every matching breakpoint, least specific first.
    pub active: Vec<String>,
}

impl MediaChange {
    /// A change in which no breakpoint matches.
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a change from matching suffixes ordered least specific first.
    /// The last one becomes [`suffix`](Self::suffix).
    pub fn from_active<I, S>(active: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let active: Vec<String> = active.into_iter().map(Into::into).collect();
        Self {
            suffix: active.last().cloned(),
            active,
        }
    }

    /// Whether the breakpoint with `suffix` matches in this snapshot.
    pub fn is_active(&self, suffix: &str) -> bool {
        self.active.iter().any(|s| s == suffix)
    }

    /// Whether nothing matches.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

// ---------------------------------------------------------------------------
// MediaMonitor
// ---------------------------------------------------------------------------

type Listener = Box<dyn FnMut(&MediaChange)>;

/// A queued delivery.
enum Delivery {
    /// To every listener registered when the delivery starts.
    Broadcast(MediaChange),
    /// Initial snapshot for one new listener.
    Snapshot(SubscriptionId, MediaChange),
}

struct MonitorState {
    registry: Rc<BreakpointRegistry>,
    viewport: Option<Viewport>,
    current: MediaChange,
    /// `None` while the listener is out of its slot being called.
    listeners: SlotMap<SubscriptionId, Option<Listener>>,
    pending: VecDeque<Delivery>,
    /// Set while the outermost dispatch drains `pending`.
    delivering: bool,
}

/// Live viewport monitor over a [`BreakpointRegistry`].
///
/// Cheap to clone: clones share the same state. Single-threaded by design;
/// events are delivered synchronously in subscription order.
#[derive(Clone)]
pub struct MediaMonitor {
    state: Rc<RefCell<MonitorState>>,
}

impl MediaMonitor {
    /// Create a monitor with no viewport yet (nothing matches).
    pub fn new(registry: Rc<BreakpointRegistry>) -> Self {
        Self {
            state: Rc::new(RefCell::new(MonitorState {
                registry,
                viewport: None,
                current: MediaChange::none(),
                listeners: SlotMap::with_key(),
                pending: VecDeque::new(),
                delivering: false,
            })),
        }
    }

    /// The registry breakpoints are evaluated from.
    pub fn registry(&self) -> Rc<BreakpointRegistry> {
        Rc::clone(&self.state.borrow().registry)
    }

    /// The last viewport applied, if any.
    pub fn viewport(&self) -> Option<Viewport> {
        self.state.borrow().viewport
    }

    /// The current matching snapshot.
    pub fn current(&self) -> MediaChange {
        self.state.borrow().current.clone()
    }

    /// Whether the breakpoint with `suffix` currently matches.
    pub fn is_active(&self, suffix: &str) -> bool {
        self.state.borrow().current.is_active(suffix)
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    /// Evaluate every breakpoint against `viewport`.
    ///
    /// Subscribers are notified only when the matching set changes. Returns
    /// whether a notification went out.
    pub fn set_viewport(&self, viewport: Viewport) -> bool {
        let change = {
            let mut state = self.state.borrow_mut();
            state.viewport = Some(viewport);
            let change = MediaChange::from_active(
                state
                    .registry
                    .iter()
                    .filter(|bp| bp.matches(&viewport))
                    .map(|bp| bp.suffix().to_string()),
            );
            if change == state.current {
                return false;
            }
            change
        };
        log::debug!(
            "viewport {}x{}: active breakpoints {:?}",
            viewport.width,
            viewport.height,
            change.active
        );
        self.broadcast(change);
        true
    }

    /// Push a change computed elsewhere, bypassing viewport evaluation.
    ///
    /// For hosts that evaluate media themselves. Always notifies, even when
    /// `change` equals the current snapshot.
    pub fn notify(&self, change: MediaChange) {
        self.broadcast(change);
    }

    /// Register a listener.
    ///
    /// The listener is called immediately with the current snapshot, then on
    /// every transition until the returned [`Subscription`] is dropped or
    /// unsubscribed. When subscribing from inside a listener, the snapshot
    /// is queued behind the delivery in progress.
    pub fn subscribe(&self, listener: impl FnMut(&MediaChange) + 'static) -> Subscription {
        let (id, current) = {
            let mut state = self.state.borrow_mut();
            let id = state.listeners.insert(Some(Box::new(listener)));
            (id, state.current.clone())
        };
        log::debug!("media subscription {id:?} added");
        self.dispatch(Delivery::Snapshot(id, current));
        Subscription {
            id,
            monitor: Rc::downgrade(&self.state),
        }
    }

    /// Apply every viewport received on `viewports` until the sender closes.
    pub async fn watch(&self, mut viewports: mpsc::UnboundedReceiver<Viewport>) {
        while let Some(viewport) = viewports.recv().await {
            self.set_viewport(viewport);
        }
        log::debug!("viewport feed closed");
    }

    fn broadcast(&self, change: MediaChange) {
        self.state.borrow_mut().current = change.clone();
        self.dispatch(Delivery::Broadcast(change));
    }

    /// Queue `delivery`; unless a dispatch is already running further up the
    /// stack, drain the queue.
    fn dispatch(&self, delivery: Delivery) {
        {
            let mut state = self.state.borrow_mut();
            state.pending.push_back(delivery);
            if state.delivering {
                log::trace!("media change queued behind delivery in progress");
                return;
            }
            state.delivering = true;
        }

        loop {
            let next = {
                let mut state = self.state.borrow_mut();
                match state.pending.pop_front() {
                    Some(delivery) => delivery,
                    None => {
                        state.delivering = false;
                        return;
                    }
                }
            };
            match next {
                Delivery::Broadcast(change) => {
                    let ids: Vec<SubscriptionId> = self.state.borrow().listeners.keys().collect();
                    for id in ids {
                        self.deliver(id, &change);
                    }
                }
                Delivery::Snapshot(id, change) => self.deliver(id, &change),
            }
        }
    }

    /// Call one listener with no borrow held.
    fn deliver(&self, id: SubscriptionId, change: &MediaChange) {
        let listener = self
            .state
            .borrow_mut()
            .listeners
            .get_mut(id)
            .and_then(Option::take);
        let Some(mut listener) = listener else {
            return;
        };

        listener(change);

        // Put it back unless the subscription went away during the call.
        if let Some(slot) = self.state.borrow_mut().listeners.get_mut(id) {
            *slot = Some(listener);
        }
    }
}

impl fmt::Debug for MediaMonitor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("MediaMonitor")
            .field("viewport", &state.viewport)
            .field("current", &state.current)
            .field("subscribers", &state.listeners.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Subscription
// ---------------------------------------------------------------------------

/// Handle to a listener registered with [`MediaMonitor::subscribe`].
///
/// Unsubscribes on drop. [`unsubscribe`](Self::unsubscribe) may be called any
/// number of times.
#[derive(Debug)]
pub struct Subscription {
    id: SubscriptionId,
    monitor: Weak<RefCell<MonitorState>>,
}

impl Subscription {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        match self.monitor.upgrade() {
            Some(state) => {
                let registered = state.borrow().listeners.contains_key(self.id);
                registered
            }
            None => false,
        }
    }

    /// Remove the listener. No-op if already removed or the monitor is gone.
    pub fn unsubscribe(&mut self) {
        let Some(state) = self.monitor.upgrade() else {
            return;
        };
        // Listeners run with no borrow held, so this never conflicts. The
        // removed listener is dropped after the borrow ends: it may own
        // subscriptions of its own.
        let removed = {
            let mut inner = state.borrow_mut();
            inner.listeners.remove(self.id)
        };
        self.monitor = Weak::new();
        if removed.is_some() {
            log::debug!("media subscription {:?} removed", self.id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
