//! ResponsiveStyle: a style binding that follows the active breakpoint.
//!
//! ```text
//!   set_input / cache_input ──► StyleCache ─┐
//!                                           ├─► resolve ─► ActivationState ─► StyleSink
//!   MediaMonitor ──► MediaChange ───────────┘
//! ```
//!
//! Caching never emits. Media transitions emit when the resolved key changes;
//! [`ResponsiveStyle::apply_input_changes`] is the separate pass a host runs
//! after its own input updates, re-applying the active key from the latest
//! cache contents.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::breakpoint::BreakpointRegistry;
use crate::media::monitor::{MediaChange, MediaMonitor, Subscription};
use crate::responsive::activation::{self, ActivationState};
use crate::responsive::cache::{InputKey, StyleCache};
use crate::responsive::inputs;
use crate::style::value::StyleValue;

/// Receives the effective style whenever it changes.
pub trait StyleSink {
    fn apply(&mut self, style: &StyleValue);
}

impl<F: FnMut(&StyleValue)> StyleSink for F {
    fn apply(&mut self, style: &StyleValue) {
        self(style)
    }
}

/// Lifecycle of a [`ResponsiveStyle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Created, not yet subscribed to a monitor.
    Uninitialized,
    /// Subscribed; media transitions drive activation.
    Listening,
    /// Torn down. Terminal.
    Disposed,
}

/// Errors from addressing inputs by name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown style input: {0}")]
    UnknownInput(String),
}

struct Inner {
    registry: Rc<BreakpointRegistry>,
    cache: StyleCache,
    activation: ActivationState,
    media: MediaChange,
    /// `None` while the sink is out being called, and after teardown.
    sink: Option<Box<dyn StyleSink>>,
    lifecycle: Lifecycle,
}

impl Inner {
    fn active_key(&self) -> InputKey {
        activation::resolve(&self.registry, &self.media, &self.cache)
    }

    fn is_known_key(&self, key: &InputKey) -> bool {
        key.suffix()
            .map_or(true, |suffix| self.registry.find_by_suffix(suffix).is_some())
    }
}

/// A responsive style binding.
///
/// Holds the normalized inputs for the base and each breakpoint, tracks the
/// latest media snapshot, and hands the effective style to its [`StyleSink`].
/// Single-threaded; all methods take effect synchronously.
pub struct ResponsiveStyle {
    inner: Rc<RefCell<Inner>>,
    subscription: Option<Subscription>,
}

impl ResponsiveStyle {
    /// Create an unsubscribed binding.
    pub fn new(registry: Rc<BreakpointRegistry>, sink: impl StyleSink + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner {
                registry,
                cache: StyleCache::new(),
                activation: ActivationState::new(),
                media: MediaChange::none(),
                sink: Some(Box::new(sink)),
                lifecycle: Lifecycle::Uninitialized,
            })),
            subscription: None,
        }
    }

    /// Sanitize every value parsed from text (builder). Call before caching.
    pub fn with_sanitizer(self, sanitizer: impl Fn(&str) -> String + 'static) -> Self {
        {
            let mut inner = self.inner.borrow_mut();
            let cache = std::mem::take(&mut inner.cache);
            inner.cache = cache.with_sanitizer(sanitizer);
        }
        self
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.inner.borrow().lifecycle
    }

    /// Subscribe to `monitor`. The monitor's initial snapshot is processed
    /// immediately, which emits the first effective style.
    ///
    /// Only the first call on an uninitialized binding has any effect.
    pub fn listen(&mut self, monitor: &MediaMonitor) {
        {
            let mut inner = self.inner.borrow_mut();
            match inner.lifecycle {
                Lifecycle::Uninitialized => inner.lifecycle = Lifecycle::Listening,
                Lifecycle::Listening => {
                    log::warn!("responsive style is already listening");
                    return;
                }
                Lifecycle::Disposed => {
                    log::warn!("listen called after teardown");
                    return;
                }
            }
        }

        let weak: Weak<RefCell<Inner>> = Rc::downgrade(&self.inner);
        self.subscription = Some(monitor.subscribe(move |change| {
            if let Some(inner) = weak.upgrade() {
                on_media_change(&inner, change);
            }
        }));
    }

    /// Normalize `value` over the current base and cache it under `key`.
    ///
    /// Breakpoint keys are registry suffixes (`"GtMd"`), not aliases
    /// (`"gt-md"`); a key with no breakpoint in the registry is cached but
    /// can never activate. Use [`set_input`](Self::set_input) to address
    /// inputs by alias. Does not emit, even when `key` is the active one.
    pub fn cache_input(&self, key: impl Into<InputKey>, value: impl Into<StyleValue>) {
        let key = key.into();
        let mut inner = self.inner.borrow_mut();
        if inner.lifecycle == Lifecycle::Disposed {
            log::warn!("cache_input({key}) after teardown ignored");
            return;
        }
        if !inner.is_known_key(&key) {
            log::warn!("no breakpoint with suffix '{key}' is registered; input will never activate");
        }
        let stored = inner.cache.insert(key.clone(), value.into());
        log::trace!("cached {key} as {} `{stored}`", stored.kind());
    }

    /// Cache a value by input name (`"style"`, `"style.gt-md"`, ...).
    pub fn set_input(&self, name: &str, value: impl Into<StyleValue>) -> Result<(), InputError> {
        let Some(key) = inputs::input_key(name) else {
            log::warn!("unknown style input {name:?}");
            return Err(InputError::UnknownInput(name.to_string()));
        };
        self.cache_input(key, value);
        Ok(())
    }

    /// Whether `key` is the base or the suffix of a registered breakpoint.
    pub fn is_known_key(&self, key: &InputKey) -> bool {
        self.inner.borrow().is_known_key(key)
    }

    /// The key that applies under the latest media snapshot and cache.
    pub fn active_key(&self) -> InputKey {
        self.inner.borrow().active_key()
    }

    /// The style that applies under the latest media snapshot and cache.
    pub fn active_style(&self) -> StyleValue {
        let inner = self.inner.borrow();
        let key = inner.active_key();
        inner.cache.resolve(&key)
    }

    /// Snapshot of the activation record.
    pub fn activation(&self) -> ActivationState {
        self.inner.borrow().activation.clone()
    }

    /// The value most recently handed to the sink.
    pub fn last_emitted(&self) -> Option<StyleValue> {
        self.inner.borrow().activation.last_emitted().cloned()
    }

    /// Process a media transition: re-resolve and emit if the active key
    /// changed. Ignored unless listening.
    pub fn handle_media_change(&self, change: &MediaChange) {
        on_media_change(&self.inner, change);
    }

    /// Input-change pass: re-resolve from the latest cache and push the
    /// result to the sink unconditionally. No-op after teardown.
    pub fn apply_input_changes(&self) {
        let value = {
            let mut inner = self.inner.borrow_mut();
            if inner.lifecycle == Lifecycle::Disposed {
                return;
            }
            let key = inner.active_key();
            let value = inner.cache.resolve(&key);
            log::debug!("input change pass: applying {key}");
            inner.activation.force(key, value.clone());
            value
        };
        emit(&self.inner, &value);
    }

    /// Release the monitor subscription and the sink. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.unsubscribe();
        }
        let mut inner = self.inner.borrow_mut();
        if inner.lifecycle != Lifecycle::Disposed {
            log::debug!("responsive style disposed");
            inner.lifecycle = Lifecycle::Disposed;
            inner.sink = None;
        }
    }
}

impl Drop for ResponsiveStyle {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl fmt::Debug for ResponsiveStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("ResponsiveStyle")
            .field("lifecycle", &inner.lifecycle)
            .field("media", &inner.media)
            .field("activation", &inner.activation)
            .field("cache", &inner.cache)
            .finish()
    }
}

fn on_media_change(cell: &RefCell<Inner>, change: &MediaChange) {
    let value = {
        let mut inner = cell.borrow_mut();
        if inner.lifecycle != Lifecycle::Listening {
            log::trace!("media change ignored in {:?}", inner.lifecycle);
            return;
        }
        inner.media = change.clone();
        let key = inner.active_key();
        let value = inner.cache.resolve(&key);
        let previous = inner.activation.active().cloned();
        if !inner.activation.transition(key.clone(), value.clone()) {
            return;
        }
        match previous {
            Some(previous) => log::debug!("activation {previous} -> {key}"),
            None => log::debug!("activation -> {key}"),
        }
        value
    };
    emit(cell, &value);
}

/// Hand `value` to the sink with no borrow held.
fn emit(cell: &RefCell<Inner>, value: &StyleValue) {
    let sink = cell.borrow_mut().sink.take();
    let Some(mut sink) = sink else {
        return;
    };

    sink.apply(value);

    let mut inner = cell.borrow_mut();
    if inner.lifecycle != Lifecycle::Disposed {
        inner.sink = Some(sink);
    }
}
