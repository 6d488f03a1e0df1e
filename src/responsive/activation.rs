//! Activation: which cached input applies for the current media snapshot.

use crate::breakpoint::BreakpointRegistry;
use crate::media::monitor::MediaChange;
use crate::responsive::cache::{InputKey, StyleCache};
use crate::style::value::StyleValue;

/// Pick the input that applies under `change`.
///
/// Single pass over the registry from most to least specific: the first
/// breakpoint that is both matching and cached wins. With no such breakpoint
/// the base applies. Matching suffixes unknown to the registry are ignored.
pub fn resolve(registry: &BreakpointRegistry, change: &MediaChange, cache: &StyleCache) -> InputKey {
    registry
        .iter()
        .rev()
        .find(|bp| change.is_active(bp.suffix()) && cache.has_breakpoint(bp.suffix()))
        .map_or(InputKey::Base, |bp| InputKey::breakpoint(bp.suffix()))
}

/// Per-binding activation record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivationState {
    /// `None` until the first resolution.
    active: Option<InputKey>,
    last_emitted: Option<StyleValue>,
}

impl ActivationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The active key, `None` before anything was resolved.
    pub fn active(&self) -> Option<&InputKey> {
        self.active.as_ref()
    }

    /// The value most recently handed to the sink.
    pub fn last_emitted(&self) -> Option<&StyleValue> {
        self.last_emitted.as_ref()
    }

    /// Record a resolution. Returns `true` when `key` differs from the active
    /// key, i.e. when the value must be emitted. Value changes under the same
    /// key are not transitions.
    pub fn transition(&mut self, key: InputKey, value: StyleValue) -> bool {
        if self.active.as_ref() == Some(&key) {
            return false;
        }
        self.active = Some(key);
        self.last_emitted = Some(value);
        true
    }

    /// Record an unconditional emission of `value` under `key`.
    pub fn force(&mut self, key: InputKey, value: StyleValue) {
        self.active = Some(key);
        self.last_emitted = Some(value);
    }
}
