//! StyleCache: normalized style inputs keyed by base or breakpoint suffix.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use crate::style::map::StyleMap;
use crate::style::parser::{normalize_with, Sanitizer};
use crate::style::value::StyleValue;

/// Key of a cached input: the unqualified base value or one breakpoint suffix.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InputKey {
    Base,
    Breakpoint(String),
}

impl InputKey {
    /// Key for the breakpoint with `suffix`.
    pub fn breakpoint(suffix: impl Into<String>) -> Self {
        InputKey::Breakpoint(suffix.into())
    }

    pub fn is_base(&self) -> bool {
        matches!(self, InputKey::Base)
    }

    /// The breakpoint suffix, `None` for the base.
    pub fn suffix(&self) -> Option<&str> {
        match self {
            InputKey::Base => None,
            InputKey::Breakpoint(suffix) => Some(suffix),
        }
    }
}

impl From<&str> for InputKey {
    /// `""` and `"base"` name the base; anything else is a suffix.
    fn from(key: &str) -> Self {
        match key {
            "" | "base" => InputKey::Base,
            suffix => InputKey::Breakpoint(suffix.to_string()),
        }
    }
}

impl From<Option<&str>> for InputKey {
    fn from(suffix: Option<&str>) -> Self {
        suffix.map_or(InputKey::Base, InputKey::from)
    }
}

impl fmt::Display for InputKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputKey::Base => f.write_str("base"),
            InputKey::Breakpoint(suffix) => f.write_str(suffix),
        }
    }
}

/// Normalized inputs of one binding.
///
/// Every insert is normalized against the base map as it is at that moment.
/// Caching the base replaces the base used by later inserts; breakpoint
/// values cached earlier keep the base they were merged with.
#[derive(Default, Clone)]
pub struct StyleCache {
    base: Option<StyleValue>,
    breakpoints: HashMap<String, StyleValue>,
    sanitizer: Option<Rc<Sanitizer>>,
}

impl StyleCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `sanitizer` to every value parsed from text (builder).
    pub fn with_sanitizer(mut self, sanitizer: impl Fn(&str) -> String + 'static) -> Self {
        self.sanitizer = Some(Rc::new(sanitizer));
        self
    }

    /// Normalize `raw` over the current base and store it under `key`.
    /// Returns the stored value.
    pub fn insert(&mut self, key: InputKey, raw: StyleValue) -> &StyleValue {
        let normalized = normalize_with(
            raw,
            self.base.as_ref().and_then(StyleValue::as_map),
            self.sanitizer.as_deref(),
        );
        match key {
            InputKey::Base => self.base.insert(normalized),
            InputKey::Breakpoint(suffix) => {
                let slot = self.breakpoints.entry(suffix).or_default();
                *slot = normalized;
                slot
            }
        }
    }

    /// The stored value for `key`, if one was cached.
    pub fn get(&self, key: &InputKey) -> Option<&StyleValue> {
        match key {
            InputKey::Base => self.base.as_ref(),
            InputKey::Breakpoint(suffix) => self.breakpoints.get(suffix),
        }
    }

    /// Whether a value was cached for the breakpoint `suffix`.
    pub fn has_breakpoint(&self, suffix: &str) -> bool {
        self.breakpoints.contains_key(suffix)
    }

    /// The base value, falling back to the empty map.
    pub fn base(&self) -> StyleValue {
        self.base.clone().unwrap_or_default()
    }

    /// The base as a map for merging; empty unless the base is a map.
    pub fn base_map(&self) -> StyleMap {
        self.base
            .as_ref()
            .and_then(StyleValue::as_map)
            .cloned()
            .unwrap_or_default()
    }

    /// The value to apply for `key`: the cached value, or the base fallback.
    pub fn resolve(&self, key: &InputKey) -> StyleValue {
        match key {
            InputKey::Base => self.base(),
            InputKey::Breakpoint(suffix) => match self.breakpoints.get(suffix) {
                Some(value) => value.clone(),
                None => self.base(),
            },
        }
    }

    /// Whether nothing has been cached.
    pub fn is_empty(&self) -> bool {
        self.base.is_none() && self.breakpoints.is_empty()
    }

    /// Drop every cached value. The sanitizer is kept.
    pub fn clear(&mut self) {
        self.base = None;
        self.breakpoints.clear();
    }
}

impl fmt::Debug for StyleCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyleCache")
            .field("base", &self.base)
            .field("breakpoints", &self.breakpoints)
            .field("sanitizer", &self.sanitizer.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn map(pairs: &[(&str, &str)]) -> StyleValue {
        StyleValue::Map(pairs.iter().copied().collect())
    }

    #[test]
    fn input_key_from_str() {
        assert_eq!(InputKey::from("base"), InputKey::Base);
        assert_eq!(InputKey::from(""), InputKey::Base);
        assert_eq!(InputKey::from("GtMd"), InputKey::breakpoint("GtMd"));
        assert_eq!(InputKey::from(None::<&str>), InputKey::Base);
        assert_eq!(InputKey::from(Some("Xs")).suffix(), Some("Xs"));
        assert_eq!(InputKey::Base.to_string(), "base");
    }

    #[test]
    fn base_falls_back_to_empty_map() {
        let cache = StyleCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.base(), StyleValue::empty());
        assert_eq!(cache.get(&InputKey::Base), None);
    }

    #[test]
    fn breakpoint_merges_onto_base() {
        let mut cache = StyleCache::new();
        cache.insert(InputKey::Base, "color: red; margin: 0".into());
        cache.insert(InputKey::breakpoint("Xs"), "color: blue".into());
        assert_eq!(
            cache.get(&InputKey::breakpoint("Xs")),
            Some(&map(&[("color", "blue"), ("margin", "0")]))
        );
    }

    #[test]
    fn base_merges_onto_previous_base() {
        let mut cache = StyleCache::new();
        cache.insert(InputKey::Base, "a: 1; b: 1".into());
        cache.insert(InputKey::Base, "b: 2".into());
        assert_eq!(cache.base(), map(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn first_write_merge_is_not_retroactive() {
        let mut cache = StyleCache::new();
        cache.insert(InputKey::breakpoint("Xs"), "color: blue".into());
        cache.insert(InputKey::Base, "margin: 0".into());
        assert_eq!(
            cache.get(&InputKey::breakpoint("Xs")),
            Some(&map(&[("color", "blue")]))
        );
    }

    #[test]
    fn later_input_replaces_earlier_for_same_key() {
        let mut cache = StyleCache::new();
        cache.insert(InputKey::breakpoint("Sm"), "color: blue".into());
        cache.insert(InputKey::breakpoint("Sm"), "width: 10px".into());
        assert_eq!(
            cache.get(&InputKey::breakpoint("Sm")),
            Some(&map(&[("width", "10px")]))
        );
    }

    #[test]
    fn list_base_merges_as_empty() {
        let mut cache = StyleCache::new();
        cache.insert(InputKey::Base, vec!["a", "b"].into());
        assert_eq!(cache.base_map(), StyleMap::new());
        cache.insert(InputKey::breakpoint("Xs"), "color: red".into());
        assert_eq!(cache.resolve(&InputKey::breakpoint("Xs")), map(&[("color", "red")]));
        assert_eq!(cache.resolve(&InputKey::Base), StyleValue::from(vec!["a", "b"]));
    }

    #[test]
    fn resolve_missing_breakpoint_uses_base() {
        let mut cache = StyleCache::new();
        cache.insert(InputKey::Base, "a: 1".into());
        assert!(!cache.has_breakpoint("Lg"));
        assert_eq!(cache.resolve(&InputKey::breakpoint("Lg")), map(&[("a", "1")]));
    }

    #[test]
    fn sanitizer_applies_to_every_insert() {
        let mut cache = StyleCache::new().with_sanitizer(|v| v.replace("javascript:", ""));
        let stored = cache.insert(InputKey::Base, "background: javascript:alert(1)".into());
        assert_eq!(stored, &map(&[("background", "alert(1)")]));
    }

    #[test]
    fn clear_empties() {
        let mut cache = StyleCache::new();
        cache.insert(InputKey::Base, "a: 1".into());
        cache.clear();
        assert!(cache.is_empty());
    }
}
