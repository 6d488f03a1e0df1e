//! StyleMap: insertion-ordered property → value map.

use std::fmt;

/// A canonical inline style: property names mapped to values.
///
/// Entries keep the order in which each property was first inserted.
/// Re-inserting an existing property overwrites its value in place, so layering
/// one map over another never moves the properties that were already there.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleMap {
    entries: Vec<(String, String)>,
}

impl StyleMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Number of properties.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no properties.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a property value.
    pub fn get(&self, property: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == property)
            .map(|(_, value)| value.as_str())
    }

    /// Whether the property is set.
    pub fn contains(&self, property: &str) -> bool {
        self.entries.iter().any(|(key, _)| key == property)
    }

    /// Set a property, returning the previous value if there was one.
    pub fn insert(&mut self, property: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let property = property.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == property) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((property, value));
                None
            }
        }
    }

    /// Remove a property, returning its value.
    pub fn remove(&mut self, property: &str) -> Option<String> {
        let index = self.entries.iter().position(|(key, _)| key == property)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate `(property, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Iterate property names in order.
    pub fn properties(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    /// Overwrite this map with every entry of `overrides`.
    pub fn extend_from(&mut self, overrides: &StyleMap) {
        for (key, value) in &overrides.entries {
            self.insert(key.clone(), value.clone());
        }
    }

    /// A copy of this map with `overrides` layered on top.
    ///
    /// Properties only present here are kept; properties present in both
    /// take the value from `overrides`.
    pub fn merged(&self, overrides: &StyleMap) -> StyleMap {
        let mut merged = self.clone();
        merged.extend_from(overrides);
        merged
    }
}

impl fmt::Display for StyleMap {
    /// Renders as an inline style attribute: `color: red; font-size: 12px`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{key}: {value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = StyleMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for StyleMap {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = (&'a str, &'a str);
    type IntoIter = Box<dyn Iterator<Item = (&'a str, &'a str)> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_map_is_empty() {
        let map = StyleMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
        assert_eq!(map.get("color"), None);
    }

    #[test]
    fn insert_and_get() {
        let mut map = StyleMap::new();
        assert_eq!(map.insert("color", "red"), None);
        assert_eq!(map.get("color"), Some("red"));
        assert!(map.contains("color"));
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut map: StyleMap = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(map.insert("a", "9"), Some("1".to_string()));
        let keys: Vec<&str> = map.properties().collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(map.get("a"), Some("9"));
    }

    #[test]
    fn remove_property() {
        let mut map: StyleMap = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(map.remove("a"), Some("1".to_string()));
        assert_eq!(map.remove("a"), None);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn merged_preserves_base_and_overrides() {
        let base: StyleMap = [("a", "1"), ("b", "1")].into_iter().collect();
        let overrides: StyleMap = [("b", "2"), ("c", "3")].into_iter().collect();
        let merged = base.merged(&overrides);
        let expected: StyleMap = [("a", "1"), ("b", "2"), ("c", "3")].into_iter().collect();
        assert_eq!(merged, expected);
        // The base itself is untouched.
        assert_eq!(base.get("b"), Some("1"));
    }

    #[test]
    fn display_renders_inline_style() {
        let map: StyleMap = [("color", "red"), ("font-size", "12px")].into_iter().collect();
        insta::assert_snapshot!(map.to_string(), @"color: red; font-size: 12px");
    }

    #[test]
    fn display_empty() {
        assert_eq!(StyleMap::new().to_string(), "");
    }

    #[test]
    fn iterate_by_reference() {
        let map: StyleMap = [("a", "1"), ("b", "2")].into_iter().collect();
        let pairs: Vec<(&str, &str)> = (&map).into_iter().collect();
        assert_eq!(pairs, vec![("a", "1"), ("b", "2")]);
    }
}
