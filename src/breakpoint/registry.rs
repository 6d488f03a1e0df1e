//! BreakpointRegistry: the ordered set of known breakpoints.

use std::collections::HashMap;

use crate::breakpoint::config::BreakpointConfig;
use crate::breakpoint::defaults::{default_breakpoints, orientation_breakpoints};
use crate::breakpoint::definition::{Breakpoint, BreakpointError};

/// Breakpoints in specificity order: ascending priority, ties kept in
/// registration order. A later entry is more specific than an earlier one.
///
/// Immutable once built; share it behind an `Rc`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakpointRegistry {
    items: Vec<Breakpoint>,
}

impl BreakpointRegistry {
    /// Build a registry, rejecting empty aliases and duplicate suffixes.
    pub fn new(breakpoints: impl IntoIterator<Item = Breakpoint>) -> Result<Self, BreakpointError> {
        let mut items: Vec<Breakpoint> = breakpoints.into_iter().collect();

        {
            let mut seen: HashMap<&str, &str> = HashMap::new();
            for bp in &items {
                if bp.alias().is_empty() {
                    return Err(BreakpointError::EmptyAlias);
                }
                if let Some(first) = seen.insert(bp.suffix(), bp.alias()) {
                    return Err(BreakpointError::DuplicateSuffix {
                        suffix: bp.suffix().to_string(),
                        first: first.to_string(),
                        second: bp.alias().to_string(),
                    });
                }
            }
        }

        // Stable: equal priorities keep registration order.
        items.sort_by_key(Breakpoint::priority);
        Ok(Self { items })
    }

    /// The standard responsive set (see [`default_breakpoints`]).
    pub fn standard() -> Self {
        let mut items = default_breakpoints();
        items.sort_by_key(Breakpoint::priority);
        Self { items }
    }

    /// Build from configuration.
    ///
    /// Starts from the defaults (unless disabled), adds the orientation set
    /// if requested, then applies custom breakpoints: a custom breakpoint
    /// with an existing alias replaces that entry, others are appended.
    pub fn from_config(config: &BreakpointConfig) -> Result<Self, BreakpointError> {
        let mut items = Vec::new();
        if !config.disable_defaults {
            items.extend(default_breakpoints());
        }
        if config.add_orientation {
            items.extend(orientation_breakpoints());
        }
        for custom in &config.custom {
            match items.iter_mut().find(|bp| bp.alias() == custom.alias()) {
                Some(existing) => *existing = custom.clone(),
                None => items.push(custom.clone()),
            }
        }
        Self::new(items)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate least specific first.
    pub fn iter(&self) -> std::slice::Iter<'_, Breakpoint> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Breakpoint> {
        self.items.get(index)
    }

    pub fn find_by_alias(&self, alias: &str) -> Option<&Breakpoint> {
        self.items.iter().find(|bp| bp.alias() == alias)
    }

    pub fn find_by_suffix(&self, suffix: &str) -> Option<&Breakpoint> {
        self.items.iter().find(|bp| bp.suffix() == suffix)
    }

    /// Specificity rank of a suffix (its index).
    pub fn index_of(&self, suffix: &str) -> Option<usize> {
        self.items.iter().position(|bp| bp.suffix() == suffix)
    }
}

impl<'a> IntoIterator for &'a BreakpointRegistry {
    type Item = &'a Breakpoint;
    type IntoIter = std::slice::Iter<'a, Breakpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::query::MediaQuery;

    fn suffixes(registry: &BreakpointRegistry) -> Vec<&str> {
        registry.iter().map(Breakpoint::suffix).collect()
    }

    #[test]
    fn orders_by_priority_then_registration() {
        let registry = BreakpointRegistry::new([
            Breakpoint::new("b", MediaQuery::min_width(1.0)).with_priority(5),
            Breakpoint::new("a", MediaQuery::min_width(1.0)).with_priority(-1),
            Breakpoint::new("c", MediaQuery::min_width(1.0)).with_priority(5),
        ])
        .unwrap();
        assert_eq!(suffixes(&registry), vec!["A", "B", "C"]);
        assert_eq!(registry.index_of("C"), Some(2));
    }

    #[test]
    fn rejects_duplicate_suffix() {
        let err = BreakpointRegistry::new([
            Breakpoint::new("gt-md", MediaQuery::min_width(1.0)),
            Breakpoint::new("gt.md", MediaQuery::min_width(2.0)),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            BreakpointError::DuplicateSuffix {
                suffix: "GtMd".into(),
                first: "gt-md".into(),
                second: "gt.md".into(),
            }
        );
    }

    #[test]
    fn rejects_empty_alias() {
        let err = BreakpointRegistry::new([Breakpoint::new("", MediaQuery::min_width(1.0))]).unwrap_err();
        assert_eq!(err, BreakpointError::EmptyAlias);
    }

    #[test]
    fn standard_is_specificity_ordered() {
        let registry = BreakpointRegistry::standard();
        assert_eq!(registry.len(), 13);
        assert_eq!(
            suffixes(&registry),
            vec![
                "GtXs", "GtSm", "GtMd", "GtLg", "Xl", "LtXl", "Lg", "LtLg", "Md", "LtMd", "Sm",
                "LtSm", "Xs"
            ]
        );
    }

    #[test]
    fn from_default_config_equals_standard() {
        let registry = BreakpointRegistry::from_config(&BreakpointConfig::default()).unwrap();
        assert_eq!(registry, BreakpointRegistry::standard());
    }

    #[test]
    fn config_custom_replaces_and_appends() {
        let config = BreakpointConfig::new()
            .with_breakpoint(Breakpoint::new("xs", MediaQuery::max_width(479.98)).with_priority(1000))
            .with_breakpoint(Breakpoint::new("tiny", MediaQuery::max_width(320.0)).with_priority(3000));
        let registry = BreakpointRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 14);
        assert_eq!(
            registry.find_by_alias("xs").map(|bp| bp.media_query().clone()),
            Some(MediaQuery::max_width(479.98))
        );
        assert_eq!(registry.iter().last().map(Breakpoint::suffix), Some("Tiny"));
    }

    #[test]
    fn config_without_defaults_with_orientation() {
        let config = BreakpointConfig::new().without_defaults().with_orientation();
        let registry = BreakpointRegistry::from_config(&config).unwrap();
        assert_eq!(registry.len(), 9);
        assert!(registry.find_by_suffix("HandsetPortrait").is_some());
        assert!(registry.find_by_suffix("Xs").is_none());
    }

    #[test]
    fn empty_registry() {
        let registry = BreakpointRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.get(0).is_none());
    }
}
