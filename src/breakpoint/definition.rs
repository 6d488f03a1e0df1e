//! Breakpoint: a named viewport range with a media query.

use crate::media::query::{MediaQuery, MediaQueryError};
use crate::media::viewport::Viewport;

/// Errors from defining or registering breakpoints.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BreakpointError {
    #[error("breakpoint alias must not be empty")]
    EmptyAlias,
    #[error("invalid media query for breakpoint '{alias}': {source}")]
    InvalidQuery {
        alias: String,
        #[source]
        source: MediaQueryError,
    },
    #[error("duplicate breakpoint suffix '{suffix}' (aliases '{first}' and '{second}')")]
    DuplicateSuffix {
        suffix: String,
        first: String,
        second: String,
    },
}

/// A named viewport range.
///
/// `alias` is the user-facing name (`"gt-md"`); `suffix` is the derived
/// identifier used to key inputs (`"GtMd"`). Priority orders breakpoints
/// inside a registry: higher priority means more specific.
#[derive(Debug, Clone, PartialEq)]
pub struct Breakpoint {
    alias: String,
    suffix: String,
    media_query: MediaQuery,
    priority: i32,
}

impl Breakpoint {
    /// Create a breakpoint with priority 0.
    pub fn new(alias: impl Into<String>, media_query: MediaQuery) -> Self {
        let alias = alias.into();
        Self {
            suffix: suffix_for(&alias),
            alias,
            media_query,
            priority: 0,
        }
    }

    /// Create a breakpoint from media query text.
    pub fn parse(alias: impl Into<String>, media_query: &str) -> Result<Self, BreakpointError> {
        let alias = alias.into();
        match MediaQuery::parse(media_query) {
            Ok(query) => Ok(Self::new(alias, query)),
            Err(source) => Err(BreakpointError::InvalidQuery { alias, source }),
        }
    }

    /// Set the priority (builder).
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn media_query(&self) -> &MediaQuery {
        &self.media_query
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Whether this breakpoint's query matches `viewport`.
    pub fn matches(&self, viewport: &Viewport) -> bool {
        self.media_query.matches(viewport)
    }
}

/// Derive the input suffix for an alias: `gt-md` → `GtMd`,
/// `handset.portrait` → `HandsetPortrait`.
pub fn suffix_for(alias: &str) -> String {
    alias
        .split(['-', '.'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_derivation() {
        assert_eq!(suffix_for("xs"), "Xs");
        assert_eq!(suffix_for("gt-md"), "GtMd");
        assert_eq!(suffix_for("lt-xl"), "LtXl");
        assert_eq!(suffix_for("handset.portrait"), "HandsetPortrait");
        assert_eq!(suffix_for(""), "");
    }

    #[test]
    fn new_derives_suffix() {
        let bp = Breakpoint::new("gt-sm", MediaQuery::min_width(960.0));
        assert_eq!(bp.alias(), "gt-sm");
        assert_eq!(bp.suffix(), "GtSm");
        assert_eq!(bp.priority(), 0);
    }

    #[test]
    fn parse_valid_query() {
        let bp = Breakpoint::parse("sm", "(min-width: 600px) and (max-width: 959.98px)")
            .unwrap()
            .with_priority(900);
        assert_eq!(bp.priority(), 900);
        assert!(bp.matches(&Viewport::new(700.0, 500.0)));
        assert!(!bp.matches(&Viewport::new(1000.0, 500.0)));
    }

    #[test]
    fn parse_invalid_query_names_alias() {
        let err = Breakpoint::parse("broken", "(min-width 600px)").unwrap_err();
        assert!(matches!(err, BreakpointError::InvalidQuery { ref alias, .. } if alias == "broken"));
        assert!(err.to_string().contains("broken"));
    }
}
