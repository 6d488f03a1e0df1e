//! Input surface: binding names mapped to cache keys.
//!
//! One base input plus nine breakpoint-qualified inputs. Everything funnels
//! into a single setter; see [`ResponsiveStyle::set_input`].
//!
//! [`ResponsiveStyle::set_input`]: crate::responsive::ResponsiveStyle::set_input

use crate::responsive::cache::InputKey;

/// Name of the unqualified input.
pub const BASE_INPUT: &str = "style";

/// `(input name, breakpoint suffix)`; `None` is the base input.
pub const INPUTS: &[(&str, Option<&str>)] = &[
    (BASE_INPUT, None),
    ("style.xs", Some("Xs")),
    ("style.gt-xs", Some("GtXs")),
    ("style.sm", Some("Sm")),
    ("style.gt-sm", Some("GtSm")),
    ("style.md", Some("Md")),
    ("style.gt-md", Some("GtMd")),
    ("style.lg", Some("Lg")),
    ("style.gt-lg", Some("GtLg")),
    ("style.xl", Some("Xl")),
];

/// Cache key for an input name.
pub fn input_key(name: &str) -> Option<InputKey> {
    INPUTS
        .iter()
        .find(|(input, _)| *input == name)
        .map(|(_, suffix)| InputKey::from(*suffix))
}

/// Every accepted input name, base first.
pub fn input_names() -> impl Iterator<Item = &'static str> {
    INPUTS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::{suffix_for, BreakpointRegistry};

    #[test]
    fn base_and_nine_breakpoints() {
        assert_eq!(INPUTS.len(), 10);
        assert_eq!(input_key("style"), Some(InputKey::Base));
        assert_eq!(input_key("style.gt-md"), Some(InputKey::breakpoint("GtMd")));
        assert_eq!(input_key("style.lt-md"), None);
        assert_eq!(input_names().next(), Some("style"));
    }

    #[test]
    fn suffixes_match_standard_breakpoints() {
        let registry = BreakpointRegistry::standard();
        for (name, suffix) in INPUTS.iter().skip(1) {
            let alias = name.trim_start_matches("style.");
            assert_eq!(Some(suffix_for(alias).as_str()), *suffix);
            assert!(registry.find_by_alias(alias).is_some(), "{name}");
        }
    }
}
