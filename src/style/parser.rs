//! Inline style normalization.
//!
//! [`normalize`] turns any [`StyleValue`] into its canonical form and layers it
//! over a base map. Parsing is permissive: free-form style strings never fail,
//! malformed declarations are dropped and the rest is kept.

use crate::style::map::StyleMap;
use crate::style::tokenizer;
use crate::style::value::StyleValue;

/// Rewrites a declaration value before it is stored.
///
/// Returning an empty string drops the declaration.
pub type Sanitizer = dyn Fn(&str) -> String;

/// Normalize `input` and merge it over `base`.
///
/// - `Text` is parsed into a map (see [`parse_declarations`]).
/// - `Map` is taken as-is.
/// - `List` and `Set` are returned unchanged and never merged.
///
/// Map results start from a copy of `base` and every parsed property
/// overwrites the base value of the same name.
pub fn normalize(input: StyleValue, base: Option<&StyleMap>) -> StyleValue {
    normalize_with(input, base, None)
}

/// [`normalize`] with an optional value sanitizer applied to parsed text.
pub fn normalize_with(
    input: StyleValue,
    base: Option<&StyleMap>,
    sanitizer: Option<&Sanitizer>,
) -> StyleValue {
    let parsed = match input {
        StyleValue::Text(text) => parse_declarations(&text, sanitizer),
        StyleValue::Map(map) => map,
        passthrough @ (StyleValue::List(_) | StyleValue::Set(_)) => return passthrough,
    };

    match base {
        Some(base) => StyleValue::Map(base.merged(&parsed)),
        None => StyleValue::Map(parsed),
    }
}

/// Parse a declaration list such as `"color: red; font-size: 12px"`.
///
/// `,` separates declarations like `;` does. Each fragment is split on its
/// first `:`; fragments with no colon or an empty value are dropped. Quotes
/// (`'`) are removed from property names. A later duplicate wins.
pub fn parse_declarations(text: &str, sanitizer: Option<&Sanitizer>) -> StyleMap {
    let mut map = StyleMap::new();
    for fragment in tokenizer::fragments(text) {
        match split_declaration(fragment, sanitizer) {
            Some((property, value)) => {
                map.insert(property, value);
            }
            None => log::trace!("dropping style fragment {fragment:?}"),
        }
    }
    map
}

fn split_declaration(fragment: &str, sanitizer: Option<&Sanitizer>) -> Option<(String, String)> {
    let (property, value) = fragment.split_once(':')?;
    let property = property.replace('\'', "").trim().to_string();
    let value = match sanitizer {
        Some(sanitize) => sanitize(value.trim()).trim().to_string(),
        None => value.trim().to_string(),
    };
    if value.is_empty() {
        return None;
    }
    Some((property, value))
}
