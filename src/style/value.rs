//! StyleValue: the raw shapes a style binding accepts.

use std::collections::BTreeSet;
use std::fmt;

use super::map::StyleMap;

/// A style value as supplied to a binding, or as stored after normalization.
///
/// Text is the only shape that normalization decomposes; after
/// [`normalize`](super::parser::normalize) a `Text` value always becomes a
/// `Map`. Token lists and sets pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    /// A delimited declaration list: `"color: red; font-size: 12px"`.
    Text(String),
    /// An ordered list of class-like tokens.
    List(Vec<String>),
    /// A set of class-like tokens.
    Set(BTreeSet<String>),
    /// An already-canonical property map.
    Map(StyleMap),
}

impl StyleValue {
    /// The empty map.
    pub fn empty() -> Self {
        StyleValue::Map(StyleMap::new())
    }

    /// Borrow the map if this value is one.
    pub fn as_map(&self) -> Option<&StyleMap> {
        match self {
            StyleValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Consume into the map if this value is one.
    pub fn into_map(self) -> Option<StyleMap> {
        match self {
            StyleValue::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Short name of the shape, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            StyleValue::Text(_) => "text",
            StyleValue::List(_) => "list",
            StyleValue::Set(_) => "set",
            StyleValue::Map(_) => "map",
        }
    }
}

impl Default for StyleValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for StyleValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StyleValue::Text(text) => f.write_str(text),
            StyleValue::List(tokens) => f.write_str(&tokens.join(" ")),
            StyleValue::Set(tokens) => {
                let joined: Vec<&str> = tokens.iter().map(String::as_str).collect();
                f.write_str(&joined.join(" "))
            }
            StyleValue::Map(map) => write!(f, "{map}"),
        }
    }
}

impl From<&str> for StyleValue {
    fn from(text: &str) -> Self {
        StyleValue::Text(text.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(text: String) -> Self {
        StyleValue::Text(text)
    }
}

impl From<Vec<String>> for StyleValue {
    fn from(tokens: Vec<String>) -> Self {
        StyleValue::List(tokens)
    }
}

impl From<Vec<&str>> for StyleValue {
    fn from(tokens: Vec<&str>) -> Self {
        StyleValue::List(tokens.into_iter().map(str::to_string).collect())
    }
}

impl From<BTreeSet<String>> for StyleValue {
    fn from(tokens: BTreeSet<String>) -> Self {
        StyleValue::Set(tokens)
    }
}

impl From<StyleMap> for StyleValue {
    fn from(map: StyleMap) -> Self {
        StyleValue::Map(map)
    }
}
