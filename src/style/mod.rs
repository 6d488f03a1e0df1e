//! Style values: canonical maps, raw binding values, declaration parsing.

pub mod map;
pub mod parser;
pub mod tokenizer;
pub mod value;

pub use map::StyleMap;
pub use parser::{normalize, normalize_with, Sanitizer};
pub use value::StyleValue;
