//! Responsive style bindings: input cache, activation policy, resolver.
//!
//! - [`cache`]: normalized inputs keyed by base or breakpoint suffix.
//! - [`activation`]: the most-specific-cached-match policy.
//! - [`inputs`]: the named input surface.
//! - [`resolver`]: [`ResponsiveStyle`], wiring the above to a monitor and sink.

pub mod activation;
pub mod cache;
pub mod inputs;
pub mod resolver;

pub use activation::{resolve, ActivationState};
pub use cache::{InputKey, StyleCache};
pub use inputs::{input_key, BASE_INPUT, INPUTS};
pub use resolver::{InputError, Lifecycle, ResponsiveStyle, StyleSink};
