//! Breakpoints: definitions, built-in sets, and the ordered registry.

pub mod config;
pub mod defaults;
pub mod definition;
pub mod registry;

pub use config::BreakpointConfig;
pub use defaults::{default_breakpoints, orientation_breakpoints};
pub use definition::{suffix_for, Breakpoint, BreakpointError};
pub use registry::BreakpointRegistry;
