//! BreakpointConfig: which breakpoints a registry is built from.

use crate::breakpoint::definition::Breakpoint;

/// Configuration for [`BreakpointRegistry::from_config`](super::BreakpointRegistry::from_config).
#[derive(Debug, Clone, Default)]
pub struct BreakpointConfig {
    /// Skip the standard `xs`..`xl` / `lt-*` / `gt-*` set.
    pub disable_defaults: bool,
    /// Add the `handset` / `tablet` / `web` orientation set.
    pub add_orientation: bool,
    /// Extra breakpoints. One whose alias matches a built-in replaces it.
    pub custom: Vec<Breakpoint>,
}

impl BreakpointConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop the standard set (builder).
    pub fn without_defaults(mut self) -> Self {
        self.disable_defaults = true;
        self
    }

    /// Include the orientation set (builder).
    pub fn with_orientation(mut self) -> Self {
        self.add_orientation = true;
        self
    }

    /// Add or replace a breakpoint (builder).
    pub fn with_breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.custom.push(breakpoint);
        self
    }
}
