//! # responsive-style
//!
//! Breakpoint-aware inline style bindings.
//!
//! An element's inline style is given as one base value plus optional
//! per-breakpoint values (`xs`, `gt-md`, ...). Each value is normalized into a
//! canonical property map merged over the base, and whenever the viewport
//! crosses a breakpoint the most specific matching value is handed to a sink.
//!
//! ## Core Systems
//!
//! - **[`style`]** — Style maps, raw values, declaration tokenizer and parser
//! - **[`media`]** — Viewports, media queries, the live viewport monitor
//! - **[`breakpoint`]** — Breakpoint definitions, built-in sets, ordered registry
//! - **[`responsive`]** — Input cache, activation policy, [`ResponsiveStyle`]
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use responsive_style::breakpoint::BreakpointRegistry;
//! use responsive_style::media::{MediaMonitor, Viewport};
//! use responsive_style::responsive::ResponsiveStyle;
//! use responsive_style::style::StyleValue;
//!
//! let registry = Rc::new(BreakpointRegistry::standard());
//! let monitor = MediaMonitor::new(Rc::clone(&registry));
//!
//! let mut style = ResponsiveStyle::new(registry, |value: &StyleValue| {
//!     println!("style=\"{value}\"");
//! });
//! style.set_input("style", "color: black; padding: 8px").unwrap();
//! style.set_input("style.xs", "padding: 2px").unwrap();
//! style.listen(&monitor);
//!
//! monitor.set_viewport(Viewport::new(375.0, 812.0));
//! assert_eq!(style.active_style().to_string(), "color: black; padding: 2px");
//! ```
//!
//! [`ResponsiveStyle`]: responsive::ResponsiveStyle

pub mod breakpoint;
pub mod media;
pub mod responsive;
pub mod style;
