//! Media: viewport model, media queries, and the live viewport monitor.

pub mod monitor;
pub mod query;
pub mod viewport;

pub use monitor::{MediaChange, MediaMonitor, Subscription, SubscriptionId};
pub use query::{MediaCondition, MediaFeature, MediaQuery, MediaQueryError, MediaType};
pub use viewport::{Orientation, TerminalMetrics, Viewport};
