//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod key_action;
pub mod metrics;
pub mod script;
pub mod theme;

// Re-export for convenience
pub use error::{AppError, CommandError, InputError, LayoutError};
pub use key_action::KeyAction;
pub use metrics::{ContentExtent, LayoutMetrics, Margins, Viewport};
pub use script::Script;
pub use theme::Theme;
