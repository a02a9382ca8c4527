//! Text layout measurement.
//!
//! The playback controller only needs one number from layout: how many rows the
//! script scrolls through. [`LayoutProvider`] is the seam that supplies it, so the
//! engine never depends on how text is actually set.

pub mod terminal;
pub mod wrap;

pub use terminal::{TerminalLayout, WrappedScript};

use crate::model::{ContentExtent, LayoutError, LayoutMetrics, Script};

/// Measures a script under given layout metrics.
///
/// Implementations must be deterministic: the same script and metrics always
/// yield the same extent.
pub trait LayoutProvider {
    /// Scrollable length of `script` laid out with `metrics`.
    fn measure_extent(
        &self,
        script: &Script,
        metrics: &LayoutMetrics,
    ) -> Result<ContentExtent, LayoutError>;
}

impl<T: LayoutProvider + ?Sized> LayoutProvider for &T {
    fn measure_extent(
        &self,
        script: &Script,
        metrics: &LayoutMetrics,
    ) -> Result<ContentExtent, LayoutError> {
        (**self).measure_extent(script, metrics)
    }
}

impl<T: LayoutProvider + ?Sized> LayoutProvider for Box<T> {
    fn measure_extent(
        &self,
        script: &Script,
        metrics: &LayoutMetrics,
    ) -> Result<ContentExtent, LayoutError> {
        (**self).measure_extent(script, metrics)
    }
}
