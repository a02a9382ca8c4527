//! Layout metrics and measured content extent.

use serde::Serialize;

/// Smallest font size the prompter accepts.
pub const MIN_FONT_SIZE: u16 = 8;
/// Largest font size the prompter accepts.
pub const MAX_FONT_SIZE: u16 = 200;
/// Default font size.
pub const DEFAULT_FONT_SIZE: u16 = 50;

/// Smallest line spacing multiplier.
pub const MIN_LINE_SPACING: f64 = 1.0;
/// Largest line spacing multiplier.
pub const MAX_LINE_SPACING: f64 = 3.0;
/// Default line spacing multiplier.
pub const DEFAULT_LINE_SPACING: f64 = 1.2;

/// Largest horizontal margin, in cells.
pub const MAX_MARGIN: u16 = 300;

/// Terminal viewport size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Viewport {
    /// Width in terminal columns.
    pub columns: u16,
    /// Height in terminal rows.
    pub rows: u16,
}

impl Viewport {
    /// Create new viewport dimensions.
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// True if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }
}

/// Page margins in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Margins {
    /// Left and right margin in columns.
    pub horizontal: u16,
    /// Top and bottom margin in rows.
    pub vertical: u16,
}

impl Default for Margins {
    fn default() -> Self {
        Self {
            horizontal: 4,
            vertical: 1,
        }
    }
}

/// Immutable snapshot of everything that influences layout.
///
/// Never mutated in place: every `with_*` method returns a new value, and the
/// controller replaces its snapshot wholesale on `LayoutChanged`. Setters clamp to
/// the supported ranges.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutMetrics {
    font_family: String,
    font_size: u16,
    line_spacing: f64,
    margins: Margins,
    mirrored: bool,
    viewport: Viewport,
}

impl LayoutMetrics {
    /// Create metrics for a viewport with default typography.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            font_family: "Helvetica".to_string(),
            font_size: DEFAULT_FONT_SIZE,
            line_spacing: DEFAULT_LINE_SPACING,
            margins: Margins::default(),
            mirrored: false,
            viewport,
        }
    }

    /// Font family name.
    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    /// Font size in points.
    pub fn font_size(&self) -> u16 {
        self.font_size
    }

    /// Line spacing multiplier.
    pub fn line_spacing(&self) -> f64 {
        self.line_spacing
    }

    /// Page margins.
    pub fn margins(&self) -> Margins {
        self.margins
    }

    /// Whether output is horizontally mirrored.
    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    /// Viewport size.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Return a copy with a different font family.
    pub fn with_font_family(&self, family: impl Into<String>) -> Self {
        Self {
            font_family: family.into(),
            ..self.clone()
        }
    }

    /// Return a copy with the font size clamped to `[MIN_FONT_SIZE, MAX_FONT_SIZE]`.
    ///
    /// ```
    /// use tprompt::model::{LayoutMetrics, Viewport};
    ///
    /// let metrics = LayoutMetrics::new(Viewport::new(80, 24)).with_font_size(1_000);
    /// assert_eq!(metrics.font_size(), 200);
    /// ```
    pub fn with_font_size(&self, size: u16) -> Self {
        Self {
            font_size: size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            ..self.clone()
        }
    }

    /// Return a copy with the line spacing clamped to `[MIN_LINE_SPACING, MAX_LINE_SPACING]`.
    ///
    /// Non-finite values fall back to the minimum.
    pub fn with_line_spacing(&self, spacing: f64) -> Self {
        let spacing = if spacing.is_finite() {
            spacing.clamp(MIN_LINE_SPACING, MAX_LINE_SPACING)
        } else {
            MIN_LINE_SPACING
        };
        Self {
            line_spacing: spacing,
            ..self.clone()
        }
    }

    /// Return a copy with new margins; the horizontal margin is capped at `MAX_MARGIN`.
    pub fn with_margins(&self, margins: Margins) -> Self {
        Self {
            margins: Margins {
                horizontal: margins.horizontal.min(MAX_MARGIN),
                vertical: margins.vertical,
            },
            ..self.clone()
        }
    }

    /// Return a copy with the mirrored flag set.
    pub fn with_mirrored(&self, mirrored: bool) -> Self {
        Self {
            mirrored,
            ..self.clone()
        }
    }

    /// Return a copy for a different viewport size.
    pub fn with_viewport(&self, viewport: Viewport) -> Self {
        Self {
            viewport,
            ..self.clone()
        }
    }

    /// True when the two snapshots lay out differently.
    ///
    /// The mirrored flag only affects painting, so it is ignored here.
    pub fn affects_layout(&self, other: &Self) -> bool {
        self.font_size != other.font_size
            || self.line_spacing != other.line_spacing
            || self.margins != other.margins
            || self.viewport != other.viewport
            || self.font_family != other.font_family
    }
}

impl Default for LayoutMetrics {
    fn default() -> Self {
        Self::new(Viewport::new(80, 24))
    }
}

/// Total scrollable length beyond the visible viewport, in rows.
///
/// Always finite and `>= 0`. Zero means the content fits and nothing scrolls.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct ContentExtent(f64);

impl ContentExtent {
    /// Nothing to scroll.
    pub const ZERO: Self = Self(0.0);

    /// Create an extent, mapping negative or non-finite input to zero.
    pub fn new(total: f64) -> Self {
        if total.is_finite() && total > 0.0 {
            Self(total)
        } else {
            Self::ZERO
        }
    }

    /// Total scrollable length.
    pub fn total(&self) -> f64 {
        self.0
    }

    /// True when there is nothing to scroll.
    pub fn is_empty(&self) -> bool {
        self.0 == 0.0
    }
}
