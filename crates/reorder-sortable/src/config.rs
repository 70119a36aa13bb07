#![forbid(unsafe_code)]

//! Configuration for a sortable instance and its feedback visuals.

use reorder_style::{Color, PaletteAlphas};

use crate::resolver::IndicatorOffsets;

/// Default indicator color when the dragged item offers nothing usable.
pub const DEFAULT_INDICATOR_COLOR: Color = Color::hex(0x21, 0x96, 0xf3);

/// Default ghost background.
pub const DEFAULT_GHOST_BACKGROUND: Color = Color::hex(0xf0, 0xf0, 0xf0);

/// Default handle glyph.
pub const DEFAULT_HANDLE_SYMBOL: &str = "✥";

// ---------------------------------------------------------------------------
// FeedbackConfig
// ---------------------------------------------------------------------------

/// Visual tuning for the ghost, placeholder and indicator.
///
/// None of these values influence which slot a drop resolves to.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FeedbackConfig {
    /// Indicator placement offsets.
    pub offsets: IndicatorOffsets,
    /// Indicator thickness. Default: 3.
    pub indicator_thickness: f64,
    /// Placeholder opacity (0.0 = invisible, 1.0 = opaque). Default: 0.5.
    pub placeholder_opacity: f32,
    /// Placeholder scale relative to the dragged item. Default: 0.95.
    pub placeholder_scale: f32,
    /// Placeholder dashed border width. Default: 2.
    pub placeholder_border_width: f64,
    /// Placeholder corner radius. Default: 4.
    pub placeholder_radius: f64,
    /// Alpha levels applied to the derived color.
    pub alphas: PaletteAlphas,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            offsets: IndicatorOffsets::default(),
            indicator_thickness: 3.0,
            placeholder_opacity: 0.5,
            placeholder_scale: 0.95,
            placeholder_border_width: 2.0,
            placeholder_radius: 4.0,
            alphas: PaletteAlphas::default(),
        }
    }
}

impl FeedbackConfig {
    /// Set indicator offsets.
    #[must_use]
    pub fn with_offsets(mut self, offsets: IndicatorOffsets) -> Self {
        self.offsets = offsets;
        self
    }

    /// Set indicator thickness.
    #[must_use]
    pub fn with_indicator_thickness(mut self, thickness: f64) -> Self {
        self.indicator_thickness = thickness.max(0.0);
        self
    }

    /// Set placeholder opacity (clamped to 0.0..=1.0).
    #[must_use]
    pub fn with_placeholder_opacity(mut self, opacity: f32) -> Self {
        self.placeholder_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    /// Set palette alphas.
    #[must_use]
    pub fn with_alphas(mut self, alphas: PaletteAlphas) -> Self {
        self.alphas = alphas;
        self
    }
}

// ---------------------------------------------------------------------------
// SortableConfig
// ---------------------------------------------------------------------------

/// Options recognized by a sortable instance.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SortableConfig {
    /// Only start drags from an item's handle (default: false).
    pub use_handle: bool,
    /// Glyph shown on handles (default: `✥`).
    pub handle_symbol: String,
    /// Fallback feedback color (default: `#2196f3`).
    pub default_indicator_color: Color,
    /// Ghost background (default: `#f0f0f0`).
    pub ghost_background_color: Color,
    /// Feedback visuals.
    pub feedback: FeedbackConfig,
}

impl Default for SortableConfig {
    fn default() -> Self {
        Self {
            use_handle: false,
            handle_symbol: DEFAULT_HANDLE_SYMBOL.to_string(),
            default_indicator_color: DEFAULT_INDICATOR_COLOR,
            ghost_background_color: DEFAULT_GHOST_BACKGROUND,
            feedback: FeedbackConfig::default(),
        }
    }
}

impl SortableConfig {
    /// Restrict drag start to handles.
    #[must_use]
    pub fn with_handle(mut self) -> Self {
        self.use_handle = true;
        self
    }

    /// Set the handle glyph.
    #[must_use]
    pub fn with_handle_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.handle_symbol = symbol.into();
        self
    }

    /// Set the fallback indicator color.
    #[must_use]
    pub fn with_indicator_color(mut self, color: Color) -> Self {
        self.default_indicator_color = color;
        self
    }

    /// Set the ghost background.
    #[must_use]
    pub fn with_ghost_background(mut self, color: Color) -> Self {
        self.ghost_background_color = color;
        self
    }

    /// Set feedback visuals.
    #[must_use]
    pub fn with_feedback(mut self, feedback: FeedbackConfig) -> Self {
        self.feedback = feedback;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = SortableConfig::default();
        assert!(!cfg.use_handle);
        assert_eq!(cfg.handle_symbol, "✥");
        assert_eq!(cfg.default_indicator_color.to_string(), "#2196f3");
        assert_eq!(cfg.ghost_background_color.to_string(), "#f0f0f0");
        assert_eq!(cfg.feedback.offsets.above, 15.0);
        assert_eq!(cfg.feedback.offsets.empty_inset, 20.0);
        assert_eq!(cfg.feedback.placeholder_opacity, 0.5);
    }

    #[test]
    fn builder() {
        let cfg = SortableConfig::default()
            .with_handle()
            .with_handle_symbol("≡")
            .with_indicator_color(Color::rgb(200, 0, 0))
            .with_feedback(FeedbackConfig::default().with_placeholder_opacity(3.0));
        assert!(cfg.use_handle);
        assert_eq!(cfg.handle_symbol, "≡");
        assert_eq!(cfg.default_indicator_color, Color::rgb(200, 0, 0));
        assert_eq!(cfg.feedback.placeholder_opacity, 1.0);
    }
}
