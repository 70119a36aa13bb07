#![forbid(unsafe_code)]

//! Picking a feedback color from the dragged item's own styling.
//!
//! The indicator and placeholder take on the color of the item being
//! dragged, so a blue card produces a blue insertion line. When the item's
//! styling offers nothing usable the configured default wins.

use crate::color::Color;

/// The slice of an item's computed style the engine reads.
///
/// `None` means the host reported nothing for that property.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComputedStyle {
    pub border_color: Option<Color>,
    pub background_color: Option<Color>,
    /// Text (foreground) color.
    pub color: Option<Color>,
}

impl ComputedStyle {
    /// An empty style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn border(mut self, color: Color) -> Self {
        self.border_color = Some(color);
        self
    }

    #[must_use]
    pub fn background(mut self, color: Color) -> Self {
        self.background_color = Some(color);
        self
    }

    #[must_use]
    pub fn text(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Candidates in priority order: border, background, text.
    fn candidates(&self) -> [Option<&Color>; 3] {
        [
            self.border_color.as_ref(),
            self.background_color.as_ref(),
            self.color.as_ref(),
        ]
    }
}

/// Pick the feedback color for an item.
///
/// The first of border, background and text color that is present, not
/// transparent and not opaque black is selected. If nothing qualifies, or the
/// selected color [is too light](Color::is_too_light), `fallback` is used.
/// A too-light pick does not fall through to the next candidate.
#[must_use]
pub fn derive_color(style: &ComputedStyle, fallback: &Color) -> Color {
    let picked = style
        .candidates()
        .into_iter()
        .flatten()
        .find(|c| !c.is_transparent() && !c.is_pure_black());

    match picked {
        Some(color) if !color.is_too_light() => color.clone(),
        _ => fallback.clone(),
    }
}

// ---------------------------------------------------------------------------
// FeedbackPalette
// ---------------------------------------------------------------------------

/// Alpha levels applied to the base color for each piece of feedback.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaletteAlphas {
    /// Placeholder fill. Default: 0.1.
    pub placeholder_fill: f32,
    /// Indicator gradient start. Default: 0.6.
    pub indicator_start: f32,
    /// Indicator gradient end. Default: 0.3.
    pub indicator_end: f32,
    /// Indicator glow. Default: 0.2.
    pub glow: f32,
    /// Indicator end caps. Default: 0.7.
    pub accent: f32,
}

impl Default for PaletteAlphas {
    fn default() -> Self {
        Self {
            placeholder_fill: 0.1,
            indicator_start: 0.6,
            indicator_end: 0.3,
            glow: 0.2,
            accent: 0.7,
        }
    }
}

/// Every color the presenter needs, derived from one base color.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackPalette {
    /// The derived color itself (placeholder border).
    pub base: Color,
    pub placeholder_fill: Color,
    pub indicator_start: Color,
    pub indicator_end: Color,
    pub glow: Color,
    pub accent: Color,
}

impl FeedbackPalette {
    /// Build the palette for `base`.
    #[must_use]
    pub fn new(base: Color, alphas: &PaletteAlphas) -> Self {
        Self {
            placeholder_fill: base.with_opacity(alphas.placeholder_fill),
            indicator_start: base.with_opacity(alphas.indicator_start),
            indicator_end: base.with_opacity(alphas.indicator_end),
            glow: base.with_opacity(alphas.glow),
            accent: base.with_opacity(alphas.accent),
            base,
        }
    }

    /// Derive the base from `style` and build the palette.
    #[must_use]
    pub fn for_style(style: &ComputedStyle, fallback: &Color, alphas: &PaletteAlphas) -> Self {
        Self::new(derive_color(style, fallback), alphas)
    }
}
