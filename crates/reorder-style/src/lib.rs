#![forbid(unsafe_code)]

//! Style: color model, lightness heuristics, and feedback color derivation.

pub mod color;
pub mod derive;

pub use color::{Color, ColorParseError, NEUTRAL_GRAY, Rgb};
pub use derive::{ComputedStyle, FeedbackPalette, PaletteAlphas, derive_color};
