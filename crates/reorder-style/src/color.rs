#![forbid(unsafe_code)]

//! Color values as hosts report them: hex, `rgb()`, `rgba()`, or something
//! the engine cannot interpret.
//!
//! The model keeps the representational family of a color so that opacity
//! adjustments stay in a form the host understands (`#rrggbb` and `rgb()`
//! become `rgba()`, `rgba()` keeps its shape with a new alpha).

use std::fmt;
use std::str::FromStr;

/// Luminance above which a color is considered too light for feedback.
pub const TOO_LIGHT_LUMINANCE: f64 = 0.80;

/// Alpha below which an `rgba()` color is considered too faint for feedback.
pub const TOO_FAINT_ALPHA: f32 = 0.30;

/// Channel values used when a color cannot be interpreted.
pub const NEUTRAL_GRAY: Rgb = Rgb::new(102, 102, 102);

/// RGB triplet (opaque).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0–255).
    pub r: u8,
    /// Green channel (0–255).
    pub g: u8,
    /// Blue channel (0–255).
    pub b: u8,
}

impl Rgb {
    /// Create a new RGB triplet.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived luminance (BT.601 weights) in `0.0..=1.0`.
    #[must_use]
    pub fn luminance(self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    /// Composite this color at `alpha` over an opaque `backdrop`.
    ///
    /// Hosts without real transparency (terminals) use this to render the
    /// translucent placeholder and indicator colors.
    #[must_use]
    pub fn over(self, backdrop: Rgb, alpha: f32) -> Rgb {
        let a = alpha.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| -> u8 {
            (fg as f32 * a + bg as f32 * (1.0 - a)).round().clamp(0.0, 255.0) as u8
        };
        Rgb::new(
            mix(self.r, backdrop.r),
            mix(self.g, backdrop.g),
            mix(self.b, backdrop.b),
        )
    }
}

/// A color in one of the representational families the engine understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// `#rrggbb` (or the `#rgb` shorthand).
    Hex(Rgb),
    /// `rgb(r, g, b)`.
    Rgb(Rgb),
    /// `rgba(r, g, b, a)` with `a` in `0.0..=1.0`.
    Rgba(Rgb, f32),
    /// The `transparent` keyword.
    Transparent,
    /// Anything else, kept verbatim (named colors, `hsl()`, garbage).
    Other(String),
}

impl Color {
    /// Hex color from channels.
    #[must_use]
    pub const fn hex(r: u8, g: u8, b: u8) -> Self {
        Self::Hex(Rgb::new(r, g, b))
    }

    /// `rgb()` color from channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb(Rgb::new(r, g, b))
    }

    /// `rgba()` color from channels and alpha (clamped to `0.0..=1.0`).
    #[must_use]
    pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Self {
        Self::Rgba(Rgb::new(r, g, b), clamp_alpha(alpha))
    }

    /// Parse leniently: anything [`FromStr`] rejects becomes [`Color::Other`].
    #[must_use]
    pub fn parse_lossy(input: &str) -> Self {
        input
            .parse()
            .unwrap_or_else(|_| Self::Other(input.trim().to_string()))
    }

    /// Channels, if the color is in a recognized family.
    #[must_use]
    pub fn channels(&self) -> Option<Rgb> {
        match self {
            Self::Hex(rgb) | Self::Rgb(rgb) | Self::Rgba(rgb, _) => Some(*rgb),
            Self::Transparent | Self::Other(_) => None,
        }
    }

    /// Alpha, if known. Hex and `rgb()` colors are opaque.
    #[must_use]
    pub fn alpha(&self) -> Option<f32> {
        match self {
            Self::Hex(_) | Self::Rgb(_) => Some(1.0),
            Self::Rgba(_, a) => Some(*a),
            Self::Transparent => Some(0.0),
            Self::Other(_) => None,
        }
    }

    /// `transparent`, or any color with zero alpha.
    #[must_use]
    pub fn is_transparent(&self) -> bool {
        self.alpha() == Some(0.0)
    }

    /// Opaque `(0, 0, 0)`: what hosts report for unset colors.
    #[must_use]
    pub fn is_pure_black(&self) -> bool {
        self.channels() == Some(Rgb::new(0, 0, 0)) && self.alpha().is_some_and(|a| a >= 1.0)
    }

    /// Perceived luminance, if the color is in a recognized family.
    #[must_use]
    pub fn luminance(&self) -> Option<f64> {
        self.channels().map(Rgb::luminance)
    }

    /// Whether the color would be hard to see as drag feedback.
    ///
    /// True when luminance exceeds [`TOO_LIGHT_LUMINANCE`], or when an
    /// `rgba()` color has alpha below [`TOO_FAINT_ALPHA`] whatever its
    /// luminance. Colors outside the hex/`rgb()`/`rgba()` families are
    /// never too light.
    #[must_use]
    pub fn is_too_light(&self) -> bool {
        match self {
            Self::Rgba(_, a) if *a < TOO_FAINT_ALPHA => true,
            Self::Hex(rgb) | Self::Rgb(rgb) | Self::Rgba(rgb, _) => {
                rgb.luminance() > TOO_LIGHT_LUMINANCE
            }
            Self::Transparent | Self::Other(_) => false,
        }
    }

    /// The same color at `alpha`, as `rgba()`.
    ///
    /// The alpha replaces any existing one, so repeated calls never compound.
    /// Colors outside the recognized families become [`NEUTRAL_GRAY`] at
    /// `alpha`.
    #[must_use]
    pub fn with_opacity(&self, alpha: f32) -> Color {
        let rgb = self.channels().unwrap_or(NEUTRAL_GRAY);
        Color::Rgba(rgb, clamp_alpha(alpha))
    }
}

fn clamp_alpha(alpha: f32) -> f32 {
    if alpha.is_nan() {
        return 1.0;
    }
    alpha.clamp(0.0, 1.0)
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hex(c) => write!(f, "#{:02x}{:02x}{:02x}", c.r, c.g, c.b),
            Self::Rgb(c) => write!(f, "rgb({}, {}, {})", c.r, c.g, c.b),
            Self::Rgba(c, a) => write!(f, "rgba({}, {}, {}, {a})", c.r, c.g, c.b),
            Self::Transparent => f.write_str("transparent"),
            Self::Other(raw) => f.write_str(raw),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Why a color string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// Input was empty or whitespace.
    Empty,
    /// `#` followed by something other than 3 or 6 hex digits.
    BadHex(String),
    /// `rgb(`/`rgba(` with the wrong number of components or bad syntax.
    BadFunction(String),
    /// A channel was not an integer in `0..=255`.
    ChannelOutOfRange(String),
    /// Alpha was not a number in `0.0..=1.0`.
    AlphaOutOfRange(String),
    /// Not a hex, `rgb()`, `rgba()`, or `transparent` color.
    UnknownFormat(String),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("empty color string"),
            Self::BadHex(s) => write!(f, "invalid hex color: {s:?}"),
            Self::BadFunction(s) => write!(f, "invalid color function: {s:?}"),
            Self::ChannelOutOfRange(s) => write!(f, "color channel out of range: {s:?}"),
            Self::AlphaOutOfRange(s) => write!(f, "alpha out of range: {s:?}"),
            Self::UnknownFormat(s) => write!(f, "unrecognized color format: {s:?}"),
        }
    }
}

impl std::error::Error for ColorParseError {}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let s = input.trim();
        if s.is_empty() {
            return Err(ColorParseError::Empty);
        }
        if s.eq_ignore_ascii_case("transparent") {
            return Ok(Self::Transparent);
        }
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).map(Self::Hex);
        }
        let lower = s.to_ascii_lowercase();
        if let Some(args) = function_args(&lower, "rgba") {
            let parts = split_args(args);
            let [r, g, b, a] = parts.as_slice() else {
                return Err(ColorParseError::BadFunction(s.to_string()));
            };
            let rgb = Rgb::new(channel(r)?, channel(g)?, channel(b)?);
            return Ok(Self::Rgba(rgb, alpha(a)?));
        }
        if let Some(args) = function_args(&lower, "rgb") {
            let parts = split_args(args);
            let [r, g, b] = parts.as_slice() else {
                return Err(ColorParseError::BadFunction(s.to_string()));
            };
            return Ok(Self::Rgb(Rgb::new(channel(r)?, channel(g)?, channel(b)?)));
        }
        Err(ColorParseError::UnknownFormat(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Result<Rgb, ColorParseError> {
    let bad = || ColorParseError::BadHex(format!("#{hex}"));
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(bad());
    }
    let digit = |i: usize| u8::from_str_radix(&hex[i..=i], 16).map_err(|_| bad());
    match hex.len() {
        3 => {
            let (r, g, b) = (digit(0)?, digit(1)?, digit(2)?);
            Ok(Rgb::new(r * 17, g * 17, b * 17))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| bad());
            Ok(Rgb::new(pair(0)?, pair(2)?, pair(4)?))
        }
        _ => Err(bad()),
    }
}

/// Arguments between `name(` and the closing `)`, if `s` has that shape.
fn function_args<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    s.strip_prefix(name)?
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

fn split_args(args: &str) -> Vec<&str> {
    args.split(',').map(str::trim).collect()
}

fn channel(raw: &str) -> Result<u8, ColorParseError> {
    raw.parse::<u8>()
        .map_err(|_| ColorParseError::ChannelOutOfRange(raw.to_string()))
}

fn alpha(raw: &str) -> Result<f32, ColorParseError> {
    match raw.parse::<f32>() {
        Ok(a) if (0.0..=1.0).contains(&a) => Ok(a),
        _ => Err(ColorParseError::AlphaOutOfRange(raw.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Serde (string form)
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
impl serde::Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = <String as serde::Deserialize>::deserialize(deserializer)?;
        Ok(Self::parse_lossy(&raw))
    }
}
