#![cfg(feature = "serde")]

//! String-form serialization of colors.
//!
//!   cargo test -p reorder-style --features serde --test serde_roundtrip

use reorder_style::{Color, PaletteAlphas};

#[test]
fn colors_serialize_as_css_strings() {
    let json = serde_json::to_string(&Color::rgba(1, 2, 3, 0.5)).unwrap();
    assert_eq!(json, "\"rgba(1, 2, 3, 0.5)\"");
}

#[test]
fn unknown_strings_deserialize_lossily() {
    let color: Color = serde_json::from_str("\"goldenrod\"").unwrap();
    assert_eq!(color, Color::Other("goldenrod".to_string()));
    let color: Color = serde_json::from_str("\"#2196f3\"").unwrap();
    assert_eq!(color, Color::hex(0x21, 0x96, 0xf3));
}

#[test]
fn palette_alphas_round_trip() {
    let alphas = PaletteAlphas {
        glow: 0.25,
        ..PaletteAlphas::default()
    };
    let json = serde_json::to_string(&alphas).unwrap();
    let back: PaletteAlphas = serde_json::from_str(&json).unwrap();
    assert_eq!(back, alphas);
}
