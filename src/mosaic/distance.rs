//! Perceptual colour distance.

use palette::{IntoColor, Lab, Srgb};

use crate::types::Colour;

// Graphic-arts weighting factors.
const K1: f32 = 0.045;
const K2: f32 = 0.015;

/// Convert an 8-bit colour to CIE Lab (D65). Alpha is ignored.
pub fn to_lab(colour: Colour) -> Lab {
    Srgb::new(
        colour.r as f32 / 255.0,
        colour.g as f32 / 255.0,
        colour.b as f32 / 255.0,
    )
    .into_linear()
    .into_color()
}

/// CIE94 colour difference between two 8-bit colours.
///
/// The chroma weights use the geometric mean of both chromas instead of the
/// first colour's alone, so `cie94(a, b) == cie94(b, a)`.
pub fn cie94(a: Colour, b: Colour) -> f32 {
    let lab1 = to_lab(a);
    let lab2 = to_lab(b);

    let delta_l = lab1.l - lab2.l;
    let c1 = (lab1.a * lab1.a + lab1.b * lab1.b).sqrt();
    let c2 = (lab2.a * lab2.a + lab2.b * lab2.b).sqrt();
    let delta_c = c1 - c2;

    let delta_a = lab1.a - lab2.a;
    let delta_b = lab1.b - lab2.b;
    let delta_h2 = (delta_a * delta_a + delta_b * delta_b - delta_c * delta_c).max(0.0);

    let chroma = (c1 * c2).sqrt();
    let sc = 1.0 + K1 * chroma;
    let sh = 1.0 + K2 * chroma;

    let term_l = delta_l * delta_l;
    let term_c = (delta_c / sc) * (delta_c / sc);
    let term_h = delta_h2 / (sh * sh);

    (term_l + term_c + term_h).sqrt()
}
