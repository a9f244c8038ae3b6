//! Noise post-processing.
//!
//! A Lehmer (Park-Miller) generator drives a per-pixel brightness jitter
//! that gives the finished mosaic a plastic texture.

use image::{Rgba, RgbaImage};

/// Park-Miller multiplier.
const MULTIPLIER: u64 = 16807;
/// Mersenne prime 2^31 - 1.
const MODULUS: u64 = 0x7fff_ffff;

/// Multiplicative congruential generator `state' = a * state mod m`.
#[derive(Debug, Clone, PartialEq)]
pub struct Lehmer {
    a: u64,
    m: u64,
    state: u64,
    inv_m: f64,
}

impl Lehmer {
    /// Create a generator. Any seed is folded into the valid state range
    /// `1..m`.
    pub fn new(seed: u64) -> Self {
        Self {
            a: MULTIPLIER,
            m: MODULUS,
            state: seed % (MODULUS - 1) + 1,
            inv_m: 1.0 / MODULUS as f64,
        }
    }

    /// Current state.
    pub fn state(&self) -> u64 {
        self.state
    }

    /// Advance and return the next state.
    pub fn next_state(&mut self) -> u64 {
        self.state = self.a * self.state % self.m;
        self.state
    }

    /// Next uniform value in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        self.next_state() as f64 * self.inv_m
    }
}

/// Apply seeded noise to an image, returning a new image.
///
/// Each pixel draws one value `v` and shifts R, G and B by
/// `(v - 0.1) * amount`, but only when all three channels stay within
/// `0..=255`. Otherwise the pixel is copied unchanged. Alpha is preserved.
pub fn apply_noise(image: &RgbaImage, amount: f32, seed: u64) -> RgbaImage {
    let (width, height) = image.dimensions();
    let mut out = RgbaImage::new(width, height);
    let mut prng = Lehmer::new(seed);
    let amount = amount as f64;

    for x in 0..width {
        for y in 0..height {
            let [r, g, b, a] = image.get_pixel(x, y).0;
            let shift = (prng.next_f64() - 0.1) * amount;

            let channels = [r as f64 + shift, g as f64 + shift, b as f64 + shift];
            let px = if channels.iter().all(|c| (0.0..=255.0).contains(c)) {
                Rgba([channels[0] as u8, channels[1] as u8, channels[2] as u8, a])
            } else {
                Rgba([r, g, b, a])
            };
            out.put_pixel(x, y, px);
        }
    }

    out
}
