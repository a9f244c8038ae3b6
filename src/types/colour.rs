//! Colour types.
//!
//! `Colour` is the 8-bit RGBA value used for drawing. `CellColour` is the
//! 16-bit per channel average produced by the cell sampler.

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Convert to RGBA tuple.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Bitwise complement of the RGB channels. Alpha is kept.
    pub fn inverted(self) -> Self {
        Self::new(self.r ^ 0xff, self.g ^ 0xff, self.b ^ 0xff, self.a)
    }

    /// Scale the RGB channels by `factor`, saturating at 255.
    pub fn brightened(self, factor: f32) -> Self {
        let scale = |c: u8| (c as f32 * factor).round().clamp(0.0, 255.0) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b), self.a)
    }

    /// Whether any RGB channel is strictly above `threshold`.
    pub fn any_channel_above(self, threshold: u8) -> bool {
        self.r > threshold || self.g > threshold || self.b > threshold
    }

    /// Linear interpolation between two colours (straight alpha).
    pub fn lerp(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Self::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }
}

/// A 16-bit per channel colour, as averaged over a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellColour {
    pub r: u16,
    pub g: u16,
    pub b: u16,
    pub a: u16,
}

impl CellColour {
    pub const fn new(r: u16, g: u16, b: u16, a: u16) -> Self {
        Self { r, g, b, a }
    }

    /// Opaque colour from RGB components.
    pub const fn opaque(r: u16, g: u16, b: u16) -> Self {
        Self {
            r,
            g,
            b,
            a: u16::MAX,
        }
    }

    /// Downscale to 8 bits per channel by dropping the low byte.
    pub fn to_8bit(self) -> Colour {
        Colour::new(
            (self.r >> 8) as u8,
            (self.g >> 8) as u8,
            (self.b >> 8) as u8,
            (self.a >> 8) as u8,
        )
    }

    /// Complement of the 8-bit downscaled colour.
    pub fn inverted(self) -> Colour {
        self.to_8bit().inverted()
    }

    pub fn to_rgba(self) -> [u16; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Colour> for CellColour {
    fn from(c: Colour) -> Self {
        // 0xff * 257 == 0xffff, matching image's u8 -> u16 widening.
        Self::new(
            c.r as u16 * 257,
            c.g as u16 * 257,
            c.b as u16 * 257,
            c.a as u16 * 257,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Colour::BLACK, Colour::rgb(0, 0, 0));
        assert_eq!(Colour::WHITE, Colour::rgb(255, 255, 255));
        assert_eq!(Colour::TRANSPARENT.a, 0);
    }

    #[test]
    fn test_inverted_keeps_alpha() {
        let c = Colour::new(10, 200, 255, 40);
        assert_eq!(c.inverted(), Colour::new(245, 55, 0, 40));
        assert_eq!(c.inverted().inverted(), c);
    }

    #[test]
    fn test_brightened_saturates() {
        assert_eq!(Colour::rgb(100, 200, 250).brightened(1.1), Colour::rgb(110, 220, 255));
        assert_eq!(Colour::WHITE.brightened(1.0005), Colour::WHITE);
    }

    #[test]
    fn test_any_channel_above() {
        assert!(Colour::rgb(0, 128, 0).any_channel_above(127));
        assert!(!Colour::rgb(127, 127, 127).any_channel_above(127));
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Colour::new(0, 0, 0, 0);
        let b = Colour::new(200, 100, 50, 255);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Colour::new(100, 50, 25, 128));
    }

    #[test]
    fn test_cell_colour_downscale() {
        let c = CellColour::from(Colour::rgb(12, 34, 255));
        assert_eq!(c.to_8bit(), Colour::rgb(12, 34, 255));
        assert_eq!(c.inverted(), Colour::rgb(243, 221, 0));
        assert_eq!(CellColour::opaque(0, 0, 0).a, u16::MAX);
    }
}
