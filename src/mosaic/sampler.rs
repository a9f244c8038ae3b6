//! Cell sampling.
//!
//! Cells are computed on demand from the quantized raster; nothing is cached.

use image::{ImageBuffer, Rgba};

use crate::types::CellColour;

/// 16-bit RGBA raster the grid is sampled from.
pub type Raster16 = ImageBuffer<Rgba<u16>, Vec<u16>>;

/// An integer pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A `size` x `size` square anchored at `(x, y)`.
    pub fn square(x: u32, y: u32, size: u32) -> Self {
        Self::new(x, y, size, size)
    }

    /// Intersect with a `width` x `height` image.
    pub fn clipped(self, width: u32, height: u32) -> Self {
        let x = self.x.min(width);
        let y = self.y.min(height);
        let right = self.x.saturating_add(self.width).min(width);
        let bottom = self.y.saturating_add(self.height).min(height);
        Self::new(x, y, right - x, bottom - y)
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

/// A grid cell and its average colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub x: u32,
    pub y: u32,
    pub size: u32,
    pub colour: CellColour,
}

impl Cell {
    /// Sample the cell anchored at `(x, y)`.
    pub fn sample(raster: &Raster16, x: u32, y: u32, size: u32) -> Self {
        let colour = average_colour(raster, PixelRect::square(x, y, size));
        Self { x, y, size, colour }
    }

    /// Pixel centre of the cell, used for the stud.
    pub fn centre(&self) -> (u32, u32) {
        (self.x + self.size / 2, self.y + self.size / 2)
    }
}

/// Average colour of a rectangle of the raster.
///
/// The rectangle is clipped to the raster first. Channels are the truncated
/// arithmetic mean; alpha is always opaque. An empty rectangle is a caller
/// error and yields opaque black.
pub fn average_colour(raster: &Raster16, rect: PixelRect) -> CellColour {
    let rect = rect.clipped(raster.width(), raster.height());
    let area = rect.area();
    debug_assert!(area > 0, "cannot average an empty rectangle: {:?}", rect);
    if area == 0 {
        return CellColour::opaque(0, 0, 0);
    }

    let (mut r, mut g, mut b) = (0u64, 0u64, 0u64);
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            let px = raster.get_pixel(x, y);
            r += px[0] as u64;
            g += px[1] as u64;
            b += px[2] as u64;
        }
    }

    let mean = |sum: u64| (sum / area).min(u16::MAX as u64) as u16;
    CellColour::opaque(mean(r), mean(g), mean(b))
}
