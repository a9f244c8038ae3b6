//! Colour quantization.
//!
//! The grid is sampled from a palette-reduced copy of the source so that
//! neighbouring cells agree on colour more often. The default quantizer
//! clusters pixels with k-means in CIE Lab.

use std::collections::HashSet;

use image::{DynamicImage, Rgba, RgbaImage};
use kmeans_colors::{get_kmeans_hamerly, Kmeans};
use palette::{FromColor, Lab, Srgb};

use crate::mosaic::to_lab;
use crate::types::Colour;

/// Reduces an image to at most `colour_count` colours.
pub trait Quantizer {
    fn quantize(&self, image: &DynamicImage, colour_count: usize) -> DynamicImage;
}

/// Leaves the image untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl Quantizer for Passthrough {
    fn quantize(&self, image: &DynamicImage, _colour_count: usize) -> DynamicImage {
        image.clone()
    }
}

/// K-means clustering in Lab space.
#[derive(Debug, Clone)]
pub struct KmeansQuantizer {
    /// Independent clustering runs; the lowest-score run wins.
    pub runs: u32,
    pub max_iter: usize,
    /// Convergence threshold in Lab units.
    pub converge: f32,
    pub seed: u64,
}

impl Default for KmeansQuantizer {
    fn default() -> Self {
        Self {
            runs: 1,
            max_iter: 20,
            converge: 5.0,
            seed: 0,
        }
    }
}

impl KmeansQuantizer {
    pub fn new(runs: u32, max_iter: usize) -> Self {
        Self {
            runs,
            max_iter,
            ..Self::default()
        }
    }
}

impl Quantizer for KmeansQuantizer {
    fn quantize(&self, image: &DynamicImage, colour_count: usize) -> DynamicImage {
        let rgba = image.to_rgba8();
        if rgba.width() == 0 || rgba.height() == 0 {
            return DynamicImage::ImageRgba8(rgba);
        }

        // Nothing to reduce when the palette is already small enough.
        let k = colour_count.clamp(1, 256);
        let distinct: HashSet<[u8; 3]> = rgba.pixels().map(|p| [p[0], p[1], p[2]]).collect();
        if distinct.len() <= k {
            return DynamicImage::ImageRgba8(rgba);
        }

        let lab: Vec<Lab> = rgba
            .pixels()
            .map(|p| to_lab(Colour::rgb(p[0], p[1], p[2])))
            .collect();

        let mut best = Kmeans::<Lab>::new();
        for run in 0..self.runs.max(1) {
            let result = get_kmeans_hamerly(
                k,
                self.max_iter,
                self.converge,
                false,
                &lab,
                self.seed.wrapping_add(run as u64),
            );
            if result.score < best.score {
                best = result;
            }
        }

        let palette: Vec<Srgb<u8>> = best
            .centroids
            .iter()
            .map(|c| Srgb::from_color(*c).into_format())
            .collect();

        let mut out = RgbaImage::new(rgba.width(), rgba.height());
        for ((dst, src), &index) in out.pixels_mut().zip(rgba.pixels()).zip(&best.indices) {
            *dst = match palette.get(index as usize) {
                Some(c) => Rgba([c.red, c.green, c.blue, src[3]]),
                None => *src,
            };
        }

        log::debug!(
            "quantized {}x{} to {} colours (score {:.1})",
            rgba.width(),
            rgba.height(),
            palette.len(),
            best.score
        );

        DynamicImage::ImageRgba8(out)
    }
}
