//! Grid driver.
//!
//! Walks the cell grid in vertical strips, classifies and renders every
//! cell, then hands the composed raster to the noise pass.

use std::time::{SystemTime, UNIX_EPOCH};

use image::{DynamicImage, RgbaImage};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;
use crate::quantize::{KmeansQuantizer, Quantizer};
use crate::render::{apply_noise, Canvas, Piece, PieceRenderer, RasterCanvas};
use crate::report::MosaicReport;
use crate::types::{Colour, Footprint, MosaicConfig};

use super::classify::{classify, DedupIndex};
use super::sampler::{Cell, Raster16};

/// Receives completion percentages while a mosaic is composed.
pub trait Progress {
    fn report(&mut self, percent: f32);
}

impl<F: FnMut(f32)> Progress for F {
    fn report(&mut self, percent: f32) {
        self(percent)
    }
}

/// Discards progress updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl Progress for NoProgress {
    fn report(&mut self, _percent: f32) {}
}

/// A finished mosaic and its run statistics.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub image: RgbaImage,
    pub report: MosaicReport,
}

/// Mosaic generator.
pub struct Mosaic {
    config: MosaicConfig,
    quantizer: Option<Box<dyn Quantizer>>,
}

impl Mosaic {
    /// Create a generator that quantizes with k-means seeded from the run seed.
    pub fn new(config: MosaicConfig) -> Self {
        Self {
            config,
            quantizer: None,
        }
    }

    /// Replace the quantizer.
    pub fn with_quantizer(mut self, quantizer: impl Quantizer + 'static) -> Self {
        self.quantizer = Some(Box::new(quantizer));
        self
    }

    pub fn config(&self) -> &MosaicConfig {
        &self.config
    }

    /// Render `image` as a mosaic with an explicit colour count and cell size.
    ///
    /// A `cell_size_override` of zero derives the cell size from the image
    /// dimensions.
    pub fn process(
        &self,
        image: &DynamicImage,
        colour_count: usize,
        cell_size_override: u32,
    ) -> Result<RgbaImage> {
        let config = self
            .config
            .clone()
            .with_colour_count(colour_count)
            .with_cell_size(cell_size_override);
        let rendered = self.run_with(&config, image, &mut NoProgress)?;
        Ok(rendered.image)
    }

    /// Render `image` with the configured settings.
    pub fn run(&self, image: &DynamicImage, progress: &mut dyn Progress) -> Result<Rendered> {
        self.run_with(&self.config, image, progress)
    }

    fn run_with(
        &self,
        config: &MosaicConfig,
        image: &DynamicImage,
        progress: &mut dyn Progress,
    ) -> Result<Rendered> {
        config.validate()?;

        let (width, height) = (image.width(), image.height());
        let cell_size = config.cell_size_for(width, height);
        let seed = config.seed.unwrap_or_else(clock_seed);
        log::debug!("cell size {} for {}x{}, seed {}", cell_size, width, height, seed);

        let quantized = match &self.quantizer {
            Some(q) => q.quantize(image, config.colour_count),
            None => KmeansQuantizer {
                seed,
                ..KmeansQuantizer::default()
            }
            .quantize(image, config.colour_count),
        };
        let raster = quantized.to_rgba16();

        let mut canvas = RasterCanvas::new(width, height, Colour::WHITE);
        let report = compose_with(config, &raster, cell_size, seed, &mut canvas, progress);
        log::debug!(
            "{} bricks, {} skipped, {} seams",
            report.bricks,
            report.skipped,
            report.seams
        );

        let image = if config.noise.amount > 0.0 {
            apply_noise(canvas.image(), config.noise.amount, seed)
        } else {
            canvas.into_image()
        };

        Ok(Rendered { image, report })
    }

    /// Run the grid traversal on an already quantized raster, drawing onto
    /// `canvas`. No noise is applied.
    pub fn compose<C: Canvas + ?Sized>(
        &self,
        raster: &Raster16,
        cell_size: u32,
        seed: u64,
        canvas: &mut C,
        progress: &mut dyn Progress,
    ) -> MosaicReport {
        compose_with(&self.config, raster, cell_size, seed, canvas, progress)
    }
}

fn compose_with<C: Canvas + ?Sized>(
    config: &MosaicConfig,
    raster: &Raster16,
    cell_size: u32,
    seed: u64,
    canvas: &mut C,
    progress: &mut dyn Progress,
) -> MosaicReport {
    let (width, height) = raster.dimensions();
    let size = cell_size.max(1);
    let mut report = MosaicReport::new(width, height, size, seed);

    let mut rng = StdRng::seed_from_u64(seed);
    let mut index = DedupIndex::new();
    let renderer = PieceRenderer::new(config);

    let strips = width.div_ceil(size);
    let per_strip = height.div_ceil(size);
    let total = strips as u64 * per_strip as u64;
    let mut done = 0u64;
    let mut reported = 0.0;

    for (idx, x) in (0..width).step_by(size as usize).enumerate() {
        for (idy, y) in (0..height).step_by(size as usize).enumerate() {
            done += 1;
            if x + size / 2 >= width || y + size / 2 >= height {
                continue;
            }
            report.cells += 1;

            let cell = Cell::sample(raster, x, y, size);
            let class = classify(raster, &cell, config, &mut rng, &mut index);
            if class.traced {
                report.traced += 1;
            }
            let Some(footprint) = Footprint::from_span(class.rows, class.cols) else {
                log::trace!("no footprint for {}x{} at ({}, {})", class.rows, class.cols, x, y);
                report.record_skip();
                continue;
            };

            let piece = Piece {
                x,
                y,
                size,
                idx: idx as u32 + 1,
                idy: idy as u32 + 1,
                colour: cell.colour,
                footprint,
            };
            let outcome = renderer.render(canvas, &piece, &mut index);
            report.record(footprint, outcome.seams_drawn);
        }

        if total > 0 {
            reported = done as f32 / total as f32 * 100.0;
            progress.report(reported);
        }
    }

    if reported < 100.0 {
        progress.report(100.0);
    }
    report
}

/// Seed drawn from the wall clock when none is configured.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use image::{ImageBuffer, Rgba};

    use crate::quantize::Passthrough;
    use crate::render::{Point, RadialGradient, Rect};

    /// Records every stroke and counts fills.
    #[derive(Default)]
    struct Recorder {
        width: u32,
        height: u32,
        strokes: Vec<(Point, Point)>,
        fills: usize,
    }

    impl Canvas for Recorder {
        fn width(&self) -> u32 {
            self.width
        }
        fn height(&self) -> u32 {
            self.height
        }
        fn fill_rect(&mut self, _: Rect, _: Colour) {
            self.fills += 1;
        }
        fn fill_circle(&mut self, _: Point, _: f32, _: Colour) {
            self.fills += 1;
        }
        fn fill_circle_gradient(&mut self, _: Point, _: f32, _: &RadialGradient) {
            self.fills += 1;
        }
        fn stroke_line(&mut self, from: Point, to: Point, _: f32, _: Colour) {
            self.strokes.push((from, to));
        }
    }

    fn stripes(width: u32, height: u32, band: u32) -> Raster16 {
        ImageBuffer::from_fn(width, height, |x, y| {
            let v = if (x / band + y / (band * 2)) % 2 == 0 { 0 } else { u16::MAX };
            Rgba([v, v / 2, 20_000, u16::MAX])
        })
    }

    fn uniform(width: u32, height: u32) -> Raster16 {
        ImageBuffer::from_pixel(width, height, Rgba([30_000, 40_000, 50_000, u16::MAX]))
    }

    fn seam_keys(canvas: &Recorder) -> HashSet<(u32, u32, u32, u32)> {
        canvas
            .strokes
            .iter()
            .map(|(a, b)| (a.x as u32, a.y as u32, b.x as u32, b.y as u32))
            .collect()
    }

    #[test]
    fn test_uniform_two_by_two() {
        let mosaic = Mosaic::new(MosaicConfig::default().with_max_span(2, 2));
        let mut canvas = Recorder {
            width: 64,
            height: 64,
            ..Default::default()
        };

        let report = mosaic.compose(&uniform(64, 64), 32, 1, &mut canvas, &mut NoProgress);

        assert_eq!(report.cells, 4);
        assert_eq!(report.bricks, 4);
        assert_eq!(report.count(Footprint::TwoByTwo), 4);
        assert_eq!(report.seams, 8);
        assert_eq!(report.traced, 1);
        assert_eq!(canvas.fills, 16);

        let strokes = seam_keys(&canvas);
        // Both halves of every outer edge.
        for y in [0, 32] {
            assert!(strokes.contains(&(1, y, 1, y + 32)), "left at {}", y);
            assert!(strokes.contains(&(64, y, 64, y + 32)), "right at {}", y);
        }
        for x in [0, 32] {
            assert!(strokes.contains(&(x, 1, x + 32, 1)), "top at {}", x);
            assert!(strokes.contains(&(x, 64, x + 32, 64)), "bottom at {}", x);
        }
    }

    #[test]
    fn test_default_spans_fit_uniform_square() {
        let mosaic = Mosaic::new(MosaicConfig::default());

        for seed in 0..20 {
            let mut canvas = Recorder {
                width: 64,
                height: 64,
                ..Default::default()
            };
            let report = mosaic.compose(&uniform(64, 64), 32, seed, &mut canvas, &mut NoProgress);

            assert_eq!(report.count(Footprint::TwoByTwo), 4, "seed {}: {:?}", seed, report.footprints);
            assert_eq!(report.seams, 8, "seed {}", seed);
            let strokes = seam_keys(&canvas);
            assert!(strokes.contains(&(64, 32, 64, 64)), "seed {}", seed);
            assert!(strokes.contains(&(32, 64, 64, 64)), "seed {}", seed);
        }
    }

    #[test]
    fn test_no_seam_stroked_twice() {
        let raster = stripes(200, 150, 24);
        let mosaic = Mosaic::new(MosaicConfig::default().with_max_span(6, 2));

        for seed in 0..40 {
            let mut canvas = Recorder {
                width: 200,
                height: 150,
                ..Default::default()
            };
            mosaic.compose(&raster, 10, seed, &mut canvas, &mut NoProgress);

            let mut seen = HashSet::new();
            for (a, b) in &canvas.strokes {
                let key = (a.x.to_bits(), a.y.to_bits(), b.x.to_bits(), b.y.to_bits());
                assert!(seen.insert(key), "seam {:?} -> {:?} drawn twice (seed {})", a, b, seed);
            }
        }
    }

    #[test]
    fn test_cells_past_midpoint_are_ignored() {
        // 70 px at cell 32: the third strip starts at 64, midpoint 80 is out.
        let mosaic = Mosaic::new(MosaicConfig::default().with_max_span(1, 1));
        let mut canvas = Recorder {
            width: 70,
            height: 40,
            ..Default::default()
        };
        let report = mosaic.compose(&uniform(70, 40), 32, 0, &mut canvas, &mut NoProgress);

        assert_eq!(report.cells, 2);
        assert_eq!(report.count(Footprint::OneByOne), 2);
    }

    #[test]
    fn test_progress_reported_per_strip_and_finishes() {
        let mosaic = Mosaic::new(MosaicConfig::default());
        let mut canvas = RasterCanvas::new(64, 32, Colour::WHITE);
        let mut seen = Vec::new();
        let mut sink = |p: f32| seen.push(p);

        mosaic.compose(&uniform(64, 32), 16, 3, &mut canvas, &mut sink);

        assert_eq!(seen, vec![25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn test_fixed_seed_is_reproducible() {
        let image = DynamicImage::ImageRgba16(stripes(96, 64, 16));
        let config = MosaicConfig::default().with_seed(42).with_cell_size(8);
        let mosaic = Mosaic::new(config).with_quantizer(Passthrough);

        let a = mosaic.run(&image, &mut NoProgress).unwrap();
        let b = mosaic.run(&image, &mut NoProgress).unwrap();

        assert_eq!(a.image.as_raw(), b.image.as_raw());
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_process_keeps_dimensions() {
        let image = DynamicImage::ImageRgba16(uniform(50, 30));
        let mosaic = Mosaic::new(MosaicConfig::default().with_seed(5)).with_quantizer(Passthrough);

        let out = mosaic.process(&image, 16, 0).unwrap();
        assert_eq!(out.dimensions(), (50, 30));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let image = DynamicImage::ImageRgba16(uniform(8, 8));
        let mosaic = Mosaic::new(MosaicConfig::default());
        assert!(mosaic.process(&image, 0, 4).is_err());
    }

    #[test]
    fn test_empty_image() {
        let image = DynamicImage::ImageRgba16(uniform(0, 0));
        let mosaic = Mosaic::new(MosaicConfig::default().with_seed(1)).with_quantizer(Passthrough);
        let rendered = mosaic.run(&image, &mut NoProgress).unwrap();

        assert_eq!(rendered.image.dimensions(), (0, 0));
        assert_eq!(rendered.report.cells, 0);
    }
}
