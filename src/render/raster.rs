//! Software rasterizer backed by an RGBA image buffer.
//!
//! Shapes are anti-aliased by estimating per-pixel coverage and compositing
//! with straight-alpha source-over blending.

use image::{Rgba, RgbaImage};

use crate::types::Colour;

use super::canvas::{Canvas, Point, Rect};
use super::gradient::RadialGradient;

/// An in-memory canvas.
#[derive(Debug, Clone)]
pub struct RasterCanvas {
    image: RgbaImage,
}

impl RasterCanvas {
    /// Create a canvas filled with `background`.
    pub fn new(width: u32, height: u32, background: Colour) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(background.to_rgba())),
        }
    }

    /// Borrow the underlying image.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Take ownership of the underlying image.
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    /// Read a pixel, if inside the canvas.
    pub fn get(&self, x: u32, y: u32) -> Option<Colour> {
        if x < self.image.width() && y < self.image.height() {
            let [r, g, b, a] = self.image.get_pixel(x, y).0;
            Some(Colour::new(r, g, b, a))
        } else {
            None
        }
    }

    /// Composite `colour` over the pixel at `(x, y)` with the given coverage.
    fn blend(&mut self, x: i64, y: i64, colour: Colour, coverage: f32) {
        if x < 0 || y < 0 || x >= self.image.width() as i64 || y >= self.image.height() as i64 {
            return;
        }
        let src_a = colour.a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
        if src_a <= 0.0 {
            return;
        }

        let dst = self.image.get_pixel_mut(x as u32, y as u32);
        let dst_a = dst[3] as f32 / 255.0;
        let out_a = src_a + dst_a * (1.0 - src_a);
        if out_a <= 0.0 {
            *dst = Rgba([0, 0, 0, 0]);
            return;
        }

        let mix = |s: u8, d: u8| {
            let v = (s as f32 * src_a + d as f32 * dst_a * (1.0 - src_a)) / out_a;
            v.round().clamp(0.0, 255.0) as u8
        };
        *dst = Rgba([
            mix(colour.r, dst[0]),
            mix(colour.g, dst[1]),
            mix(colour.b, dst[2]),
            (out_a * 255.0).round().clamp(0.0, 255.0) as u8,
        ]);
    }

    /// Pixel range `[lo, hi)` touched by the span `[min, max]`, clipped.
    fn span(min: f32, max: f32, limit: u32) -> (i64, i64) {
        let lo = (min.floor() as i64).max(0);
        let hi = (max.ceil() as i64).min(limit as i64);
        (lo, hi)
    }

    /// Visit every pixel near a circle with its coverage and centre.
    fn for_circle(
        &mut self,
        centre: Point,
        radius: f32,
        mut paint: impl FnMut(&mut Self, i64, i64, f32, Point),
    ) {
        if radius <= 0.0 || !radius.is_finite() {
            return;
        }
        let (x0, x1) = Self::span(centre.x - radius - 1.0, centre.x + radius + 1.0, self.width());
        let (y0, y1) = Self::span(centre.y - radius - 1.0, centre.y + radius + 1.0, self.height());

        for py in y0..y1 {
            for px in x0..x1 {
                let p = Point::new(px as f32 + 0.5, py as f32 + 0.5);
                let d = ((p.x - centre.x).powi(2) + (p.y - centre.y).powi(2)).sqrt();
                let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    paint(self, px, py, coverage, p);
                }
            }
        }
    }
}

/// Overlap of the unit interval `[p, p + 1]` with `[lo, hi]`.
fn overlap(p: f32, lo: f32, hi: f32) -> f32 {
    ((p + 1.0).min(hi) - p.max(lo)).max(0.0)
}

impl Canvas for RasterCanvas {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn fill_rect(&mut self, rect: Rect, colour: Colour) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let (x0, x1) = Self::span(rect.x, rect.right(), self.width());
        let (y0, y1) = Self::span(rect.y, rect.bottom(), self.height());

        for py in y0..y1 {
            let cy = overlap(py as f32, rect.y, rect.bottom());
            for px in x0..x1 {
                let cx = overlap(px as f32, rect.x, rect.right());
                self.blend(px, py, colour, cx * cy);
            }
        }
    }

    fn fill_circle(&mut self, centre: Point, radius: f32, colour: Colour) {
        self.for_circle(centre, radius, |canvas, px, py, coverage, _| {
            canvas.blend(px, py, colour, coverage);
        });
    }

    fn fill_circle_gradient(&mut self, centre: Point, radius: f32, gradient: &RadialGradient) {
        self.for_circle(centre, radius, |canvas, px, py, coverage, p| {
            let colour = gradient.colour_at(p.x, p.y);
            canvas.blend(px, py, colour, coverage);
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, width: f32, colour: Colour) {
        let (dx, dy) = (to.x - from.x, to.y - from.y);
        let length = (dx * dx + dy * dy).sqrt();
        if length <= 0.0 || width <= 0.0 {
            return;
        }
        let (ux, uy) = (dx / length, dy / length);

        // Hairlines are drawn one pixel wide at reduced opacity.
        let drawn = width.max(1.0);
        let opacity = width.min(1.0);
        let reach = drawn / 2.0 + 1.0;

        let (x0, x1) = Self::span(from.x.min(to.x) - reach, from.x.max(to.x) + reach, self.width());
        let (y0, y1) = Self::span(from.y.min(to.y) - reach, from.y.max(to.y) + reach, self.height());

        for py in y0..y1 {
            for px in x0..x1 {
                let (rx, ry) = (px as f32 + 0.5 - from.x, py as f32 + 0.5 - from.y);
                let along = rx * ux + ry * uy;
                let across = (rx * uy - ry * ux).abs();

                let side = (drawn / 2.0 + 0.5 - across).clamp(0.0, 1.0);
                let ends = (along + 0.5).min(length + 0.5 - along).clamp(0.0, 1.0);
                let coverage = side * ends * opacity;
                if coverage > 0.0 {
                    self.blend(px, py, colour, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_fills_background() {
        let canvas = RasterCanvas::new(3, 2, Colour::WHITE);
        assert_eq!(canvas.width(), 3);
        assert_eq!(canvas.height(), 2);
        assert_eq!(canvas.get(2, 1), Some(Colour::WHITE));
        assert_eq!(canvas.get(3, 0), None);
    }

    #[test]
    fn test_fill_rect_pixel_aligned() {
        let mut canvas = RasterCanvas::new(8, 8, Colour::WHITE);
        canvas.fill_rect(Rect::new(2.0, 2.0, 4.0, 4.0), Colour::rgb(255, 0, 0));

        assert_eq!(canvas.get(2, 2), Some(Colour::rgb(255, 0, 0)));
        assert_eq!(canvas.get(5, 5), Some(Colour::rgb(255, 0, 0)));
        assert_eq!(canvas.get(1, 2), Some(Colour::WHITE));
        assert_eq!(canvas.get(6, 6), Some(Colour::WHITE));
    }

    #[test]
    fn test_fill_rect_partial_coverage_blends() {
        let mut canvas = RasterCanvas::new(2, 1, Colour::WHITE);
        canvas.fill_rect(Rect::new(0.5, 0.0, 1.0, 1.0), Colour::BLACK);
        // Half of pixel 0 is covered.
        assert_eq!(canvas.get(0, 0), Some(Colour::rgb(128, 128, 128)));
    }

    #[test]
    fn test_fill_rect_clips_outside() {
        let mut canvas = RasterCanvas::new(4, 4, Colour::WHITE);
        canvas.fill_rect(Rect::new(-10.0, -10.0, 12.0, 12.0), Colour::BLACK);
        assert_eq!(canvas.get(0, 0), Some(Colour::BLACK));
        assert_eq!(canvas.get(1, 1), Some(Colour::BLACK));
        assert_eq!(canvas.get(2, 2), Some(Colour::WHITE));
    }

    #[test]
    fn test_fill_circle_centre_and_outside() {
        let mut canvas = RasterCanvas::new(20, 20, Colour::WHITE);
        canvas.fill_circle(Point::new(10.0, 10.0), 5.0, Colour::BLACK);

        assert_eq!(canvas.get(10, 10), Some(Colour::BLACK));
        assert_eq!(canvas.get(0, 0), Some(Colour::WHITE));
        assert_eq!(canvas.get(17, 10), Some(Colour::WHITE));
    }

    #[test]
    fn test_fill_circle_zero_radius_is_noop() {
        let mut canvas = RasterCanvas::new(4, 4, Colour::WHITE);
        canvas.fill_circle(Point::new(2.0, 2.0), 0.0, Colour::BLACK);
        canvas.fill_circle(Point::new(2.0, 2.0), -1.0, Colour::BLACK);
        assert!(canvas.image().pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }

    #[test]
    fn test_translucent_over_opaque_stays_opaque() {
        let mut canvas = RasterCanvas::new(1, 1, Colour::WHITE);
        canvas.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Colour::new(0, 0, 0, 51));
        let c = canvas.get(0, 0).unwrap();
        assert_eq!(c.a, 255);
        assert_eq!(c.r, 204);
    }

    #[test]
    fn test_fill_circle_gradient_uses_gradient_colour() {
        let mut canvas = RasterCanvas::new(20, 20, Colour::WHITE);
        let gradient = RadialGradient::new(10.0, 10.0, 0.0, 10.0, 10.0, 100.0)
            .with_stop(0.0, Colour::rgb(0, 0, 255))
            .with_stop(1.0, Colour::rgb(0, 0, 255));
        canvas.fill_circle_gradient(Point::new(10.0, 10.0), 4.0, &gradient);
        assert_eq!(canvas.get(10, 10), Some(Colour::rgb(0, 0, 255)));
    }

    #[test]
    fn test_hairline_is_faint() {
        let mut canvas = RasterCanvas::new(4, 8, Colour::WHITE);
        canvas.stroke_line(Point::new(2.0, 0.0), Point::new(2.0, 8.0), 0.15, Colour::BLACK);

        let c = canvas.get(2, 4).unwrap();
        assert!(c.r < 255 && c.r > 200, "got {:?}", c);
        assert_eq!(canvas.get(0, 4), Some(Colour::WHITE));
    }

    #[test]
    fn test_thick_line_covers_pixels() {
        let mut canvas = RasterCanvas::new(8, 8, Colour::WHITE);
        canvas.stroke_line(Point::new(0.0, 4.0), Point::new(8.0, 4.0), 2.0, Colour::BLACK);
        assert_eq!(canvas.get(4, 3), Some(Colour::BLACK));
        assert_eq!(canvas.get(4, 4), Some(Colour::BLACK));
        assert_eq!(canvas.get(4, 0), Some(Colour::WHITE));
    }

    #[test]
    fn test_zero_length_line_is_noop() {
        let mut canvas = RasterCanvas::new(4, 4, Colour::WHITE);
        canvas.stroke_line(Point::new(1.0, 1.0), Point::new(1.0, 1.0), 1.0, Colour::BLACK);
        assert_eq!(canvas.get(1, 1), Some(Colour::WHITE));
    }
}
