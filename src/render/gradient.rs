//! Two-circle radial gradients.
//!
//! The gradient interpolates between a start circle `(x0, y0, r0)` at offset
//! 0 and an end circle `(x1, y1, r1)` at offset 1. For a pixel the largest
//! offset `t` whose interpolated circle passes through it (with a
//! non-negative radius) selects the colour from the stops.

use crate::types::Colour;

/// A colour stop at an offset along the gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColourStop {
    pub offset: f32,
    pub colour: Colour,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Circle {
    x: f32,
    y: f32,
    r: f32,
}

/// A radial gradient between two circles.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    start: Circle,
    end: Circle,
    stops: Vec<ColourStop>,
}

impl RadialGradient {
    pub fn new(x0: f32, y0: f32, r0: f32, x1: f32, y1: f32, r1: f32) -> Self {
        Self {
            start: Circle { x: x0, y: y0, r: r0 },
            end: Circle { x: x1, y: y1, r: r1 },
            stops: Vec::new(),
        }
    }

    /// Add a colour stop. Stops are kept sorted by offset.
    pub fn add_stop(&mut self, offset: f32, colour: Colour) {
        let stop = ColourStop { offset, colour };
        let at = self
            .stops
            .iter()
            .position(|s| s.offset > offset)
            .unwrap_or(self.stops.len());
        self.stops.insert(at, stop);
    }

    /// Builder form of [`add_stop`](Self::add_stop).
    pub fn with_stop(mut self, offset: f32, colour: Colour) -> Self {
        self.add_stop(offset, colour);
        self
    }

    pub fn stops(&self) -> &[ColourStop] {
        &self.stops
    }

    /// Colour at canvas position `(px, py)`.
    ///
    /// Positions the gradient does not cover are transparent.
    pub fn colour_at(&self, px: f32, py: f32) -> Colour {
        match self.offset_at(px, py) {
            Some(t) => self.stop_colour(t),
            None => Colour::TRANSPARENT,
        }
    }

    /// Gradient offset `t` for a position, if defined.
    fn offset_at(&self, px: f32, py: f32) -> Option<f32> {
        let (c0, c1) = (self.start, self.end);
        let (cdx, cdy, cdr) = (c1.x - c0.x, c1.y - c0.y, c1.r - c0.r);
        let (dx, dy) = (px - c0.x, py - c0.y);

        // Solve |p - c(t)| = r(t) for t.
        let a = cdx * cdx + cdy * cdy - cdr * cdr;
        let b = dx * cdx + dy * cdy + c0.r * cdr;
        let c = dx * dx + dy * dy - c0.r * c0.r;
        let min_dr = -c0.r;

        if a == 0.0 {
            if b == 0.0 {
                return None;
            }
            let t = 0.5 * c / b;
            return (t * cdr >= min_dr).then_some(t);
        }

        let discr = b * b - a * c;
        if discr < 0.0 {
            return None;
        }
        let sqrt = discr.sqrt();
        let t1 = (b + sqrt) / a;
        let t2 = (b - sqrt) / a;
        let (hi, lo) = if t1 >= t2 { (t1, t2) } else { (t2, t1) };

        if hi * cdr >= min_dr {
            Some(hi)
        } else if lo * cdr >= min_dr {
            Some(lo)
        } else {
            None
        }
    }

    /// Interpolate the stops at offset `t`, clamping outside the stop range.
    fn stop_colour(&self, t: f32) -> Colour {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Colour::TRANSPARENT,
        };

        if t <= first.offset {
            return first.colour;
        }
        if t >= last.offset {
            return last.colour;
        }

        for pair in self.stops.windows(2) {
            let (lo, hi) = (pair[0], pair[1]);
            if t < hi.offset {
                let span = hi.offset - lo.offset;
                if span <= 0.0 {
                    return hi.colour;
                }
                return lo.colour.lerp(hi.colour, (t - lo.offset) / span);
            }
        }

        last.colour
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn concentric() -> RadialGradient {
        // Simple radial gradient: radius 0 at the centre growing to 10.
        RadialGradient::new(0.0, 0.0, 0.0, 0.0, 0.0, 10.0)
            .with_stop(0.0, Colour::BLACK)
            .with_stop(1.0, Colour::WHITE)
    }

    #[test]
    fn test_concentric_centre_and_edge() {
        let g = concentric();
        assert_eq!(g.colour_at(0.0, 0.0), Colour::BLACK);
        assert_eq!(g.colour_at(10.0, 0.0), Colour::WHITE);
        assert_eq!(g.colour_at(0.0, 25.0), Colour::WHITE);
    }

    #[test]
    fn test_concentric_midpoint() {
        let g = concentric();
        assert_eq!(g.colour_at(5.0, 0.0), Colour::rgb(128, 128, 128));
    }

    #[test]
    fn test_stops_sorted_on_insert() {
        let g = RadialGradient::new(0.0, 0.0, 0.0, 0.0, 0.0, 1.0)
            .with_stop(1.0, Colour::WHITE)
            .with_stop(0.0, Colour::BLACK);
        let offsets: Vec<f32> = g.stops().iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0.0, 1.0]);
    }

    #[test]
    fn test_no_stops_is_transparent() {
        let g = RadialGradient::new(0.0, 0.0, 0.0, 0.0, 0.0, 10.0);
        assert_eq!(g.colour_at(1.0, 1.0), Colour::TRANSPARENT);
    }

    #[test]
    fn test_focal_gradient_towards_corner() {
        // Outer circle around (16, 16) shrinking to a point at the corner,
        // as used for stud shading.
        let g = RadialGradient::new(16.0, 16.0, 16.0, 0.0, 0.0, 0.0)
            .with_stop(0.0, Colour::BLACK)
            .with_stop(1.0, Colour::WHITE);

        // The corner itself is the end circle.
        assert_eq!(g.colour_at(0.0, 0.0), Colour::WHITE);
        // A point on the start circle, away from the corner.
        assert_eq!(g.colour_at(32.0, 16.0), Colour::BLACK);
    }
}
