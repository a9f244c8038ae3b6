//! Piece renderer: draws one brick cell onto a canvas.
//!
//! Every cell gets a base fill, a highlight and a shadow crescent, and a
//! solid stud. Border seams are traced on the cell whose grid index closes a
//! footprint, and each seam is stroked at most once per run.

use crate::mosaic::{DedupIndex, Seam};
use crate::types::{CellColour, Colour, Footprint, MosaicConfig};

use super::canvas::{Canvas, Point, Rect};
use super::gradient::RadialGradient;

/// Left and top seams: light, thin.
const LIGHT_SEAM: Colour = Colour::new(177, 177, 177, 177);
/// Right and bottom seams: dark, slightly thicker.
const DARK_SEAM: Colour = Colour::new(0, 0, 0, 177);

const LEFT_SEAM_WIDTH: f32 = 0.10;
const TOP_SEAM_WIDTH: f32 = 0.05;
const DARK_SEAM_WIDTH: f32 = 0.15;

/// Highlight gradient stops.
const HIGHLIGHT_FROM: Colour = Colour::new(177, 177, 177, 0);
const HIGHLIGHT_TO: Colour = Colour::new(255, 255, 255, 177);

/// Shadow gradient stops.
const SHADOW_FROM: Colour = Colour::new(0, 0, 0, 177);
const SHADOW_DARK: Colour = Colour::new(0, 0, 0, 255);
const SHADOW_LIGHT: Colour = Colour::new(177, 177, 177, 255);

/// One cell of a brick, ready to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Piece {
    /// Cell origin in pixels.
    pub x: u32,
    pub y: u32,
    /// Cell side in pixels.
    pub size: u32,
    /// 1-based grid index along x.
    pub idx: u32,
    /// 1-based grid index along y.
    pub idy: u32,
    /// Average cell colour.
    pub colour: CellColour,
    /// Brick size this cell belongs to.
    pub footprint: Footprint,
}

impl Piece {
    /// Cell centre in canvas space.
    pub fn centre(&self) -> Point {
        let half = (self.size / 2) as f32;
        Point::new(self.x as f32 + half, self.y as f32 + half)
    }

    /// Stud radius: half the cell minus the square root of its size.
    pub fn stud_radius(&self) -> f32 {
        let size = self.size as f32;
        size / 2.0 - size.sqrt()
    }
}

/// What a render call drew.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PieceOutcome {
    /// Number of border seams stroked.
    pub seams_drawn: usize,
}

/// Draws pieces with a fixed shading style.
#[derive(Debug, Clone)]
pub struct PieceRenderer {
    brightness: f32,
    shade_threshold: u8,
}

impl PieceRenderer {
    pub fn new(config: &MosaicConfig) -> Self {
        Self {
            brightness: config.brightness,
            shade_threshold: config.shade_threshold,
        }
    }

    /// Render one piece and the border seams it closes.
    pub fn render<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        piece: &Piece,
        index: &mut DedupIndex,
    ) -> PieceOutcome {
        let inverted = piece.colour.inverted();
        let size = piece.size as f32;
        let (x, y) = (piece.x as f32, piece.y as f32);
        let centre = piece.centre();
        let radius = piece.stud_radius();

        // Base plate
        let base = Colour { a: 255, ..inverted }.brightened(self.brightness);
        canvas.fill_rect(Rect::new(x, y, size, size), base);

        // Highlight, offset up-left
        let highlight = RadialGradient::new(centre.x, centre.y, size / 2.0, x, y, 0.0)
            .with_stop(0.0, HIGHLIGHT_FROM)
            .with_stop(1.0, HIGHLIGHT_TO);
        canvas.fill_circle_gradient(Point::new(centre.x - 1.0, centre.y - 1.0), radius, &highlight);

        // Shadow, offset down-right. Bright studs get a dark rim.
        let rim = if inverted.any_channel_above(self.shade_threshold) {
            SHADOW_DARK
        } else {
            SHADOW_LIGHT
        };
        let shadow = RadialGradient::new(centre.x, centre.y, size / 2.0, x, y, 0.0)
            .with_stop(0.0, SHADOW_FROM)
            .with_stop(1.0, rim);
        canvas.fill_circle_gradient(Point::new(centre.x + 1.0, centre.y + 1.0), radius, &shadow);

        // Stud
        canvas.fill_circle(centre, radius, inverted);

        PieceOutcome {
            seams_drawn: self.trace_borders(canvas, piece, index),
        }
    }

    /// Stroke the seams this piece owns. Returns how many were drawn.
    fn trace_borders<C: Canvas + ?Sized>(
        &self,
        canvas: &mut C,
        piece: &Piece,
        index: &mut DedupIndex,
    ) -> usize {
        let (rows, cols) = piece.footprint.span();
        let size = piece.size;
        let mut drawn = 0;

        if piece.idx % rows == 0 {
            let left_x = piece.x + 1 - (rows - 1) * size;
            let left = Seam::vertical(left_x, piece.y, size);
            let right = Seam::vertical(piece.x + size, piece.y, size);
            drawn += stroke_seam(canvas, index, left, LEFT_SEAM_WIDTH, LIGHT_SEAM);
            drawn += stroke_seam(canvas, index, right, DARK_SEAM_WIDTH, DARK_SEAM);
        }

        if piece.idy % cols == 0 {
            let top_y = piece.y + 1 - (cols - 1) * size;
            let top = Seam::horizontal(piece.x, top_y, size);
            let bottom = Seam::horizontal(piece.x, piece.y + size, size);
            drawn += stroke_seam(canvas, index, top, TOP_SEAM_WIDTH, LIGHT_SEAM);
            drawn += stroke_seam(canvas, index, bottom, DARK_SEAM_WIDTH, DARK_SEAM);
        }

        drawn
    }
}

/// Stroke a seam unless another piece already claimed it.
fn stroke_seam<C: Canvas + ?Sized>(
    canvas: &mut C,
    index: &mut DedupIndex,
    seam: Seam,
    width: f32,
    colour: Colour,
) -> usize {
    if !index.claim_seam(seam) {
        return 0;
    }
    let (ex, ey) = seam.end();
    canvas.stroke_line(
        Point::new(seam.x as f32, seam.y as f32),
        Point::new(ex as f32, ey as f32),
        width,
        colour,
    );
    1
}
