//! Neighbour-merge classification.
//!
//! For every cell the classifier greedily probes to the right and then
//! downwards, counting how many neighbours are perceptually the same colour.
//! The probe lengths are capped by a random bound drawn per call, which gives
//! the mosaic its mix of brick sizes.

use std::collections::HashSet;

use rand::Rng;

use crate::types::MosaicConfig;

use super::distance::cie94;
use super::sampler::{average_colour, Cell, PixelRect, Raster16};

/// Orientation of a border seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

/// One border segment, keyed by geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seam {
    pub orientation: Orientation,
    pub x: u32,
    pub y: u32,
    pub length: u32,
}

impl Seam {
    pub fn vertical(x: u32, y: u32, length: u32) -> Self {
        Self {
            orientation: Orientation::Vertical,
            x,
            y,
            length,
        }
    }

    pub fn horizontal(x: u32, y: u32, length: u32) -> Self {
        Self {
            orientation: Orientation::Horizontal,
            x,
            y,
            length,
        }
    }

    /// End point of the segment.
    pub fn end(&self) -> (u32, u32) {
        match self.orientation {
            Orientation::Vertical => (self.x, self.y + self.length),
            Orientation::Horizontal => (self.x + self.length, self.y),
        }
    }
}

/// Footprint anchors recorded by earlier merges, and the seams stroked so
/// far. A seam is stroked by whichever piece claims it first. One index
/// lives for exactly one mosaic run.
#[derive(Debug, Default, Clone)]
pub struct DedupIndex {
    anchors: HashSet<(u32, u32)>,
    seams: HashSet<Seam>,
}

impl DedupIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `(x, y)` has been recorded as an anchor.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        self.anchors.contains(&(x, y))
    }

    /// Record an anchor. Returns `false` if it was already present.
    pub fn insert(&mut self, x: u32, y: u32) -> bool {
        self.anchors.insert((x, y))
    }

    /// Claim a seam for stroking. The first claim wins; later claims of the
    /// same segment return `false`.
    pub fn claim_seam(&mut self, seam: Seam) -> bool {
        self.seams.insert(seam)
    }

    /// Number of recorded anchors.
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Number of claimed seams.
    pub fn seam_count(&self) -> usize {
        self.seams.len()
    }
}

/// Result of classifying one cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    /// Merged span along x, in cells.
    pub rows: u32,
    /// Merged span along y, in cells.
    pub cols: u32,
    /// Whether an earlier merge had already recorded this cell as its anchor.
    pub traced: bool,
    /// Anchor recorded for this merge: the last merged cell on each axis.
    pub anchor: (u32, u32),
}

/// Draw a probe bound in `[1, max)`. A maximum of one allows no probing.
fn draw_bound<R: Rng + ?Sized>(rng: &mut R, max: u32) -> u32 {
    if max > 1 {
        rng.gen_range(1..max)
    } else {
        0
    }
}

/// Number of grid cells along an axis of `extent` pixels whose midpoint lies
/// inside the image.
fn grid_cells(extent: u32, size: u32) -> u32 {
    let half = size / 2;
    if size == 0 || extent <= half {
        0
    } else {
        (extent - half - 1) / size + 1
    }
}

/// Largest span up to `span` whose brick still ends inside the grid.
///
/// Bricks are laid out from grid index zero in multiples of their span, so a
/// cell at index `at` belongs to the brick starting at `at - at % span`.
/// A span of five is never valid and becomes four.
fn fit_span(span: u32, at: u32, cells: u32) -> u32 {
    let mut span = span;
    loop {
        if span == 5 {
            span = 4;
        }
        if span <= 1 || at - at % span + span <= cells {
            return span.max(1);
        }
        span -= 1;
    }
}

/// Classify the merge span of `cell`.
///
/// Probe cells whose origin falls outside the raster are not sampled but
/// still extend the span, up to the edge of the grid. The column probe does
/// not run when the row probe hit a colour boundary.
pub fn classify<R: Rng + ?Sized>(
    raster: &Raster16,
    cell: &Cell,
    config: &MosaicConfig,
    rng: &mut R,
    index: &mut DedupIndex,
) -> Classification {
    let row_bound = draw_bound(rng, config.max_rows);
    let col_bound = draw_bound(rng, config.max_cols);

    let origin = cell.colour.to_8bit();
    let similar = |x: u32, y: u32| {
        let probe = average_colour(raster, PixelRect::square(x, y, cell.size));
        cie94(origin, probe.to_8bit()) <= config.threshold
    };

    let mut rows = 1;
    let mut last_x = cell.x;
    let mut row_broken = false;
    for i in 1..=row_bound {
        let x = cell.x + i * cell.size;
        if x < raster.width() {
            if !similar(x, cell.y) {
                row_broken = true;
                break;
            }
            last_x = x;
        }
        rows += 1;
    }

    let mut cols = 1;
    let mut last_y = cell.y;
    if !row_broken {
        for i in 1..=col_bound {
            let y = cell.y + i * cell.size;
            if y < raster.height() {
                if !similar(cell.x, y) {
                    break;
                }
                last_y = y;
            }
            cols += 1;
        }
    }

    // Edge bricks shrink so they never extend past the last grid cell.
    let size = cell.size.max(1);
    let fitted_rows = fit_span(rows, cell.x / size, grid_cells(raster.width(), size));
    cols = fit_span(cols, cell.y / size, grid_cells(raster.height(), size));
    if fitted_rows == 1 && rows > 1 {
        // No catalog brick is one cell wide and two tall.
        cols = 1;
    }
    rows = fitted_rows;
    last_x = last_x.min(cell.x + (rows - 1) * cell.size);
    last_y = last_y.min(cell.y + (cols - 1) * cell.size);

    let traced = index.contains(cell.x, cell.y);
    index.insert(last_x, last_y);

    Classification {
        rows,
        cols,
        traced,
        anchor: (last_x, last_y),
    }
}
