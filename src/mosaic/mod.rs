//! Mosaic construction.
//!
//! The pipeline samples the quantized raster cell by cell, merges runs of
//! perceptually similar cells into brick footprints and hands each cell to
//! the piece renderer.

mod classify;
mod distance;
mod driver;
mod sampler;

pub use classify::{classify, Classification, DedupIndex, Orientation, Seam};
pub use distance::{cie94, to_lab};
pub use driver::{Mosaic, NoProgress, Progress, Rendered};
pub use sampler::{average_colour, Cell, PixelRect, Raster16};
