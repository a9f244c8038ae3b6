//! brickwork - Toy-brick mosaic generator
//!
//! A library for turning raster images into mosaics of plastic bricks:
//! cells are averaged from a palette-reduced copy of the source, merged
//! into bricks of a fixed catalog by colour similarity, shaded with studs
//! and seams, and finished with a seeded noise texture.

pub mod cli;
pub mod error;
pub mod mosaic;
pub mod output;
pub mod quantize;
pub mod render;
pub mod report;
pub mod types;

pub use error::{BrickError, Result};
pub use mosaic::{Mosaic, NoProgress, Progress, Rendered};
pub use quantize::{KmeansQuantizer, Passthrough, Quantizer};
pub use render::{apply_noise, read_image, write_image, Canvas, RasterCanvas};
pub use report::{write_report, MosaicReport};
pub use types::{CellColour, Colour, Footprint, MosaicConfig, NoiseConfig};
