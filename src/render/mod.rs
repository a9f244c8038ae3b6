//! Rendering module for brickwork.
//!
//! This module holds the drawing surface abstraction and its raster backend,
//! the per-brick piece renderer, the noise post-processor and image file I/O.

mod canvas;
mod encode;
mod gradient;
mod noise;
mod piece;
mod raster;

pub use canvas::{Canvas, Point, Rect};
pub use encode::{read_image, write_image, OutputFormat, JPEG_QUALITY};
pub use gradient::{ColourStop, RadialGradient};
pub use noise::{apply_noise, Lehmer};
pub use piece::{Piece, PieceOutcome, PieceRenderer};
pub use raster::RasterCanvas;
