//! Core types for brickwork.

pub mod colour;
pub mod config;
pub mod footprint;

pub use colour::{CellColour, Colour};
pub use config::{derived_cell_size, MosaicConfig, NoiseConfig};
pub use footprint::Footprint;
