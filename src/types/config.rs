//! Mosaic configuration.
//!
//! All tunables of a run live here. The CLI maps its flags one-to-one onto
//! these fields; library callers use the `with_*` builders.

use crate::error::{BrickError, Result};

/// Default number of colours the source is quantized to.
pub const DEFAULT_COLOUR_COUNT: usize = 128;

/// Default CIE94 distance above which two cells stop merging.
pub const DEFAULT_THRESHOLD: f32 = 7.0;

/// Scale applied to the aspect-weighted long side to derive a cell size.
const CELL_SIZE_FACTOR: f64 = 0.015;

/// Noise post-processing settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseConfig {
    /// Perturbation strength in 8-bit channel units. Zero disables noise.
    pub amount: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self { amount: 10.0 }
    }
}

/// Configuration for one mosaic run.
#[derive(Debug, Clone, PartialEq)]
pub struct MosaicConfig {
    /// Cell side in pixels. Zero derives it from the image dimensions.
    pub cell_size: u32,

    /// Number of colours passed to the quantizer.
    pub colour_count: usize,

    /// Upper bound for the horizontal merge span, in cells.
    pub max_rows: u32,

    /// Upper bound for the vertical merge span, in cells.
    pub max_cols: u32,

    /// CIE94 distance above which neighbouring cells are not merged.
    pub threshold: f32,

    /// Inverted channel value above which studs get a dark shadow.
    pub shade_threshold: u8,

    /// Brightness factor applied to the brick base fill.
    pub brightness: f32,

    /// Run seed. `None` draws one from the wall clock.
    pub seed: Option<u64>,

    /// Noise post-processing.
    pub noise: NoiseConfig,
}

impl Default for MosaicConfig {
    fn default() -> Self {
        Self {
            cell_size: 0,
            colour_count: DEFAULT_COLOUR_COUNT,
            max_rows: 3,
            max_cols: 2,
            threshold: DEFAULT_THRESHOLD,
            shade_threshold: 127,
            brightness: 1.0005,
            seed: None,
            noise: NoiseConfig::default(),
        }
    }
}

impl MosaicConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell_size(mut self, cell_size: u32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_colour_count(mut self, colour_count: usize) -> Self {
        self.colour_count = colour_count;
        self
    }

    /// Set both merge span maxima.
    pub fn with_max_span(mut self, max_rows: u32, max_cols: u32) -> Self {
        self.max_rows = max_rows;
        self.max_cols = max_cols;
        self
    }

    pub fn with_threshold(mut self, threshold: f32) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_noise(mut self, amount: f32) -> Self {
        self.noise.amount = amount;
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if self.colour_count == 0 || self.colour_count > 256 {
            return Err(BrickError::Config {
                message: format!("colour count {} is out of range", self.colour_count),
                help: Some("Use a colour count between 1 and 256".to_string()),
            });
        }

        if self.max_rows == 0 || self.max_cols == 0 {
            return Err(BrickError::Config {
                message: format!(
                    "merge span maxima must be at least 1 (got {}x{})",
                    self.max_rows, self.max_cols
                ),
                help: None,
            });
        }

        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(BrickError::Config {
                message: format!("threshold {} is not a valid distance", self.threshold),
                help: Some("CIE94 distances are finite and non-negative".to_string()),
            });
        }

        if !self.noise.amount.is_finite() || self.noise.amount < 0.0 {
            return Err(BrickError::Config {
                message: format!("noise amount {} is invalid", self.noise.amount),
                help: Some("Use 0 to disable noise".to_string()),
            });
        }

        if !self.brightness.is_finite() || self.brightness <= 0.0 {
            return Err(BrickError::Config {
                message: format!("brightness factor {} is invalid", self.brightness),
                help: None,
            });
        }

        Ok(())
    }

    /// Cell size for an image of the given dimensions.
    ///
    /// Uses the configured size when non-zero, otherwise
    /// `round(long / short * long * 0.015)`, never less than one pixel.
    pub fn cell_size_for(&self, width: u32, height: u32) -> u32 {
        if self.cell_size > 0 {
            return self.cell_size;
        }
        derived_cell_size(width, height)
    }
}

/// Aspect-weighted default cell size.
pub fn derived_cell_size(width: u32, height: u32) -> u32 {
    let long = width.max(height) as f64;
    let short = width.min(height).max(1) as f64;
    let size = (long / short * long * CELL_SIZE_FACTOR).round();
    (size as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = MosaicConfig::default();
        assert_eq!(config.cell_size, 0);
        assert_eq!(config.colour_count, 128);
        assert_eq!((config.max_rows, config.max_cols), (3, 2));
        assert_eq!(config.threshold, 7.0);
        assert_eq!(config.noise.amount, 10.0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_derived_cell_size_square() {
        // 1000 / 1000 * 1000 * 0.015 = 15
        assert_eq!(derived_cell_size(1000, 1000), 15);
    }

    #[test]
    fn test_derived_cell_size_elongated() {
        // 800 / 400 * 800 * 0.015 = 24
        assert_eq!(derived_cell_size(800, 400), 24);
        assert_eq!(derived_cell_size(400, 800), 24);
    }

    #[test]
    fn test_derived_cell_size_never_zero() {
        assert_eq!(derived_cell_size(10, 10), 1);
        assert_eq!(derived_cell_size(0, 0), 1);
    }

    #[test]
    fn test_override_wins() {
        let config = MosaicConfig::new().with_cell_size(32);
        assert_eq!(config.cell_size_for(1000, 1000), 32);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        assert!(MosaicConfig::new().with_colour_count(0).validate().is_err());
        assert!(MosaicConfig::new().with_colour_count(300).validate().is_err());
        assert!(MosaicConfig::new().with_max_span(0, 2).validate().is_err());
        assert!(MosaicConfig::new().with_threshold(f32::NAN).validate().is_err());
        assert!(MosaicConfig::new().with_noise(-1.0).validate().is_err());
    }
}
