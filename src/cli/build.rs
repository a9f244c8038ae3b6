//! Build command implementation.
//!
//! Reads a source image, renders it as a brick mosaic and writes the result
//! (and optionally a JSON run report).

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;

use crate::error::Result;
use crate::mosaic::Mosaic;
use crate::output::{display_path, plural, Printer, ProgressBar};
use crate::render::{read_image, write_image, OutputFormat};
use crate::report::write_report;
use crate::types::config::{DEFAULT_COLOUR_COUNT, DEFAULT_THRESHOLD};
use crate::types::MosaicConfig;

/// Render an image as a brick mosaic
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Source image
    pub input: PathBuf,

    /// Output image (.png or .jpg)
    #[arg(long, short)]
    pub output: PathBuf,

    /// Cell size in pixels (0 derives it from the image dimensions)
    #[arg(long, default_value_t = 0)]
    pub size: u32,

    /// Number of colours to quantize the source to
    #[arg(long, default_value_t = DEFAULT_COLOUR_COUNT)]
    pub colors: usize,

    /// Seed for brick sizes and noise (default: wall clock)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Noise strength (0 disables noise)
    #[arg(long, default_value_t = 10.0)]
    pub noise: f32,

    /// Longest horizontal brick span, in cells
    #[arg(long, default_value_t = 3)]
    pub max_rows: u32,

    /// Longest vertical brick span, in cells
    #[arg(long, default_value_t = 2)]
    pub max_cols: u32,

    /// Colour distance above which neighbouring cells are not merged
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f32,

    /// Write a JSON run report to this file
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl BuildArgs {
    /// Map the flags onto a mosaic configuration.
    pub fn config(&self) -> MosaicConfig {
        let config = MosaicConfig::new()
            .with_cell_size(self.size)
            .with_colour_count(self.colors)
            .with_max_span(self.max_rows, self.max_cols)
            .with_threshold(self.threshold)
            .with_noise(self.noise);
        match self.seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        }
    }
}

pub fn run(args: BuildArgs, printer: &Printer) -> Result<()> {
    let started = Instant::now();

    // Fail on a bad output path before doing any work
    OutputFormat::from_path(&args.output)?;
    let config = args.config();
    config.validate()?;

    let source = read_image(&args.input)?;
    printer.status(
        "Reading",
        &format!(
            "{} {}",
            display_path(&args.input),
            printer.dim(&format!("({}x{})", source.width(), source.height()))
        ),
    );

    let mosaic = Mosaic::new(config);
    let mut bar = ProgressBar::new(printer);
    let rendered = mosaic.run(&source, &mut bar)?;
    printer.finish_progress();

    let report = &rendered.report;
    printer.info(
        "Composed",
        &format!(
            "{} at {}px cells, {} {}",
            plural(report.bricks, "brick", "bricks"),
            report.cell_size,
            plural(report.seams, "seam", "seams"),
            printer.dim(&format!("(seed {})", report.seed))
        ),
    );
    if report.skipped > 0 {
        printer.warning(
            "Skipped",
            &format!("{} with no matching brick", plural(report.skipped, "cell", "cells")),
        );
    }

    write_image(&rendered.image, &args.output)?;
    printer.status("Writing", &display_path(&args.output));

    if let Some(path) = &args.report {
        write_report(report, path)?;
        printer.status("Writing", &display_path(path));
    }

    printer.success(
        "Finished",
        &format!("in {:.2}s", started.elapsed().as_secs_f32()),
    );

    Ok(())
}
