//! Catalog command: prints the brick footprints the classifier can emit.

use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::types::Footprint;

/// List the brick footprint catalog
#[derive(Args, Debug)]
pub struct CatalogArgs {}

pub fn run(_args: CatalogArgs, printer: &Printer) -> Result<()> {
    printer.status("Listing", &plural(Footprint::ALL.len(), "footprint", "footprints"));

    for line in catalog_lines() {
        println!("{}", line);
    }

    Ok(())
}

/// One line per footprint: name, span along x and y, and cell count.
fn catalog_lines() -> Vec<String> {
    Footprint::ALL
        .iter()
        .map(|f| format!("{:<4} {} x {} cells ({})", f.name(), f.rows(), f.cols(), f.area()))
        .collect()
}
