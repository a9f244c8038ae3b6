//! Run statistics.
//!
//! A report summarises one mosaic run and can be written as JSON next to the
//! output image.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{BrickError, Result};
use crate::types::Footprint;

/// Statistics for one mosaic run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MosaicReport {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub seed: u64,
    /// Cells whose midpoint lies inside the image.
    pub cells: usize,
    /// Cells rendered as part of a catalog brick.
    pub bricks: usize,
    /// Cells whose merge span had no catalog entry.
    pub skipped: usize,
    /// Cells an earlier merge had already recorded as its anchor.
    pub traced: usize,
    /// Border seams stroked.
    pub seams: usize,
    /// Rendered cells per footprint name.
    pub footprints: BTreeMap<String, usize>,
}

impl MosaicReport {
    pub fn new(width: u32, height: u32, cell_size: u32, seed: u64) -> Self {
        Self {
            width,
            height,
            cell_size,
            seed,
            ..Self::default()
        }
    }

    /// Count a rendered cell.
    pub fn record(&mut self, footprint: Footprint, seams: usize) {
        self.bricks += 1;
        self.seams += seams;
        *self.footprints.entry(footprint.name()).or_insert(0) += 1;
    }

    /// Count a skipped cell.
    pub fn record_skip(&mut self) {
        self.skipped += 1;
    }

    /// Rendered cells for one footprint.
    pub fn count(&self, footprint: Footprint) -> usize {
        self.footprints.get(&footprint.name()).copied().unwrap_or(0)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| BrickError::Report {
            message: format!("Failed to serialize report: {}", e),
        })
    }
}

/// Write a report as pretty-printed JSON.
pub fn write_report(report: &MosaicReport, path: &Path) -> Result<()> {
    let json = report.to_json()?;
    fs::write(path, json).map_err(|e| BrickError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to write report: {}", e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_record_counts() {
        let mut report = MosaicReport::new(64, 64, 32, 9);
        report.record(Footprint::TwoByTwo, 2);
        report.record(Footprint::TwoByTwo, 0);
        report.record(Footprint::OneByOne, 4);
        report.record_skip();

        assert_eq!(report.bricks, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.seams, 6);
        assert_eq!(report.count(Footprint::TwoByTwo), 2);
        assert_eq!(report.count(Footprint::SixByTwo), 0);
    }

    #[test]
    fn test_write_report_json() {
        let mut report = MosaicReport::new(10, 20, 5, 1);
        report.cells = 8;
        report.record(Footprint::ThreeByOne, 1);

        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        write_report(&report, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();

        assert_eq!(parsed["width"], 10);
        assert_eq!(parsed["height"], 20);
        assert_eq!(parsed["cell_size"], 5);
        assert_eq!(parsed["cells"], 8);
        assert_eq!(parsed["traced"], 0);
        assert_eq!(parsed["footprints"]["3x1"], 1);
    }
}
