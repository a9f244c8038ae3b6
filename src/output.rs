//! Terminal output for the brickwork CLI.
//!
//! Status lines are printed Cargo-style with a right-aligned coloured verb.
//! Everything here writes to stderr; stdout carries only command output
//! such as the footprint catalog.

use std::io::{self, IsTerminal, Write};

use crate::mosaic::Progress;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";

/// Verbs are right-aligned to this column.
const VERB_WIDTH: usize = 12;

/// Percentage covered by one bar segment.
const BAR_STEP: usize = 3;

/// Stderr status printer. Uses ANSI colour only when stderr is a terminal.
pub struct Printer {
    color: bool,
}

impl Default for Printer {
    fn default() -> Self {
        Self::new()
    }
}

impl Printer {
    pub fn new() -> Self {
        Self {
            color: io::stderr().is_terminal(),
        }
    }

    /// Green verb, e.g. `     Reading photo.jpg (640x480)`.
    pub fn status(&self, verb: &str, message: &str) {
        self.emit("", GREEN, verb, message, "\n");
    }

    pub fn success(&self, verb: &str, message: &str) {
        self.emit("", GREEN, verb, message, "\n");
    }

    /// Cyan verb for run details.
    pub fn info(&self, verb: &str, message: &str) {
        self.emit("", CYAN, verb, message, "\n");
    }

    pub fn warning(&self, verb: &str, message: &str) {
        self.emit("", YELLOW, verb, message, "\n");
    }

    /// Wrap `text` in the dim style.
    pub fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    /// Redraw the progress bar in place.
    pub fn progress(&self, percent: f32) {
        self.emit("\r", CYAN, "Composing", &progress_line(percent), "");
    }

    /// Move past the progress bar line.
    pub fn finish_progress(&self) {
        let _ = writeln!(io::stderr());
    }

    fn paint(&self, style: &str, text: &str) -> String {
        if self.color {
            format!("{style}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Write one verb-aligned line between `start` and `end`.
    fn emit(&self, start: &str, color: &str, verb: &str, message: &str, end: &str) {
        let verb = self.paint(&format!("{BOLD}{color}"), &format!("{verb:>VERB_WIDTH$}"));
        let mut stderr = io::stderr().lock();
        let _ = write!(stderr, "{start}{verb} {message}{end}");
        let _ = stderr.flush();
    }
}

/// Progress sink that draws through a [`Printer`].
pub struct ProgressBar<'a> {
    printer: &'a Printer,
}

impl<'a> ProgressBar<'a> {
    pub fn new(printer: &'a Printer) -> Self {
        Self { printer }
    }
}

impl Progress for ProgressBar<'_> {
    fn report(&mut self, percent: f32) {
        self.printer.progress(percent);
    }
}

/// Bar text for a percentage: a segment every few percent, lit once the
/// percentage passes it.
fn progress_line(percent: f32) -> String {
    let percent = percent.clamp(0.0, 100.0);
    let bar: String = (0..100)
        .step_by(BAR_STEP)
        .map(|step| if percent > step as f32 { '=' } else { ' ' })
        .collect();
    format!("[{}] {:.0}%", bar, percent)
}

/// Pluralize a count: `plural(1, "brick", "bricks")` → "1 brick".
pub fn plural(n: usize, singular: &str, pluralized: &str) -> String {
    if n == 1 {
        format!("{} {}", n, singular)
    } else {
        format!("{} {}", n, pluralized)
    }
}

/// Return a relative display path when possible, absolute otherwise.
pub fn display_path(path: &std::path::Path) -> String {
    if let Ok(cwd) = std::env::current_dir() {
        if let Ok(relative) = path.strip_prefix(&cwd) {
            let s = relative.display().to_string();
            if s.is_empty() {
                return ".".to_string();
            }
            return s;
        }
    }
    path.display().to_string()
}
