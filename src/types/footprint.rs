//! Brick footprint catalog.
//!
//! A footprint is the `(rows, cols)` span of a brick in cell units, where
//! `rows` counts cells along the x axis and `cols` along the y axis. Only the
//! entries below exist; there is no brick five cells long.

use std::fmt;

/// A brick size from the fixed catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Footprint {
    OneByOne,
    TwoByOne,
    ThreeByOne,
    FourByOne,
    SixByOne,
    TwoByTwo,
    ThreeByTwo,
    FourByTwo,
    SixByTwo,
}

impl Footprint {
    /// Every catalog entry, in catalog order.
    pub const ALL: [Footprint; 9] = [
        Footprint::OneByOne,
        Footprint::TwoByOne,
        Footprint::ThreeByOne,
        Footprint::FourByOne,
        Footprint::SixByOne,
        Footprint::TwoByTwo,
        Footprint::ThreeByTwo,
        Footprint::FourByTwo,
        Footprint::SixByTwo,
    ];

    /// Look up the catalog entry for a merge span.
    ///
    /// Returns `None` for spans with no matching brick (e.g. `1x2`).
    pub fn from_span(rows: u32, cols: u32) -> Option<Self> {
        match (rows, cols) {
            (1, 1) => Some(Footprint::OneByOne),
            (2, 1) => Some(Footprint::TwoByOne),
            (3, 1) => Some(Footprint::ThreeByOne),
            (4, 1) => Some(Footprint::FourByOne),
            (6, 1) => Some(Footprint::SixByOne),
            (2, 2) => Some(Footprint::TwoByTwo),
            (3, 2) => Some(Footprint::ThreeByTwo),
            (4, 2) => Some(Footprint::FourByTwo),
            (6, 2) => Some(Footprint::SixByTwo),
            _ => None,
        }
    }

    /// Span along the x axis, in cells.
    pub fn rows(self) -> u32 {
        self.span().0
    }

    /// Span along the y axis, in cells.
    pub fn cols(self) -> u32 {
        self.span().1
    }

    /// `(rows, cols)` pair.
    pub fn span(self) -> (u32, u32) {
        match self {
            Footprint::OneByOne => (1, 1),
            Footprint::TwoByOne => (2, 1),
            Footprint::ThreeByOne => (3, 1),
            Footprint::FourByOne => (4, 1),
            Footprint::SixByOne => (6, 1),
            Footprint::TwoByTwo => (2, 2),
            Footprint::ThreeByTwo => (3, 2),
            Footprint::FourByTwo => (4, 2),
            Footprint::SixByTwo => (6, 2),
        }
    }

    /// Number of cells covered.
    pub fn area(self) -> u32 {
        let (rows, cols) = self.span();
        rows * cols
    }

    /// Short name, e.g. `"3x2"`.
    pub fn name(self) -> String {
        let (rows, cols) = self.span();
        format!("{}x{}", rows, cols)
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (rows, cols) = self.span();
        write!(f, "{}x{}", rows, cols)
    }
}
