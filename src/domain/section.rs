//! Section headers and output buckets.
//!
//! Itemized bills scope their call rows under headers such as
//! `1.Local Calls` and `2.a to airtel mobile`. Five headers are
//! recognised; they collapse to three buckets, which in turn belong to
//! one of two top-level categories in the rendered statement.

use std::fmt;

/// Lines containing any of these are layout noise, never data.
const BOILERPLATE_MARKERS: &[&str] = &[
    "S.no",
    "YOUR ITEMIZED",
    "volume",
    "Relationship number",
    "TOTAL",
    "Page",
    "Airtel",
];

const AIRTEL_PREFIXES: &[&str] = &["944", "945", "946", "947", "948", "949"];

/// A section header recognised in the source bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    LocalCalls,
    StdCalls,
    LocalMobile,
    StdAirtel,
    StdOther,
}

impl Section {
    /// Detection order. A line is tested against each marker in turn.
    pub const ALL: [Section; 5] = [
        Section::LocalCalls,
        Section::StdCalls,
        Section::LocalMobile,
        Section::StdAirtel,
        Section::StdOther,
    ];

    /// The exact, case-sensitive substring that introduces this section.
    pub fn marker(self) -> &'static str {
        match self {
            Self::LocalCalls => "1.Local Calls",
            Self::StdCalls => "2.STD Calls",
            Self::LocalMobile => "1.a to other mobiles",
            Self::StdAirtel => "2.a to airtel mobile",
            Self::StdOther => "2.b to other mobiles",
        }
    }

    /// Returns the section a header line switches to, if it is one.
    pub fn detect(line: &str) -> Option<Section> {
        Self::ALL
            .into_iter()
            .find(|section| line.contains(section.marker()))
    }

    /// Collapses the header to the bucket its records are rendered under.
    ///
    /// Top-level headers stand in for their default subsection: local
    /// calls go to "other mobiles", STD calls without an Airtel subheader
    /// go to "2.b to other mobiles".
    pub fn bucket(self) -> Bucket {
        match self {
            Self::LocalCalls | Self::LocalMobile => Bucket::LocalMobile,
            Self::StdAirtel => Bucket::StdAirtel,
            Self::StdCalls | Self::StdOther => Bucket::StdOther,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.marker())
    }
}

/// Top-level grouping in the rendered statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    LocalCalls,
    StdCalls,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::LocalCalls, Category::StdCalls];

    pub fn heading(self) -> &'static str {
        match self {
            Self::LocalCalls => "1.Local Calls",
            Self::StdCalls => "2.STD Calls",
        }
    }

    /// Buckets rendered under this category, in output order.
    pub fn buckets(self) -> &'static [Bucket] {
        match self {
            Self::LocalCalls => &[Bucket::LocalMobile],
            Self::StdCalls => &[Bucket::StdAirtel, Bucket::StdOther],
        }
    }
}

/// One of the three output tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    LocalMobile,
    StdAirtel,
    StdOther,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::LocalMobile, Bucket::StdAirtel, Bucket::StdOther];

    pub fn heading(self) -> &'static str {
        match self {
            Self::LocalMobile => "1.a to other mobiles",
            Self::StdAirtel => "2.a to airtel mobile",
            Self::StdOther => "2.b to other mobiles",
        }
    }

    pub fn category(self) -> Category {
        match self {
            Self::LocalMobile => Category::LocalCalls,
            Self::StdAirtel | Self::StdOther => Category::StdCalls,
        }
    }

    /// Guesses a bucket from the dialled number alone.
    ///
    /// Numbers starting with `99` count as local and always land in
    /// "to other mobiles", Airtel prefix or not. Confirm with the bill
    /// owner before making the local branch carrier-aware.
    pub fn classify_number(number: &str) -> Bucket {
        if number.starts_with("99") {
            if is_airtel_number(number) {
                return Bucket::LocalMobile;
            }
            Bucket::LocalMobile
        } else if is_airtel_number(number) {
            Bucket::StdAirtel
        } else {
            Bucket::StdOther
        }
    }
}

impl fmt::Display for Bucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.heading())
    }
}

/// Returns true if the line is page furniture (column headers, totals,
/// page footers, carrier branding).
pub fn is_boilerplate(line: &str) -> bool {
    BOILERPLATE_MARKERS
        .iter()
        .any(|marker| line.contains(marker))
}

/// Simplified Airtel check based on the leading three digits.
pub fn is_airtel_number(number: &str) -> bool {
    AIRTEL_PREFIXES
        .iter()
        .any(|prefix| number.starts_with(prefix))
}
