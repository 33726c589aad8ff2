//! Test fixtures and PDF builders.
//!
//! Provides a builder for synthetic itemized bills, following the
//! Builder pattern for clean test setup.

use anyhow::Result;
use printpdf::*;
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// One line of the end-to-end example bill.
pub const SAMPLE_RECORD: &str = "1 01/JAN/2024 10:00:00 9876543210 00:30 1 1.50";

const LINE_SPACING: f32 = 6.0;
const TOP: f32 = 280.0;
const BOTTOM: f32 = 20.0;

/// Builder for test bills: each entry is one physical text line.
///
/// # Example
///
/// ```no_run
/// # use anyhow::Result;
/// # use std::path::Path;
/// # fn main() -> Result<()> {
/// TestBillBuilder::new()
///     .with_line("1.Local Calls")
///     .with_line("1.a to other mobiles")
///     .with_line("1 01/JAN/2024 10:00:00 9876543210 00:30 1 1.50")
///     .build(Path::new("/tmp/bill.pdf"))?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct TestBillBuilder {
    title: String,
    pages: Vec<Vec<String>>,
}

impl TestBillBuilder {
    pub fn new() -> Self {
        Self {
            title: "Itemized Bill".to_string(),
            pages: vec![Vec::new()],
        }
    }

    /// Adds a line to the current page.
    pub fn with_line(mut self, line: &str) -> Self {
        if let Some(page) = self.pages.last_mut() {
            page.push(line.to_string());
        }
        self
    }

    pub fn with_lines<'a>(self, lines: impl IntoIterator<Item = &'a str>) -> Self {
        lines.into_iter().fold(self, |builder, line| builder.with_line(line))
    }

    /// Starts a new page.
    pub fn page_break(mut self) -> Self {
        self.pages.push(Vec::new());
        self
    }

    /// Adds the usual page furniture of a carrier bill.
    pub fn with_boilerplate(self) -> Self {
        self.with_line("YOUR ITEMIZED STATEMENT")
            .with_line("Relationship number 1234567890")
            .with_line("S.no Date Time Number Duration/volume Pulse Amount")
    }

    /// Builds the PDF and writes it to the specified path. Pages that
    /// overflow continue on a fresh page.
    pub fn build(self, output_path: &Path) -> Result<PathBuf> {
        let (doc, page1, layer1) =
            PdfDocument::new(&self.title, Mm(210.0), Mm(297.0), "Layer 1");
        let font = doc.add_builtin_font(BuiltinFont::Helvetica)?;

        let mut layer = doc.get_page(page1).get_layer(layer1);
        for (index, lines) in self.pages.iter().enumerate() {
            if index > 0 {
                let (page, page_layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
                layer = doc.get_page(page).get_layer(page_layer);
            }

            let mut y = TOP;
            for line in lines {
                if y < BOTTOM {
                    let (page, page_layer) = doc.add_page(Mm(210.0), Mm(297.0), "Layer 1");
                    layer = doc.get_page(page).get_layer(page_layer);
                    y = TOP;
                }
                layer.use_text(line.as_str(), 9.0, Mm(15.0), Mm(y), &font);
                y -= LINE_SPACING;
            }
        }

        doc.save(&mut BufWriter::new(fs::File::create(output_path)?))?;
        Ok(output_path.to_path_buf())
    }
}

impl Default for TestBillBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The single-record local bill from the statement format examples.
pub fn create_sample_bill(path: &Path) -> Result<PathBuf> {
    TestBillBuilder::new()
        .with_boilerplate()
        .with_line("1.Local Calls")
        .with_line("1.a to other mobiles")
        .with_line(SAMPLE_RECORD)
        .with_line("TOTAL 1.50")
        .build(path)
}

/// A record line for `serial` with amount derived from it.
pub fn record_line(serial: u64, number: &str) -> String {
    format!(
        "{} 0{}/FEB/2024 1{}:00:00 {} 0{}:30 {} {}.00",
        serial,
        1 + serial % 9,
        serial % 10,
        number,
        serial % 10,
        1 + serial % 5,
        serial % 7
    )
}

/// Two records printed side by side on one line.
pub fn paired_line(left: &str, right: &str) -> String {
    format!("{}     {}", left, right)
}
