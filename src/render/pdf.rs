//! printpdf rendering of a [`StatementLayout`].
//!
//! The table style is fixed: grey header row with light bold text,
//! white body rows with black text, a 1pt black grid, every cell
//! centred. Long tables continue on new pages with the header repeated.
//! Body text wider than its column wraps and the row grows to fit.

use super::layout::{BucketTable, StatementLayout};
use crate::error::{StatementError, StatementResult};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Statement title, also used as the document title.
pub const TITLE: &str = "YOUR ITEMIZED STATEMENT";

/// Header cells in column order. `\n` splits a cell over two lines.
pub const COLUMN_HEADERS: [&str; 8] = [
    "Sr No.",
    "Date",
    "Time",
    "Number",
    "Name",
    "Duration/\nvolume",
    "Pulse",
    "Amount",
];

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN_PT: f32 = 30.0;

/// Column widths in millimetres; they sum to the A4 width less margins.
const COLUMN_WIDTHS: [f32; 8] = [14.0, 26.0, 22.0, 26.0, 40.0, 22.0, 14.0, 24.83];

const TITLE_SIZE: f32 = 16.0;
const TITLE_SPACE_AFTER_PT: f32 = 20.0;
const TITLE_SPACER_PT: f32 = 20.0;

const HEADING_SIZE: f32 = 14.0;
const HEADING_SPACE_BEFORE_PT: f32 = 20.0;
const HEADING_SPACE_AFTER_PT: f32 = 10.0;

const HEADER_FONT_SIZE: f32 = 10.0;
const BODY_FONT_SIZE: f32 = 9.0;
const CELL_PADDING_PT: f32 = 3.0;
const HEADER_BOTTOM_PADDING_PT: f32 = 12.0;
const GRID_THICKNESS_PT: f32 = 1.0;
const LEADING: f32 = 1.2;
const TABLE_SPACER_PT: f32 = 10.0;

fn pt(points: f32) -> f32 {
    points * 25.4 / 72.0
}

fn margin() -> f32 {
    pt(MARGIN_PT)
}

fn grey() -> Color {
    Color::Rgb(Rgb::new(0.502, 0.502, 0.502, None))
}

fn whitesmoke() -> Color {
    Color::Rgb(Rgb::new(0.961, 0.961, 0.961, None))
}

fn white() -> Color {
    Color::Rgb(Rgb::new(1.0, 1.0, 1.0, None))
}

fn black() -> Color {
    Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None))
}

/// Renders statements to PDF files.
#[derive(Debug, Clone, Default)]
pub struct StatementRenderer;

impl StatementRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Renders `layout` to `output`, replacing any existing file.
    ///
    /// The document is written to a temporary sibling first and renamed
    /// into place, so `output` only ever holds a complete statement.
    /// Returns the number of pages written.
    pub fn write(&self, layout: &StatementLayout, output: &Path) -> StatementResult<usize> {
        if layout.is_empty() {
            return Err(StatementError::InvalidInput {
                parameter: "layout".to_string(),
                reason: "Statement has no rows to render".to_string(),
            });
        }

        let partial = partial_path(output);
        let result = self.write_to(layout, &partial).and_then(|pages| {
            fs::rename(&partial, output).map_err(|e| StatementError::OutputWrite {
                path: output.to_path_buf(),
                source: e,
            })?;
            Ok(pages)
        });

        if result.is_err() {
            let _ = fs::remove_file(&partial);
        }
        result
    }

    fn write_to(&self, layout: &StatementLayout, path: &Path) -> StatementResult<usize> {
        let (doc, page, layer) =
            PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let fonts = Fonts {
            regular: doc.add_builtin_font(BuiltinFont::Helvetica)?,
            bold: doc.add_builtin_font(BuiltinFont::HelveticaBold)?,
        };

        let mut cursor = PageCursor {
            layer: doc.get_page(page).get_layer(layer),
            doc: &doc,
            y: PAGE_HEIGHT - margin(),
            pages: 1,
        };

        cursor.heading(TITLE, TITLE_SIZE, 0.0, TITLE_SPACE_AFTER_PT, &fonts.bold);
        cursor.y -= pt(TITLE_SPACER_PT);

        for group in &layout.groups {
            cursor.keep_with_table(HEADING_SIZE);
            cursor.heading(
                group.category.heading(),
                HEADING_SIZE,
                HEADING_SPACE_BEFORE_PT,
                HEADING_SPACE_AFTER_PT,
                &fonts.bold,
            );

            for table in &group.tables {
                cursor.keep_with_table(HEADING_SIZE);
                cursor.heading(
                    table.bucket.heading(),
                    HEADING_SIZE,
                    HEADING_SPACE_BEFORE_PT,
                    HEADING_SPACE_AFTER_PT,
                    &fonts.bold,
                );
                cursor.table(table, &fonts);
                cursor.y -= pt(TABLE_SPACER_PT);
            }
        }

        let pages = cursor.pages;
        debug!(pages, path = %path.display(), "saving statement");

        let file = File::create(path).map_err(|e| StatementError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer)?;
        let file = writer.into_inner().map_err(|e| StatementError::OutputWrite {
            path: path.to_path_buf(),
            source: e.into_error(),
        })?;
        file.sync_all().map_err(|e| StatementError::OutputWrite {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(pages)
    }
}

fn partial_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "statement.pdf".to_string());
    output.with_file_name(format!(".{}.partial", name))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Tracks the current page and vertical position, in millimetres from
/// the bottom edge.
struct PageCursor<'a> {
    doc: &'a PdfDocumentReference,
    layer: PdfLayerReference,
    y: f32,
    pages: usize,
}

impl PageCursor<'_> {
    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = PAGE_HEIGHT - margin();
        self.pages += 1;
    }

    fn has_room(&self, height: f32) -> bool {
        self.y - height >= margin()
    }

    /// Breaks the page unless a heading, the table header and one body
    /// row fit together.
    fn keep_with_table(&mut self, heading_size: f32) {
        let needed = pt(HEADING_SPACE_BEFORE_PT + heading_size * LEADING + HEADING_SPACE_AFTER_PT)
            + header_row_height()
            + body_row_height(1);
        if !self.has_room(needed) {
            self.new_page();
        }
    }

    fn heading(
        &mut self,
        text: &str,
        size: f32,
        space_before_pt: f32,
        space_after_pt: f32,
        font: &IndirectFontRef,
    ) {
        // Space before is dropped at the top of a page.
        if self.y < PAGE_HEIGHT - margin() {
            self.y -= pt(space_before_pt);
        }
        let baseline = self.y - pt(size);
        self.layer.set_fill_color(black());
        self.layer
            .use_text(text, size, Mm(margin()), Mm(baseline), font);
        self.y -= pt(size * LEADING + space_after_pt);
    }

    fn table(&mut self, table: &BucketTable, fonts: &Fonts) {
        self.header_row(fonts);
        for record in &table.rows {
            let cells: Vec<Vec<String>> = record
                .cells()
                .iter()
                .zip(COLUMN_WIDTHS)
                .map(|(cell, width)| {
                    wrap_to_width(cell, content_width(width), BODY_FONT_SIZE, false)
                })
                .collect();
            let height = body_row_height(cells.iter().map(Vec::len).max().unwrap_or(1));

            if !self.has_room(height) {
                self.new_page();
                self.header_row(fonts);
            }
            let mut x = margin();
            for (lines, width) in cells.iter().zip(COLUMN_WIDTHS) {
                let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
                self.cell(x, width, height, &lines, CellStyle::body(), &fonts.regular);
                x += width;
            }
            self.y -= height;
        }
    }

    fn header_row(&mut self, fonts: &Fonts) {
        let height = header_row_height();
        let mut x = margin();
        for (label, width) in COLUMN_HEADERS.iter().zip(COLUMN_WIDTHS) {
            let lines: Vec<&str> = label.split('\n').collect();
            self.cell(x, width, height, &lines, CellStyle::header(), &fonts.bold);
            x += width;
        }
        self.y -= height;
    }

    /// Draws one cell whose top-left corner is at (`x`, `self.y`).
    fn cell(
        &self,
        x: f32,
        width: f32,
        height: f32,
        lines: &[&str],
        style: CellStyle,
        font: &IndirectFontRef,
    ) {
        let top = self.y;
        let bottom = top - height;
        let corners = vec![
            (Point::new(Mm(x), Mm(bottom)), false),
            (Point::new(Mm(x + width), Mm(bottom)), false),
            (Point::new(Mm(x + width), Mm(top)), false),
            (Point::new(Mm(x), Mm(top)), false),
        ];

        self.layer.set_fill_color(style.background);
        self.layer.add_polygon(Polygon {
            rings: vec![corners.clone()],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        });

        self.layer.set_outline_color(black());
        self.layer.set_outline_thickness(GRID_THICKNESS_PT);
        self.layer.add_line(Line {
            points: corners,
            is_closed: true,
        });

        // Centre the text block inside the padded content box.
        let line_height = pt(style.font_size * LEADING);
        let content_top = top - pt(CELL_PADDING_PT);
        let content_bottom = bottom + pt(style.bottom_padding_pt);
        let block = line_height * lines.len() as f32;
        let mut baseline = content_bottom
            + (content_top - content_bottom + block) / 2.0
            - pt(style.font_size);

        self.layer.set_fill_color(style.text);
        for line in lines {
            let text_x = x + (width - text_width(line, style.font_size, style.bold)) / 2.0;
            self.layer
                .use_text(*line, style.font_size, Mm(text_x), Mm(baseline), font);
            baseline -= line_height;
        }
    }
}

struct CellStyle {
    background: Color,
    text: Color,
    font_size: f32,
    bold: bool,
    bottom_padding_pt: f32,
}

impl CellStyle {
    fn header() -> Self {
        Self {
            background: grey(),
            text: whitesmoke(),
            font_size: HEADER_FONT_SIZE,
            bold: true,
            bottom_padding_pt: HEADER_BOTTOM_PADDING_PT,
        }
    }

    fn body() -> Self {
        Self {
            background: white(),
            text: black(),
            font_size: BODY_FONT_SIZE,
            bold: false,
            bottom_padding_pt: CELL_PADDING_PT,
        }
    }
}

fn header_row_height() -> f32 {
    let lines = COLUMN_HEADERS
        .iter()
        .map(|label| label.split('\n').count())
        .max()
        .unwrap_or(1) as f32;
    pt(CELL_PADDING_PT + HEADER_FONT_SIZE * LEADING * lines + HEADER_BOTTOM_PADDING_PT)
}

fn body_row_height(lines: usize) -> f32 {
    pt(CELL_PADDING_PT * 2.0 + BODY_FONT_SIZE * LEADING * lines.max(1) as f32)
}

fn content_width(column_width: f32) -> f32 {
    column_width - 2.0 * pt(CELL_PADDING_PT)
}

/// Approximate Helvetica advance width of `text`, in millimetres.
///
/// Builtin fonts carry no metrics in printpdf, so widths come from the
/// standard AFM values, rounded up where glyphs in a class differ.
fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let em: f32 = text
        .chars()
        .map(|c| match c {
            '0'..='9' => 0.556,
            ' ' | '.' | ',' | ':' | '/' => 0.278,
            'i' | 'j' | 'l' if bold => 0.278,
            'i' | 'j' | 'l' => 0.222,
            'f' | 't' | 'I' => 0.333,
            'r' => 0.389,
            'm' => 0.889,
            'w' => 0.778,
            'M' => 0.833,
            'W' => 0.944,
            'A'..='Z' => 0.778,
            'a'..='z' if bold => 0.611,
            'a'..='z' => 0.556,
            _ => 1.0,
        })
        .sum();
    pt(em * size)
}

/// Splits `text` at whitespace into lines no wider than `max_width`
/// millimetres. A word wider than the column is broken between characters.
/// Always returns at least one line.
fn wrap_to_width(text: &str, max_width: f32, size: f32, bold: bool) -> Vec<String> {
    let fits = |candidate: &str| text_width(candidate, size, bold) <= max_width;
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() && fits(word) {
            current.push_str(word);
            continue;
        }
        let joined = format!("{current} {word}");
        if !current.is_empty() && fits(&joined) {
            current = joined;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        for c in word.chars() {
            current.push(c);
            if current.chars().count() > 1 && !fits(&current) {
                current.pop();
                lines.push(std::mem::replace(&mut current, c.to_string()));
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
