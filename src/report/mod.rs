//! Spreadsheet export.
//!
//! One sheet, a bold header row, then one row per record in the order the
//! records arrived. The image and PDF columns become hyperlinks when a URL
//! was found and hold [`ABSENT_MARKER`] otherwise.
//!
//! Values Excel cannot hold never fail the export: long text is cut at the
//! cell limit and links Excel would reject are written as plain text.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook};

use crate::app::{Result, SitemillError};
use crate::config::ReportConfig;
use crate::domain::{ProductRecord, ABSENT_MARKER};

pub const HEADERS: [&str; 6] = [
    "Product Code",
    "Title",
    "Description",
    "Image Link",
    "PDF Link",
    "Source URL",
];

const COLUMN_WIDTHS: [f64; 6] = [18.0, 40.0, 60.0, 45.0, 45.0, 45.0];

/// Excel's per-cell string limit, in characters
pub const MAX_CELL_CHARS: usize = 32_767;

/// Excel's hyperlink length limit, in characters
pub const MAX_LINK_CHARS: usize = 2_083;

/// How a single cell is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell<'a> {
    Text(&'a str),
    /// Hyperlink whose display text is the URL itself
    Link(&'a str),
}

/// Cells for one record, in [`HEADERS`] order.
pub fn row_cells(record: &ProductRecord) -> [Cell<'_>; 6] {
    [
        text_cell(record.display_code()),
        text_cell(record.display_title()),
        text_cell(record.display_description()),
        link_cell(record.image_link.as_deref()),
        link_cell(record.pdf_link.as_deref()),
        text_cell(&record.source_url),
    ]
}

fn text_cell(text: &str) -> Cell<'_> {
    Cell::Text(truncate_chars(text, MAX_CELL_CHARS))
}

fn link_cell(url: Option<&str>) -> Cell<'_> {
    match url {
        Some(url) if url == ABSENT_MARKER => Cell::Text(ABSENT_MARKER),
        Some(url) if is_linkable(url) => Cell::Link(url),
        Some(url) => {
            tracing::warn!("Writing unlinkable URL as text: {}", truncate_chars(url, 120));
            text_cell(url)
        }
        None => Cell::Text(ABSENT_MARKER),
    }
}

/// Web URLs short enough for an Excel hyperlink.
fn is_linkable(url: &str) -> bool {
    let lower = url.get(..8).unwrap_or(url).to_ascii_lowercase();
    (lower.starts_with("http://") || lower.starts_with("https://"))
        && url.chars().count() <= MAX_LINK_CHARS
}

/// The longest prefix of `text` holding at most `max` characters.
fn truncate_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}

pub struct ReportWriter {
    sheet_name: String,
}

impl ReportWriter {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            sheet_name: config.sheet_name.clone(),
        }
    }

    /// Write `records` to `path`, returning the number of data rows.
    ///
    /// Nothing is written when `records` is empty.
    pub fn write(&self, records: &[ProductRecord], path: &Path) -> Result<usize> {
        if records.is_empty() {
            return Err(SitemillError::EmptyReport);
        }

        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&self.sheet_name)?;

        for (col, (header, width)) in HEADERS.iter().zip(COLUMN_WIDTHS).enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, *header, &header_format)?;
            worksheet.set_column_width(col, width)?;
        }

        for (index, record) in records.iter().enumerate() {
            let row = index as u32 + 1;
            for (col, cell) in row_cells(record).into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    Cell::Text(text) => {
                        worksheet.write_string(row, col, text)?;
                    }
                    Cell::Link(url) => {
                        if let Err(e) = worksheet.write_url(row, col, url).map(|_| ()) {
                            tracing::warn!("Hyperlink rejected for {} ({}), writing text", url, e);
                            worksheet.write_string(row, col, url)?;
                        }
                    }
                }
            }
        }

        workbook.save(path)?;
        tracing::debug!("Wrote {} rows to {}", records.len(), path.display());

        Ok(records.len())
    }
}
