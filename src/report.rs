/*!
 * PDF report generation.
 *
 * Report rows are first laid out into pages of fixed-position text lines,
 * then written into an A4 PDF held in a temporary file. The layout step is
 * a literal transcription: rows are neither sorted nor filtered.
 */

use log::{debug, info};
use printpdf::{BuiltinFont, Mm, PdfDocument, Pt};
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

use crate::database::ReportRow;
use crate::errors::ReportError;

/// Filename offered for download
pub const REPORT_FILENAME: &str = "internship_report.pdf";

/// Content type of the report payload
pub const REPORT_CONTENT_TYPE: &str = "application/pdf";

/// Document title stored in the PDF metadata
pub const REPORT_TITLE: &str = "Internship Report";

/// Baseline of the first line on every page, in points from the bottom
pub const PAGE_TOP: f32 = 800.0;

/// Lowest baseline still written on a page
pub const PAGE_BOTTOM: f32 = 20.0;

/// Vertical advance per line
pub const LINE_ADVANCE: f32 = 20.0;

/// Left margin of every line
pub const LEFT_MARGIN: f32 = 30.0;

/// Helvetica size used for every line
pub const FONT_SIZE: f32 = 12.0;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const LAYER_NAME: &str = "Layer 1";

/// A single line of text placed on a page
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub x: f32,
    pub y: f32,
    pub text: String,
}

/// One page worth of lines
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub lines: Vec<ReportLine>,
}

/// Pages in output order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportLayout {
    pub pages: Vec<ReportPage>,
}

impl ReportLayout {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// All lines, page by page
    pub fn lines(&self) -> impl Iterator<Item = &ReportLine> {
        self.pages.iter().flat_map(|p| p.lines.iter())
    }
}

/// Place one line per row, breaking pages when the cursor drops below
/// `PAGE_BOTTOM`
///
/// No rows means no pages.
pub fn layout_report(rows: &[ReportRow]) -> ReportLayout {
    let mut layout = ReportLayout::default();
    let mut page = ReportPage::default();
    let mut y = PAGE_TOP;

    for row in rows {
        if y < PAGE_BOTTOM {
            layout.pages.push(std::mem::take(&mut page));
            y = PAGE_TOP;
        }
        page.lines.push(ReportLine {
            x: LEFT_MARGIN,
            y,
            text: row.to_string(),
        });
        y -= LINE_ADVANCE;
    }

    if !page.lines.is_empty() {
        layout.pages.push(page);
    }

    layout
}

/// A rendered report living in a temporary file
///
/// The file is removed by `into_bytes`, or when the document is dropped.
#[derive(Debug)]
pub struct ReportDocument {
    file: NamedTempFile,
    page_count: usize,
}

impl ReportDocument {
    /// Location of the temporary PDF
    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Read the PDF and delete the temporary file
    pub fn into_bytes(self) -> Result<Vec<u8>, ReportError> {
        let bytes = std::fs::read(self.file.path())?;
        self.file.close()?;
        Ok(bytes)
    }
}

/// Render report rows into a PDF
///
/// Returns `None` without touching the filesystem when there are no rows.
pub fn render_report(rows: &[ReportRow]) -> Result<Option<ReportDocument>, ReportError> {
    let layout = layout_report(rows);
    if layout.pages.is_empty() {
        debug!("No report rows, skipping document creation");
        return Ok(None);
    }

    let mut file = tempfile::Builder::new()
        .prefix("internship_report_")
        .suffix(".pdf")
        .tempfile()?;

    write_pdf(&layout, file.as_file_mut())?;

    info!(
        "Generated report with {} line(s) on {} page(s) at {:?}",
        layout.line_count(),
        layout.page_count(),
        file.path()
    );

    Ok(Some(ReportDocument {
        file,
        page_count: layout.page_count(),
    }))
}

/// Write a laid-out report as PDF into `target`
fn write_pdf<W: Write>(layout: &ReportLayout, target: W) -> Result<(), ReportError> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        REPORT_TITLE,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        LAYER_NAME,
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;

    let mut first = Some((first_page, first_layer));
    for page in &layout.pages {
        let (page_index, layer_index) = match first.take() {
            Some(ids) => ids,
            None => doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME),
        };
        let layer = doc.get_page(page_index).get_layer(layer_index);

        for line in &page.lines {
            layer.use_text(
                line.text.clone(),
                FONT_SIZE,
                Mm::from(Pt(line.x)),
                Mm::from(Pt(line.y)),
                &font,
            );
        }
    }

    let mut writer = BufWriter::new(target);
    doc.save(&mut writer)
        .map_err(|e| ReportError::Pdf(e.to_string()))?;
    writer.flush()?;

    Ok(())
}
