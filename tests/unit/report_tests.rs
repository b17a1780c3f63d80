/*!
 * Tests for report layout and PDF output
 */

use lopdf::content::Content;
use lopdf::{Document, Object};

use kyra::report::{layout_report, render_report, LINE_ADVANCE, PAGE_BOTTOM, PAGE_TOP};
use kyra::ReportRow;

fn sample_rows(n: usize) -> Vec<ReportRow> {
    (0..n)
        .map(|i| ReportRow::new(format!("Name{}", i), format!("n{}@x.com", i), "Acme", "1 month", "", 1))
        .collect()
}

/// Text shown by each page of a rendered PDF, one entry per `Tj`
fn pdf_page_texts(bytes: &[u8]) -> Vec<Vec<String>> {
    let doc = Document::load_mem(bytes).unwrap();
    doc.get_pages()
        .values()
        .map(|&page_id| {
            let content = Content::decode(&doc.get_page_content(page_id).unwrap()).unwrap();
            content
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| match op.operands.first() {
                    Some(Object::String(text, _)) => {
                        Some(Document::decode_text(Some("WinAnsiEncoding"), text))
                    }
                    _ => None,
                })
                .collect()
        })
        .collect()
}

fn render_to_bytes(rows: &[ReportRow]) -> Vec<u8> {
    render_report(rows).unwrap().unwrap().into_bytes().unwrap()
}

/// Every field of the row ends up on the single line
#[test]
fn test_layout_withAliceRow_shouldProduceOneLine() {
    let rows = vec![ReportRow::new("Alice", "a@x.com", "Acme", "3 months", "Great", 2)];

    let layout = layout_report(&rows);

    assert_eq!(layout.line_count(), 1);
    let text = &layout.pages[0].lines[0].text;
    for needle in ["Alice", "a@x.com", "Acme", "3 months", "Great", "2"] {
        assert!(text.contains(needle));
    }
}

/// 41 rows span exactly two pages
#[test]
fn test_layout_withFortyOneRows_shouldUseTwoPages() {
    let layout = layout_report(&sample_rows(41));
    assert_eq!(layout.page_count(), 2);
}

/// Every baseline stays inside the printable band
#[test]
fn test_layout_baselines_shouldStayAbovePageBottom() {
    let layout = layout_report(&sample_rows(95));

    assert!(layout.lines().all(|l| l.y >= PAGE_BOTTOM && l.y <= PAGE_TOP));
    for page in &layout.pages {
        for pair in page.lines.windows(2) {
            assert_eq!(pair[0].y - pair[1].y, LINE_ADVANCE);
        }
    }
    assert_eq!(layout.line_count(), 95);
}

/// Rendering writes a PDF and cleans up after itself
#[test]
fn test_render_withRows_shouldReturnPdfBytes() {
    let document = render_report(&sample_rows(3)).unwrap().unwrap();
    assert_eq!(document.page_count(), 1);

    let path = document.path().to_path_buf();
    let bytes = document.into_bytes().unwrap();

    assert!(bytes.starts_with(b"%PDF"));
    assert!(!path.exists());
}

/// The written PDF holds one page per layout page and one text run per row
#[test]
fn test_renderedPdf_withFortyOneRows_shouldHaveTwoPages() {
    let pages = pdf_page_texts(&render_to_bytes(&sample_rows(41)));

    assert_eq!(pages.len(), 2);
    assert_eq!(pages[0].len(), 40);
    assert_eq!(pages[1].len(), 1);
    assert!(pages[0][0].starts_with("Name: Name0,"));
    assert!(pages[1][0].starts_with("Name: Name40,"));
}

#[test]
fn test_renderedPdf_withFortyRows_shouldFitOnePage() {
    let pages = pdf_page_texts(&render_to_bytes(&sample_rows(40)));
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].len(), 40);
}

#[test]
fn test_renderedPdf_withAliceRow_shouldContainEveryField() {
    let rows = vec![ReportRow::new("Alice", "a@x.com", "Acme", "3 months", "Great", 2)];

    let pages = pdf_page_texts(&render_to_bytes(&rows));

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0], vec![rows[0].to_string()]);
    for needle in ["Alice", "a@x.com", "Acme", "3 months", "Great", "2"] {
        assert!(pages[0][0].contains(needle));
    }
}
