//! Document assembly: classified blocks + metadata → packed DOCX bytes.
//!
//! The document has a fixed shape regardless of the input:
//!
//! ```text
//! title page  ──  centered title / subtitle / project name + labeled rows
//! page break
//! Index       ──  static twelve-entry table of contents
//! page break
//! Activity Report heading + fixed introduction
//! rendered body (from the classified Markdown)
//! page break
//! Conclusion heading + fixed closing paragraph
//! ```
//!
//! The index is deliberately *not* derived from the input headings: the
//! report template prescribes the section list, and the body is expected to
//! follow it. Deriving it would turn typos in the notes into typos in the
//! table of contents.

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BreakType, Docx, PageMargin, Paragraph, Run, RunFonts, Style, StyleType,
};
use tracing::debug;

use crate::config::ReportStyles;
use crate::error::ReportError;
use crate::meta::ReportMeta;
use crate::pipeline::markdown::Block;

/// The static table of contents written under the "Index" heading.
const INDEX_SECTIONS: [&str; 12] = [
    "1. Overview",
    "2. Technology Stack",
    "3. Repository Structure",
    "4. Functional Modules",
    "5. Data Storage",
    "6. Business Rules",
    "7. Input Validation",
    "8. Configuration & Runtime",
    "9. Security Notes",
    "10. Development Tasks & Fixes Applied",
    "11. Known Limitations & Suggested Enhancements",
    "12. How to Run",
];

/// Assemble the full report document and pack it to DOCX bytes.
///
/// Pure with respect to its arguments: the same blocks, metadata, and styles
/// always produce the same document structure.
pub fn build_document(
    blocks: &[Block],
    meta: &ReportMeta,
    styles: &ReportStyles,
) -> Result<Vec<u8>, ReportError> {
    let margin = styles.margin_twips();

    let mut docx = Docx::new()
        .page_margin(
            PageMargin::new()
                .top(margin)
                .bottom(margin)
                .left(margin)
                .right(margin),
        )
        // Base style: everything that does not override it inherits this,
        // and the East-Asian font is pinned to the same family because Word
        // substitutes its own choice for CJK runs otherwise.
        .default_fonts(
            RunFonts::new()
                .ascii(&styles.body_font)
                .east_asia(&styles.body_font),
        )
        .default_size(styles.body_size_pt * 2)
        .add_style(heading_style("Heading1", "heading 1", styles.heading1_size_pt))
        .add_style(heading_style("Heading2", "heading 2", styles.heading2_size_pt))
        .add_style(heading_style("Heading3", "heading 3", styles.heading3_size_pt));

    // ── Title page ───────────────────────────────────────────────────────
    docx = docx
        .add_paragraph(centered_bold(&meta.title, styles.title_size_pt, styles))
        .add_paragraph(centered_bold(&meta.subtitle, styles.subtitle_size_pt, styles))
        .add_paragraph(Paragraph::new())
        .add_paragraph(centered_bold(&meta.project_name, styles.project_size_pt, styles))
        .add_paragraph(Paragraph::new());

    for (label, value) in meta.labeled_rows() {
        docx = docx.add_paragraph(labeled_row(label, value));
    }
    docx = docx.add_paragraph(page_break());

    // ── Index ────────────────────────────────────────────────────────────
    docx = docx.add_paragraph(heading_paragraph("Index", "Heading1", styles));
    for entry in INDEX_SECTIONS {
        docx = docx.add_paragraph(body_paragraph(entry));
    }
    docx = docx.add_paragraph(page_break());

    // ── Report intro ─────────────────────────────────────────────────────
    docx = docx
        .add_paragraph(heading_paragraph("Activity Report", "Heading1", styles))
        .add_paragraph(body_paragraph(&format!(
            "This document summarizes the Activity Based Learning (ABL) project work \
             carried out for the {}.",
            meta.project_name
        )))
        .add_paragraph(Paragraph::new());

    // ── Body ─────────────────────────────────────────────────────────────
    for block in blocks {
        docx = docx.add_paragraph(block_paragraph(block, styles));
    }

    // ── Conclusion ───────────────────────────────────────────────────────
    docx = docx
        .add_paragraph(page_break())
        .add_paragraph(heading_paragraph("Conclusion", "Heading1", styles))
        .add_paragraph(body_paragraph(&format!(
            "The {} demonstrates a complete end-to-end workflow covering the modules \
             described in this report. The implemented scope works as planned, with \
             clear direction for future hardening and enhancements.",
            meta.project_name
        )));

    debug!("Assembled document with {} body blocks", blocks.len());

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ReportError::DocxBuild(e.to_string()))?;

    Ok(buf.into_inner())
}

/// Map one classified body block to a paragraph.
fn block_paragraph(block: &Block, styles: &ReportStyles) -> Paragraph {
    match block {
        Block::Blank => Paragraph::new(),
        Block::Heading { level, text } => {
            let style_id = match level {
                1 => "Heading1",
                2 => "Heading2",
                _ => "Heading3",
            };
            heading_paragraph(text, style_id, styles)
        }
        Block::Bullet(text) => bullet_paragraph(text, 360, "\u{2022} "),
        Block::SubBullet(text) => bullet_paragraph(text, 720, "\u{25E6} "),
        Block::Text(text) => body_paragraph(text),
    }
}

// ── Paragraph helpers ────────────────────────────────────────────────────

fn heading_style(style_id: &str, name: &str, size_pt: usize) -> Style {
    Style::new(style_id, StyleType::Paragraph)
        .name(name)
        .size(size_pt * 2) // OOXML uses half-points
}

/// Heading runs carry the heading font explicitly, on top of the style's
/// size, so all levels share one family.
fn heading_paragraph(text: &str, style_id: &str, styles: &ReportStyles) -> Paragraph {
    Paragraph::new().style(style_id).add_run(
        Run::new().add_text(text).fonts(
            RunFonts::new()
                .ascii(&styles.heading_font)
                .east_asia(&styles.heading_font),
        ),
    )
}

fn centered_bold(text: &str, size_pt: usize, styles: &ReportStyles) -> Paragraph {
    Paragraph::new().align(AlignmentType::Center).add_run(
        Run::new()
            .add_text(text)
            .bold()
            .size(size_pt * 2)
            .fonts(
                RunFonts::new()
                    .ascii(&styles.body_font)
                    .east_asia(&styles.body_font),
            ),
    )
}

/// A centered `label: value` row with a bold label run.
fn labeled_row(label: &str, value: &str) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Center)
        .add_run(Run::new().add_text(format!("{label}: ")).bold())
        .add_run(Run::new().add_text(value))
}

fn bullet_paragraph(text: &str, indent_twips: i32, marker: &str) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .indent(Some(indent_twips), None, None, None)
        .add_run(Run::new().add_text(format!("{marker}{text}")))
}

fn body_paragraph(text: &str) -> Paragraph {
    Paragraph::new()
        .align(AlignmentType::Left)
        .add_run(Run::new().add_text(text))
}

fn page_break() -> Paragraph {
    Paragraph::new().add_run(Run::new().add_break(BreakType::Page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::markdown::classify_lines;
    use std::io::Read;

    /// Unpack the main document part from packed DOCX bytes.
    fn document_xml(bytes: &[u8]) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
        let mut file = archive
            .by_name("word/document.xml")
            .expect("document part present");
        let mut xml = String::new();
        file.read_to_string(&mut xml).expect("utf-8 xml");
        xml
    }

    fn build(md: &str) -> Vec<u8> {
        let blocks = classify_lines(md);
        build_document(&blocks, &ReportMeta::default(), &ReportStyles::default())
            .expect("build succeeds")
    }

    #[test]
    fn packed_bytes_are_a_zip_archive() {
        let bytes = build("hello");
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn fixed_sections_present_regardless_of_input() {
        let xml = document_xml(&build(""));
        assert!(xml.contains("ACTIVITY BASED LEARNING (ABL)"));
        assert!(xml.contains("Index"));
        assert!(xml.contains("Activity Report"));
        assert!(xml.contains("Conclusion"));
        for entry in INDEX_SECTIONS {
            // Ampersands are XML-escaped in the stored document part.
            let escaped = entry.replace('&', "&amp;");
            assert!(xml.contains(&escaped), "missing index entry: {entry}");
        }
    }

    #[test]
    fn body_heading_and_paragraph_render() {
        let xml = document_xml(&build("# Overview\nHello world"));
        assert!(xml.contains("Overview"));
        assert!(xml.contains("Hello world"));
        assert!(xml.contains("Heading1"));
    }

    #[test]
    fn bullets_get_markers() {
        let xml = document_xml(&build("- alpha\n  - beta"));
        assert!(xml.contains("\u{2022} alpha"));
        assert!(xml.contains("\u{25E6} beta"));
    }

    #[test]
    fn page_breaks_present() {
        let xml = document_xml(&build("text"));
        // Title page, index, and conclusion each contribute one break.
        let breaks = xml.matches("w:type=\"page\"").count();
        assert!(breaks >= 3, "expected ≥ 3 page breaks, got {breaks}");
    }

    #[test]
    fn metadata_values_land_on_title_page() {
        let meta = ReportMeta {
            student_name: "Jordan Example".into(),
            institution: "Example Institute".into(),
            ..ReportMeta::default()
        };
        let blocks = classify_lines("body");
        let bytes =
            build_document(&blocks, &meta, &ReportStyles::default()).expect("build succeeds");
        let xml = document_xml(&bytes);
        assert!(xml.contains("Jordan Example"));
        assert!(xml.contains("Example Institute"));
        assert!(xml.contains("Student Name: "));
    }

    #[test]
    fn intro_mentions_project_name() {
        let meta = ReportMeta {
            project_name: "Library Loan Tracker".into(),
            ..ReportMeta::default()
        };
        let bytes = build_document(&[], &meta, &ReportStyles::default()).expect("build succeeds");
        let xml = document_xml(&bytes);
        assert!(xml.contains("carried out for the Library Loan Tracker"));
    }

    #[test]
    fn base_font_is_document_default() {
        let xml = document_xml(&build("text"));
        assert!(xml.contains("Times New Roman"));
    }

    #[test]
    fn build_is_deterministic() {
        let a = build("# Overview\n- x\n  - y");
        let b = build("# Overview\n- x\n  - y");
        assert_eq!(document_xml(&a), document_xml(&b));
    }
}
