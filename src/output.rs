//! Result types returned by a report-generation run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// The result of a successful [`crate::generate`] run.
#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput {
    /// Where the final PDF landed (the configured output path).
    pub pdf_path: PathBuf,

    /// Which conversion backend produced the PDF.
    pub backend: ConversionBackend,

    /// Counters and timings for the run.
    pub stats: ReportStats,
}

/// The conversion backend that ended up producing the PDF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConversionBackend {
    /// Hidden Microsoft Word instance driven over COM (Windows only).
    WordAutomation,
    /// The `docx2pdf` command-line utility.
    Docx2Pdf,
    /// LibreOffice `soffice --headless --convert-to pdf`.
    SofficeHeadless,
}

impl fmt::Display for ConversionBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ConversionBackend::WordAutomation => "word-automation",
            ConversionBackend::Docx2Pdf => "docx2pdf",
            ConversionBackend::SofficeHeadless => "soffice",
        })
    }
}

/// Counters and timings for one run.
///
/// `body_lines` counts input lines; the block counters describe what the
/// classifier made of them. Durations are wall-clock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportStats {
    /// Lines read from the Markdown input.
    pub body_lines: usize,
    /// Blocks emitted into the document body.
    pub body_blocks: usize,
    /// Headings among the body blocks.
    pub headings: usize,
    /// Bullets (both levels) among the body blocks.
    pub bullets: usize,
    /// DOCX assembly time.
    pub render_duration_ms: u64,
    /// PDF conversion time (the winning backend only).
    pub convert_duration_ms: u64,
    /// Whole-run time.
    pub total_duration_ms: u64,
}
