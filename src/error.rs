//! Error types for the md2report library.
//!
//! Two distinct types reflect two distinct failure modes:
//!
//! * [`ReportError`] — **Fatal**: the run cannot produce the requested PDF
//!   (missing input, DOCX build failure, every conversion backend exhausted).
//!   Returned as `Err(ReportError)` from the top-level `generate*` functions.
//!
//! * [`StrategyOutcome`] — **Non-fatal**: the result of one conversion
//!   backend's attempt. A backend that is missing from this machine
//!   ([`StrategyOutcome::Unavailable`]) is a different situation from one
//!   that ran and produced nothing ([`StrategyOutcome::Failed`]), and the
//!   final diagnostic distinguishes the two. Neither aborts the run on its
//!   own — the converter simply moves to the next backend.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the md2report library.
///
/// Per-backend conversion failures use [`StrategyOutcome`] and only become
/// fatal as [`ReportError::ConversionFailed`] once every backend has been
/// tried.
#[derive(Debug, Error)]
pub enum ReportError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input Markdown file was not found at the given path.
    #[error("Markdown file not found: '{path}'\nCheck the path exists and is readable.")]
    InputNotFound { path: PathBuf },

    /// Process does not have read permission on the input file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The input file exists but is not valid UTF-8.
    #[error("Markdown file '{path}' is not valid UTF-8.\nRe-save it with UTF-8 encoding.")]
    InputNotUtf8 { path: PathBuf },

    // ── Document errors ───────────────────────────────────────────────────
    /// docx-rs failed to assemble or pack the document.
    #[error("DOCX generation failed: {0}")]
    DocxBuild(String),

    /// Could not write the DOCX file to disk.
    #[error("Failed to write DOCX file '{path}': {source}")]
    DocxWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Conversion errors ─────────────────────────────────────────────────
    /// Every conversion backend was tried and none produced the PDF.
    ///
    /// `attempts` lists each backend in the order tried, with the reason it
    /// gave, so the user can see which tool to install or fix.
    #[error(
        "Unable to convert DOCX to PDF — every backend was tried:\n{attempts}\n\
Install LibreOffice ('soffice' on the PATH) for a portable fallback."
    )]
    ConversionFailed { attempts: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory or move the PDF into place.
    #[error("Failed to write output '{path}': {source}")]
    OutputWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // ── Catch-all ─────────────────────────────────────────────────────────
    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// The result of one conversion backend's attempt.
///
/// Returned by [`crate::pipeline::pdf::ConvertStrategy::attempt`]. The
/// converter inspects the outcome, logs it, and either stops (`Converted`)
/// or carries the reason forward into the final diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StrategyOutcome {
    /// The backend produced the PDF at the requested path.
    Converted,
    /// The backend cannot run in this environment (wrong OS, executable not
    /// on the search path). Nothing was attempted.
    Unavailable(String),
    /// The backend ran but did not produce the expected PDF.
    Failed(String),
}

impl StrategyOutcome {
    /// Short reason string for the exhaustion diagnostic, or `None` when the
    /// attempt succeeded.
    pub fn reason(&self) -> Option<String> {
        match self {
            StrategyOutcome::Converted => None,
            StrategyOutcome::Unavailable(r) => Some(format!("unavailable ({r})")),
            StrategyOutcome::Failed(r) => Some(format!("failed ({r})")),
        }
    }
}
