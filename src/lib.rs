//! # md2report
//!
//! Turn a Markdown-formatted activity report into a styled DOCX document and
//! then into a PDF.
//!
//! ## Why this crate?
//!
//! Activity reports get written in Markdown because that is where the notes
//! live, but they have to be handed in as a formatted PDF with a title page,
//! an index, and institutional metadata. This crate renders the Markdown into
//! a DOCX with those fixed sections, then converts the DOCX to PDF by
//! orchestrating whatever conversion backend the machine actually has —
//! Microsoft Word, the `docx2pdf` utility, or headless LibreOffice.
//!
//! ## Pipeline Overview
//!
//! ```text
//! Markdown
//!  │
//!  ├─ 1. Classify  line-by-line pass producing Block values
//!  ├─ 2. Assemble  title page + index + intro + body + conclusion (docx-rs)
//!  ├─ 3. Save      DOCX into a process-private temp directory
//!  └─ 4. Convert   Word COM → docx2pdf → soffice, first success wins
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use md2report::{generate, ReportConfig, ReportMeta};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ReportConfig::builder()
//!         .input("docs/PROJECT_REPORT.md")
//!         .output("docs/activity-report.pdf")
//!         .meta(ReportMeta {
//!             project_name: "Hospital OPD Management System".into(),
//!             student_name: "A. Student".into(),
//!             ..ReportMeta::default()
//!         })
//!         .build()?;
//!     let output = generate(&config)?;
//!     println!("Created: {} (via {})", output.pdf_path.display(), output.backend);
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `md2report` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! md2report = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod generate;
pub mod meta;
pub mod output;
pub mod pipeline;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{ReportConfig, ReportConfigBuilder, ReportStyles};
pub use error::{ReportError, StrategyOutcome};
pub use generate::{generate, generate_docx};
pub use meta::ReportMeta;
pub use output::{ConversionBackend, ReportOutput, ReportStats};
