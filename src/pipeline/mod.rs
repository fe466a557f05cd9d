//! Pipeline stages for Markdown-to-PDF report generation.
//!
//! Each submodule implements exactly one transformation step.
//! Keeping stages separate makes each independently testable and lets us
//! swap implementations (e.g. add a conversion backend) without touching
//! other stages.
//!
//! ## Data Flow
//!
//! ```text
//! markdown ──▶ docx ──▶ pdf
//! (classify)  (assemble) (backend fallback chain)
//! ```
//!
//! 1. [`markdown`] — classify each input line into a [`markdown::Block`];
//!    the only state carried between lines is the open-list flag
//! 2. [`docx`]     — assemble the full document (title page, index, intro,
//!    body, conclusion) with docx-rs and pack it to bytes
//! 3. [`pdf`]      — convert the saved DOCX by trying each
//!    [`pdf::ConvertStrategy`] in priority order until one succeeds

pub mod docx;
pub mod markdown;
pub mod pdf;
