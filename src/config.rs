//! Configuration types for report generation.
//!
//! All behaviour is controlled through [`ReportConfig`], built via its
//! [`ReportConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to serialise a run for logging and to diff two runs to understand why
//! their outputs differ.
//!
//! # Design choice: builder over constructor
//! A constructor taking paths, a metadata record, and a styles struct in
//! positional order is easy to call wrong. The builder lets callers set only
//! what they care about and rely on well-documented defaults for the rest.

use crate::error::ReportError;
use crate::meta::ReportMeta;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for one report-generation run.
///
/// Built via [`ReportConfig::builder()`].
///
/// # Example
/// ```rust
/// use md2report::ReportConfig;
///
/// let config = ReportConfig::builder()
///     .input("docs/PROJECT_REPORT.md")
///     .output("docs/activity-report.pdf")
///     .build()
///     .unwrap();
/// assert!(config.docx_output.is_none());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Path to the Markdown source. Must be UTF-8 encoded.
    pub input: PathBuf,

    /// Path the final PDF is written to. Parent directories are created as
    /// needed. A pre-existing file at this path is replaced.
    pub output: PathBuf,

    /// Also write the intermediate DOCX to this path instead of discarding
    /// it with the scratch directory. Default: `None`.
    pub docx_output: Option<PathBuf>,

    /// Title-page metadata. Display-only strings, never validated.
    pub meta: ReportMeta,

    /// Fonts, sizes, and margins applied at document creation.
    pub styles: ReportStyles,
}

impl ReportConfig {
    /// Create a new builder for `ReportConfig`.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder {
            config: ReportConfig {
                input: PathBuf::new(),
                output: PathBuf::new(),
                docx_output: None,
                meta: ReportMeta::default(),
                styles: ReportStyles::default(),
            },
        }
    }
}

/// Builder for [`ReportConfig`].
#[derive(Debug)]
pub struct ReportConfigBuilder {
    config: ReportConfig,
}

impl ReportConfigBuilder {
    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.input = path.into();
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output = path.into();
        self
    }

    pub fn docx_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.docx_output = Some(path.into());
        self
    }

    pub fn meta(mut self, meta: ReportMeta) -> Self {
        self.config.meta = meta;
        self
    }

    pub fn styles(mut self, styles: ReportStyles) -> Self {
        self.config.styles = styles;
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ReportConfig, ReportError> {
        let c = &self.config;
        if c.input.as_os_str().is_empty() {
            return Err(ReportError::InvalidConfig(
                "input path must be set".into(),
            ));
        }
        if c.output.as_os_str().is_empty() {
            return Err(ReportError::InvalidConfig(
                "output path must be set".into(),
            ));
        }
        if c.styles.body_size_pt == 0 {
            return Err(ReportError::InvalidConfig(
                "body size must be ≥ 1 pt".into(),
            ));
        }
        Ok(self.config)
    }
}

/// Document styling applied once at document creation.
///
/// The body font and size land on the base paragraph style, so they affect
/// everything that does not override them — including the East-Asian font,
/// which is pinned to the same family because Word otherwise substitutes its
/// own choice for CJK runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportStyles {
    /// Font for body text, e.g. "Times New Roman".
    pub body_font: String,

    /// Font for heading runs at every level.
    pub heading_font: String,

    /// Body text size in points.
    pub body_size_pt: usize,

    /// Title run size on the title page, in points.
    pub title_size_pt: usize,

    /// Subtitle run size on the title page, in points.
    pub subtitle_size_pt: usize,

    /// Project-name run size on the title page, in points.
    pub project_size_pt: usize,

    /// Heading 1 size in points.
    pub heading1_size_pt: usize,

    /// Heading 2 size in points.
    pub heading2_size_pt: usize,

    /// Heading 3 size in points.
    pub heading3_size_pt: usize,

    /// Page margin in inches, applied uniformly to all four sides.
    pub margin_inches: f64,
}

impl Default for ReportStyles {
    fn default() -> Self {
        Self {
            body_font: "Times New Roman".to_string(),
            heading_font: "Times New Roman".to_string(),
            body_size_pt: 12,
            title_size_pt: 20,
            subtitle_size_pt: 14,
            project_size_pt: 16,
            heading1_size_pt: 16,
            heading2_size_pt: 14,
            heading3_size_pt: 12,
            margin_inches: 1.0,
        }
    }
}

impl ReportStyles {
    /// Uniform page margin in twentieths of a point, the unit OOXML uses.
    pub(crate) fn margin_twips(&self) -> i32 {
        (self.margin_inches * 1440.0).round() as i32
    }
}
