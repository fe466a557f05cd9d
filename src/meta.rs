//! The metadata record stamped onto the report's title page.
//!
//! Every field is a display-only string: nothing here is validated or
//! interpreted, the values are written onto the title page exactly as given.
//! The record is constructed once per run and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Title-page metadata for a generated report.
///
/// `Default` fills the angle-bracket placeholders a student is expected to
/// replace, and today's date. Override individual fields with struct-update
/// syntax:
///
/// ```rust
/// use md2report::ReportMeta;
///
/// let meta = ReportMeta {
///     student_name: "A. Student".into(),
///     ..ReportMeta::default()
/// };
/// assert_eq!(meta.subtitle, "ACTIVITY REPORT");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMeta {
    /// Main title, e.g. "ACTIVITY BASED LEARNING (ABL)".
    pub title: String,

    /// Subtitle line under the title.
    pub subtitle: String,

    /// Project name, centered on the title page and interpolated into the
    /// fixed introduction paragraph.
    pub project_name: String,

    /// Report date as free text, e.g. "04 Mar 2026".
    pub report_date: String,

    pub student_name: String,

    /// University seat number or other student identifier.
    pub usn_or_id: String,

    pub class_and_section: String,

    pub department: String,

    pub institution: String,

    /// Supervising guide or mentor.
    pub guide_name: String,
}

impl Default for ReportMeta {
    fn default() -> Self {
        Self {
            title: "ACTIVITY BASED LEARNING (ABL)".to_string(),
            subtitle: "ACTIVITY REPORT".to_string(),
            project_name: "<Project Name>".to_string(),
            report_date: chrono::Local::now().format("%d %b %Y").to_string(),
            student_name: "<Your Name>".to_string(),
            usn_or_id: "<USN / ID>".to_string(),
            class_and_section: "<Class / Section>".to_string(),
            department: "<Department>".to_string(),
            institution: "<Institution Name>".to_string(),
            guide_name: "<Guide / Mentor Name>".to_string(),
        }
    }
}

impl ReportMeta {
    /// The labeled rows of the title-page metadata block, in display order.
    pub fn labeled_rows(&self) -> [(&'static str, &str); 7] {
        [
            ("Date", self.report_date.as_str()),
            ("Student Name", self.student_name.as_str()),
            ("USN / ID", self.usn_or_id.as_str()),
            ("Class / Section", self.class_and_section.as_str()),
            ("Department", self.department.as_str()),
            ("Institution", self.institution.as_str()),
            ("Guide / Mentor", self.guide_name.as_str()),
        ]
    }
}
