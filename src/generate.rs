//! Top-level entry points: read, render, save, convert.
//!
//! ## Why a temp directory for the DOCX?
//!
//! The DOCX is an intermediate artifact — the deliverable is the PDF. Saving
//! it into a process-private [`tempfile::TempDir`] means it is cleaned up on
//! drop whether the run succeeds, fails, or panics, and two concurrent runs
//! never collide on the intermediate path. Callers who want the DOCX set
//! [`crate::ReportConfig::docx_output`] and get a copy at a path of their
//! choosing.

use std::path::Path;
use std::time::Instant;

use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::output::{ReportOutput, ReportStats};
use crate::pipeline::markdown::{classify_lines, Block};
use crate::pipeline::{docx, pdf};

/// Generate the report: Markdown in, PDF at `config.output` out.
///
/// This is the primary entry point for the library.
///
/// # Errors
/// Returns `Err(ReportError)` when the input cannot be read, the DOCX cannot
/// be assembled or saved, or every conversion backend has been tried without
/// producing the PDF.
pub fn generate(config: &ReportConfig) -> Result<ReportOutput, ReportError> {
    let total_start = Instant::now();
    info!("Generating report from '{}'", config.input.display());

    let md = read_input(&config.input)?;

    // ── Render ───────────────────────────────────────────────────────────
    let render_start = Instant::now();
    let blocks = classify_lines(&md);
    let docx_bytes = docx::build_document(&blocks, &config.meta, &config.styles)?;
    let render_duration_ms = render_start.elapsed().as_millis() as u64;
    debug!(
        "Rendered {} blocks into {} DOCX bytes in {}ms",
        blocks.len(),
        docx_bytes.len(),
        render_duration_ms
    );

    // ── Save into scratch space ──────────────────────────────────────────
    let scratch = tempfile::Builder::new()
        .prefix("md2report-")
        .tempdir()
        .map_err(|e| ReportError::Internal(format!("could not create scratch dir: {e}")))?;

    // Name the scratch DOCX after the requested PDF so backends that derive
    // the produced name from the source stem land on the right name.
    let stem = config
        .output
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "report".to_string());
    let docx_path = scratch.path().join(format!("{stem}.docx"));
    std::fs::write(&docx_path, &docx_bytes).map_err(|e| ReportError::DocxWriteFailed {
        path: docx_path.clone(),
        source: e,
    })?;

    if let Some(keep) = &config.docx_output {
        write_docx_copy(keep, &docx_bytes)?;
        info!("Kept intermediate DOCX at '{}'", keep.display());
    }

    // ── Convert ──────────────────────────────────────────────────────────
    let convert_start = Instant::now();
    let backend = pdf::convert_docx_to_pdf(&docx_path, &config.output)?;
    let convert_duration_ms = convert_start.elapsed().as_millis() as u64;

    let stats = ReportStats {
        body_lines: md.lines().count(),
        body_blocks: blocks.len(),
        headings: blocks
            .iter()
            .filter(|b| matches!(b, Block::Heading { .. }))
            .count(),
        bullets: blocks
            .iter()
            .filter(|b| matches!(b, Block::Bullet(_) | Block::SubBullet(_)))
            .count(),
        render_duration_ms,
        convert_duration_ms,
        total_duration_ms: total_start.elapsed().as_millis() as u64,
    };

    info!(
        "Created '{}' via {} in {}ms",
        config.output.display(),
        backend,
        stats.total_duration_ms
    );

    Ok(ReportOutput {
        pdf_path: config.output.clone(),
        backend,
        stats,
    })
}

/// Render the DOCX only, returning the packed bytes without converting.
///
/// Used by the CLI's `--docx-only` mode and handy for tests: rendering is a
/// pure function of the input text, metadata, and styles.
pub fn generate_docx(config: &ReportConfig) -> Result<Vec<u8>, ReportError> {
    let md = read_input(&config.input)?;
    let blocks = classify_lines(&md);
    docx::build_document(&blocks, &config.meta, &config.styles)
}

// ── Internal helpers ─────────────────────────────────────────────────────

/// Read the Markdown source, mapping I/O failures onto the error taxonomy.
fn read_input(path: &Path) -> Result<String, ReportError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ReportError::InputNotFound {
            path: path.to_path_buf(),
        },
        std::io::ErrorKind::PermissionDenied => ReportError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => ReportError::Internal(format!("could not read '{}': {e}", path.display())),
    })?;

    String::from_utf8(bytes).map_err(|_| ReportError::InputNotUtf8 {
        path: path.to_path_buf(),
    })
}

/// Write the kept DOCX copy, creating parent directories as needed.
fn write_docx_copy(path: &Path, bytes: &[u8]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::DocxWriteFailed {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }
    std::fs::write(path, bytes).map_err(|e| ReportError::DocxWriteFailed {
        path: path.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn config_for(input: &Path, tmp: &Path) -> ReportConfig {
        ReportConfig::builder()
            .input(input)
            .output(tmp.join("out.pdf"))
            .build()
            .unwrap()
    }

    #[test]
    fn missing_input_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_for(&tmp.path().join("missing.md"), tmp.path());
        let err = generate_docx(&config).unwrap_err();
        assert!(matches!(err, ReportError::InputNotFound { .. }), "got: {err}");
    }

    #[test]
    fn non_utf8_input_is_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("latin1.md");
        let mut f = std::fs::File::create(&input).unwrap();
        f.write_all(&[0xC3, 0x28, 0xA0, 0xFF]).unwrap();

        let config = config_for(&input, tmp.path());
        let err = generate_docx(&config).unwrap_err();
        assert!(matches!(err, ReportError::InputNotUtf8 { .. }), "got: {err}");
    }

    #[test]
    fn generate_docx_produces_zip_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("report.md");
        std::fs::write(&input, "# Overview\nHello world\n").unwrap();

        let config = config_for(&input, tmp.path());
        let bytes = generate_docx(&config).unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn generate_docx_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let input = tmp.path().join("report.md");
        std::fs::write(&input, "# Overview\n- a\n  - b\n").unwrap();

        let config = config_for(&input, tmp.path());
        // Same input, same metadata: identical structural content.
        let a = document_xml(&generate_docx(&config).unwrap());
        let b = document_xml(&generate_docx(&config).unwrap());
        assert_eq!(a, b);
    }

    fn document_xml(bytes: &[u8]) -> String {
        use std::io::Read;
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("word/document.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        xml
    }
}
