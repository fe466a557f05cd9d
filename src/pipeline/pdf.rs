//! PDF conversion: ordered backend fallback over external tools.
//!
//! ## Why a fallback chain?
//!
//! No single DOCX-to-PDF route exists on every machine. Word renders the
//! document with the highest fidelity but only exists on Windows; the
//! `docx2pdf` utility wraps the same automation behind a friendlier CLI;
//! LibreOffice is the portable fallback that works headless anywhere. The
//! chain is ordered by decreasing fidelity and tried until one backend
//! produces the PDF.
//!
//! Each backend implements [`ConvertStrategy`] and reports a
//! [`StrategyOutcome`] instead of raising: `Unavailable` (cannot run here)
//! and `Failed` (ran, produced nothing) are both swallowed into the next
//! strategy. Only exhausting the whole chain is fatal, and the resulting
//! error names every attempt so the user knows what to install.
//!
//! Backends write `<stem>.pdf` into an output *directory*, so when the
//! requested path differs from the produced path the file is relocated:
//! delete any pre-existing file at the destination, then rename into place.
//! Each strategy is attempted exactly once per run; there are no retries
//! and no timeouts — a hung external process hangs the run.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tracing::{debug, info, warn};

use crate::error::{ReportError, StrategyOutcome};
use crate::output::ConversionBackend;

/// One concrete DOCX-to-PDF backend.
pub trait ConvertStrategy {
    /// Which backend this is, for logging and diagnostics.
    fn backend(&self) -> ConversionBackend;

    /// Try to produce `pdf` from `docx`. Must not leave a same-named file
    /// behind at any intermediate location on success.
    fn attempt(&self, docx: &Path, pdf: &Path) -> StrategyOutcome;
}

/// The default chain, in priority order.
pub fn default_strategies() -> Vec<Box<dyn ConvertStrategy>> {
    vec![
        Box::new(WordAutomation),
        Box::new(Docx2PdfCli),
        Box::new(SofficeHeadless),
    ]
}

/// Convert `docx` to `pdf` using the default backend chain.
///
/// Creates the output directory tree if missing. Returns the backend that
/// produced the file.
pub fn convert_docx_to_pdf(docx: &Path, pdf: &Path) -> Result<ConversionBackend, ReportError> {
    convert_with(&default_strategies(), docx, pdf)
}

/// Convert using an explicit strategy chain. First success wins.
pub fn convert_with(
    strategies: &[Box<dyn ConvertStrategy>],
    docx: &Path,
    pdf: &Path,
) -> Result<ConversionBackend, ReportError> {
    if let Some(parent) = pdf.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::OutputWriteFailed {
                path: pdf.to_path_buf(),
                source: e,
            })?;
        }
    }

    let mut attempts: Vec<String> = Vec::with_capacity(strategies.len());

    for strategy in strategies {
        let backend = strategy.backend();
        debug!("Trying conversion backend: {}", backend);
        match strategy.attempt(docx, pdf) {
            StrategyOutcome::Converted => {
                info!("Converted via {}", backend);
                return Ok(backend);
            }
            outcome => {
                let reason = outcome
                    .reason()
                    .unwrap_or_else(|| "unknown".to_string());
                warn!("Backend {} did not convert: {}", backend, reason);
                attempts.push(format!("  - {backend}: {reason}"));
            }
        }
    }

    Err(ReportError::ConversionFailed {
        attempts: attempts.join("\n"),
    })
}

// ── Strategy 1: Word COM automation (Windows) ────────────────────────────

/// Drives a hidden Microsoft Word instance over COM, via PowerShell.
///
/// The script closes the document handle and quits the application in a
/// `finally` block, so a failed `SaveAs` cannot leave an orphaned WINWORD
/// process behind.
pub struct WordAutomation;

impl ConvertStrategy for WordAutomation {
    fn backend(&self) -> ConversionBackend {
        ConversionBackend::WordAutomation
    }

    #[cfg(windows)]
    fn attempt(&self, docx: &Path, pdf: &Path) -> StrategyOutcome {
        let powershell = match which::which("powershell") {
            Ok(p) => p,
            Err(_) => {
                return StrategyOutcome::Unavailable(
                    "powershell not found on the search path".to_string(),
                )
            }
        };

        // WdSaveFormat.wdFormatPDF
        const WD_FORMAT_PDF: u8 = 17;

        let script = format!(
            "$ErrorActionPreference = 'Stop'\n\
             $word = New-Object -ComObject Word.Application\n\
             $word.Visible = $false\n\
             $doc = $null\n\
             try {{\n\
               $doc = $word.Documents.Open('{docx}', $false, $true)\n\
               $doc.SaveAs([string]'{pdf}', [int]{fmt})\n\
             }} finally {{\n\
               if ($doc -ne $null) {{ $doc.Close($false) }}\n\
               $word.Quit()\n\
             }}",
            docx = ps_quote(docx),
            pdf = ps_quote(pdf),
            fmt = WD_FORMAT_PDF,
        );

        let output = match Command::new(powershell)
            .args(["-NoProfile", "-NonInteractive", "-Command", &script])
            .output()
        {
            Ok(o) => o,
            Err(e) => return StrategyOutcome::Failed(format!("could not run powershell: {e}")),
        };

        if !output.status.success() {
            return StrategyOutcome::Failed(describe_process_failure(&output));
        }
        if !pdf.exists() {
            return StrategyOutcome::Failed(
                "Word reported success but produced no PDF".to_string(),
            );
        }
        StrategyOutcome::Converted
    }

    #[cfg(not(windows))]
    fn attempt(&self, _docx: &Path, _pdf: &Path) -> StrategyOutcome {
        StrategyOutcome::Unavailable("Microsoft Word automation requires Windows".to_string())
    }
}

/// Escape a path for interpolation inside PowerShell single quotes.
#[cfg(windows)]
fn ps_quote(path: &Path) -> String {
    path.display().to_string().replace('\'', "''")
}

// ── Strategy 2: docx2pdf CLI ─────────────────────────────────────────────

/// Invokes the `docx2pdf` command-line utility.
///
/// `docx2pdf <source> <dir>` writes `<stem>.pdf` into the target directory
/// using the source file's base name, so the produced file may need to be
/// relocated onto the requested path.
pub struct Docx2PdfCli;

impl ConvertStrategy for Docx2PdfCli {
    fn backend(&self) -> ConversionBackend {
        ConversionBackend::Docx2Pdf
    }

    fn attempt(&self, docx: &Path, pdf: &Path) -> StrategyOutcome {
        let exe = match which::which("docx2pdf") {
            Ok(p) => p,
            Err(_) => {
                return StrategyOutcome::Unavailable(
                    "docx2pdf not found on the search path".to_string(),
                )
            }
        };

        let out_dir = output_dir(pdf);
        let output = match Command::new(exe).arg(docx).arg(&out_dir).output() {
            Ok(o) => o,
            Err(e) => return StrategyOutcome::Failed(format!("could not run docx2pdf: {e}")),
        };
        if !output.status.success() {
            return StrategyOutcome::Failed(describe_process_failure(&output));
        }

        finish_from_out_dir(docx, pdf, &out_dir, "docx2pdf")
    }
}

// ── Strategy 3: LibreOffice headless ─────────────────────────────────────

/// Invokes `soffice --headless --convert-to pdf`.
///
/// The portable fallback: LibreOffice exists for every platform and needs
/// no display. Like `docx2pdf` it writes `<stem>.pdf` into `--outdir`.
pub struct SofficeHeadless;

impl ConvertStrategy for SofficeHeadless {
    fn backend(&self) -> ConversionBackend {
        ConversionBackend::SofficeHeadless
    }

    fn attempt(&self, docx: &Path, pdf: &Path) -> StrategyOutcome {
        let soffice = match which::which("soffice") {
            Ok(p) => p,
            Err(_) => {
                return StrategyOutcome::Unavailable(
                    "LibreOffice 'soffice' not found on the search path".to_string(),
                )
            }
        };

        let out_dir = output_dir(pdf);
        let output = match Command::new(soffice)
            .args(["--headless", "--nologo", "--nofirststartwizard", "--convert-to", "pdf", "--outdir"])
            .arg(&out_dir)
            .arg(docx)
            .output()
        {
            Ok(o) => o,
            Err(e) => return StrategyOutcome::Failed(format!("could not run soffice: {e}")),
        };
        if !output.status.success() {
            return StrategyOutcome::Failed(describe_process_failure(&output));
        }

        finish_from_out_dir(docx, pdf, &out_dir, "soffice")
    }
}

// ── Shared helpers ───────────────────────────────────────────────────────

/// Directory the backend is told to write into: the requested PDF's parent,
/// or the current directory when the path has none.
fn output_dir(pdf: &Path) -> PathBuf {
    match pdf.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Verify the backend wrote `<stem>.pdf` into `out_dir`, then relocate it
/// onto the requested path if the two differ.
fn finish_from_out_dir(docx: &Path, pdf: &Path, out_dir: &Path, tool: &str) -> StrategyOutcome {
    let stem = match docx.file_stem() {
        Some(s) => s.to_os_string(),
        None => return StrategyOutcome::Failed("source file has no stem".to_string()),
    };
    let mut produced_name = stem;
    produced_name.push(".pdf");
    let produced = out_dir.join(produced_name);

    if !produced.exists() {
        return StrategyOutcome::Failed(format!(
            "{tool} did not produce the expected PDF at '{}'",
            produced.display()
        ));
    }

    match move_into_place(&produced, pdf) {
        Ok(()) => StrategyOutcome::Converted,
        Err(e) => StrategyOutcome::Failed(format!(
            "could not move '{}' into place: {e}",
            produced.display()
        )),
    }
}

/// Relocate `produced` onto `target` unless they resolve to the same file.
///
/// Deletes any pre-existing file at `target` first. Last writer wins when
/// two runs race on the same output path; nothing here locks.
fn move_into_place(produced: &Path, target: &Path) -> std::io::Result<()> {
    let same_file = match (produced.canonicalize(), target.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };
    if same_file {
        return Ok(());
    }

    if target.exists() {
        std::fs::remove_file(target)?;
    }
    debug!(
        "Relocating '{}' → '{}'",
        produced.display(),
        target.display()
    );
    std::fs::rename(produced, target)
}

/// One-line summary of a failed external process: exit status plus the
/// first stderr line, which is where these tools put their diagnostics.
fn describe_process_failure(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let first_line = stderr.lines().find(|l| !l.trim().is_empty()).unwrap_or("");
    if first_line.is_empty() {
        format!("exited with {}", output.status)
    } else {
        format!("exited with {}: {first_line}", output.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(ConversionBackend, StrategyOutcome);

    impl ConvertStrategy for Fixed {
        fn backend(&self) -> ConversionBackend {
            self.0
        }
        fn attempt(&self, _docx: &Path, _pdf: &Path) -> StrategyOutcome {
            self.1.clone()
        }
    }

    fn chain(outcomes: Vec<(ConversionBackend, StrategyOutcome)>) -> Vec<Box<dyn ConvertStrategy>> {
        outcomes
            .into_iter()
            .map(|(b, o)| Box::new(Fixed(b, o)) as Box<dyn ConvertStrategy>)
            .collect()
    }

    #[test]
    fn first_success_wins() {
        let tmp = tempfile::tempdir().unwrap();
        let pdf = tmp.path().join("out.pdf");
        let strategies = chain(vec![
            (
                ConversionBackend::WordAutomation,
                StrategyOutcome::Unavailable("not windows".into()),
            ),
            (ConversionBackend::Docx2Pdf, StrategyOutcome::Converted),
            (
                ConversionBackend::SofficeHeadless,
                StrategyOutcome::Failed("should never be tried".into()),
            ),
        ]);
        let backend = convert_with(&strategies, Path::new("in.docx"), &pdf).unwrap();
        assert_eq!(backend, ConversionBackend::Docx2Pdf);
    }

    #[test]
    fn exhaustion_names_every_attempt() {
        let tmp = tempfile::tempdir().unwrap();
        let pdf = tmp.path().join("out.pdf");
        let strategies = chain(vec![
            (
                ConversionBackend::WordAutomation,
                StrategyOutcome::Unavailable("requires Windows".into()),
            ),
            (
                ConversionBackend::Docx2Pdf,
                StrategyOutcome::Unavailable("not found".into()),
            ),
            (
                ConversionBackend::SofficeHeadless,
                StrategyOutcome::Failed("exited with code 1".into()),
            ),
        ]);
        let err = convert_with(&strategies, Path::new("in.docx"), &pdf).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("word-automation"), "got: {msg}");
        assert!(msg.contains("docx2pdf"), "got: {msg}");
        assert!(msg.contains("soffice"), "got: {msg}");
        assert!(msg.contains("requires Windows"), "got: {msg}");
        assert!(msg.contains("exited with code 1"), "got: {msg}");
    }

    #[test]
    fn convert_with_creates_output_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let pdf = tmp.path().join("nested/deep/out.pdf");
        let strategies = chain(vec![(ConversionBackend::Docx2Pdf, StrategyOutcome::Converted)]);
        convert_with(&strategies, Path::new("in.docx"), &pdf).unwrap();
        assert!(pdf.parent().unwrap().is_dir());
    }

    #[cfg(not(windows))]
    #[test]
    fn word_automation_unavailable_off_windows() {
        let outcome = WordAutomation.attempt(Path::new("a.docx"), Path::new("a.pdf"));
        assert!(matches!(outcome, StrategyOutcome::Unavailable(_)));
    }

    #[test]
    fn move_into_place_relocates() {
        let tmp = tempfile::tempdir().unwrap();
        let produced = tmp.path().join("produced.pdf");
        let target = tmp.path().join("target.pdf");
        std::fs::write(&produced, b"pdf bytes").unwrap();

        move_into_place(&produced, &target).unwrap();
        assert!(!produced.exists(), "no stray file left behind");
        assert_eq!(std::fs::read(&target).unwrap(), b"pdf bytes");
    }

    #[test]
    fn move_into_place_replaces_existing_target() {
        let tmp = tempfile::tempdir().unwrap();
        let produced = tmp.path().join("produced.pdf");
        let target = tmp.path().join("target.pdf");
        std::fs::write(&produced, b"new").unwrap();
        std::fs::write(&target, b"old").unwrap();

        move_into_place(&produced, &target).unwrap();
        assert_eq!(std::fs::read(&target).unwrap(), b"new");
    }

    #[test]
    fn move_into_place_noop_when_same_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("same.pdf");
        std::fs::write(&path, b"bytes").unwrap();

        move_into_place(&path, &path).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"bytes");
    }

    #[test]
    fn finish_reports_missing_output() {
        let tmp = tempfile::tempdir().unwrap();
        let outcome = finish_from_out_dir(
            Path::new("report.docx"),
            &tmp.path().join("report.pdf"),
            tmp.path(),
            "soffice",
        );
        match outcome {
            StrategyOutcome::Failed(reason) => {
                assert!(reason.contains("did not produce"), "got: {reason}")
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn finish_relocates_produced_file() {
        let tmp = tempfile::tempdir().unwrap();
        // Backend wrote <stem>.pdf next to the target, under a different name.
        std::fs::write(tmp.path().join("report.pdf"), b"%PDF").unwrap();
        let target = tmp.path().join("final.pdf");

        let outcome =
            finish_from_out_dir(Path::new("report.docx"), &target, tmp.path(), "docx2pdf");
        assert_eq!(outcome, StrategyOutcome::Converted);
        assert!(target.exists());
        assert!(!tmp.path().join("report.pdf").exists());
    }
}
