//! CLI binary for md2report.
//!
//! A thin shim over the library crate that maps CLI flags to
//! `ReportConfig` and prints results.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use md2report::{generate, generate_docx, ReportConfig, ReportMeta, ReportStyles};
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Basic: report.md → report.pdf next to it
  md2report docs/PROJECT_REPORT.md

  # Explicit output path
  md2report docs/PROJECT_REPORT.md -o "ABL Activity Report.pdf"

  # Fill in the title page
  md2report report.md --project "Hospital OPD Management System" \
      --student "A. Student" --id 1XX22CS001 --guide "Dr. Guide"

  # Keep the intermediate DOCX alongside the PDF
  md2report report.md --docx report.docx

  # DOCX only, skip PDF conversion entirely
  md2report report.md --docx-only

  # Machine-readable run summary
  md2report report.md --json

CONVERSION BACKENDS (tried in order, first success wins):
  1. word-automation   hidden Microsoft Word instance over COM (Windows only)
  2. docx2pdf          the docx2pdf command-line utility, if on the PATH
  3. soffice           LibreOffice headless — the portable fallback

  Install LibreOffice to guarantee conversion works on any machine:
    https://www.libreoffice.org/download/
"#;

/// Turn a Markdown activity report into a styled DOCX and PDF.
#[derive(Parser, Debug)]
#[command(
    name = "md2report",
    version,
    about = "Turn a Markdown activity report into a styled DOCX and PDF",
    long_about = "Render a Markdown-formatted activity report into a DOCX with a title page, \
a fixed index, and institutional metadata, then convert it to PDF via Microsoft Word, \
docx2pdf, or headless LibreOffice — whichever this machine has.",
    arg_required_else_help = true,
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// Markdown report to render (UTF-8).
    input: PathBuf,

    /// Write the PDF to this path. Default: the input path with a .pdf extension.
    #[arg(short, long, env = "MD2REPORT_OUTPUT")]
    output: Option<PathBuf>,

    /// Keep the intermediate DOCX at this path.
    #[arg(long, env = "MD2REPORT_DOCX")]
    docx: Option<PathBuf>,

    /// Stop after the DOCX; do not convert to PDF.
    #[arg(long)]
    docx_only: bool,

    // ── Title-page metadata ──────────────────────────────────────────────
    /// Report title.
    #[arg(long)]
    title: Option<String>,

    /// Report subtitle.
    #[arg(long)]
    subtitle: Option<String>,

    /// Project name, shown on the title page and in the introduction.
    #[arg(long)]
    project: Option<String>,

    /// Report date as free text. Default: today.
    #[arg(long)]
    date: Option<String>,

    /// Student name.
    #[arg(long)]
    student: Option<String>,

    /// USN or other student identifier.
    #[arg(long)]
    id: Option<String>,

    /// Class and section.
    #[arg(long = "class")]
    class_and_section: Option<String>,

    /// Department.
    #[arg(long)]
    department: Option<String>,

    /// Institution name.
    #[arg(long)]
    institution: Option<String>,

    /// Guide or mentor name.
    #[arg(long)]
    guide: Option<String>,

    // ── Styling ──────────────────────────────────────────────────────────
    /// Body font family.
    #[arg(long, default_value = "Times New Roman")]
    body_font: String,

    /// Heading font family.
    #[arg(long, default_value = "Times New Roman")]
    heading_font: String,

    /// Body size in points.
    #[arg(long, default_value_t = 12)]
    body_size: usize,

    /// Uniform page margin in inches.
    #[arg(long, default_value_t = 1.0)]
    margin: f64,

    // ── Output control ───────────────────────────────────────────────────
    /// Print the run summary as JSON instead of plain text.
    #[arg(long, env = "MD2REPORT_JSON")]
    json: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "MD2REPORT_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "MD2REPORT_QUIET")]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    let config = build_config(&cli)?;

    // ── DOCX-only mode ───────────────────────────────────────────────────
    if cli.docx_only {
        let docx_path = cli
            .docx
            .clone()
            .unwrap_or_else(|| cli.input.with_extension("docx"));
        let bytes = generate_docx(&config).context("DOCX generation failed")?;
        if let Some(parent) = docx_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create '{}'", parent.display()))?;
            }
        }
        std::fs::write(&docx_path, bytes)
            .with_context(|| format!("Failed to write '{}'", docx_path.display()))?;
        if !cli.quiet {
            println!("Created: {}", docx_path.display());
        }
        return Ok(());
    }

    // ── Full pipeline ────────────────────────────────────────────────────
    // Spinner only: the run has no meaningful intermediate progress, but
    // soffice can take several seconds on first launch.
    let spinner = if !cli.quiet && !cli.json {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message("Rendering and converting…");
        bar.enable_steady_tick(Duration::from_millis(80));
        Some(bar)
    } else {
        None
    };

    let result = generate(&config);
    if let Some(bar) = spinner {
        bar.finish_and_clear();
    }
    let output = result.context("Report generation failed")?;

    if cli.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output).context("Failed to serialise output")?
        );
    } else if !cli.quiet {
        println!(
            "{} Created: {} {}",
            green("✔"),
            bold(&output.pdf_path.display().to_string()),
            dim(&format!("(via {})", output.backend)),
        );
        println!(
            "   {} lines → {} blocks  {}ms render  {}ms convert",
            output.stats.body_lines,
            output.stats.body_blocks,
            output.stats.render_duration_ms,
            output.stats.convert_duration_ms,
        );
    }

    Ok(())
}

/// Map CLI args to `ReportConfig`.
fn build_config(cli: &Cli) -> Result<ReportConfig> {
    let mut meta = ReportMeta::default();
    if let Some(v) = &cli.title {
        meta.title = v.clone();
    }
    if let Some(v) = &cli.subtitle {
        meta.subtitle = v.clone();
    }
    if let Some(v) = &cli.project {
        meta.project_name = v.clone();
    }
    if let Some(v) = &cli.date {
        meta.report_date = v.clone();
    }
    if let Some(v) = &cli.student {
        meta.student_name = v.clone();
    }
    if let Some(v) = &cli.id {
        meta.usn_or_id = v.clone();
    }
    if let Some(v) = &cli.class_and_section {
        meta.class_and_section = v.clone();
    }
    if let Some(v) = &cli.department {
        meta.department = v.clone();
    }
    if let Some(v) = &cli.institution {
        meta.institution = v.clone();
    }
    if let Some(v) = &cli.guide {
        meta.guide_name = v.clone();
    }

    let styles = ReportStyles {
        body_font: cli.body_font.clone(),
        heading_font: cli.heading_font.clone(),
        body_size_pt: cli.body_size,
        margin_inches: cli.margin,
        ..ReportStyles::default()
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("pdf"));

    let mut builder = ReportConfig::builder()
        .input(&cli.input)
        .output(output)
        .meta(meta)
        .styles(styles);
    if let Some(docx) = &cli.docx {
        builder = builder.docx_output(docx);
    }

    builder.build().context("Invalid configuration")
}
