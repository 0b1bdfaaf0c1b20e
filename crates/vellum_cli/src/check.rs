//! `vellum check`: analyze documents and report warnings.
//!
//! 1. Load `vellum.toml` (or defaults) and apply CLI overrides
//! 2. Discover documents under the given paths
//! 3. Scan and resolve each document and its inline documents
//! 4. Print every warning, as text or JSON

use std::io::Write;

use vellum_diagnostics::{PrintError, PrinterOptions, Warning, WarningPrinter};
use vellum_model::Analysis;
use vellum_source::SourceDb;

use crate::pipeline::{analyze_files, build_analyzer, discover_documents, load_project_config};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `vellum check` command.
///
/// Returns exit code 0 when no warning is an error and 1 otherwise.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_project_config(global)?;

    let format = args.format.unwrap_or(match config.output.format {
        vellum_config::OutputFormat::Text => ReportFormat::Text,
        vellum_config::OutputFormat::Json => ReportFormat::Json,
    });
    let options = PrinterOptions {
        verbosity: args.verbosity.map_or(config.output.verbosity, Into::into),
        color: global.use_color(config.output.color),
    };
    let parallel = args.parallel || config.analysis.parallel;

    let files = discover_documents(&args.paths, &config.analysis)?;
    if files.is_empty() {
        if !global.quiet {
            eprintln!("warning: no documents found");
        }
        return Ok(0);
    }
    if !global.quiet {
        eprintln!("   Checking {} document(s)", files.len());
    }

    let db = SourceDb::new();
    let analysis = analyze_files(&files, &db, &build_analyzer(parallel))?;
    if global.verbose && !global.quiet {
        for (id, doc) in analysis.documents() {
            eprintln!(
                "   {id} {} [{}]: {} feature(s)",
                doc.url().display(),
                doc.language(),
                doc.feature_count()
            );
        }
    }

    let warnings = sorted_warnings(&analysis);
    match format {
        ReportFormat::Text => {
            let stderr = std::io::stderr();
            render_text(stderr.lock(), &db, options, &warnings)?;
        }
        ReportFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&warnings)?);
        }
    }

    let error_count = warnings.iter().filter(|w| w.severity().is_error()).count();
    if !global.quiet && format == ReportFormat::Text {
        eprintln!(
            "   Result: {} error(s), {} other warning(s)",
            error_count,
            warnings.len() - error_count
        );
    }

    Ok(if error_count > 0 { 1 } else { 0 })
}

/// All warnings of the analysis ordered by file, then position.
///
/// Warnings without a range come first. The sort is stable, so warnings at
/// the same position keep their analysis order.
pub fn sorted_warnings(analysis: &Analysis) -> Vec<&Warning> {
    let mut warnings: Vec<&Warning> = analysis.warnings().collect();
    warnings.sort_by(|a, b| {
        let key = |w: &Warning| w.source_range().map(|r| (r.file.clone(), r.start));
        key(a).cmp(&key(b))
    });
    warnings
}

/// Prints `warnings` through a [`WarningPrinter`] reading source text from `db`.
pub fn render_text<W: Write>(
    out: W,
    db: &SourceDb,
    options: PrinterOptions,
    warnings: &[&Warning],
) -> Result<usize, PrintError> {
    let mut printer = WarningPrinter::new(out, db, options);
    printer.print_warnings(warnings.iter().copied())
}
