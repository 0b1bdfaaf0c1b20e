//! Conformance test helpers for Vellum.
//!
//! Provides shared pipeline functions that run markup through the full
//! pipeline (parse → scan → resolve → inline documents) and render the
//! resulting warnings, returning structured results for assertion in
//! integration tests.

#![warn(missing_docs)]

use vellum_config::VellumConfig;
use vellum_diagnostics::{PrinterOptions, Verbosity, Warning, WarningPrinter};
use vellum_model::{
    Analysis, Analyzer, Document, DocumentId, DocumentLanguage, DocumentTable, ResolutionMode,
    ScanResult, ScannedFeature, ScannedFunction, Scanner,
};
use vellum_source::{SourceDb, SourceFile, SourceRange};

/// Result of running the full pipeline on one page.
pub struct PipelineResult {
    /// Every document produced, the page and its inline documents.
    pub analysis: Analysis,
    /// In-memory sources the warnings point into.
    pub db: SourceDb,
    /// Id of the page itself.
    pub root: DocumentId,
    /// All warnings, in analysis order.
    pub warnings: Vec<Warning>,
    /// Number of error-severity warnings.
    pub error_count: usize,
}

impl PipelineResult {
    /// Codes of all warnings, in analysis order.
    pub fn codes(&self) -> Vec<&str> {
        self.warnings.iter().map(Warning::code).collect()
    }

    /// Renders every warning without colour at the given verbosity.
    pub fn render(&self, verbosity: Verbosity) -> String {
        let options = PrinterOptions {
            verbosity,
            color: false,
        };
        render_warnings(&self.db, options, &self.warnings)
    }
}

/// Runs the full pipeline on an HTML page with the built-in scanners.
pub fn full_pipeline_html(url: &str, source: &str) -> PipelineResult {
    run_pipeline(url, source, ResolutionMode::Sequential, Vec::new())
}

/// Runs the full pipeline with [`JsFunctionScanner`] reading inline scripts.
pub fn full_pipeline_with_js(url: &str, source: &str) -> PipelineResult {
    run_pipeline(
        url,
        source,
        ResolutionMode::Sequential,
        vec![Box::new(JsFunctionScanner)],
    )
}

/// Runs the full pipeline with `extra` scanners registered after the
/// built-in ones, in the given resolution mode.
pub fn run_pipeline(
    url: &str,
    source: &str,
    mode: ResolutionMode,
    extra: Vec<Box<dyn Scanner>>,
) -> PipelineResult {
    let db = SourceDb::in_memory();
    db.add_source(url, source);

    let mut analyzer = Analyzer::new(mode);
    vellum_html::register_scanners(&mut analyzer);
    for scanner in extra {
        analyzer.register(scanner);
    }

    let mut table = DocumentTable::new();
    let root = analyzer
        .analyze(&mut table, url, DocumentLanguage::Html, source)
        .expect("analysis of an in-memory page cannot hit an internal error");
    let analysis = Analysis::new(table);
    let warnings: Vec<Warning> = analysis.warnings().cloned().collect();
    let error_count = warnings.iter().filter(|w| w.severity().is_error()).count();
    PipelineResult {
        analysis,
        db,
        root,
        warnings,
        error_count,
    }
}

/// Renders `warnings` through a [`WarningPrinter`] reading from `db`.
pub fn render_warnings(db: &SourceDb, options: PrinterOptions, warnings: &[Warning]) -> String {
    let mut printer = WarningPrinter::new(Vec::new(), db, options);
    printer
        .print_warnings(warnings)
        .expect("writing to a Vec cannot fail");
    String::from_utf8(printer.into_inner()).expect("printer output is UTF-8")
}

/// Parses a `vellum.toml` body, panicking on invalid input.
pub fn make_config(toml: &str) -> VellumConfig {
    vellum_config::load_config_from_str(toml).expect("test config is valid")
}

/// A minimal JavaScript scanner for tests.
///
/// Every `function` keyword becomes a [`ScannedFunction`] named by the
/// identifier that follows it, ranging up to and including the next `}`.
/// Anonymous functions get an empty name and fail to resolve.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsFunctionScanner;

impl Scanner for JsFunctionScanner {
    fn name(&self) -> &str {
        "js-function"
    }

    fn language(&self) -> DocumentLanguage {
        DocumentLanguage::JavaScript
    }

    fn scan(&self, document: &Document) -> ScanResult {
        let contents = document.contents();
        let file = SourceFile::new(document.url(), contents.to_string());
        let locate = |byte: usize| {
            let pos = file.position_at(byte);
            match document.location_offset() {
                Some(offset) => pos.offset_by(offset),
                None => pos,
            }
        };

        let mut result = ScanResult::new();
        for (start, keyword) in contents.match_indices("function") {
            let before = contents[..start].chars().next_back();
            let rest = &contents[start + keyword.len()..];
            let after = rest.chars().next();
            if before.is_some_and(is_ident_char) || after.is_some_and(is_ident_char) {
                continue;
            }
            let name: String = rest
                .trim_start()
                .chars()
                .take_while(|&c| is_ident_char(c))
                .collect();
            let end = contents[start..]
                .find('}')
                .map_or(contents.len(), |close| start + close + 1);
            let range = SourceRange::new(document.url(), locate(start), locate(end));
            result
                .features
                .push(ScannedFeature::Function(ScannedFunction::new(name, range)));
        }
        result
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}
