//! Shared pipeline helpers: config lookup, document discovery, analysis.

use std::path::{Path, PathBuf};

use tracing::debug;
use vellum_config::{load_config_from_str, load_config_or_default, AnalysisConfig, VellumConfig};
use vellum_model::{Analysis, Analyzer, DocumentLanguage, DocumentTable, ResolutionMode};
use vellum_source::{ContentLoader, SourceDb};

use crate::GlobalArgs;

/// Loads the configuration named by `--config`, or `vellum.toml` in the
/// current directory, falling back to defaults when there is none.
///
/// `--config` may name the file itself or the directory holding it.
pub fn load_project_config(global: &GlobalArgs) -> Result<VellumConfig, Box<dyn std::error::Error>> {
    match &global.config {
        Some(path) => {
            let path = PathBuf::from(path);
            if path.is_file() {
                let content = std::fs::read_to_string(&path)?;
                Ok(load_config_from_str(&content)?)
            } else if path.is_dir() {
                Ok(load_config_or_default(&path)?)
            } else {
                Err(format!("config file {} does not exist", path.display()).into())
            }
        }
        None => Ok(load_config_or_default(&std::env::current_dir()?)?),
    }
}

/// Expands `paths` into the documents to check, sorted and deduplicated.
///
/// Files named explicitly are always checked. Directories are walked
/// recursively for files with a configured extension; hidden entries are
/// skipped.
pub fn discover_documents(
    paths: &[PathBuf],
    config: &AnalysisConfig,
) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut files = Vec::new();
    for path in paths {
        if path.is_dir() {
            walk_dir(path, config, &mut files)?;
        } else if path.is_file() {
            files.push(path.clone());
        } else {
            return Err(format!("{} does not exist", path.display()).into());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_dir(
    dir: &Path,
    config: &AnalysisConfig,
    files: &mut Vec<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with('.'));
        if hidden {
            continue;
        }
        if path.is_dir() {
            walk_dir(&path, config, files)?;
        } else if path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| config.matches_extension(e))
        {
            files.push(path);
        }
    }
    Ok(())
}

/// Language of a discovered document. Unrecognized extensions were opted in
/// through the config, so they are read as markup.
pub fn language_of(path: &Path) -> DocumentLanguage {
    DocumentLanguage::from_path(path).unwrap_or(DocumentLanguage::Html)
}

/// Builds an analyzer with every built-in scanner.
pub fn build_analyzer(parallel: bool) -> Analyzer {
    let mode = if parallel {
        ResolutionMode::Parallel
    } else {
        ResolutionMode::Sequential
    };
    let mut analyzer = Analyzer::new(mode);
    vellum_html::register_scanners(&mut analyzer);
    analyzer
}

/// Loads each file through `db` and analyzes it into one [`Analysis`].
pub fn analyze_files(
    files: &[PathBuf],
    db: &SourceDb,
    analyzer: &Analyzer,
) -> Result<Analysis, Box<dyn std::error::Error>> {
    let mut table = DocumentTable::new();
    for path in files {
        let file = db.load(path)?;
        let id = analyzer.analyze(&mut table, path.clone(), language_of(path), &file.content)?;
        debug!(path = %path.display(), %id, "analyzed file");
    }
    Ok(Analysis::new(table))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorChoice;
    use std::fs;
    use tempfile::TempDir;
    use vellum_diagnostics::Verbosity;

    fn global(config: Option<&Path>) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: ColorChoice::Never,
            config: config.map(|p| p.display().to_string()),
        }
    }

    #[test]
    fn config_from_file_or_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("vellum.toml");
        fs::write(&file, "[output]\nverbosity = \"one-line\"\n").unwrap();

        let from_file = load_project_config(&global(Some(file.as_path()))).unwrap();
        assert_eq!(from_file.output.verbosity, Verbosity::OneLine);
        let from_dir = load_project_config(&global(Some(tmp.path()))).unwrap();
        assert_eq!(from_dir.output.verbosity, Verbosity::OneLine);
    }

    #[test]
    fn missing_config_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("nope.toml");
        assert!(load_project_config(&global(Some(missing.as_path()))).is_err());
    }

    #[test]
    fn discovery_filters_by_extension_and_skips_hidden() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("pages/nested")).unwrap();
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::write(root.join("index.html"), "").unwrap();
        fs::write(root.join("pages/about.HTM"), "").unwrap();
        fs::write(root.join("pages/nested/app.js"), "").unwrap();
        fs::write(root.join(".git/x.html"), "").unwrap();

        let files = discover_documents(&[root.to_path_buf()], &AnalysisConfig::default()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(root).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![PathBuf::from("index.html"), PathBuf::from("pages/about.HTM")]
        );
    }

    #[test]
    fn explicit_files_are_always_checked() {
        let tmp = TempDir::new().unwrap();
        let js = tmp.path().join("app.js");
        fs::write(&js, "").unwrap();
        let files =
            discover_documents(&[js.clone(), js.clone()], &AnalysisConfig::default()).unwrap();
        assert_eq!(files, vec![js]);
    }

    #[test]
    fn missing_path_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = discover_documents(&[tmp.path().join("gone")], &AnalysisConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn languages() {
        assert_eq!(language_of(Path::new("a.html")), DocumentLanguage::Html);
        assert_eq!(language_of(Path::new("a.js")), DocumentLanguage::JavaScript);
        assert_eq!(language_of(Path::new("a.vue")), DocumentLanguage::Html);
    }

    #[test]
    fn analyze_files_builds_inline_children() {
        let tmp = TempDir::new().unwrap();
        let page = tmp.path().join("index.html");
        fs::write(&page, "<script>go()</script>\n<script src=\"\"></script>\n").unwrap();

        let db = SourceDb::new();
        let analysis = analyze_files(&[page], &db, &build_analyzer(false)).unwrap();
        assert_eq!(analysis.documents().count(), 2);
        assert_eq!(analysis.error_count(), 1);
    }
}
