//! Vellum CLI: checks markup documents and prints their warnings.
//!
//! `vellum check` discovers HTML files, scans and resolves them along with
//! their inline scripts and styles, and renders every warning with the
//! offending source text underlined.

#![warn(missing_docs)]

mod check;
mod logging;
mod pipeline;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use vellum_diagnostics::Verbosity;

/// Exit code when the tool itself failed.
const EXIT_INTERNAL: i32 = 2;

/// Vellum: static analysis for markup and script documents.
#[derive(Parser, Debug)]
#[command(name = "vellum", version, about = "Vellum document analyzer")]
pub struct Cli {
    /// Suppress all output except warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `vellum.toml` file, or a directory containing one.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze documents and print their warnings.
    Check(CheckArgs),
}

/// Arguments for the `vellum check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Files or directories to check.
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// How much to print per warning. Overrides `[output] verbosity`.
    #[arg(long, value_enum)]
    pub verbosity: Option<VerbosityArg>,

    /// Output format. Overrides `[output] format`.
    #[arg(short, long, value_enum)]
    pub format: Option<ReportFormat>,

    /// Resolve features on all cores.
    #[arg(long)]
    pub parallel: bool,
}

/// Per-warning verbosity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum VerbosityArg {
    /// Underlined source block plus summary line.
    Full,
    /// Summary line only.
    OneLine,
}

impl From<VerbosityArg> for Verbosity {
    fn from(arg: VerbosityArg) -> Self {
        match arg {
            VerbosityArg::Full => Verbosity::Full,
            VerbosityArg::OneLine => Verbosity::OneLine,
        }
    }
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Color when stderr is a terminal and the config allows it.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Warning output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-warning output.
    pub quiet: bool,
    /// Whether to print debug logs.
    pub verbose: bool,
    /// Requested color mode.
    pub color: ColorChoice,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

impl GlobalArgs {
    /// Decides whether to color output, given the config file's `color`.
    pub fn use_color(&self, config_color: bool) -> bool {
        match self.color {
            ColorChoice::Auto => config_color && std::io::stderr().is_terminal(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color: cli.color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Check(ref args) => check::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(EXIT_INTERNAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_check_default() {
        let cli = Cli::parse_from(["vellum", "check"]);
        match cli.command {
            Command::Check(ref args) => {
                assert_eq!(args.paths, vec![PathBuf::from(".")]);
                assert!(args.verbosity.is_none());
                assert!(args.format.is_none());
                assert!(!args.parallel);
            }
        }
        assert_eq!(cli.color, ColorChoice::Auto);
        assert!(cli.config.is_none());
    }

    #[test]
    fn parse_check_with_args() {
        let cli = Cli::parse_from([
            "vellum",
            "check",
            "site/index.html",
            "docs",
            "--verbosity",
            "one-line",
            "--format",
            "json",
            "--parallel",
        ]);
        let Command::Check(ref args) = cli.command;
        assert_eq!(
            args.paths,
            vec![PathBuf::from("site/index.html"), PathBuf::from("docs")]
        );
        assert_eq!(args.verbosity, Some(VerbosityArg::OneLine));
        assert_eq!(args.format, Some(ReportFormat::Json));
        assert!(args.parallel);
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["vellum", "--quiet", "--color", "never", "check"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["vellum", "check", "-v", "--config", "ci/vellum.toml"]);
        assert!(cli.verbose);
        assert_eq!(cli.config.as_deref(), Some("ci/vellum.toml"));
    }

    #[test]
    fn unknown_verbosity_is_rejected() {
        let err = Cli::try_parse_from(["vellum", "check", "--verbosity", "loud"]);
        assert!(err.is_err());
    }

    #[test]
    fn verbosity_arg_conversion() {
        assert_eq!(Verbosity::from(VerbosityArg::Full), Verbosity::Full);
        assert_eq!(Verbosity::from(VerbosityArg::OneLine), Verbosity::OneLine);
    }

    #[test]
    fn explicit_color_choices_ignore_config() {
        let mut global = GlobalArgs {
            quiet: false,
            verbose: false,
            color: ColorChoice::Always,
            config: None,
        };
        assert!(global.use_color(false));
        global.color = ColorChoice::Never;
        assert!(!global.use_color(true));
        global.color = ColorChoice::Auto;
        assert!(!global.use_color(false));
    }
}
