//! Tracing subscriber setup for the CLI.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter, e.g. `vellum_model=trace`.
pub const LOG_ENV: &str = "VELLUM_LOG";

/// Installs a stderr subscriber.
///
/// `VELLUM_LOG` wins when set. Otherwise `--verbose` logs at debug level,
/// `--quiet` only errors, and the default is warnings.
pub fn init(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose, quiet)));
    // a subscriber may already be installed when running under a test harness
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_directive(verbose: bool, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directive_precedence() {
        assert_eq!(default_directive(false, false), "warn");
        assert_eq!(default_directive(true, false), "debug");
        assert_eq!(default_directive(true, true), "error");
    }

    #[test]
    fn init_twice_is_harmless() {
        init(false, true);
        init(true, false);
    }
}
