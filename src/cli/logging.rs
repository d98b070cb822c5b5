//! Diagnostic logging setup

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Environment variable with filter directives, checked before `RUST_LOG`
pub const LOG_ENV: &str = "CLIPTRAIL_LOG";

/// Filter used when neither environment variable is set
fn default_directives(verbose: bool) -> String {
    let level = if verbose { "debug" } else { "info" };
    format!("cliptrail={level},warn")
}

/// Install the stderr log subscriber.
///
/// Calling this twice is harmless; the second call is ignored.
pub fn init_logging(verbose: bool) {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_crate_level() {
        assert_eq!(default_directives(false), "cliptrail=info,warn");
        assert_eq!(default_directives(true), "cliptrail=debug,warn");
    }
}
