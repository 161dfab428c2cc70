//! tracing-subscriber setup. Everything goes to stderr; stdout is reserved
//! for `--print` output and listings.

use tracing_subscriber::EnvFilter;

use crate::infra::config::Verbosity;

fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "gonav=debug",
        Verbosity::ExtraVerbose => "gonav=trace",
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the flags.
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (tests) is harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
