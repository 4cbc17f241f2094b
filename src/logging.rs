//! Logging init for the command-line tool: structured events to stderr.
//!
//! Library code only emits `debug!`/`trace!` events with non-secret metadata
//! (algorithm ids, lengths, flags); it never installs a subscriber itself.

use tracing_subscriber::EnvFilter;

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,pwmaker=info",
        2 => "info,pwmaker=debug",
        _ => "info,pwmaker=trace",
    }
}

/// Install a stderr subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init_logging(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}
