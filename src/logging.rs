//! Diagnostic logging for the CLI
//!
//! Engine internals log through `tracing`. The report itself goes to stdout,
//! so log lines are always written to stderr.
//!
//! Level selection, first match wins:
//! 1. `--quiet`: errors only
//! 2. `-v` / `-vv`: debug / trace for this crate
//! 3. `RUST_LOG`
//! 4. warnings for this crate

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_DIRECTIVE: &str = "loop_de_loop=warn";

fn directive(verbose: u8, quiet: bool) -> Option<&'static str> {
    match (quiet, verbose) {
        (true, _) => Some("loop_de_loop=error"),
        (false, 0) => None,
        (false, 1) => Some("loop_de_loop=debug"),
        (false, _) => Some("loop_de_loop=trace"),
    }
}

/// Install the global subscriber
///
/// Calling this more than once keeps the first subscriber.
pub fn init_logging(verbose: u8, quiet: bool) {
    let filter = match directive(verbose, quiet) {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(console::colors_enabled_stderr())
        .compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}
