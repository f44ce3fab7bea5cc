//! Diagnostic tracing for the scaffolder.
//!
//! Tracing output is diagnostics only and goes to stderr. Everything the user
//! is meant to read (prompts, the proposal, outcome messages) goes through
//! [`crate::io::console::Console`] instead, so raising `RUST_LOG` never
//! changes what the interactive session prints on stdout.

use std::io::IsTerminal;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "warn";

/// Install the global subscriber.
///
/// `RUST_LOG` selects the filter (default `warn`). Colours are only used when
/// stderr is a terminal so piped diagnostics stay plain text.
///
/// ```bash
/// RUST_LOG=scaffolder=debug scaffolder --config scaffolder.toml
/// ```
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let ansi = std::io::stderr().is_terminal();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(ansi)
                .with_target(false)
                .compact(),
        )
        .init();
}
