//! Logging setup for the command line tool.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter; `--verbose` raises the crate to debug.
fn default_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new("itemized=debug,info")
    } else {
        EnvFilter::new("itemized=info")
    }
}

/// Installs a compact stderr subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_cli_logger(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbose));

    // A subscriber may already be installed (tests, embedding programs).
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .try_init();
}
