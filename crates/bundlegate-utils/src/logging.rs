//! Tracing initialization for the bundlegate CLI.
//!
//! Structured logging via `tracing`; the CLI calls [`init_tracing`] once
//! at startup. `RUST_LOG` overrides the built-in filter.

use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize the global tracing subscriber.
///
/// Compact human-readable output by default; `verbose` raises the filter
/// to debug and includes targets. Safe to call once per process; a second
/// call returns an error from the subscriber registry.
pub fn init_tracing(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| {
            if verbose {
                EnvFilter::try_new("bundlegate=debug,info")
            } else {
                EnvFilter::try_new("bundlegate=info,warn")
            }
        })
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_line_number(false)
                .with_file(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_tracing_is_single_shot() {
        // First init in this process wins; a second must error rather
        // than panic or silently replace the subscriber.
        let first = init_tracing(false);
        let second = init_tracing(true);
        assert!(first.is_ok() || second.is_err());
    }
}
