use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default directive for a `-v` count.
///
/// Warnings are always shown; each `-v` opens one more level for this crate
/// only.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "warn,covmap=info",
        2 => "warn,covmap=debug",
        _ => "warn,covmap=trace",
    }
}

/// Install a stderr subscriber. `RUST_LOG` takes precedence over the
/// verbosity count.
///
/// Returns `false` when a global subscriber was already set; the existing
/// one stays in place and receives a debug event about the skipped install.
pub fn init_tracing(verbosity: u8) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    match tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
    {
        Ok(()) => true,
        Err(error) => {
            ::tracing::debug!(%error, "subscriber already installed, keeping it");
            false
        }
    }
}
