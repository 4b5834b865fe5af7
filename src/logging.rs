use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter when `RUST_LOG` is unset. Stays quiet unless something is wrong.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Install a stderr subscriber for `service`. Stdout carries the report, so
/// log output never goes there. Calling this twice is harmless.
pub fn init_tracing(service: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let initialized = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init()
        .is_ok();
    if initialized {
        tracing::debug!(service, "tracing initialized");
    }
}
