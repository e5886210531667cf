use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Structured JSON logs on stderr; stdout stays reserved for payload
/// output. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();
}
