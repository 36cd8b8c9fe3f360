//! Log subscriber installed by the binary

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when `RUST_LOG` is not set
pub const fn default_directive(quiet: bool) -> &'static str {
    if quiet { "brickify=warn" } else { "brickify=info" }
}

/// Filter from `RUST_LOG`, falling back to [`default_directive`]
pub fn env_filter(quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(quiet)))
}

/// Install the stderr subscriber; later calls are ignored
pub fn init(quiet: bool) {
    let _ = tracing_subscriber::registry()
        .with(env_filter(quiet))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
