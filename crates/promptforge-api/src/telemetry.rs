//! Tracing initialization.

use tracing_subscriber::{
    fmt::format::Format, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing with a compact console format.
///
/// Uses `try_init` so repeated calls (e.g. from tests) are a no-op instead
/// of a panic.
pub fn init_telemetry() {
    let console_fmt = tracing_subscriber::fmt::layer().event_format(
        Format::default()
            .compact()
            .with_target(false)
            .without_time(),
    );
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    "promptforge_api=debug,promptforge_db=debug,promptforge_core=debug,promptforge_providers=debug,tower_http=debug"
                        .into()
                }),
        )
        .with(console_fmt)
        .try_init();
}
