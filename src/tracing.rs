//! Tracing setup for binaries and ad-hoc debugging
//!
//! The library itself only emits events (targets `gesture`, `panels`,
//! `animation`); installing a subscriber is the host's job. The `replay`
//! binary uses this helper.
//!
//! Configure via the RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=gesture=trace,panels=debug` - scoped filtering

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize a console subscriber that respects RUST_LOG
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}
