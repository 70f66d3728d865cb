//! Console tracing setup.
//!
//! Filtering follows `RUST_LOG`, e.g. `RUST_LOG=vulkano_editor=debug`.
//! Defaults to `info` so device and present-mode selection stay visible.

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub fn init() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

  tracing_subscriber::registry()
    .with(fmt::layer().with_target(true).with_filter(filter))
    .init();
}
