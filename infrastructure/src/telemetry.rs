use tracing::level_filters::LevelFilter;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a global `fmt` subscriber filtered by `RUST_LOG`, defaulting to INFO.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    let filter: EnvFilter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
}
