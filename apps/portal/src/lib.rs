pub mod config;
pub mod corpus;
pub mod errors;
pub mod matching;
pub mod model;
pub mod routes;
pub mod state;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initializes structured logging for a binary. `RUST_LOG` wins over the
/// configured default level.
pub fn init_tracing(default_level: &str) {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level.to_string())),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
