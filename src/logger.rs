//! Logging setup

use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Installs the global fmt subscriber. `RUST_LOG` wins over `level`.
    pub fn init(level: &str) {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        // A second init (e.g. from tests) is ignored.
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    }
}
