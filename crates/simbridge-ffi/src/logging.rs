//! Logging configuration
//!
//! The library only emits `tracing` events; a subscriber is installed when
//! the host asks for one through `simbridge_init` or [`init_logging`].

use simbridge_core::{BridgeError, BridgeResult};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding the filter directive
pub const LOG_ENV: &str = "SIMBRIDGE_LOG";

/// Environment variable selecting `json` or `text` output
pub const LOG_FORMAT_ENV: &str = "SIMBRIDGE_LOG_FORMAT";

/// Configuration for logging initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive, e.g. `warn` or `simbridge_ffi=trace`
    pub level: String,

    /// Emit JSON lines instead of human-readable text
    pub json_format: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json_format: false,
        }
    }
}

impl LogConfig {
    /// Read the configuration from `SIMBRIDGE_LOG` and `SIMBRIDGE_LOG_FORMAT`
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(level) = lookup(LOG_ENV).filter(|l| !l.trim().is_empty()) {
            config.level = level;
        }
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            config.json_format = format.eq_ignore_ascii_case("json");
        }
        config
    }

    /// Set the filter directive
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Enable JSON format
    pub fn with_json_format(mut self) -> Self {
        self.json_format = true;
        self
    }
}

/// Install a global subscriber for the given configuration
pub fn init_logging(config: &LogConfig) -> BridgeResult<()> {
    let filter = EnvFilter::try_new(&config.level)
        .map_err(|e| BridgeError::inv_arg(format!("invalid log filter {:?}: {e}", config.level)))?;

    let subscriber = tracing_subscriber::registry().with(filter);
    let result = if config.json_format {
        subscriber
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        subscriber
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|_| BridgeError::inv_arg("logging is already initialized"))
}
