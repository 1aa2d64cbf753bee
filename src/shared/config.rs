//! Application configuration. Paths, simulated backend latency, log filter.

use serde::Deserialize;
use std::path::PathBuf;

/// Default tracing filter when neither RUST_LOG nor TWEETER_LOG_FILTER is set.
/// Kept quiet so log lines do not interleave with prompts.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Root for persisted client state. Read from TWEETER_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Remembered-session file. Defaults to `{data_dir}/session.json`. Read from TWEETER_SESSION_PATH.
    #[serde(default)]
    pub session_path: Option<String>,

    /// Simulated latency of the in-memory backend, per call. Read from TWEETER_SERVICE_DELAY_MS.
    #[serde(default)]
    pub service_delay_ms: Option<u64>,

    /// tracing EnvFilter directive used when RUST_LOG is unset. Read from TWEETER_LOG_FILTER.
    #[serde(default)]
    pub log_filter: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("TWEETER"));
        if let Ok(path) = std::env::var("TWEETER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Numeric env values arrive as strings; parse explicitly so a typo falls back to the default.
        if let Ok(s) = std::env::var("TWEETER_SERVICE_DELAY_MS") {
            cfg.service_delay_ms = s.parse::<u64>().ok();
        }
        Ok(cfg)
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or("./data"))
    }

    pub fn session_path_or_default(&self) -> PathBuf {
        self.session_path
            .as_deref()
            .map(PathBuf::from)
            .unwrap_or_else(|| self.data_dir_or_default().join("session.json"))
    }

    /// Returns backend latency in milliseconds. Defaults to 0.
    pub fn service_delay_ms_or_default(&self) -> u64 {
        self.service_delay_ms.unwrap_or(0)
    }

    pub fn log_filter_or_default(&self) -> String {
        self.log_filter
            .clone()
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.data_dir_or_default(), PathBuf::from("./data"));
        assert_eq!(cfg.session_path_or_default(), PathBuf::from("./data/session.json"));
        assert_eq!(cfg.service_delay_ms_or_default(), 0);
        assert_eq!(cfg.log_filter_or_default(), "warn");
    }

    #[test]
    fn test_session_path_follows_data_dir() {
        let cfg = AppConfig {
            data_dir: Some("/tmp/tw".into()),
            ..AppConfig::default()
        };
        assert_eq!(cfg.session_path_or_default(), PathBuf::from("/tmp/tw/session.json"));
    }
}
