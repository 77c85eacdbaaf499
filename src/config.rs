use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub log_dir: String,
    pub log_file: String,
    pub use_json: bool,
    pub rotation: String,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

/// Ledger service tuning: request queue capacity and the per-call
/// timeout every handle applies when awaiting a reply.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LedgerConfig {
    pub queue_size: usize,
    pub request_timeout_ms: u64,
}

impl LedgerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            queue_size: 128,
            request_timeout_ms: 3000,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "./logs".to_string(),
            log_file: "bankcore.log".to_string(),
            use_json: false,
            rotation: "daily".to_string(),
            ledger: LedgerConfig::default(),
        }
    }
}

impl AppConfig {
    pub fn load(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        let content = fs::read_to_string(&config_path)
            .unwrap_or_else(|_| panic!("Failed to read config file: {}", config_path));
        serde_yaml::from_str(&content).expect("Failed to parse config yaml")
    }

    /// Like [`load`](Self::load), but falls back to defaults when the
    /// config file is absent.
    pub fn load_or_default(env: &str) -> Self {
        let config_path = format!("config/{}.yaml", env);
        match fs::read_to_string(&config_path) {
            Ok(content) => serde_yaml::from_str(&content).expect("Failed to parse config yaml"),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ledger.queue_size, 128);
        assert_eq!(config.ledger.request_timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_ledger_section_is_optional() {
        let config: AppConfig = serde_yaml::from_str(
            r#"
log_level: debug
log_dir: ./logs
log_file: test.log
use_json: false
rotation: never
"#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.ledger.request_timeout_ms, 3000);
    }
}
