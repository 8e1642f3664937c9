use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

use crate::session::SessionTimings;

fn default_results_url() -> String {
    "http://127.0.0.1:8000/elections/results/public/".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Public results endpoint polled by the dashboard
    #[serde(default = "default_results_url")]
    pub results_url: String,

    /// Seconds between results polls
    pub poll_interval_secs: u64,

    /// Per-request timeout for results and ballot posts
    pub request_timeout_secs: u64,

    /// Voting session countdown duration
    pub session_duration_secs: u32,

    /// Remaining seconds at which the timer enters its warning state
    pub warning_threshold_secs: u32,

    /// Delay between expiry and the forced submission
    pub grace_delay_secs: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            results_url: default_results_url(),
            poll_interval_secs: 10,
            request_timeout_secs: 10,
            session_duration_secs: 600, // 10 minute voting session
            warning_threshold_secs: 60,
            grace_delay_secs: 3,
        }
    }
}

impl ClientConfig {
    /// Load configuration from the app's config directory.
    /// Creates default config if file doesn't exist.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = fs::read_to_string(&config_path)?;
            let config: ClientConfig = serde_json::from_str(&content)?;
            println!("✓ Loaded config from: {}", config_path.display());
            Ok(config)
        } else {
            let config = ClientConfig::default();
            config.save()?;
            println!("✓ Created default config at: {}", config_path.display());
            println!("  Edit this file to customize settings.");
            Ok(config)
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, json)?;

        Ok(())
    }

    /// Get the config file path (in app's base directory)
    fn config_path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        let exe_path = env::current_exe()?;
        let exe_dir = exe_path
            .parent()
            .ok_or("Could not determine executable directory")?;

        let config_dir = exe_dir.join("config");
        Ok(config_dir.join("config.json"))
    }

    pub fn session_timings(&self) -> SessionTimings {
        SessionTimings {
            duration_secs: self.session_duration_secs,
            warning_secs: self.warning_threshold_secs,
            grace_secs: self.grace_delay_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.poll_interval_secs, 10);
        assert_eq!(config.session_duration_secs, 600);
        assert_eq!(config.warning_threshold_secs, 60);
        assert_eq!(config.grace_delay_secs, 3);
    }

    #[test]
    fn test_config_serialization() {
        let config = ClientConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: ClientConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.results_url, deserialized.results_url);
        assert_eq!(
            config.session_duration_secs,
            deserialized.session_duration_secs
        );
    }

    #[test]
    fn test_session_timings_mapping() {
        let config = ClientConfig::default();
        let timings = config.session_timings();
        assert_eq!(timings.duration_secs, 600);
        assert_eq!(timings.warning_secs, 60);
        assert_eq!(timings.grace_secs, 3);
    }
}
