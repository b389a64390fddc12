use anyhow::{Context, Result, bail};
use chrono::FixedOffset;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub controller: ControllerConfig,
    pub intervals: IntervalConfig,
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub directory: String,
    pub debug_file: String,
    pub info_file: String,
    pub warn_file: String,
    pub error_file: String,
    pub console_level: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ControllerConfig {
    pub base_url: String,
    #[serde(default = "default_status_path")]
    pub status_path: String,
    #[serde(default = "default_schedules_path")]
    pub schedules_path: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct IntervalConfig {
    #[serde(default = "default_poll_interval_millis")]
    pub poll_interval_millis: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_seconds: Option<u64>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct DisplayConfig {
    /// Fixed offset used for "now" and for timestamps. Falls back to the host's local zone.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

fn default_status_path() -> String {
    "/status".to_string()
}

fn default_schedules_path() -> String {
    "/api/horarios".to_string()
}

fn default_login_path() -> String {
    "/login".to_string()
}

fn default_poll_interval_millis() -> u64 {
    5000
}

impl ControllerConfig {
    pub fn credentials(&self) -> Option<(String, String)> {
        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Some((email.clone(), password.clone())),
            _ => None,
        }
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        let base = Url::parse(&self.base_url)
            .with_context(|| format!("Invalid controller base_url \"{}\"", self.base_url))?;
        base.join(path)
            .with_context(|| format!("Unable to join \"{}\" onto \"{}\"", path, self.base_url))
    }
}

impl IntervalConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_millis)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_seconds.map(Duration::from_secs)
    }
}

impl DisplayConfig {
    pub fn utc_offset(&self) -> Result<Option<FixedOffset>> {
        match self.utc_offset_minutes {
            None => Ok(None),
            Some(minutes) => match minutes.checked_mul(60).and_then(FixedOffset::east_opt) {
                Some(offset) => Ok(Some(offset)),
                None => bail!("utc_offset_minutes {} is out of range", minutes),
            },
        }
    }
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.controller.endpoint(&self.controller.status_path)?;
        self.controller.endpoint(&self.controller.schedules_path)?;
        self.controller.endpoint(&self.controller.login_path)?;
        if self.controller.email.is_some() != self.controller.password.is_some() {
            bail!("controller.email and controller.password must be set together");
        }
        if self.intervals.poll_interval_millis == 0 {
            bail!("intervals.poll_interval_millis must be greater than zero");
        }
        self.display.utc_offset()?;
        Ok(())
    }

    pub fn example() -> Self {
        Config {
            logging: LoggingConfig {
                directory: "./logs".to_string(),
                debug_file: "log_debug.log".to_string(),
                info_file: "log_info.log".to_string(),
                warn_file: "log_warn.log".to_string(),
                error_file: "log_error.log".to_string(),
                console_level: "info".to_string(),
            },
            controller: ControllerConfig {
                base_url: "http://192.168.1.50:5000".to_string(),
                status_path: default_status_path(),
                schedules_path: default_schedules_path(),
                login_path: default_login_path(),
                email: Some("REPLACE_WITH_YOUR_EMAIL".to_string()),
                password: Some("REPLACE_WITH_YOUR_PASSWORD".to_string()),
            },
            intervals: IntervalConfig {
                poll_interval_millis: default_poll_interval_millis(),
                request_timeout_seconds: None,
            },
            display: DisplayConfig {
                utc_offset_minutes: Some(-180),
            },
        }
    }

    pub fn save_example(path: &str) -> Result<()> {
        let toml_content = toml::to_string_pretty(&Self::example())?;
        fs::write(path, toml_content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_config_round_trips_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let path = path.to_str().unwrap();

        Config::save_example(path).unwrap();
        let loaded = Config::from_file(path).unwrap();

        assert_eq!(loaded.controller.base_url, "http://192.168.1.50:5000");
        assert_eq!(loaded.intervals.poll_interval_millis, 5000);
        assert_eq!(loaded.display.utc_offset_minutes, Some(-180));
    }

    #[test]
    fn missing_optional_sections_use_defaults() {
        let content = r#"
            [logging]
            directory = "./logs"
            debug_file = "d.log"
            info_file = "i.log"
            warn_file = "w.log"
            error_file = "e.log"
            console_level = "debug"

            [controller]
            base_url = "http://controller.local"

            [intervals]

            [display]
        "#;
        let config: Config = toml::from_str(content).unwrap();
        config.validate().unwrap();

        assert_eq!(config.controller.status_path, "/status");
        assert_eq!(config.controller.schedules_path, "/api/horarios");
        assert_eq!(config.intervals.poll_interval(), Duration::from_secs(5));
        assert!(config.intervals.request_timeout().is_none());
        assert!(config.controller.credentials().is_none());
        assert!(config.display.utc_offset().unwrap().is_none());
    }

    #[test]
    fn endpoint_joins_paths_onto_base_url() {
        let controller = Config::example().controller;
        let url = controller.endpoint("/api/horarios").unwrap();
        assert_eq!(url.as_str(), "http://192.168.1.50:5000/api/horarios");
    }

    #[test]
    fn rejects_bad_base_url() {
        let mut config = Config::example();
        config.controller.base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_offset() {
        let mut config = Config::example();
        config.display.utc_offset_minutes = Some(24 * 60);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_offset_that_overflows_seconds() {
        let display = DisplayConfig {
            utc_offset_minutes: Some(71_582_789),
        };
        assert!(display.utc_offset().is_err());

        let display = DisplayConfig {
            utc_offset_minutes: Some(i32::MIN),
        };
        assert!(display.utc_offset().is_err());
    }

    #[test]
    fn rejects_half_configured_credentials() {
        let mut config = Config::example();
        config.controller.password = None;
        assert!(config.validate().is_err());
    }
}
