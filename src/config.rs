use chrono::{Duration, NaiveTime};
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use crate::models::{AllocationConfig, DefaultSlots};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub scheduling: SchedulingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SchedulingSettings {
    #[serde(default = "default_min_score")]
    pub min_score: u32,
    #[serde(default)]
    pub min_meetings_per_investor: u32,
    /// Investor ids allowed to receive new meetings; empty means all
    #[serde(default)]
    pub investor_filter: Vec<String>,
    #[serde(default = "default_slot_start")]
    pub default_slot_start: String,
    #[serde(default = "default_slot_minutes")]
    pub default_slot_minutes: u32,
    #[serde(default = "default_slot_count")]
    pub default_slot_count: u32,
}

impl Default for SchedulingSettings {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            min_meetings_per_investor: 0,
            investor_filter: Vec::new(),
            default_slot_start: default_slot_start(),
            default_slot_minutes: default_slot_minutes(),
            default_slot_count: default_slot_count(),
        }
    }
}

fn default_min_score() -> u32 { 70 }
fn default_slot_start() -> String { "09:00".to_string() }
fn default_slot_minutes() -> u32 { 20 }
fn default_slot_count() -> u32 { 12 }

impl SchedulingSettings {
    /// Build the engine configuration, rejecting values the engine cannot use
    pub fn to_allocation_config(&self) -> Result<AllocationConfig, ConfigError> {
        if self.min_score > 100 {
            return Err(ConfigError::Message(format!(
                "scheduling.min_score must be 0-100, got {}",
                self.min_score
            )));
        }
        if self.default_slot_minutes == 0 {
            return Err(ConfigError::Message(
                "scheduling.default_slot_minutes must be positive".to_string(),
            ));
        }

        let start = NaiveTime::parse_from_str(&self.default_slot_start, "%H:%M").map_err(|e| {
            ConfigError::Message(format!(
                "scheduling.default_slot_start {:?} is not HH:MM: {}",
                self.default_slot_start, e
            ))
        })?;

        // Slot times are NaiveTime, so the whole sequence must end before midnight
        let span = Duration::minutes(i64::from(self.default_slot_minutes) * i64::from(self.default_slot_count));
        let (_, wrapped) = start.overflowing_add_signed(span);
        if wrapped != 0 {
            return Err(ConfigError::Message(format!(
                "scheduling default slots ({} x {}min from {}) run past midnight",
                self.default_slot_count, self.default_slot_minutes, self.default_slot_start
            )));
        }

        let investor_filter = if self.investor_filter.is_empty() {
            None
        } else {
            Some(self.investor_filter.iter().cloned().collect::<BTreeSet<_>>())
        };

        Ok(AllocationConfig {
            min_score: self.min_score,
            min_meetings_per_investor: self.min_meetings_per_investor,
            investor_filter,
            default_slots: DefaultSlots {
                start,
                duration_minutes: self.default_slot_minutes,
                count: self.default_slot_count,
            },
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with MATCHMAKER_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., MATCHMAKER__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("MATCHMAKER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_platform_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("MATCHMAKER")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Honour the plain HOST / PORT variables set by container platforms
fn apply_platform_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(host) = env::var("HOST") {
        builder = builder.set_override("server.host", host)?;
    }
    if let Some(port) = env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        builder = builder.set_override("server.port", i64::from(port))?;
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheduling() {
        let scheduling = SchedulingSettings::default();
        let config = scheduling.to_allocation_config().unwrap();

        assert_eq!(config, AllocationConfig::default());
    }

    #[test]
    fn test_scheduling_from_toml() {
        let scheduling: SchedulingSettings = toml::from_str(
            r#"
            min_score = 60
            investor_filter = ["inv-1", "inv-2"]
            default_slot_start = "10:30"
            default_slot_count = 4
            "#,
        )
        .unwrap();

        let config = scheduling.to_allocation_config().unwrap();
        assert_eq!(config.min_score, 60);
        assert_eq!(config.investor_filter.map(|f| f.len()), Some(2));
        assert_eq!(config.default_slots.start, NaiveTime::from_hms_opt(10, 30, 0).unwrap());
        assert_eq!(config.default_slots.duration_minutes, 20);
        assert_eq!(config.default_slots.count, 4);
    }

    #[test]
    fn test_invalid_scheduling_rejected() {
        let bad_score = SchedulingSettings { min_score: 101, ..SchedulingSettings::default() };
        assert!(bad_score.to_allocation_config().is_err());

        let bad_start = SchedulingSettings { default_slot_start: "9am".to_string(), ..SchedulingSettings::default() };
        assert!(bad_start.to_allocation_config().is_err());
    }

    #[test]
    fn test_default_slots_must_end_before_midnight() {
        let late = SchedulingSettings { default_slot_start: "23:00".to_string(), ..SchedulingSettings::default() };
        assert!(late.to_allocation_config().is_err());

        // 20:00 + 12 x 20min ends exactly at midnight
        let to_midnight = SchedulingSettings { default_slot_start: "20:00".to_string(), ..SchedulingSettings::default() };
        assert!(to_midnight.to_allocation_config().is_err());

        let evening = SchedulingSettings { default_slot_start: "19:40".to_string(), ..SchedulingSettings::default() };
        let config = evening.to_allocation_config().unwrap();
        assert!(crate::core::Scheduler::new(config).generate(&[], &[], &[], &[]).is_ok());
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
