use serde::Deserialize;

use crate::models::{
    DEFAULT_CPU_THRESHOLD_PERCENT, DEFAULT_DISK_IO_THRESHOLD, DEFAULT_MEM_THRESHOLD_MB, Thresholds,
};
use crate::scheduler::{
    DEFAULT_SAMPLE_INTERVAL_MS, DEFAULT_STATS_LOG_INTERVAL_SECS, SchedulerConfig,
};

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    #[serde(default)]
    pub monitoring: MonitoringConfig,
    #[serde(default)]
    pub thresholds: ThresholdsConfig,
    #[serde(default)]
    pub publishing: PublishingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    #[serde(default = "default_sample_interval_ms")]
    pub sample_interval_ms: u64,
    /// How often to log tick counters at INFO level.
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            sample_interval_ms: DEFAULT_SAMPLE_INTERVAL_MS,
            stats_log_interval_secs: DEFAULT_STATS_LOG_INTERVAL_SECS,
        }
    }
}

fn default_sample_interval_ms() -> u64 {
    DEFAULT_SAMPLE_INTERVAL_MS
}

fn default_stats_log_interval_secs() -> u64 {
    DEFAULT_STATS_LOG_INTERVAL_SECS
}

/// Raw threshold values as written in the file; validated by `AppConfig::thresholds`.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdsConfig {
    #[serde(default = "default_mem_threshold_mb")]
    pub mem_threshold_mb: f64,
    #[serde(default = "default_cpu_threshold_percent")]
    pub cpu_threshold_percent: f64,
    #[serde(default = "default_disk_io_threshold")]
    pub disk_io_threshold: f64,
}

impl Default for ThresholdsConfig {
    fn default() -> Self {
        Self {
            mem_threshold_mb: DEFAULT_MEM_THRESHOLD_MB,
            cpu_threshold_percent: DEFAULT_CPU_THRESHOLD_PERCENT,
            disk_io_threshold: DEFAULT_DISK_IO_THRESHOLD,
        }
    }
}

fn default_mem_threshold_mb() -> f64 {
    DEFAULT_MEM_THRESHOLD_MB
}

fn default_cpu_threshold_percent() -> f64 {
    DEFAULT_CPU_THRESHOLD_PERCENT
}

fn default_disk_io_threshold() -> f64 {
    DEFAULT_DISK_IO_THRESHOLD
}

#[derive(Debug, Clone, Deserialize)]
pub struct PublishingConfig {
    /// Push interval for the /ws/status stream.
    #[serde(default = "default_status_frequency_ms")]
    pub status_frequency_ms: u64,
}

impl Default for PublishingConfig {
    fn default() -> Self {
        Self {
            status_frequency_ms: default_status_frequency_ms(),
        }
    }
}

fn default_status_frequency_ms() -> u64 {
    1000
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn thresholds(&self) -> Result<Thresholds, crate::error::MonitorError> {
        let t = &self.thresholds;
        Thresholds::new(
            t.mem_threshold_mb,
            t.cpu_threshold_percent,
            t.disk_io_threshold,
        )
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        SchedulerConfig {
            sample_interval_ms: self.monitoring.sample_interval_ms,
            stats_log_interval_secs: self.monitoring.stats_log_interval_secs,
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.monitoring.sample_interval_ms > 0,
            "monitoring.sample_interval_ms must be > 0, got {}",
            self.monitoring.sample_interval_ms
        );
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        anyhow::ensure!(
            self.publishing.status_frequency_ms > 0,
            "publishing.status_frequency_ms must be > 0, got {}",
            self.publishing.status_frequency_ms
        );
        self.thresholds()?;
        Ok(())
    }
}
