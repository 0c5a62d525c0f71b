use std::time::Duration;

use serde::Deserialize;

use crate::rollover::RolloverConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub banners: BannersConfig,
    pub rollover: RolloverSettings,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BannersConfig {
    /// Number of banner slots; valid ids are `0..max_banners` internally, `1..=max_banners` on the wire.
    pub max_banners: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RolloverSettings {
    pub interval_secs: u64,
    #[serde(default = "default_drain_on_shutdown")]
    pub drain_on_shutdown: bool,
    /// Drop snapshots older than this many seconds. Unset keeps all history.
    #[serde(default)]
    pub retention_secs: Option<u64>,
}

fn default_drain_on_shutdown() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    /// How often to log app stats (clicks, snapshots recorded, history length) at INFO level.
    pub stats_log_interval_secs: u64,
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_with_overrides(&s, |key| std::env::var(key).ok())
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        Self::load_with_overrides(s, |_| None)
    }

    /// Parse, then let `PORT` and `MAX_BANNERS` from `lookup` win over the file, then validate.
    pub fn load_with_overrides(
        s: &str,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> anyhow::Result<Self> {
        let mut config: AppConfig = toml::from_str(s)?;
        if let Some(port) = lookup("PORT") {
            config.server.port = port
                .parse::<u16>()
                .map_err(|e| anyhow::anyhow!("PORT must be a port number, got {:?}: {}", port, e))?;
        }
        if let Some(max) = lookup("MAX_BANNERS") {
            config.banners.max_banners = max.parse::<usize>().map_err(|e| {
                anyhow::anyhow!("MAX_BANNERS must be a positive integer, got {:?}: {}", max, e)
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(!self.server.host.is_empty(), "server.host must be non-empty");
        anyhow::ensure!(
            self.banners.max_banners > 0,
            "banners.max_banners must be > 0, got {}",
            self.banners.max_banners
        );
        anyhow::ensure!(
            self.rollover.interval_secs > 0,
            "rollover.interval_secs must be > 0, got {}",
            self.rollover.interval_secs
        );
        if let Some(retention) = self.rollover.retention_secs {
            anyhow::ensure!(
                retention >= self.rollover.interval_secs,
                "rollover.retention_secs must be >= rollover.interval_secs, got {}",
                retention
            );
        }
        anyhow::ensure!(
            self.monitoring.stats_log_interval_secs > 0,
            "monitoring.stats_log_interval_secs must be > 0, got {}",
            self.monitoring.stats_log_interval_secs
        );
        Ok(())
    }

    pub fn rollover_config(&self) -> RolloverConfig {
        RolloverConfig {
            interval: Duration::from_secs(self.rollover.interval_secs),
            stats_log_interval: Duration::from_secs(self.monitoring.stats_log_interval_secs),
            drain_on_shutdown: self.rollover.drain_on_shutdown,
            retention: self.rollover.retention_secs.map(Duration::from_secs),
        }
    }
}
