use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::time::Duration;

pub mod profile;
pub mod settings;

pub use profile::Profile;
pub use settings::Settings;

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Sensor table OIDs
    pub profile: Profile,
    /// Base settings
    pub settings: Settings,
}

impl AppConfig {
    /// Loads the configuration from a YAML file, or defaults when no file is given
    pub fn load(path: Option<impl AsRef<Path>>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;

        Self::from_yaml(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: AppConfig = serde_yml::from_str(content)?;
        Ok(config)
    }

    /// Overrides file values with `SNMP_TARGETS`, `SNMP_COMMUNITY`,
    /// `SNMP_PORT` and `SNMP_TIMEOUT` when they are set
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(targets) = env::var("SNMP_TARGETS") {
            self.settings.targets = targets;
        }
        if let Ok(community) = env::var("SNMP_COMMUNITY") {
            self.settings.auth.v2c.community = community;
        }
        if let Ok(port) = env::var("SNMP_PORT") {
            self.settings.connection.port = port
                .parse()
                .with_context(|| format!("invalid SNMP_PORT '{}'", port))?;
        }
        if let Ok(timeout) = env::var("SNMP_TIMEOUT") {
            self.settings.connection.timeout = timeout
                .parse()
                .with_context(|| format!("invalid SNMP_TIMEOUT '{}'", timeout))?;
        }
        Ok(())
    }

    pub fn get_targets(&self) -> Vec<String> {
        parse_targets(&self.settings.targets)
    }

    /// Timeout for each table walk and for opening a session
    pub fn get_timeout(&self) -> Duration {
        Duration::from_secs(self.settings.connection.timeout)
    }

    pub fn get_port(&self) -> u16 {
        self.settings.connection.port
    }

    pub fn get_community(&self) -> Vec<u8> {
        self.settings.auth.v2c.community.clone().into_bytes()
    }

    pub fn validate(&self) -> Result<()> {
        if self.get_targets().is_empty() {
            anyhow::bail!("no SNMP targets configured");
        }
        if self.get_timeout().is_zero() {
            anyhow::bail!("SNMP timeout must be greater than zero");
        }
        let path = &self.settings.web.telemetry_path;
        if !path.starts_with('/') {
            anyhow::bail!("telemetry path '{}' must start with '/'", path);
        }
        if path == "/" || path == "/health" {
            anyhow::bail!("telemetry path '{}' is reserved", path);
        }
        self.profile
            .validate()
            .with_context(|| format!("invalid profile '{}'", self.profile.name))?;
        Ok(())
    }

    pub fn debug_config(&self) {
        tracing::info!(
            profile = %self.profile.name,
            targets = ?self.get_targets(),
            port = self.get_port(),
            timeout = ?self.get_timeout(),
            listen = %self.settings.web.listen_address,
            path = %self.settings.web.telemetry_path,
            "configuration loaded"
        );
    }
}

/// Splits a comma-separated target list, dropping blanks
pub fn parse_targets(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
