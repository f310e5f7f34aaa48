use serde::{Deserialize, Serialize};

/// Base application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    /// Comma-separated list of devices to poll
    pub targets: String,
    /// Connection settings
    pub connection: ConnectionSettings,
    /// Authentication settings
    pub auth: AuthSettings,
    /// HTTP listener settings
    pub web: WebSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConnectionSettings {
    /// SNMP agent port used when a target has none
    pub port: u16,
    /// Timeout for each table walk (seconds)
    pub timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct AuthSettings {
    pub v2c: SnmpV2cSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SnmpV2cSettings {
    /// Community string
    pub community: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WebSettings {
    pub listen_address: String,
    pub telemetry_path: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            port: 161,
            timeout: 2,
        }
    }
}

impl Default for SnmpV2cSettings {
    fn default() -> Self {
        Self {
            community: "public".to_string(),
        }
    }
}

impl Default for WebSettings {
    fn default() -> Self {
        Self {
            listen_address: "0.0.0.0:9161".to_string(),
            telemetry_path: "/metrics".to_string(),
        }
    }
}
