//! Configuration file data model.
//!
//! All structs derive `Deserialize` for TOML. Every field has a
//! default so an empty or missing file works.

use serde::Deserialize;

use crate::app::state::DEFAULT_TIMESTAMP_FORMAT;

/// Root configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub behavior: BehaviorConfig,
}

/// Where and how to connect.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_true")]
    pub tls: bool,
    #[serde(default)]
    pub accept_invalid_certs: bool,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default)]
    pub nickname: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: default_port(),
            tls: true,
            accept_invalid_certs: false,
            connect_timeout_secs: default_connect_timeout(),
            nickname: None,
        }
    }
}

/// Client behavior settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BehaviorConfig {
    #[serde(default)]
    pub quit_message: Option<String>,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default)]
    pub verbose: bool,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            quit_message: None,
            timestamp_format: default_timestamp_format(),
            verbose: false,
        }
    }
}

fn default_port() -> u16 {
    6697
}
fn default_true() -> bool {
    true
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.server.port, 6697);
        assert!(cfg.server.tls);
        assert!(!cfg.server.accept_invalid_certs);
        assert_eq!(cfg.server.connect_timeout_secs, 10);
    }

    #[test]
    fn test_partial_sections() {
        let cfg: AppConfig = toml::from_str(
            r#"
            [server]
            host = "irc.example.net"
            tls = false
            port = 6667

            [behavior]
            quit_message = "later"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.host.as_deref(), Some("irc.example.net"));
        assert_eq!(cfg.server.port, 6667);
        assert!(!cfg.server.tls);
        assert_eq!(cfg.behavior.quit_message.as_deref(), Some("later"));
        assert_eq!(cfg.behavior.timestamp_format, DEFAULT_TIMESTAMP_FORMAT);
    }
}
