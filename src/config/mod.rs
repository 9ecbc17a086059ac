//! Configuration: TOML file, command-line flags, and interactive prompts.
//!
//! Priority, highest first: CLI flags, environment (`IRC_SERVER`), config
//! file, compiled defaults. A missing default config file is not an error;
//! an explicit `--config` path that cannot be read is.

pub mod model;
pub mod nickname;
pub mod prompt;

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use rand::RngExt;

use crate::irc::connection::TransportConfig;
pub use model::AppConfig;

pub const DEFAULT_SERVER: &str = "irc.libera.chat";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Command-line flags. Anything left unset falls back to the config file.
#[derive(Debug, Default, Parser)]
#[command(name = "kawaii-irc", version, about = "A minimal IRC client over TCP or TLS")]
pub struct Cli {
    /// Nickname (skips the nickname prompt)
    #[arg(long)]
    pub nick: Option<String>,

    /// IRC server address
    #[arg(long, env = "IRC_SERVER")]
    pub server: Option<String>,

    /// IRC server port
    #[arg(long)]
    pub port: Option<u16>,

    /// Enable TLS
    #[arg(long, value_name = "BOOL")]
    pub tls: Option<bool>,

    /// Disable TLS certificate verification (not recommended)
    #[arg(long)]
    pub insecure: bool,

    /// Connection timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// Fully resolved settings. Host and nickname may still need prompting.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub host: Option<String>,
    pub port: u16,
    pub tls: bool,
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
    pub nickname: Option<String>,
    pub nickname_from_cli: bool,
    pub verbose: bool,
    pub quit_message: Option<String>,
    pub timestamp_format: String,
}

impl Settings {
    pub fn resolve(cli: &Cli, file: AppConfig) -> Self {
        let non_empty = |s: &Option<String>| s.clone().filter(|s| !s.trim().is_empty());
        let cli_nick = non_empty(&cli.nick);
        Self {
            host: non_empty(&cli.server).or_else(|| non_empty(&file.server.host)),
            port: cli.port.unwrap_or(file.server.port),
            tls: cli.tls.unwrap_or(file.server.tls),
            accept_invalid_certs: cli.insecure || file.server.accept_invalid_certs,
            timeout: Duration::from_secs(cli.timeout.unwrap_or(file.server.connect_timeout_secs)),
            nickname_from_cli: cli_nick.is_some(),
            nickname: cli_nick.or_else(|| non_empty(&file.server.nickname)),
            verbose: cli.verbose || file.behavior.verbose,
            quit_message: file.behavior.quit_message,
            timestamp_format: file.behavior.timestamp_format,
        }
    }

    pub fn transport(&self, host: String) -> TransportConfig {
        TransportConfig {
            host,
            port: self.port,
            tls: self.tls,
            accept_invalid_certs: self.accept_invalid_certs,
            timeout: self.timeout,
        }
    }

    /// Default offered at the nickname prompt: the configured nickname, the
    /// login name, or a generated one.
    pub fn default_nickname<R: RngExt>(&self, rng: &mut R) -> String {
        self.nickname
            .clone()
            .or_else(|| std::env::var("USER").ok().filter(|u| !u.is_empty()))
            .or_else(|| std::env::var("USERNAME").ok().filter(|u| !u.is_empty()))
            .unwrap_or_else(|| nickname::generate_nickname(rng))
    }
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("kawaii-irc").join("config.toml"))
}

/// Load the config file, from `explicit` if given, else the default location.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match default_config_path() {
            Some(path) if path.exists() => path,
            _ => return Ok(AppConfig::default()),
        },
    };
    let contents = std::fs::read_to_string(&path).map_err(|source| ConfigError::ReadFile {
        path: path.clone(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_without_flags_or_file() {
        let settings = Settings::resolve(&Cli::default(), AppConfig::default());
        assert_eq!(settings.host, None);
        assert_eq!(settings.port, 6697);
        assert!(settings.tls);
        assert!(!settings.accept_invalid_certs);
        assert_eq!(settings.timeout, Duration::from_secs(10));
        assert!(!settings.verbose);
        assert!(!settings.nickname_from_cli);
    }

    #[test]
    fn test_cli_overrides_file() {
        let mut file = AppConfig::default();
        file.server.host = Some("irc.file.example".into());
        file.server.port = 7000;
        file.server.nickname = Some("filenick".into());

        let cli = Cli::try_parse_from([
            "kawaii-irc",
            "--server",
            "irc.cli.example",
            "--port",
            "6667",
            "--tls",
            "false",
            "--insecure",
            "--nick",
            "clinick",
        ])
        .unwrap();
        let settings = Settings::resolve(&cli, file);
        assert_eq!(settings.host.as_deref(), Some("irc.cli.example"));
        assert_eq!(settings.port, 6667);
        assert!(!settings.tls);
        assert!(settings.accept_invalid_certs);
        assert_eq!(settings.nickname.as_deref(), Some("clinick"));
        assert!(settings.nickname_from_cli);

        let transport = settings.transport("irc.cli.example".into());
        assert_eq!(transport.address(), "irc.cli.example:6667");
    }

    #[test]
    fn test_file_values_used_when_flags_absent() {
        let mut file = AppConfig::default();
        file.server.host = Some("irc.file.example".into());
        file.server.nickname = Some("filenick".into());
        file.behavior.verbose = true;

        let settings = Settings::resolve(&Cli::default(), file);
        assert_eq!(settings.host.as_deref(), Some("irc.file.example"));
        assert!(settings.verbose);

        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(settings.default_nickname(&mut rng), "filenick");
    }

    #[test]
    fn test_missing_explicit_config_is_error() {
        let err = load_config(Some(Path::new("/nonexistent/kawaii-irc.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_explicit_config_is_parsed() {
        let path =
            std::env::temp_dir().join(format!("kawaii-irc-test-{}.toml", std::process::id()));
        std::fs::write(&path, "[server]\nhost = \"irc.example.net\"\nport = 6667\n").unwrap();
        let cfg = load_config(Some(&path)).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(cfg.server.host.as_deref(), Some("irc.example.net"));
        assert_eq!(cfg.server.port, 6667);
    }
}
