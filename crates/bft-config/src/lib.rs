//! Process configuration, built once at startup and passed by reference.
//!
//! Env vars consumed (all read here and nowhere else):
//!
//! | var                      | default                               |
//! |--------------------------|---------------------------------------|
//! | `BINANCE_API_KEY`        | required                              |
//! | `BINANCE_API_SECRET`     | required                              |
//! | `BINANCE_BASE_URL`       | `https://testnet.binancefuture.com`   |
//! | `BINANCE_RECV_WINDOW_MS` | `5000`                                |
//! | `BINANCE_TIMEOUT_MS`     | `10000`                               |
//! | `BFT_LOG_DIR`            | `logs`                                |

use anyhow::{bail, Context, Result};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub mod secrets;

pub use secrets::{resolve_credentials, resolve_credentials_with, CredentialEnvNames, Credentials};

pub const TESTNET_BASE_URL: &str = "https://testnet.binancefuture.com";
pub const DEFAULT_RECV_WINDOW_MS: u64 = 5_000;
/// Binance refuses recvWindow values above one minute.
pub const MAX_RECV_WINDOW_MS: u64 = 60_000;
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

pub const ENV_BASE_URL: &str = "BINANCE_BASE_URL";
pub const ENV_RECV_WINDOW_MS: &str = "BINANCE_RECV_WINDOW_MS";
pub const ENV_TIMEOUT_MS: &str = "BINANCE_TIMEOUT_MS";
pub const ENV_LOG_DIR: &str = "BFT_LOG_DIR";

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Where and how requests are sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// No trailing slash.
    pub base_url: String,
    pub recv_window_ms: u64,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: TESTNET_BASE_URL.to_string(),
            recv_window_ms: DEFAULT_RECV_WINDOW_MS,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source; unset or blank vars keep defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let read = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(url) = read(ENV_BASE_URL) {
            cfg.base_url = url;
        }
        if let Some(raw) = read(ENV_RECV_WINDOW_MS) {
            cfg.recv_window_ms = raw.parse().with_context(|| {
                format!("CONFIG_INVALID: {ENV_RECV_WINDOW_MS}='{raw}' is not an integer")
            })?;
        }
        if let Some(raw) = read(ENV_TIMEOUT_MS) {
            let ms: u64 = raw.parse().with_context(|| {
                format!("CONFIG_INVALID: {ENV_TIMEOUT_MS}='{raw}' is not an integer")
            })?;
            cfg.timeout = Duration::from_millis(ms);
        }

        cfg.validate()?;
        Ok(cfg)
    }

    /// Normalizes the base URL and checks numeric bounds.
    pub fn validate(&mut self) -> Result<()> {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if !(trimmed.starts_with("https://") || trimmed.starts_with("http://")) {
            bail!(
                "CONFIG_INVALID: base url '{}' must start with http:// or https://",
                self.base_url
            );
        }
        self.base_url = trimmed.to_string();

        if self.recv_window_ms == 0 || self.recv_window_ms > MAX_RECV_WINDOW_MS {
            bail!(
                "CONFIG_INVALID: recvWindow {} ms outside 1..={}",
                self.recv_window_ms,
                MAX_RECV_WINDOW_MS
            );
        }
        if self.timeout.is_zero() {
            bail!("CONFIG_INVALID: request timeout must be greater than zero");
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Logging
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    pub const ALL: &'static [&'static str] = &["DEBUG", "INFO", "WARNING", "ERROR"];

    /// Directive understood by `tracing_subscriber::EnvFilter`.
    pub fn as_filter_directive(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl FromStr for LogLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARNING" | "WARN" => Ok(LogLevel::Warning),
            "ERROR" => Ok(LogLevel::Error),
            other => bail!(
                "invalid log level '{}'; expected one of: {}",
                other,
                Self::ALL.join(", ")
            ),
        }
    }
}

/// File sink settings. Console output is fixed at WARN and above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LogLevel,
    pub dir: PathBuf,
    pub file_name: String,
    /// Rotate once the active file would exceed this size.
    pub max_bytes: u64,
    /// Rotated files kept (`.1` newest).
    pub max_backups: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            dir: PathBuf::from("logs"),
            file_name: "trading_bot.log".to_string(),
            max_bytes: 5 * 1024 * 1024,
            max_backups: 3,
        }
    }
}

impl LogConfig {
    pub fn from_env(level: LogLevel) -> Self {
        let mut cfg = Self {
            level,
            ..Self::default()
        };
        if let Some(dir) = std::env::var(ENV_LOG_DIR).ok().filter(|v| !v.trim().is_empty()) {
            cfg.dir = PathBuf::from(dir.trim());
        }
        cfg
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(&self.file_name)
    }
}

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Everything the pipeline needs, resolved once.
///
/// **Credentials are redacted in `Debug` output.**
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub credentials: Credentials,
    pub client: ClientConfig,
}

impl AppConfig {
    pub fn new(credentials: Credentials, client: ClientConfig) -> Self {
        Self {
            credentials,
            client,
        }
    }

    /// Resolve credentials (default env names) and client settings.
    pub fn from_env() -> Result<Self> {
        let credentials = resolve_credentials(&CredentialEnvNames::default())?;
        let client = ClientConfig::from_env()?;
        Ok(Self::new(credentials, client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn none(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn client_defaults_target_testnet() {
        let cfg = ClientConfig::from_lookup(none).unwrap();
        assert_eq!(cfg.base_url, TESTNET_BASE_URL);
        assert_eq!(cfg.recv_window_ms, 5_000);
        assert_eq!(cfg.timeout, Duration::from_secs(10));
    }

    #[test]
    fn base_url_trailing_slash_stripped() {
        let cfg = ClientConfig::from_lookup(|name| {
            (name == ENV_BASE_URL).then(|| "http://127.0.0.1:9000/".to_string())
        })
        .unwrap();
        assert_eq!(cfg.base_url, "http://127.0.0.1:9000");
    }

    #[test]
    fn recv_window_above_limit_rejected() {
        let err = ClientConfig::from_lookup(|name| {
            (name == ENV_RECV_WINDOW_MS).then(|| "60001".to_string())
        })
        .unwrap_err()
        .to_string();
        assert!(err.contains("CONFIG_INVALID"), "got: {err}");
    }

    #[test]
    fn non_numeric_timeout_rejected() {
        let err = ClientConfig::from_lookup(|name| {
            (name == ENV_TIMEOUT_MS).then(|| "ten".to_string())
        })
        .unwrap_err();
        assert!(format!("{err:#}").contains(ENV_TIMEOUT_MS));
    }

    #[test]
    fn log_level_accepts_warning_and_warn() {
        assert_eq!("WARNING".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!(LogLevel::Warning.as_filter_directive(), "warn");
        assert!("TRACE".parse::<LogLevel>().is_err());
    }

    #[test]
    fn log_file_path_joins_dir_and_name() {
        let cfg = LogConfig::default();
        assert_eq!(cfg.file_path(), PathBuf::from("logs").join("trading_bot.log"));
        assert_eq!(cfg.max_backups, 3);
    }
}
