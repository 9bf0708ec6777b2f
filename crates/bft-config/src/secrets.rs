//! Credential resolution.
//!
//! This module is the only place that reads the API key and secret from the
//! process environment.
//!
//! # Contract
//! - Callers invoke [`resolve_credentials`] once at startup and hand the
//!   resulting [`Credentials`] to constructors.
//! - `Debug` on [`Credentials`] redacts both values.
//! - Error messages reference the env var **NAME**, never the value.
//! - Values are trimmed; a blank value counts as missing.

use anyhow::{bail, Result};

/// Default env var holding the API key.
pub const ENV_API_KEY: &str = "BINANCE_API_KEY";
/// Default env var holding the API secret.
pub const ENV_API_SECRET: &str = "BINANCE_API_SECRET";

/// Names of the env vars that hold the credentials (names, not values).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialEnvNames {
    pub api_key_var: String,
    pub api_secret_var: String,
}

impl Default for CredentialEnvNames {
    fn default() -> Self {
        Self {
            api_key_var: ENV_API_KEY.to_string(),
            api_secret_var: ENV_API_SECRET.to_string(),
        }
    }
}

/// API key + secret, read once and immutable afterwards.
///
/// **Values are redacted in `Debug` output.**
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Sent as the `X-MBX-APIKEY` header.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Only the signer should call this.
    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<REDACTED>")
            .field("api_secret", &"<REDACTED>")
            .finish()
    }
}

/// Resolve a named variable through `lookup`.
/// Returns `None` if it is unset or blank after trimming.
fn resolve_with<F>(lookup: &F, var_name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var_name) {
        Some(v) if !v.trim().is_empty() => Some(v.trim().to_string()),
        _ => None,
    }
}

/// Resolve credentials from the process environment.
///
/// # Errors
/// `CREDENTIALS_MISSING` naming the first absent variable.
pub fn resolve_credentials(names: &CredentialEnvNames) -> Result<Credentials> {
    resolve_credentials_with(names, |name| std::env::var(name).ok())
}

/// Same as [`resolve_credentials`] but reads values through `lookup`, so the
/// caller controls the source (tests, alternate secret stores).
pub fn resolve_credentials_with<F>(names: &CredentialEnvNames, lookup: F) -> Result<Credentials>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(api_key) = resolve_with(&lookup, &names.api_key_var) else {
        bail!(
            "CREDENTIALS_MISSING: required env var '{}' (api key) is not set or empty",
            names.api_key_var
        );
    };
    let Some(api_secret) = resolve_with(&lookup, &names.api_secret_var) else {
        bail!(
            "CREDENTIALS_MISSING: required env var '{}' (api secret) is not set or empty",
            names.api_secret_var
        );
    };

    Ok(Credentials {
        api_key,
        api_secret,
    })
}
