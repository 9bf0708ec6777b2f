//! Request signing.
//!
//! Binance USDⓈ-M futures authenticate signed endpoints with an HMAC-SHA256
//! of the url-encoded parameter string, keyed by the API secret and appended
//! as the final `signature` parameter. The exact bytes that were signed are
//! kept on the [`SignedRequest`] so the transport sends them unchanged.

use std::fmt;

use bft_config::{AppConfig, Credentials};
use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::OrderError;
use crate::types::OrderIntent;
use crate::ORDER_PATH;

type HmacSha256 = Hmac<Sha256>;

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of request timestamps (ms since Unix epoch).
pub trait Clock {
    fn now_ms(&self) -> i64;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

// ---------------------------------------------------------------------------
// HttpMethod
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// POST carries the payload as a form body, GET as a query string.
    pub fn sends_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SignedRequest
// ---------------------------------------------------------------------------

/// One ready-to-send request. Built per call, never cached or reused.
///
/// **Signature and API key are redacted in `Debug` output.**
#[derive(Clone, PartialEq, Eq)]
pub struct SignedRequest {
    pub method: HttpMethod,
    pub base_url: String,
    pub path: String,
    /// Parameters in the order they were serialized, `signature` excluded.
    pub params: Vec<(String, String)>,
    /// Exactly the bytes the signature was computed over.
    pub query: String,
    /// Lowercase hex HMAC-SHA256; `None` for public endpoints.
    pub signature: Option<String>,
    /// Value of the `X-MBX-APIKEY` header; `None` for public endpoints.
    pub api_key: Option<String>,
}

impl SignedRequest {
    /// What goes on the wire: `<query>&signature=<hex>`, or the bare query
    /// for unsigned requests.
    pub fn payload(&self) -> String {
        match &self.signature {
            Some(sig) if self.query.is_empty() => format!("signature={sig}"),
            Some(sig) => format!("{}&signature={}", self.query, sig),
            None => self.query.clone(),
        }
    }

    /// Endpoint URL without any query string.
    pub fn url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    /// Parameters safe to log (the signature is never part of `params`).
    pub fn redacted_params(&self) -> String {
        self.query.clone()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }
}

impl fmt::Debug for SignedRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "<REDACTED>");
        f.debug_struct("SignedRequest")
            .field("method", &self.method)
            .field("base_url", &self.base_url)
            .field("path", &self.path)
            .field("params", &self.params)
            .field("query", &self.query)
            .field("signature", &redact(&self.signature))
            .field("api_key", &redact(&self.api_key))
            .finish()
    }
}

/// Lowercase hex HMAC-SHA256 of `payload` keyed by `secret`.
pub fn hmac_sha256_hex(secret: &str, payload: &str) -> Result<String, OrderError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| OrderError::Config(format!("invalid signing key: {e}")))?;
    mac.update(payload.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// `application/x-www-form-urlencoded` serialization, order preserved.
pub fn encode_params(params: &[(String, String)]) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

// ---------------------------------------------------------------------------
// Signer
// ---------------------------------------------------------------------------

/// Holds the credentials; the only component that ever sees the secret.
#[derive(Debug)]
pub struct Signer {
    credentials: Credentials,
    base_url: String,
    recv_window_ms: u64,
}

impl Signer {
    pub fn new(config: &AppConfig) -> Result<Self, OrderError> {
        if config.credentials.api_secret().is_empty() {
            return Err(OrderError::Config("API secret is empty".to_string()));
        }
        Ok(Self {
            credentials: config.credentials.clone(),
            base_url: config.client.base_url.clone(),
            recv_window_ms: config.client.recv_window_ms,
        })
    }

    /// `POST /fapi/v1/order` for a validated intent.
    pub fn sign_order(
        &self,
        intent: &OrderIntent,
        clock: &dyn Clock,
    ) -> Result<SignedRequest, OrderError> {
        self.sign_params(HttpMethod::Post, ORDER_PATH, intent.wire_params(), clock)
    }

    /// Sign an arbitrary parameter list. `recvWindow` and `timestamp` are
    /// appended in that order, the timestamp read from `clock` now.
    pub fn sign_params(
        &self,
        method: HttpMethod,
        path: &str,
        mut params: Vec<(String, String)>,
        clock: &dyn Clock,
    ) -> Result<SignedRequest, OrderError> {
        params.push(("recvWindow".to_string(), self.recv_window_ms.to_string()));
        params.push(("timestamp".to_string(), clock.now_ms().to_string()));

        let query = encode_params(&params);
        let signature = hmac_sha256_hex(self.credentials.api_secret(), &query)?;

        Ok(SignedRequest {
            method,
            base_url: self.base_url.clone(),
            path: path.to_string(),
            params,
            query,
            signature: Some(signature),
            api_key: Some(self.credentials.api_key().to_string()),
        })
    }

    /// Public endpoint request: no timestamp, no signature, no API key.
    pub fn unsigned(
        &self,
        method: HttpMethod,
        path: &str,
        params: Vec<(String, String)>,
    ) -> SignedRequest {
        let query = encode_params(&params);
        SignedRequest {
            method,
            base_url: self.base_url.clone(),
            path: path.to_string(),
            params,
            query,
            signature: None,
            api_key: None,
        }
    }
}
