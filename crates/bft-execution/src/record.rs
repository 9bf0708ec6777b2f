//! One structured log record per HTTP exchange.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::TransportError;
use crate::signing::SignedRequest;
use crate::transport::RawResponse;

/// Bodies longer than this are cut in the info-level line.
pub const LOG_BODY_MAX_CHARS: usize = 500;

/// Cut `s` to at most `max_chars` characters, on a char boundary.
pub fn truncate_for_log(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &s[..idx]),
        None => s.to_string(),
    }
}

/// What was sent and what came back. Never contains the signature or key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestRecord {
    pub method: &'static str,
    pub endpoint: String,
    pub params: String,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub error: Option<String>,
    pub elapsed: Duration,
}

impl RequestRecord {
    pub fn new(
        request: &SignedRequest,
        outcome: &Result<RawResponse, TransportError>,
        elapsed: Duration,
    ) -> Self {
        let (status, body, error) = match outcome {
            Ok(resp) => (Some(resp.status), Some(resp.body.clone()), None),
            Err(e) => (None, None, Some(e.to_string())),
        };
        Self {
            method: request.method.as_str(),
            endpoint: request.path.clone(),
            params: request.redacted_params(),
            status,
            body,
            error,
            elapsed,
        }
    }

    pub fn emit(&self) {
        let elapsed_ms = self.elapsed.as_millis() as u64;
        match (self.status, &self.body, &self.error) {
            (Some(status), Some(body), _) => {
                let short = truncate_for_log(body, LOG_BODY_MAX_CHARS);
                if (200..300).contains(&status) {
                    info!(
                        method = self.method,
                        endpoint = %self.endpoint,
                        params = %self.params,
                        status,
                        elapsed_ms,
                        body = %short,
                        "http/exchange"
                    );
                } else {
                    warn!(
                        method = self.method,
                        endpoint = %self.endpoint,
                        params = %self.params,
                        status,
                        elapsed_ms,
                        body = %short,
                        "http/exchange"
                    );
                }
                debug!(endpoint = %self.endpoint, body = %body, "http/body");
            }
            (_, _, error_msg) => {
                let error_msg = error_msg.as_deref().unwrap_or("unknown transport failure");
                error!(
                    method = self.method,
                    endpoint = %self.endpoint,
                    params = %self.params,
                    elapsed_ms,
                    error = %error_msg,
                    "http/failed"
                );
            }
        }
    }
}
