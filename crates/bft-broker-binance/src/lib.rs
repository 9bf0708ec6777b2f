//! Live HTTP transport for the Binance futures REST API.
//!
//! One blocking reqwest call per [`Transport::send`]. No retries: the caller
//! decides what a timeout means, and for order placement it means "unknown".

use std::error::Error as _;
use std::time::Duration;

use anyhow::{Context, Result};
use bft_execution::{RawResponse, SignedRequest, Transport, TransportError, API_KEY_HEADER};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("bft-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build blocking http client")?;
        Ok(Self { http })
    }

    fn build(&self, request: &SignedRequest, timeout: Duration) -> RequestBuilder {
        let payload = request.payload();
        let builder = if request.method.sends_body() {
            self.http
                .post(request.url())
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(payload)
        } else {
            let url = if payload.is_empty() {
                request.url()
            } else {
                format!("{}?{}", request.url(), payload)
            };
            self.http.get(url)
        };

        let builder = match &request.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key.as_str()),
            None => builder,
        };
        builder.timeout(timeout)
    }
}

impl Transport for ReqwestTransport {
    fn send(
        &self,
        request: &SignedRequest,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        debug!(method = request.method.as_str(), url = %request.url(), "http/send");

        let resp = self
            .build(request, timeout)
            .send()
            .map_err(|e| classify(e, timeout))?;
        let status = resp.status().as_u16();
        let body = resp.text().map_err(|e| classify(e, timeout))?;

        Ok(RawResponse { status, body })
    }
}

/// Only failures that happen before the request leaves this process are
/// `Network`. Anything after dispatch leaves the order's fate unknown.
fn classify(e: reqwest::Error, timeout: Duration) -> TransportError {
    if e.is_timeout() {
        return TransportError::Timeout { after: timeout };
    }
    let msg = error_chain(&e);
    if e.is_connect() || e.is_builder() {
        TransportError::Network(msg)
    } else {
        TransportError::ConnectionLost(msg)
    }
}

fn error_chain(e: &reqwest::Error) -> String {
    let mut msg = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
