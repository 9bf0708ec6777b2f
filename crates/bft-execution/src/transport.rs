//! Transport seam.
//!
//! A transport performs exactly one HTTP exchange for a [`SignedRequest`].
//! It never retries and never interprets the response: any status code the
//! server returned is `Ok(RawResponse)`. Only failures to obtain a response
//! at all are errors.

use std::time::Duration;

use crate::error::TransportError;
use crate::signing::SignedRequest;

/// HTTP status code and full body text, as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport {
    /// Send once, bounded by `timeout`.
    ///
    /// POST sends the payload as an `application/x-www-form-urlencoded`
    /// body; GET appends it to the URL as the query string. The API
    /// key, when present, goes in the `X-MBX-APIKEY` header.
    fn send(
        &self,
        request: &SignedRequest,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(
        &self,
        request: &SignedRequest,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        (**self).send(request, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(
        &self,
        request: &SignedRequest,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        (**self).send(request, timeout)
    }
}
