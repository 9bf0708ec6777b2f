//! Deterministic test doubles for the order pipeline.
//!
//! No network I/O, no wall clock. Every scenario under `tests/` builds an
//! `OrderService` from these pieces.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::time::Duration;

use bft_config::{AppConfig, ClientConfig, Credentials};
use bft_execution::{Clock, RawResponse, SignedRequest, Transport, TransportError};

pub const TEST_API_KEY: &str = "testkit-api-key";
pub const TEST_API_SECRET: &str = "testkit-api-secret";

/// Config pointing at a host that is never contacted.
pub fn test_config() -> AppConfig {
    let client = ClientConfig {
        base_url: "http://testkit.invalid".to_string(),
        ..ClientConfig::default()
    };
    AppConfig::new(Credentials::new(TEST_API_KEY, TEST_API_SECRET), client)
}

// ---------------------------------------------------------------------------
// Clocks
// ---------------------------------------------------------------------------

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_ms(&self) -> i64 {
        self.0
    }
}

/// Advances by `step_ms` after every read.
#[derive(Debug)]
pub struct SteppingClock {
    next: Cell<i64>,
    step_ms: i64,
}

impl SteppingClock {
    pub fn new(start_ms: i64, step_ms: i64) -> Self {
        Self {
            next: Cell::new(start_ms),
            step_ms,
        }
    }
}

impl Clock for SteppingClock {
    fn now_ms(&self) -> i64 {
        let now = self.next.get();
        self.next.set(now + self.step_ms);
        now
    }
}

// ---------------------------------------------------------------------------
// MockTransport
// ---------------------------------------------------------------------------

/// What one `send` call received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: SignedRequest,
    pub timeout: Duration,
}

/// Replays scripted outcomes in order and records every call.
///
/// Sending with an empty script is a test bug and panics.
#[derive(Debug, Default)]
pub struct MockTransport {
    script: RefCell<VecDeque<Result<RawResponse, TransportError>>>,
    calls: RefCell<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.script
            .borrow_mut()
            .push_back(Ok(RawResponse::new(status, body)));
        self
    }

    pub fn respond_json(self, status: u16, body: serde_json::Value) -> Self {
        self.respond(status, body.to_string())
    }

    pub fn fail(self, error: TransportError) -> Self {
        self.script.borrow_mut().push_back(Err(error));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.borrow().clone()
    }

    pub fn last_request(&self) -> Option<SignedRequest> {
        self.calls.borrow().last().map(|c| c.request.clone())
    }
}

impl Transport for MockTransport {
    fn send(
        &self,
        request: &SignedRequest,
        timeout: Duration,
    ) -> Result<RawResponse, TransportError> {
        self.calls.borrow_mut().push(RecordedCall {
            request: request.clone(),
            timeout,
        });
        self.script
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| {
                panic!(
                    "MockTransport: no scripted response for call #{}",
                    self.call_count()
                )
            })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Exchange acknowledgement of a filled MARKET order.
pub fn filled_order_body(order_id: i64) -> serde_json::Value {
    serde_json::json!({
        "orderId": order_id,
        "symbol": "BTCUSDT",
        "status": "FILLED",
        "clientOrderId": format!("testkit-{order_id}"),
        "price": "0",
        "avgPrice": "61000.10",
        "origQty": "0.010",
        "executedQty": "0.010",
        "cumQuote": "610.00100",
        "timeInForce": "GTC",
        "type": "MARKET",
        "side": "BUY",
        "updateTime": 1_700_000_000_123_i64
    })
}

/// Exchange acknowledgement of a resting LIMIT order.
pub fn new_limit_order_body(order_id: i64) -> serde_json::Value {
    serde_json::json!({
        "orderId": order_id,
        "symbol": "BTCUSDT",
        "status": "NEW",
        "clientOrderId": format!("testkit-{order_id}"),
        "price": "60000",
        "avgPrice": "0.00",
        "origQty": "0.010",
        "executedQty": "0",
        "cumQuote": "0",
        "timeInForce": "GTC",
        "type": "LIMIT",
        "side": "BUY"
    })
}

/// Structured exchange rejection.
pub fn exchange_error_body(code: i64, msg: &str) -> serde_json::Value {
    serde_json::json!({ "code": code, "msg": msg })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping_clock_advances() {
        let c = SteppingClock::new(100, 1);
        assert_eq!(c.now_ms(), 100);
        assert_eq!(c.now_ms(), 101);
    }

    #[test]
    fn mock_transport_replays_in_order() {
        let t = MockTransport::new()
            .respond(200, "a")
            .fail(TransportError::Network("down".into()));
        let cfg = test_config();
        let req = bft_execution::Signer::new(&cfg)
            .unwrap()
            .unsigned(bft_execution::HttpMethod::Get, "/ping", vec![]);

        assert_eq!(t.send(&req, Duration::from_secs(1)).unwrap().body, "a");
        assert!(t.send(&req, Duration::from_secs(1)).is_err());
        assert_eq!(t.call_count(), 2);
    }
}
