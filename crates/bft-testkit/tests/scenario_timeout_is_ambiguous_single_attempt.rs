//! Scenario: a timeout is reported as an unknown outcome and never retried.
//!
//! # Invariants under test
//!
//! 1. A transport that exceeds the deadline yields `Timeout`, exit code 4.
//! 2. The error is flagged ambiguous: the order may exist on the exchange.
//! 3. Exactly one attempt is made.
//! 4. A connection failure is `Network`, also exit 4, but not ambiguous.
//! 5. A connection lost after the order was sent is exit 4 and ambiguous.
//!
//! GREEN when the mock records a single call in each case.

use std::time::Duration;

use bft_execution::{ErrorKind, OrderService, RawOrderIntent, TransportError};
use bft_testkit::{test_config, FixedClock, MockTransport};

#[test]
fn timeout_exits_4_after_one_attempt() {
    let cfg = test_config();
    let transport = MockTransport::new().fail(TransportError::Timeout {
        after: cfg.client.timeout,
    });
    let service = OrderService::new(&cfg, transport, FixedClock(1)).unwrap();

    let err = service
        .place_order(&RawOrderIntent::new("BTCUSDT", "BUY", "MARKET", "1"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Timeout);
    assert_eq!(err.exit_code(), 4);
    assert!(err.is_ambiguous());
    assert!(err.to_string().contains("may still have been placed"));
    assert_eq!(service.transport().call_count(), 1);
    assert_eq!(service.transport().calls()[0].timeout, Duration::from_secs(10));
}

#[test]
fn connection_failure_is_network_not_timeout() {
    let cfg = test_config();
    let transport =
        MockTransport::new().fail(TransportError::Network("connection refused".into()));
    let service = OrderService::new(&cfg, transport, FixedClock(1)).unwrap();

    let err = service
        .place_order(&RawOrderIntent::new("BTCUSDT", "BUY", "MARKET", "1"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.exit_code(), 4);
    assert!(!err.is_ambiguous());
    assert_eq!(service.transport().call_count(), 1);
}

#[test]
fn connection_lost_after_send_is_ambiguous_and_not_retried() {
    let cfg = test_config();
    let transport = MockTransport::new().fail(TransportError::ConnectionLost(
        "connection closed before message completed".into(),
    ));
    let service = OrderService::new(&cfg, transport, FixedClock(1)).unwrap();

    let err = service
        .place_order(&RawOrderIntent::new("BTCUSDT", "SELL", "MARKET", "1"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConnectionLost);
    assert_eq!(err.exit_code(), 4);
    assert!(err.is_ambiguous());
    assert!(err.to_string().contains("may still have been placed"));
    assert_eq!(service.transport().call_count(), 1);
}
