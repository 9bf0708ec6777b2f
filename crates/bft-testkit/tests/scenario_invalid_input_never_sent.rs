//! Scenario: invalid input is rejected before any I/O.
//!
//! # Invariants under test
//!
//! 1. A LIMIT intent without a price fails with `Validation`.
//! 2. quantity "-1" fails with `Validation`.
//! 3. In both cases the transport records zero invocations.
//! 4. The pre-send hook of `place_order_with` is never called.
//!
//! GREEN when every case exits with code 2 and `call_count() == 0`.

use bft_execution::{ErrorKind, OrderService, RawOrderIntent};
use bft_testkit::{test_config, FixedClock, MockTransport};

fn rejected_without_io(raw: RawOrderIntent) {
    let cfg = test_config();
    let service = OrderService::new(&cfg, MockTransport::new(), FixedClock(1)).unwrap();

    let mut hook_called = false;
    let err = service
        .place_order_with(&raw, |_| hook_called = true)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation, "input {raw:?}");
    assert_eq!(err.exit_code(), 2);
    assert_eq!(service.transport().call_count(), 0);
    assert!(!hook_called, "input {raw:?}");
}

#[test]
fn limit_without_price_never_reaches_transport() {
    rejected_without_io(RawOrderIntent::new("BTCUSDT", "BUY", "LIMIT", "1"));
}

#[test]
fn negative_quantity_never_reaches_transport() {
    rejected_without_io(RawOrderIntent::new("BTCUSDT", "BUY", "MARKET", "-1"));
}

#[test]
fn contradictory_and_malformed_inputs_never_reach_transport() {
    rejected_without_io(RawOrderIntent::new("BTCUSDT", "BUY", "MARKET", "1").with_price("100"));
    rejected_without_io(RawOrderIntent::new("BTC/USDT", "BUY", "MARKET", "1"));
    rejected_without_io(RawOrderIntent::new("BTCUSDT", "LONG", "MARKET", "1"));
    rejected_without_io(
        RawOrderIntent::new("BTCUSDT", "SELL", "STOP_MARKET", "1").with_stop_price("0"),
    );
}
