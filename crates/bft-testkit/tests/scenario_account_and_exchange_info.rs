//! Scenario: read-only queries reuse the same signing and error rules.
//!
//! # Invariants under test
//!
//! 1. `account()` is a signed GET to `/fapi/v2/account`.
//! 2. `exchange_info()` is an unsigned GET to `/fapi/v1/exchangeInfo`.
//! 3. An exchange error on a query maps to `Api` like an order would.
//!
//! GREEN when the recorded requests match and the JSON is returned intact.

use bft_execution::{ErrorKind, HttpMethod, OrderService};
use bft_testkit::{exchange_error_body, test_config, FixedClock, MockTransport};
use serde_json::json;

#[test]
fn account_is_signed_get() {
    let cfg = test_config();
    let transport = MockTransport::new()
        .respond_json(200, json!({"totalWalletBalance": "15000.0", "assets": []}));
    let service = OrderService::new(&cfg, transport, FixedClock(77)).unwrap();

    let account = service.account().unwrap();
    assert_eq!(account["totalWalletBalance"], "15000.0");

    let req = service.transport().last_request().unwrap();
    assert_eq!(req.method, HttpMethod::Get);
    assert_eq!(req.path, "/fapi/v2/account");
    assert_eq!(req.query, "recvWindow=5000&timestamp=77");
    assert!(req.is_signed());
}

#[test]
fn exchange_info_is_unsigned() {
    let cfg = test_config();
    let transport =
        MockTransport::new().respond_json(200, json!({"symbols": [{"symbol": "BTCUSDT"}]}));
    let service = OrderService::new(&cfg, transport, FixedClock(1)).unwrap();

    let info = service.exchange_info().unwrap();
    assert_eq!(info["symbols"][0]["symbol"], "BTCUSDT");

    let req = service.transport().last_request().unwrap();
    assert_eq!(req.path, "/fapi/v1/exchangeInfo");
    assert!(!req.is_signed());
    assert!(req.api_key.is_none());
    assert_eq!(req.payload(), "");
}

#[test]
fn query_rejection_is_api_error() {
    let cfg = test_config();
    let transport = MockTransport::new().respond_json(
        401,
        exchange_error_body(-2015, "Invalid API-key, IP, or permissions for action."),
    );
    let service = OrderService::new(&cfg, transport, FixedClock(1)).unwrap();

    let err = service.account().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.exchange_code(), Some(-2015));
}
