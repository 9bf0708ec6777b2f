//! Order pipeline for the Binance USDⓈ-M futures REST API.
//!
//! `RawOrderIntent` -> [`validate`] -> [`Signer`] -> [`Transport`] ->
//! [`map_order_response`] -> `OrderResult` | [`OrderError`].
//!
//! [`OrderService`] wires the stages together. Nothing in this crate does
//! I/O except through a caller-supplied [`Transport`].

mod error;
mod mapper;
mod record;
mod service;
mod signing;
mod transport;
mod types;
mod validate;

pub use error::{ErrorKind, OrderError, TransportError};
pub use mapper::{map_json_response, map_order_response};
pub use record::{truncate_for_log, RequestRecord, LOG_BODY_MAX_CHARS};
pub use service::OrderService;
pub use signing::{
    encode_params, hmac_sha256_hex, Clock, HttpMethod, SignedRequest, Signer, SystemClock,
};
pub use transport::{RawResponse, Transport};
pub use types::{OrderIntent, OrderKind, RawOrderIntent};
pub use validate::validate;

/// New order (signed, POST).
pub const ORDER_PATH: &str = "/fapi/v1/order";
/// Account balances and positions (signed, GET).
pub const ACCOUNT_PATH: &str = "/fapi/v2/account";
/// Symbols and filters (public, GET).
pub const EXCHANGE_INFO_PATH: &str = "/fapi/v1/exchangeInfo";
/// Header carrying the API key on every authenticated request.
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";
