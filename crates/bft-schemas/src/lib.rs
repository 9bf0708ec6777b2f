//! Wire vocabulary shared by every crate in the workspace.
//!
//! Order side, type, time-in-force and status are closed enums: an unknown
//! string is rejected at parse time instead of travelling through the
//! pipeline as free text. `as_str()` returns the exact spelling the exchange
//! uses on the wire.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::Deserialize;

// ---------------------------------------------------------------------------
// Parse error
// ---------------------------------------------------------------------------

/// A string did not name any variant of a closed wire enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// Enum being parsed (e.g. `"side"`).
    pub field: &'static str,
    /// Input exactly as received.
    pub value: String,
    /// Accepted spellings, in declaration order.
    pub expected: &'static [&'static str],
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid {} '{}'; expected one of: {}",
            self.field,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}

fn unknown(field: &'static str, value: &str, expected: &'static [&'static str]) -> UnknownVariant {
    UnknownVariant {
        field,
        value: value.to_string(),
        expected,
    }
}

// ---------------------------------------------------------------------------
// Side
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const ALL: &'static [&'static str] = &["BUY", "SELL"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Side {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BUY" => Ok(Side::Buy),
            "SELL" => Ok(Side::Sell),
            other => Err(unknown("side", other, Self::ALL)),
        }
    }
}

// ---------------------------------------------------------------------------
// OrderType
// ---------------------------------------------------------------------------

/// Order types this client can place. Stop-limit is deliberately absent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderType {
    Market,
    Limit,
    StopMarket,
}

impl OrderType {
    pub const ALL: &'static [&'static str] = &["MARKET", "LIMIT", "STOP_MARKET"];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Market => "MARKET",
            OrderType::Limit => "LIMIT",
            OrderType::StopMarket => "STOP_MARKET",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MARKET" => Ok(OrderType::Market),
            "LIMIT" => Ok(OrderType::Limit),
            "STOP_MARKET" => Ok(OrderType::StopMarket),
            other => Err(unknown("order type", other, Self::ALL)),
        }
    }
}

// ---------------------------------------------------------------------------
// TimeInForce
// ---------------------------------------------------------------------------

/// Persistence policy for LIMIT orders. `GTX` is Binance's post-only flavour.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimeInForce {
    #[default]
    Gtc,
    Ioc,
    Fok,
    Gtx,
}

impl TimeInForce {
    pub const ALL: &'static [&'static str] = &["GTC", "IOC", "FOK", "GTX"];

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeInForce::Gtc => "GTC",
            TimeInForce::Ioc => "IOC",
            TimeInForce::Fok => "FOK",
            TimeInForce::Gtx => "GTX",
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeInForce {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GTC" => Ok(TimeInForce::Gtc),
            "IOC" => Ok(TimeInForce::Ioc),
            "FOK" => Ok(TimeInForce::Fok),
            "GTX" => Ok(TimeInForce::Gtx),
            other => Err(unknown("time in force", other, Self::ALL)),
        }
    }
}

// ---------------------------------------------------------------------------
// OrderStatus
// ---------------------------------------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    New,
    Filled,
    PartiallyFilled,
    Canceled,
    Rejected,
    Expired,
}

impl OrderStatus {
    pub const ALL: &'static [&'static str] = &[
        "NEW",
        "FILLED",
        "PARTIALLY_FILLED",
        "CANCELED",
        "REJECTED",
        "EXPIRED",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "NEW",
            OrderStatus::Filled => "FILLED",
            OrderStatus::PartiallyFilled => "PARTIALLY_FILLED",
            OrderStatus::Canceled => "CANCELED",
            OrderStatus::Rejected => "REJECTED",
            OrderStatus::Expired => "EXPIRED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(OrderStatus::New),
            "FILLED" => Ok(OrderStatus::Filled),
            "PARTIALLY_FILLED" => Ok(OrderStatus::PartiallyFilled),
            "CANCELED" => Ok(OrderStatus::Canceled),
            "REJECTED" => Ok(OrderStatus::Rejected),
            "EXPIRED" => Ok(OrderStatus::Expired),
            other => Err(unknown("order status", other, Self::ALL)),
        }
    }
}

// ---------------------------------------------------------------------------
// Normalized result
// ---------------------------------------------------------------------------

/// Normalized success outcome of one order placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderResult {
    pub order_id: i64,
    pub client_order_id: String,
    pub status: OrderStatus,
    pub executed_qty: Decimal,
    pub avg_price: Decimal,
    /// Wire key `cumQuote`.
    pub cumulative_quote_value: Decimal,
}

// ---------------------------------------------------------------------------
// Exchange wire bodies
// ---------------------------------------------------------------------------

/// `POST /fapi/v1/order` success body, limited to the fields we map.
///
/// Every field is optional at the serde layer so that the mapper can name the
/// exact field that is missing instead of surfacing a generic serde error.
/// Decimal fields arrive as JSON strings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponseBody {
    pub order_id: Option<i64>,
    pub client_order_id: Option<String>,
    pub status: Option<String>,
    pub executed_qty: Option<String>,
    pub avg_price: Option<String>,
    pub cum_quote: Option<String>,
}

/// Structured exchange error body: `{"code": -2010, "msg": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExchangeErrorBody {
    pub code: i64,
    #[serde(default)]
    pub msg: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_round_trip_through_wire_spelling() {
        for s in OrderStatus::ALL {
            assert_eq!(s.parse::<OrderStatus>().unwrap().as_str(), *s);
        }
        for s in OrderType::ALL {
            assert_eq!(s.parse::<OrderType>().unwrap().as_str(), *s);
        }
    }

    #[test]
    fn parse_is_exact_case() {
        assert!("buy".parse::<Side>().is_err());
        assert_eq!("SELL".parse::<Side>().unwrap(), Side::Sell);
    }

    #[test]
    fn unknown_variant_lists_expected_values() {
        let err = "STOP_LIMIT".parse::<OrderType>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid order type 'STOP_LIMIT'; expected one of: MARKET, LIMIT, STOP_MARKET"
        );
    }

    #[test]
    fn time_in_force_defaults_to_gtc() {
        assert_eq!(TimeInForce::default(), TimeInForce::Gtc);
    }

    #[test]
    fn order_response_body_tolerates_extra_fields() {
        let body = r#"{
            "orderId": 4032941,
            "symbol": "BTCUSDT",
            "status": "NEW",
            "clientOrderId": "x-abc",
            "executedQty": "0",
            "avgPrice": "0.00",
            "cumQuote": "0",
            "reduceOnly": false
        }"#;
        let parsed: OrderResponseBody = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.order_id, Some(4032941));
        assert_eq!(parsed.status.as_deref(), Some("NEW"));
        assert_eq!(parsed.cum_quote.as_deref(), Some("0"));
    }

    #[test]
    fn exchange_error_body_msg_optional() {
        let parsed: ExchangeErrorBody = serde_json::from_str(r#"{"code": -1000}"#).unwrap();
        assert_eq!(parsed.code, -1000);
        assert!(parsed.msg.is_none());
    }
}
