//! Raw HTTP response -> typed outcome.
//!
//! Pure functions: the same response always maps to the same result.
//!
//! - 2xx with an object body carrying `code != 200` is an exchange error
//!   (Binance occasionally reports failures with a 200 status).
//! - 2xx otherwise must contain every mapped field; anything missing or
//!   malformed is a [`OrderError::Mapping`] naming the field.
//! - non-2xx with a `{code, msg}` body is [`OrderError::Api`] verbatim;
//!   any other body yields `Api` with `code = http status`, `msg = body`.

use std::str::FromStr;

use bft_schemas::{ExchangeErrorBody, OrderResponseBody, OrderResult, OrderStatus};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::OrderError;
use crate::transport::RawResponse;

/// Map a `POST /fapi/v1/order` response.
pub fn map_order_response(resp: &RawResponse) -> Result<OrderResult, OrderError> {
    let value = parse_checked(resp)?;
    let body: OrderResponseBody = serde_json::from_value(value)
        .map_err(|e| OrderError::Mapping(format!("malformed order response: {e}")))?;

    let order_id = required(body.order_id, "orderId")?;
    let client_order_id = required(body.client_order_id, "clientOrderId")?;
    let status_raw = required(body.status, "status")?;
    let status = OrderStatus::from_str(&status_raw)
        .map_err(|e| OrderError::Mapping(format!("field 'status': {e}")))?;

    Ok(OrderResult {
        order_id,
        client_order_id,
        status,
        executed_qty: decimal_field(body.executed_qty, "executedQty")?,
        avg_price: decimal_field(body.avg_price, "avgPrice")?,
        cumulative_quote_value: decimal_field(body.cum_quote, "cumQuote")?,
    })
}

/// Map any JSON endpoint with the same error rules as orders.
pub fn map_json_response(resp: &RawResponse) -> Result<Value, OrderError> {
    parse_checked(resp)
}

fn parse_checked(resp: &RawResponse) -> Result<Value, OrderError> {
    if !resp.is_success() {
        return Err(api_error(resp));
    }

    let value: Value = serde_json::from_str(&resp.body)
        .map_err(|e| OrderError::Mapping(format!("response body is not valid JSON: {e}")))?;

    if let Some(code) = value.get("code").and_then(Value::as_i64) {
        if code != 200 {
            let msg = value
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            return Err(OrderError::Api {
                code,
                msg,
                http_status: resp.status,
            });
        }
    }
    Ok(value)
}

fn api_error(resp: &RawResponse) -> OrderError {
    match serde_json::from_str::<ExchangeErrorBody>(&resp.body) {
        Ok(ExchangeErrorBody { code, msg }) => OrderError::Api {
            code,
            msg: msg.unwrap_or_else(|| resp.body.trim().to_string()),
            http_status: resp.status,
        },
        Err(_) => {
            let text = resp.body.trim();
            OrderError::Api {
                code: i64::from(resp.status),
                msg: if text.is_empty() {
                    format!("HTTP {}", resp.status)
                } else {
                    text.to_string()
                },
                http_status: resp.status,
            }
        }
    }
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, OrderError> {
    value.ok_or_else(|| OrderError::Mapping(format!("missing field '{field}'")))
}

fn decimal_field(value: Option<String>, field: &str) -> Result<Decimal, OrderError> {
    let raw = required(value, field)?;
    Decimal::from_str(raw.trim())
        .map_err(|_| OrderError::Mapping(format!("field '{field}' is not a decimal: '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FILLED: &str = concat!(
        r#"{"orderId":4032941,"symbol":"BTCUSDT","status":"FILLED","#,
        r#""clientOrderId":"web_abc","executedQty":"0.010","avgPrice":"61234.50","#,
        r#""cumQuote":"612.34500","type":"MARKET"}"#
    );

    #[test]
    fn filled_market_order_maps() {
        let r = map_order_response(&RawResponse::new(200, FILLED)).unwrap();
        assert_eq!(r.order_id, 4032941);
        assert_eq!(r.client_order_id, "web_abc");
        assert_eq!(r.status, OrderStatus::Filled);
        assert_eq!(r.executed_qty, Decimal::new(1, 2));
        assert_eq!(r.avg_price, Decimal::new(6123450, 2));
        assert_eq!(r.cumulative_quote_value, Decimal::new(612345, 3));
    }

    #[test]
    fn mapping_is_idempotent() {
        let resp = RawResponse::new(200, FILLED);
        assert_eq!(map_order_response(&resp), map_order_response(&resp));

        let bad = RawResponse::new(400, r#"{"code":-2010,"msg":"Insufficient balance"}"#);
        assert_eq!(map_order_response(&bad), map_order_response(&bad));
    }

    #[test]
    fn http_400_exchange_error_passes_through() {
        let err = map_order_response(&RawResponse::new(
            400,
            r#"{"code":-2010,"msg":"Insufficient balance"}"#,
        ))
        .unwrap_err();
        assert_eq!(
            err,
            OrderError::Api {
                code: -2010,
                msg: "Insufficient balance".into(),
                http_status: 400
            }
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn unparseable_error_body_uses_http_status() {
        let err =
            map_order_response(&RawResponse::new(502, "<html>Bad Gateway</html>")).unwrap_err();
        assert_eq!(
            err,
            OrderError::Api {
                code: 502,
                msg: "<html>Bad Gateway</html>".into(),
                http_status: 502
            }
        );
    }

    #[test]
    fn code_in_success_body_is_an_api_error() {
        let err = map_order_response(&RawResponse::new(
            200,
            r#"{"code":-1121,"msg":"Invalid symbol."}"#,
        ))
        .unwrap_err();
        assert_eq!(err.exchange_code(), Some(-1121));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn code_200_in_body_is_not_an_error() {
        let resp = RawResponse::new(200, r#"{"code":200,"msg":"success"}"#);
        let v = map_json_response(&resp).unwrap();
        assert_eq!(v["msg"], "success");
    }

    #[test]
    fn unknown_status_is_mapping_error() {
        let body = FILLED.replace("\"FILLED\"", "\"NEW_INSURANCE\"");
        let err = map_order_response(&RawResponse::new(200, body)).unwrap_err();
        assert_eq!(err.exit_code(), 5);
        assert!(err.to_string().contains("status"), "got: {err}");
    }

    #[test]
    fn missing_field_is_named() {
        let body =
            r#"{"orderId":1,"clientOrderId":"c","status":"NEW","executedQty":"0","avgPrice":"0"}"#;
        let err = map_order_response(&RawResponse::new(200, body)).unwrap_err();
        assert_eq!(err, OrderError::Mapping("missing field 'cumQuote'".into()));
    }

    #[test]
    fn non_json_success_body_is_mapping_error() {
        let err = map_order_response(&RawResponse::new(200, "OK")).unwrap_err();
        assert!(matches!(err, OrderError::Mapping(_)));
    }

    #[test]
    fn non_decimal_quantity_is_mapping_error() {
        let body = FILLED.replace("\"0.010\"", "\"lots\"");
        let err = map_order_response(&RawResponse::new(200, body)).unwrap_err();
        assert_eq!(
            err,
            OrderError::Mapping("field 'executedQty' is not a decimal: 'lots'".into())
        );
    }
}
