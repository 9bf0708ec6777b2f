//! Pure input validation. No I/O, no logging.
//!
//! Rules run in a fixed order so the first failure message is deterministic:
//! symbol, side, type, quantity, then the type-specific fields.

use std::str::FromStr;

use bft_schemas::{OrderType, Side, TimeInForce};
use rust_decimal::Decimal;

use crate::error::OrderError;
use crate::types::{OrderIntent, OrderKind, RawOrderIntent};

/// Turn raw user input into an [`OrderIntent`], or say exactly what is wrong.
pub fn validate(raw: &RawOrderIntent) -> Result<OrderIntent, OrderError> {
    let symbol = validate_symbol(&raw.symbol)?;
    let side = parse_enum::<Side>(&raw.side, "side")?;
    let order_type = parse_enum::<OrderType>(&raw.order_type, "order type")?;
    let quantity = parse_positive(&raw.quantity, "quantity")?;

    let price = present(&raw.price);
    let stop_price = present(&raw.stop_price);
    let tif = present(&raw.time_in_force);

    let kind = match order_type {
        OrderType::Market => {
            if price.is_some() {
                return Err(invalid("price is not allowed for MARKET orders"));
            }
            if stop_price.is_some() {
                return Err(invalid("stop price is not allowed for MARKET orders"));
            }
            if tif.is_some() {
                return Err(invalid("time in force is only allowed for LIMIT orders"));
            }
            OrderKind::Market
        }
        OrderType::Limit => {
            let Some(price) = price else {
                return Err(invalid("price is required for LIMIT orders"));
            };
            let price = parse_positive(price, "price")?;
            if stop_price.is_some() {
                return Err(invalid("stop price is not allowed for LIMIT orders"));
            }
            let time_in_force = match tif {
                Some(s) => parse_enum::<TimeInForce>(s, "time in force")?,
                None => TimeInForce::default(),
            };
            OrderKind::Limit {
                price,
                time_in_force,
            }
        }
        OrderType::StopMarket => {
            let Some(stop_price) = stop_price else {
                return Err(invalid("stop price is required for STOP_MARKET orders"));
            };
            let stop_price = parse_positive(stop_price, "stop price")?;
            if price.is_some() {
                return Err(invalid("price is not allowed for STOP_MARKET orders"));
            }
            if tif.is_some() {
                return Err(invalid("time in force is only allowed for LIMIT orders"));
            }
            OrderKind::StopMarket { stop_price }
        }
    };

    Ok(OrderIntent::new(symbol, side, quantity, kind))
}

fn invalid(msg: impl Into<String>) -> OrderError {
    OrderError::Validation(msg.into())
}

/// Blank optional strings count as absent.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn validate_symbol(raw: &str) -> Result<String, OrderError> {
    let symbol = raw.trim().to_ascii_uppercase();
    if symbol.is_empty() {
        return Err(invalid("symbol must not be empty"));
    }
    if !symbol.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid(format!(
            "invalid symbol '{}': only letters and digits are allowed",
            raw.trim()
        )));
    }
    Ok(symbol)
}

fn parse_enum<E>(raw: &str, field: &str) -> Result<E, OrderError>
where
    E: FromStr<Err = bft_schemas::UnknownVariant>,
{
    let normalized = raw.trim().to_ascii_uppercase();
    if normalized.is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    normalized.parse::<E>().map_err(|e| {
        // Report the value as typed, not the uppercased copy.
        invalid(format!(
            "invalid {} '{}'; expected one of: {}",
            e.field,
            raw.trim(),
            e.expected.join(", ")
        ))
    })
}

fn parse_positive(raw: &str, field: &str) -> Result<Decimal, OrderError> {
    let trimmed = raw.trim();
    // Exact parse: input past 28 fractional digits is refused, never rounded.
    let value = Decimal::from_str_exact(trimmed).map_err(|_| {
        if Decimal::from_str(trimmed).is_ok() {
            invalid(format!("{field} '{trimmed}' has too many digits to represent exactly"))
        } else {
            invalid(format!("{field} '{trimmed}' is not a valid number"))
        }
    })?;
    if value <= Decimal::ZERO {
        return Err(invalid(format!("{field} must be greater than 0, got {trimmed}")));
    }
    Ok(value)
}
