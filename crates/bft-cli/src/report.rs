//! Human-readable console output.

use bft_execution::{OrderError, OrderIntent};
use bft_schemas::OrderResult;

const RULE_WIDTH: usize = 50;

fn rule() -> String {
    "─".repeat(RULE_WIDTH)
}

/// Printed after validation, before anything is sent.
pub fn format_order_summary(intent: &OrderIntent) -> String {
    let mut lines = vec![
        rule(),
        "  ORDER REQUEST SUMMARY".to_string(),
        rule(),
        format!("  Symbol        : {}", intent.symbol()),
        format!("  Side          : {}", intent.side()),
        format!("  Type          : {}", intent.order_type()),
        format!("  Quantity      : {}", intent.quantity()),
    ];
    if let Some(price) = intent.price() {
        lines.push(format!("  Price         : {price}"));
    }
    if let Some(tif) = intent.time_in_force() {
        lines.push(format!("  Time In Force : {tif}"));
    }
    if let Some(stop) = intent.stop_price() {
        lines.push(format!("  Stop Price    : {stop}"));
    }
    lines.push(rule());
    lines.join("\n")
}

pub fn format_order_result(result: &OrderResult) -> String {
    [
        rule(),
        "  ORDER RESPONSE".to_string(),
        rule(),
        format!("  Order ID       : {}", result.order_id),
        format!("  Client OID     : {}", result.client_order_id),
        format!("  Status         : {}", result.status),
        format!("  Executed Qty   : {}", result.executed_qty),
        format!("  Avg Price      : {}", result.avg_price),
        format!("  Cumulative USD : {}", result.cumulative_quote_value),
        rule(),
    ]
    .join("\n")
}

/// One line per failure, plus a warning when the order's fate is unknown.
pub fn format_error(err: &OrderError) -> String {
    let mut out = format!("Error: {err}");
    if err.is_ambiguous() {
        out.push_str(
            "\nWarning: the exchange may have accepted this order. \
             Check open orders and positions before retrying.",
        );
    }
    out
}
