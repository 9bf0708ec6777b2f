use bft_schemas::{OrderType, Side, TimeInForce};
use rust_decimal::Decimal;

/// Order request exactly as the user typed it. Nothing here is trusted.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawOrderIntent {
    pub symbol: String,
    pub side: String,
    pub order_type: String,
    pub quantity: String,
    pub price: Option<String>,
    pub stop_price: Option<String>,
    pub time_in_force: Option<String>,
}

impl RawOrderIntent {
    pub fn new(
        symbol: impl Into<String>,
        side: impl Into<String>,
        order_type: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            side: side.into(),
            order_type: order_type.into(),
            quantity: quantity.into(),
            ..Self::default()
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    pub fn with_stop_price(mut self, stop_price: impl Into<String>) -> Self {
        self.stop_price = Some(stop_price.into());
        self
    }

    pub fn with_time_in_force(mut self, tif: impl Into<String>) -> Self {
        self.time_in_force = Some(tif.into());
        self
    }
}

/// Type-specific order fields. Each variant carries exactly what its
/// order type needs, so a LIMIT without a price cannot be expressed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderKind {
    Market,
    Limit {
        price: Decimal,
        time_in_force: TimeInForce,
    },
    StopMarket {
        stop_price: Decimal,
    },
}

impl OrderKind {
    pub fn order_type(&self) -> OrderType {
        match self {
            OrderKind::Market => OrderType::Market,
            OrderKind::Limit { .. } => OrderType::Limit,
            OrderKind::StopMarket { .. } => OrderType::StopMarket,
        }
    }
}

/// Validated order. Only [`crate::validate`] constructs one.
/// Quantity is always strictly positive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderIntent {
    symbol: String,
    side: Side,
    quantity: Decimal,
    kind: OrderKind,
}

impl OrderIntent {
    pub(crate) fn new(symbol: String, side: Side, quantity: Decimal, kind: OrderKind) -> Self {
        debug_assert!(quantity > Decimal::ZERO, "OrderIntent.quantity must be > 0");
        Self {
            symbol,
            side,
            quantity,
            kind,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn kind(&self) -> &OrderKind {
        &self.kind
    }

    pub fn order_type(&self) -> OrderType {
        self.kind.order_type()
    }

    pub fn price(&self) -> Option<Decimal> {
        match self.kind {
            OrderKind::Limit { price, .. } => Some(price),
            _ => None,
        }
    }

    pub fn stop_price(&self) -> Option<Decimal> {
        match self.kind {
            OrderKind::StopMarket { stop_price } => Some(stop_price),
            _ => None,
        }
    }

    pub fn time_in_force(&self) -> Option<TimeInForce> {
        match self.kind {
            OrderKind::Limit { time_in_force, .. } => Some(time_in_force),
            _ => None,
        }
    }

    /// Wire parameters in signing order, before `recvWindow`/`timestamp`.
    pub fn wire_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("symbol".to_string(), self.symbol.clone()),
            ("side".to_string(), self.side.as_str().to_string()),
            ("type".to_string(), self.order_type().as_str().to_string()),
            ("quantity".to_string(), self.quantity.normalize().to_string()),
        ];
        match self.kind {
            OrderKind::Market => {}
            OrderKind::Limit {
                price,
                time_in_force,
            } => {
                params.push(("price".to_string(), price.normalize().to_string()));
                params.push(("timeInForce".to_string(), time_in_force.as_str().to_string()));
            }
            OrderKind::StopMarket { stop_price } => {
                params.push(("stopPrice".to_string(), stop_price.normalize().to_string()));
            }
        }
        params
    }
}
