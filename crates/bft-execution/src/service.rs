//! Order orchestration: validate -> sign -> send -> map.
//!
//! Strictly linear. The first failing stage ends the call and its error is
//! returned unchanged. Exactly one network round trip per operation; there
//! is no retry, so an ambiguous timeout can never produce a duplicate order.

use std::time::Instant;

use bft_config::AppConfig;
use bft_schemas::OrderResult;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::OrderError;
use crate::mapper::{map_json_response, map_order_response};
use crate::record::RequestRecord;
use crate::signing::{Clock, HttpMethod, SignedRequest, Signer};
use crate::transport::{RawResponse, Transport};
use crate::types::{OrderIntent, RawOrderIntent};
use crate::validate::validate;
use crate::{ACCOUNT_PATH, EXCHANGE_INFO_PATH};

pub struct OrderService<'a, T: Transport, C: Clock> {
    config: &'a AppConfig,
    signer: Signer,
    transport: T,
    clock: C,
}

impl<'a, T: Transport, C: Clock> OrderService<'a, T, C> {
    pub fn new(config: &'a AppConfig, transport: T, clock: C) -> Result<Self, OrderError> {
        let signer = Signer::new(config)?;
        Ok(Self {
            config,
            signer,
            transport,
            clock,
        })
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Full pipeline for raw user input.
    pub fn place_order(&self, raw: &RawOrderIntent) -> Result<OrderResult, OrderError> {
        self.place_order_with(raw, |_| {})
    }

    /// [`Self::place_order`], calling `before_send` with the validated
    /// intent after validation succeeds and before anything is signed or
    /// sent. Not called when validation fails.
    pub fn place_order_with<F>(
        &self,
        raw: &RawOrderIntent,
        before_send: F,
    ) -> Result<OrderResult, OrderError>
    where
        F: FnOnce(&OrderIntent),
    {
        let intent = validate(raw).map_err(|e| {
            warn!(
                error = %e,
                symbol = %raw.symbol,
                side = %raw.side,
                order_type = %raw.order_type,
                "order/rejected_locally"
            );
            e
        })?;
        before_send(&intent);
        self.submit(&intent)
    }

    /// Sign, send and map an already validated intent.
    pub fn submit(&self, intent: &OrderIntent) -> Result<OrderResult, OrderError> {
        info!(
            symbol = intent.symbol(),
            side = %intent.side(),
            order_type = %intent.order_type(),
            quantity = %intent.quantity(),
            "order/submit"
        );

        let request = self.signer.sign_order(intent, &self.clock)?;
        let response = self.execute(&request)?;

        match map_order_response(&response) {
            Ok(result) => {
                info!(
                    order_id = result.order_id,
                    client_order_id = %result.client_order_id,
                    status = %result.status,
                    executed_qty = %result.executed_qty,
                    "order/accepted"
                );
                Ok(result)
            }
            Err(e) => {
                log_failure(&e);
                Err(e)
            }
        }
    }

    /// Signed `GET /fapi/v2/account`.
    pub fn account(&self) -> Result<Value, OrderError> {
        let request = self
            .signer
            .sign_params(HttpMethod::Get, ACCOUNT_PATH, Vec::new(), &self.clock)?;
        self.query_json(&request)
    }

    /// Public `GET /fapi/v1/exchangeInfo`.
    pub fn exchange_info(&self) -> Result<Value, OrderError> {
        let request = self
            .signer
            .unsigned(HttpMethod::Get, EXCHANGE_INFO_PATH, Vec::new());
        self.query_json(&request)
    }

    fn query_json(&self, request: &SignedRequest) -> Result<Value, OrderError> {
        let response = self.execute(request)?;
        map_json_response(&response).map_err(|e| {
            log_failure(&e);
            e
        })
    }

    fn execute(&self, request: &SignedRequest) -> Result<RawResponse, OrderError> {
        let started = Instant::now();
        let outcome = self.transport.send(request, self.config.client.timeout);
        RequestRecord::new(request, &outcome, started.elapsed()).emit();
        outcome.map_err(|e| {
            let e = OrderError::from(e);
            log_failure(&e);
            e
        })
    }
}

fn log_failure(e: &OrderError) {
    if e.is_ambiguous() {
        error!(kind = e.kind().as_str(), error = %e, "order/outcome_unknown");
    } else {
        error!(kind = e.kind().as_str(), error = %e, "order/failed");
    }
}
