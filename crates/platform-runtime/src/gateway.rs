//! # Payment Gateway Port
//!
//! The external payment collaborator, observed asynchronously. The core
//! never awaits the gateway inside a store transaction; the poller sweeps
//! gateway state into payment-status flags via `record_payment`.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use shared_types::{OrderId, PaymentStatus};
use thiserror::Error;

/// Gateway observation failures. The sweep logs and retries on the next
/// interval; a flaky gateway never blocks an order transition.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("payment gateway unavailable: {0}")]
    Unavailable(String),
}

/// Outbound port to the payment collaborator.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// The settlement state the gateway currently reports for an order.
    async fn payment_status(&self, order: &OrderId) -> Result<PaymentStatus, GatewayError>;
}

/// Table-driven gateway for tests and local runs.
#[derive(Default)]
pub struct StaticPaymentGateway {
    statuses: RwLock<HashMap<OrderId, PaymentStatus>>,
}

impl StaticPaymentGateway {
    /// Creates an empty gateway (every order reads as unpaid).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status the gateway reports for an order.
    pub fn set(&self, order: OrderId, status: PaymentStatus) {
        if let Ok(mut statuses) = self.statuses.write() {
            statuses.insert(order, status);
        }
    }
}

#[async_trait]
impl PaymentGateway for StaticPaymentGateway {
    async fn payment_status(&self, order: &OrderId) -> Result<PaymentStatus, GatewayError> {
        let statuses = self
            .statuses
            .read()
            .map_err(|_| GatewayError::Unavailable("gateway table poisoned".to_string()))?;
        Ok(statuses.get(order).copied().unwrap_or(PaymentStatus::Unpaid))
    }
}
