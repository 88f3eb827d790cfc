//! # Comptoir Platform Runtime
//!
//! Wires the transactional store, the configuration, and the six subsystem
//! services into one [`Platform`] facade. The (external) dashboard layer
//! consumes the facade's transport-agnostic operations; nothing here knows
//! about HTTP, sessions, or rendering.
//!
//! ## Wiring
//!
//! ```text
//!                ┌──────────────────────┐
//!   dashboards → │       Platform       │ ← payment poller (async)
//!                └──────────┬───────────┘
//!        orders / inventory / royalties / ristournes / audit
//!                           │
//!                ┌──────────┴───────────┐
//!                │   MarketplaceStore   │  (guarded atomic commits)
//!                └──────────────────────┘
//! ```
//!
//! ## Startup Sequence
//!
//! 1. Load configuration (JSON + env overrides)
//! 2. Initialize telemetry (`platform-telemetry`)
//! 3. Build the store and the [`Platform`]
//! 4. Spawn the payment observation sweep
//! 5. Serve the facade to the dashboard layer

pub mod config;
pub mod gateway;
pub mod poller;

pub use config::PlatformConfig;
pub use gateway::{GatewayError, PaymentGateway, StaticPaymentGateway};
pub use poller::{spawn_payment_poller, sweep_payments};

use std::sync::Arc;

use cl_01_capabilities::{authorize, Capability, CapabilityError};
use cl_02_inventory::{InventoryError, InventoryLedger};
use cl_03_orders::{OrderError, OrderLifecycleService, TransitionOutcome};
use cl_04_royalties::{PayoutWindow, RoyaltyError, RoyaltyService, RoyaltySummary};
use cl_05_ristournes::{RistourneError, RistourneService};
use cl_06_audit::{AuditError, CorrectionService};
use platform_store::{
    InMemoryStore, MarketplaceStore, StoreError, StoreWrite, SystemTimeSource, TimeSource,
    Transaction,
};
use serde::{Deserialize, Serialize};
use shared_types::{
    Actor, Amount, BatchId, BookType, Clientele, CorrectionEntry, CorrectionTarget, Order,
    OrderId, OrderStatus, Party, PartyId, PaymentStatus, RistourneRecord, RoyaltySale,
    StockLevel, Work, WorkId,
};
use thiserror::Error;
use tracing::info;

/// Errors of the runtime-owned operations (provisioning, observation).
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Catalog entry specification for [`Platform::register_work`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkSpec {
    /// Commercial title.
    pub title: String,
    /// Discipline classification.
    pub discipline: String,
    /// Unit price in whole currency units.
    pub price: Amount,
    /// Opening stock.
    pub initial_stock: u32,
    /// Low-stock threshold.
    pub min_stock: u32,
    /// Designated author, if any.
    pub author: Option<PartyId>,
    /// Ristourne rate classification.
    pub book_type: BookType,
    /// Downstream clientele.
    pub clientele: Clientele,
}

/// The assembled platform core.
pub struct Platform<S, T> {
    store: Arc<S>,
    orders: OrderLifecycleService<S, T>,
    inventory: InventoryLedger<S>,
    royalties: RoyaltyService<S>,
    ristournes: RistourneService<S>,
    corrections: CorrectionService<S, T>,
}

impl Platform<InMemoryStore, SystemTimeSource> {
    /// Builds a platform over the in-memory store and the system clock.
    pub fn in_memory(config: PlatformConfig) -> Self {
        Self::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(SystemTimeSource),
            config,
        )
    }
}

impl<S: MarketplaceStore, T: TimeSource> Platform<S, T> {
    /// Wires every subsystem over a shared store and clock.
    pub fn new(store: Arc<S>, time: Arc<T>, config: PlatformConfig) -> Self {
        info!(
            "[runtime] platform assembled (royalty rate {} bp)",
            config.royalty_rate_bp
        );
        Self {
            orders: OrderLifecycleService::new(
                store.clone(),
                time.clone(),
                config.royalty_rate_bp,
                config.ristourne_rates,
            ),
            inventory: InventoryLedger::new(store.clone()),
            royalties: RoyaltyService::new(store.clone()),
            ristournes: RistourneService::new(store.clone()),
            corrections: CorrectionService::new(store.clone(), time),
            store,
        }
    }

    // -------------------------------------------------------------------------
    // PROVISIONING BOUNDARY
    // -------------------------------------------------------------------------

    /// Registers a party provisioned by the external registration system.
    pub fn register_party(&self, party: Party) -> Result<(), RuntimeError> {
        self.store
            .commit(Transaction::new().write(StoreWrite::PutParty(party)))?;
        Ok(())
    }

    /// Adds a catalog entry. Requires the `ManageCatalog` capability
    /// (designers and the executive).
    pub fn register_work(&self, actor: &Actor, spec: WorkSpec) -> Result<Work, RuntimeError> {
        authorize(actor.role, Capability::ManageCatalog)?;
        let work = Work {
            id: WorkId::generate(),
            title: spec.title,
            discipline: spec.discipline,
            price: spec.price,
            stock: StockLevel {
                on_hand: spec.initial_stock,
                reserved: 0,
            },
            min_stock: spec.min_stock,
            author: spec.author,
            book_type: spec.book_type,
            clientele: spec.clientele,
        };
        self.store
            .commit(Transaction::new().write(StoreWrite::PutWork(work.clone())))?;
        info!("[runtime] catalog entry {} registered", work.id);
        Ok(work)
    }

    // -------------------------------------------------------------------------
    // ORDERS
    // -------------------------------------------------------------------------

    /// Creates an order in `Pending` state.
    pub fn create_order(
        &self,
        actor: &Actor,
        buyer: PartyId,
        lines: &[(WorkId, u32)],
    ) -> Result<Order, OrderError> {
        self.orders.create_order(actor, buyer, lines)
    }

    /// Moves an order along one edge of the transition table.
    pub fn transition_order(
        &self,
        order: OrderId,
        target: OrderStatus,
        actor: &Actor,
    ) -> Result<TransitionOutcome, OrderError> {
        self.orders.transition(order, target, actor)
    }

    /// Cancels an order (buyer-own pending, or executive override).
    pub fn cancel_order(
        &self,
        order: OrderId,
        actor: &Actor,
    ) -> Result<TransitionOutcome, OrderError> {
        self.orders.cancel(order, actor)
    }

    /// Applies an observed payment state to an order.
    pub fn record_payment(
        &self,
        order: OrderId,
        status: PaymentStatus,
    ) -> Result<TransitionOutcome, OrderError> {
        self.orders.record_payment(order, status)
    }

    /// Reads one order.
    pub fn order(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        Ok(self.store.order(id)?.map(|v| v.record))
    }

    /// Reads all orders (dashboard listings).
    pub fn orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.store.orders()?.into_iter().map(|v| v.record).collect())
    }

    // -------------------------------------------------------------------------
    // SETTLEMENTS
    // -------------------------------------------------------------------------

    /// Royalty records, optionally filtered by author and/or work.
    pub fn list_royalties(
        &self,
        author: Option<PartyId>,
        work: Option<WorkId>,
    ) -> Result<Vec<RoyaltySale>, RoyaltyError> {
        self.royalties.list(author, work)
    }

    /// Royalty totals over the filtered records.
    pub fn royalty_summary(
        &self,
        author: Option<PartyId>,
        work: Option<WorkId>,
    ) -> Result<RoyaltySummary, RoyaltyError> {
        self.royalties.summary(author, work)
    }

    /// Runs a royalty payout batch over a window. Idempotent per window.
    pub fn settle_royalty_batch(
        &self,
        actor: &Actor,
        window: PayoutWindow,
        batch: BatchId,
    ) -> Result<usize, RoyaltyError> {
        self.royalties.settle_batch(actor, window, batch)
    }

    /// Ristourne records, optionally filtered by partner.
    pub fn list_ristournes(
        &self,
        partner: Option<PartyId>,
    ) -> Result<Vec<RistourneRecord>, RistourneError> {
        self.ristournes.list(partner)
    }

    /// Total rebate accrued by a partner.
    pub fn ristourne_total(&self, partner: PartyId) -> Result<Amount, RistourneError> {
        self.ristournes.total_for(partner)
    }

    // -------------------------------------------------------------------------
    // INVENTORY
    // -------------------------------------------------------------------------

    /// Restocks a work. Requires `ManageStock`.
    pub fn restock(
        &self,
        actor: &Actor,
        work: WorkId,
        quantity: u32,
    ) -> Result<Work, InventoryError> {
        self.inventory.restock(actor, work, quantity)
    }

    /// Works at or below their minimum-stock threshold.
    pub fn low_stock_report(&self) -> Result<Vec<Work>, InventoryError> {
        self.inventory.low_stock_report()
    }

    // -------------------------------------------------------------------------
    // AUDIT
    // -------------------------------------------------------------------------

    /// Corrects one whitelisted field of a settled record. Executive only.
    pub fn correct_operation(
        &self,
        actor: &Actor,
        target: CorrectionTarget,
        field: &str,
        new_value: serde_json::Value,
        reason: &str,
    ) -> Result<CorrectionEntry, AuditError> {
        self.corrections.correct(actor, target, field, new_value, reason)
    }

    /// The append-only correction trail, optionally filtered by target.
    pub fn list_corrections(
        &self,
        target: Option<CorrectionTarget>,
    ) -> Result<Vec<CorrectionEntry>, AuditError> {
        self.corrections.list(target)
    }
}
