//! # Core Domain Entities
//!
//! Defines the catalog, order, and settlement entities shared by every
//! subsystem.
//!
//! ## Clusters
//!
//! - **Catalog**: [`Work`], [`StockLevel`], [`BookType`], [`Clientele`]
//! - **Parties**: [`Party`]
//! - **Orders**: [`Order`], [`OrderLine`], [`OrderStatus`], [`PaymentStatus`]
//! - **Settlement**: [`RoyaltySale`], [`RistourneRecord`], [`SettlementStatus`]
//! - **Audit**: [`CorrectionEntry`], [`CorrectionTarget`]

use serde::{Deserialize, Serialize};

use crate::ids::{
    CorrectionId, OrderId, PartyId, RistourneId, RoyaltyId, SaleUnitRef, WorkId,
};
use crate::roles::Role;

// =============================================================================
// MONEY & TIME
// =============================================================================

/// A monetary amount in whole currency units (zero-decimal currency).
pub type Amount = u64;

/// A rate expressed in basis points (1/100 of a percent; 1500 = 15%).
pub type RateBp = u32;

/// Unix timestamp in seconds.
pub type Timestamp = u64;

/// Applies a basis-point rate to an amount with a single floor division.
///
/// The product is taken in `u128` so `amount × rate` cannot overflow before
/// the division.
pub fn apply_rate_bp(amount: Amount, rate: RateBp) -> Amount {
    ((amount as u128 * rate as u128) / 10_000) as Amount
}

// =============================================================================
// CLUSTER A: CATALOG
// =============================================================================

/// Book-type classification used for ristourne-rate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookType {
    /// Primary-level schoolbook.
    Primary,
    /// Secondary-level schoolbook.
    Secondary,
    /// Promotional or off-programme item.
    Promotional,
}

/// Downstream clientele a work is published for. Institutional partners are
/// scoped to exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clientele {
    /// Primary-education establishments.
    PrimaryEducation,
    /// Secondary-education establishments.
    SecondaryEducation,
    /// General public / retail channel.
    GeneralPublic,
}

/// Per-work stock position.
///
/// `reserved` counts units reserved by pending orders that have not been
/// validated yet. Available stock is `on_hand - reserved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StockLevel {
    /// Physical units held.
    pub on_hand: u32,
    /// Units reserved by pending (unvalidated) orders.
    pub reserved: u32,
}

impl StockLevel {
    /// Units that can still be reserved.
    pub fn available(&self) -> u32 {
        self.on_hand.saturating_sub(self.reserved)
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Work {
    /// Identifier.
    pub id: WorkId,
    /// Commercial title.
    pub title: String,
    /// Discipline classification (e.g. "mathematics", "literature").
    pub discipline: String,
    /// Unit price in whole currency units.
    pub price: Amount,
    /// Current stock position.
    pub stock: StockLevel,
    /// Threshold under which the work appears on the low-stock report.
    pub min_stock: u32,
    /// Designated author, if the work is authored.
    pub author: Option<PartyId>,
    /// Classification driving the ristourne rate.
    pub book_type: BookType,
    /// Downstream clientele the work is published for.
    pub clientele: Clientele,
}

// =============================================================================
// CLUSTER B: PARTIES
// =============================================================================

/// Any registered participant. Registration and credentials are handled
/// outside this core; parties arrive here already provisioned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Party {
    /// Identifier.
    pub id: PartyId,
    /// Display name.
    pub name: String,
    /// The party's single primary role.
    pub role: Role,
    /// Counterparty scope for institutional partners: the one clientele
    /// category this partner may order for. `None` for every other role.
    pub partner_scope: Option<Clientele>,
}

// =============================================================================
// CLUSTER C: ORDERS
// =============================================================================

/// Lifecycle status of an order.
///
/// The canonical transition table lives in the orders subsystem; this enum
/// only names the states and their display labels so that the dashboard
/// layer and the core can never diverge on what a status is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Created, stock reserved, awaiting validation.
    Pending,
    /// Validated: stock permanently decremented, sales confirmed.
    Validated,
    /// In preparation.
    Processing,
    /// Handed to the carrier.
    Shipped,
    /// Received by the buyer. Terminal.
    Delivered,
    /// Cancelled. Terminal; orders are never deleted.
    Cancelled,
}

impl OrderStatus {
    /// Human-readable label, shared with the dashboard layer.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Validated => "validated",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the status admits no further transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Settlement state of the order's payment, observed from the external
/// payment collaborator. Never awaited inline; updated via status flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// No payment received.
    Unpaid,
    /// Partially paid.
    Partial,
    /// Fully settled.
    Settled,
}

/// One line of an order. The unit price is captured at order time so later
/// catalog price changes never rewrite history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Ordered work.
    pub work: WorkId,
    /// Ordered quantity (always ≥ 1).
    pub quantity: u32,
    /// Unit price at the time the order was created.
    pub unit_price: Amount,
}

impl OrderLine {
    /// Line total: `quantity × unit_price`.
    pub fn total(&self) -> Amount {
        self.quantity as Amount * self.unit_price
    }
}

/// A customer order.
///
/// The total is always recomputed from the lines ([`Order::total`]); it is
/// deliberately not a stored field, so nothing can edit it out of step with
/// the lines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Identifier.
    pub id: OrderId,
    /// Ordering party.
    pub buyer: PartyId,
    /// Order lines (never empty).
    pub lines: Vec<OrderLine>,
    /// Lifecycle status.
    pub status: OrderStatus,
    /// Payment settlement flag.
    pub payment: PaymentStatus,
    /// Creation timestamp.
    pub created_at: Timestamp,
    /// Timestamp of the last status or payment change.
    pub updated_at: Timestamp,
    /// Set when the order reaches `Shipped`.
    pub shipped_at: Option<Timestamp>,
    /// Set when the order reaches `Delivered`.
    pub delivered_at: Option<Timestamp>,
}

impl Order {
    /// Order total, recomputed from the lines on every call.
    pub fn total(&self) -> Amount {
        self.lines.iter().map(OrderLine::total).sum()
    }

    /// Total number of physical units across all lines.
    pub fn unit_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }
}

// =============================================================================
// CLUSTER D: SETTLEMENT
// =============================================================================

/// Payment state of a settlement record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlementStatus {
    /// Accrued, awaiting payout.
    Pending,
    /// Paid out.
    Paid,
}

/// One royalty accrual per confirmed sale unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoyaltySale {
    /// Identifier.
    pub id: RoyaltyId,
    /// Natural key: the sale unit this record settles.
    pub unit: SaleUnitRef,
    /// Sold work.
    pub work: WorkId,
    /// Author the royalty accrues to.
    pub author: PartyId,
    /// Royalty amount in whole currency units.
    pub amount: Amount,
    /// Rate applied, in basis points.
    pub rate_bp: RateBp,
    /// Payout state.
    pub status: SettlementStatus,
    /// Payout batch, assigned when paid.
    pub batch: Option<crate::ids::BatchId>,
    /// Accrual timestamp.
    pub accrued_at: Timestamp,
}

/// Per-line breakdown of a ristourne computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RistourneLine {
    /// Work the line settled.
    pub work: WorkId,
    /// Book type the rate was looked up by.
    pub book_type: BookType,
    /// Rate applied, in basis points.
    pub rate_bp: RateBp,
    /// Paid line amount the rate applied to.
    pub base: Amount,
    /// Rebate for this line.
    pub rebate: Amount,
}

/// The single rebate record of a validated, fully-paid institutional order.
///
/// Created at most once per order; the store enforces uniqueness on the
/// order id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RistourneRecord {
    /// Identifier.
    pub id: RistourneId,
    /// Settled order.
    pub order: OrderId,
    /// Partner the rebate accrues to.
    pub partner: PartyId,
    /// Weighted per-line breakdown.
    pub lines: Vec<RistourneLine>,
    /// Total rebate: sum of the line rebates.
    pub amount: Amount,
    /// Payout state.
    pub status: SettlementStatus,
    /// Computation timestamp.
    pub computed_at: Timestamp,
}

// =============================================================================
// CLUSTER E: AUDIT
// =============================================================================

/// The record a correction targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectionTarget {
    /// An order record.
    Order(OrderId),
    /// A catalog work.
    Work(WorkId),
    /// A royalty accrual.
    Royalty(RoyaltyId),
    /// A ristourne record.
    Ristourne(RistourneId),
}

impl std::fmt::Display for CorrectionTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectionTarget::Order(id) => write!(f, "order:{id}"),
            CorrectionTarget::Work(id) => write!(f, "work:{id}"),
            CorrectionTarget::Royalty(id) => write!(f, "royalty:{id}"),
            CorrectionTarget::Ristourne(id) => write!(f, "ristourne:{id}"),
        }
    }
}

/// Append-only record of a manual correction. Never updated or deleted at
/// any authority level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    /// Identifier.
    pub id: CorrectionId,
    /// Corrected record.
    pub target: CorrectionTarget,
    /// Field that was changed (serde name of the entity field).
    pub field: String,
    /// Value before the correction.
    pub old_value: serde_json::Value,
    /// Value after the correction.
    pub new_value: serde_json::Value,
    /// Mandatory justification.
    pub reason: String,
    /// Acting user (holds the correction capability).
    pub actor: PartyId,
    /// Role of the acting user at correction time.
    pub actor_role: Role,
    /// Correction timestamp.
    pub at: Timestamp,
}
