//! # Ristourne Computation
//!
//! Pure rebate computation for a validated, fully-paid institutional
//! order. Rates are looked up per line item by book type, not per order:
//! a mixed-type order earns a weighted rebate across its lines.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared_types::{
    apply_rate_bp, BookType, Order, OrderStatus, Party, PaymentStatus, RateBp, RistourneId,
    RistourneLine, RistourneRecord, Role, SettlementStatus, Timestamp, Work, WorkId,
};

use super::errors::RistourneError;

/// Per-book-type rebate rates in basis points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RistourneRateTable {
    /// Rate for primary-level schoolbooks.
    pub primary_bp: RateBp,
    /// Rate for secondary-level schoolbooks.
    pub secondary_bp: RateBp,
    /// Rate for promotional items.
    pub promotional_bp: RateBp,
}

impl Default for RistourneRateTable {
    fn default() -> Self {
        Self {
            primary_bp: 1_500,
            secondary_bp: 1_200,
            promotional_bp: 500,
        }
    }
}

impl RistourneRateTable {
    /// Rate for a book type.
    pub fn rate_for(&self, book_type: BookType) -> RateBp {
        match book_type {
            BookType::Primary => self.primary_bp,
            BookType::Secondary => self.secondary_bp,
            BookType::Promotional => self.promotional_bp,
        }
    }
}

/// Whether an order qualifies for a ristourne right now.
///
/// Both conditions are required: validated status and fully settled
/// payment. A validated-but-unpaid order does not yet qualify.
pub fn is_eligible(order: &Order, buyer: &Party) -> bool {
    buyer.role == Role::InstitutionalPartner
        && order.status == OrderStatus::Validated
        && order.payment == PaymentStatus::Settled
}

/// Computes the single rebate record of a qualifying order.
///
/// Each line contributes `line_total × rate(book_type)` with one floor
/// division; the record total is the sum of the line rebates.
pub fn compute_for_order(
    order: &Order,
    works: &HashMap<WorkId, Work>,
    rates: &RistourneRateTable,
    now: Timestamp,
) -> Result<RistourneRecord, RistourneError> {
    let mut lines = Vec::with_capacity(order.lines.len());
    let mut total = 0u64;

    for line in &order.lines {
        let work = works
            .get(&line.work)
            .ok_or(RistourneError::UnknownWork { work: line.work })?;
        let rate_bp = rates.rate_for(work.book_type);
        let base = line.total();
        let rebate = apply_rate_bp(base, rate_bp);
        total += rebate;
        lines.push(RistourneLine {
            work: work.id,
            book_type: work.book_type,
            rate_bp,
            base,
            rebate,
        });
    }

    Ok(RistourneRecord {
        id: RistourneId::generate(),
        order: order.id,
        partner: order.buyer,
        lines,
        amount: total,
        status: SettlementStatus::Pending,
        computed_at: now,
    })
}
