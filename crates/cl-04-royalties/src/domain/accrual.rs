//! # Royalty Accrual
//!
//! Pure computation of royalty records from a validated order. One record
//! per physical unit sold, so payout batches and corrections operate at
//! unit granularity.

use std::collections::HashMap;

use shared_types::{
    apply_rate_bp, Order, RateBp, RoyaltyId, RoyaltySale, SaleUnitRef, SettlementStatus,
    Timestamp, Work, WorkId,
};

use super::errors::RoyaltyError;

/// Platform-wide default royalty rate: 15%.
pub const DEFAULT_ROYALTY_RATE_BP: RateBp = 1_500;

/// A payout selection window over accrual timestamps: `from` inclusive,
/// `to` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PayoutWindow {
    /// First instant included.
    pub from: Timestamp,
    /// First instant excluded.
    pub to: Timestamp,
}

impl PayoutWindow {
    /// Builds a window, rejecting empty or inverted bounds.
    pub fn new(from: Timestamp, to: Timestamp) -> Result<Self, RoyaltyError> {
        if from >= to {
            return Err(RoyaltyError::EmptyWindow { from, to });
        }
        Ok(Self { from, to })
    }

    /// Whether the window contains `at`.
    pub fn contains(&self, at: Timestamp) -> bool {
        self.from <= at && at < self.to
    }
}

/// Computes the royalty accruals for every authored unit of an order.
///
/// Lines whose work carries no author produce nothing (non-authored catalog
/// items accrue no royalty). The royalty per unit is
/// `unit_price × rate`, floored once per unit, so the accrued sum for a
/// work can never exceed its confirmed revenue times the rate.
pub fn accrue_for_order(
    order: &Order,
    works: &HashMap<WorkId, Work>,
    rate_bp: RateBp,
    now: Timestamp,
) -> Result<Vec<RoyaltySale>, RoyaltyError> {
    let mut sales = Vec::with_capacity(order.unit_count() as usize);

    for (line_index, line) in order.lines.iter().enumerate() {
        let work = works
            .get(&line.work)
            .ok_or(RoyaltyError::UnknownWork { work: line.work })?;
        let Some(author) = work.author else {
            continue;
        };

        let amount = apply_rate_bp(line.unit_price, rate_bp);
        for unit_index in 0..line.quantity {
            sales.push(RoyaltySale {
                id: RoyaltyId::generate(),
                unit: SaleUnitRef {
                    order: order.id,
                    line: line_index as u32,
                    unit: unit_index,
                },
                work: work.id,
                author,
                amount,
                rate_bp,
                status: SettlementStatus::Pending,
                batch: None,
                accrued_at: now,
            });
        }
    }
    Ok(sales)
}
