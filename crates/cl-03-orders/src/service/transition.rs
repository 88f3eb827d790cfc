//! Status transitions and payment observation.
//!
//! The status write and every dependent effect of an edge commit as one
//! guarded transaction; a failing effect leaves the order exactly where it
//! was.

use cl_01_capabilities::holds;
use cl_02_inventory as inventory;
use cl_04_royalties::accrue_for_order;
use cl_05_ristournes::{compute_for_order, is_eligible};
use platform_store::{Guard, MarketplaceStore, StoreWrite, TimeSource, Transaction};
use shared_types::{Actor, Order, OrderId, OrderStatus, Party, PaymentStatus, Timestamp};
use tracing::{info, warn};

use crate::domain::transitions::{rule_for, EdgeAuth, EdgeRule};
use crate::domain::{OrderError, OrderEvent, TransitionOutcome};

use super::OrderLifecycleService;

impl<S: MarketplaceStore, T: TimeSource> OrderLifecycleService<S, T> {
    /// Moves an order along one edge of the transition table.
    ///
    /// Fails with `InvalidTransition` if the edge does not exist,
    /// `Unauthorized` if the acting role may not take it, and `StaleState`
    /// if a concurrent actor moved the order first.
    pub fn transition(
        &self,
        order_id: OrderId,
        target: OrderStatus,
        actor: &Actor,
    ) -> Result<TransitionOutcome, OrderError> {
        let versioned = self.load_order(order_id)?;
        let from = versioned.record.status;

        let rule = rule_for(from, target).ok_or(OrderError::InvalidTransition {
            from,
            to: target,
        })?;
        authorize_edge(rule, actor, &versioned.record)?;

        let now = self.time.now();
        let mut order = versioned.record;
        order.status = target;
        order.updated_at = now;

        let mut tx = Transaction::new().guard(Guard::OrderVersion(order_id, versioned.version));
        let mut events = vec![OrderEvent::StatusChanged {
            order: order_id,
            from,
            to: target,
        }];

        match target {
            OrderStatus::Validated => {
                self.stage_validation_effects(&order, &mut tx, &mut events, now)?;
            }
            OrderStatus::Cancelled => {
                self.stage_cancellation_effects(&order, from, &mut tx, &mut events)?;
            }
            OrderStatus::Shipped => {
                order.shipped_at = Some(now);
            }
            OrderStatus::Delivered => {
                order.delivered_at = Some(now);
            }
            OrderStatus::Processing | OrderStatus::Pending => {}
        }

        tx = tx.write(StoreWrite::PutOrder(order.clone()));
        self.store
            .commit(tx)
            .map_err(|e| OrderError::from_commit(order_id, e))?;

        info!(
            "[cl-03] order {} moved {} → {}",
            order_id,
            from.label(),
            target.label()
        );
        Ok(TransitionOutcome { order, events })
    }

    /// Cancels an order: the restricted buyer path and the executive path
    /// are both just edges of the same table.
    pub fn cancel(&self, order_id: OrderId, actor: &Actor) -> Result<TransitionOutcome, OrderError> {
        self.transition(order_id, OrderStatus::Cancelled, actor)
    }

    /// Records the payment state observed from the external payment
    /// collaborator.
    ///
    /// When full settlement lands on an already-validated institutional
    /// order, the ristourne is computed inside the same transaction; the
    /// collaborator is never awaited inline.
    pub fn record_payment(
        &self,
        order_id: OrderId,
        status: PaymentStatus,
    ) -> Result<TransitionOutcome, OrderError> {
        let versioned = self.load_order(order_id)?;
        let mut order = versioned.record;

        if order.payment == status {
            return Ok(TransitionOutcome {
                order,
                events: vec![],
            });
        }

        let now = self.time.now();
        order.payment = status;
        order.updated_at = now;

        let mut tx = Transaction::new().guard(Guard::OrderVersion(order_id, versioned.version));
        let mut events = vec![OrderEvent::PaymentRecorded {
            order: order_id,
            status,
        }];

        if status == PaymentStatus::Settled && order.status == OrderStatus::Validated {
            let buyer = self.load_party(order.buyer)?;
            self.stage_ristourne_if_due(&order, &buyer, &mut tx, &mut events, now, true)?;
        }

        tx = tx.write(StoreWrite::PutOrder(order.clone()));
        self.store
            .commit(tx)
            .map_err(|e| OrderError::from_commit(order_id, e))?;

        info!("[cl-03] order {} payment recorded: {:?}", order_id, status);
        Ok(TransitionOutcome { order, events })
    }

    /// Effects of the `Pending → Validated` edge: permanent stock
    /// decrement, royalty accrual, and the ristourne when the order is
    /// already fully paid.
    fn stage_validation_effects(
        &self,
        order: &Order,
        tx: &mut Transaction,
        events: &mut Vec<OrderEvent>,
        now: Timestamp,
    ) -> Result<(), OrderError> {
        let mut works = self.load_line_works(order)?;

        for line in &order.lines {
            let versioned = works
                .get_mut(&line.work)
                .ok_or(OrderError::UnknownWork { work: line.work })?;
            versioned.record.stock =
                inventory::confirm(versioned.record.stock, line.work, line.quantity)?;
            events.push(OrderEvent::StockConfirmed {
                work: line.work,
                quantity: line.quantity,
            });
            if inventory::is_low(&versioned.record) {
                warn!(
                    "[cl-03] work {} low on stock: {} on hand, threshold {}",
                    line.work, versioned.record.stock.on_hand, versioned.record.min_stock
                );
                events.push(OrderEvent::LowStock {
                    work: line.work,
                    on_hand: versioned.record.stock.on_hand,
                    min_stock: versioned.record.min_stock,
                });
            }
        }

        for (work_id, versioned) in &works {
            tx.guards.push(Guard::WorkVersion(*work_id, versioned.version));
            tx.writes.push(StoreWrite::PutWork(versioned.record.clone()));
        }

        // Royalty accrual: one pending record per authored unit. The sale
        // is confirmed by validation, independent of delivery.
        let plain = Self::plain_works(&works);
        let sales = accrue_for_order(order, &plain, self.royalty_rate_bp, now)?;
        if !sales.is_empty() {
            let total = sales.iter().map(|s| s.amount).sum();
            events.push(OrderEvent::RoyaltiesAccrued {
                order: order.id,
                records: sales.len(),
                total,
            });
            for sale in sales {
                tx.guards.push(Guard::SaleUnitAbsent(sale.unit));
                tx.writes.push(StoreWrite::AppendRoyalty(sale));
            }
        }

        // Ristourne only if payment already settled; otherwise the payment
        // observation triggers it later.
        let buyer = self.load_party(order.buyer)?;
        self.stage_ristourne_if_due(order, &buyer, tx, events, now, false)?;
        Ok(())
    }

    /// Effects of a cancellation edge. From `Pending` the reservation is
    /// released; from `Validated` the confirmed units come back to stock.
    fn stage_cancellation_effects(
        &self,
        order: &Order,
        from: OrderStatus,
        tx: &mut Transaction,
        events: &mut Vec<OrderEvent>,
    ) -> Result<(), OrderError> {
        let mut works = self.load_line_works(order)?;

        for line in &order.lines {
            let versioned = works
                .get_mut(&line.work)
                .ok_or(OrderError::UnknownWork { work: line.work })?;
            match from {
                OrderStatus::Pending => {
                    versioned.record.stock =
                        inventory::release(versioned.record.stock, line.work, line.quantity)?;
                    events.push(OrderEvent::StockReleased {
                        work: line.work,
                        quantity: line.quantity,
                    });
                }
                OrderStatus::Validated => {
                    versioned.record.stock =
                        inventory::return_confirmed(versioned.record.stock, line.quantity);
                    events.push(OrderEvent::StockReturned {
                        work: line.work,
                        quantity: line.quantity,
                    });
                }
                // The transition table admits no other source state.
                _ => {
                    return Err(OrderError::InvalidTransition {
                        from,
                        to: OrderStatus::Cancelled,
                    })
                }
            }
        }

        for (work_id, versioned) in &works {
            tx.guards.push(Guard::WorkVersion(*work_id, versioned.version));
            tx.writes.push(StoreWrite::PutWork(versioned.record.clone()));
        }
        Ok(())
    }

    /// Stages the order's single ristourne record when both trigger
    /// conditions hold and none exists yet. Re-triggering is a no-op.
    ///
    /// `guard_works` adds version guards on the works whose rates were
    /// read, for trigger sites that do not already write them.
    fn stage_ristourne_if_due(
        &self,
        order: &Order,
        buyer: &Party,
        tx: &mut Transaction,
        events: &mut Vec<OrderEvent>,
        now: Timestamp,
        guard_works: bool,
    ) -> Result<(), OrderError> {
        if !is_eligible(order, buyer) {
            return Ok(());
        }
        if self.store.ristourne_for_order(&order.id)?.is_some() {
            return Ok(());
        }

        let works = self.load_line_works(order)?;
        if guard_works {
            for (work_id, versioned) in &works {
                tx.guards.push(Guard::WorkVersion(*work_id, versioned.version));
            }
        }
        let plain = Self::plain_works(&works);
        let record = compute_for_order(order, &plain, &self.ristourne_rates, now)?;

        events.push(OrderEvent::RistourneComputed {
            order: order.id,
            amount: record.amount,
        });
        tx.guards.push(Guard::RistourneAbsent(order.id));
        tx.writes.push(StoreWrite::AppendRistourne(record));
        Ok(())
    }
}

/// Checks the authority an edge requires against the acting role (and,
/// for the buyer-cancel edge, order ownership).
fn authorize_edge(rule: &EdgeRule, actor: &Actor, order: &Order) -> Result<(), OrderError> {
    let permitted = match rule.auth {
        EdgeAuth::Capability(cap) => holds(actor.role, cap),
        EdgeAuth::OwnerOrOverride {
            owner,
            override_cap,
        } => {
            holds(actor.role, override_cap)
                || (holds(actor.role, owner) && order.buyer == actor.party)
        }
    };
    if permitted {
        Ok(())
    } else {
        warn!(
            "[cl-03] denied: role '{}' may not move order {} to {}",
            actor.role,
            order.id,
            rule.to.label()
        );
        Err(OrderError::Unauthorized {
            role: actor.role,
            action: format!("transition an order to {}", rule.to.label()),
        })
    }
}
