//! Order creation: scope check, stock reservation, and the order insert,
//! committed as one transaction.

use cl_01_capabilities::{authorize, check_order_scope, Capability};
use cl_02_inventory as inventory;
use platform_store::{Guard, MarketplaceStore, StoreError, StoreWrite, TimeSource, Transaction};
use shared_types::{Actor, Order, OrderId, OrderLine, OrderStatus, PartyId, PaymentStatus, Role, WorkId};
use tracing::info;

use crate::domain::OrderError;

use super::OrderLifecycleService;

/// Reservation contention on popular works is ordinary; the creation loop
/// re-reads and retries before giving up.
const MAX_CREATE_ATTEMPTS: u32 = 5;

impl<S: MarketplaceStore, T: TimeSource> OrderLifecycleService<S, T> {
    /// Creates an order in `Pending` state, reserving stock for every line.
    ///
    /// The caller orders for itself unless it is the executive, who may
    /// place orders on behalf of any buyer.
    pub fn create_order(
        &self,
        actor: &Actor,
        buyer_id: PartyId,
        requested: &[(WorkId, u32)],
    ) -> Result<Order, OrderError> {
        authorize(actor.role, Capability::CreateOrder)?;
        if actor.party != buyer_id && actor.role != Role::Executive {
            return Err(OrderError::Unauthorized {
                role: actor.role,
                action: "create an order for another party".to_string(),
            });
        }

        if requested.is_empty() {
            return Err(OrderError::EmptyOrder);
        }
        for (work, quantity) in requested {
            if *quantity == 0 {
                return Err(OrderError::ZeroQuantity { work: *work });
            }
        }

        let buyer = self.load_party(buyer_id)?;
        let order_id = OrderId::generate();

        for _ in 0..MAX_CREATE_ATTEMPTS {
            let now = self.time.now();
            let mut tx = Transaction::new();
            let mut lines = Vec::with_capacity(requested.len());

            // Re-read works each attempt: a lost race means the stock
            // position moved underneath us.
            let mut works = std::collections::HashMap::new();
            for (work_id, _) in requested {
                if works.contains_key(work_id) {
                    continue;
                }
                let versioned = self
                    .store
                    .work(work_id)?
                    .ok_or(OrderError::UnknownWork { work: *work_id })?;
                check_order_scope(&buyer, &versioned.record)?;
                works.insert(*work_id, versioned);
            }

            for (work_id, quantity) in requested {
                let versioned = works
                    .get_mut(work_id)
                    .ok_or(OrderError::UnknownWork { work: *work_id })?;
                versioned.record.stock =
                    inventory::reserve(versioned.record.stock, *work_id, *quantity)?;
                lines.push(OrderLine {
                    work: *work_id,
                    quantity: *quantity,
                    unit_price: versioned.record.price,
                });
            }

            for (work_id, versioned) in &works {
                tx = tx
                    .guard(Guard::WorkVersion(*work_id, versioned.version))
                    .write(StoreWrite::PutWork(versioned.record.clone()));
            }

            let order = Order {
                id: order_id,
                buyer: buyer_id,
                lines,
                status: OrderStatus::Pending,
                payment: PaymentStatus::Unpaid,
                created_at: now,
                updated_at: now,
                shipped_at: None,
                delivered_at: None,
            };
            tx = tx.write(StoreWrite::PutOrder(order.clone()));

            match self.store.commit(tx) {
                Ok(()) => {
                    info!(
                        "[cl-03] order {} created: {} line(s), total {}",
                        order.id,
                        order.lines.len(),
                        order.total()
                    );
                    return Ok(order);
                }
                Err(StoreError::VersionConflict { .. }) => continue,
                Err(e) => return Err(OrderError::from_commit(order_id, e)),
            }
        }

        Err(OrderError::StaleState { order: order_id })
    }
}
