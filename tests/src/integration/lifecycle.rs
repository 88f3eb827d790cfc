//! End-to-end order lifecycle scenarios.

#[cfg(test)]
mod tests {
    use cl_03_orders::OrderError;
    use platform_store::MarketplaceStore;
    use shared_types::{BookType, Clientele, OrderStatus, PaymentStatus, Role};

    use crate::fixtures::{actor, platform, work};

    /// The worked scenario: 2 units of a 10 000-unit work from stock 5.
    #[test]
    fn reference_scenario_reserves_then_confirms() {
        let (platform, store, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            5,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        let order = platform
            .create_order(&buyer, buyer.party, &[(w.id, 2)])
            .unwrap();
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total(), 20_000);

        // Pending: stock still on hand, 2 reserved, 3 available.
        let stock = store.work(&w.id).unwrap().unwrap().record.stock;
        assert_eq!((stock.on_hand, stock.reserved, stock.available()), (5, 2, 3));

        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        // Validated: permanently at 3.
        let stock = store.work(&w.id).unwrap().unwrap().record.stock;
        assert_eq!((stock.on_hand, stock.reserved), (3, 0));
    }

    #[test]
    fn no_sequence_reaches_processing_without_validation() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            5,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );
        let order = platform
            .create_order(&buyer, buyer.party, &[(w.id, 1)])
            .unwrap();

        // Every skip attempt from Pending is rejected, for every role that
        // could conceivably try.
        for target in [
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
        ] {
            let err = platform.transition_order(order.id, target, &exec).unwrap_err();
            assert!(matches!(err, OrderError::InvalidTransition { .. }));
        }
    }

    #[test]
    fn fulfilment_is_delegated_to_the_wholesale_manager() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let manager = actor(&platform, Role::WholesaleManager, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            5,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );
        let order = platform
            .create_order(&buyer, buyer.party, &[(w.id, 1)])
            .unwrap();

        // The manager cannot validate...
        let err = platform
            .transition_order(order.id, OrderStatus::Validated, &manager)
            .unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized { .. }));

        // ...but owns the fulfilment edges once the executive validated.
        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();
        platform
            .transition_order(order.id, OrderStatus::Processing, &manager)
            .unwrap();
        let shipped = platform
            .transition_order(order.id, OrderStatus::Shipped, &manager)
            .unwrap();
        assert!(shipped.order.shipped_at.is_some());
        let delivered = platform
            .transition_order(order.id, OrderStatus::Delivered, &manager)
            .unwrap();
        assert!(delivered.order.delivered_at.is_some());
    }

    #[test]
    fn cancelled_orders_are_kept_not_deleted() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            5,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );
        let order = platform
            .create_order(&buyer, buyer.party, &[(w.id, 2)])
            .unwrap();
        platform.cancel_order(order.id, &buyer).unwrap();

        let stored = platform.order(&order.id).unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Cancelled);

        // Terminal: even the executive cannot move it again.
        let err = platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap_err();
        assert!(matches!(err, OrderError::InvalidTransition { .. }));
    }

    #[test]
    fn payment_flag_does_not_move_status() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            5,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );
        let order = platform
            .create_order(&buyer, buyer.party, &[(w.id, 1)])
            .unwrap();

        platform
            .record_payment(order.id, PaymentStatus::Settled)
            .unwrap();
        let stored = platform.order(&order.id).unwrap().unwrap();
        assert_eq!(stored.status, OrderStatus::Pending);
        assert_eq!(stored.payment, PaymentStatus::Settled);
    }
}
