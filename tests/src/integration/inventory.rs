//! Wholesale stock management through the facade.

#[cfg(test)]
mod tests {
    use cl_02_inventory::is_low;
    use shared_types::{BookType, Clientele, OrderStatus, Role};

    use crate::fixtures::{actor, platform, work};

    #[test]
    fn validation_surfaces_low_stock_for_the_manager() {
        let (platform, store, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let manager = actor(&platform, Role::WholesaleManager, None);
        // min_stock is 1 (fixture); selling 4 of 5 drops on_hand to it.
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
            .create_order(&buyer, buyer.party, &[(w.id, 4)])
            .unwrap();
        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        let report = platform.low_stock_report().unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report[0].id, w.id);
        assert!(is_low(&report[0]));

        // The manager restocks; the work leaves the report.
        platform.restock(&manager, w.id, 10).unwrap();
        assert!(platform.low_stock_report().unwrap().is_empty());

        use platform_store::MarketplaceStore;
        let stock = store.work(&w.id).unwrap().unwrap().record.stock;
        assert_eq!(stock.on_hand, 11);
    }

    #[test]
    fn restocked_units_are_immediately_orderable() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let manager = actor(&platform, Role::WholesaleManager, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            1,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        // Stock exhausted by a first order.
        platform
            .create_order(&buyer, buyer.party, &[(w.id, 1)])
            .unwrap();
        assert!(platform
            .create_order(&buyer, buyer.party, &[(w.id, 1)])
            .is_err());

        platform.restock(&manager, w.id, 3).unwrap();
        assert!(platform
            .create_order(&buyer, buyer.party, &[(w.id, 2)])
            .is_ok());
    }
}
