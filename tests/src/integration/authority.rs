//! The authority matrix exercised end to end through the facade.

#[cfg(test)]
mod tests {
    use cl_03_orders::OrderError;
    use cl_06_audit::AuditError;
    use shared_types::{
        BookType, Clientele, CorrectionTarget, OrderStatus, Role,
    };

    use crate::fixtures::{actor, platform, work};

    #[test]
    fn representative_observes_but_never_mutates() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let rep = actor(&platform, Role::CommercialRepresentative, None);
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

        // Reads work for everyone, including the representative's dashboards.
        assert_eq!(platform.orders().unwrap().len(), 1);
        assert!(platform.list_royalties(None, None).unwrap().is_empty());

        // Every mutation path is closed, whatever the target state.
        for target in [
            OrderStatus::Validated,
            OrderStatus::Processing,
            OrderStatus::Shipped,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            let err = platform.transition_order(order.id, target, &rep).unwrap_err();
            assert!(
                matches!(
                    err,
                    OrderError::Unauthorized { .. } | OrderError::InvalidTransition { .. }
                ),
                "representative moved an order to {target}"
            );
        }
        assert!(platform
            .create_order(&rep, rep.party, &[(w.id, 1)])
            .is_err());
        assert!(platform.restock(&rep, w.id, 5).is_err());
        assert!(platform
            .correct_operation(
                &rep,
                CorrectionTarget::Work(w.id),
                "price",
                serde_json::Value::from(1u64),
                "attempt"
            )
            .is_err());
    }

    #[test]
    fn institutional_partner_orders_but_never_transitions() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let partner = actor(
            &platform,
            Role::InstitutionalPartner,
            Some(Clientele::PrimaryEducation),
        );
        let w = work(
            &platform,
            &exec,
            10_000,
            5,
            None,
            BookType::Primary,
            Clientele::PrimaryEducation,
        );

        let order = platform
            .create_order(&partner, partner.party, &[(w.id, 1)])
            .unwrap();

        // Not even its own pending order.
        let err = platform.cancel_order(order.id, &partner).unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized { .. }));
        let err = platform
            .transition_order(order.id, OrderStatus::Validated, &partner)
            .unwrap_err();
        assert!(matches!(err, OrderError::Unauthorized { .. }));
    }

    #[test]
    fn scope_violation_is_reported_before_any_reservation() {
        let (platform, store, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let partner = actor(
            &platform,
            Role::InstitutionalPartner,
            Some(Clientele::PrimaryEducation),
        );
        let in_scope = work(
            &platform,
            &exec,
            10_000,
            5,
            None,
            BookType::Primary,
            Clientele::PrimaryEducation,
        );
        let out_of_scope = work(
            &platform,
            &exec,
            12_000,
            5,
            None,
            BookType::Secondary,
            Clientele::SecondaryEducation,
        );

        let err = platform
            .create_order(
                &partner,
                partner.party,
                &[(in_scope.id, 1), (out_of_scope.id, 1)],
            )
            .unwrap_err();
        assert!(matches!(err, OrderError::ScopeViolation { .. }));

        // The in-scope line did not leave a dangling reservation behind.
        use platform_store::MarketplaceStore;
        let stock = store.work(&in_scope.id).unwrap().unwrap().record.stock;
        assert_eq!(stock.reserved, 0);
    }

    #[test]
    fn only_the_executive_corrects_settled_operations() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            5,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        for role in [
            Role::Buyer,
            Role::Author,
            Role::Designer,
            Role::InstitutionalPartner,
            Role::CommercialRepresentative,
            Role::WholesaleManager,
        ] {
            let intruder = actor(&platform, role, None);
            let err = platform
                .correct_operation(
                    &intruder,
                    CorrectionTarget::Work(w.id),
                    "price",
                    serde_json::Value::from(11_000u64),
                    "price adjustment",
                )
                .unwrap_err();
            assert!(matches!(err, AuditError::Unauthorized { .. }));
        }

        // The executive path works and leaves the only trail entry.
        platform
            .correct_operation(
                &exec,
                CorrectionTarget::Work(w.id),
                "price",
                serde_json::Value::from(11_000u64),
                "supplier price revision",
            )
            .unwrap();
        assert_eq!(platform.list_corrections(None).unwrap().len(), 1);
    }

    /// The registry and the observed facade behavior agree on the
    /// correction capability: only the executive row carries it.
    #[test]
    fn registry_matches_observed_correction_authority() {
        use cl_01_capabilities::{holds, Capability};

        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            5,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        for role in [
            Role::Buyer,
            Role::Author,
            Role::Designer,
            Role::InstitutionalPartner,
            Role::CommercialRepresentative,
            Role::WholesaleManager,
            Role::Executive,
        ] {
            let attempt = platform.correct_operation(
                &actor(&platform, role, None),
                CorrectionTarget::Work(w.id),
                "min_stock",
                serde_json::Value::from(3u32),
                "seasonal threshold",
            );
            assert_eq!(
                attempt.is_ok(),
                holds(role, Capability::WriteCorrection),
                "registry and facade disagree for {role}"
            );
        }
    }

    #[test]
    fn designer_maintains_catalog_but_cannot_restock() {
        let (platform, _, _) = platform();
        let designer = actor(&platform, Role::Designer, None);
        let w = work(
            &platform,
            &designer,
            8_000,
            3,
            None,
            BookType::Secondary,
            Clientele::SecondaryEducation,
        );
        // Catalog registration succeeded through the designer; stock
        // movements stay with the wholesale manager.
        assert!(platform.restock(&designer, w.id, 5).is_err());

        let manager = actor(&platform, Role::WholesaleManager, None);
        let updated = platform.restock(&manager, w.id, 5).unwrap();
        assert_eq!(updated.stock.on_hand, 8);
    }
}
