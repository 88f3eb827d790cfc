//! Correction audit trail scenarios.

#[cfg(test)]
mod tests {
    use cl_06_audit::AuditError;
    use shared_types::{
        BookType, Clientele, CorrectionTarget, OrderStatus, Role, SettlementStatus,
    };

    use crate::fixtures::{actor, platform, work};

    #[test]
    fn every_entry_has_a_reason_and_an_executive_actor() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let w = work(
            &platform,
            &exec,
            6_000,
            8,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        platform
            .correct_operation(
                &exec,
                CorrectionTarget::Work(w.id),
                "price",
                serde_json::Value::from(6_500u64),
                "new supplier tariff",
            )
            .unwrap();
        platform
            .correct_operation(
                &exec,
                CorrectionTarget::Work(w.id),
                "min_stock",
                serde_json::Value::from(4u32),
                "raise threshold for the school season",
            )
            .unwrap();

        let trail = platform
            .list_corrections(Some(CorrectionTarget::Work(w.id)))
            .unwrap();
        assert_eq!(trail.len(), 2);
        for entry in &trail {
            assert!(!entry.reason.trim().is_empty());
            assert_eq!(entry.actor_role, Role::Executive);
            assert_eq!(entry.actor, exec.party);
        }
    }

    #[test]
    fn settled_royalty_amounts_are_corrected_through_the_log() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let author = actor(&platform, Role::Author, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            5,
            Some(author.party),
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        let order = platform
            .create_order(&buyer, buyer.party, &[(w.id, 1)])
            .unwrap();
        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        let sale = platform.list_royalties(Some(author.party), None).unwrap()[0].clone();
        assert_eq!(sale.amount, 1_500);

        let entry = platform
            .correct_operation(
                &exec,
                CorrectionTarget::Royalty(sale.id),
                "amount",
                serde_json::Value::from(1_800u64),
                "contractual minimum per the author agreement",
            )
            .unwrap();
        assert_eq!(entry.old_value, serde_json::Value::from(1_500u64));

        let corrected = platform.list_royalties(Some(author.party), None).unwrap()[0].clone();
        assert_eq!(corrected.amount, 1_800);
        assert_eq!(corrected.status, SettlementStatus::Pending);
    }

    #[test]
    fn the_trail_only_grows() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let w = work(
            &platform,
            &exec,
            6_000,
            8,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        for (value, reason) in [(7_000u64, "first revision"), (7_500u64, "second revision")] {
            platform
                .correct_operation(
                    &exec,
                    CorrectionTarget::Work(w.id),
                    "price",
                    serde_json::Value::from(value),
                    reason,
                )
                .unwrap();
        }

        let trail = platform.list_corrections(None).unwrap();
        assert_eq!(trail.len(), 2);
        // Entries chain: the second correction's old value is the first's
        // new value.
        assert_eq!(trail[0].new_value, trail[1].old_value);
    }

    #[test]
    fn rejected_corrections_leave_no_partial_state() {
        let (platform, store, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let w = work(
            &platform,
            &exec,
            6_000,
            8,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        // Missing reason, unsupported field, malformed value: none of them
        // may touch the record or the trail.
        assert!(matches!(
            platform
                .correct_operation(
                    &exec,
                    CorrectionTarget::Work(w.id),
                    "price",
                    serde_json::Value::from(9_000u64),
                    "   ",
                )
                .unwrap_err(),
            AuditError::MissingReason
        ));
        assert!(matches!(
            platform
                .correct_operation(
                    &exec,
                    CorrectionTarget::Work(w.id),
                    "discipline",
                    serde_json::Value::from("poetry"),
                    "reclassification",
                )
                .unwrap_err(),
            AuditError::UnsupportedField { .. }
        ));
        assert!(matches!(
            platform
                .correct_operation(
                    &exec,
                    CorrectionTarget::Work(w.id),
                    "price",
                    serde_json::Value::from("expensive"),
                    "bad dashboard payload",
                )
                .unwrap_err(),
            AuditError::InvalidValue { .. }
        ));

        use platform_store::MarketplaceStore;
        assert_eq!(store.work(&w.id).unwrap().unwrap().record.price, 6_000);
        assert!(platform.list_corrections(None).unwrap().is_empty());
    }
}
