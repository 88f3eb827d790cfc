//! Settlement-engine scenarios: royalties and ristournes end to end.

#[cfg(test)]
mod tests {
    use cl_04_royalties::PayoutWindow;
    use shared_types::{
        BatchId, BookType, Clientele, OrderStatus, PaymentStatus, Role, SettlementStatus,
    };

    use crate::fixtures::{actor, platform, work, T0};

    #[test]
    fn royalties_accrue_at_validation_independent_of_delivery() {
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
            .create_order(&buyer, buyer.party, &[(w.id, 3)])
            .unwrap();

        // Nothing accrues while pending.
        assert!(platform.list_royalties(Some(author.party), None).unwrap().is_empty());

        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        // Three unit records at 15% of 10 000, pending, before any
        // delivery happened.
        let sales = platform.list_royalties(Some(author.party), None).unwrap();
        assert_eq!(sales.len(), 3);
        assert!(sales.iter().all(|s| s.amount == 1_500));
        assert!(sales.iter().all(|s| s.status == SettlementStatus::Pending));

        let summary = platform.royalty_summary(Some(author.party), None).unwrap();
        assert_eq!(summary.generated, 4_500);
        assert_eq!(summary.pending, 4_500);
        assert_eq!(summary.paid, 0);
    }

    #[test]
    fn royalty_sum_respects_the_revenue_bound() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let author = actor(&platform, Role::Author, None);
        // 9 999 does not divide evenly at 15%.
        let w = work(
            &platform,
            &exec,
            9_999,
            10,
            Some(author.party),
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        let order = platform
            .create_order(&buyer, buyer.party, &[(w.id, 7)])
            .unwrap();
        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        let accrued: u64 = platform
            .list_royalties(None, Some(w.id))
            .unwrap()
            .iter()
            .map(|s| s.amount)
            .sum();
        let bound = 9_999u128 * 7 * 1_500 / 10_000;
        assert!(u128::from(accrued) <= bound);
    }

    #[test]
    fn payout_batch_is_idempotent_through_the_facade() {
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
            .create_order(&buyer, buyer.party, &[(w.id, 2)])
            .unwrap();
        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        let window = PayoutWindow::new(T0 - 10, T0 + 10).unwrap();
        let paid = platform
            .settle_royalty_batch(&exec, window, BatchId::generate())
            .unwrap();
        assert_eq!(paid, 2);

        // Re-running the window pays nothing twice.
        let again = platform
            .settle_royalty_batch(&exec, window, BatchId::generate())
            .unwrap();
        assert_eq!(again, 0);

        let summary = platform.royalty_summary(Some(author.party), None).unwrap();
        assert_eq!(summary.paid, 3_000);
        assert_eq!(summary.pending, 0);
    }

    #[test]
    fn mixed_book_type_order_earns_a_weighted_ristourne() {
        let (platform, _, _) = platform();
        let exec = actor(&platform, Role::Executive, None);
        let partner = actor(
            &platform,
            Role::InstitutionalPartner,
            Some(Clientele::PrimaryEducation),
        );
        let schoolbook = work(
            &platform,
            &exec,
            10_000,
            10,
            None,
            BookType::Primary,
            Clientele::PrimaryEducation,
        );
        let poster = work(
            &platform,
            &exec,
            4_000,
            10,
            None,
            BookType::Promotional,
            Clientele::PrimaryEducation,
        );

        let order = platform
            .create_order(
                &partner,
                partner.party,
                &[(schoolbook.id, 1), (poster.id, 3)],
            )
            .unwrap();
        platform
            .record_payment(order.id, PaymentStatus::Settled)
            .unwrap();
        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        // 10 000 × 15% + 12 000 × 5% = 2 100, one record for the order.
        let records = platform.list_ristournes(Some(partner.party)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 2_100);
        assert_eq!(records[0].lines.len(), 2);
        assert_eq!(platform.ristourne_total(partner.party).unwrap(), 2_100);
    }

    #[test]
    fn ristourne_triggers_exactly_once_whatever_the_event_order() {
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
            10,
            None,
            BookType::Primary,
            Clientele::PrimaryEducation,
        );

        let order = platform
            .create_order(&partner, partner.party, &[(w.id, 2)])
            .unwrap();

        // Validation first: no rebate while unpaid.
        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();
        assert!(platform.list_ristournes(Some(partner.party)).unwrap().is_empty());

        // Partial payment is not enough.
        platform
            .record_payment(order.id, PaymentStatus::Partial)
            .unwrap();
        assert!(platform.list_ristournes(Some(partner.party)).unwrap().is_empty());

        // Full settlement: exactly one record (2 × 10 000 × 15% = 3 000).
        platform
            .record_payment(order.id, PaymentStatus::Settled)
            .unwrap();
        let records = platform.list_ristournes(Some(partner.party)).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].amount, 3_000);

        // Replay both triggers: still one record.
        platform
            .record_payment(order.id, PaymentStatus::Settled)
            .unwrap();
        assert_eq!(platform.list_ristournes(Some(partner.party)).unwrap().len(), 1);
    }

    #[test]
    fn configured_rates_drive_the_rebate() {
        use cl_05_ristournes::RistourneRateTable;
        use platform_runtime::{Platform, PlatformConfig};
        use platform_store::{FixedTimeSource, InMemoryStore};
        use std::sync::Arc;

        let config = PlatformConfig {
            ristourne_rates: RistourneRateTable {
                primary_bp: 2_000, // negotiated 20% on primary schoolbooks
                secondary_bp: 1_200,
                promotional_bp: 500,
            },
            ..PlatformConfig::default()
        };
        let platform = Platform::new(
            Arc::new(InMemoryStore::new()),
            Arc::new(FixedTimeSource::at(T0)),
            config,
        );
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
            10,
            None,
            BookType::Primary,
            Clientele::PrimaryEducation,
        );

        let order = platform
            .create_order(&partner, partner.party, &[(w.id, 2)])
            .unwrap();
        platform
            .record_payment(order.id, PaymentStatus::Settled)
            .unwrap();
        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        // 2 × 10 000 at the negotiated 20%.
        assert_eq!(platform.ristourne_total(partner.party).unwrap(), 4_000);
    }

    #[test]
    fn non_partner_buyers_never_generate_ristournes() {
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
        platform
            .record_payment(order.id, PaymentStatus::Settled)
            .unwrap();
        platform
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        assert!(platform.list_ristournes(None).unwrap().is_empty());
    }
}
