//! The asynchronous payment-gateway observation loop, end to end.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use platform_runtime::{spawn_payment_poller, sweep_payments, StaticPaymentGateway};
    use shared_types::{BookType, Clientele, OrderStatus, PaymentStatus, Role};

    use crate::fixtures::{actor, platform, work};

    #[tokio::test]
    async fn sweep_settles_validated_partner_orders() {
        let (platform, _, _) = platform();
        let gateway = StaticPaymentGateway::new();
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
            .transition_order(order.id, OrderStatus::Validated, &exec)
            .unwrap();

        // Gateway silent: nothing changes.
        assert_eq!(sweep_payments(&platform, &gateway).await.unwrap(), 0);

        // Gateway reports partial, then full settlement across two sweeps.
        gateway.set(order.id, PaymentStatus::Partial);
        assert_eq!(sweep_payments(&platform, &gateway).await.unwrap(), 1);
        assert!(platform.list_ristournes(Some(partner.party)).unwrap().is_empty());

        gateway.set(order.id, PaymentStatus::Settled);
        assert_eq!(sweep_payments(&platform, &gateway).await.unwrap(), 1);
        assert_eq!(platform.ristourne_total(partner.party).unwrap(), 3_000);

        // Settled orders drop out of subsequent sweeps.
        assert_eq!(sweep_payments(&platform, &gateway).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn poller_task_applies_gateway_state_in_the_background() {
        let (platform, _, _) = platform();
        let platform = Arc::new(platform);
        let gateway = Arc::new(StaticPaymentGateway::new());
        let exec = actor(&platform, Role::Executive, None);
        let buyer = actor(&platform, Role::Buyer, None);
        let w = work(
            &platform,
            &exec,
            10_000,
            10,
            None,
            BookType::Primary,
            Clientele::GeneralPublic,
        );

        let order = platform
            .create_order(&buyer, buyer.party, &[(w.id, 1)])
            .unwrap();
        gateway.set(order.id, PaymentStatus::Settled);

        let handle = spawn_payment_poller(
            platform.clone(),
            gateway.clone(),
            Duration::from_millis(10),
        );

        // The first tick fires immediately; give the loop a few intervals.
        let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
        loop {
            let stored = platform.order(&order.id).unwrap().unwrap();
            if stored.payment == PaymentStatus::Settled {
                break;
            }
            assert!(
                tokio::time::Instant::now() < deadline,
                "poller never applied the gateway state"
            );
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();
    }
}
