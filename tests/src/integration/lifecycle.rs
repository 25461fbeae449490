//! # Lifecycle Integration Tests
//!
//! Drives the full state machine end to end over the in-memory adapters:
//!
//! ```text
//! register_heir* → claim_dead → confirm_dead → (distribution) → CLOSED
//!                       │
//!                       └→ claim_alive → ALIVE
//! ```

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use testament_inheritance::prelude::*;

    use crate::init_tracing;

    const T: AccountId = AccountId::new(0x70);
    const A: AccountId = AccountId::new(0xA0);
    const B: AccountId = AccountId::new(0xB0);
    const X: AccountId = AccountId::new(0x90);

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    type TestService = DeathClaimService<
        InMemoryHeirTable,
        InMemoryAuthorityTable,
        InMemoryTestatorTable,
        InMemoryBank,
    >;

    /// A funded estate with the classic 60/40 will.
    async fn sixty_forty_estate() -> (TestService, Arc<InMemoryBank>) {
        let (service, bank) = create_test_service();
        bank.set_balance(T, U256::from(1_000u64));
        service.register_heir(T, T, A, 60).await.unwrap();
        service.register_heir(T, T, B, 40).await.unwrap();
        (service, bank)
    }

    // =============================================================================
    // HAPPY PATH
    // =============================================================================

    #[tokio::test]
    async fn test_estate_released_proportionally() {
        init_tracing();
        let (service, bank) = sixty_forty_estate().await;

        service.claim_dead(A, T).await.unwrap();
        assert_eq!(service.status_of(T).await.unwrap(), LifecycleStatus::ClaimedDead);

        let report = service.confirm_dead(X, T).await.unwrap();

        assert_eq!(service.status_of(T).await.unwrap(), LifecycleStatus::Closed);
        assert_eq!(service.reputation_of(X).await.unwrap(), 1);
        assert_eq!(report.estate, U256::from(1_000u64));
        assert!(report.residual.is_zero());

        assert_eq!(bank.balance_of(A).await.unwrap(), U256::from(600u64));
        assert_eq!(bank.balance_of(B).await.unwrap(), U256::from(400u64));
        assert_eq!(bank.balance_of(T).await.unwrap(), U256::zero());

        // Transfers happened in registration order.
        let transfers = bank.transfers();
        assert_eq!(transfers.len(), 2);
        assert_eq!(transfers[0].to, A);
        assert_eq!(transfers[1].to, B);
    }

    #[tokio::test]
    async fn test_either_heir_can_file_the_claim() {
        let (service, _bank) = sixty_forty_estate().await;
        assert!(service.claim_dead(B, T).await.is_ok());
    }

    #[tokio::test]
    async fn test_rounding_residual_stays_with_estate() {
        let (service, bank) = create_test_service();
        bank.set_balance(T, U256::from(1_000u64));
        // three-way 33/33/33 will: 10 units of dust stay behind
        for (heir, share) in [(A, 33u8), (B, 33), (X, 33)] {
            service.register_heir(T, T, heir, share).await.unwrap();
        }

        service.claim_dead(A, T).await.unwrap();
        let authority = AccountId::new(0x91);
        let report = service.confirm_dead(authority, T).await.unwrap();

        assert_eq!(report.total_released(), U256::from(990u64));
        assert_eq!(report.residual, U256::from(10u64));
        assert_eq!(bank.balance_of(T).await.unwrap(), U256::from(10u64));
    }

    // =============================================================================
    // REVIVAL ROUND TRIP
    // =============================================================================

    #[tokio::test]
    async fn test_claim_and_revive_leaves_records_unchanged() {
        let (service, bank) = sixty_forty_estate().await;
        let heirs_before = service.heirs_of(T).await.unwrap();

        service.claim_dead(A, T).await.unwrap();
        assert_eq!(
            service.claim_alive(T).await.unwrap(),
            LifecycleStatus::Alive
        );

        // Nothing moved, nobody was penalized (no authority had bonded).
        assert_eq!(service.heirs_of(T).await.unwrap(), heirs_before);
        assert_eq!(bank.balance_of(T).await.unwrap(), U256::from(1_000u64));
        assert!(bank.transfers().is_empty());

        // The cycle can repeat.
        service.claim_dead(B, T).await.unwrap();
        assert!(service.confirm_dead(X, T).await.is_ok());
    }

    #[tokio::test]
    async fn test_share_updates_apply_to_next_claim() {
        let (service, bank) = create_test_service();
        bank.set_balance(T, U256::from(100u64));
        service.register_heir(T, T, A, 60).await.unwrap();
        service.register_heir(T, T, B, 40).await.unwrap();

        service.update_share(T, T, A, 10).await.unwrap();
        service.update_share(T, T, B, 90).await.unwrap();

        service.claim_dead(A, T).await.unwrap();
        service.confirm_dead(X, T).await.unwrap();

        assert_eq!(bank.balance_of(A).await.unwrap(), U256::from(10u64));
        assert_eq!(bank.balance_of(B).await.unwrap(), U256::from(90u64));
    }

    // =============================================================================
    // MANY TESTATORS
    // =============================================================================

    #[tokio::test]
    async fn test_estates_are_isolated() -> Result<()> {
        init_tracing();
        let (service, bank) = create_test_service();
        let mut rng = StdRng::seed_from_u64(0x7E57);

        // A population of testators with a single full heir each.
        let testators: Vec<AccountId> =
            (0..8).map(|i| AccountId::new(0x1000 + i)).collect();
        for (i, testator) in testators.iter().enumerate() {
            let heir = AccountId::new(0x2000 + i as u64);
            bank.set_balance(*testator, U256::from(rng.gen_range(100u64..10_000)));
            service.register_heir(*testator, *testator, heir, 100).await?;
        }

        // Claim and confirm only the even ones.
        for (i, testator) in testators.iter().enumerate() {
            if i % 2 == 0 {
                let heir = AccountId::new(0x2000 + i as u64);
                service.claim_dead(heir, *testator).await?;
                service.confirm_dead(X, *testator).await?;
            }
        }

        for (i, testator) in testators.iter().enumerate() {
            let expected = if i % 2 == 0 {
                LifecycleStatus::Closed
            } else {
                LifecycleStatus::Alive
            };
            assert_eq!(service.status_of(*testator).await?, expected);
        }
        // One reward per confirmed estate.
        assert_eq!(service.reputation_of(X).await?, 4);
        Ok(())
    }
}
