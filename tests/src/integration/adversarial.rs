//! # Adversarial Integration Tests
//!
//! Attack-shaped scenarios against the state machine:
//!
//! 1. **Impostors**: non-heirs filing claims, strangers rewriting wills
//! 2. **Races**: concurrent claims and confirmations
//! 3. **False confirmations**: authority punished when the testator shows up
//! 4. **Stuck distributions**: take-over attempts while a release is failing

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use testament_inheritance::prelude::*;

    const T: AccountId = AccountId::new(0x70);
    const A: AccountId = AccountId::new(0xA0);
    const B: AccountId = AccountId::new(0xB0);
    const MALLORY: AccountId = AccountId::new(0xBAD);
    const X: AccountId = AccountId::new(0x90);
    const Y: AccountId = AccountId::new(0x91);

    type TestService = DeathClaimService<
        InMemoryHeirTable,
        InMemoryAuthorityTable,
        InMemoryTestatorTable,
        InMemoryBank,
    >;

    async fn estate_with_two_heirs() -> (TestService, Arc<InMemoryBank>) {
        let (service, bank) = create_test_service();
        bank.set_balance(T, U256::from(1_000u64));
        service.register_heir(T, T, A, 60).await.unwrap();
        service.register_heir(T, T, B, 40).await.unwrap();
        (service, bank)
    }

    /// Exercises an operation through the driving port, as the dispatch
    /// shim would.
    async fn claim_via_api(api: &impl InheritanceApi, caller: AccountId, testator: AccountId) -> Result<LifecycleStatus, InheritanceError> {
        api.claim_dead(caller, testator).await
    }

    // =============================================================================
    // IMPOSTORS
    // =============================================================================

    #[tokio::test]
    async fn test_non_heir_claim_is_rejected() {
        let (service, _bank) = estate_with_two_heirs().await;

        let err = claim_via_api(&service, MALLORY, T).await.unwrap_err();
        assert!(matches!(err, InheritanceError::PermissionDenied { .. }));
        assert_eq!(service.status_of(T).await.unwrap(), LifecycleStatus::Alive);

        // The testator itself is not an heir either.
        let err = claim_via_api(&service, T, T).await.unwrap_err();
        assert!(matches!(err, InheritanceError::PermissionDenied { .. }));
    }

    #[tokio::test]
    async fn test_stranger_cannot_write_someone_elses_will() {
        let (service, _bank) = estate_with_two_heirs().await;

        let err = service.register_heir(MALLORY, T, MALLORY, 0).await.unwrap_err();
        assert!(matches!(err, InheritanceError::PermissionDenied { .. }));

        let err = service.update_share(MALLORY, T, A, 0).await.unwrap_err();
        assert!(matches!(err, InheritanceError::PermissionDenied { .. }));

        // Records untouched.
        let heirs = service.heirs_of(T).await.unwrap();
        assert_eq!(heirs.len(), 2);
        assert_eq!(share_total(&heirs), 100);
    }

    #[tokio::test]
    async fn test_share_budget_cannot_be_overdrawn() {
        let (service, _bank) = create_test_service();
        service.register_heir(T, T, A, 90).await.unwrap();

        let err = service.register_heir(T, T, B, 11).await.unwrap_err();
        assert!(matches!(err, InheritanceError::InvalidShare { .. }));

        // Squeezing past the budget via update is also rejected.
        service.register_heir(T, T, B, 10).await.unwrap();
        let err = service.update_share(T, T, B, 11).await.unwrap_err();
        assert!(matches!(err, InheritanceError::InvalidShare { .. }));

        let heirs = service.heirs_of(T).await.unwrap();
        assert!(check_all_invariants(None, &heirs).is_valid());
    }

    // =============================================================================
    // RACES & REPLAY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_heirs_racing_to_claim() {
        let (service, _bank) = estate_with_two_heirs().await;
        let service = Arc::new(service);

        let s1 = Arc::clone(&service);
        let s2 = Arc::clone(&service);
        let h1 = tokio::spawn(async move { s1.claim_dead(A, T).await });
        let h2 = tokio::spawn(async move { s2.claim_dead(B, T).await });

        let results = [h1.await.unwrap(), h2.await.unwrap()];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(results.iter().any(|r| matches!(
            r,
            Err(InheritanceError::InvalidTransition { .. })
        )));
        assert_eq!(
            service.status_of(T).await.unwrap(),
            LifecycleStatus::ClaimedDead
        );
    }

    #[tokio::test]
    async fn test_replayed_claim_is_rejected() {
        let (service, _bank) = estate_with_two_heirs().await;
        service.claim_dead(A, T).await.unwrap();

        let err = service.claim_dead(A, T).await.unwrap_err();
        assert!(matches!(err, InheritanceError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn test_second_authority_cannot_reconfirm() {
        let (service, _bank) = estate_with_two_heirs().await;
        service.claim_dead(A, T).await.unwrap();
        service.confirm_dead(X, T).await.unwrap();

        // Estate is CLOSED; a latecomer authority earns nothing.
        let err = service.confirm_dead(Y, T).await.unwrap_err();
        assert!(matches!(err, InheritanceError::InvalidTransition { .. }));
        assert_eq!(service.reputation_of(X).await.unwrap(), 1);
        assert_eq!(service.reputation_of(Y).await.unwrap(), 0);
    }

    // =============================================================================
    // FALSE CONFIRMATIONS
    // =============================================================================

    #[tokio::test]
    async fn test_false_confirmation_costs_reputation_and_pledge() {
        // A transfer capability that always fails parks the claim in
        // CONFIRMED_DEAD, the only window where the living testator can
        // still contest a bonded confirmation.
        let service = DeathClaimService::new(
            InMemoryHeirTable::new(),
            InMemoryAuthorityTable::new(),
            InMemoryTestatorTable::new(),
            Arc::new(StuckBank),
            ServiceConfig::default(),
        );
        let record = service
            .deposit_pledge(X, U256::from(5_000u64))
            .await
            .unwrap();
        assert_eq!(record.pledge, U256::from(5_000u64));

        // An honest confirmation first: a zero-share will distributes
        // trivially (no transfers), so X earns a reputation point.
        let t2 = AccountId::new(0x71);
        service.register_heir(t2, t2, B, 0).await.unwrap();
        service.claim_dead(B, t2).await.unwrap();
        service.confirm_dead(X, t2).await.unwrap();
        assert_eq!(service.reputation_of(X).await.unwrap(), 1);

        // Now the false one.
        service.register_heir(T, T, A, 100).await.unwrap();
        service.claim_dead(A, T).await.unwrap();
        let err = service.confirm_dead(X, T).await.unwrap_err();
        assert!(matches!(err, InheritanceError::DistributionIncomplete { .. }));

        // The "dead" testator walks in: reputation gone, pledge forfeited.
        assert_eq!(
            service.claim_alive(T).await.unwrap(),
            LifecycleStatus::Alive
        );
        assert_eq!(service.reputation_of(X).await.unwrap(), 0);
        let record = service.deposit_pledge(X, U256::zero()).await.unwrap();
        assert!(record.pledge.is_zero());

        // A later honest cycle starts from a clean slate.
        service.claim_dead(A, T).await.unwrap();
        assert_eq!(
            service.status_of(T).await.unwrap(),
            LifecycleStatus::ClaimedDead
        );
    }

    // =============================================================================
    // STUCK DISTRIBUTIONS
    // =============================================================================

    /// Transfer capability that reports a healthy balance but never pays.
    struct StuckBank;

    #[async_trait]
    impl TransferCapability for StuckBank {
        async fn balance_of(&self, _account: AccountId) -> Result<U256, TransferError> {
            Ok(U256::from(1_000u64))
        }

        async fn transfer(
            &self,
            _from: AccountId,
            _to: AccountId,
            _amount: U256,
        ) -> Result<(), TransferError> {
            Err(TransferError::Unavailable)
        }
    }

    #[tokio::test]
    async fn test_stuck_distribution_cannot_be_hijacked() {
        let service = DeathClaimService::new(
            InMemoryHeirTable::new(),
            InMemoryAuthorityTable::new(),
            InMemoryTestatorTable::new(),
            Arc::new(StuckBank),
            ServiceConfig::default(),
        );
        service.register_heir(T, T, A, 100).await.unwrap();
        service.claim_dead(A, T).await.unwrap();

        let err = service.confirm_dead(X, T).await.unwrap_err();
        assert!(matches!(err, InheritanceError::DistributionIncomplete { .. }));
        assert_eq!(
            service.status_of(T).await.unwrap(),
            LifecycleStatus::ConfirmedDead
        );

        // Another authority cannot steal the bonded confirmation...
        let err = service.confirm_dead(Y, T).await.unwrap_err();
        assert!(matches!(err, InheritanceError::InvalidTransition { .. }));

        // ...and no reward is minted while the release keeps failing.
        let err = service.confirm_dead(X, T).await.unwrap_err();
        assert!(matches!(err, InheritanceError::DistributionIncomplete { .. }));
        assert_eq!(service.reputation_of(X).await.unwrap(), 0);
    }
}
