//! # Inheritance Distributor
//!
//! Computes per-heir payouts from shares and invokes the external transfer
//! capability. Invoked by the state machine once a death is confirmed;
//! any transfer fault aborts the whole release so the testator stays
//! CONFIRMED_DEAD and distribution can be re-run.

use crate::domain::entities::{DistributionReport, HeirRecord};
use crate::domain::services::compute_payouts;
use crate::domain::value_objects::AccountId;
use crate::errors::InheritanceError;
use crate::ports::outbound::TransferCapability;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Releases a confirmed-dead testator's estate to its heirs.
#[derive(Debug)]
pub struct InheritanceDistributor<X: TransferCapability> {
    transfer: Arc<X>,
}

impl<X: TransferCapability> InheritanceDistributor<X> {
    /// Creates a distributor over the given transfer capability.
    pub fn new(transfer: Arc<X>) -> Self {
        Self { transfer }
    }

    /// Release the estate of `testator` to `heirs`.
    ///
    /// Each payout is `estate * share / 100`; zero payouts are skipped and
    /// the rounding residual stays with the estate. The first failing
    /// transfer aborts with `DistributionIncomplete` (the host ledger
    /// discards partial effects of the enclosing action).
    pub async fn distribute(
        &self,
        testator: AccountId,
        heirs: &[HeirRecord],
    ) -> Result<DistributionReport, InheritanceError> {
        let estate = self.transfer.balance_of(testator).await.map_err(|source| {
            InheritanceError::DistributionIncomplete {
                testator,
                failed_heir: None,
                source,
            }
        })?;

        let (payouts, residual) = compute_payouts(estate, heirs);
        debug!(%testator, %estate, payouts = payouts.len(), %residual, "distribution computed");

        for payout in &payouts {
            if let Err(source) = self
                .transfer
                .transfer(testator, payout.heir, payout.amount)
                .await
            {
                warn!(%testator, heir = %payout.heir, amount = %payout.amount, error = %source,
                    "transfer failed, aborting distribution");
                return Err(InheritanceError::DistributionIncomplete {
                    testator,
                    failed_heir: Some(payout.heir),
                    source,
                });
            }
        }

        let report = DistributionReport {
            testator,
            estate,
            payouts,
            residual,
        };
        info!(%testator, released = %report.total_released(), "estate distributed");
        Ok(report)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::bank::InMemoryBank;
    use crate::domain::value_objects::{SharePercent, U256};
    use crate::errors::TransferError;
    use crate::ports::outbound::TransferCapability;
    use async_trait::async_trait;

    const T: AccountId = AccountId::new(1);
    const A: AccountId = AccountId::new(2);
    const B: AccountId = AccountId::new(3);

    fn heir(seq: u64, id: AccountId, share: u8) -> HeirRecord {
        HeirRecord::new(seq, T, id, SharePercent::new(share).unwrap())
    }

    #[tokio::test]
    async fn test_distribute_pays_by_share() {
        let bank = Arc::new(InMemoryBank::new());
        bank.set_balance(T, U256::from(1000u64));
        let distributor = InheritanceDistributor::new(Arc::clone(&bank));

        let report = distributor
            .distribute(T, &[heir(0, A, 60), heir(1, B, 40)])
            .await
            .unwrap();

        assert_eq!(report.estate, U256::from(1000u64));
        assert_eq!(report.total_released(), U256::from(1000u64));
        assert!(report.residual.is_zero());
        assert_eq!(bank.balance_of(A).await.unwrap(), U256::from(600u64));
        assert_eq!(bank.balance_of(B).await.unwrap(), U256::from(400u64));
        assert_eq!(bank.balance_of(T).await.unwrap(), U256::zero());
    }

    #[tokio::test]
    async fn test_distribute_keeps_residual_with_estate() {
        let bank = Arc::new(InMemoryBank::new());
        bank.set_balance(T, U256::from(100u64));
        let distributor = InheritanceDistributor::new(Arc::clone(&bank));

        let report = distributor
            .distribute(T, &[heir(0, A, 33), heir(1, B, 33)])
            .await
            .unwrap();

        assert_eq!(report.residual, U256::from(34u64));
        assert_eq!(bank.balance_of(T).await.unwrap(), U256::from(34u64));
    }

    #[tokio::test]
    async fn test_distribute_empty_heirs_is_trivial() {
        let bank = Arc::new(InMemoryBank::new());
        bank.set_balance(T, U256::from(500u64));
        let distributor = InheritanceDistributor::new(Arc::clone(&bank));

        let report = distributor.distribute(T, &[]).await.unwrap();
        assert!(report.payouts.is_empty());
        assert_eq!(report.residual, U256::from(500u64));
    }

    // Transfer capability that refuses to pay a chosen account.
    struct VetoBank {
        inner: InMemoryBank,
        veto: AccountId,
    }

    #[async_trait]
    impl TransferCapability for VetoBank {
        async fn balance_of(&self, account: AccountId) -> Result<U256, TransferError> {
            self.inner.balance_of(account).await
        }

        async fn transfer(
            &self,
            from: AccountId,
            to: AccountId,
            amount: U256,
        ) -> Result<(), TransferError> {
            if to == self.veto {
                return Err(TransferError::RecipientRejected(to));
            }
            self.inner.transfer(from, to, amount).await
        }
    }

    #[tokio::test]
    async fn test_distribute_aborts_on_transfer_failure() {
        let inner = InMemoryBank::new();
        inner.set_balance(T, U256::from(1000u64));
        let bank = Arc::new(VetoBank { inner, veto: B });
        let distributor = InheritanceDistributor::new(Arc::clone(&bank));

        let err = distributor
            .distribute(T, &[heir(0, A, 60), heir(1, B, 40)])
            .await
            .unwrap_err();

        match err {
            InheritanceError::DistributionIncomplete { failed_heir, .. } => {
                assert_eq!(failed_heir, Some(B));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
