//! # Driving Ports (API - Inbound)
//!
//! The interface exposed by the inheritance subsystem. The host's
//! action-dispatch shim routes an incoming ledger action to the matching
//! operation, supplying the already-verified caller identity.

use crate::domain::entities::{AuthorityRecord, DistributionReport, HeirRecord};
use crate::domain::value_objects::{AccountId, LifecycleStatus, U256};
use crate::errors::InheritanceError;
use async_trait::async_trait;

// =============================================================================
// INHERITANCE API (Primary Driving Port)
// =============================================================================

/// Primary API for the inheritance lifecycle.
///
/// Every operation takes the verified caller identity first; the caller
/// constraints are enforced inside, never by the dispatch shim.
///
/// ## Usage
///
/// ```ignore
/// api.register_heir(testator, testator, heir, 60).await?;
/// api.claim_dead(heir, testator).await?;
/// let report = api.confirm_dead(authority, testator).await?;
/// ```
#[async_trait]
pub trait InheritanceApi: Send + Sync {
    /// Register `heir` with `share` percent of `caller`'s estate.
    ///
    /// Self-registration only: `caller` must equal `testator`.
    async fn register_heir(
        &self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError>;

    /// Rewrite the share of an already-registered heir.
    ///
    /// Self-service only, and only while the testator is alive.
    async fn update_share(
        &self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError>;

    /// File a death claim for `testator`. Caller must be a registered heir.
    async fn claim_dead(
        &self,
        caller: AccountId,
        testator: AccountId,
    ) -> Result<LifecycleStatus, InheritanceError>;

    /// Confirm a pending death claim, acting as authority, and release the
    /// estate to the heirs.
    async fn confirm_dead(
        &self,
        caller: AccountId,
        testator: AccountId,
    ) -> Result<DistributionReport, InheritanceError>;

    /// Contest a death claim: the caller asserts it is alive. Penalizes the
    /// attached authority, if any.
    async fn claim_alive(&self, caller: AccountId) -> Result<LifecycleStatus, InheritanceError>;

    /// Bond `amount` onto the caller's own authority record.
    async fn deposit_pledge(
        &self,
        caller: AccountId,
        amount: U256,
    ) -> Result<AuthorityRecord, InheritanceError>;

    /// Current lifecycle status of a testator (ALIVE if unknown).
    async fn status_of(&self, testator: AccountId) -> Result<LifecycleStatus, InheritanceError>;

    /// Registered heirs of a testator, in insertion order.
    async fn heirs_of(&self, testator: AccountId) -> Result<Vec<HeirRecord>, InheritanceError>;

    /// Current reputation of an authority (zero if unknown).
    async fn reputation_of(&self, authority: AccountId) -> Result<u64, InheritanceError>;
}
