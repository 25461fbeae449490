//! # Core Domain Entities
//!
//! Main business entities for the inheritance lifecycle: the three record
//! types persisted in the ledger tables and the distribution report
//! produced when an estate is released.

use crate::domain::value_objects::{AccountId, LifecycleStatus, SharePercent, U256};
use serde::{Deserialize, Serialize};

// =============================================================================
// HEIR RECORD
// =============================================================================

/// A registered heir of a testator.
///
/// Identified by the `(testator, heir)` pair, which is unique; the `seq`
/// field is the registry-assigned primary key ordering records by insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeirRecord {
    /// Registry-assigned sequence key (insertion order within a testator).
    pub seq: u64,
    /// The testator whose estate this record belongs to.
    pub testator: AccountId,
    /// The heir entitled to a share.
    pub heir: AccountId,
    /// The heir's share of the estate.
    pub share: SharePercent,
}

impl HeirRecord {
    /// Creates a new heir record.
    #[must_use]
    pub const fn new(seq: u64, testator: AccountId, heir: AccountId, share: SharePercent) -> Self {
        Self {
            seq,
            testator,
            heir,
            share,
        }
    }
}

// =============================================================================
// AUTHORITY RECORD
// =============================================================================

/// A death-confirming authority and its trust state.
///
/// Reputation grows with each correct confirmation and is reset to zero,
/// together with the pledge, when a confirmation is proven false.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityRecord {
    /// The authority's account.
    pub authority: AccountId,
    /// Count of confirmations that were never contested.
    pub reputation: u64,
    /// Stake bonded against a false confirmation.
    pub pledge: U256,
}

impl AuthorityRecord {
    /// Creates a fresh authority record with zero reputation and pledge.
    #[must_use]
    pub fn new(authority: AccountId) -> Self {
        Self {
            authority,
            reputation: 0,
            pledge: U256::zero(),
        }
    }
}

// =============================================================================
// TESTATOR RECORD
// =============================================================================

/// A testator's lifecycle state.
///
/// The attached authority is the one bonded to the current death claim;
/// it is only present while a confirmation is pending or made, and is
/// cleared when the testator revives or the record closes. Storing it here
/// is what lets revival find the authority to penalize without a lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestatorRecord {
    /// The testator's account.
    pub testator: AccountId,
    /// Current lifecycle status.
    pub status: LifecycleStatus,
    /// Authority bonded to the current claim, if any.
    pub authority: Option<AccountId>,
}

impl TestatorRecord {
    /// Creates a fresh, alive testator record.
    #[must_use]
    pub const fn new(testator: AccountId) -> Self {
        Self {
            testator,
            status: LifecycleStatus::Alive,
            authority: None,
        }
    }
}

// =============================================================================
// PAYOUT & DISTRIBUTION REPORT
// =============================================================================

/// A single heir payout computed from the estate balance and a share.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// Receiving heir.
    pub heir: AccountId,
    /// Share the payout was computed from.
    pub share: SharePercent,
    /// Amount transferred.
    pub amount: U256,
}

/// Outcome of a completed estate distribution.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistributionReport {
    /// The testator whose estate was distributed.
    pub testator: AccountId,
    /// Estate balance observed at distribution time.
    pub estate: U256,
    /// Per-heir payouts actually transferred (zero payouts are skipped).
    pub payouts: Vec<Payout>,
    /// Rounding residual left with the estate.
    pub residual: U256,
}

impl DistributionReport {
    /// Total amount released to heirs.
    #[must_use]
    pub fn total_released(&self) -> U256 {
        self.payouts
            .iter()
            .fold(U256::zero(), |acc, p| acc + p.amount)
    }
}

// =============================================================================
// TESTS
// =============================================================================
