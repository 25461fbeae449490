//! # Driven Ports (SPI - Outbound)
//!
//! Interfaces this subsystem depends on. External adapters implement these
//! traits to provide:
//! - the replicated table engine (one trait per keyed table)
//! - the token transfer capability
//!
//! The host ledger serializes all state-mutating calls, so the table ports
//! take `&mut self` and need no internal locking; the transfer capability
//! is the one suspension point in the system and is async.

use crate::domain::entities::{AuthorityRecord, HeirRecord, TestatorRecord};
use crate::domain::value_objects::{AccountId, U256};
use crate::errors::{LedgerError, TransferError};
use async_trait::async_trait;

// =============================================================================
// HEIR TABLE (composite-keyed, secondary-indexed by testator)
// =============================================================================

/// Keyed table of heir records.
///
/// Rows are keyed by `(testator, seq)` and the table maintains a secondary
/// index by testator, so `by_testator` returns rows in insertion order.
pub trait HeirTable: Send + Sync {
    /// Insert a new row. Fails with `DuplicateRow` if the key is taken.
    fn insert(&mut self, record: HeirRecord) -> Result<(), LedgerError>;

    /// Rewrite an existing row in place, keyed by `(testator, seq)`.
    fn update(&mut self, record: HeirRecord) -> Result<(), LedgerError>;

    /// All rows for a testator via the secondary index, insertion-ordered.
    ///
    /// The returned sequence is finite and restartable: calling again
    /// replays the same rows (modulo interleaved writes).
    fn by_testator(&self, testator: AccountId) -> Result<Vec<HeirRecord>, LedgerError>;

    /// Next available sequence key for a testator's rows.
    fn next_seq(&self, testator: AccountId) -> Result<u64, LedgerError>;
}

// =============================================================================
// AUTHORITY TABLE (keyed by authority id)
// =============================================================================

/// Keyed table of authority records.
pub trait AuthorityTable: Send + Sync {
    /// Read a row by authority id.
    fn get(&self, authority: AccountId) -> Result<Option<AuthorityRecord>, LedgerError>;

    /// Insert or rewrite the row for `record.authority`.
    fn put(&mut self, record: AuthorityRecord) -> Result<(), LedgerError>;
}

// =============================================================================
// TESTATOR TABLE (keyed by testator id)
// =============================================================================

/// Keyed table of testator records.
pub trait TestatorTable: Send + Sync {
    /// Read a row by testator id.
    fn get(&self, testator: AccountId) -> Result<Option<TestatorRecord>, LedgerError>;

    /// Insert or rewrite the row for `record.testator`.
    fn put(&mut self, record: TestatorRecord) -> Result<(), LedgerError>;
}

// =============================================================================
// TRANSFER CAPABILITY
// =============================================================================

/// Interface to the external token engine.
///
/// Invoked by the distributor once release is authorized. A call is
/// all-or-nothing from this subsystem's perspective: it either moves the
/// amount or reports a fault, and the host ledger discards any partial
/// transaction on failure.
#[async_trait]
pub trait TransferCapability: Send + Sync {
    /// Current balance of an account (zero if it never held funds).
    async fn balance_of(&self, account: AccountId) -> Result<U256, TransferError>;

    /// Move `amount` from `from` to `to`.
    async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), TransferError>;
}

// =============================================================================
// TESTS
// =============================================================================
