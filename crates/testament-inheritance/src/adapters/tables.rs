//! # Table Adapters
//!
//! In-memory implementations of the table ports for testing.
//! Production adapters would translate these calls into the host ledger's
//! replicated table engine; a `BTreeMap` keyed by `(testator, seq)` stands
//! in for its ordered store plus by-testator secondary index.

use crate::domain::entities::{AuthorityRecord, HeirRecord, TestatorRecord};
use crate::domain::value_objects::AccountId;
use crate::errors::LedgerError;
use crate::ports::outbound::{AuthorityTable, HeirTable, TestatorTable};
use std::collections::BTreeMap;

// =============================================================================
// HEIR TABLE
// =============================================================================

/// In-memory heir table.
#[derive(Debug, Default)]
pub struct InMemoryHeirTable {
    rows: BTreeMap<(AccountId, u64), HeirRecord>,
}

impl InMemoryHeirTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows across all testators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table holds no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl HeirTable for InMemoryHeirTable {
    fn insert(&mut self, record: HeirRecord) -> Result<(), LedgerError> {
        let key = (record.testator, record.seq);
        if self.rows.contains_key(&key) {
            return Err(LedgerError::DuplicateRow(record.testator));
        }
        self.rows.insert(key, record);
        Ok(())
    }

    fn update(&mut self, record: HeirRecord) -> Result<(), LedgerError> {
        let key = (record.testator, record.seq);
        if !self.rows.contains_key(&key) {
            return Err(LedgerError::RowNotFound(record.testator));
        }
        self.rows.insert(key, record);
        Ok(())
    }

    fn by_testator(&self, testator: AccountId) -> Result<Vec<HeirRecord>, LedgerError> {
        Ok(self
            .rows
            .range((testator, 0)..=(testator, u64::MAX))
            .map(|(_, r)| *r)
            .collect())
    }

    fn next_seq(&self, testator: AccountId) -> Result<u64, LedgerError> {
        Ok(self
            .rows
            .range((testator, 0)..=(testator, u64::MAX))
            .next_back()
            .map_or(0, |((_, seq), _)| seq + 1))
    }
}

// =============================================================================
// AUTHORITY TABLE
// =============================================================================

/// In-memory authority table.
#[derive(Debug, Default)]
pub struct InMemoryAuthorityTable {
    rows: BTreeMap<AccountId, AuthorityRecord>,
}

impl InMemoryAuthorityTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl AuthorityTable for InMemoryAuthorityTable {
    fn get(&self, authority: AccountId) -> Result<Option<AuthorityRecord>, LedgerError> {
        Ok(self.rows.get(&authority).copied())
    }

    fn put(&mut self, record: AuthorityRecord) -> Result<(), LedgerError> {
        self.rows.insert(record.authority, record);
        Ok(())
    }
}

// =============================================================================
// TESTATOR TABLE
// =============================================================================

/// In-memory testator table.
#[derive(Debug, Default)]
pub struct InMemoryTestatorTable {
    rows: BTreeMap<AccountId, TestatorRecord>,
}

impl InMemoryTestatorTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TestatorTable for InMemoryTestatorTable {
    fn get(&self, testator: AccountId) -> Result<Option<TestatorRecord>, LedgerError> {
        Ok(self.rows.get(&testator).copied())
    }

    fn put(&mut self, record: TestatorRecord) -> Result<(), LedgerError> {
        self.rows.insert(record.testator, record);
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
