//! # Authority Registry
//!
//! Owns authority reputation and pledge. Updated only by the state machine
//! on confirm/contest outcomes; no other code path writes these fields.

use crate::domain::entities::AuthorityRecord;
use crate::domain::value_objects::{AccountId, U256};
use crate::errors::InheritanceError;
use crate::ports::outbound::AuthorityTable;
use tracing::{debug, warn};

/// Registry of authority records, backed by the external authority table.
#[derive(Debug)]
pub struct AuthorityRegistry<T: AuthorityTable> {
    table: T,
}

impl<T: AuthorityTable> AuthorityRegistry<T> {
    /// Creates a registry over the given table.
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// Fetch an authority record, inserting a fresh one if none exists.
    /// Idempotent.
    pub fn get_or_create(
        &mut self,
        authority: AccountId,
    ) -> Result<AuthorityRecord, InheritanceError> {
        if let Some(record) = self.table.get(authority)? {
            return Ok(record);
        }
        let record = AuthorityRecord::new(authority);
        self.table.put(record)?;
        Ok(record)
    }

    /// Reward a correct confirmation: reputation += 1.
    pub fn reward(&mut self, authority: AccountId) -> Result<AuthorityRecord, InheritanceError> {
        let mut record = self.get_or_create(authority)?;
        record.reputation = record.reputation.saturating_add(1);
        self.table.put(record)?;

        debug!(%authority, reputation = record.reputation, "authority rewarded");
        Ok(record)
    }

    /// Punish a proven-false confirmation: reputation reset to zero and the
    /// pledge forfeited.
    pub fn penalize(&mut self, authority: AccountId) -> Result<AuthorityRecord, InheritanceError> {
        let mut record = self.get_or_create(authority)?;
        let forfeited = record.pledge;
        record.reputation = 0;
        record.pledge = U256::zero();
        self.table.put(record)?;

        warn!(%authority, %forfeited, "authority penalized for false confirmation");
        Ok(record)
    }

    /// Bond `amount` onto an authority record (auto-created).
    pub fn deposit_pledge(
        &mut self,
        authority: AccountId,
        amount: U256,
    ) -> Result<AuthorityRecord, InheritanceError> {
        let mut record = self.get_or_create(authority)?;
        record.pledge = record.pledge.saturating_add(amount);
        self.table.put(record)?;

        debug!(%authority, pledge = %record.pledge, "pledge deposited");
        Ok(record)
    }

    /// Current reputation of an authority, zero if it has no record.
    pub fn reputation_of(&self, authority: AccountId) -> Result<u64, InheritanceError> {
        Ok(self.table.get(authority)?.map_or(0, |r| r.reputation))
    }

    /// Read a record without creating one.
    pub fn get(&self, authority: AccountId) -> Result<Option<AuthorityRecord>, InheritanceError> {
        Ok(self.table.get(authority)?)
    }
}

// =============================================================================
// TESTS
// =============================================================================
