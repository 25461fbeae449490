//! # Testator Registry
//!
//! Owns the per-testator lifecycle status and the identity of whichever
//! authority is bonded to a pending or confirmed death claim. Every status
//! write goes through the single guarded `transition` operation, so no
//! transition can be applied from an unexpected state.

use crate::domain::entities::TestatorRecord;
use crate::domain::value_objects::{AccountId, LifecycleStatus};
use crate::errors::InheritanceError;
use crate::ports::outbound::TestatorTable;
use tracing::info;

/// Registry of testator records, backed by the external testator table.
#[derive(Debug)]
pub struct TestatorRegistry<T: TestatorTable> {
    table: T,
}

impl<T: TestatorTable> TestatorRegistry<T> {
    /// Creates a registry over the given table.
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// Current lifecycle status. A testator with no record is trivially
    /// alive.
    pub fn status_of(&self, testator: AccountId) -> Result<LifecycleStatus, InheritanceError> {
        Ok(self
            .table
            .get(testator)?
            .map_or(LifecycleStatus::Alive, |r| r.status))
    }

    /// Full record, if one exists yet.
    pub fn record_of(
        &self,
        testator: AccountId,
    ) -> Result<Option<TestatorRecord>, InheritanceError> {
        Ok(self.table.get(testator)?)
    }

    /// Authority bonded to the testator's current claim, if any.
    pub fn attached_authority(
        &self,
        testator: AccountId,
    ) -> Result<Option<AccountId>, InheritanceError> {
        Ok(self.table.get(testator)?.and_then(|r| r.authority))
    }

    /// Make sure a backing row exists (created implicitly when the first
    /// heir is registered). Idempotent; never changes an existing row.
    pub fn ensure_exists(&mut self, testator: AccountId) -> Result<(), InheritanceError> {
        if self.table.get(testator)?.is_none() {
            self.table.put(TestatorRecord::new(testator))?;
        }
        Ok(())
    }

    /// Atomically move a testator from one of `from` to `to`, rebinding the
    /// attached authority.
    ///
    /// Fails with `InvalidTransition` if the current status is not in
    /// `from`. This is the only write path for status and attachment, and
    /// it writes both in one row update. Returns the prior record so the
    /// caller can read the previously attached authority.
    pub fn transition(
        &mut self,
        testator: AccountId,
        from: &[LifecycleStatus],
        to: LifecycleStatus,
        authority: Option<AccountId>,
    ) -> Result<TestatorRecord, InheritanceError> {
        let prior = self
            .table
            .get(testator)?
            .unwrap_or_else(|| TestatorRecord::new(testator));

        if !from.contains(&prior.status) {
            return Err(InheritanceError::InvalidTransition {
                testator,
                from: prior.status,
                requested: to,
            });
        }

        self.table.put(TestatorRecord {
            testator,
            status: to,
            authority,
        })?;

        info!(%testator, from = %prior.status, to = %to, "lifecycle transition");
        Ok(prior)
    }
}

// =============================================================================
// TESTS
// =============================================================================
