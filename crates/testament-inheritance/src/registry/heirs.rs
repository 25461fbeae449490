//! # Heir Registry
//!
//! Owns the set of (testator, heir, share) records and enforces the
//! registration rules: self-registration only, unique (testator, heir)
//! pairs, and the 100% share budget.

use crate::domain::entities::HeirRecord;
use crate::domain::invariants::limits::FULL_ESTATE_PERCENT;
use crate::domain::services::share_total;
use crate::domain::value_objects::{AccountId, SharePercent};
use crate::errors::InheritanceError;
use crate::ports::outbound::HeirTable;
use tracing::debug;

/// Registry of heir records, backed by the external heir table.
#[derive(Debug)]
pub struct HeirRegistry<T: HeirTable> {
    table: T,
}

impl<T: HeirTable> HeirRegistry<T> {
    /// Creates a registry over the given table.
    pub fn new(table: T) -> Self {
        Self { table }
    }

    /// Register `heir` with `share` percent of `testator`'s estate.
    ///
    /// Caller must be the testator itself. The share must be in `[0, 100]`
    /// and must fit the testator's remaining budget; the `(testator, heir)`
    /// pair must not already be registered.
    pub fn register(
        &mut self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError> {
        if caller != testator {
            return Err(InheritanceError::PermissionDenied {
                caller,
                subject: testator,
            });
        }

        let existing = self.table.by_testator(testator)?;
        let committed = share_total(&existing);

        let share = Self::checked_share(testator, share, committed)?;
        if u32::from(share.get()) + committed > FULL_ESTATE_PERCENT {
            return Err(InheritanceError::InvalidShare {
                testator,
                share: share.get(),
                committed,
            });
        }

        if existing.iter().any(|r| r.heir == heir) {
            return Err(InheritanceError::AlreadyRegistered { testator, heir });
        }

        let record = HeirRecord::new(self.table.next_seq(testator)?, testator, heir, share);
        self.table.insert(record)?;

        debug!(%testator, %heir, %share, seq = record.seq, "heir registered");
        Ok(record)
    }

    /// Rewrite the share of an already-registered heir.
    ///
    /// Same caller and budget rules as `register`, with the heir's old
    /// share excluded from the committed total.
    pub fn update_share(
        &mut self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError> {
        if caller != testator {
            return Err(InheritanceError::PermissionDenied {
                caller,
                subject: testator,
            });
        }

        let existing = self.table.by_testator(testator)?;
        let Some(current) = existing.iter().find(|r| r.heir == heir).copied() else {
            return Err(InheritanceError::NotRegistered(heir));
        };

        let committed = share_total(&existing) - u32::from(current.share.get());
        let share = Self::checked_share(testator, share, committed)?;
        if u32::from(share.get()) + committed > FULL_ESTATE_PERCENT {
            return Err(InheritanceError::InvalidShare {
                testator,
                share: share.get(),
                committed,
            });
        }

        let record = HeirRecord { share, ..current };
        self.table.update(record)?;

        debug!(%testator, %heir, old = %current.share, new = %share, "share updated");
        Ok(record)
    }

    /// Registered heirs of a testator, in insertion order.
    pub fn heirs_of(&self, testator: AccountId) -> Result<Vec<HeirRecord>, InheritanceError> {
        Ok(self.table.by_testator(testator)?)
    }

    /// True iff `candidate` appears among the testator's heirs.
    pub fn is_heir(
        &self,
        testator: AccountId,
        candidate: AccountId,
    ) -> Result<bool, InheritanceError> {
        Ok(self
            .table
            .by_testator(testator)?
            .iter()
            .any(|r| r.heir == candidate))
    }

    /// True iff the testator has at least one heir record.
    pub fn has_heirs(&self, testator: AccountId) -> Result<bool, InheritanceError> {
        Ok(!self.table.by_testator(testator)?.is_empty())
    }

    fn checked_share(
        testator: AccountId,
        share: u8,
        committed: u32,
    ) -> Result<SharePercent, InheritanceError> {
        SharePercent::new(share).ok_or(InheritanceError::InvalidShare {
            testator,
            share,
            committed,
        })
    }
}

// =============================================================================
// TESTS
// =============================================================================
