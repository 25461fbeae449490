//! # Error Types
//!
//! All error types for the inheritance lifecycle. Every guard either
//! succeeds or reports exactly one of these kinds; the triggering call is
//! rejected as a whole and no partial state change is committed.

use crate::domain::value_objects::{AccountId, LifecycleStatus, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// INHERITANCE ERRORS
// =============================================================================

/// Errors that can occur while driving the inheritance lifecycle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InheritanceError {
    /// Caller lacks the required relationship to the subject account.
    #[error("permission denied: {caller} may not act on {subject}")]
    PermissionDenied {
        /// The rejected caller.
        caller: AccountId,
        /// The account the caller tried to act on.
        subject: AccountId,
    },

    /// Requested change is not legal from the current lifecycle state.
    /// Covers double-claims, races, replays and second-authority retries.
    #[error("invalid transition for {testator}: {from} -> {requested}")]
    InvalidTransition {
        /// The testator whose status blocked the change.
        testator: AccountId,
        /// Status the record was actually in.
        from: LifecycleStatus,
        /// Status the caller tried to reach.
        requested: LifecycleStatus,
    },

    /// Share out of range or would overflow the 100% budget.
    #[error("invalid share {share} for {testator}: committed total {committed}")]
    InvalidShare {
        /// The testator whose budget was checked.
        testator: AccountId,
        /// The offered share value.
        share: u8,
        /// Share total already committed to other heirs.
        committed: u32,
    },

    /// The `(testator, heir)` pair is already registered.
    #[error("heir {heir} already registered for {testator}")]
    AlreadyRegistered {
        /// The testator.
        testator: AccountId,
        /// The duplicate heir.
        heir: AccountId,
    },

    /// Operating on a testator with no heir records, or on a missing heir.
    #[error("{account} is not registered")]
    NotRegistered(AccountId),

    /// Revival requested while the testator is already alive.
    #[error("{0} is already alive")]
    AlreadyAlive(AccountId),

    /// Revival requested after the estate was distributed. CLOSED is final.
    #[error("too late to revive {0}: estate already distributed")]
    ReversalTooLate(AccountId),

    /// The transfer capability failed for at least one heir.
    #[error("distribution incomplete for {testator}: {source}")]
    DistributionIncomplete {
        /// The testator whose estate was being distributed.
        testator: AccountId,
        /// Heir whose transfer failed, if one was reached.
        failed_heir: Option<AccountId>,
        /// The underlying transfer fault.
        #[source]
        source: TransferError,
    },

    /// Table engine fault surfaced by an outbound port.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

impl InheritanceError {
    /// Wire discriminant for this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::InvalidShare { .. } => ErrorKind::InvalidShare,
            Self::AlreadyRegistered { .. } => ErrorKind::AlreadyRegistered,
            Self::NotRegistered(_) => ErrorKind::NotRegistered,
            Self::AlreadyAlive(_) => ErrorKind::AlreadyAlive,
            Self::ReversalTooLate(_) => ErrorKind::ReversalTooLate,
            Self::DistributionIncomplete { .. } => ErrorKind::DistributionIncomplete,
            Self::Ledger(_) => ErrorKind::Ledger,
        }
    }

    /// Returns true if the operation may be resubmitted unchanged with any
    /// hope of success (the rejection was about transient external state).
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::DistributionIncomplete { .. } | Self::Ledger(LedgerError::Unavailable)
        )
    }
}

// =============================================================================
// LEDGER ERRORS
// =============================================================================

/// Errors from the external table engine behind the outbound table ports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A row with the same primary key already exists.
    #[error("duplicate row for key {0}")]
    DuplicateRow(AccountId),

    /// A row expected to exist was not found.
    #[error("row not found for key {0}")]
    RowNotFound(AccountId),

    /// The table engine is unreachable.
    #[error("table engine unavailable")]
    Unavailable,

    /// Stored data failed to decode.
    #[error("table corruption detected")]
    Corrupted,
}

// =============================================================================
// TRANSFER ERRORS
// =============================================================================

/// Errors from the external transfer capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// The source account cannot cover the amount.
    #[error("insufficient funds: required {required}, available {available}")]
    InsufficientFunds {
        /// Amount the transfer needed.
        required: U256,
        /// Amount actually available.
        available: U256,
    },

    /// The receiving account cannot accept funds.
    #[error("recipient {0} rejected the transfer")]
    RecipientRejected(AccountId),

    /// The token engine is unreachable.
    #[error("transfer capability unavailable")]
    Unavailable,
}

// =============================================================================
// WIRE ERROR KIND
// =============================================================================

/// Machine-readable error discriminant carried in response payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// See [`InheritanceError::PermissionDenied`].
    PermissionDenied,
    /// See [`InheritanceError::InvalidTransition`].
    InvalidTransition,
    /// See [`InheritanceError::InvalidShare`].
    InvalidShare,
    /// See [`InheritanceError::AlreadyRegistered`].
    AlreadyRegistered,
    /// See [`InheritanceError::NotRegistered`].
    NotRegistered,
    /// See [`InheritanceError::AlreadyAlive`].
    AlreadyAlive,
    /// See [`InheritanceError::ReversalTooLate`].
    ReversalTooLate,
    /// See [`InheritanceError::DistributionIncomplete`].
    DistributionIncomplete,
    /// See [`InheritanceError::Ledger`].
    Ledger,
}

// =============================================================================
// TESTS
// =============================================================================
