//! # Event Schema
//!
//! Wire payloads for every inheritance action and its response. Payloads
//! are wrapped by the host's authenticated envelope for transport.
//!
//! Envelope-only identity: NO caller field in any request payload. The
//! verified caller identity always comes from the envelope, so a payload
//! can never claim to be somebody else.

use crate::domain::entities::Payout;
use crate::domain::value_objects::{AccountId, LifecycleStatus, U256};
use crate::errors::ErrorKind;
use serde::{Deserialize, Serialize};

// =============================================================================
// TOPICS
// =============================================================================

/// Topic names for routing inheritance actions.
pub mod topics {
    /// Register an heir with a share.
    pub const REGISTER_HEIR: &str = "inheritance.register_heir";
    /// Rewrite a registered heir's share.
    pub const UPDATE_SHARE: &str = "inheritance.update_share";
    /// File a death claim.
    pub const CLAIM_DEAD: &str = "inheritance.claim_dead";
    /// Confirm a death claim and release the estate.
    pub const CONFIRM_DEAD: &str = "inheritance.confirm_dead";
    /// Contest a death claim.
    pub const CLAIM_ALIVE: &str = "inheritance.claim_alive";
    /// Bond stake onto an authority record.
    pub const DEPOSIT_PLEDGE: &str = "inheritance.deposit_pledge";
}

// =============================================================================
// REQUEST PAYLOADS
// =============================================================================

/// Request to register an heir. Caller (the testator) from the envelope.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RegisterHeirRequestPayload {
    /// Testator whose estate the heir joins.
    pub testator: AccountId,
    /// The heir to register.
    pub heir: AccountId,
    /// Share percentage in `[0, 100]`.
    pub share: u8,
}

/// Request to rewrite a registered heir's share.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct UpdateShareRequestPayload {
    /// Testator whose record set is updated.
    pub testator: AccountId,
    /// The heir whose share changes.
    pub heir: AccountId,
    /// New share percentage in `[0, 100]`.
    pub share: u8,
}

/// Request to file a death claim. Caller (an heir) from the envelope.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ClaimDeadRequestPayload {
    /// The testator claimed dead.
    pub testator: AccountId,
}

/// Request to confirm a death claim. Caller (the authority) from the
/// envelope.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ConfirmDeadRequestPayload {
    /// The testator whose claim is confirmed.
    pub testator: AccountId,
}

/// Request to contest a death claim. The caller IS the testator; the
/// payload carries nothing else.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct ClaimAliveRequestPayload {}

/// Request to bond stake onto the caller's authority record.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DepositPledgeRequestPayload {
    /// Amount to bond.
    pub amount: U256,
}

// =============================================================================
// RESPONSE PAYLOADS
// =============================================================================

/// Response to heir registration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct RegisterHeirResponsePayload {
    /// Whether the registration was accepted.
    pub accepted: bool,
    /// Assigned sequence key on success.
    pub seq: Option<u64>,
    /// Rejection kind on failure.
    pub error: Option<ErrorKind>,
}

/// Response to a share update.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct UpdateShareResponsePayload {
    /// Whether the update was accepted.
    pub accepted: bool,
    /// Rejection kind on failure.
    pub error: Option<ErrorKind>,
}

/// Response to a death claim.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ClaimDeadResponsePayload {
    /// Whether the claim was accepted.
    pub accepted: bool,
    /// Lifecycle status after the call.
    pub status: LifecycleStatus,
    /// Rejection kind on failure.
    pub error: Option<ErrorKind>,
}

/// Response to a death confirmation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConfirmDeadResponsePayload {
    /// Whether the confirmation (and distribution) completed.
    pub accepted: bool,
    /// Per-heir payouts released on success.
    pub payouts: Vec<Payout>,
    /// Rounding residual left with the estate on success.
    pub residual: Option<U256>,
    /// Rejection kind on failure.
    pub error: Option<ErrorKind>,
}

/// Response to an alive claim.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ClaimAliveResponsePayload {
    /// Whether the revival was accepted.
    pub accepted: bool,
    /// Lifecycle status after the call.
    pub status: LifecycleStatus,
    /// Rejection kind on failure.
    pub error: Option<ErrorKind>,
}

/// Response to a pledge deposit.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct DepositPledgeResponsePayload {
    /// Whether the deposit was accepted.
    pub accepted: bool,
    /// Total pledge after the deposit.
    pub pledge: Option<U256>,
    /// Rejection kind on failure.
    pub error: Option<ErrorKind>,
}

// =============================================================================
// TESTS
// =============================================================================
