//! # Value Objects
//!
//! Immutable domain primitives for the inheritance lifecycle.
//! These types represent concepts that are defined by their value, not identity.

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export U256 from primitive-types for estate balances and payouts
pub use primitive_types::U256;

// =============================================================================
// ACCOUNT ID
// =============================================================================

/// An opaque ledger account identifier.
///
/// Identity and authorization are handled by the host ledger; by the time a
/// value of this type reaches this subsystem it has already been verified.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct AccountId(pub u64);

impl AccountId {
    /// The zero account (used by no real account).
    pub const ZERO: Self = Self(0);

    /// Creates an account id from its raw ledger value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw ledger value.
    #[must_use]
    pub const fn raw(&self) -> u64 {
        self.0
    }

    /// Returns true if this is the zero account.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{:#x}", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "acct:{:#x}", self.0)
    }
}

impl From<u64> for AccountId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<AccountId> for u64 {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

// =============================================================================
// SHARE PERCENT
// =============================================================================

/// An heir's share of the estate, as an integer percentage in `[0, 100]`.
///
/// Construction is checked; a value outside the range cannot exist.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SharePercent(u8);

impl SharePercent {
    /// A zero share.
    pub const ZERO: Self = Self(0);

    /// The whole estate.
    pub const FULL: Self = Self(100);

    /// Creates a share percentage. Returns None if above 100.
    #[must_use]
    pub const fn new(percent: u8) -> Option<Self> {
        if percent <= 100 {
            Some(Self(percent))
        } else {
            None
        }
    }

    /// Returns the percentage value.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Returns true if this share pays out nothing.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for SharePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl fmt::Display for SharePercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// LIFECYCLE STATUS
// =============================================================================

/// Lifecycle status of a testator.
///
/// ```text
///            claim_dead          confirm_dead           (distribution)
/// ALIVE ───────────────→ CLAIMED_DEAD ───────→ CONFIRMED_DEAD ───────→ CLOSED
///   ↑                         │                      │
///   └─────────────────────────┴──────────────────────┘
///                        claim_alive
/// ```
///
/// CLOSED is terminal: funds have moved and no operation can leave it.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    /// The testator is considered alive (the initial state).
    Alive,
    /// An heir has filed a death claim awaiting confirmation.
    ClaimedDead,
    /// An authority has confirmed the death; distribution is due.
    ConfirmedDead,
    /// The estate has been distributed and the record retired.
    Closed,
}

impl LifecycleStatus {
    /// Returns true if no further transition can leave this status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Closed)
    }

    /// Returns true if the testator can still contest a death claim.
    #[must_use]
    pub const fn is_revivable(&self) -> bool {
        matches!(self, Self::ClaimedDead | Self::ConfirmedDead)
    }
}

impl Default for LifecycleStatus {
    fn default() -> Self {
        Self::Alive
    }
}

impl fmt::Display for LifecycleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Alive => "alive",
            Self::ClaimedDead => "claimed-dead",
            Self::ConfirmedDead => "confirmed-dead",
            Self::Closed => "closed",
        };
        write!(f, "{s}")
    }
}

// =============================================================================
// TESTS
// =============================================================================
