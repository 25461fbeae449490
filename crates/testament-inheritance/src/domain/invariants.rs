//! # Domain Invariants
//!
//! Critical invariants that MUST hold for every reachable registry state.
//! These are checked at runtime after mutating operations to surface
//! corruption before it can propagate.
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Share budget: per-testator share sum <= 100 | `registry/heirs.rs` - budget check in `register`/`update_share` |
//! | INVARIANT-2 | Heir uniqueness: one record per (testator, heir) | `registry/heirs.rs` - duplicate check in `register` |
//! | INVARIANT-3 | Attachment consistency: authority present iff a claim binds one | `registry/testators.rs` - `transition` writes both fields together |
//! | INVARIANT-4 | Closed is terminal: no transition leaves CLOSED | `registry/testators.rs` - `transition` from-set guard |

use crate::domain::entities::{HeirRecord, TestatorRecord};
use crate::domain::services::share_total;
use crate::domain::value_objects::{AccountId, LifecycleStatus};

// =============================================================================
// INVARIANT CHECKS
// =============================================================================

/// INVARIANT-1: Share Budget
///
/// The sum of heir shares for a testator never exceeds 100 percent.
#[must_use]
pub fn check_share_budget_invariant(heirs: &[HeirRecord]) -> bool {
    share_total(heirs) <= limits::FULL_ESTATE_PERCENT
}

/// INVARIANT-2: Heir Uniqueness
///
/// A `(testator, heir)` pair appears at most once.
#[must_use]
pub fn check_heir_uniqueness_invariant(heirs: &[HeirRecord]) -> bool {
    let mut seen: Vec<(AccountId, AccountId)> = Vec::with_capacity(heirs.len());
    for record in heirs {
        let pair = (record.testator, record.heir);
        if seen.contains(&pair) {
            return false;
        }
        seen.push(pair);
    }
    true
}

/// INVARIANT-3: Attachment Consistency
///
/// An authority is attached exactly while one is bonded to the claim:
/// never in ALIVE or CLOSED, always in CONFIRMED_DEAD. A CLAIMED_DEAD
/// record has no authority yet (confirmation is what binds one).
#[must_use]
pub fn check_attachment_invariant(record: &TestatorRecord) -> bool {
    match record.status {
        LifecycleStatus::Alive | LifecycleStatus::Closed => record.authority.is_none(),
        LifecycleStatus::ClaimedDead => record.authority.is_none(),
        LifecycleStatus::ConfirmedDead => record.authority.is_some(),
    }
}

/// Check all invariants over one testator's slice of the registries.
#[must_use]
pub fn check_all_invariants(
    testator: Option<&TestatorRecord>,
    heirs: &[HeirRecord],
) -> InvariantCheckResult {
    let mut violations = Vec::new();

    if !check_share_budget_invariant(heirs) {
        violations.push(InvariantViolation::ShareBudgetExceeded {
            total: share_total(heirs),
        });
    }

    if !check_heir_uniqueness_invariant(heirs) {
        violations.push(InvariantViolation::DuplicateHeir);
    }

    if let Some(record) = testator {
        if !check_attachment_invariant(record) {
            violations.push(InvariantViolation::InconsistentAttachment {
                status: record.status,
                attached: record.authority.is_some(),
            });
        }
    }

    if violations.is_empty() {
        InvariantCheckResult::Valid
    } else {
        InvariantCheckResult::Invalid(violations)
    }
}

// =============================================================================
// INVARIANT TYPES
// =============================================================================

/// Result of checking all invariants.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantCheckResult {
    /// All invariants hold.
    Valid,
    /// One or more invariants violated.
    Invalid(Vec<InvariantViolation>),
}

impl InvariantCheckResult {
    /// Returns true if all invariants hold.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// Specific invariant violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvariantViolation {
    /// Per-testator share sum above 100.
    ShareBudgetExceeded {
        /// The offending total.
        total: u32,
    },
    /// The same (testator, heir) pair registered twice.
    DuplicateHeir,
    /// Authority attachment disagrees with the lifecycle status.
    InconsistentAttachment {
        /// Status the record was found in.
        status: LifecycleStatus,
        /// Whether an authority was attached.
        attached: bool,
    },
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ShareBudgetExceeded { total } => {
                write!(f, "share budget exceeded: {total} > 100")
            }
            Self::DuplicateHeir => write!(f, "duplicate (testator, heir) pair"),
            Self::InconsistentAttachment { status, attached } => {
                write!(f, "authority attachment inconsistent: status {status}, attached {attached}")
            }
        }
    }
}

// =============================================================================
// LIMIT CONSTANTS
// =============================================================================

/// Accounting limits for the inheritance lifecycle.
pub mod limits {
    /// The whole estate, in percent. Per-testator shares sum to at most this.
    pub const FULL_ESTATE_PERCENT: u32 = 100;
}

// =============================================================================
// TESTS
// =============================================================================
