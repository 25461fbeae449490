//! # Testament Inheritance - Dead-Man's-Switch Subsystem
//!
//! A dead-man's-switch inheritance mechanism for a replicated ledger:
//! a testator registers heirs with estate shares; when the testator is
//! believed dead, an heir files a claim, a trusted authority confirms it,
//! and the estate is released to the heirs in proportion to their shares.
//! A testator who is merely unresponsive can contest a false claim, at the
//! cost of the confirming authority's reputation and pledge.
//!
//! ## Lifecycle
//!
//! ```text
//!            claim_dead          confirm_dead           (distribution)
//! ALIVE ───────────────→ CLAIMED_DEAD ───────→ CONFIRMED_DEAD ───────→ CLOSED
//!   ↑                         │                      │
//!   └─────────────────────────┴──────────────────────┘
//!                        claim_alive
//! ```
//!
//! CLOSED is terminal: once funds have moved, nothing reopens the estate.
//!
//! ## Domain Invariants
//!
//! | ID | Invariant | Enforcement Location |
//! |----|-----------|---------------------|
//! | INVARIANT-1 | Per-testator share sum never exceeds 100% | `registry/heirs.rs` - budget check in `register`/`update_share` |
//! | INVARIANT-2 | One heir record per (testator, heir) pair | `registry/heirs.rs` - duplicate check in `register` |
//! | INVARIANT-3 | Authority attachment matches lifecycle status | `registry/testators.rs` - `transition` writes both together |
//! | INVARIANT-4 | CLOSED is terminal | `registry/testators.rs` - `transition` from-set guard |
//!
//! ## Trust Model
//!
//! - Only a registered heir may file a death claim.
//! - Exactly one authority bonds to a confirmation; its reputation grows
//!   by one per uncontested confirmation.
//! - A contested confirmation zeroes the authority's reputation and
//!   forfeits its pledge.
//!
//! ## External Collaborators
//!
//! | Dependency | Trait | Purpose |
//! |------------|-------|---------|
//! | Table engine | `HeirTable`, `AuthorityTable`, `TestatorTable` | Replicated keyed storage |
//! | Token engine | `TransferCapability` | Moves funds on release |
//! | Dispatch shim | (host-side) | Routes actions, verifies caller identity |
//!
//! ## Usage Example
//!
//! ```ignore
//! use testament_inheritance::prelude::*;
//!
//! let (service, bank) = create_test_service();
//! bank.set_balance(testator, U256::from(1_000u64));
//!
//! service.register_heir(testator, testator, heir_a, 60).await?;
//! service.register_heir(testator, testator, heir_b, 40).await?;
//!
//! service.claim_dead(heir_a, testator).await?;
//! let report = service.confirm_dead(authority, testator).await?;
//! assert_eq!(report.payouts.len(), 2);
//! ```

// Crate-level lints
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::similar_names)]

// =============================================================================
// MODULES
// =============================================================================

pub mod adapters;
pub mod distributor;
pub mod domain;
pub mod errors;
pub mod events;
pub mod ports;
pub mod registry;
pub mod service;

// =============================================================================
// PRELUDE
// =============================================================================

/// Convenient re-exports for common usage.
pub mod prelude {
    // Domain entities
    pub use crate::domain::entities::{
        AuthorityRecord, DistributionReport, HeirRecord, Payout, TestatorRecord,
    };

    // Value objects
    pub use crate::domain::value_objects::{AccountId, LifecycleStatus, SharePercent, U256};

    // Domain services
    pub use crate::domain::services::{compute_payouts, share_total};

    // Invariants
    pub use crate::domain::invariants::{
        check_all_invariants, limits, InvariantCheckResult, InvariantViolation,
    };

    // Ports
    pub use crate::ports::inbound::InheritanceApi;
    pub use crate::ports::outbound::{
        AuthorityTable, HeirTable, TestatorTable, TransferCapability,
    };

    // Registries
    pub use crate::registry::{AuthorityRegistry, HeirRegistry, TestatorRegistry};

    // Distributor
    pub use crate::distributor::InheritanceDistributor;

    // Events
    pub use crate::events::{
        topics, ClaimAliveRequestPayload, ClaimAliveResponsePayload, ClaimDeadRequestPayload,
        ClaimDeadResponsePayload, ConfirmDeadRequestPayload, ConfirmDeadResponsePayload,
        DepositPledgeRequestPayload, DepositPledgeResponsePayload, RegisterHeirRequestPayload,
        RegisterHeirResponsePayload, UpdateShareRequestPayload, UpdateShareResponsePayload,
    };

    // Errors
    pub use crate::errors::{ErrorKind, InheritanceError, LedgerError, TransferError};

    // Adapters
    pub use crate::adapters::{
        InMemoryAuthorityTable, InMemoryBank, InMemoryHeirTable, InMemoryTestatorTable,
        TransferEntry,
    };

    // Service
    pub use crate::service::{
        create_test_service, DeathClaimService, ServiceConfig, ServiceStats,
    };
}

// =============================================================================
// CRATE INFO
// =============================================================================

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "Inheritance";

// =============================================================================
// TESTS
// =============================================================================
