//! # Death-Claim Service
//!
//! The orchestrating state machine: validates actor identity, drives
//! lifecycle transitions through the registries, and triggers reputation
//! updates and inheritance release.
//!
//! Every operation runs as one atomic step: the three registries sit
//! behind a single lock whose write guard is held for the operation's
//! full span, mirroring the host ledger's serialization of state-mutating
//! calls. The service itself holds no record state.

use crate::adapters::{InMemoryAuthorityTable, InMemoryBank, InMemoryHeirTable, InMemoryTestatorTable};
use crate::distributor::InheritanceDistributor;
use crate::domain::entities::{AuthorityRecord, DistributionReport, HeirRecord};
use crate::domain::invariants::check_all_invariants;
use crate::domain::value_objects::{AccountId, LifecycleStatus, U256};
use crate::errors::InheritanceError;
use crate::events::{
    ClaimAliveRequestPayload, ClaimAliveResponsePayload, ClaimDeadRequestPayload,
    ClaimDeadResponsePayload, ConfirmDeadRequestPayload, ConfirmDeadResponsePayload,
    DepositPledgeRequestPayload, DepositPledgeResponsePayload, RegisterHeirRequestPayload,
    RegisterHeirResponsePayload, UpdateShareRequestPayload, UpdateShareResponsePayload,
};
use crate::ports::inbound::InheritanceApi;
use crate::ports::outbound::{AuthorityTable, HeirTable, TestatorTable, TransferCapability};
use crate::registry::{AuthorityRegistry, HeirRegistry, TestatorRegistry};

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{error, info, instrument, warn};
use uuid::Uuid;

use crate::domain::value_objects::LifecycleStatus::{Alive, ClaimedDead, Closed, ConfirmedDead};

// =============================================================================
// CONFIGURATION & STATISTICS
// =============================================================================

/// Death-Claim Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Audit registry invariants after every mutating operation and log
    /// any violation. Violations indicate a bug, never a caller mistake.
    pub audit_invariants: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            audit_invariants: true,
        }
    }
}

/// Statistics for the Death-Claim Service.
#[derive(Debug, Default, Clone)]
pub struct ServiceStats {
    /// Total operations processed.
    pub operations: u64,
    /// Operations that were accepted.
    pub accepted: u64,
    /// Operations rejected by a guard.
    pub rejected: u64,
    /// Heirs registered.
    pub heirs_registered: u64,
    /// Death claims filed.
    pub claims_filed: u64,
    /// Deaths confirmed with distribution completed.
    pub confirmations: u64,
    /// Revivals (contested claims).
    pub revivals: u64,
    /// Total funds released to heirs.
    pub total_released: U256,
}

// =============================================================================
// REGISTRY SET
// =============================================================================

/// The three registries, locked together so every operation observes and
/// mutates them atomically.
struct Registries<H: HeirTable, A: AuthorityTable, T: TestatorTable> {
    heirs: HeirRegistry<H>,
    authorities: AuthorityRegistry<A>,
    testators: TestatorRegistry<T>,
}

// =============================================================================
// DEATH-CLAIM SERVICE
// =============================================================================

/// The Death-Claim State Machine.
///
/// ```text
///            claim_dead          confirm_dead           (distribution)
/// ALIVE ───────────────→ CLAIMED_DEAD ───────→ CONFIRMED_DEAD ───────→ CLOSED
///   ↑                         │                      │
///   └─────────────────────────┴──────────────────────┘
///                        claim_alive
/// ```
pub struct DeathClaimService<H, A, T, X>
where
    H: HeirTable,
    A: AuthorityTable,
    T: TestatorTable,
    X: TransferCapability,
{
    /// Service configuration.
    config: ServiceConfig,
    /// The registries, serialized behind one lock.
    registries: Arc<RwLock<Registries<H, A, T>>>,
    /// Estate release engine.
    distributor: InheritanceDistributor<X>,
    /// Service statistics.
    stats: Arc<RwLock<ServiceStats>>,
}

impl<H, A, T, X> DeathClaimService<H, A, T, X>
where
    H: HeirTable,
    A: AuthorityTable,
    T: TestatorTable,
    X: TransferCapability,
{
    /// Create a new service over the given tables and transfer capability.
    pub fn new(
        heir_table: H,
        authority_table: A,
        testator_table: T,
        transfer: Arc<X>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            config,
            registries: Arc::new(RwLock::new(Registries {
                heirs: HeirRegistry::new(heir_table),
                authorities: AuthorityRegistry::new(authority_table),
                testators: TestatorRegistry::new(testator_table),
            })),
            distributor: InheritanceDistributor::new(transfer),
            stats: Arc::new(RwLock::new(ServiceStats::default())),
        }
    }

    /// Get current service statistics.
    pub async fn stats(&self) -> ServiceStats {
        self.stats.read().await.clone()
    }

    // -------------------------------------------------------------------------
    // Operations
    // -------------------------------------------------------------------------

    /// Register `heir` with `share` percent of `caller`'s estate.
    pub async fn register_heir(
        &self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError> {
        let result = self.register_heir_inner(caller, testator, heir, share).await;

        let mut stats = self.stats.write().await;
        stats.operations += 1;
        match &result {
            Ok(_) => {
                stats.accepted += 1;
                stats.heirs_registered += 1;
            }
            Err(_) => stats.rejected += 1,
        }
        result
    }

    async fn register_heir_inner(
        &self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError> {
        let mut reg = self.registries.write().await;

        // The record set is retired once the estate has moved.
        if reg.testators.status_of(testator)? == Closed {
            return Err(InheritanceError::InvalidTransition {
                testator,
                from: Closed,
                requested: Closed,
            });
        }

        let record = reg.heirs.register(caller, testator, heir, share)?;
        reg.testators.ensure_exists(testator)?;
        self.audit(&reg, testator);
        Ok(record)
    }

    /// Rewrite the share of an already-registered heir. Only while the
    /// testator is alive, so a pending claim is adjudicated against frozen
    /// shares.
    pub async fn update_share(
        &self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError> {
        let result = self.update_share_inner(caller, testator, heir, share).await;
        self.track(result.is_ok()).await;
        result
    }

    async fn update_share_inner(
        &self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError> {
        let mut reg = self.registries.write().await;

        let status = reg.testators.status_of(testator)?;
        if status != Alive {
            return Err(InheritanceError::InvalidTransition {
                testator,
                from: status,
                requested: Alive,
            });
        }

        let record = reg.heirs.update_share(caller, testator, heir, share)?;
        self.audit(&reg, testator);
        Ok(record)
    }

    /// File a death claim. Only a registered heir may file one; the guarded
    /// transition makes the first concurrent claim win and rejects the rest.
    pub async fn claim_dead(
        &self,
        caller: AccountId,
        testator: AccountId,
    ) -> Result<LifecycleStatus, InheritanceError> {
        let result = self.claim_dead_inner(caller, testator).await;

        let mut stats = self.stats.write().await;
        stats.operations += 1;
        match &result {
            Ok(_) => {
                stats.accepted += 1;
                stats.claims_filed += 1;
                info!(%caller, %testator, "death claim filed");
            }
            Err(_) => stats.rejected += 1,
        }
        result
    }

    async fn claim_dead_inner(
        &self,
        caller: AccountId,
        testator: AccountId,
    ) -> Result<LifecycleStatus, InheritanceError> {
        let mut reg = self.registries.write().await;

        if !reg.heirs.has_heirs(testator)? {
            return Err(InheritanceError::NotRegistered(testator));
        }
        if !reg.heirs.is_heir(testator, caller)? {
            return Err(InheritanceError::PermissionDenied {
                caller,
                subject: testator,
            });
        }

        reg.testators
            .transition(testator, &[Alive], ClaimedDead, None)?;
        self.audit(&reg, testator);
        Ok(ClaimedDead)
    }

    /// Confirm a pending death claim and release the estate.
    ///
    /// A failed distribution leaves the testator CONFIRMED_DEAD with the
    /// authority attached; only that authority may call again to re-run
    /// the release. Any other caller in that window gets
    /// `InvalidTransition`.
    pub async fn confirm_dead(
        &self,
        caller: AccountId,
        testator: AccountId,
    ) -> Result<DistributionReport, InheritanceError> {
        let result = self.confirm_dead_inner(caller, testator).await;

        let mut stats = self.stats.write().await;
        stats.operations += 1;
        match &result {
            Ok(report) => {
                stats.accepted += 1;
                stats.confirmations += 1;
                stats.total_released = stats.total_released + report.total_released();
            }
            Err(_) => stats.rejected += 1,
        }
        result
    }

    async fn confirm_dead_inner(
        &self,
        caller: AccountId,
        testator: AccountId,
    ) -> Result<DistributionReport, InheritanceError> {
        let mut reg = self.registries.write().await;

        match reg.testators.status_of(testator)? {
            ClaimedDead => {
                reg.testators
                    .transition(testator, &[ClaimedDead], ConfirmedDead, Some(caller))?;
            }
            ConfirmedDead => {
                // Re-running a failed distribution is reserved for the
                // authority already bonded to the claim.
                if reg.testators.attached_authority(testator)? != Some(caller) {
                    return Err(InheritanceError::InvalidTransition {
                        testator,
                        from: ConfirmedDead,
                        requested: ConfirmedDead,
                    });
                }
            }
            other => {
                return Err(InheritanceError::InvalidTransition {
                    testator,
                    from: other,
                    requested: ConfirmedDead,
                });
            }
        }

        let heirs = reg.heirs.heirs_of(testator)?;
        let report = self.distributor.distribute(testator, &heirs).await?;

        reg.testators
            .transition(testator, &[ConfirmedDead], Closed, None)?;
        reg.authorities.reward(caller)?;
        self.audit(&reg, testator);

        info!(authority = %caller, %testator, released = %report.total_released(),
            "death confirmed, estate released");
        Ok(report)
    }

    /// Contest a death claim: the caller asserts it is alive.
    ///
    /// Reverses a pending or confirmed claim and penalizes the attached
    /// authority, if one was bonded. After CLOSED the funds have moved and
    /// revival is rejected.
    pub async fn claim_alive(
        &self,
        caller: AccountId,
    ) -> Result<LifecycleStatus, InheritanceError> {
        let result = self.claim_alive_inner(caller).await;

        let mut stats = self.stats.write().await;
        stats.operations += 1;
        match &result {
            Ok(_) => {
                stats.accepted += 1;
                stats.revivals += 1;
            }
            Err(_) => stats.rejected += 1,
        }
        result
    }

    async fn claim_alive_inner(
        &self,
        caller: AccountId,
    ) -> Result<LifecycleStatus, InheritanceError> {
        let mut reg = self.registries.write().await;

        match reg.testators.status_of(caller)? {
            Alive => Err(InheritanceError::AlreadyAlive(caller)),
            Closed => Err(InheritanceError::ReversalTooLate(caller)),
            ClaimedDead | ConfirmedDead => {
                let prior = reg.testators.transition(
                    caller,
                    &[ClaimedDead, ConfirmedDead],
                    Alive,
                    None,
                )?;
                if let Some(authority) = prior.authority {
                    reg.authorities.penalize(authority)?;
                    warn!(testator = %caller, %authority,
                        "false death confirmation contested");
                }
                self.audit(&reg, caller);
                Ok(Alive)
            }
        }
    }

    /// Bond `amount` onto the caller's own authority record.
    pub async fn deposit_pledge(
        &self,
        caller: AccountId,
        amount: U256,
    ) -> Result<AuthorityRecord, InheritanceError> {
        let result = {
            let mut reg = self.registries.write().await;
            reg.authorities.deposit_pledge(caller, amount)
        };
        self.track(result.is_ok()).await;
        result
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Current lifecycle status of a testator (ALIVE if unknown).
    pub async fn status_of(
        &self,
        testator: AccountId,
    ) -> Result<LifecycleStatus, InheritanceError> {
        self.registries.read().await.testators.status_of(testator)
    }

    /// Registered heirs of a testator, in insertion order.
    pub async fn heirs_of(
        &self,
        testator: AccountId,
    ) -> Result<Vec<HeirRecord>, InheritanceError> {
        self.registries.read().await.heirs.heirs_of(testator)
    }

    /// Current reputation of an authority (zero if unknown).
    pub async fn reputation_of(&self, authority: AccountId) -> Result<u64, InheritanceError> {
        self.registries
            .read()
            .await
            .authorities
            .reputation_of(authority)
    }

    // -------------------------------------------------------------------------
    // Wire handlers
    // -------------------------------------------------------------------------

    /// Handle a register-heir action from the dispatch shim.
    #[instrument(skip(self, payload), fields(caller = %caller, correlation_id = %correlation_id))]
    pub async fn handle_register_heir(
        &self,
        caller: AccountId,
        correlation_id: Uuid,
        payload: RegisterHeirRequestPayload,
    ) -> RegisterHeirResponsePayload {
        match self
            .register_heir(caller, payload.testator, payload.heir, payload.share)
            .await
        {
            Ok(record) => RegisterHeirResponsePayload {
                accepted: true,
                seq: Some(record.seq),
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "heir registration rejected");
                RegisterHeirResponsePayload {
                    accepted: false,
                    seq: None,
                    error: Some(err.kind()),
                }
            }
        }
    }

    /// Handle an update-share action from the dispatch shim.
    #[instrument(skip(self, payload), fields(caller = %caller, correlation_id = %correlation_id))]
    pub async fn handle_update_share(
        &self,
        caller: AccountId,
        correlation_id: Uuid,
        payload: UpdateShareRequestPayload,
    ) -> UpdateShareResponsePayload {
        match self
            .update_share(caller, payload.testator, payload.heir, payload.share)
            .await
        {
            Ok(_) => UpdateShareResponsePayload {
                accepted: true,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "share update rejected");
                UpdateShareResponsePayload {
                    accepted: false,
                    error: Some(err.kind()),
                }
            }
        }
    }

    /// Handle a claim-dead action from the dispatch shim.
    #[instrument(skip(self, payload), fields(caller = %caller, correlation_id = %correlation_id))]
    pub async fn handle_claim_dead(
        &self,
        caller: AccountId,
        correlation_id: Uuid,
        payload: ClaimDeadRequestPayload,
    ) -> ClaimDeadResponsePayload {
        match self.claim_dead(caller, payload.testator).await {
            Ok(status) => ClaimDeadResponsePayload {
                accepted: true,
                status,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "death claim rejected");
                let status = self
                    .status_of(payload.testator)
                    .await
                    .unwrap_or(Alive);
                ClaimDeadResponsePayload {
                    accepted: false,
                    status,
                    error: Some(err.kind()),
                }
            }
        }
    }

    /// Handle a confirm-dead action from the dispatch shim.
    #[instrument(skip(self, payload), fields(caller = %caller, correlation_id = %correlation_id))]
    pub async fn handle_confirm_dead(
        &self,
        caller: AccountId,
        correlation_id: Uuid,
        payload: ConfirmDeadRequestPayload,
    ) -> ConfirmDeadResponsePayload {
        match self.confirm_dead(caller, payload.testator).await {
            Ok(report) => ConfirmDeadResponsePayload {
                accepted: true,
                payouts: report.payouts,
                residual: Some(report.residual),
                error: None,
            },
            Err(err) => {
                error!(error = %err, "death confirmation failed");
                ConfirmDeadResponsePayload {
                    accepted: false,
                    payouts: Vec::new(),
                    residual: None,
                    error: Some(err.kind()),
                }
            }
        }
    }

    /// Handle a claim-alive action from the dispatch shim.
    #[instrument(skip(self, payload), fields(caller = %caller, correlation_id = %correlation_id))]
    pub async fn handle_claim_alive(
        &self,
        caller: AccountId,
        correlation_id: Uuid,
        payload: ClaimAliveRequestPayload,
    ) -> ClaimAliveResponsePayload {
        let _ = payload;
        match self.claim_alive(caller).await {
            Ok(status) => ClaimAliveResponsePayload {
                accepted: true,
                status,
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "alive claim rejected");
                let status = self.status_of(caller).await.unwrap_or(Alive);
                ClaimAliveResponsePayload {
                    accepted: false,
                    status,
                    error: Some(err.kind()),
                }
            }
        }
    }

    /// Handle a deposit-pledge action from the dispatch shim.
    #[instrument(skip(self, payload), fields(caller = %caller, correlation_id = %correlation_id))]
    pub async fn handle_deposit_pledge(
        &self,
        caller: AccountId,
        correlation_id: Uuid,
        payload: DepositPledgeRequestPayload,
    ) -> DepositPledgeResponsePayload {
        match self.deposit_pledge(caller, payload.amount).await {
            Ok(record) => DepositPledgeResponsePayload {
                accepted: true,
                pledge: Some(record.pledge),
                error: None,
            },
            Err(err) => {
                warn!(error = %err, "pledge deposit rejected");
                DepositPledgeResponsePayload {
                    accepted: false,
                    pledge: None,
                    error: Some(err.kind()),
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// Audit one testator's slice of the registries after a mutation.
    fn audit(&self, reg: &Registries<H, A, T>, testator: AccountId) {
        if !self.config.audit_invariants {
            return;
        }
        let record = reg.testators.record_of(testator).ok().flatten();
        let heirs = reg.heirs.heirs_of(testator).unwrap_or_default();
        let check = check_all_invariants(record.as_ref(), &heirs);
        if !check.is_valid() {
            error!(%testator, ?check, "registry invariant violated");
        }
    }

    async fn track(&self, accepted: bool) {
        let mut stats = self.stats.write().await;
        stats.operations += 1;
        if accepted {
            stats.accepted += 1;
        } else {
            stats.rejected += 1;
        }
    }
}

// =============================================================================
// INBOUND API IMPLEMENTATION
// =============================================================================

#[async_trait]
impl<H, A, T, X> InheritanceApi for DeathClaimService<H, A, T, X>
where
    H: HeirTable,
    A: AuthorityTable,
    T: TestatorTable,
    X: TransferCapability,
{
    async fn register_heir(
        &self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError> {
        Self::register_heir(self, caller, testator, heir, share).await
    }

    async fn update_share(
        &self,
        caller: AccountId,
        testator: AccountId,
        heir: AccountId,
        share: u8,
    ) -> Result<HeirRecord, InheritanceError> {
        Self::update_share(self, caller, testator, heir, share).await
    }

    async fn claim_dead(
        &self,
        caller: AccountId,
        testator: AccountId,
    ) -> Result<LifecycleStatus, InheritanceError> {
        Self::claim_dead(self, caller, testator).await
    }

    async fn confirm_dead(
        &self,
        caller: AccountId,
        testator: AccountId,
    ) -> Result<DistributionReport, InheritanceError> {
        Self::confirm_dead(self, caller, testator).await
    }

    async fn claim_alive(&self, caller: AccountId) -> Result<LifecycleStatus, InheritanceError> {
        Self::claim_alive(self, caller).await
    }

    async fn deposit_pledge(
        &self,
        caller: AccountId,
        amount: U256,
    ) -> Result<AuthorityRecord, InheritanceError> {
        Self::deposit_pledge(self, caller, amount).await
    }

    async fn status_of(&self, testator: AccountId) -> Result<LifecycleStatus, InheritanceError> {
        Self::status_of(self, testator).await
    }

    async fn heirs_of(&self, testator: AccountId) -> Result<Vec<HeirRecord>, InheritanceError> {
        Self::heirs_of(self, testator).await
    }

    async fn reputation_of(&self, authority: AccountId) -> Result<u64, InheritanceError> {
        Self::reputation_of(self, authority).await
    }
}

// =============================================================================
// TEST SERVICE FACTORY
// =============================================================================

/// Create a service over in-memory adapters, returning the bank handle so
/// tests can fund estates and inspect transfers.
#[must_use]
pub fn create_test_service() -> (
    DeathClaimService<InMemoryHeirTable, InMemoryAuthorityTable, InMemoryTestatorTable, InMemoryBank>,
    Arc<InMemoryBank>,
) {
    let bank = Arc::new(InMemoryBank::new());
    let service = DeathClaimService::new(
        InMemoryHeirTable::new(),
        InMemoryAuthorityTable::new(),
        InMemoryTestatorTable::new(),
        Arc::clone(&bank),
        ServiceConfig::default(),
    );
    (service, bank)
}

// =============================================================================
// TESTS
// =============================================================================
