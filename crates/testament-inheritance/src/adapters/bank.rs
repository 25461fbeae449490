//! # Bank Adapter
//!
//! In-memory transfer-capability implementation for testing.
//! A production adapter would invoke the host ledger's token engine.

use crate::domain::value_objects::{AccountId, U256};
use crate::errors::TransferError;
use crate::ports::outbound::TransferCapability;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

/// A single executed transfer, kept for test assertions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransferEntry {
    /// Source account.
    pub from: AccountId,
    /// Destination account.
    pub to: AccountId,
    /// Amount moved.
    pub amount: U256,
}

/// In-memory token bank for testing.
#[derive(Debug, Default)]
pub struct InMemoryBank {
    balances: RwLock<HashMap<AccountId, U256>>,
    log: RwLock<Vec<TransferEntry>>,
}

impl InMemoryBank {
    /// Create a new empty bank.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an account's balance.
    pub fn set_balance(&self, account: AccountId, balance: U256) {
        self.balances.write().unwrap().insert(account, balance);
    }

    /// Executed transfers, in order.
    #[must_use]
    pub fn transfers(&self) -> Vec<TransferEntry> {
        self.log.read().unwrap().clone()
    }
}

#[async_trait]
impl TransferCapability for InMemoryBank {
    async fn balance_of(&self, account: AccountId) -> Result<U256, TransferError> {
        Ok(self
            .balances
            .read()
            .unwrap()
            .get(&account)
            .copied()
            .unwrap_or_default())
    }

    async fn transfer(
        &self,
        from: AccountId,
        to: AccountId,
        amount: U256,
    ) -> Result<(), TransferError> {
        let mut balances = self.balances.write().unwrap();
        let available = balances.get(&from).copied().unwrap_or_default();
        if available < amount {
            return Err(TransferError::InsufficientFunds {
                required: amount,
                available,
            });
        }
        balances.insert(from, available - amount);
        let to_balance = balances.get(&to).copied().unwrap_or_default();
        balances.insert(to, to_balance + amount);
        drop(balances);

        self.log
            .write()
            .unwrap()
            .push(TransferEntry { from, to, amount });
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
