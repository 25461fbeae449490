//! # Domain Services
//!
//! Pure payout arithmetic for estate distribution.
//! These functions are deterministic and have no side effects.

use crate::domain::entities::{HeirRecord, Payout};
use crate::domain::value_objects::U256;

// =============================================================================
// SHARE ACCOUNTING
// =============================================================================

/// Sums the shares of a set of heir records.
///
/// Accumulates in `u32` so that even a pathological record set cannot
/// overflow; a well-formed registry keeps this at or below 100.
#[must_use]
pub fn share_total(heirs: &[HeirRecord]) -> u32 {
    heirs.iter().map(|h| u32::from(h.share.get())).sum()
}

// =============================================================================
// PAYOUT COMPUTATION
// =============================================================================

/// Computes per-heir payouts from an estate balance.
///
/// Each payout is `balance * share / 100` with integer division. The
/// returned residual is whatever the divisions left behind plus the
/// unassigned part of the 100% budget; it stays with the estate.
/// Zero-valued payouts are omitted.
#[must_use]
pub fn compute_payouts(balance: U256, heirs: &[HeirRecord]) -> (Vec<Payout>, U256) {
    let mut payouts = Vec::with_capacity(heirs.len());
    let mut released = U256::zero();

    for heir in heirs {
        let amount = balance * U256::from(heir.share.get()) / U256::from(100u64);
        if amount.is_zero() {
            continue;
        }
        released += amount;
        payouts.push(Payout {
            heir: heir.heir,
            share: heir.share,
            amount,
        });
    }

    (payouts, balance - released)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{AccountId, SharePercent};

    fn heir(seq: u64, id: u64, share: u8) -> HeirRecord {
        HeirRecord::new(
            seq,
            AccountId::new(1),
            AccountId::new(id),
            SharePercent::new(share).unwrap(),
        )
    }

    #[test]
    fn test_share_total() {
        assert_eq!(share_total(&[]), 0);
        assert_eq!(share_total(&[heir(0, 2, 60), heir(1, 3, 40)]), 100);
        assert_eq!(share_total(&[heir(0, 2, 30)]), 30);
    }

    #[test]
    fn test_compute_payouts_exact_split() {
        let (payouts, residual) =
            compute_payouts(U256::from(1000u64), &[heir(0, 2, 60), heir(1, 3, 40)]);
        assert_eq!(payouts.len(), 2);
        assert_eq!(payouts[0].amount, U256::from(600u64));
        assert_eq!(payouts[1].amount, U256::from(400u64));
        assert!(residual.is_zero());
    }

    #[test]
    fn test_compute_payouts_rounding_residual() {
        // 33% + 33% + 33% of 100 leaves 1 with the estate
        let heirs = [heir(0, 2, 33), heir(1, 3, 33), heir(2, 4, 33)];
        let (payouts, residual) = compute_payouts(U256::from(100u64), &heirs);
        assert_eq!(payouts.len(), 3);
        assert!(payouts.iter().all(|p| p.amount == U256::from(33u64)));
        assert_eq!(residual, U256::from(1u64));
    }

    #[test]
    fn test_compute_payouts_partial_budget() {
        // Only 50% assigned: the other half stays with the estate
        let (payouts, residual) = compute_payouts(U256::from(200u64), &[heir(0, 2, 50)]);
        assert_eq!(payouts.len(), 1);
        assert_eq!(payouts[0].amount, U256::from(100u64));
        assert_eq!(residual, U256::from(100u64));
    }

    #[test]
    fn test_compute_payouts_skips_zero_amounts() {
        // Tiny estate: 10 * 5 / 100 == 0, no transfer issued
        let (payouts, residual) = compute_payouts(U256::from(10u64), &[heir(0, 2, 5)]);
        assert!(payouts.is_empty());
        assert_eq!(residual, U256::from(10u64));

        // Zero share never pays out regardless of balance
        let (payouts, _) = compute_payouts(U256::from(1_000_000u64), &[heir(0, 2, 0)]);
        assert!(payouts.is_empty());
    }

    #[test]
    fn test_compute_payouts_empty_estate() {
        let (payouts, residual) = compute_payouts(U256::zero(), &[heir(0, 2, 100)]);
        assert!(payouts.is_empty());
        assert!(residual.is_zero());
    }
}
