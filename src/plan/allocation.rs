//! Leftover-cash allocation for extra debt payments
//!
//! Regular income is deemed to fund minimum payments first; a regular-income
//! shortfall is backfilled from bonus cash before any bonus is available for
//! extra paydown. The two pools then pass through their own allocation
//! policies and the sum is capped at the literal cash left after minimums.

use serde::{Deserialize, Serialize};

/// How much of an available cash pool is committed to extra debt paydown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum AllocationPolicy {
    /// Commit the whole pool
    Full,
    /// Commit a percentage (0-100) of the pool
    Percent(f64),
    /// Commit a flat amount, capped at the pool
    Fixed(f64),
}

impl AllocationPolicy {
    /// Portion of a non-negative cash pool this policy commits
    pub fn apply(&self, pool: f64) -> f64 {
        match self {
            AllocationPolicy::Full => pool,
            AllocationPolicy::Percent(pct) => pool * pct / 100.0,
            AllocationPolicy::Fixed(amount) => amount.min(pool),
        }
    }
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        AllocationPolicy::Full
    }
}

/// Cash physically left over once this month's minimum payments are made
///
/// Negative net cash flow clamps to zero: the simulation does not model
/// dipping into savings or re-borrowing.
pub fn cash_after_minimums(
    regular_free_cash: f64,
    total_bonus: f64,
    total_min_payments: f64,
) -> f64 {
    ((regular_free_cash + total_bonus).max(0.0) - total_min_payments).max(0.0)
}

/// Cash committed to extra debt payments this month
///
/// `net_regular` is the regular-income surplus after minimums; only a
/// positive surplus passes through the regular policy. `bonus_available`
/// is the bonus pool less any regular-income shortfall; only a positive
/// pool passes through the extra-income policy. The combined figure never
/// exceeds the cash actually left after minimums.
pub fn allocatable_cash(
    regular_free_cash: f64,
    total_bonus: f64,
    total_min_payments: f64,
    regular_policy: &AllocationPolicy,
    extra_income_policy: &AllocationPolicy,
) -> f64 {
    let leftover = cash_after_minimums(regular_free_cash, total_bonus, total_min_payments);
    if leftover <= 0.0 {
        return 0.0;
    }

    let net_regular = regular_free_cash - total_min_payments;
    let allocatable_from_regular = if net_regular > 0.0 {
        regular_policy.apply(net_regular)
    } else {
        0.0
    };

    let bonus_available = total_bonus + net_regular.min(0.0);
    let allocatable_from_bonus = if bonus_available > 0.0 {
        extra_income_policy.apply(bonus_available)
    } else {
        0.0
    };

    (allocatable_from_regular + allocatable_from_bonus).min(leftover)
}
