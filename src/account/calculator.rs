//! Pure per-account payment and interest arithmetic
//!
//! Stateless functions over a single account snapshot and an as-of date.
//! None of these touch other accounts or cash availability, and none of
//! them raise for well-formed input: non-negativity of balances and rates
//! is a caller invariant.

use chrono::NaiveDate;

use super::data::{DebtAccount, MinPaymentType};

/// Annual rate in percent effective on `as_of`
///
/// The promotional rate applies only while both promo fields are set and
/// `as_of` is on or before the promo end date.
pub fn effective_rate(account: &DebtAccount, as_of: NaiveDate) -> f64 {
    match (account.promo_rate, account.promo_end_date) {
        (Some(promo), Some(end)) if as_of <= end => promo,
        _ => account.interest_rate,
    }
}

/// Simple (non-compounding-within-month) interest accrued for one month
///
/// Computed on the balance before this month's payment. Closed accounts
/// accrue nothing.
pub fn monthly_interest(account: &DebtAccount, as_of: NaiveDate) -> f64 {
    if account.status.is_closed() {
        return 0.0;
    }
    account.balance * effective_rate(account, as_of) / 100.0 / 12.0
}

/// Minimum required payment for the month
///
/// Precedence: closed => 0, then the installment `fixed_payment` override,
/// then the fixed/percent policy. Callers cap the result at the account's
/// post-interest balance so a payment never exceeds what is owed.
pub fn minimum_payment(account: &DebtAccount) -> f64 {
    if account.status.is_closed() {
        return 0.0;
    }

    if let Some(fixed) = account.fixed_payment {
        return fixed;
    }

    match account.min_payment_type {
        MinPaymentType::FixedAmount => account.min_payment_value,
        MinPaymentType::PercentOfBalance => {
            (account.balance * account.min_payment_value / 100.0).max(0.0)
        }
    }
}

/// Closed-form amortization estimate of the months to pay off an account
/// at a constant monthly payment: n = -ln(1 - rP/A) / ln(1 + r)
///
/// Returns `None` when the payment covers only interest or less, so the
/// balance never reaches zero. Zero-balance accounts estimate to 0.
pub fn estimate_payoff_months(account: &DebtAccount, monthly_payment: f64) -> Option<u32> {
    if account.balance <= 0.0 {
        return Some(0);
    }
    if monthly_payment <= 0.0 {
        return None;
    }

    let r = account.interest_rate / 100.0 / 12.0;
    if r == 0.0 {
        return Some((account.balance / monthly_payment).ceil() as u32);
    }
    if monthly_payment <= account.balance * r {
        return None;
    }

    let n = -(1.0 - r * account.balance / monthly_payment).ln() / (1.0 + r).ln();
    Some(n.ceil() as u32)
}
