//! Monetary helpers for the settlement arithmetic.
//!
//! Amounts are plain `f64` values in major units. The engine never requires
//! shares to sum exactly to the expense amount, so all comparisons go through
//! the tolerances below instead of exact equality.

/// Balances within this distance of zero count as settled.
pub const SETTLE_EPSILON: f64 = 0.01;

/// Tolerance for the zero-sum check over a whole balance table.
pub const ZERO_SUM_TOLERANCE: f64 = 1e-6;

/// Rounds an amount to whole cents.
///
/// # Examples
///
/// ```rust
/// use engine::round_to_cents;
///
/// assert_eq!(round_to_cents(10.004), 10.0);
/// assert_eq!(round_to_cents(10.006), 10.01);
/// assert_eq!(round_to_cents(-3.333), -3.33);
/// ```
#[must_use]
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Returns `true` if the balance is within [`SETTLE_EPSILON`] of zero.
#[must_use]
pub fn is_settled(balance: f64) -> bool {
    balance.abs() <= SETTLE_EPSILON
}
