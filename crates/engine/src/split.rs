//! Split resolution: one expense in, one owed amount per shared participant
//! out.

use crate::{Expense, ResultEngine, SplitMethod};

/// Computes each shared participant's owed amount for a single expense.
///
/// The returned list is positionally aligned with `expense.shared_with`.
/// Pure: no state, no side effects; the same record always resolves to the
/// same shares.
///
/// Percent and exact-amount splits are taken as declared even when they do
/// not add up to the expense amount. A weighted split whose weights sum to
/// zero resolves to all-zero shares instead of dividing by zero.
pub fn resolve_splits(expense: &Expense) -> ResultEngine<Vec<f64>> {
    expense.validate()?;

    let amount = expense.amount;
    let splits = match &expense.split {
        SplitMethod::Equal => {
            let share = amount / expense.shared_with.len() as f64;
            vec![share; expense.shared_with.len()]
        }
        SplitMethod::Percent(percents) => {
            percents.iter().map(|p| amount * p / 100.0).collect()
        }
        SplitMethod::Shares(weights) => {
            let total: f64 = weights.iter().sum();
            if total == 0.0 {
                vec![0.0; weights.len()]
            } else {
                weights.iter().map(|w| amount * w / total).collect()
            }
        }
        SplitMethod::Amount(amounts) => amounts.clone(),
    };

    Ok(splits)
}
