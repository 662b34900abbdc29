//! Balance aggregation: folds the whole ledger into one net balance per
//! participant.
//!
//! Balances are derived state. They are recomputed from the expense ledger on
//! every query and never persisted, so they cannot drift from the source
//! records.

use std::collections::BTreeMap;

use crate::{Expense, Participant, ResultEngine, split::resolve_splits};

/// Net balances plus the per-participant totals used for display.
///
/// `balances` is keyed by participant email. Positive means the participant
/// is owed money, negative means they owe. Keys referenced only from
/// expenses (dangling emails) are added lazily with an initial 0 and never
/// dropped.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BalanceSheet {
    pub balances: BTreeMap<String, f64>,
    /// Total paid per participant across the ledger.
    pub contributions: BTreeMap<String, f64>,
    /// Total share owed per participant across the ledger.
    pub owed_share: BTreeMap<String, f64>,
    pub total_spent: f64,
}

/// Folds the ledger, in order, into a [`BalanceSheet`].
///
/// For each expense the payer is credited with every share owed by someone
/// else; a participant's own share of an expense they paid cancels out and
/// leaves their net balance untouched.
///
/// Fails if any expense in the ledger is malformed (see
/// [`Expense::validate`]).
pub fn compute_balances(
    participants: &[Participant],
    expenses: &[Expense],
) -> ResultEngine<BalanceSheet> {
    let mut sheet = BalanceSheet::default();

    for participant in participants {
        sheet.balances.insert(participant.email.clone(), 0.0);
        sheet.contributions.insert(participant.email.clone(), 0.0);
        sheet.owed_share.insert(participant.email.clone(), 0.0);
    }

    for expense in expenses {
        let splits = resolve_splits(expense)?;

        sheet.total_spent += expense.amount;
        *sheet.contributions.entry(expense.paid_by.clone()).or_insert(0.0) += expense.amount;
        sheet.balances.entry(expense.paid_by.clone()).or_insert(0.0);
        sheet.owed_share.entry(expense.paid_by.clone()).or_insert(0.0);

        for (email, share) in expense.shared_with.iter().zip(&splits) {
            *sheet.owed_share.entry(email.clone()).or_insert(0.0) += share;
            sheet.contributions.entry(email.clone()).or_insert(0.0);

            // Self-share cancels: charged and credited on the same key.
            if email != &expense.paid_by {
                *sheet.balances.entry(email.clone()).or_insert(0.0) -= share;
                *sheet.balances.entry(expense.paid_by.clone()).or_insert(0.0) += share;
            }
        }
    }

    Ok(sheet)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::{SplitMethod, money::ZERO_SUM_TOLERANCE};

    fn participants(emails: &[&str]) -> Vec<Participant> {
        emails
            .iter()
            .map(|&email| Participant {
                name: email.split('@').next().unwrap_or(email).to_string(),
                email: email.to_string(),
                mobile: None,
            })
            .collect()
    }

    fn expense(amount: f64, paid_by: &str, split: SplitMethod, shared_with: &[&str]) -> Expense {
        Expense {
            description: "Hotel".to_string(),
            amount,
            paid_by: paid_by.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            shared_with: shared_with.iter().map(ToString::to_string).collect(),
            split,
        }
    }

    #[test]
    fn equal_split_balances() {
        let registry = participants(&["a@x", "b@x", "c@x"]);
        let ledger = vec![expense(90.0, "a@x", SplitMethod::Equal, &["a@x", "b@x", "c@x"])];

        let sheet = compute_balances(&registry, &ledger).unwrap();
        assert_eq!(sheet.balances["a@x"], 60.0);
        assert_eq!(sheet.balances["b@x"], -30.0);
        assert_eq!(sheet.balances["c@x"], -30.0);
        assert_eq!(sheet.contributions["a@x"], 90.0);
        assert_eq!(sheet.owed_share["a@x"], 30.0);
        assert_eq!(sheet.total_spent, 90.0);
    }

    #[test]
    fn balances_sum_to_zero() {
        let registry = participants(&["a@x", "b@x", "c@x", "d@x"]);
        let ledger = vec![
            expense(90.0, "a@x", SplitMethod::Equal, &["a@x", "b@x", "c@x"]),
            expense(60.0, "b@x", SplitMethod::Shares(vec![1.0, 2.0]), &["c@x", "d@x"]),
            expense(100.0, "c@x", SplitMethod::Percent(vec![25.0, 75.0]), &["a@x", "c@x"]),
        ];

        let sheet = compute_balances(&registry, &ledger).unwrap();
        let total: f64 = sheet.balances.values().sum();
        assert!(total.abs() < ZERO_SUM_TOLERANCE, "sum was {total}");
    }

    #[test]
    fn self_paid_share_cancels() {
        let registry = participants(&["a@x", "b@x"]);
        let ledger = vec![expense(100.0, "a@x", SplitMethod::Equal, &["a@x", "b@x"])];

        let sheet = compute_balances(&registry, &ledger).unwrap();
        // A is only owed what B was charged, not their own half.
        assert_eq!(sheet.balances["a@x"], 50.0);
        assert_eq!(sheet.balances["b@x"], -50.0);
        assert_eq!(sheet.owed_share["a@x"], 50.0);
    }

    #[test]
    fn unknown_participant_is_lazily_added() {
        let registry = participants(&["a@x"]);
        let ledger = vec![expense(40.0, "a@x", SplitMethod::Equal, &["a@x", "ghost@x"])];

        let sheet = compute_balances(&registry, &ledger).unwrap();
        assert_eq!(sheet.balances["ghost@x"], -20.0);
        assert_eq!(sheet.balances["a@x"], 20.0);
        assert_eq!(sheet.contributions["ghost@x"], 0.0);
    }

    #[test]
    fn unknown_payer_is_lazily_added() {
        let registry = participants(&["a@x"]);
        let ledger = vec![expense(30.0, "ghost@x", SplitMethod::Equal, &["a@x"])];

        let sheet = compute_balances(&registry, &ledger).unwrap();
        assert_eq!(sheet.balances["ghost@x"], 30.0);
        assert_eq!(sheet.balances["a@x"], -30.0);
        assert_eq!(sheet.contributions["ghost@x"], 30.0);
    }

    #[test]
    fn empty_ledger_keeps_registry_at_zero() {
        let registry = participants(&["a@x", "b@x"]);
        let sheet = compute_balances(&registry, &[]).unwrap();

        assert_eq!(sheet.balances.len(), 2);
        assert!(sheet.balances.values().all(|b| *b == 0.0));
        assert_eq!(sheet.total_spent, 0.0);
    }

    #[test]
    fn recomputation_is_idempotent() {
        let registry = participants(&["a@x", "b@x"]);
        let ledger = vec![
            expense(10.0, "a@x", SplitMethod::Equal, &["a@x", "b@x"]),
            expense(25.0, "b@x", SplitMethod::Amount(vec![5.0, 20.0]), &["a@x", "b@x"]),
        ];

        let first = compute_balances(&registry, &ledger).unwrap();
        let second = compute_balances(&registry, &ledger).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn malformed_expense_propagates() {
        let registry = participants(&["a@x"]);
        let ledger = vec![expense(0.0, "a@x", SplitMethod::Equal, &["a@x"])];

        assert!(compute_balances(&registry, &ledger).is_err());
    }
}
