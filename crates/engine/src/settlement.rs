//! Settlement planning: turns a net balance table into a short list of
//! directed transfers that zeroes it.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::money::{SETTLE_EPSILON, is_settled, round_to_cents};

/// One suggested payment from a debtor to a creditor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Settlement {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

/// Plans transfers with a greedy largest-creditor / largest-debtor match.
///
/// Participants within `±0.01` of zero are already settled and are skipped.
/// Each step settles `min(credit, -debt)` between the current largest
/// creditor and largest-magnitude debtor, so every step fully clears at
/// least one side. Recorded amounts are rounded to cents.
///
/// Ties between equal balances resolve in key order: the input map is
/// ordered by email and the sorts are stable, so output is deterministic
/// for a given balance table. Not guaranteed minimal in transfer count, but
/// never more than `participants - 1` transfers for a zero-sum table.
#[must_use]
pub fn plan_settlements(balances: &BTreeMap<String, f64>) -> Vec<Settlement> {
    let mut creditors: Vec<(&str, f64)> = Vec::new();
    let mut debtors: Vec<(&str, f64)> = Vec::new();

    for (email, balance) in balances {
        if is_settled(*balance) {
            continue;
        }
        if *balance > 0.0 {
            creditors.push((email, *balance));
        } else {
            debtors.push((email, *balance));
        }
    }

    creditors.sort_by(|a, b| b.1.total_cmp(&a.1));
    debtors.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut settlements = Vec::new();
    while let (Some(creditor), Some(debtor)) = (creditors.first_mut(), debtors.first_mut()) {
        let settled = creditor.1.min(-debtor.1);

        settlements.push(Settlement {
            from: debtor.0.to_string(),
            to: creditor.0.to_string(),
            amount: round_to_cents(settled),
        });

        creditor.1 -= settled;
        debtor.1 += settled;

        if creditors[0].1 < SETTLE_EPSILON {
            creditors.remove(0);
        }
        if debtors[0].1 > -SETTLE_EPSILON {
            debtors.remove(0);
        }
    }

    settlements
}

#[cfg(test)]
mod tests {
    use super::*;

    fn balances(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|(email, balance)| (email.to_string(), *balance))
            .collect()
    }

    fn apply(balances: &BTreeMap<String, f64>, settlements: &[Settlement]) -> BTreeMap<String, f64> {
        let mut applied = balances.clone();
        for s in settlements {
            *applied.get_mut(&s.from).unwrap() += s.amount;
            *applied.get_mut(&s.to).unwrap() -= s.amount;
        }
        applied
    }

    #[test]
    fn two_debtors_pay_one_creditor() {
        let table = balances(&[("a@x", 60.0), ("b@x", -30.0), ("c@x", -30.0)]);
        let plan = plan_settlements(&table);

        assert_eq!(plan.len(), 2);
        assert!(plan.iter().all(|s| s.to == "a@x"));
        let paid: f64 = plan.iter().map(|s| s.amount).sum();
        assert_eq!(paid, 60.0);

        let applied = apply(&table, &plan);
        assert!(applied.values().all(|b| b.abs() <= SETTLE_EPSILON));
    }

    #[test]
    fn settled_table_plans_nothing() {
        let table = balances(&[("a@x", 0.0), ("b@x", 0.005), ("c@x", -0.005)]);
        assert!(plan_settlements(&table).is_empty());
    }

    #[test]
    fn largest_pair_matches_first() {
        let table = balances(&[("a@x", 70.0), ("b@x", 30.0), ("c@x", -100.0)]);
        let plan = plan_settlements(&table);

        assert_eq!(
            plan,
            vec![
                Settlement { from: "c@x".to_string(), to: "a@x".to_string(), amount: 70.0 },
                Settlement { from: "c@x".to_string(), to: "b@x".to_string(), amount: 30.0 },
            ]
        );
    }

    #[test]
    fn chain_settles_within_tolerance() {
        let table = balances(&[
            ("a@x", 25.37),
            ("b@x", -12.11),
            ("c@x", -9.04),
            ("d@x", -4.22),
        ]);
        let plan = plan_settlements(&table);

        let applied = apply(&table, &plan);
        assert!(applied.values().all(|b| b.abs() <= SETTLE_EPSILON));
        assert!(plan.iter().all(|s| s.amount > 0.0));
        assert!(plan.len() <= 3);
    }

    #[test]
    fn equal_balances_keep_key_order() {
        let table = balances(&[("a@x", 20.0), ("b@x", 20.0), ("c@x", -20.0), ("d@x", -20.0)]);
        let plan = plan_settlements(&table);

        assert_eq!(
            plan,
            vec![
                Settlement { from: "c@x".to_string(), to: "a@x".to_string(), amount: 20.0 },
                Settlement { from: "d@x".to_string(), to: "b@x".to_string(), amount: 20.0 },
            ]
        );
    }

    #[test]
    fn planning_is_idempotent() {
        let table = balances(&[("a@x", 33.33), ("b@x", -33.33)]);
        assert_eq!(plan_settlements(&table), plan_settlements(&table));
    }
}
