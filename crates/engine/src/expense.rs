//! Expense records and their split methods.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{EngineError, ResultEngine};

/// How an expense amount is divided among the shared participants.
///
/// The non-equal variants carry per-participant parameters positionally
/// aligned with [`Expense::shared_with`]. Serialized as
/// `{"splitType": "...", "shares": [...]}` inside the expense document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "splitType", content = "shares", rename_all = "lowercase")]
pub enum SplitMethod {
    /// Same share for every listed participant.
    Equal,
    /// Percentages of the amount. Not required to sum to 100.
    Percent(Vec<f64>),
    /// Proportional weights.
    Shares(Vec<f64>),
    /// Exact amounts, taken literally. Not required to sum to the total.
    Amount(Vec<f64>),
}

impl SplitMethod {
    /// The per-participant parameter list, if the variant carries one.
    #[must_use]
    pub fn shares(&self) -> Option<&[f64]> {
        match self {
            SplitMethod::Equal => None,
            SplitMethod::Percent(shares)
            | SplitMethod::Shares(shares)
            | SplitMethod::Amount(shares) => Some(shares),
        }
    }
}

/// A single ledger entry: who paid, how much, and who shares it.
///
/// Expenses are immutable once computed over; an edit replaces the whole
/// record in the ledger.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
    pub date: NaiveDate,
    pub shared_with: Vec<String>,
    #[serde(flatten)]
    pub split: SplitMethod,
}

impl Expense {
    /// Validates the record shape before it is resolved or stored.
    ///
    /// Rejected: non-finite or non-positive amount, empty description or
    /// payer, empty or duplicated `shared_with`, and for non-equal splits a
    /// share list whose length differs from `shared_with` or containing
    /// negative/non-finite entries.
    pub fn validate(&self) -> ResultEngine<()> {
        if !self.amount.is_finite() || self.amount <= 0.0 {
            return Err(EngineError::InvalidAmount(format!(
                "expense amount must be > 0, got {}",
                self.amount
            )));
        }
        if self.description.trim().is_empty() {
            return Err(EngineError::InvalidExpense(
                "description must not be empty".to_string(),
            ));
        }
        if self.paid_by.trim().is_empty() {
            return Err(EngineError::InvalidExpense(
                "paidBy must not be empty".to_string(),
            ));
        }
        if self.shared_with.is_empty() {
            return Err(EngineError::InvalidExpense(
                "sharedWith must not be empty".to_string(),
            ));
        }
        for (i, email) in self.shared_with.iter().enumerate() {
            if self.shared_with[..i].contains(email) {
                return Err(EngineError::InvalidExpense(format!(
                    "duplicate participant in sharedWith: {email}"
                )));
            }
        }

        if let Some(shares) = self.split.shares() {
            if shares.len() != self.shared_with.len() {
                return Err(EngineError::InvalidExpense(format!(
                    "shares has {} entries for {} participants",
                    shares.len(),
                    self.shared_with.len()
                )));
            }
            if let Some(bad) = shares.iter().find(|s| !s.is_finite() || **s < 0.0) {
                return Err(EngineError::InvalidExpense(format!(
                    "share entries must be finite and >= 0, got {bad}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(split: SplitMethod, shared_with: &[&str]) -> Expense {
        Expense {
            description: "Dinner".to_string(),
            amount: 90.0,
            paid_by: "a@x".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            shared_with: shared_with.iter().map(ToString::to_string).collect(),
            split,
        }
    }

    #[test]
    fn valid_records_pass() {
        expense(SplitMethod::Equal, &["a@x", "b@x"]).validate().unwrap();
        expense(SplitMethod::Percent(vec![60.0, 40.0]), &["a@x", "b@x"])
            .validate()
            .unwrap();
    }

    #[test]
    fn rejects_bad_amounts() {
        let mut e = expense(SplitMethod::Equal, &["a@x"]);
        e.amount = 0.0;
        assert!(matches!(e.validate(), Err(EngineError::InvalidAmount(_))));
        e.amount = f64::NAN;
        assert!(matches!(e.validate(), Err(EngineError::InvalidAmount(_))));
        e.amount = -5.0;
        assert!(matches!(e.validate(), Err(EngineError::InvalidAmount(_))));
    }

    #[test]
    fn rejects_empty_shared_with() {
        let e = expense(SplitMethod::Equal, &[]);
        assert!(matches!(e.validate(), Err(EngineError::InvalidExpense(_))));
    }

    #[test]
    fn rejects_duplicate_shared_with() {
        let e = expense(SplitMethod::Equal, &["a@x", "a@x"]);
        assert!(matches!(e.validate(), Err(EngineError::InvalidExpense(_))));
    }

    #[test]
    fn rejects_mismatched_shares() {
        let e = expense(SplitMethod::Percent(vec![100.0]), &["a@x", "b@x"]);
        assert!(matches!(e.validate(), Err(EngineError::InvalidExpense(_))));

        let e = expense(SplitMethod::Amount(vec![45.0, -1.0]), &["a@x", "b@x"]);
        assert!(matches!(e.validate(), Err(EngineError::InvalidExpense(_))));
    }

    #[test]
    fn serializes_with_split_type_tag() {
        let e = expense(SplitMethod::Percent(vec![60.0, 40.0]), &["a@x", "b@x"]);
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["splitType"], "percent");
        assert_eq!(json["shares"][0], 60.0);

        let equal = expense(SplitMethod::Equal, &["a@x"]);
        let json = serde_json::to_value(&equal).unwrap();
        assert_eq!(json["splitType"], "equal");
        assert!(json.get("shares").is_none());

        let back: Expense = serde_json::from_value(json).unwrap();
        assert_eq!(back.split, SplitMethod::Equal);
    }
}
