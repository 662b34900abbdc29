//! The `Trip` aggregate: a participant registry plus an ordered expense
//! ledger, stored as one document.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Expense, Participant, ResultEngine,
    balances::{BalanceSheet, compute_balances},
    settlement::{Settlement, plan_settlements},
};

/// One trip document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trip {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub participants: Vec<Participant>,
    pub expenses: Vec<Expense>,
}

/// Everything the summary view needs, derived from one ledger snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct TripSummary {
    pub sheet: BalanceSheet,
    pub settlements: Vec<Settlement>,
}

impl Trip {
    /// Creates a trip with the creator as its first participant.
    pub fn new(name: &str, creator: Participant) -> ResultEngine<Self> {
        let name = normalize_required_name(name, "trip")?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            created_at: Utc::now(),
            created_by: creator.email.clone(),
            participants: vec![creator],
            expenses: Vec::new(),
        })
    }

    pub fn participant(&self, email: &str) -> Option<&Participant> {
        self.participants.iter().find(|p| p.email == email)
    }

    /// Adds a participant; the email must be free.
    pub fn add_participant(&mut self, participant: Participant) -> ResultEngine<()> {
        if self.participant(&participant.email).is_some() {
            return Err(EngineError::ExistingKey(participant.email));
        }
        self.participants.push(participant);
        Ok(())
    }

    /// Removes a participant by email.
    ///
    /// Expenses referencing the removed email are left untouched; from then
    /// on the email is a dangling reference the balance computation carries
    /// as an opaque key.
    pub fn remove_participant(&mut self, email: &str) -> ResultEngine<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| p.email == email)
            .ok_or_else(|| EngineError::KeyNotFound(email.to_string()))?;
        Ok(self.participants.remove(index))
    }

    /// Appends a validated expense to the ledger and returns its index.
    pub fn add_expense(&mut self, expense: Expense) -> ResultEngine<usize> {
        expense.validate()?;
        self.expenses.push(expense);
        Ok(self.expenses.len() - 1)
    }

    /// Replaces the whole record at `index`.
    pub fn update_expense(&mut self, index: usize, expense: Expense) -> ResultEngine<()> {
        expense.validate()?;
        let slot = self
            .expenses
            .get_mut(index)
            .ok_or_else(|| EngineError::KeyNotFound(format!("expense #{index}")))?;
        *slot = expense;
        Ok(())
    }

    pub fn remove_expense(&mut self, index: usize) -> ResultEngine<Expense> {
        if index >= self.expenses.len() {
            return Err(EngineError::KeyNotFound(format!("expense #{index}")));
        }
        Ok(self.expenses.remove(index))
    }

    /// Recomputes balances and a settlement plan from the current snapshot.
    pub fn summary(&self) -> ResultEngine<TripSummary> {
        let sheet = compute_balances(&self.participants, &self.expenses)?;
        let settlements = plan_settlements(&sheet.balances);
        Ok(TripSummary { sheet, settlements })
    }
}

fn normalize_required_name(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidTrip(format!(
            "{label} name must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}
