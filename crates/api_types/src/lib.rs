use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

pub mod participant {
    use super::*;

    /// Request body for adding a participant to a trip.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipantAdd {
        pub name: String,
        pub email: String,
        pub mobile: Option<String>,
    }

    /// A participant as returned in trip views.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipantView {
        pub name: String,
        pub email: String,
        pub mobile: Option<String>,
    }
}

pub mod trip {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripNew {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripCreated {
        pub id: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripView {
        pub id: String,
        pub name: String,
        pub created_at: DateTime<Utc>,
        pub created_by: String,
        pub participants: Vec<participant::ParticipantView>,
        pub expense_count: usize,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct TripListResponse {
        pub trips: Vec<TripView>,
    }
}

pub mod expense {
    use super::*;

    /// The split rule, as selected in the expense form.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum SplitType {
        Equal,
        Percent,
        Shares,
        Amount,
    }

    /// Request body for adding or replacing an expense.
    ///
    /// `shares` is required (and positionally aligned with `shared_with`)
    /// for every split type except `equal`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseUpsert {
        pub description: String,
        pub amount: f64,
        pub paid_by: String,
        pub date: NaiveDate,
        pub split_type: SplitType,
        pub shared_with: Vec<String>,
        pub shares: Option<Vec<f64>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseCreated {
        /// Ledger index of the appended expense.
        pub index: usize,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseView {
        pub index: usize,
        pub description: String,
        pub amount: f64,
        pub paid_by: String,
        /// Payer display name, falling back to the raw email for
        /// participants no longer in the registry.
        pub paid_by_name: String,
        pub date: NaiveDate,
        pub split_type: SplitType,
        pub shared_with: Vec<String>,
        pub shares: Option<Vec<f64>>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ExpenseListResponse {
        pub expenses: Vec<ExpenseView>,
    }
}

pub mod summary {
    use super::*;

    /// One participant's line in the summary view.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct BalanceView {
        pub email: String,
        pub name: String,
        /// Net position: positive is owed money, negative owes.
        pub balance: f64,
        /// Total this participant paid.
        pub paid: f64,
        /// Total share owed by this participant.
        pub owed_share: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SettlementView {
        pub from: String,
        pub from_name: String,
        pub to: String,
        pub to_name: String,
        pub amount: f64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct SummaryResponse {
        pub total_spent: f64,
        pub balances: Vec<BalanceView>,
        pub settlements: Vec<SettlementView>,
    }
}
