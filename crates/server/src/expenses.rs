//! Expense API endpoints

use api_types::expense::{
    ExpenseCreated, ExpenseListResponse, ExpenseUpsert, ExpenseView, SplitType,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Expense, SplitMethod, display_name};

use crate::{ServerError, server::ServerState};

fn map_split(split_type: SplitType, shares: Option<Vec<f64>>) -> Result<SplitMethod, ServerError> {
    match (split_type, shares) {
        (SplitType::Equal, _) => Ok(SplitMethod::Equal),
        (SplitType::Percent, Some(shares)) => Ok(SplitMethod::Percent(shares)),
        (SplitType::Shares, Some(shares)) => Ok(SplitMethod::Shares(shares)),
        (SplitType::Amount, Some(shares)) => Ok(SplitMethod::Amount(shares)),
        (_, None) => Err(ServerError::Generic(
            "shares is required for this split type".to_string(),
        )),
    }
}

fn split_parts(split: &SplitMethod) -> (SplitType, Option<Vec<f64>>) {
    match split {
        SplitMethod::Equal => (SplitType::Equal, None),
        SplitMethod::Percent(shares) => (SplitType::Percent, Some(shares.clone())),
        SplitMethod::Shares(shares) => (SplitType::Shares, Some(shares.clone())),
        SplitMethod::Amount(shares) => (SplitType::Amount, Some(shares.clone())),
    }
}

fn expense_from(payload: ExpenseUpsert) -> Result<Expense, ServerError> {
    Ok(Expense {
        description: payload.description,
        amount: payload.amount,
        paid_by: payload.paid_by,
        date: payload.date,
        shared_with: payload.shared_with,
        split: map_split(payload.split_type, payload.shares)?,
    })
}

pub async fn list(
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
) -> Result<Json<ExpenseListResponse>, ServerError> {
    let trip = state.engine.trip(&trip_id).await?;

    let expenses = trip
        .expenses
        .iter()
        .enumerate()
        .map(|(index, expense)| {
            let (split_type, shares) = split_parts(&expense.split);
            ExpenseView {
                index,
                description: expense.description.clone(),
                amount: expense.amount,
                paid_by: expense.paid_by.clone(),
                paid_by_name: display_name(&trip.participants, &expense.paid_by).to_string(),
                date: expense.date,
                split_type,
                shared_with: expense.shared_with.clone(),
                shares,
            }
        })
        .collect();

    Ok(Json(ExpenseListResponse { expenses }))
}

pub async fn add(
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
    Json(payload): Json<ExpenseUpsert>,
) -> Result<(StatusCode, Json<ExpenseCreated>), ServerError> {
    let expense = expense_from(payload)?;
    let index = state.engine.add_expense(&trip_id, expense).await?;

    Ok((StatusCode::CREATED, Json(ExpenseCreated { index })))
}

/// Replaces the whole record at the given ledger index.
pub async fn update(
    State(state): State<ServerState>,
    Path((trip_id, index)): Path<(String, usize)>,
    Json(payload): Json<ExpenseUpsert>,
) -> Result<StatusCode, ServerError> {
    let expense = expense_from(payload)?;
    state.engine.update_expense(&trip_id, index, expense).await?;

    Ok(StatusCode::OK)
}

pub async fn remove(
    State(state): State<ServerState>,
    Path((trip_id, index)): Path<(String, usize)>,
) -> Result<StatusCode, ServerError> {
    state.engine.remove_expense(&trip_id, index).await?;

    Ok(StatusCode::OK)
}
