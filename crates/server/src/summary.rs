//! Summary API endpoint

use api_types::summary::{BalanceView, SettlementView, SummaryResponse};
use axum::{
    Json,
    extract::{Path, State},
};
use engine::display_name;

use crate::{ServerError, server::ServerState};

/// Balances, per-participant totals and the settlement plan, recomputed
/// from the latest trip snapshot.
pub async fn get(
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
) -> Result<Json<SummaryResponse>, ServerError> {
    let trip = state.engine.trip(&trip_id).await?;
    let summary = trip.summary()?;

    let balances = summary
        .sheet
        .balances
        .iter()
        .map(|(email, balance)| BalanceView {
            email: email.clone(),
            name: display_name(&trip.participants, email).to_string(),
            balance: *balance,
            paid: summary.sheet.contributions.get(email).copied().unwrap_or(0.0),
            owed_share: summary.sheet.owed_share.get(email).copied().unwrap_or(0.0),
        })
        .collect();

    let settlements = summary
        .settlements
        .iter()
        .map(|s| SettlementView {
            from: s.from.clone(),
            from_name: display_name(&trip.participants, &s.from).to_string(),
            to: s.to.clone(),
            to_name: display_name(&trip.participants, &s.to).to_string(),
            amount: s.amount,
        })
        .collect();

    Ok(Json(SummaryResponse {
        total_spent: summary.sheet.total_spent,
        balances,
        settlements,
    }))
}
