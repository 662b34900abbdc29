//! Participant API endpoints

use api_types::participant::ParticipantAdd;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::Participant;

use crate::{ServerError, server::ServerState};

pub async fn add(
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
    Json(payload): Json<ParticipantAdd>,
) -> Result<StatusCode, ServerError> {
    let participant =
        Participant::new(&payload.name, &payload.email, payload.mobile.as_deref())?;
    state.engine.add_participant(&trip_id, participant).await?;

    Ok(StatusCode::CREATED)
}

/// Removes a participant by email.
///
/// Expenses referencing the email stay in the ledger; the summary keeps
/// carrying the dangling key.
pub async fn remove(
    State(state): State<ServerState>,
    Path((trip_id, email)): Path<(String, String)>,
) -> Result<StatusCode, ServerError> {
    state.engine.remove_participant(&trip_id, &email).await?;

    Ok(StatusCode::OK)
}
