//! Trip API endpoints

use api_types::participant::ParticipantView;
use api_types::trip::{TripCreated, TripListResponse, TripNew, TripView};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Participant, Trip};

use crate::{
    ServerError,
    server::{CurrentUser, ServerState},
};

fn view(trip: &Trip) -> TripView {
    TripView {
        id: trip.id.clone(),
        name: trip.name.clone(),
        created_at: trip.created_at,
        created_by: trip.created_by.clone(),
        participants: trip
            .participants
            .iter()
            .map(|p| ParticipantView {
                name: p.name.clone(),
                email: p.email.clone(),
                mobile: p.mobile.clone(),
            })
            .collect(),
        expense_count: trip.expenses.len(),
    }
}

/// Handle requests for creating a new trip.
///
/// The requesting user becomes the first participant.
pub async fn create(
    Extension(user): Extension<CurrentUser>,
    State(state): State<ServerState>,
    Json(payload): Json<TripNew>,
) -> Result<(StatusCode, Json<TripCreated>), ServerError> {
    let creator = Participant::new(&user.name, &user.email, None)?;
    let trip = state.engine.create_trip(&payload.name, creator).await?;

    Ok((StatusCode::CREATED, Json(TripCreated { id: trip.id })))
}

/// Handle requests for listing trips.
pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<TripListResponse>, ServerError> {
    let trips = state.engine.list_trips().await?;

    Ok(Json(TripListResponse {
        trips: trips.iter().map(view).collect(),
    }))
}

pub async fn get_trip(
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
) -> Result<Json<TripView>, ServerError> {
    let trip = state.engine.trip(&trip_id).await?;

    Ok(Json(view(&trip)))
}

pub async fn delete_trip(
    State(state): State<ServerState>,
    Path(trip_id): Path<String>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_trip(&trip_id).await?;

    Ok(StatusCode::OK)
}
