//! Handlers for `/bookings` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/bookings` | Role-scoped; optional `?status=A,B` |
//! | `POST`   | `/bookings` | Seekers only; lands in `REQUESTED` |
//! | `GET`    | `/bookings/pending` | `REQUESTED` |
//! | `GET`    | `/bookings/matched` | `CONFIRMED` or `COMPLETED` |
//! | `GET`    | `/bookings/{id}` | 404 unless the caller is a party |
//! | `POST`   | `/bookings/{id}/accept_request` | Catalyst |
//! | `POST`   | `/bookings/{id}/reject_request` | Catalyst |
//! | `POST`   | `/bookings/{id}/complete` | Catalyst |
//! | `DELETE` | `/bookings/{id}/delete_booking` | Cancel (seeker) or remove (catalyst) |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use matchmaker_core::{
  Error,
  booking::{Booking, BookingStatus, NewBooking, StatusFilter, Transition},
  store::MatchStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  AppState,
  auth::CurrentActor,
  error::ApiError,
  extract::{JsonBody, PathId},
};

#[derive(Debug, Serialize)]
pub struct TransitionResponse {
  pub success: bool,
  pub message: &'static str,
  pub booking: Booking,
}

fn outcome(transition: Transition) -> &'static str {
  match transition {
    Transition::Accept => "Booking request accepted",
    Transition::Reject => "Booking request rejected",
    Transition::SeekerCancel => "Booking request cancelled",
    Transition::Complete => "Booking completed",
    Transition::CatalystRemove => "Booking removed successfully",
  }
}

// ─── Listing ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub status: Option<String>,
}

async fn scoped<S>(
  state: &AppState<S>,
  caller: &CurrentActor,
  filter: StatusFilter,
) -> Result<Json<Vec<Booking>>, ApiError>
where
  S: MatchStore + 'static,
{
  let actor = &caller.0;
  let bookings = state
    .store
    .list_bookings(actor.actor_id, actor.role, filter)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(bookings))
}

/// `GET /bookings[?status=<A,B>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  caller: CurrentActor,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Booking>>, ApiError>
where
  S: MatchStore + 'static,
{
  scoped(&state, &caller, StatusFilter::parse(params.status.as_deref())).await
}

/// `GET /bookings/pending`
pub async fn pending<S>(
  State(state): State<AppState<S>>,
  caller: CurrentActor,
) -> Result<Json<Vec<Booking>>, ApiError>
where
  S: MatchStore + 'static,
{
  scoped(&state, &caller, StatusFilter::only([BookingStatus::Requested])).await
}

/// `GET /bookings/matched`
pub async fn matched<S>(
  State(state): State<AppState<S>>,
  caller: CurrentActor,
) -> Result<Json<Vec<Booking>>, ApiError>
where
  S: MatchStore + 'static,
{
  let filter = StatusFilter::only([BookingStatus::Confirmed, BookingStatus::Completed]);
  scoped(&state, &caller, filter).await
}

// ─── Create / read ───────────────────────────────────────────────────────────

/// `POST /bookings`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  JsonBody(body): JsonBody<NewBooking>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MatchStore + 'static,
{
  let booking = state
    .store
    .create_booking(actor.actor_id, body)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(booking)))
}

/// `GET /bookings/{id}`
pub async fn get_one<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  PathId(id): PathId<Uuid>,
) -> Result<Json<Booking>, ApiError>
where
  S: MatchStore + 'static,
{
  let booking = state
    .store
    .get_booking(id)
    .await
    .map_err(ApiError::store)?
    .filter(|b| b.involves(actor.actor_id))
    .ok_or(Error::not_found("booking", id))?;
  Ok(Json(booking))
}

// ─── Transitions ─────────────────────────────────────────────────────────────

async fn apply<S>(
  state: &AppState<S>,
  booking_id: Uuid,
  actor_id: Uuid,
  transition: Transition,
) -> Result<Json<TransitionResponse>, ApiError>
where
  S: MatchStore + 'static,
{
  let booking = state
    .store
    .transition_booking(booking_id, actor_id, transition)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(TransitionResponse { success: true, message: outcome(transition), booking }))
}

/// `POST /bookings/{id}/accept_request`
pub async fn accept_request<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  PathId(id): PathId<Uuid>,
) -> Result<Json<TransitionResponse>, ApiError>
where
  S: MatchStore + 'static,
{
  apply(&state, id, actor.actor_id, Transition::Accept).await
}

/// `POST /bookings/{id}/reject_request`
pub async fn reject_request<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  PathId(id): PathId<Uuid>,
) -> Result<Json<TransitionResponse>, ApiError>
where
  S: MatchStore + 'static,
{
  apply(&state, id, actor.actor_id, Transition::Reject).await
}

/// `POST /bookings/{id}/complete`
pub async fn complete<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  PathId(id): PathId<Uuid>,
) -> Result<Json<TransitionResponse>, ApiError>
where
  S: MatchStore + 'static,
{
  apply(&state, id, actor.actor_id, Transition::Complete).await
}

/// `DELETE /bookings/{id}/delete_booking`
///
/// An actor's role decides which side of any booking they can stand on,
/// so it also picks the removal.
pub async fn delete_booking<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  PathId(id): PathId<Uuid>,
) -> Result<Json<TransitionResponse>, ApiError>
where
  S: MatchStore + 'static,
{
  apply(&state, id, actor.actor_id, Transition::removal_for(actor.role)).await
}
