//! Handlers for `/messages` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/messages` | Every booking the caller is party to; optional `?booking_id=` |
//! | `POST` | `/messages` | Body: `{"booking_id", "content"}` |
//! | `POST` | `/messages/mark_as_read` | Body: `{"booking_id"}` |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use matchmaker_core::{
  Error,
  message::{Message, NewMessage},
  store::MatchStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, auth::CurrentActor, error::ApiError, extract::JsonBody};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub booking_id: Option<String>,
}

/// `GET /messages[?booking_id=<uuid>]`
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Message>>, ApiError>
where
  S: MatchStore + 'static,
{
  let booking_id = params
    .booking_id
    .as_deref()
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .map(|raw| {
      Uuid::parse_str(raw)
        .map_err(|_| Error::validation("booking_id", format!("not a valid id: {raw:?}")))
    })
    .transpose()?;

  let messages = state
    .store
    .list_messages(actor.actor_id, booking_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(messages))
}

/// `POST /messages`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  JsonBody(body): JsonBody<NewMessage>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MatchStore + 'static,
{
  let message = state
    .store
    .send_message(actor.actor_id, body)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(message)))
}

#[derive(Debug, Deserialize)]
pub struct MarkReadBody {
  pub booking_id: Option<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct MarkReadResponse {
  pub success:     bool,
  pub marked_read: usize,
}

/// `POST /messages/mark_as_read`
pub async fn mark_as_read<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  JsonBody(body): JsonBody<MarkReadBody>,
) -> Result<Json<MarkReadResponse>, ApiError>
where
  S: MatchStore + 'static,
{
  let booking_id = body
    .booking_id
    .ok_or_else(|| Error::validation("booking_id", "is required"))?;
  let marked_read = state
    .store
    .mark_read(booking_id, actor.actor_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(MarkReadResponse { success: true, marked_read }))
}
