//! Handlers for `/ratings` endpoints. Every write recomputes the rated
//! catalyst's aggregate before it returns.

use axum::{
  Json,
  extract::State,
  http::StatusCode,
  response::IntoResponse,
};
use matchmaker_core::{
  rating::{NewRating, Rating, RatingUpdate},
  store::MatchStore,
};

use crate::{
  AppState,
  auth::CurrentActor,
  error::ApiError,
  extract::{JsonBody, PathId},
};

/// `GET /ratings`: given by the caller (seekers) or received (catalysts).
pub async fn list<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
) -> Result<Json<Vec<Rating>>, ApiError>
where
  S: MatchStore + 'static,
{
  let ratings = state
    .store
    .list_ratings(actor.actor_id)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(ratings))
}

/// `POST /ratings`
pub async fn create<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  JsonBody(body): JsonBody<NewRating>,
) -> Result<impl IntoResponse, ApiError>
where
  S: MatchStore + 'static,
{
  let rating = state
    .store
    .create_rating(actor.actor_id, body)
    .await
    .map_err(ApiError::store)?;
  Ok((StatusCode::CREATED, Json(rating)))
}

/// `PUT /ratings/{id}`
pub async fn update<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  PathId(id): PathId<uuid::Uuid>,
  JsonBody(body): JsonBody<RatingUpdate>,
) -> Result<Json<Rating>, ApiError>
where
  S: MatchStore + 'static,
{
  let rating = state
    .store
    .update_rating(id, actor.actor_id, body)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(rating))
}

/// `DELETE /ratings/{id}`
pub async fn delete<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  PathId(id): PathId<uuid::Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: MatchStore + 'static,
{
  state
    .store
    .delete_rating(id, actor.actor_id)
    .await
    .map_err(ApiError::store)?;
  Ok(StatusCode::NO_CONTENT)
}
