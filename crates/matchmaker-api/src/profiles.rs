//! Handlers for `/profiles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/profiles` | `?lat&lon&radius&role`; ranked when `lat`/`lon` are given |
//! | `GET`  | `/profiles/nearby_catalysts` | `?lat&lon&radius`; `lat`/`lon` required; no token needed |
//! | `GET`, `PATCH` | `/profiles/me` | The caller's own profile |
//! | `GET`  | `/profiles/get_preferences` | Defaults when nothing is stored |
//! | `GET`, `PUT`, `PATCH` | `/profiles/update_preferences` | Body replaces stored preferences |

use std::str::FromStr;

use axum::{
  Json,
  extract::{Query, State},
};
use matchmaker_core::{
  Error,
  actor::Role,
  geo::{self, Radius},
  preferences,
  profile::{Coordinate, ProfilePatch, ProfileView},
  store::MatchStore,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::{AppState, auth::CurrentActor, error::ApiError, extract::JsonBody};

/// Specializations shown per catalyst in the nearby listing.
pub const SPECIALIZATION_PREVIEW: usize = 3;

// ─── Projections ─────────────────────────────────────────────────────────────

/// A profile as its owner sees it.
#[derive(Debug, Serialize)]
pub struct ProfileBody {
  pub id:              Uuid,
  pub username:        String,
  pub display_name:    String,
  pub name:            String,
  pub role:            Role,
  pub bio:             String,
  pub bio_short:       String,
  pub is_active:       bool,
  pub latitude:        Option<f64>,
  pub longitude:       Option<f64>,
  pub address:         String,
  pub hourly_rate:     Option<Decimal>,
  pub specializations: Vec<String>,
  pub preferences:     preferences::Preferences,
  pub average_rating:  Decimal,
  pub rating_count:    u32,
}

impl From<ProfileView> for ProfileBody {
  fn from(view: ProfileView) -> Self {
    let name = view.actor.name().to_owned();
    let ProfileView { actor, profile } = view;
    Self {
      id: actor.actor_id,
      username: actor.username,
      display_name: actor.display_name,
      name,
      role: actor.role,
      bio: profile.bio,
      bio_short: profile.bio_short,
      is_active: profile.is_active,
      latitude: profile.coordinate.map(|c| c.latitude),
      longitude: profile.coordinate.map(|c| c.longitude),
      address: profile.address,
      hourly_rate: profile.hourly_rate,
      specializations: profile.specializations,
      preferences: profile.preferences,
      average_rating: profile.average_rating,
      rating_count: profile.rating_count,
    }
  }
}

/// One entry of `GET /profiles`. `distance` is present only on ranked
/// listings.
#[derive(Debug, Serialize)]
pub struct ProfileListing {
  pub id:              Uuid,
  pub username:        String,
  pub name:            String,
  pub role:            Role,
  pub bio_short:       String,
  pub is_active:       bool,
  pub latitude:        f64,
  pub longitude:       f64,
  pub hourly_rate:     Option<Decimal>,
  pub specializations: Vec<String>,
  pub average_rating:  Decimal,
  pub rating_count:    u32,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub distance:        Option<u64>,
}

impl ProfileListing {
  fn new(view: ProfileView, at: Coordinate, distance: Option<u64>) -> Self {
    let name = view.actor.name().to_owned();
    let ProfileView { actor, profile } = view;
    Self {
      id: actor.actor_id,
      username: actor.username,
      name,
      role: actor.role,
      bio_short: profile.bio_short,
      is_active: profile.is_active,
      latitude: at.latitude,
      longitude: at.longitude,
      hourly_rate: profile.hourly_rate,
      specializations: profile.specializations,
      average_rating: profile.average_rating,
      rating_count: profile.rating_count,
      distance,
    }
  }
}

/// One entry of `GET /profiles/nearby_catalysts`; trimmed for payload size.
#[derive(Debug, Serialize)]
pub struct NearbyCatalyst {
  pub id:              Uuid,
  pub name:            String,
  pub username:        String,
  pub bio:             String,
  pub latitude:        f64,
  pub longitude:       f64,
  pub specializations: Vec<String>,
  pub hourly_rate:     Option<Decimal>,
  pub average_rating:  Decimal,
  pub rating_count:    u32,
  /// Whole meters from the query origin.
  pub distance:        u64,
}

/// Body of both preferences endpoints. `message` is set only on updates.
#[derive(Debug, Serialize)]
pub struct PreferencesResponse {
  pub success:     bool,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message:     Option<&'static str>,
  pub preferences: preferences::Preferences,
}

#[derive(Debug, Serialize)]
pub struct NearbyResponse {
  pub success:   bool,
  pub count:     usize,
  pub catalysts: Vec<NearbyCatalyst>,
}

// ─── Query parsing ───────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct GeoParams {
  pub lat:    Option<String>,
  pub lon:    Option<String>,
  pub radius: Option<String>,
  pub role:   Option<String>,
}

fn present(raw: &Option<String>) -> Option<&str> {
  raw.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_degrees(field: &'static str, raw: &str) -> Result<f64, Error> {
  raw
    .parse::<f64>()
    .map_err(|_| Error::validation(field, format!("must be a number, got {raw:?}")))
}

impl GeoParams {
  /// The query origin, if any. Half an origin is an error.
  fn origin(&self) -> Result<Option<Coordinate>, Error> {
    match (present(&self.lat), present(&self.lon)) {
      (None, None) => Ok(None),
      (Some(lat), Some(lon)) => Ok(Some(Coordinate::new(
        parse_degrees("lat", lat)?,
        parse_degrees("lon", lon)?,
      )?)),
      (Some(_), None) => Err(Error::validation("lon", "is required when lat is given")),
      (None, Some(_)) => Err(Error::validation("lat", "is required when lon is given")),
    }
  }

  fn radius(&self) -> Result<Radius, Error> { Radius::from_param(present(&self.radius)) }

  fn role(&self) -> Result<Option<Role>, Error> {
    present(&self.role)
      .map(|raw| {
        Role::from_str(raw)
          .map_err(|_| Error::validation("role", format!("must be SEEKER or CATALYST, got {raw:?}")))
      })
      .transpose()
  }
}

// ─── Listings ────────────────────────────────────────────────────────────────

/// `GET /profiles[?lat&lon&radius&role]`
///
/// With an origin, profiles within `radius` ranked nearest first; without
/// one, every located profile in registration order.
pub async fn list<S>(
  State(state): State<AppState<S>>,
  _caller: CurrentActor,
  Query(params): Query<GeoParams>,
) -> Result<Json<Vec<ProfileListing>>, ApiError>
where
  S: MatchStore + 'static,
{
  let role = params.role()?;
  let origin = params.origin()?;
  let radius = params.radius()?;

  let candidates = state
    .store
    .list_profiles(role, true)
    .await
    .map_err(ApiError::store)?;
  let total = candidates.len();

  let listing: Vec<_> = match origin {
    Some(origin) => geo::find_nearby(origin, radius, candidates)
      .into_iter()
      .map(|hit| ProfileListing::new(hit.item, hit.coordinate, Some(hit.distance_m)))
      .collect(),
    None => geo::full_listing(candidates)
      .into_iter()
      .map(|placed| ProfileListing::new(placed.item, placed.coordinate, None))
      .collect(),
  };

  debug!(candidates = total, hits = listing.len(), ranked = origin.is_some(), "profile listing");
  Ok(Json(listing))
}

/// `GET /profiles/nearby_catalysts?lat&lon[&radius]`
///
/// Public: no token is required to browse catalysts.
pub async fn nearby_catalysts<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<GeoParams>,
) -> Result<Json<NearbyResponse>, ApiError>
where
  S: MatchStore + 'static,
{
  let origin = params
    .origin()?
    .ok_or_else(|| Error::validation("lat", "latitude and longitude are required"))?;
  let radius = params.radius()?;

  let candidates = state
    .store
    .list_profiles(Some(Role::Catalyst), true)
    .await
    .map_err(ApiError::store)?;
  let total = candidates.len();

  let catalysts: Vec<_> = geo::find_nearby(origin, radius, candidates)
    .into_iter()
    .map(|hit| {
      let name = hit.item.actor.name().to_owned();
      let ProfileView { actor, mut profile } = hit.item;
      profile.specializations.truncate(SPECIALIZATION_PREVIEW);
      NearbyCatalyst {
        id: actor.actor_id,
        name,
        username: actor.username,
        bio: profile.bio,
        latitude: hit.coordinate.latitude,
        longitude: hit.coordinate.longitude,
        specializations: profile.specializations,
        hourly_rate: profile.hourly_rate,
        average_rating: profile.average_rating,
        rating_count: profile.rating_count,
        distance: hit.distance_m,
      }
    })
    .collect();

  debug!(candidates = total, hits = catalysts.len(), radius_m = radius.meters(), "nearby catalysts");
  Ok(Json(NearbyResponse { success: true, count: catalysts.len(), catalysts }))
}

// ─── Own profile ─────────────────────────────────────────────────────────────

async fn own_profile<S>(state: &AppState<S>, actor_id: Uuid) -> Result<ProfileView, ApiError>
where
  S: MatchStore + 'static,
{
  let view = state
    .store
    .get_profile(actor_id)
    .await
    .map_err(ApiError::store)?
    .ok_or(Error::not_found("profile", actor_id))?;
  Ok(view)
}

/// `GET /profiles/me`
pub async fn me<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
) -> Result<Json<ProfileBody>, ApiError>
where
  S: MatchStore + 'static,
{
  let view = own_profile(&state, actor.actor_id).await?;
  Ok(Json(view.into()))
}

/// `PATCH /profiles/me`
pub async fn update_me<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  JsonBody(patch): JsonBody<ProfilePatch>,
) -> Result<Json<ProfileBody>, ApiError>
where
  S: MatchStore + 'static,
{
  let view = state
    .store
    .update_profile(actor.actor_id, patch)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(view.into()))
}

// ─── Preferences ─────────────────────────────────────────────────────────────

/// `GET /profiles/get_preferences`
pub async fn get_preferences<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
) -> Result<Json<PreferencesResponse>, ApiError>
where
  S: MatchStore + 'static,
{
  let stored = own_profile(&state, actor.actor_id).await?.profile.preferences;
  let preferences = if stored.is_empty() { preferences::defaults() } else { stored };
  Ok(Json(PreferencesResponse { success: true, message: None, preferences }))
}

/// `PUT|PATCH /profiles/update_preferences`
///
/// The whole payload replaces what is stored once every checked key passes.
pub async fn update_preferences<S>(
  State(state): State<AppState<S>>,
  CurrentActor(actor): CurrentActor,
  JsonBody(payload): JsonBody<Value>,
) -> Result<Json<PreferencesResponse>, ApiError>
where
  S: MatchStore + 'static,
{
  let preferences = preferences::validate(payload)?;
  let view = state
    .store
    .replace_preferences(actor.actor_id, preferences)
    .await
    .map_err(ApiError::store)?;
  Ok(Json(PreferencesResponse {
    success:     true,
    message:     Some("Preferences saved successfully"),
    preferences: view.profile.preferences,
  }))
}
