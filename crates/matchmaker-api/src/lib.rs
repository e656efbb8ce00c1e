//! JSON REST API for the matchmaking service.
//!
//! Exposes an axum [`Router`] backed by any [`MatchStore`]. Callers
//! authenticate with `Authorization: Token <token>` (see [`auth`]), except on
//! `GET /profiles/nearby_catalysts`, which is public. TLS and transport
//! concerns are the binary's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let state = AppState::new(Arc::new(store), Duration::from_secs(300));
//! axum::serve(listener, matchmaker_api::router(state)).await?;
//! ```

pub mod auth;
pub mod bookings;
pub mod cache;
pub mod error;
pub mod extract;
pub mod messages;
pub mod profiles;
pub mod ratings;

use std::{sync::Arc, time::Duration};

use axum::{
  Router,
  routing::{delete, get, post, put},
};
use matchmaker_core::{actor::Actor, store::MatchStore};

pub use error::ApiError;

use cache::TtlCache;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:  Arc<S>,
  /// Token digest → actor. Advisory; the store stays authoritative.
  pub tokens: Arc<TtlCache<String, Actor>>,
}

impl<S> AppState<S> {
  pub fn new(store: Arc<S>, token_ttl: Duration) -> Self {
    Self { store, tokens: Arc::new(TtlCache::new(token_ttl)) }
  }
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), tokens: Arc::clone(&self.tokens) }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: MatchStore + 'static,
{
  Router::new()
    // Profiles and proximity
    .route("/profiles", get(profiles::list::<S>))
    .route("/profiles/nearby_catalysts", get(profiles::nearby_catalysts::<S>))
    .route("/profiles/me", get(profiles::me::<S>).patch(profiles::update_me::<S>))
    .route("/profiles/get_preferences", get(profiles::get_preferences::<S>))
    .route(
      "/profiles/update_preferences",
      get(profiles::get_preferences::<S>)
        .put(profiles::update_preferences::<S>)
        .patch(profiles::update_preferences::<S>),
    )
    // Bookings
    .route("/bookings", get(bookings::list::<S>).post(bookings::create::<S>))
    .route("/bookings/pending", get(bookings::pending::<S>))
    .route("/bookings/matched", get(bookings::matched::<S>))
    .route("/bookings/{id}", get(bookings::get_one::<S>))
    .route("/bookings/{id}/accept_request", post(bookings::accept_request::<S>))
    .route("/bookings/{id}/reject_request", post(bookings::reject_request::<S>))
    .route("/bookings/{id}/complete", post(bookings::complete::<S>))
    .route("/bookings/{id}/delete_booking", delete(bookings::delete_booking::<S>))
    // Messages
    .route("/messages", get(messages::list::<S>).post(messages::create::<S>))
    .route("/messages/mark_as_read", post(messages::mark_as_read::<S>))
    // Ratings
    .route("/ratings", get(ratings::list::<S>).post(ratings::create::<S>))
    .route("/ratings/{id}", put(ratings::update::<S>).delete(ratings::delete::<S>))
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use matchmaker_core::actor::{NewActor, Role};
  use matchmaker_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;
  use uuid::Uuid;

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    AppState::new(Arc::new(store), Duration::from_secs(300))
  }

  /// Create an actor and hand back its id and a working token.
  async fn register(state: &AppState<SqliteStore>, username: &str, role: Role) -> (Uuid, String) {
    let actor = state.store.add_actor(NewActor::new(username, role)).await.unwrap();
    let token = auth::issue_token(state.store.as_ref(), actor.actor_id).await.unwrap();
    (actor.actor_id, token)
  }

  async fn send(
    state:  &AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    token:  Option<&str>,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
      builder = builder.header(header::AUTHORIZATION, format!("Token {token}"));
    }
    let req = match body {
      Some(body) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };

    let resp = router(state.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn locate(state: &AppState<SqliteStore>, token: &str, lat: f64, lon: f64) {
    let (status, _) = send(
      state,
      "PATCH",
      "/profiles/me",
      Some(token),
      Some(json!({ "latitude": lat, "longitude": lon })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
  }

  // ── Authentication ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_or_unknown_token_is_401() {
    let state = make_state().await;
    let (status, body) = send(&state, "GET", "/profiles/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "authentication_error");

    let (status, _) = send(&state, "GET", "/profiles/me", Some("deadbeef"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn token_resolves_to_own_profile() {
    let state = make_state().await;
    let (id, token) = register(&state, "carla", Role::Catalyst).await;

    let (status, body) = send(&state, "GET", "/profiles/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.to_string());
    assert_eq!(body["role"], "CATALYST");
    assert_eq!(body["name"], "carla");
    assert_eq!(body["average_rating"], "0.00");
    assert_eq!(body["latitude"], Value::Null);
  }

  // ── Proximity ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn nearby_catalysts_ranked_within_radius() {
    let state = make_state().await;
    let (_, seeker) = register(&state, "sam", Role::Seeker).await;
    let (a, a_tok) = register(&state, "near", Role::Catalyst).await;
    let (b, b_tok) = register(&state, "edge", Role::Catalyst).await;
    let (_, c_tok) = register(&state, "far", Role::Catalyst).await;
    let (_, d_tok) = register(&state, "other-seeker", Role::Seeker).await;

    // Registered out of distance order on purpose.
    locate(&state, &b_tok, 0.0, 0.0899).await;
    locate(&state, &c_tok, 0.0, 1.0).await;
    locate(&state, &a_tok, 0.0, 0.0).await;
    locate(&state, &d_tok, 0.0, 0.0).await;

    let (status, _) = send(
      &state,
      "PATCH",
      "/profiles/me",
      Some(&a_tok),
      Some(json!({ "specializations": ["hair", "nails", "skincare", "wardrobe"] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
      &state,
      "GET",
      "/profiles/nearby_catalysts?lat=0&lon=0&radius=10000",
      Some(&seeker),
      None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 2);
    let hits = body["catalysts"].as_array().unwrap();
    assert_eq!(hits[0]["id"], a.to_string());
    assert_eq!(hits[0]["distance"], 0);
    assert_eq!(hits[0]["specializations"].as_array().unwrap().len(), 3);
    assert_eq!(hits[1]["id"], b.to_string());
    assert_eq!(hits[1]["distance"], 9996);

    // The default radius is 10 km as well.
    let (_, body) = send(
      &state,
      "GET",
      "/profiles/nearby_catalysts?lat=0&lon=0",
      Some(&seeker),
      None,
    )
    .await;
    assert_eq!(body["count"], 2);
  }

  #[tokio::test]
  async fn nearby_catalysts_is_public() {
    let state = make_state().await;
    let (cat_id, cat) = register(&state, "carla", Role::Catalyst).await;
    locate(&state, &cat, 0.0, 0.0).await;

    let (status, body) =
      send(&state, "GET", "/profiles/nearby_catalysts?lat=0&lon=0", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);
    assert_eq!(body["catalysts"][0]["id"], cat_id.to_string());

    // The rest of /profiles still needs a token.
    let (status, _) = send(&state, "GET", "/profiles?lat=0&lon=0", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn proximity_queries_validate_their_parameters() {
    let state = make_state().await;
    let (_, token) = register(&state, "sam", Role::Seeker).await;

    let cases = [
      ("/profiles/nearby_catalysts", "lat"),
      ("/profiles/nearby_catalysts?lat=0&lon=0&radius=-5", "radius"),
      ("/profiles/nearby_catalysts?lat=0&lon=0&radius=abc", "radius"),
      ("/profiles/nearby_catalysts?lat=91&lon=0", "latitude"),
      ("/profiles/nearby_catalysts?lat=x&lon=0", "lat"),
      ("/profiles?lat=1", "lon"),
      ("/profiles?role=ADMIN", "role"),
    ];
    for (uri, field) in cases {
      let (status, body) = send(&state, "GET", uri, Some(&token), None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
      assert_eq!(body["code"], "validation_error", "{uri}");
      assert_eq!(body["field"], field, "{uri}");
    }
  }

  #[tokio::test]
  async fn profile_listing_full_and_ranked() {
    let state = make_state().await;
    let (seeker_id, seeker) = register(&state, "sam", Role::Seeker).await;
    let (cat_id, cat) = register(&state, "carla", Role::Catalyst).await;
    register(&state, "nowhere", Role::Catalyst).await;
    locate(&state, &seeker, 0.0, 0.0).await;
    locate(&state, &cat, 0.05, 0.0).await;

    let (status, body) = send(&state, "GET", "/profiles", Some(&seeker), None).await;
    assert_eq!(status, StatusCode::OK);
    let all = body.as_array().unwrap();
    assert_eq!(all.len(), 2, "unlocated profiles are left out");
    assert!(all.iter().all(|p| p.get("distance").is_none()));

    let (_, body) = send(
      &state,
      "GET",
      "/profiles?lat=0&lon=0&role=catalyst",
      Some(&seeker),
      None,
    )
    .await;
    let ranked = body.as_array().unwrap();
    assert_eq!(ranked.len(), 1);
    assert_eq!(ranked[0]["id"], cat_id.to_string());
    assert_eq!(ranked[0]["distance"], 5560);

    let (_, body) = send(&state, "GET", "/profiles?lat=0&lon=0", Some(&seeker), None).await;
    assert_eq!(body[0]["id"], seeker_id.to_string());
    assert_eq!(body[0]["distance"], 0);
  }

  #[tokio::test]
  async fn profile_patch_is_validated() {
    let state = make_state().await;
    let (_, token) = register(&state, "carla", Role::Catalyst).await;

    let (status, body) = send(
      &state,
      "PATCH",
      "/profiles/me",
      Some(&token),
      Some(json!({ "latitude": 12.5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "longitude");

    let (status, body) = send(
      &state,
      "PATCH",
      "/profiles/me",
      Some(&token),
      Some(json!({ "hourly_rate": "-1" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "hourly_rate");

    let (status, body) = send(
      &state,
      "PATCH",
      "/profiles/me",
      Some(&token),
      Some(json!({ "hourly_rate": "60.00", "bio": "Colourist" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hourly_rate"], "60.00");
    assert_eq!(body["bio"], "Colourist");
  }

  // ── Preferences ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn preferences_default_validate_and_replace() {
    let state = make_state().await;
    let (_, token) = register(&state, "sam", Role::Seeker).await;

    let (status, body) = send(&state, "GET", "/profiles/get_preferences", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(body.get("message").is_none());
    assert_eq!(body["preferences"]["service_scope"], "");
    assert_eq!(body["preferences"]["consultation_type"], json!([]));

    let (status, body) = send(
      &state,
      "PUT",
      "/profiles/update_preferences",
      Some(&token),
      Some(json!({ "service_scope": "everything" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "service_scope");

    let (status, body) = send(
      &state,
      "PUT",
      "/profiles/update_preferences",
      Some(&token),
      Some(json!({ "services_selected": "hair" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "services_selected");
    assert!(body["error"].as_str().unwrap().contains("wardrobe"));

    let payload = json!({
      "consultation_type": ["online"],
      "budget_personal": "1000-3000",
      "favourite_colour": "teal"
    });
    let (status, body) = send(
      &state,
      "PATCH",
      "/profiles/update_preferences",
      Some(&token),
      Some(payload.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Preferences saved successfully");
    assert_eq!(body["preferences"], payload);

    let (_, body) = send(&state, "GET", "/profiles/get_preferences", Some(&token), None).await;
    assert_eq!(body["preferences"], payload);
  }

  // ── Bookings ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn booking_lifecycle_over_http() {
    let state = make_state().await;
    let (_, seeker) = register(&state, "sam", Role::Seeker).await;
    let (cat_id, cat) = register(&state, "carla", Role::Catalyst).await;
    let (_, eve) = register(&state, "eve", Role::Seeker).await;

    let (status, body) = send(
      &state,
      "POST",
      "/bookings",
      Some(&seeker),
      Some(json!({ "catalyst_id": cat_id, "scheduled_time": "2025-03-01T10:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "REQUESTED");
    let id = body["booking_id"].as_str().unwrap().to_owned();

    let (status, _) = send(&state, "GET", "/bookings/pending", Some(&cat), None).await;
    assert_eq!(status, StatusCode::OK);

    let accept = format!("/bookings/{id}/accept_request");
    let (status, body) = send(&state, "POST", &accept, Some(&seeker), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "authorization_error");

    let (status, body) = send(&state, "POST", &accept, Some(&cat), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Booking request accepted");
    assert_eq!(body["booking"]["status"], "CONFIRMED");

    let (status, body) = send(&state, "POST", &accept, Some(&cat), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("CONFIRMED"));

    let (_, body) = send(&state, "GET", "/bookings/matched", Some(&cat), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    let (_, body) = send(&state, "GET", "/bookings/pending", Some(&cat), None).await;
    assert!(body.as_array().unwrap().is_empty());
    let (_, body) = send(&state, "GET", "/bookings?status=CONFIRMED,BOGUS", Some(&seeker), None).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&state, "GET", &format!("/bookings/{id}"), Some(&eve), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&state, "GET", &format!("/bookings/{id}"), Some(&seeker), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&state, "POST", &format!("/bookings/{id}/complete"), Some(&cat), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["status"], "COMPLETED");

    let remove = format!("/bookings/{id}/delete_booking");
    let (status, _) = send(&state, "DELETE", &remove, Some(&seeker), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let (status, body) = send(&state, "DELETE", &remove, Some(&cat), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["status"], "CANCELLED");
  }

  #[tokio::test]
  async fn seeker_withdraws_pending_request() {
    let state = make_state().await;
    let (_, seeker) = register(&state, "sam", Role::Seeker).await;
    let (cat_id, cat) = register(&state, "carla", Role::Catalyst).await;

    let (_, body) = send(
      &state,
      "POST",
      "/bookings",
      Some(&seeker),
      Some(json!({ "catalyst_id": cat_id, "scheduled_time": "2025-03-01T10:00:00Z" })),
    )
    .await;
    let id = body["booking_id"].as_str().unwrap().to_owned();

    let (status, body) =
      send(&state, "DELETE", &format!("/bookings/{id}/delete_booking"), Some(&seeker), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["booking"]["status"], "CANCELLED");

    let (status, _) =
      send(&state, "POST", &format!("/bookings/{id}/reject_request"), Some(&cat), None).await;
    assert_eq!(status, StatusCode::CONFLICT);
  }

  #[tokio::test]
  async fn malformed_requests_are_validation_errors() {
    let state = make_state().await;
    let (_, seeker) = register(&state, "sam", Role::Seeker).await;

    let (status, body) =
      send(&state, "POST", "/bookings/not-a-uuid/accept_request", Some(&seeker), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");

    let (status, body) =
      send(&state, "POST", "/bookings", Some(&seeker), Some(json!({ "notes": "hi" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "body");

    let (status, body) = send(
      &state,
      "POST",
      "/bookings",
      Some(&seeker),
      Some(json!({ "catalyst_id": Uuid::new_v4(), "scheduled_time": "2025-03-01T10:00:00Z" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
  }

  // ── Messages ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn messaging_gate() {
    let state = make_state().await;
    let (_, seeker) = register(&state, "sam", Role::Seeker).await;
    let (cat_id, cat) = register(&state, "carla", Role::Catalyst).await;
    let (_, eve) = register(&state, "eve", Role::Seeker).await;

    let (_, body) = send(
      &state,
      "POST",
      "/bookings",
      Some(&seeker),
      Some(json!({ "catalyst_id": cat_id, "scheduled_time": "2025-03-01T10:00:00Z" })),
    )
    .await;
    let booking_id = body["booking_id"].as_str().unwrap().to_owned();

    for text in ["hello", "are you free?"] {
      let (status, body) = send(
        &state,
        "POST",
        "/messages",
        Some(&seeker),
        Some(json!({ "booking_id": booking_id, "content": text })),
      )
      .await;
      assert_eq!(status, StatusCode::CREATED);
      assert_eq!(body["is_read"], false);
    }

    let (status, body) = send(
      &state,
      "POST",
      "/messages",
      Some(&seeker),
      Some(json!({ "booking_id": booking_id, "content": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "content");

    let (status, _) = send(
      &state,
      "POST",
      "/messages",
      Some(&eve),
      Some(json!({ "booking_id": booking_id, "content": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let uri = format!("/messages?booking_id={booking_id}");
    let (_, body) = send(&state, "GET", &uri, Some(&eve), None).await;
    assert_eq!(body, json!([]));
    let (_, body) = send(&state, "GET", &uri, Some(&cat), None).await;
    assert_eq!(body[0]["content"], "hello");
    assert_eq!(body[1]["content"], "are you free?");

    let mark = json!({ "booking_id": booking_id });
    let (_, body) = send(&state, "POST", "/messages/mark_as_read", Some(&seeker), Some(mark.clone())).await;
    assert_eq!(body["marked_read"], 0);
    let (_, body) = send(&state, "POST", "/messages/mark_as_read", Some(&cat), Some(mark)).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["marked_read"], 2);

    let (status, body) =
      send(&state, "POST", "/messages/mark_as_read", Some(&cat), Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["field"], "booking_id");
  }

  // ── Ratings ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn ratings_drive_the_catalyst_aggregate() {
    let state = make_state().await;
    let (cat_id, cat) = register(&state, "carla", Role::Catalyst).await;

    let mut first = None;
    for (name, score) in [("s1", 5), ("s2", 4), ("s3", 5)] {
      let (_, token) = register(&state, name, Role::Seeker).await;
      let (status, body) = send(
        &state,
        "POST",
        "/ratings",
        Some(&token),
        Some(json!({ "catalyst_id": cat_id, "rating": score, "review": "great" })),
      )
      .await;
      assert_eq!(status, StatusCode::CREATED);
      first.get_or_insert((token, body["rating_id"].as_str().unwrap().to_owned()));
    }

    let (_, body) = send(&state, "GET", "/profiles/me", Some(&cat), None).await;
    assert_eq!(body["average_rating"], "4.67");
    assert_eq!(body["rating_count"], 3);

    let (s1, rating_id) = first.unwrap();
    let uri = format!("/ratings/{rating_id}");

    let (status, _) = send(&state, "PUT", &uri, Some(&cat), Some(json!({ "rating": 1 }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = send(&state, "PUT", &uri, Some(&s1), Some(json!({ "rating": 3 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rating"], 3);
    let (_, body) = send(&state, "GET", "/profiles/me", Some(&cat), None).await;
    assert_eq!(body["average_rating"], "4.00");

    let (status, _) = send(&state, "DELETE", &uri, Some(&s1), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (_, body) = send(&state, "GET", "/profiles/me", Some(&cat), None).await;
    assert_eq!(body["average_rating"], "4.50");
    assert_eq!(body["rating_count"], 2);

    let (_, body) = send(&state, "GET", "/ratings", Some(&cat), None).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn out_of_range_score_is_rejected() {
    let state = make_state().await;
    let (cat_id, _) = register(&state, "carla", Role::Catalyst).await;
    let (_, seeker) = register(&state, "sam", Role::Seeker).await;

    let (status, body) = send(
      &state,
      "POST",
      "/ratings",
      Some(&seeker),
      Some(json!({ "catalyst_id": cat_id, "rating": 6 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "validation_error");
    assert!(body["error"].as_str().unwrap().contains("between 1 and 5"));
  }
}
