//! [`SqliteStore`], the SQLite implementation of [`MatchStore`].

use std::path::Path;

use matchmaker_core::{
  actor::{Actor, NewActor, Role},
  booking::{Booking, NewBooking, NewService, Service, StatusFilter, Transition},
  message::{Message, NewMessage},
  preferences::Preferences,
  profile::{ProfilePatch, ProfileView},
  rating::{NewRating, Rating, RatingAggregate, RatingUpdate},
  store::MatchStore,
};
use uuid::Uuid;

use crate::{Error, Result, ops, schema::SCHEMA};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A matchmaking store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run `op` on the connection thread and hand back its own result.
  async fn run<T, F>(&self, op: F) -> Result<T>
  where
    T: Send + 'static,
    F: FnOnce(&mut rusqlite::Connection) -> Result<T> + Send + 'static,
  {
    self.conn.call(move |conn| Ok(op(conn))).await?
  }
}

// ─── MatchStore impl ─────────────────────────────────────────────────────────

impl MatchStore for SqliteStore {
  type Error = Error;

  // ── Actors ────────────────────────────────────────────────────────────────

  async fn add_actor(&self, input: NewActor) -> Result<Actor> {
    self.run(move |conn| ops::add_actor(conn, input)).await
  }

  async fn get_actor(&self, actor_id: Uuid) -> Result<Option<Actor>> {
    self.run(move |conn| ops::get_actor(conn, actor_id)).await
  }

  async fn delete_actor(&self, actor_id: Uuid) -> Result<()> {
    self.run(move |conn| ops::delete_actor(conn, actor_id)).await
  }

  async fn add_token(&self, actor_id: Uuid, token_digest: String) -> Result<()> {
    self
      .run(move |conn| ops::add_token(conn, actor_id, token_digest))
      .await
  }

  async fn actor_for_token(&self, token_digest: String) -> Result<Option<Actor>> {
    self
      .run(move |conn| ops::actor_for_token(conn, token_digest))
      .await
  }

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn get_profile(&self, actor_id: Uuid) -> Result<Option<ProfileView>> {
    self.run(move |conn| ops::get_profile(conn, actor_id)).await
  }

  async fn update_profile(&self, actor_id: Uuid, patch: ProfilePatch) -> Result<ProfileView> {
    self
      .run(move |conn| ops::update_profile(conn, actor_id, patch))
      .await
  }

  async fn replace_preferences(
    &self,
    actor_id: Uuid,
    preferences: Preferences,
  ) -> Result<ProfileView> {
    self
      .run(move |conn| ops::replace_preferences(conn, actor_id, preferences))
      .await
  }

  async fn list_profiles(
    &self,
    role: Option<Role>,
    located_only: bool,
  ) -> Result<Vec<ProfileView>> {
    self
      .run(move |conn| ops::list_profiles(conn, role, located_only))
      .await
  }

  // ── Services ──────────────────────────────────────────────────────────────

  async fn add_service(&self, input: NewService) -> Result<Service> {
    self.run(move |conn| ops::add_service(conn, input)).await
  }

  async fn get_service(&self, service_id: Uuid) -> Result<Option<Service>> {
    self.run(move |conn| ops::get_service(conn, service_id)).await
  }

  // ── Bookings ──────────────────────────────────────────────────────────────

  async fn create_booking(&self, seeker_id: Uuid, input: NewBooking) -> Result<Booking> {
    self
      .run(move |conn| ops::create_booking(conn, seeker_id, input))
      .await
  }

  async fn get_booking(&self, booking_id: Uuid) -> Result<Option<Booking>> {
    self.run(move |conn| ops::get_booking(conn, booking_id)).await
  }

  async fn list_bookings(
    &self,
    actor_id: Uuid,
    role: Role,
    filter: StatusFilter,
  ) -> Result<Vec<Booking>> {
    self
      .run(move |conn| ops::list_bookings(conn, actor_id, role, filter))
      .await
  }

  async fn transition_booking(
    &self,
    booking_id: Uuid,
    actor_id: Uuid,
    transition: Transition,
  ) -> Result<Booking> {
    self
      .run(move |conn| ops::transition_booking(conn, booking_id, actor_id, transition))
      .await
  }

  // ── Ratings ───────────────────────────────────────────────────────────────

  async fn create_rating(&self, seeker_id: Uuid, input: NewRating) -> Result<Rating> {
    self
      .run(move |conn| ops::create_rating(conn, seeker_id, input))
      .await
  }

  async fn update_rating(
    &self,
    rating_id: Uuid,
    seeker_id: Uuid,
    input: RatingUpdate,
  ) -> Result<Rating> {
    self
      .run(move |conn| ops::update_rating(conn, rating_id, seeker_id, input))
      .await
  }

  async fn delete_rating(&self, rating_id: Uuid, seeker_id: Uuid) -> Result<()> {
    self
      .run(move |conn| ops::delete_rating(conn, rating_id, seeker_id))
      .await
  }

  async fn list_ratings(&self, actor_id: Uuid) -> Result<Vec<Rating>> {
    self.run(move |conn| ops::list_ratings(conn, actor_id)).await
  }

  async fn recompute_aggregate(&self, catalyst_id: Uuid) -> Result<Option<RatingAggregate>> {
    self
      .run(move |conn| ops::recompute_aggregate(conn, catalyst_id))
      .await
  }

  // ── Messages ──────────────────────────────────────────────────────────────

  async fn send_message(&self, sender_id: Uuid, input: NewMessage) -> Result<Message> {
    self
      .run(move |conn| ops::send_message(conn, sender_id, input))
      .await
  }

  async fn list_messages(&self, actor_id: Uuid, booking_id: Option<Uuid>) -> Result<Vec<Message>> {
    self
      .run(move |conn| ops::list_messages(conn, actor_id, booking_id))
      .await
  }

  async fn mark_read(&self, booking_id: Uuid, reader_id: Uuid) -> Result<usize> {
    self
      .run(move |conn| ops::mark_read(conn, booking_id, reader_id))
      .await
  }
}
