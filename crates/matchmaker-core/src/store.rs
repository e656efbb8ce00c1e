//! The `MatchStore` trait.
//!
//! Implemented by storage backends (e.g. `matchmaker-store-sqlite`). The HTTP
//! layer depends on this abstraction, not on any concrete backend.
//!
//! Operations that read, check and then write (booking transitions, rating
//! writes, profile updates) must do so atomically: a backend runs the whole
//! sequence in one transaction so concurrent callers cannot interleave.

use std::future::Future;

use uuid::Uuid;

use crate::{
  actor::{Actor, NewActor, Role},
  booking::{Booking, NewBooking, NewService, Service, StatusFilter, Transition},
  error::Classify,
  message::{Message, NewMessage},
  preferences::Preferences,
  profile::{ProfilePatch, ProfileView},
  rating::{NewRating, Rating, RatingAggregate, RatingUpdate},
};

/// Abstraction over a matchmaking store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait MatchStore: Send + Sync {
  type Error: std::error::Error + Classify + Send + Sync + 'static;

  // ── Actors ────────────────────────────────────────────────────────────

  /// Create an actor together with its empty profile.
  fn add_actor(
    &self,
    input: NewActor,
  ) -> impl Future<Output = Result<Actor, Self::Error>> + Send + '_;

  fn get_actor(
    &self,
    actor_id: Uuid,
  ) -> impl Future<Output = Result<Option<Actor>, Self::Error>> + Send + '_;

  /// Delete an actor. Profile, tokens, services, bookings, messages and
  /// ratings go with it; catalyst aggregates touched by the removed
  /// ratings are recomputed in the same transaction.
  fn delete_actor(
    &self,
    actor_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Register an API token for an actor. Only the digest is stored.
  fn add_token(
    &self,
    actor_id: Uuid,
    token_digest: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Resolve a token digest to the actor it was issued to.
  fn actor_for_token(
    &self,
    token_digest: String,
  ) -> impl Future<Output = Result<Option<Actor>, Self::Error>> + Send + '_;

  // ── Profiles ──────────────────────────────────────────────────────────

  fn get_profile(
    &self,
    actor_id: Uuid,
  ) -> impl Future<Output = Result<Option<ProfileView>, Self::Error>> + Send + '_;

  /// Merge `patch` onto the actor's profile and persist the result.
  fn update_profile(
    &self,
    actor_id: Uuid,
    patch: ProfilePatch,
  ) -> impl Future<Output = Result<ProfileView, Self::Error>> + Send + '_;

  /// Replace the stored preferences mapping as one unit. Callers validate
  /// first (see [`crate::preferences::validate`]).
  fn replace_preferences(
    &self,
    actor_id: Uuid,
    preferences: Preferences,
  ) -> impl Future<Output = Result<ProfileView, Self::Error>> + Send + '_;

  /// List profiles, optionally restricted to one role and/or to profiles
  /// that have a coordinate.
  fn list_profiles(
    &self,
    role: Option<Role>,
    located_only: bool,
  ) -> impl Future<Output = Result<Vec<ProfileView>, Self::Error>> + Send + '_;

  // ── Services ──────────────────────────────────────────────────────────

  fn add_service(
    &self,
    input: NewService,
  ) -> impl Future<Output = Result<Service, Self::Error>> + Send + '_;

  fn get_service(
    &self,
    service_id: Uuid,
  ) -> impl Future<Output = Result<Option<Service>, Self::Error>> + Send + '_;

  // ── Bookings ──────────────────────────────────────────────────────────

  /// Create a booking in `REQUESTED` on behalf of `seeker_id`.
  fn create_booking(
    &self,
    seeker_id: Uuid,
    input: NewBooking,
  ) -> impl Future<Output = Result<Booking, Self::Error>> + Send + '_;

  fn get_booking(
    &self,
    booking_id: Uuid,
  ) -> impl Future<Output = Result<Option<Booking>, Self::Error>> + Send + '_;

  /// Bookings where `actor_id` stands as `role`, newest first.
  fn list_bookings(
    &self,
    actor_id: Uuid,
    role: Role,
    filter: StatusFilter,
  ) -> impl Future<Output = Result<Vec<Booking>, Self::Error>> + Send + '_;

  /// Apply `transition` as `actor_id`. The status check and the write are a
  /// single compare-and-set; of two racing transitions from the same
  /// status exactly one succeeds.
  fn transition_booking(
    &self,
    booking_id: Uuid,
    actor_id: Uuid,
    transition: Transition,
  ) -> impl Future<Output = Result<Booking, Self::Error>> + Send + '_;

  // ── Ratings ───────────────────────────────────────────────────────────

  /// Record a rating and recompute the catalyst's aggregate atomically.
  fn create_rating(
    &self,
    seeker_id: Uuid,
    input: NewRating,
  ) -> impl Future<Output = Result<Rating, Self::Error>> + Send + '_;

  /// Change a rating (owner only) and recompute the aggregate atomically.
  fn update_rating(
    &self,
    rating_id: Uuid,
    seeker_id: Uuid,
    input: RatingUpdate,
  ) -> impl Future<Output = Result<Rating, Self::Error>> + Send + '_;

  /// Delete a rating (owner only) and recompute the aggregate atomically.
  fn delete_rating(
    &self,
    rating_id: Uuid,
    seeker_id: Uuid,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Ratings given or received by `actor_id`, newest first.
  fn list_ratings(
    &self,
    actor_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Rating>, Self::Error>> + Send + '_;

  /// Recompute a catalyst's aggregate from its current ratings.
  ///
  /// Returns `None` without error when the profile no longer exists.
  fn recompute_aggregate(
    &self,
    catalyst_id: Uuid,
  ) -> impl Future<Output = Result<Option<RatingAggregate>, Self::Error>> + Send + '_;

  // ── Messages ──────────────────────────────────────────────────────────

  /// Store a message from `sender_id`, who must be a party to the booking.
  fn send_message(
    &self,
    sender_id: Uuid,
    input: NewMessage,
  ) -> impl Future<Output = Result<Message, Self::Error>> + Send + '_;

  /// Messages on bookings where `actor_id` is seeker or catalyst, oldest
  /// first, optionally narrowed to one booking. Non-parties get nothing.
  fn list_messages(
    &self,
    actor_id: Uuid,
    booking_id: Option<Uuid>,
  ) -> impl Future<Output = Result<Vec<Message>, Self::Error>> + Send + '_;

  /// Mark every unread message in the booking not sent by `reader_id` as
  /// read; returns how many changed. Non-parties change nothing.
  fn mark_read(
    &self,
    booking_id: Uuid,
    reader_id: Uuid,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;
}
