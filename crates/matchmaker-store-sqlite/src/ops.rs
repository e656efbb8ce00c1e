//! Synchronous store operations.
//!
//! Each function runs on the `tokio_rusqlite` connection thread. Anything
//! that reads state, checks a rule against it and then writes opens an
//! `IMMEDIATE` transaction first, so the write lock is held from the read
//! onwards and concurrent callers are serialized.

use chrono::SubsecRound as _;
use matchmaker_core::{
  Error as CoreError,
  actor::{Actor, NewActor, Role},
  booking::{Booking, BookingStatus, NewBooking, NewService, Service, StatusFilter, Transition},
  message::{Message, NewMessage},
  preferences::{self, Preferences},
  profile::{ProfilePatch, ProfileView},
  rating::{NewRating, Rating, RatingAggregate, RatingUpdate},
};
use rusqlite::{Connection, OptionalExtension as _, Transaction, TransactionBehavior, params};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
  Result,
  encode::{
    ACTOR_COLUMNS, BOOKING_COLUMNS, MESSAGE_COLUMNS, PROFILE_COLUMNS, RATING_COLUMNS,
    SERVICE_COLUMNS, RawActor, RawBooking, RawMessage, RawProfile, RawRating, RawService,
    decode_uuid, encode_decimal, encode_dt, encode_json, encode_uuid, now,
  },
};

fn immediate(conn: &mut Connection) -> Result<Transaction<'_>> {
  Ok(conn.transaction_with_behavior(TransactionBehavior::Immediate)?)
}

fn require<T>(found: Option<T>, entity: &'static str, id: Uuid) -> Result<T> {
  found.ok_or_else(|| CoreError::not_found(entity, id).into())
}

// ─── Point lookups ───────────────────────────────────────────────────────────

fn fetch_actor(conn: &Connection, actor_id: Uuid) -> Result<Option<Actor>> {
  conn
    .query_row(
      &format!("SELECT {ACTOR_COLUMNS} FROM actors a WHERE a.actor_id = ?1"),
      params![encode_uuid(actor_id)],
      RawActor::from_row,
    )
    .optional()?
    .map(RawActor::into_actor)
    .transpose()
}

fn fetch_profile(conn: &Connection, actor_id: Uuid) -> Result<Option<ProfileView>> {
  conn
    .query_row(
      &format!(
        "SELECT {PROFILE_COLUMNS}
           FROM actors a JOIN profiles p ON p.actor_id = a.actor_id
          WHERE a.actor_id = ?1"
      ),
      params![encode_uuid(actor_id)],
      RawProfile::from_row,
    )
    .optional()?
    .map(RawProfile::into_view)
    .transpose()
}

fn fetch_service(conn: &Connection, service_id: Uuid) -> Result<Option<Service>> {
  conn
    .query_row(
      &format!("SELECT {SERVICE_COLUMNS} FROM services WHERE service_id = ?1"),
      params![encode_uuid(service_id)],
      RawService::from_row,
    )
    .optional()?
    .map(RawService::into_service)
    .transpose()
}

fn fetch_booking(conn: &Connection, booking_id: Uuid) -> Result<Option<Booking>> {
  conn
    .query_row(
      &format!("SELECT {BOOKING_COLUMNS} FROM bookings b WHERE b.booking_id = ?1"),
      params![encode_uuid(booking_id)],
      RawBooking::from_row,
    )
    .optional()?
    .map(RawBooking::into_booking)
    .transpose()
}

fn fetch_rating(conn: &Connection, rating_id: Uuid) -> Result<Option<Rating>> {
  conn
    .query_row(
      &format!("SELECT {RATING_COLUMNS} FROM ratings WHERE rating_id = ?1"),
      params![encode_uuid(rating_id)],
      RawRating::from_row,
    )
    .optional()?
    .map(RawRating::into_rating)
    .transpose()
}

/// Load an actor and insist on its role.
///
/// A wrong role on the acting side is an authorization failure; on the
/// referenced side it is bad input naming `field`.
fn actor_with_role(
  conn: &Connection,
  actor_id: Uuid,
  role: Role,
  field: Option<&'static str>,
) -> Result<Actor> {
  let entity = match role {
    Role::Seeker => "seeker",
    Role::Catalyst => "catalyst",
  };
  let actor = require(fetch_actor(conn, actor_id)?, entity, actor_id)?;
  if actor.role != role {
    let err = match field {
      Some(field) => CoreError::validation(field, format!("{actor_id} is not a {entity}")),
      None => CoreError::Forbidden(format!("only a {entity} may do this")),
    };
    return Err(err.into());
  }
  Ok(actor)
}

// ─── Actors and tokens ───────────────────────────────────────────────────────

pub fn add_actor(conn: &mut Connection, input: NewActor) -> Result<Actor> {
  input.validate()?;
  let actor = Actor {
    actor_id:     Uuid::new_v4(),
    username:     input.username.trim().to_owned(),
    display_name: input.display_name.trim().to_owned(),
    role:         input.role,
    created_at:   now(),
  };

  let tx = immediate(conn)?;
  let taken: bool = tx
    .query_row(
      "SELECT 1 FROM actors WHERE username = ?1",
      params![actor.username],
      |_| Ok(true),
    )
    .optional()?
    .unwrap_or(false);
  if taken {
    return Err(
      CoreError::Conflict(format!("username {:?} is already taken", actor.username)).into(),
    );
  }

  let id = encode_uuid(actor.actor_id);
  tx.execute(
    "INSERT INTO actors (actor_id, username, display_name, role, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5)",
    params![
      id,
      actor.username,
      actor.display_name,
      actor.role.as_ref(),
      encode_dt(actor.created_at),
    ],
  )?;
  tx.execute("INSERT INTO profiles (actor_id) VALUES (?1)", params![id])?;
  tx.commit()?;

  info!(actor_id = %actor.actor_id, role = %actor.role, "actor created");
  Ok(actor)
}

pub fn get_actor(conn: &mut Connection, actor_id: Uuid) -> Result<Option<Actor>> {
  fetch_actor(conn, actor_id)
}

pub fn delete_actor(conn: &mut Connection, actor_id: Uuid) -> Result<()> {
  let tx = immediate(conn)?;
  require(fetch_actor(&tx, actor_id)?, "actor", actor_id)?;
  let id = encode_uuid(actor_id);

  // Ratings that disappear with this actor, either authored by it or
  // attached to one of its bookings, belong to catalysts whose aggregates
  // must follow.
  let affected: Vec<String> = {
    let mut stmt = tx.prepare(
      "SELECT DISTINCT catalyst_id FROM ratings
        WHERE catalyst_id != ?1
          AND (seeker_id = ?1
               OR booking_id IN (SELECT booking_id FROM bookings
                                  WHERE seeker_id = ?1 OR catalyst_id = ?1))",
    )?;
    stmt
      .query_map(params![id], |row| row.get(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?
  };

  tx.execute("DELETE FROM actors WHERE actor_id = ?1", params![id])?;
  for catalyst in &affected {
    recompute_in(&tx, decode_uuid(catalyst)?)?;
  }
  tx.commit()?;

  info!(%actor_id, recomputed = affected.len(), "actor deleted");
  Ok(())
}

pub fn add_token(conn: &mut Connection, actor_id: Uuid, token_digest: String) -> Result<()> {
  let tx = immediate(conn)?;
  require(fetch_actor(&tx, actor_id)?, "actor", actor_id)?;
  tx.execute(
    "INSERT INTO tokens (token_digest, actor_id, created_at) VALUES (?1, ?2, ?3)",
    params![token_digest, encode_uuid(actor_id), encode_dt(now())],
  )?;
  tx.commit()?;
  Ok(())
}

pub fn actor_for_token(conn: &mut Connection, token_digest: String) -> Result<Option<Actor>> {
  conn
    .query_row(
      &format!(
        "SELECT {ACTOR_COLUMNS}
           FROM tokens t JOIN actors a ON a.actor_id = t.actor_id
          WHERE t.token_digest = ?1"
      ),
      params![token_digest],
      RawActor::from_row,
    )
    .optional()?
    .map(RawActor::into_actor)
    .transpose()
}

// ─── Profiles ────────────────────────────────────────────────────────────────

pub fn get_profile(conn: &mut Connection, actor_id: Uuid) -> Result<Option<ProfileView>> {
  fetch_profile(conn, actor_id)
}

pub fn update_profile(
  conn: &mut Connection,
  actor_id: Uuid,
  patch: ProfilePatch,
) -> Result<ProfileView> {
  let tx = immediate(conn)?;
  let view = require(fetch_profile(&tx, actor_id)?, "profile", actor_id)?;
  let next = patch.apply(&view.profile)?;

  tx.execute(
    "UPDATE profiles
        SET bio = ?2, bio_short = ?3, is_active = ?4, latitude = ?5, longitude = ?6,
            address = ?7, hourly_rate = ?8, specializations = ?9
      WHERE actor_id = ?1",
    params![
      encode_uuid(actor_id),
      next.bio,
      next.bio_short,
      next.is_active,
      next.coordinate.map(|c| c.latitude),
      next.coordinate.map(|c| c.longitude),
      next.address,
      next.hourly_rate.map(encode_decimal),
      encode_json(&next.specializations)?,
    ],
  )?;
  tx.commit()?;

  debug!(%actor_id, "profile updated");
  Ok(ProfileView { actor: view.actor, profile: next })
}

pub fn replace_preferences(
  conn: &mut Connection,
  actor_id: Uuid,
  preferences: Preferences,
) -> Result<ProfileView> {
  let tx = immediate(conn)?;
  let changed = tx.execute(
    "UPDATE profiles SET preferences = ?2 WHERE actor_id = ?1",
    params![encode_uuid(actor_id), encode_json(&preferences)?],
  )?;
  if changed == 0 {
    return Err(CoreError::not_found("profile", actor_id).into());
  }
  let view = require(fetch_profile(&tx, actor_id)?, "profile", actor_id)?;
  tx.commit()?;
  Ok(view)
}

pub fn list_profiles(
  conn: &mut Connection,
  role: Option<Role>,
  located_only: bool,
) -> Result<Vec<ProfileView>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {PROFILE_COLUMNS}
       FROM actors a JOIN profiles p ON p.actor_id = a.actor_id
      WHERE (?1 IS NULL OR a.role = ?1)
        AND (?2 = 0 OR p.latitude IS NOT NULL)
      ORDER BY a.created_at, a.actor_id"
  ))?;
  let raws = stmt
    .query_map(
      params![role.map(|r| r.as_ref().to_owned()), located_only],
      RawProfile::from_row,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawProfile::into_view).collect()
}

// ─── Services ────────────────────────────────────────────────────────────────

pub fn add_service(conn: &mut Connection, input: NewService) -> Result<Service> {
  if input.name.trim().is_empty() {
    return Err(CoreError::validation("name", "must not be empty").into());
  }
  if input.price < Decimal::ZERO {
    return Err(CoreError::validation("price", "must not be negative").into());
  }

  let tx = immediate(conn)?;
  actor_with_role(&tx, input.catalyst_id, Role::Catalyst, Some("catalyst_id"))?;
  let service = Service {
    service_id:       Uuid::new_v4(),
    catalyst_id:      input.catalyst_id,
    name:             input.name.trim().to_owned(),
    description:      input.description,
    price:            input.price,
    duration_minutes: input.duration_minutes,
  };
  tx.execute(
    "INSERT INTO services (service_id, catalyst_id, name, description, price, duration_minutes)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    params![
      encode_uuid(service.service_id),
      encode_uuid(service.catalyst_id),
      service.name,
      service.description,
      encode_decimal(service.price),
      service.duration_minutes,
    ],
  )?;
  tx.commit()?;
  Ok(service)
}

pub fn get_service(conn: &mut Connection, service_id: Uuid) -> Result<Option<Service>> {
  fetch_service(conn, service_id)
}

// ─── Bookings ────────────────────────────────────────────────────────────────

pub fn create_booking(conn: &mut Connection, seeker_id: Uuid, input: NewBooking) -> Result<Booking> {
  let tx = immediate(conn)?;
  actor_with_role(&tx, seeker_id, Role::Seeker, None)?;
  actor_with_role(&tx, input.catalyst_id, Role::Catalyst, Some("catalyst_id"))?;

  if let Some(service_id) = input.service_id {
    let service = require(fetch_service(&tx, service_id)?, "service", service_id)?;
    if service.catalyst_id != input.catalyst_id {
      return Err(
        CoreError::validation("service_id", "is not offered by this catalyst").into(),
      );
    }
  }

  let seeker_preferences = match input.seeker_preferences {
    Some(submitted) => preferences::validate(submitted.into())?,
    None => require(fetch_profile(&tx, seeker_id)?, "profile", seeker_id)?.profile.preferences,
  };

  let booking = Booking {
    booking_id: Uuid::new_v4(),
    seeker_id,
    catalyst_id: input.catalyst_id,
    service_id: input.service_id,
    status: BookingStatus::Requested,
    scheduled_time: input.scheduled_time.trunc_subsecs(6),
    notes: input.notes,
    seeker_preferences,
    created_at: now(),
  };
  tx.execute(
    "INSERT INTO bookings (booking_id, seeker_id, catalyst_id, service_id, status,
                           scheduled_time, notes, seeker_preferences, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
    params![
      encode_uuid(booking.booking_id),
      encode_uuid(booking.seeker_id),
      encode_uuid(booking.catalyst_id),
      booking.service_id.map(encode_uuid),
      booking.status.as_ref(),
      encode_dt(booking.scheduled_time),
      booking.notes,
      encode_json(&booking.seeker_preferences)?,
      encode_dt(booking.created_at),
    ],
  )?;
  tx.commit()?;

  info!(
    booking_id = %booking.booking_id,
    seeker_id = %booking.seeker_id,
    catalyst_id = %booking.catalyst_id,
    "booking requested"
  );
  Ok(booking)
}

pub fn get_booking(conn: &mut Connection, booking_id: Uuid) -> Result<Option<Booking>> {
  fetch_booking(conn, booking_id)
}

pub fn list_bookings(
  conn: &mut Connection,
  actor_id: Uuid,
  role: Role,
  filter: StatusFilter,
) -> Result<Vec<Booking>> {
  let column = match role {
    Role::Seeker => "seeker_id",
    Role::Catalyst => "catalyst_id",
  };
  let mut stmt = conn.prepare(&format!(
    "SELECT {BOOKING_COLUMNS} FROM bookings b
      WHERE b.{column} = ?1
      ORDER BY b.created_at DESC, b.rowid DESC"
  ))?;
  let raws = stmt
    .query_map(params![encode_uuid(actor_id)], RawBooking::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;

  let mut bookings = Vec::with_capacity(raws.len());
  for raw in raws {
    let booking = raw.into_booking()?;
    if filter.matches(booking.status) {
      bookings.push(booking);
    }
  }
  Ok(bookings)
}

pub fn transition_booking(
  conn: &mut Connection,
  booking_id: Uuid,
  actor_id: Uuid,
  transition: Transition,
) -> Result<Booking> {
  let tx = immediate(conn)?;
  let mut booking = require(fetch_booking(&tx, booking_id)?, "booking", booking_id)?;
  let from = booking.status;
  let to = transition.check(booking.party_of(actor_id), from)?;

  // Compare-and-set on the status just read.
  let changed = tx.execute(
    "UPDATE bookings SET status = ?1 WHERE booking_id = ?2 AND status = ?3",
    params![to.as_ref(), encode_uuid(booking_id), from.as_ref()],
  )?;
  if changed != 1 {
    return Err(
      CoreError::Conflict(format!(
        "cannot {} booking: status changed concurrently",
        transition.rule().verb
      ))
      .into(),
    );
  }
  tx.commit()?;

  info!(%booking_id, %actor_id, %transition, %from, %to, "booking transition");
  booking.status = to;
  Ok(booking)
}

// ─── Ratings ─────────────────────────────────────────────────────────────────

/// Recompute and store a catalyst's aggregate inside the caller's
/// transaction.
///
/// A missing profile is tolerated: the catalyst was deleted concurrently,
/// so there is nothing left to update.
fn recompute_in(conn: &Connection, catalyst_id: Uuid) -> Result<Option<RatingAggregate>> {
  let id = encode_uuid(catalyst_id);
  let scores = {
    let mut stmt = conn.prepare("SELECT rating FROM ratings WHERE catalyst_id = ?1")?;
    stmt
      .query_map(params![id], |row| row.get::<_, u8>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?
  };
  let aggregate = RatingAggregate::from_scores(scores);

  let changed = conn.execute(
    "UPDATE profiles SET average_rating = ?2, rating_count = ?3 WHERE actor_id = ?1",
    params![id, encode_decimal(aggregate.average_rating), aggregate.rating_count],
  )?;
  if changed == 0 {
    warn!(%catalyst_id, "aggregate recompute skipped: profile no longer exists");
    return Ok(None);
  }
  debug!(
    %catalyst_id,
    average = %aggregate.average_rating,
    count = aggregate.rating_count,
    "aggregate recomputed"
  );
  Ok(Some(aggregate))
}

pub fn recompute_aggregate(
  conn: &mut Connection,
  catalyst_id: Uuid,
) -> Result<Option<RatingAggregate>> {
  let tx = immediate(conn)?;
  let aggregate = recompute_in(&tx, catalyst_id)?;
  tx.commit()?;
  Ok(aggregate)
}

fn owned_rating(conn: &Connection, rating_id: Uuid, seeker_id: Uuid, verb: &str) -> Result<Rating> {
  let rating = require(fetch_rating(conn, rating_id)?, "rating", rating_id)?;
  if rating.seeker_id != seeker_id {
    return Err(CoreError::Forbidden(format!("only the author of a rating may {verb} it")).into());
  }
  Ok(rating)
}

pub fn create_rating(conn: &mut Connection, seeker_id: Uuid, input: NewRating) -> Result<Rating> {
  let tx = immediate(conn)?;
  actor_with_role(&tx, seeker_id, Role::Seeker, None)?;
  actor_with_role(&tx, input.catalyst_id, Role::Catalyst, Some("catalyst_id"))?;

  if let Some(booking_id) = input.booking_id {
    let booking = require(fetch_booking(&tx, booking_id)?, "booking", booking_id)?;
    if booking.seeker_id != seeker_id || booking.catalyst_id != input.catalyst_id {
      return Err(
        CoreError::validation("booking_id", "does not join this seeker and catalyst").into(),
      );
    }
  }

  // Only booking-linked ratings are unique; unlinked ones may repeat.
  if let Some(booking_id) = input.booking_id {
    let duplicate: bool = tx
      .query_row(
        "SELECT 1 FROM ratings WHERE seeker_id = ?1 AND catalyst_id = ?2 AND booking_id = ?3",
        params![
          encode_uuid(seeker_id),
          encode_uuid(input.catalyst_id),
          encode_uuid(booking_id),
        ],
        |_| Ok(true),
      )
      .optional()?
      .unwrap_or(false);
    if duplicate {
      return Err(
        CoreError::Conflict("this seeker has already rated this catalyst for this booking".into())
          .into(),
      );
    }
  }

  let created_at = now();
  let rating = Rating {
    rating_id: Uuid::new_v4(),
    seeker_id,
    catalyst_id: input.catalyst_id,
    booking_id: input.booking_id,
    rating: input.rating,
    review: input.review,
    created_at,
    updated_at: created_at,
  };
  tx.execute(
    "INSERT INTO ratings (rating_id, seeker_id, catalyst_id, booking_id, rating, review,
                          created_at, updated_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    params![
      encode_uuid(rating.rating_id),
      encode_uuid(rating.seeker_id),
      encode_uuid(rating.catalyst_id),
      rating.booking_id.map(encode_uuid),
      rating.rating.get(),
      rating.review,
      encode_dt(rating.created_at),
      encode_dt(rating.updated_at),
    ],
  )?;
  recompute_in(&tx, rating.catalyst_id)?;
  tx.commit()?;

  info!(
    rating_id = %rating.rating_id,
    catalyst_id = %rating.catalyst_id,
    score = rating.rating.get(),
    "rating created"
  );
  Ok(rating)
}

pub fn update_rating(
  conn: &mut Connection,
  rating_id: Uuid,
  seeker_id: Uuid,
  input: RatingUpdate,
) -> Result<Rating> {
  let tx = immediate(conn)?;
  let mut rating = owned_rating(&tx, rating_id, seeker_id, "change")?;
  rating.rating = input.rating;
  rating.review = input.review;
  rating.updated_at = now();

  tx.execute(
    "UPDATE ratings SET rating = ?2, review = ?3, updated_at = ?4 WHERE rating_id = ?1",
    params![
      encode_uuid(rating_id),
      rating.rating.get(),
      rating.review,
      encode_dt(rating.updated_at),
    ],
  )?;
  recompute_in(&tx, rating.catalyst_id)?;
  tx.commit()?;

  info!(%rating_id, catalyst_id = %rating.catalyst_id, score = rating.rating.get(), "rating updated");
  Ok(rating)
}

pub fn delete_rating(conn: &mut Connection, rating_id: Uuid, seeker_id: Uuid) -> Result<()> {
  let tx = immediate(conn)?;
  let rating = owned_rating(&tx, rating_id, seeker_id, "delete")?;
  tx.execute("DELETE FROM ratings WHERE rating_id = ?1", params![encode_uuid(rating_id)])?;
  recompute_in(&tx, rating.catalyst_id)?;
  tx.commit()?;

  info!(%rating_id, catalyst_id = %rating.catalyst_id, "rating deleted");
  Ok(())
}

pub fn list_ratings(conn: &mut Connection, actor_id: Uuid) -> Result<Vec<Rating>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {RATING_COLUMNS} FROM ratings
      WHERE seeker_id = ?1 OR catalyst_id = ?1
      ORDER BY created_at DESC, rowid DESC"
  ))?;
  let raws = stmt
    .query_map(params![encode_uuid(actor_id)], RawRating::from_row)?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawRating::into_rating).collect()
}

// ─── Messages ────────────────────────────────────────────────────────────────

pub fn send_message(conn: &mut Connection, sender_id: Uuid, input: NewMessage) -> Result<Message> {
  input.validate()?;
  let tx = immediate(conn)?;
  let booking = require(fetch_booking(&tx, input.booking_id)?, "booking", input.booking_id)?;
  if !booking.involves(sender_id) {
    return Err(CoreError::Forbidden("not a party to this booking".into()).into());
  }

  let message = Message {
    message_id: Uuid::new_v4(),
    booking_id: booking.booking_id,
    sender_id,
    content: input.content,
    timestamp: now(),
    is_read: false,
  };
  tx.execute(
    "INSERT INTO messages (message_id, booking_id, sender_id, content, timestamp, is_read)
     VALUES (?1, ?2, ?3, ?4, ?5, 0)",
    params![
      encode_uuid(message.message_id),
      encode_uuid(message.booking_id),
      encode_uuid(message.sender_id),
      message.content,
      encode_dt(message.timestamp),
    ],
  )?;
  tx.commit()?;

  debug!(message_id = %message.message_id, booking_id = %message.booking_id, "message sent");
  Ok(message)
}

pub fn list_messages(
  conn: &mut Connection,
  actor_id: Uuid,
  booking_id: Option<Uuid>,
) -> Result<Vec<Message>> {
  let mut stmt = conn.prepare(&format!(
    "SELECT {MESSAGE_COLUMNS}
       FROM messages m JOIN bookings b ON b.booking_id = m.booking_id
      WHERE (b.seeker_id = ?1 OR b.catalyst_id = ?1)
        AND (?2 IS NULL OR m.booking_id = ?2)
      ORDER BY m.timestamp ASC, m.rowid ASC"
  ))?;
  let raws = stmt
    .query_map(
      params![encode_uuid(actor_id), booking_id.map(encode_uuid)],
      RawMessage::from_row,
    )?
    .collect::<rusqlite::Result<Vec<_>>>()?;
  raws.into_iter().map(RawMessage::into_message).collect()
}

pub fn mark_read(conn: &mut Connection, booking_id: Uuid, reader_id: Uuid) -> Result<usize> {
  let reader = encode_uuid(reader_id);
  let changed = conn.execute(
    "UPDATE messages SET is_read = 1
      WHERE booking_id = ?1
        AND is_read = 0
        AND sender_id != ?2
        AND EXISTS (SELECT 1 FROM bookings b
                     WHERE b.booking_id = ?1
                       AND (b.seeker_id = ?2 OR b.catalyst_id = ?2))",
    params![encode_uuid(booking_id), reader],
  )?;
  debug!(%booking_id, %reader_id, changed, "messages marked read");
  Ok(changed)
}
