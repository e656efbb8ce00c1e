//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are fixed-width RFC 3339 (microseconds, `Z`) so that text
//! order equals time order. Decimals are canonical decimal text. UUIDs are
//! hyphenated lowercase strings. Lists and preference maps are compact JSON.

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use matchmaker_core::{
  actor::{Actor, Role},
  booking::{Booking, BookingStatus, Service},
  message::Message,
  preferences::Preferences,
  profile::{Coordinate, Profile, ProfileView},
  rating::{Rating, Score},
};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

/// The current time at the precision the store keeps.
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_decimal(d: Decimal) -> String { d.to_string() }

pub fn decode_decimal(s: &str) -> Result<Decimal> { Ok(Decimal::from_str(s)?) }

pub fn decode_role(s: &str) -> Result<Role> {
  Role::from_str(s).map_err(|_| matchmaker_core::Error::UnknownRole(s.to_owned()).into())
}

pub fn decode_status(s: &str) -> Result<BookingStatus> {
  BookingStatus::from_str(s)
    .map_err(|_| matchmaker_core::Error::UnknownStatus(s.to_owned()).into())
}

pub fn encode_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

fn decode_preferences(s: &str) -> Result<Preferences> { Ok(serde_json::from_str(s)?) }

// ─── Column lists ────────────────────────────────────────────────────────────
//
// Each `Raw*::from_row` reads columns in exactly this order.

pub const ACTOR_COLUMNS: &str = "a.actor_id, a.username, a.display_name, a.role, a.created_at";

pub const PROFILE_COLUMNS: &str = "a.actor_id, a.username, a.display_name, a.role, a.created_at,
   p.bio, p.bio_short, p.is_active, p.latitude, p.longitude, p.address,
   p.hourly_rate, p.specializations, p.preferences, p.average_rating, p.rating_count";

pub const SERVICE_COLUMNS: &str =
  "service_id, catalyst_id, name, description, price, duration_minutes";

pub const BOOKING_COLUMNS: &str = "b.booking_id, b.seeker_id, b.catalyst_id, b.service_id,
   b.status, b.scheduled_time, b.notes, b.seeker_preferences, b.created_at";

pub const RATING_COLUMNS: &str = "rating_id, seeker_id, catalyst_id, booking_id, rating,
   review, created_at, updated_at";

pub const MESSAGE_COLUMNS: &str =
  "m.message_id, m.booking_id, m.sender_id, m.content, m.timestamp, m.is_read";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `actors` row.
pub struct RawActor {
  pub actor_id:     String,
  pub username:     String,
  pub display_name: String,
  pub role:         String,
  pub created_at:   String,
}

impl RawActor {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      actor_id:     row.get(0)?,
      username:     row.get(1)?,
      display_name: row.get(2)?,
      role:         row.get(3)?,
      created_at:   row.get(4)?,
    })
  }

  pub fn into_actor(self) -> Result<Actor> {
    Ok(Actor {
      actor_id:     decode_uuid(&self.actor_id)?,
      username:     self.username,
      display_name: self.display_name,
      role:         decode_role(&self.role)?,
      created_at:   decode_dt(&self.created_at)?,
    })
  }
}

/// An `actors` row joined with its `profiles` row.
pub struct RawProfile {
  pub actor:           RawActor,
  pub bio:             String,
  pub bio_short:       String,
  pub is_active:       bool,
  pub latitude:        Option<f64>,
  pub longitude:       Option<f64>,
  pub address:         String,
  pub hourly_rate:     Option<String>,
  pub specializations: String,
  pub preferences:     String,
  pub average_rating:  String,
  pub rating_count:    u32,
}

impl RawProfile {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      actor:           RawActor::from_row(row)?,
      bio:             row.get(5)?,
      bio_short:       row.get(6)?,
      is_active:       row.get(7)?,
      latitude:        row.get(8)?,
      longitude:       row.get(9)?,
      address:         row.get(10)?,
      hourly_rate:     row.get(11)?,
      specializations: row.get(12)?,
      preferences:     row.get(13)?,
      average_rating:  row.get(14)?,
      rating_count:    row.get(15)?,
    })
  }

  pub fn into_view(self) -> Result<ProfileView> {
    let actor = self.actor.into_actor()?;
    let coordinate = match (self.latitude, self.longitude) {
      (Some(latitude), Some(longitude)) => Some(Coordinate { latitude, longitude }),
      _ => None,
    };
    let profile = Profile {
      actor_id: actor.actor_id,
      bio: self.bio,
      bio_short: self.bio_short,
      is_active: self.is_active,
      coordinate,
      address: self.address,
      hourly_rate: self.hourly_rate.as_deref().map(decode_decimal).transpose()?,
      specializations: serde_json::from_str(&self.specializations)?,
      preferences: decode_preferences(&self.preferences)?,
      average_rating: decode_decimal(&self.average_rating)?,
      rating_count: self.rating_count,
    };
    Ok(ProfileView { actor, profile })
  }
}

pub struct RawService {
  pub service_id:       String,
  pub catalyst_id:      String,
  pub name:             String,
  pub description:      String,
  pub price:            String,
  pub duration_minutes: u32,
}

impl RawService {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      service_id:       row.get(0)?,
      catalyst_id:      row.get(1)?,
      name:             row.get(2)?,
      description:      row.get(3)?,
      price:            row.get(4)?,
      duration_minutes: row.get(5)?,
    })
  }

  pub fn into_service(self) -> Result<Service> {
    Ok(Service {
      service_id:       decode_uuid(&self.service_id)?,
      catalyst_id:      decode_uuid(&self.catalyst_id)?,
      name:             self.name,
      description:      self.description,
      price:            decode_decimal(&self.price)?,
      duration_minutes: self.duration_minutes,
    })
  }
}

pub struct RawBooking {
  pub booking_id:         String,
  pub seeker_id:          String,
  pub catalyst_id:        String,
  pub service_id:         Option<String>,
  pub status:             String,
  pub scheduled_time:     String,
  pub notes:              String,
  pub seeker_preferences: String,
  pub created_at:         String,
}

impl RawBooking {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      booking_id:         row.get(0)?,
      seeker_id:          row.get(1)?,
      catalyst_id:        row.get(2)?,
      service_id:         row.get(3)?,
      status:             row.get(4)?,
      scheduled_time:     row.get(5)?,
      notes:              row.get(6)?,
      seeker_preferences: row.get(7)?,
      created_at:         row.get(8)?,
    })
  }

  pub fn into_booking(self) -> Result<Booking> {
    Ok(Booking {
      booking_id:         decode_uuid(&self.booking_id)?,
      seeker_id:          decode_uuid(&self.seeker_id)?,
      catalyst_id:        decode_uuid(&self.catalyst_id)?,
      service_id:         self.service_id.as_deref().map(decode_uuid).transpose()?,
      status:             decode_status(&self.status)?,
      scheduled_time:     decode_dt(&self.scheduled_time)?,
      notes:              self.notes,
      seeker_preferences: decode_preferences(&self.seeker_preferences)?,
      created_at:         decode_dt(&self.created_at)?,
    })
  }
}

pub struct RawRating {
  pub rating_id:   String,
  pub seeker_id:   String,
  pub catalyst_id: String,
  pub booking_id:  Option<String>,
  pub rating:      i64,
  pub review:      String,
  pub created_at:  String,
  pub updated_at:  String,
}

impl RawRating {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      rating_id:   row.get(0)?,
      seeker_id:   row.get(1)?,
      catalyst_id: row.get(2)?,
      booking_id:  row.get(3)?,
      rating:      row.get(4)?,
      review:      row.get(5)?,
      created_at:  row.get(6)?,
      updated_at:  row.get(7)?,
    })
  }

  pub fn into_rating(self) -> Result<Rating> {
    Ok(Rating {
      rating_id:   decode_uuid(&self.rating_id)?,
      seeker_id:   decode_uuid(&self.seeker_id)?,
      catalyst_id: decode_uuid(&self.catalyst_id)?,
      booking_id:  self.booking_id.as_deref().map(decode_uuid).transpose()?,
      rating:      Score::new(self.rating)?,
      review:      self.review,
      created_at:  decode_dt(&self.created_at)?,
      updated_at:  decode_dt(&self.updated_at)?,
    })
  }
}

pub struct RawMessage {
  pub message_id: String,
  pub booking_id: String,
  pub sender_id:  String,
  pub content:    String,
  pub timestamp:  String,
  pub is_read:    bool,
}

impl RawMessage {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      message_id: row.get(0)?,
      booking_id: row.get(1)?,
      sender_id:  row.get(2)?,
      content:    row.get(3)?,
      timestamp:  row.get(4)?,
      is_read:    row.get(5)?,
    })
  }

  pub fn into_message(self) -> Result<Message> {
    Ok(Message {
      message_id: decode_uuid(&self.message_id)?,
      booking_id: decode_uuid(&self.booking_id)?,
      sender_id:  decode_uuid(&self.sender_id)?,
      content:    self.content,
      timestamp:  decode_dt(&self.timestamp)?,
      is_read:    self.is_read,
    })
  }
}
