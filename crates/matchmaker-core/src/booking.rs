//! Bookings and the state machine that governs them.
//!
//! ```text
//! REQUESTED ──accept──▶ CONFIRMED ──complete──▶ COMPLETED
//!     │                     │                       │
//!     ├─reject / cancel     └──────remove───────────┤
//!     ▼                                             ▼
//! CANCELLED ◀───────────────────────────────────────┘
//! ```
//!
//! Every transition is described by one row of [`Transition::rule`]: which
//! party may fire it, from which statuses, and where it lands. Nothing else
//! in the workspace branches on role for booking mutations.

use std::{collections::BTreeSet, str::FromStr};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result, actor::Role, preferences::Preferences};

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
  Requested,
  Confirmed,
  Completed,
  Cancelled,
}

impl BookingStatus {
  pub fn is_terminal(self) -> bool { matches!(self, Self::Completed | Self::Cancelled) }
}

// ─── Service ─────────────────────────────────────────────────────────────────

/// A package a catalyst offers; bookings may reference one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
  pub service_id:       Uuid,
  pub catalyst_id:      Uuid,
  pub name:             String,
  pub description:      String,
  pub price:            Decimal,
  pub duration_minutes: u32,
}

#[derive(Debug, Clone)]
pub struct NewService {
  pub catalyst_id:      Uuid,
  pub name:             String,
  pub description:      String,
  pub price:            Decimal,
  pub duration_minutes: u32,
}

// ─── Booking ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
  pub booking_id:         Uuid,
  pub seeker_id:          Uuid,
  pub catalyst_id:        Uuid,
  pub service_id:         Option<Uuid>,
  pub status:             BookingStatus,
  pub scheduled_time:     DateTime<Utc>,
  pub notes:              String,
  /// Snapshot of the seeker's preferences when the booking was made.
  pub seeker_preferences: Preferences,
  pub created_at:         DateTime<Utc>,
}

impl Booking {
  /// Which side of this booking `actor_id` is on, if either.
  pub fn party_of(&self, actor_id: Uuid) -> Option<Role> {
    party_of(self.seeker_id, self.catalyst_id, actor_id)
  }

  pub fn involves(&self, actor_id: Uuid) -> bool { self.party_of(actor_id).is_some() }
}

/// Which side of a booking between `seeker_id` and `catalyst_id` the actor
/// is on.
pub fn party_of(seeker_id: Uuid, catalyst_id: Uuid, actor_id: Uuid) -> Option<Role> {
  if actor_id == seeker_id {
    Some(Role::Seeker)
  } else if actor_id == catalyst_id {
    Some(Role::Catalyst)
  } else {
    None
  }
}

/// Input to [`crate::store::MatchStore::create_booking`]. The seeker is the
/// authenticated caller and is passed separately.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
  pub catalyst_id:        Uuid,
  pub service_id:         Option<Uuid>,
  pub scheduled_time:     DateTime<Utc>,
  #[serde(default)]
  pub notes:              String,
  /// Taken from the seeker's stored preferences when absent.
  pub seeker_preferences: Option<Preferences>,
}

// ─── Transitions ─────────────────────────────────────────────────────────────

/// A named move through the booking state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Transition {
  Accept,
  Reject,
  SeekerCancel,
  Complete,
  CatalystRemove,
}

/// One row of the authorization table.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
  pub party: Role,
  pub from:  &'static [BookingStatus],
  pub to:    BookingStatus,
  /// Verb used in conflict messages ("cannot accept booking ...").
  pub verb:  &'static str,
}

impl Transition {
  pub const fn rule(self) -> Rule {
    use BookingStatus::*;
    match self {
      Self::Accept => Rule {
        party: Role::Catalyst,
        from:  &[Requested],
        to:    Confirmed,
        verb:  "accept",
      },
      Self::Reject => Rule {
        party: Role::Catalyst,
        from:  &[Requested],
        to:    Cancelled,
        verb:  "reject",
      },
      Self::SeekerCancel => Rule {
        party: Role::Seeker,
        from:  &[Requested],
        to:    Cancelled,
        verb:  "cancel",
      },
      Self::Complete => Rule {
        party: Role::Catalyst,
        from:  &[Confirmed],
        to:    Completed,
        verb:  "complete",
      },
      Self::CatalystRemove => Rule {
        party: Role::Catalyst,
        from:  &[Confirmed, Completed],
        to:    Cancelled,
        verb:  "remove",
      },
    }
  }

  /// The removal a party may perform: seekers withdraw a pending request,
  /// catalysts drop a matched booking.
  pub fn removal_for(party: Role) -> Self {
    match party {
      Role::Seeker => Self::SeekerCancel,
      Role::Catalyst => Self::CatalystRemove,
    }
  }

  /// Check this transition for an actor standing as `party` (or not party
  /// at all) on a booking currently in `current`, and return the target
  /// status.
  ///
  /// Authorization is checked before the source status, so a stranger
  /// learns nothing about the booking's state.
  pub fn check(self, party: Option<Role>, current: BookingStatus) -> Result<BookingStatus> {
    let rule = self.rule();
    match party {
      None => {
        return Err(Error::Forbidden(format!(
          "not a party to this booking; cannot {}",
          rule.verb
        )));
      }
      Some(p) if p != rule.party => {
        return Err(Error::Forbidden(format!(
          "only the {} of a booking may {} it",
          rule.party.as_ref().to_lowercase(),
          rule.verb
        )));
      }
      Some(_) => {}
    }
    if !rule.from.contains(&current) {
      return Err(Error::Conflict(format!(
        "cannot {} booking with status {current}",
        rule.verb
      )));
    }
    Ok(rule.to)
  }
}

// ─── Listing filter ──────────────────────────────────────────────────────────

/// Status filter for booking listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StatusFilter {
  #[default]
  Any,
  /// Only these statuses. May be empty, in which case nothing matches.
  Only(BTreeSet<BookingStatus>),
}

impl StatusFilter {
  /// Parse a comma-separated list of status names.
  ///
  /// Unrecognised tokens match nothing rather than failing the request.
  pub fn parse(raw: Option<&str>) -> Self {
    match raw.map(str::trim) {
      None | Some("") => Self::Any,
      Some(s) => Self::Only(
        s.split(',')
          .filter_map(|t| BookingStatus::from_str(t.trim()).ok())
          .collect(),
      ),
    }
  }

  pub fn only(statuses: impl IntoIterator<Item = BookingStatus>) -> Self {
    Self::Only(statuses.into_iter().collect())
  }

  pub fn matches(&self, status: BookingStatus) -> bool {
    match self {
      Self::Any => true,
      Self::Only(set) => set.contains(&status),
    }
  }
}
