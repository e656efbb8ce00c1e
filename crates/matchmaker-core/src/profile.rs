//! Profiles: the role-specific attributes attached 1:1 to an actor.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::{Error, Result, actor::Actor, preferences::Preferences};

/// Longest accepted `bio_short`, in characters.
pub const BIO_SHORT_MAX: usize = 200;

// ─── Coordinate ──────────────────────────────────────────────────────────────

/// A point on the globe, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
  pub latitude:  f64,
  pub longitude: f64,
}

impl Coordinate {
  /// Build a coordinate, rejecting non-finite or out-of-range values.
  pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
    if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
      return Err(Error::validation(
        "latitude",
        format!("must be a number between -90 and 90, got {latitude}"),
      ));
    }
    if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
      return Err(Error::validation(
        "longitude",
        format!("must be a number between -180 and 180, got {longitude}"),
      ));
    }
    Ok(Self { latitude, longitude })
  }
}

// ─── Profile ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
  pub actor_id:        Uuid,
  pub bio:             String,
  pub bio_short:       String,
  /// Whether a catalyst is currently accepting requests.
  pub is_active:       bool,
  /// Both-or-neither: a profile is either located or not.
  pub coordinate:      Option<Coordinate>,
  pub address:         String,
  pub hourly_rate:     Option<Decimal>,
  pub specializations: Vec<String>,
  pub preferences:     Preferences,
  /// Derived from the catalyst's ratings; never written directly.
  pub average_rating:  Decimal,
  /// Derived from the catalyst's ratings; never written directly.
  pub rating_count:    u32,
}

impl Profile {
  /// The profile every new actor starts with.
  pub fn empty(actor_id: Uuid) -> Self {
    Self {
      actor_id,
      bio: String::new(),
      bio_short: String::new(),
      is_active: true,
      coordinate: None,
      address: String::new(),
      hourly_rate: None,
      specializations: Vec::new(),
      preferences: Preferences::new(),
      average_rating: crate::rating::RatingAggregate::EMPTY.average_rating,
      rating_count: 0,
    }
  }
}

/// A profile together with the actor that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileView {
  pub actor:   Actor,
  pub profile: Profile,
}

// ─── Partial update ──────────────────────────────────────────────────────────

/// Distinguish "absent" (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
  T: Deserialize<'de>,
  D: Deserializer<'de>,
{
  Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `PATCH /profiles/me`. Absent fields are left untouched; an
/// explicit `null` clears a nullable field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePatch {
  pub bio:             Option<String>,
  pub bio_short:       Option<String>,
  pub is_active:       Option<bool>,
  pub address:         Option<String>,
  #[serde(default, deserialize_with = "double_option")]
  pub latitude:        Option<Option<f64>>,
  #[serde(default, deserialize_with = "double_option")]
  pub longitude:       Option<Option<f64>>,
  #[serde(default, deserialize_with = "double_option")]
  pub hourly_rate:     Option<Option<Decimal>>,
  pub specializations: Option<Vec<String>>,
}

impl ProfilePatch {
  /// Merge this patch onto `current`, validating the merged result.
  pub fn apply(&self, current: &Profile) -> Result<Profile> {
    let mut next = current.clone();

    if let Some(bio) = &self.bio {
      next.bio = bio.clone();
    }
    if let Some(bio_short) = &self.bio_short {
      if bio_short.chars().count() > BIO_SHORT_MAX {
        return Err(Error::validation(
          "bio_short",
          format!("must be at most {BIO_SHORT_MAX} characters"),
        ));
      }
      next.bio_short = bio_short.clone();
    }
    if let Some(is_active) = self.is_active {
      next.is_active = is_active;
    }
    if let Some(address) = &self.address {
      next.address = address.clone();
    }
    if let Some(rate) = self.hourly_rate {
      if rate.is_some_and(|r| r < Decimal::ZERO) {
        return Err(Error::validation("hourly_rate", "must not be negative"));
      }
      next.hourly_rate = rate;
    }
    if let Some(specializations) = &self.specializations {
      next.specializations = specializations
        .iter()
        .map(|s| s.trim().to_owned())
        .filter(|s| !s.is_empty())
        .collect();
    }

    let latitude = match self.latitude {
      Some(v) => v,
      None => current.coordinate.map(|c| c.latitude),
    };
    let longitude = match self.longitude {
      Some(v) => v,
      None => current.coordinate.map(|c| c.longitude),
    };
    next.coordinate = match (latitude, longitude) {
      (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)?),
      (None, None) => None,
      (Some(_), None) => {
        return Err(Error::validation(
          "longitude",
          "latitude and longitude must be set together",
        ));
      }
      (None, Some(_)) => {
        return Err(Error::validation(
          "latitude",
          "latitude and longitude must be set together",
        ));
      }
    };

    Ok(next)
  }
}
