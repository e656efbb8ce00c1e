//! Ratings and the derived per-catalyst aggregate.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Score ───────────────────────────────────────────────────────────────────

/// A star score, 1 to 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
  pub const MIN: u8 = 1;
  pub const MAX: u8 = 5;

  pub fn new(value: i64) -> Result<Self> {
    if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
      Ok(Self(value as u8))
    } else {
      Err(Error::validation(
        "rating",
        format!("must be between {} and {}, got {value}", Self::MIN, Self::MAX),
      ))
    }
  }

  pub fn get(self) -> u8 { self.0 }
}

impl TryFrom<i64> for Score {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> { Self::new(value) }
}

impl From<Score> for u8 {
  fn from(s: Score) -> Self { s.0 }
}

// ─── Rating ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
  pub rating_id:   Uuid,
  pub seeker_id:   Uuid,
  pub catalyst_id: Uuid,
  /// At most one rating exists per (seeker, catalyst, booking).
  pub booking_id:  Option<Uuid>,
  pub rating:      Score,
  pub review:      String,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

/// Body of `POST /ratings`; the seeker is the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRating {
  pub catalyst_id: Uuid,
  pub booking_id:  Option<Uuid>,
  pub rating:      Score,
  #[serde(default)]
  pub review:      String,
}

/// Body of `PUT /ratings/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RatingUpdate {
  pub rating: Score,
  #[serde(default)]
  pub review: String,
}

// ─── Aggregate ───────────────────────────────────────────────────────────────

/// The mean/count pair cached on a catalyst's profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingAggregate {
  pub average_rating: Decimal,
  pub rating_count:   u32,
}

impl RatingAggregate {
  /// `0.00` / `0`.
  pub const EMPTY: Self = Self {
    average_rating: Decimal::from_parts(0, 0, 0, false, 2),
    rating_count:   0,
  };

  /// Compute the aggregate from the full set of current scores.
  ///
  /// The mean is taken exactly in decimal and rounded to two places with
  /// midpoint-away-from-zero (half-up, since scores are positive). An
  /// empty set yields `0.00` / `0`.
  pub fn from_scores<I>(scores: I) -> Self
  where
    I: IntoIterator<Item = u8>,
  {
    let (sum, count) = scores
      .into_iter()
      .fold((0u64, 0u32), |(sum, count), s| (sum + u64::from(s), count + 1));

    if count == 0 {
      return Self::EMPTY;
    }

    let mut average_rating = (Decimal::from(sum) / Decimal::from(count))
      .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    average_rating.rescale(2);
    Self { average_rating, rating_count: count }
  }
}
