//! Actors: the identities that seek or provide services.
//!
//! Every actor has exactly one role for its whole lifetime, and exactly one
//! [`Profile`](crate::profile::Profile) created alongside it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

/// Which side of the marketplace an actor is on.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum Role {
  /// Requests services.
  Seeker,
  /// Provides services.
  Catalyst,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
  pub actor_id:     Uuid,
  pub username:     String,
  /// Shown to other actors; falls back to the username when blank.
  pub display_name: String,
  pub role:         Role,
  pub created_at:   DateTime<Utc>,
}

impl Actor {
  /// The name other actors see.
  pub fn name(&self) -> &str {
    if self.display_name.trim().is_empty() {
      &self.username
    } else {
      &self.display_name
    }
  }
}

/// Input to [`crate::store::MatchStore::add_actor`].
#[derive(Debug, Clone)]
pub struct NewActor {
  pub username:     String,
  pub display_name: String,
  pub role:         Role,
}

impl NewActor {
  pub fn new(username: impl Into<String>, role: Role) -> Self {
    Self { username: username.into(), display_name: String::new(), role }
  }

  pub fn validate(&self) -> crate::Result<()> {
    let username = self.username.trim();
    if username.is_empty() {
      return Err(crate::Error::validation("username", "must not be empty"));
    }
    if username.chars().any(char::is_whitespace) {
      return Err(crate::Error::validation(
        "username",
        "must not contain whitespace",
      ));
    }
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use std::str::FromStr;

  use super::*;

  #[test]
  fn role_parses_case_insensitively() {
    assert_eq!(Role::from_str("CATALYST").unwrap(), Role::Catalyst);
    assert_eq!(Role::from_str("seeker").unwrap(), Role::Seeker);
    assert!(Role::from_str("admin").is_err());
  }

  #[test]
  fn role_serialises_upper_case() {
    assert_eq!(serde_json::to_string(&Role::Catalyst).unwrap(), "\"CATALYST\"");
    assert_eq!(Role::Seeker.to_string(), "SEEKER");
  }

  #[test]
  fn name_falls_back_to_username() {
    let mut actor = Actor {
      actor_id:     Uuid::new_v4(),
      username:     "jdoe".into(),
      display_name: "  ".into(),
      role:         Role::Seeker,
      created_at:   Utc::now(),
    };
    assert_eq!(actor.name(), "jdoe");
    actor.display_name = "Jane Doe".into();
    assert_eq!(actor.name(), "Jane Doe");
  }

  #[test]
  fn new_actor_rejects_blank_username() {
    assert!(NewActor::new("  ", Role::Seeker).validate().is_err());
    assert!(NewActor::new("a b", Role::Seeker).validate().is_err());
    assert!(NewActor::new("ab", Role::Catalyst).validate().is_ok());
  }
}
