//! Messages exchanged between the two parties of a booking.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub message_id: Uuid,
  pub booking_id: Uuid,
  /// Always one of the booking's two parties.
  pub sender_id:  Uuid,
  pub content:    String,
  pub timestamp:  DateTime<Utc>,
  pub is_read:    bool,
}

/// Body of `POST /messages`; the sender is the authenticated caller.
#[derive(Debug, Clone, Deserialize)]
pub struct NewMessage {
  pub booking_id: Uuid,
  pub content:    String,
}

impl NewMessage {
  /// Content must contain something other than whitespace.
  pub fn validate(&self) -> Result<()> {
    if self.content.trim().is_empty() {
      return Err(Error::validation("content", "must not be empty"));
    }
    Ok(())
  }
}
