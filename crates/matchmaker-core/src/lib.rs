//! Core types and trait definitions for the matchmaking service.
//!
//! This crate has no HTTP or database dependencies. It holds the proximity
//! engine, the booking state machine, rating aggregate math and preference
//! validation as pure code; storage backends and the HTTP layer build on it.

pub mod actor;
pub mod booking;
pub mod error;
pub mod geo;
pub mod message;
pub mod preferences;
pub mod profile;
pub mod rating;
pub mod store;

pub use error::{Classify, Error, ErrorKind, Result};
