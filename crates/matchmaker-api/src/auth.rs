//! Token authentication.
//!
//! Requests carry `Authorization: Token <token>`. Tokens are 32 random bytes,
//! hex-encoded; the store only ever sees their SHA-256 digest. Resolved
//! actors are kept in the state's TTL cache, keyed by digest.

use axum::{extract::FromRequestParts, http::request::Parts};
use matchmaker_core::{Error, actor::Actor, store::MatchStore};
use rand_core::{OsRng, RngCore as _};
use sha2::{Digest as _, Sha256};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

/// Authorization scheme prefix, including the separating space.
pub const SCHEME: &str = "Token ";

const TOKEN_BYTES: usize = 32;

/// A fresh random API token.
pub fn mint_token() -> String {
  let mut bytes = [0u8; TOKEN_BYTES];
  OsRng.fill_bytes(&mut bytes);
  hex::encode(bytes)
}

/// The form a token is stored and looked up under.
pub fn token_digest(token: &str) -> String { hex::encode(Sha256::digest(token.as_bytes())) }

/// Mint a token for `actor_id`, register its digest, and return the token.
///
/// The plaintext is returned exactly once and never stored.
pub async fn issue_token<S>(store: &S, actor_id: Uuid) -> Result<String, ApiError>
where
  S: MatchStore,
{
  let token = mint_token();
  store
    .add_token(actor_id, token_digest(&token))
    .await
    .map_err(ApiError::store)?;
  Ok(token)
}

/// Look up the actor a token was issued to.
pub async fn resolve_token<S>(state: &AppState<S>, token: &str) -> Result<Actor, ApiError>
where
  S: MatchStore,
{
  let digest = token_digest(token);
  if let Some(actor) = state.tokens.get(&digest) {
    return Ok(actor);
  }

  let actor = state
    .store
    .actor_for_token(digest.clone())
    .await
    .map_err(ApiError::store)?
    .ok_or(Error::Unauthenticated)?;
  state.tokens.insert(digest, actor.clone());
  Ok(actor)
}

/// The authenticated caller. Present in a handler means the request carried
/// a valid token.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl<S> FromRequestParts<AppState<S>> for CurrentActor
where
  S: MatchStore + 'static,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState<S>,
  ) -> Result<Self, Self::Rejection> {
    let token = parts
      .headers
      .get(axum::http::header::AUTHORIZATION)
      .and_then(|v| v.to_str().ok())
      .and_then(|v| v.strip_prefix(SCHEME))
      .map(str::trim)
      .filter(|t| !t.is_empty())
      .ok_or(Error::Unauthenticated)?;

    resolve_token(state, token).await.map(CurrentActor)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn minted_tokens_are_distinct_hex() {
    let (a, b) = (mint_token(), mint_token());
    assert_eq!(a.len(), TOKEN_BYTES * 2);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, b);
  }

  #[test]
  fn digest_is_stable_sha256_hex() {
    assert_eq!(
      token_digest("abc"),
      "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
    );
    assert_ne!(token_digest("abc"), token_digest("abd"));
  }
}
