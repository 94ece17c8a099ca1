use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::ports::SessionStore;
use crate::domain::auth::value_objects::SessionToken;

/// In-process implementation of the SessionStore trait
///
/// Sessions live in a single map tied to process lifetime; nothing is
/// persisted across restarts. Expiry is lazy: `get` treats a session past its
/// `expires_at` as absent even while the entry still occupies the map, and
/// `purge_expired` reclaims the memory when called from a background sweep.
pub struct InMemorySessionStore {
  sessions: RwLock<HashMap<String, Session>>,
  ttl: Duration,
}

impl InMemorySessionStore {
  /// Creates an empty store whose sessions expire `ttl` after creation
  pub fn new(ttl: Duration) -> Self {
    Self {
      sessions: RwLock::new(HashMap::new()),
      ttl,
    }
  }

  /// Removes expired entries and returns how many were dropped
  ///
  /// Purely memory hygiene: `get` already treats expired sessions as absent.
  pub async fn purge_expired(&self) -> usize {
    let mut sessions = self.sessions.write().await;
    let before = sessions.len();
    sessions.retain(|_, session| session.is_valid());
    before - sessions.len()
  }

  #[cfg(test)]
  async fn len(&self) -> usize {
    self.sessions.read().await.len()
  }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
  async fn create(
    &self,
    user_id: Uuid,
    username: &str,
    birthdate: NaiveDate,
  ) -> Result<Session, AuthError> {
    let mut sessions = self.sessions.write().await;

    // 256-bit tokens make a collision with a live session vanishingly
    // unlikely; the retry loop keeps token uniqueness an invariant anyway.
    let token = loop {
      let candidate = SessionToken::generate()?;
      if !sessions.contains_key(candidate.as_str()) {
        break candidate;
      }
    };

    let session = Session::new(
      token.clone(),
      user_id,
      username.to_string(),
      birthdate,
      self.ttl,
    );

    sessions.insert(token.into_inner(), session.clone());
    Ok(session)
  }

  async fn get(&self, token: &SessionToken) -> Result<Option<Session>, AuthError> {
    let sessions = self.sessions.read().await;

    match sessions.get(token.as_str()) {
      Some(session) if session.is_valid() => Ok(Some(session.clone())),
      // Expired entries read as absent; purge_expired reclaims them later
      _ => Ok(None),
    }
  }

  async fn destroy(&self, token: &SessionToken) -> Result<(), AuthError> {
    let mut sessions = self.sessions.write().await;
    // Removing an absent token is not an error
    sessions.remove(token.as_str());
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn birthdate() -> NaiveDate {
    NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()
  }

  #[tokio::test]
  async fn test_create_then_get() {
    let store = InMemorySessionStore::new(Duration::hours(24));
    let user_id = Uuid::new_v4();

    let session = store.create(user_id, "alice", birthdate()).await.unwrap();

    let found = store.get(&session.token).await.unwrap().unwrap();
    assert_eq!(found.user_id, user_id);
    assert_eq!(found.username, "alice");
    assert_eq!(found.birthdate, birthdate());
  }

  #[tokio::test]
  async fn test_get_unknown_token() {
    let store = InMemorySessionStore::new(Duration::hours(24));
    let token = SessionToken::generate().unwrap();

    assert!(store.get(&token).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_destroy_is_idempotent() {
    let store = InMemorySessionStore::new(Duration::hours(24));
    let session = store
      .create(Uuid::new_v4(), "alice", birthdate())
      .await
      .unwrap();

    store.destroy(&session.token).await.unwrap();
    assert!(store.get(&session.token).await.unwrap().is_none());

    // Destroying an already-destroyed token still succeeds
    store.destroy(&session.token).await.unwrap();
  }

  #[tokio::test]
  async fn test_expired_session_reads_as_absent_but_occupies_storage() {
    let store = InMemorySessionStore::new(Duration::seconds(-1));
    let session = store
      .create(Uuid::new_v4(), "alice", birthdate())
      .await
      .unwrap();

    // Lazy expiry: get says absent while the entry is still in the map
    assert!(store.get(&session.token).await.unwrap().is_none());
    assert_eq!(store.len().await, 1);

    // The sweep reclaims it
    assert_eq!(store.purge_expired().await, 1);
    assert_eq!(store.len().await, 0);
  }

  #[tokio::test]
  async fn test_purge_keeps_live_sessions() {
    let store = InMemorySessionStore::new(Duration::hours(1));
    let session = store
      .create(Uuid::new_v4(), "alice", birthdate())
      .await
      .unwrap();

    assert_eq!(store.purge_expired().await, 0);
    assert!(store.get(&session.token).await.unwrap().is_some());
  }

  #[tokio::test]
  async fn test_tokens_are_unique_per_session() {
    let store = InMemorySessionStore::new(Duration::hours(1));

    let a = store.create(Uuid::new_v4(), "a", birthdate()).await.unwrap();
    let b = store.create(Uuid::new_v4(), "b", birthdate()).await.unwrap();

    assert_ne!(a.token.as_str(), b.token.as_str());
  }

  #[tokio::test]
  async fn test_concurrent_create_get_destroy() {
    use std::sync::Arc;

    let store = Arc::new(InMemorySessionStore::new(Duration::hours(1)));

    let mut handles = Vec::new();
    for i in 0..16 {
      let store = store.clone();
      handles.push(tokio::spawn(async move {
        let session = store
          .create(Uuid::new_v4(), &format!("user{}", i), birthdate())
          .await
          .unwrap();

        // Readers must never observe a partially-written session
        let found = store.get(&session.token).await.unwrap().unwrap();
        assert_eq!(found.username, format!("user{}", i));

        store.destroy(&session.token).await.unwrap();
        assert!(store.get(&session.token).await.unwrap().is_none());
      }));
    }

    for handle in handles {
      handle.await.unwrap();
    }

    assert_eq!(store.len().await, 0);
  }
}
