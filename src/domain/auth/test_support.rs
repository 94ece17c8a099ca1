//! Shared fakes for unit tests

use async_trait::async_trait;
use chrono::Duration;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::entities::User;
use super::errors::AuthError;
use super::ports::UserRepository;
use super::services::AuthService;
use super::value_objects::Username;
use crate::infrastructure::security::Argon2PasswordHasher;
use crate::infrastructure::session::InMemorySessionStore;

/// Map-backed user repository with an atomic check-and-insert, standing in
/// for the Postgres unique index.
#[derive(Default)]
pub struct InMemoryUserRepository {
  pub users: Mutex<HashMap<String, User>>,
}

impl InMemoryUserRepository {
  pub fn len(&self) -> usize {
    self.users.lock().unwrap().len()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let mut users = self.users.lock().unwrap();
    if users.contains_key(&user.username) {
      return Err(AuthError::DuplicateUsername);
    }
    users.insert(user.username.clone(), user.clone());
    Ok(user)
  }

  async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
    let users = self.users.lock().unwrap();
    Ok(users.get(username.as_str()).cloned())
  }
}

/// Builds an AuthService wired to in-memory components
pub fn test_service() -> (Arc<AuthService>, Arc<InMemoryUserRepository>) {
  test_service_with_ttl(Duration::hours(24))
}

/// Same as `test_service` but with a caller-chosen session lifetime
pub fn test_service_with_ttl(ttl: Duration) -> (Arc<AuthService>, Arc<InMemoryUserRepository>) {
  let user_repo = Arc::new(InMemoryUserRepository::default());
  let session_store = Arc::new(InMemorySessionStore::new(ttl));
  let hasher = Arc::new(Argon2PasswordHasher::new().unwrap());
  let service = Arc::new(AuthService::new(user_repo.clone(), session_store, hasher));
  (service, user_repo)
}
