use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use super::entities::{Session, User};
use super::errors::AuthError;
use super::value_objects::{Password, PasswordHash, SessionToken, Username};

/// Repository trait for user persistence operations
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Creates a new user. Check-and-insert is a single atomic operation
  /// against the backing store: under concurrent signups with the same
  /// username exactly one call succeeds and the rest observe
  /// `AuthError::DuplicateUsername`.
  async fn create(&self, user: User) -> Result<User, AuthError>;

  /// Finds a user by username (exact match, case-sensitive); a miss is not
  /// an error
  async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError>;
}

/// Keyed, expiring store of live sessions
///
/// The process-wide session map lives behind this trait so it is an explicit,
/// swappable dependency rather than ambient global state.
#[async_trait]
pub trait SessionStore: Send + Sync {
  /// Creates a session for the given user snapshot with a fresh random token
  async fn create(
    &self,
    user_id: Uuid,
    username: &str,
    birthdate: NaiveDate,
  ) -> Result<Session, AuthError>;

  /// Looks up a session by token. Returns `None` for unknown tokens and for
  /// sessions past their expiry (lazy expiry: expired entries may still
  /// occupy storage).
  async fn get(&self, token: &SessionToken) -> Result<Option<Session>, AuthError>;

  /// Removes a session. Idempotent: destroying an absent token is not an
  /// error.
  async fn destroy(&self, token: &SessionToken) -> Result<(), AuthError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Hashes a plain text password with a per-call random salt
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError>;

  /// Verifies a plain text password against a hash. A wrong password is
  /// `Ok(false)`; only a malformed hash is an error.
  async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, AuthError>;
}
