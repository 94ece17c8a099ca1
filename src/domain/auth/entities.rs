use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use super::value_objects::SessionToken;

/// User entity representing a registered member
///
/// Records are immutable after signup; there are no update or delete
/// operations on users.
#[derive(Debug, Clone)]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// Username (unique, case-sensitive)
  pub username: String,
  /// Hashed password using Argon2, never the plaintext, never rendered
  pub password_hash: String,
  /// User's birthdate
  pub birthdate: NaiveDate,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with the given details
  pub fn new(username: String, password_hash: String, birthdate: NaiveDate) -> Self {
    Self {
      id: Uuid::new_v4(),
      username,
      password_hash,
      birthdate,
      created_at: Utc::now(),
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    username: String,
    password_hash: String,
    birthdate: NaiveDate,
    created_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      username,
      password_hash,
      birthdate,
      created_at,
    }
  }
}

/// Session entity representing an active login
///
/// Carries a denormalized snapshot of the user (username, birthdate) taken at
/// login time, not a live reference. A later change to the user record does
/// not invalidate an existing session.
#[derive(Debug, Clone)]
pub struct Session {
  /// Opaque random token; also the key in the session store
  pub token: SessionToken,
  /// Reference to the user who owns this session
  pub user_id: Uuid,
  /// Snapshot of the username at login time
  pub username: String,
  /// Snapshot of the birthdate at login time
  pub birthdate: NaiveDate,
  /// Timestamp when the session was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the session expires
  pub expires_at: DateTime<Utc>,
}

impl Session {
  /// Creates a new session snapshot expiring `ttl` from now
  pub fn new(
    token: SessionToken,
    user_id: Uuid,
    username: String,
    birthdate: NaiveDate,
    ttl: chrono::Duration,
  ) -> Self {
    let now = Utc::now();
    Self {
      token,
      user_id,
      username,
      birthdate,
      created_at: now,
      expires_at: now + ttl,
    }
  }

  /// Checks if the session has expired
  pub fn is_expired(&self) -> bool {
    self.expires_at <= Utc::now()
  }

  /// Checks if the session is still valid (not expired)
  pub fn is_valid(&self) -> bool {
    !self.is_expired()
  }
}
