use chrono::NaiveDate;
use std::sync::Arc;

use super::entities::{Session, User};
use super::errors::{AuthError, RepositoryError};
use super::ports::{PasswordHasher, SessionStore, UserRepository};
use super::value_objects::{Password, PasswordHash, SessionToken, Username};

/// Authentication service implementing core business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  session_store: Arc<dyn SessionStore>,
  password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(
    user_repo: Arc<dyn UserRepository>,
    session_store: Arc<dyn SessionStore>,
    password_hasher: Arc<dyn PasswordHasher>,
  ) -> Self {
    Self {
      user_repo,
      session_store,
      password_hasher,
    }
  }

  /// Registers a new user with username, password and birthdate
  ///
  /// # Errors
  /// Returns `AuthError::DuplicateUsername` if the username is taken
  /// (whether seen at the pre-check or lost to a concurrent signup at
  /// insert time), and `AuthError::SignupFailed` for any other failure.
  /// Internal detail is logged, never surfaced. No user is created on any
  /// failure path.
  pub async fn sign_up(
    &self,
    username: Username,
    password: Password,
    birthdate: NaiveDate,
  ) -> Result<User, AuthError> {
    // Fast-path duplicate check. The authoritative check is the unique
    // index at insert time; this only exists for a cheap early answer.
    match self.user_repo.find_by_username(&username).await {
      Ok(Some(_)) => return Err(AuthError::DuplicateUsername),
      Ok(None) => {}
      Err(e) => {
        tracing::error!("Signup lookup failed for {}: {}", username, e);
        return Err(AuthError::SignupFailed);
      }
    }

    // Hash the password
    let password_hash = match self.password_hasher.hash(&password).await {
      Ok(hash) => hash,
      Err(e) => {
        tracing::error!("Password hashing failed during signup: {}", e);
        return Err(AuthError::SignupFailed);
      }
    };

    let user = User::new(username.into_inner(), password_hash.into_inner(), birthdate);

    // The insert races against concurrent signups; the unique index decides
    // the winner and the losers get DuplicateUsername.
    match self.user_repo.create(user).await {
      Ok(created) => Ok(created),
      Err(AuthError::DuplicateUsername)
      | Err(AuthError::Repository(RepositoryError::DuplicateKey(_))) => {
        Err(AuthError::DuplicateUsername)
      }
      Err(e) => {
        tracing::error!("Signup insert failed: {}", e);
        Err(AuthError::SignupFailed)
      }
    }
  }

  /// Authenticates a user and creates a new session
  ///
  /// # Errors
  /// Returns `AuthError::UserNotFound` for an unknown username and
  /// `AuthError::InvalidCredentials` for a wrong password. The two are kept
  /// distinct deliberately so the login page can say which credential was
  /// wrong. Storage and hash-format failures propagate and surface as a hard
  /// failure at the boundary, never as "not found".
  pub async fn log_in(&self, username: Username, password: Password) -> Result<Session, AuthError> {
    let user = self
      .user_repo
      .find_by_username(&username)
      .await?
      .ok_or(AuthError::UserNotFound)?;

    let password_hash = PasswordHash::from_hash(&user.password_hash)?;

    if !self.password_hasher.verify(&password, &password_hash).await? {
      return Err(AuthError::InvalidCredentials);
    }

    let session = self
      .session_store
      .create(user.id, &user.username, user.birthdate)
      .await?;

    tracing::info!("Login successful for user_id={}", user.id);
    Ok(session)
  }

  /// True when a user with this username exists
  ///
  /// Lets callers answer "user not found" before touching the password at
  /// all, keeping the lookup-then-verify order observable even for input
  /// that could never match.
  pub async fn user_exists(&self, username: &Username) -> Result<bool, AuthError> {
    Ok(self.user_repo.find_by_username(username).await?.is_some())
  }

  /// Destroys the session for the given token
  ///
  /// Idempotent: logging out an already-destroyed session succeeds.
  pub async fn log_out(&self, token: &SessionToken) -> Result<(), AuthError> {
    self.session_store.destroy(token).await
  }

  /// Resolves a session token to its live session, if any
  ///
  /// Read-only: never creates, refreshes or extends a session's TTL.
  pub async fn session_for(&self, token: &SessionToken) -> Result<Option<Session>, AuthError> {
    self.session_store.get(token).await
  }
}
