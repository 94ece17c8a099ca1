use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Password, Username};

/// Command for logging in a user
#[derive(Debug, Clone)]
pub struct LogInCommand {
  /// Username entered on the login form
  pub username: String,
  /// User's password (plain text)
  pub password: String,
}

/// Response after successful login
#[derive(Debug, Clone)]
pub struct LogInResponse {
  /// Unique identifier of the user
  pub user_id: Uuid,
  /// Authenticated username
  pub username: String,
  /// Session token for the cookie
  pub session_token: String,
  /// Session expiration timestamp
  pub expires_at: DateTime<Utc>,
}

/// Use case for logging in a user
pub struct LogInUseCase {
  auth_service: Arc<AuthService>,
}

impl LogInUseCase {
  /// Creates a new instance of LogInUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the login use case
  ///
  /// The username is always resolved first: an unknown user reads as
  /// `UserNotFound` no matter what was typed in the password field. A
  /// password that fails validation (empty or over-long) can never match a
  /// stored hash, so for an existing user it reads as `InvalidCredentials`
  /// without reaching the hasher.
  ///
  /// # Errors
  /// Returns `AuthError::UserNotFound` or `AuthError::InvalidCredentials`
  /// on bad credentials; storage failures propagate unchanged.
  pub async fn execute(&self, command: LogInCommand) -> Result<LogInResponse, AuthError> {
    let username = Username::new(command.username).map_err(|_| AuthError::UserNotFound)?;

    let password = match Password::new(command.password) {
      Ok(password) => password,
      Err(_) => {
        return if self.auth_service.user_exists(&username).await? {
          Err(AuthError::InvalidCredentials)
        } else {
          Err(AuthError::UserNotFound)
        };
      }
    };

    let session = self.auth_service.log_in(username, password).await?;

    Ok(LogInResponse {
      user_id: session.user_id,
      username: session.username.clone(),
      session_token: session.token.into_inner(),
      expires_at: session.expires_at,
    })
  }
}
