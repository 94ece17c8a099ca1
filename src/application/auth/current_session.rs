use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::entities::Session;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// View of the session behind a cookie, as rendered to pages
#[derive(Debug, Clone)]
pub struct CurrentSessionResponse {
  /// Unique identifier of the session's user
  pub user_id: Uuid,
  /// Username snapshot taken at login
  pub username: String,
  /// Birthdate snapshot taken at login
  pub birthdate: NaiveDate,
  /// Session expiration timestamp
  pub expires_at: DateTime<Utc>,
}

impl From<Session> for CurrentSessionResponse {
  fn from(session: Session) -> Self {
    Self {
      user_id: session.user_id,
      username: session.username,
      birthdate: session.birthdate,
      expires_at: session.expires_at,
    }
  }
}

/// Use case for resolving a session cookie to its logged-in user
pub struct CurrentSessionUseCase {
  auth_service: Arc<AuthService>,
}

impl CurrentSessionUseCase {
  /// Creates a new instance of CurrentSessionUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Resolves a cookie value to the session it names, if any
  ///
  /// A malformed token cannot name a session and resolves to `None` rather
  /// than an error; expired sessions also resolve to `None`.
  ///
  /// # Errors
  /// Returns `AuthError` only when the session store itself fails.
  pub async fn execute(&self, token: String) -> Result<Option<CurrentSessionResponse>, AuthError> {
    let token = match SessionToken::from_string(token) {
      Ok(token) => token,
      Err(_) => return Ok(None),
    };

    let session = self.auth_service.session_for(&token).await?;
    Ok(session.map(CurrentSessionResponse::from))
  }
}
