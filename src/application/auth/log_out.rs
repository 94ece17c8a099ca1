use std::sync::Arc;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::SessionToken;

/// Use case for logging out a user
pub struct LogOutUseCase {
  auth_service: Arc<AuthService>,
}

impl LogOutUseCase {
  /// Creates a new instance of LogOutUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Destroys the session behind the given cookie value
  ///
  /// Idempotent: a token that no longer resolves (or never did) still
  /// succeeds. A token that is not even well-formed cannot name a session,
  /// so it succeeds too.
  ///
  /// # Errors
  /// Returns `AuthError` only when the session store itself fails.
  pub async fn execute(&self, token: String) -> Result<(), AuthError> {
    let token = match SessionToken::from_string(token) {
      Ok(token) => token,
      Err(_) => return Ok(()),
    };

    self.auth_service.log_out(&token).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::application::auth::log_in::{LogInCommand, LogInUseCase};
  use crate::application::auth::sign_up::{SignUpCommand, SignUpUseCase};
  use crate::domain::auth::test_support::test_service;

  #[tokio::test]
  async fn test_logout_destroys_session() {
    let (service, _) = test_service();
    SignUpUseCase::new(service.clone())
      .execute(SignUpCommand {
        username: "alice".to_string(),
        password: "pw123".to_string(),
        birthdate: "2000-01-01".to_string(),
      })
      .await
      .unwrap();

    let login = LogInUseCase::new(service.clone())
      .execute(LogInCommand {
        username: "alice".to_string(),
        password: "pw123".to_string(),
      })
      .await
      .unwrap();

    let use_case = LogOutUseCase::new(service.clone());
    use_case.execute(login.session_token.clone()).await.unwrap();

    let token = SessionToken::from_string(login.session_token).unwrap();
    assert!(service.session_for(&token).await.unwrap().is_none());
  }

  #[tokio::test]
  async fn test_logout_with_malformed_token_succeeds() {
    let (service, _) = test_service();
    let use_case = LogOutUseCase::new(service);

    use_case.execute("not-a-token".to_string()).await.unwrap();
  }
}
