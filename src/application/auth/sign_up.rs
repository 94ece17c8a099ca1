use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::auth::errors::AuthError;
use crate::domain::auth::services::AuthService;
use crate::domain::auth::value_objects::{Password, Username, ValueObjectError};

/// Command for registering a new user
#[derive(Debug, Clone)]
pub struct SignUpCommand {
  /// Desired username
  pub username: String,
  /// User's password (plain text)
  pub password: String,
  /// Birthdate in YYYY-MM-DD form
  pub birthdate: String,
}

/// Response after successful registration
#[derive(Debug, Clone)]
pub struct SignUpResponse {
  /// Unique identifier of the new user
  pub user_id: Uuid,
  /// Registered username
  pub username: String,
}

/// Use case for registering a new user
pub struct SignUpUseCase {
  auth_service: Arc<AuthService>,
}

impl SignUpUseCase {
  /// Creates a new instance of SignUpUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the signup use case
  ///
  /// # Errors
  /// Returns `AuthError::DuplicateUsername` when the username is taken,
  /// `AuthError::Validation` for malformed input, and
  /// `AuthError::SignupFailed` for internal failures.
  pub async fn execute(&self, command: SignUpCommand) -> Result<SignUpResponse, AuthError> {
    let username = Username::new(command.username)?;
    let password = Password::new(command.password)?;

    let birthdate = NaiveDate::parse_from_str(&command.birthdate, "%Y-%m-%d")
      .map_err(|_| ValueObjectError::InvalidBirthdate(command.birthdate.clone()))?;

    let user = self
      .auth_service
      .sign_up(username, password, birthdate)
      .await?;

    Ok(SignUpResponse {
      user_id: user.id,
      username: user.username,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::domain::auth::test_support::test_service;

  fn use_case() -> SignUpUseCase {
    let (service, _) = test_service();
    SignUpUseCase::new(service)
  }

  #[tokio::test]
  async fn test_signup_with_valid_input() {
    let use_case = use_case();

    let response = use_case
      .execute(SignUpCommand {
        username: "alice".to_string(),
        password: "pw123".to_string(),
        birthdate: "1999-12-31".to_string(),
      })
      .await
      .unwrap();

    assert_eq!(response.username, "alice");
  }

  #[tokio::test]
  async fn test_signup_rejects_malformed_birthdate() {
    let use_case = use_case();

    let result = use_case
      .execute(SignUpCommand {
        username: "alice".to_string(),
        password: "pw123".to_string(),
        birthdate: "31/12/1999".to_string(),
      })
      .await;

    match result.unwrap_err() {
      AuthError::Validation(ValueObjectError::InvalidBirthdate(_)) => {}
      other => panic!("Expected InvalidBirthdate, got {:?}", other),
    }
  }

  #[tokio::test]
  async fn test_signup_rejects_duplicate_username() {
    let use_case = use_case();

    let command = SignUpCommand {
      username: "alice".to_string(),
      password: "pw123".to_string(),
      birthdate: "1999-12-31".to_string(),
    };

    use_case.execute(command.clone()).await.unwrap();
    let result = use_case.execute(command).await;

    match result.unwrap_err() {
      AuthError::DuplicateUsername => {}
      other => panic!("Expected DuplicateUsername, got {:?}", other),
    }
  }
}
