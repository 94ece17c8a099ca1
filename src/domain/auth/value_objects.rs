use argon2::PasswordHash as Argon2PasswordHash;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Username must not be empty")]
  UsernameEmpty,

  #[error("Username is too long (maximum {max} characters)")]
  UsernameTooLong { max: usize },

  #[error("Password must not be empty")]
  PasswordEmpty,

  #[error("Password is too long (maximum {max} characters)")]
  PasswordTooLong { max: usize },

  #[error("Invalid birthdate: {0}")]
  InvalidBirthdate(String),

  #[error("Invalid password hash format")]
  InvalidPasswordHash,

  #[error("Invalid session token format")]
  InvalidToken,

  #[error("Token generation failed: {0}")]
  TokenGenerationFailed(String),
}

// ============================================================================
// Username Value Object
// ============================================================================

/// A validated username. Usernames are case-sensitive and are stored exactly
/// as entered, with no normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Username(String);

impl Username {
  const MAX_LENGTH: usize = 64;

  /// Creates a new Username after validation
  pub fn new(username: impl Into<String>) -> Result<Self, ValueObjectError> {
    let username = username.into();

    if username.trim().is_empty() {
      return Err(ValueObjectError::UsernameEmpty);
    }

    if username.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::UsernameTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(username))
  }

  /// Returns the username as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Username {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Username {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

#[derive(Clone)]
pub struct Password(String);

impl Password {
  // No minimum length: the store only ever holds the hash, and existing
  // accounts may carry short passwords.
  const MAX_LENGTH: usize = 128;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.is_empty() {
      return Err(ValueObjectError::PasswordEmpty);
    }

    if password.len() > Self::MAX_LENGTH {
      return Err(ValueObjectError::PasswordTooLong {
        max: Self::MAX_LENGTH,
      });
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// Implement Display without exposing the password
impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordHash Value Object (Argon2id PHC String)
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  /// Creates a new PasswordHash from an existing hash string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    // Validate it's a proper PHC-format hash
    Argon2PasswordHash::new(&hash).map_err(|_| ValueObjectError::InvalidPasswordHash)?;

    Ok(Self(hash))
  }

  /// Returns the hash as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

// ============================================================================
// SessionToken Value Object (Random Secure Token)
// ============================================================================

#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
  const TOKEN_LENGTH: usize = 32; // 32 bytes = 256 bits

  /// Generates a new random session token from the OS entropy source
  pub fn generate() -> Result<Self, ValueObjectError> {
    let mut bytes = [0u8; Self::TOKEN_LENGTH];

    rand::rngs::OsRng
      .try_fill_bytes(&mut bytes)
      .map_err(|e| ValueObjectError::TokenGenerationFailed(e.to_string()))?;

    Ok(Self(hex::encode(bytes)))
  }

  /// Creates a SessionToken from an existing token string
  pub fn from_string(token: impl Into<String>) -> Result<Self, ValueObjectError> {
    let token = token.into();

    // Validate token is hex and correct length
    if token.len() != Self::TOKEN_LENGTH * 2 {
      return Err(ValueObjectError::InvalidToken);
    }

    if !token.chars().all(|c| c.is_ascii_hexdigit()) {
      return Err(ValueObjectError::InvalidToken);
    }

    Ok(Self(token))
  }

  /// Returns the token as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

// Implement Debug without exposing the token
impl fmt::Debug for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("SessionToken(***)")
  }
}

// Implement Display without exposing the token
impl fmt::Display for SessionToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_username_validation() {
    assert!(Username::new("alice").is_ok());
    assert!(Username::new("Alice O'Malley").is_ok());

    assert!(matches!(
      Username::new(""),
      Err(ValueObjectError::UsernameEmpty)
    ));
    assert!(matches!(
      Username::new("   "),
      Err(ValueObjectError::UsernameEmpty)
    ));

    let long = "a".repeat(65);
    assert!(matches!(
      Username::new(long),
      Err(ValueObjectError::UsernameTooLong { .. })
    ));
  }

  #[test]
  fn test_username_preserves_case() {
    let username = Username::new("AlIcE").unwrap();
    assert_eq!(username.as_str(), "AlIcE");
  }

  #[test]
  fn test_password_validation() {
    // Short passwords are accepted: only the hash is ever stored
    assert!(Password::new("pw123").is_ok());
    assert!(Password::new("a").is_ok());

    assert!(matches!(
      Password::new(""),
      Err(ValueObjectError::PasswordEmpty)
    ));

    let long = "a".repeat(129);
    assert!(matches!(
      Password::new(long),
      Err(ValueObjectError::PasswordTooLong { .. })
    ));
  }

  #[test]
  fn test_password_debug_does_not_leak() {
    let password = Password::new("supersecret").unwrap();
    assert_eq!(format!("{:?}", password), "Password(***)");
    assert_eq!(password.to_string(), "***");
  }

  #[test]
  fn test_password_hash_rejects_garbage() {
    assert!(PasswordHash::from_hash("not-a-phc-string").is_err());
  }

  #[test]
  fn test_session_token_generation() {
    let token1 = SessionToken::generate().unwrap();
    let token2 = SessionToken::generate().unwrap();

    // Tokens should be different
    assert_ne!(token1.as_str(), token2.as_str());

    // Token should be correct length (64 hex characters for 32 bytes)
    assert_eq!(token1.as_str().len(), 64);
  }

  #[test]
  fn test_session_token_round_trip() {
    let token = SessionToken::generate().unwrap();
    let parsed = SessionToken::from_string(token.as_str()).unwrap();
    assert_eq!(parsed, token);
  }

  #[test]
  fn test_session_token_rejects_malformed() {
    assert!(SessionToken::from_string("short").is_err());
    assert!(SessionToken::from_string("z".repeat(64)).is_err());
    assert!(SessionToken::from_string("").is_err());
  }

  #[test]
  fn test_session_token_debug_does_not_leak() {
    let token = SessionToken::generate().unwrap();
    assert_eq!(format!("{:?}", token), "SessionToken(***)");
  }
}
