use argon2::{
  password_hash::{rand_core::OsRng, PasswordHash as Argon2PasswordHash, SaltString},
  Algorithm, Argon2, Params, PasswordHasher as Argon2PasswordHasherTrait, PasswordVerifier,
  Version,
};
use async_trait::async_trait;

use crate::domain::auth::errors::{AuthError, HashError};
use crate::domain::auth::ports::PasswordHasher;
use crate::domain::auth::value_objects::{Password, PasswordHash};

/// Argon2id password hasher
///
/// Parameters follow the OWASP baseline: 19 MiB memory, 2 iterations,
/// single lane. Each hash carries its own random salt, so the same
/// password never produces the same encoded string twice.
pub struct Argon2PasswordHasher {
  argon2: Argon2<'static>,
}

impl Argon2PasswordHasher {
  const MEMORY_KIB: u32 = 19456;
  const ITERATIONS: u32 = 2;
  const PARALLELISM: u32 = 1;
  const OUTPUT_LEN: usize = 32;

  pub fn new() -> Result<Self, AuthError> {
    let params = Params::new(
      Self::MEMORY_KIB,
      Self::ITERATIONS,
      Self::PARALLELISM,
      Some(Self::OUTPUT_LEN),
    )
    .map_err(|e| {
      tracing::error!("Invalid Argon2 parameters: {}", e);
      AuthError::Hash(HashError::HashingFailed(e.to_string()))
    })?;

    Ok(Self {
      argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
    })
  }
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
  async fn hash(&self, password: &Password) -> Result<PasswordHash, AuthError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = self
      .argon2
      .hash_password(password.as_str().as_bytes(), &salt)
      .map_err(|e| {
        tracing::error!("Password hashing failed: {}", e);
        AuthError::Hash(HashError::HashingFailed(e.to_string()))
      })?;

    PasswordHash::from_hash(hash.to_string()).map_err(AuthError::from)
  }

  async fn verify(&self, password: &Password, hash: &PasswordHash) -> Result<bool, AuthError> {
    let parsed = Argon2PasswordHash::new(hash.as_str())
      .map_err(|_| AuthError::Hash(HashError::InvalidFormat))?;

    match self
      .argon2
      .verify_password(password.as_str().as_bytes(), &parsed)
    {
      Ok(()) => Ok(true),
      Err(argon2::password_hash::Error::Password) => Ok(false),
      Err(e) => {
        tracing::error!("Password verification failed: {}", e);
        Err(AuthError::Hash(HashError::VerificationFailed(
          e.to_string(),
        )))
      }
    }
  }
}
