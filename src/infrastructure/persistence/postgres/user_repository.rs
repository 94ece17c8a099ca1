use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::User,
  errors::{AuthError, RepositoryError},
  ports::UserRepository,
  value_objects::Username,
};

/// PostgreSQL implementation of the UserRepository trait
///
/// Username uniqueness is enforced by the database's unique index, so a
/// concurrent duplicate signup surfaces here as a unique violation rather
/// than being caught by an application-level lookup.
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  username: String,
  password_hash: String,
  birthdate: NaiveDate,
  created_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.username,
      row.password_hash,
      row.birthdate,
      row.created_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn create(&self, user: User) -> Result<User, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (id, username, password_hash, birthdate, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, password_hash, birthdate, created_at
            "#,
    )
    .bind(user.id)
    .bind(&user.username)
    .bind(&user.password_hash)
    .bind(user.birthdate)
    .bind(user.created_at)
    .fetch_one(&self.pool)
    .await;

    match result {
      Ok(row) => Ok(row.into()),
      Err(sqlx::Error::Database(db_err)) => {
        if db_err.is_unique_violation() {
          Err(AuthError::DuplicateUsername)
        } else {
          Err(AuthError::Repository(RepositoryError::DatabaseError(
            db_err.to_string(),
          )))
        }
      }
      Err(e) => Err(e.into()),
    }
  }

  async fn find_by_username(&self, username: &Username) -> Result<Option<User>, AuthError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            SELECT id, username, password_hash, birthdate, created_at
            FROM users
            WHERE username = $1
            "#,
    )
    .bind(username.as_str())
    .fetch_optional(&self.pool)
    .await;

    match result {
      Ok(Some(row)) => Ok(Some(row.into())),
      Ok(None) => Ok(None),
      Err(e) => Err(e.into()),
    }
  }
}
