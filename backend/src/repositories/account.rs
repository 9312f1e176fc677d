//! Account directory: storage of account records
//!
//! The membership service only sees the [`AccountDirectory`] trait. The
//! PostgreSQL implementation lives here; an in-memory implementation is in
//! [`super::memory`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use thiserror::Error;

/// Account record from the directory
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AccountRecord {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// Password hash, never the plaintext
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

/// Input for creating an account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub created_by: String,
    pub updated_by: String,
}

/// Directory failures
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// A uniqueness constraint on email or username rejected the write
    #[error("email or username already exists")]
    Duplicate,

    #[error("account directory failure: {0}")]
    Backend(#[from] anyhow::Error),
}

impl From<sqlx::Error> for DirectoryError {
    fn from(err: sqlx::Error) -> Self {
        let unique_violation = err
            .as_database_error()
            .is_some_and(|db_err| db_err.is_unique_violation());

        if unique_violation {
            DirectoryError::Duplicate
        } else {
            DirectoryError::Backend(err.into())
        }
    }
}

/// Lookup and creation of account records
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Find an account whose email or username matches
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<AccountRecord>, DirectoryError>;

    /// Find an account by email
    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, DirectoryError>;

    /// Persist a new account and return it with its assigned id
    async fn create(&self, account: NewAccount) -> Result<AccountRecord, DirectoryError>;
}

/// PostgreSQL-backed account directory
#[derive(Clone)]
pub struct PgAccountDirectory {
    pool: PgPool,
}

impl PgAccountDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for PgAccountDirectory {
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<AccountRecord>, DirectoryError> {
        let account = sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, email, username, password_hash, created_at, updated_at, created_by, updated_by
            FROM users
            WHERE email = $1 OR username = $2
            LIMIT 1
            "#,
        )
        .bind(email)
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, DirectoryError> {
        let account = sqlx::query_as::<_, AccountRecord>(
            r#"
            SELECT id, email, username, password_hash, created_at, updated_at, created_by, updated_by
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn create(&self, account: NewAccount) -> Result<AccountRecord, DirectoryError> {
        let record = sqlx::query_as::<_, AccountRecord>(
            r#"
            INSERT INTO users (email, username, password_hash, created_by, updated_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, email, username, password_hash, created_at, updated_at, created_by, updated_by
            "#,
        )
        .bind(&account.email)
        .bind(&account.username)
        .bind(&account.password_hash)
        .bind(&account.created_by)
        .bind(&account.updated_by)
        .fetch_one(&self.pool)
        .await?;

        Ok(record)
    }
}
