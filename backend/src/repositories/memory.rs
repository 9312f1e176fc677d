//! In-memory account directory
//!
//! Enforces the same uniqueness rules as the `users` table. Used for local
//! runs without PostgreSQL and as the directory behind router tests.

use super::account::{AccountDirectory, AccountRecord, DirectoryError, NewAccount};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

#[derive(Default)]
pub struct InMemoryAccountDirectory {
    accounts: Mutex<Vec<AccountRecord>>,
}

impl InMemoryAccountDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored accounts
    pub async fn len(&self) -> usize {
        self.accounts.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl AccountDirectory for InMemoryAccountDirectory {
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<AccountRecord>, DirectoryError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts
            .iter()
            .find(|a| a.email == email || a.username == username)
            .cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<AccountRecord>, DirectoryError> {
        let accounts = self.accounts.lock().await;
        Ok(accounts.iter().find(|a| a.email == email).cloned())
    }

    async fn create(&self, account: NewAccount) -> Result<AccountRecord, DirectoryError> {
        let mut accounts = self.accounts.lock().await;

        if accounts
            .iter()
            .any(|a| a.email == account.email || a.username == account.username)
        {
            return Err(DirectoryError::Duplicate);
        }

        let now = Utc::now();
        let record = AccountRecord {
            id: accounts.len() as i64 + 1,
            email: account.email,
            username: account.username,
            password_hash: account.password_hash,
            created_at: now,
            updated_at: now,
            created_by: account.created_by,
            updated_by: account.updated_by,
        };
        accounts.push(record.clone());

        Ok(record)
    }
}
