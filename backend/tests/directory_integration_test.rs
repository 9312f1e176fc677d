//! PostgreSQL account directory tests
//!
//! Run with `--features integration` against `TEST_DATABASE_URL`.

#![cfg(feature = "integration")]

mod common;

use music_catalog_backend::{
    db,
    repositories::{AccountDirectory, DirectoryError, NewAccount, PgAccountDirectory},
};

async fn directory() -> PgAccountDirectory {
    let config = common::test_config("http://127.0.0.1:1");
    let pool = db::create_pool(&config.database.url, config.database.max_connections)
        .await
        .expect("Failed to create test database pool");
    db::run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    PgAccountDirectory::new(pool)
}

fn new_account() -> NewAccount {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let email = format!("user_{}@example.com", suffix);
    NewAccount {
        username: format!("user_{}", &suffix[..12]),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        created_by: email.clone(),
        updated_by: email.clone(),
        email,
    }
}

#[tokio::test]
async fn test_create_then_find() {
    let directory = directory().await;
    let account = new_account();

    let created = directory.create(account.clone()).await.unwrap();
    assert!(created.id > 0);
    assert_eq!(created.email, account.email);
    assert_eq!(created.created_by, account.email);

    let by_email = directory.find_by_email(&account.email).await.unwrap().unwrap();
    assert_eq!(by_email.id, created.id);

    let by_username = directory
        .find_by_email_or_username("nobody@example.com", &account.username)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_username.id, created.id);
}

#[tokio::test]
async fn test_unique_violation_is_duplicate() {
    let directory = directory().await;
    let account = new_account();
    directory.create(account.clone()).await.unwrap();

    let same_email = NewAccount {
        username: format!("{}_2", account.username),
        ..account
    };
    let err = directory.create(same_email).await.unwrap_err();
    assert!(matches!(err, DirectoryError::Duplicate));
}

#[tokio::test]
async fn test_missing_account_is_none() {
    let directory = directory().await;
    let found = directory.find_by_email("missing@example.com").await.unwrap();
    assert!(found.is_none());
}
