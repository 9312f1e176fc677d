//! Account repositories
//!
//! Provides the account directory abstraction and its implementations.

pub mod account;
pub mod memory;

pub use account::{AccountDirectory, AccountRecord, DirectoryError, NewAccount, PgAccountDirectory};
pub use memory::InMemoryAccountDirectory;
