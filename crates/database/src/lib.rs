//! SQLite persistence layer for the Bale assistant bot.
//!
//! This crate provides async database operations for accounts (login state,
//! quota, chosen roles) and chat sessions using SQLx with SQLite.
//!
//! # Example
//!
//! ```no_run
//! use database::{account, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Connect and run migrations
//!     let db = Database::connect("sqlite:bot.db?mode=rwc").await?;
//!     db.migrate().await?;
//!
//!     // Register a chat identity
//!     let (account, created) = account::get_or_create_account(db.pool(), "123456").await?;
//!     println!("{} (new: {})", account.chat_id, created);
//!
//!     Ok(())
//! }
//! ```

pub mod account;
pub mod catalog;
pub mod error;
pub mod models;
pub mod session;
pub mod validation;

pub use catalog::{AssistantRole, CatalogEntry, SystemRole, ASSISTANT_ROLES, SYSTEM_ROLES};
pub use error::{DatabaseError, Result};
pub use models::{Account, ChatSession};
pub use session::Exchange;
pub use validation::ValidationError;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `?mode=rwc` to create the database file if it doesn't exist.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # async fn example() -> database::Result<()> {
    /// let db = database::Database::connect("sqlite:data/bot.db?mode=rwc").await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?
            .create_if_missing(true)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Connect to a private in-memory database (for tests).
    ///
    /// Uses a single connection so every query sees the same database.
    pub async fn connect_in_memory() -> Result<Self> {
        Self::connect_with_pool_size("sqlite::memory:", 1).await
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_migrate_twice() {
        let db = Database::connect_in_memory().await.unwrap();
        db.migrate().await.unwrap();
        db.migrate().await.unwrap();
        assert_eq!(account::count_accounts(db.pool()).await.unwrap(), 0);
    }
}
