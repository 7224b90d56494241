//! Account document store.
//!
//! Each account aggregate is persisted as one JSON document per row, with a
//! version column checked on every write. Services already serialize writes
//! per account, so a version mismatch means an external writer touched the
//! row and is surfaced as a store error rather than retried.

use anyhow::{bail, Context, Result};
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;

use crate::domain::models::Account;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:rewards.db";

/// AccountDb manages database operations for account aggregates.
#[derive(Clone)]
pub struct AccountDb {
    pool: Arc<SqlitePool>,
}

impl AccountDb {
    /// Create a new database connection.
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        let pool = SqlitePool::connect(url).await?;
        Self::setup_schema(&pool).await?;

        Ok(Self {
            pool: Arc::new(pool),
        })
    }

    /// Initialize the standard database, honoring a `DATABASE_URL` override.
    pub async fn init() -> Result<Self> {
        let url = std::env::var("DATABASE_URL").unwrap_or_else(|_| DATABASE_URL.to_string());
        Self::new(&url).await
    }

    /// Initialize a test database with a unique name.
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);
        Self::new(&db_url).await
    }

    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS accounts (
                name TEXT PRIMARY KEY,
                doc TEXT NOT NULL,
                version INTEGER NOT NULL DEFAULT 0
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Insert a fresh aggregate. Fails if the name is already taken.
    pub async fn insert(&self, account: &Account) -> Result<()> {
        let doc = serde_json::to_string(account)?;
        sqlx::query("INSERT INTO accounts (name, doc, version) VALUES (?, ?, 0)")
            .bind(&account.name)
            .bind(&doc)
            .execute(&*self.pool)
            .await
            .with_context(|| format!("failed to insert account {}", account.name))?;
        Ok(())
    }

    /// Load an aggregate and the version it was read at.
    pub async fn load(&self, name: &str) -> Result<Option<(Account, i64)>> {
        let row = sqlx::query("SELECT doc, version FROM accounts WHERE name = ?")
            .bind(name)
            .fetch_optional(&*self.pool)
            .await?;

        match row {
            Some(r) => {
                let doc: String = r.get("doc");
                let version: i64 = r.get("version");
                let account: Account = serde_json::from_str(&doc)
                    .with_context(|| format!("corrupt account document for {name}"))?;
                Ok(Some((account, version)))
            }
            None => Ok(None),
        }
    }

    /// Write back an aggregate read at `expected_version`.
    ///
    /// Compare-and-swap on the version column: if the row moved since the
    /// read, nothing is written and the caller gets an error.
    pub async fn save(&self, account: &Account, expected_version: i64) -> Result<()> {
        let doc = serde_json::to_string(account)?;
        let result =
            sqlx::query("UPDATE accounts SET doc = ?, version = version + 1 WHERE name = ? AND version = ?")
                .bind(&doc)
                .bind(&account.name)
                .bind(expected_version)
                .execute(&*self.pool)
                .await?;

        if result.rows_affected() == 0 {
            bail!(
                "concurrent modification of account {} (version {} is stale)",
                account.name,
                expected_version
            );
        }
        Ok(())
    }
}
