//! services/forge/src/adapters/db.rs
//!
//! This module contains the database adapter, the concrete implementation of the
//! `SubmissionStore` and `CredentialStore` ports from the `core` crate. It handles
//! all interactions with the SQLite database using `sqlx`.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use page_forge_core::domain::{ContactSubmission, UserAccount};
use page_forge_core::ports::{CredentialStore, PortError, PortResult, SubmissionStore};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use tracing::{debug, warn};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements both storage ports over one pool.
#[derive(Clone)]
pub struct DbAdapter {
    pool: SqlitePool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Builds a pool without opening a connection, so an unreachable database
    /// surfaces on first use rather than at startup. The file is created if missing.
    pub fn connect_lazy(database_url: &str) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_lazy_with(options);
        Ok(Self::new(pool))
    }

    /// A private in-memory database. A single connection that is never
    /// recycled keeps the data alive for the life of the pool.
    pub fn in_memory() -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("static in-memory SQLite URL is valid");
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_lazy_with(options);
        Self::new(pool)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::Error> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct SubmissionRecord {
    id: i64,
    name: String,
    email: String,
    message: String,
    submitted_at: DateTime<Utc>,
}
impl SubmissionRecord {
    fn to_domain(self) -> ContactSubmission {
        ContactSubmission {
            id: self.id,
            name: self.name,
            email: self.email,
            message: self.message,
            submitted_at: self.submitted_at,
        }
    }
}

#[derive(FromRow)]
struct UserRecord {
    id: i64,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
}
impl UserRecord {
    fn to_domain(self) -> UserAccount {
        UserAccount {
            id: self.id,
            username: self.username,
            email: self.email,
            created_at: self.created_at,
        }
    }
}

//=========================================================================================
// Port Implementations
//=========================================================================================

#[async_trait]
impl SubmissionStore for DbAdapter {
    async fn insert_submission(
        &self,
        name: &str,
        email: &str,
        message: &str,
    ) -> PortResult<ContactSubmission> {
        let record = sqlx::query_as::<_, SubmissionRecord>(
            "INSERT INTO contact_submissions (name, email, message, submitted_at) VALUES (?1, ?2, ?3, ?4) \
             RETURNING id, name, email, message, submitted_at",
        )
        .bind(name)
        .bind(email)
        .bind(message)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;

        debug!(id = record.id, "Stored contact submission.");
        Ok(record.to_domain())
    }

    async fn list_submissions(&self) -> PortResult<Vec<ContactSubmission>> {
        let records = sqlx::query_as::<_, SubmissionRecord>(
            "SELECT id, name, email, message, submitted_at FROM contact_submissions ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| PortError::Storage(e.to_string()))?;

        let submissions = records.into_iter().map(|r| r.to_domain()).collect();
        Ok(submissions)
    }
}

#[async_trait]
impl CredentialStore for DbAdapter {
    async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> PortResult<UserAccount> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (username, email, password, created_at) VALUES (?1, ?2, ?3, ?4) \
             RETURNING id, username, email, created_at",
        )
        .bind(username)
        .bind(email)
        .bind(password)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                PortError::DuplicateUsername(username.to_string())
            }
            _ => PortError::Storage(e.to_string()),
        })?;

        Ok(record.to_domain())
    }

    async fn login(&self, username: &str, password: &str) -> bool {
        let matches = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM users WHERE username = ?1 AND password = ?2",
        )
        .bind(username)
        .bind(password)
        .fetch_one(&self.pool)
        .await;

        match matches {
            Ok(count) => count > 0,
            Err(e) => {
                // A broken store reads as "no such account".
                warn!("Login lookup failed: {}", e);
                false
            }
        }
    }
}
