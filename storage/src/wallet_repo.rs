//! Wallet repository: user registrations and balances.
//!
//! Two tables keyed by Telegram user id: `users` (display name, wallet address) and `balances`
//! (last-known balance, mirrored address, update time). Deleting a user always deletes the
//! balance row with it.

use chrono::Utc;
use sqlx::SqliteExecutor;
use tracing::{info, instrument};

use crate::error::StorageError;
use crate::models::{BalanceRecord, UserRecord};
use crate::sqlite_pool::{retry_transient, RetryPolicy, SqlitePoolManager};

#[derive(Clone)]
pub struct WalletRepository {
    pool_manager: SqlitePoolManager,
}

impl WalletRepository {
    /// Opens the store with the default [`RetryPolicy`] (5 attempts, 1 s apart).
    pub async fn new(database_url: &str) -> Result<Self, StorageError> {
        Self::connect(database_url, RetryPolicy::default()).await
    }

    /// Opens the store and creates the schema, retrying while the database is locked.
    pub async fn connect(database_url: &str, policy: RetryPolicy) -> Result<Self, StorageError> {
        let repo = retry_transient(policy, || async move {
            let pool_manager = SqlitePoolManager::new(database_url).await?;
            let repo = Self { pool_manager };
            repo.init().await?;
            Ok(repo)
        })
        .await?;
        info!(database_url = %database_url, "Wallet store ready");
        Ok(repo)
    }

    async fn init(&self) -> Result<(), sqlx::Error> {
        info!("Creating database tables if not exist");

        let pool = self.pool_manager.pool();

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                user_id INTEGER PRIMARY KEY,
                username TEXT NOT NULL DEFAULT 'Unknown',
                address TEXT
            )
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_users_address ON users(address) WHERE address IS NOT NULL",
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS balances (
                user_id INTEGER PRIMARY KEY,
                address TEXT NOT NULL,
                balance REAL NOT NULL,
                timestamp TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
            )
            "#,
        )
        .execute(pool)
        .await?;

        info!("Tables 'users' and 'balances' ready");
        Ok(())
    }

    /// Inserts or fully replaces the user row. A different user already holding `address`
    /// yields [`StorageError::AlreadyExists`].
    #[instrument(skip(self))]
    pub async fn upsert_user(
        &self,
        user_id: i64,
        username: &str,
        address: &str,
    ) -> Result<(), StorageError> {
        upsert_user_with(self.pool_manager.pool(), user_id, username, address).await?;
        Ok(())
    }

    /// Inserts or fully replaces the balance row; `timestamp` is set to now.
    #[instrument(skip(self))]
    pub async fn upsert_balance(
        &self,
        user_id: i64,
        address: &str,
        balance: f64,
    ) -> Result<(), StorageError> {
        upsert_balance_with(self.pool_manager.pool(), user_id, address, balance).await?;
        Ok(())
    }

    /// Writes the user row and its balance row in one transaction.
    #[instrument(skip(self))]
    pub async fn register_wallet(
        &self,
        user_id: i64,
        username: &str,
        address: &str,
        balance: f64,
    ) -> Result<(), StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;
        upsert_user_with(&mut *tx, user_id, username, address).await?;
        upsert_balance_with(&mut *tx, user_id, address, balance).await?;
        tx.commit().await?;

        info!(user_id, address = %address, balance, "Registered wallet");
        Ok(())
    }

    pub async fn find_user_by_address(
        &self,
        address: &str,
    ) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, username, address FROM users WHERE address = ?",
        )
        .bind(address)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(user)
    }

    pub async fn find_user_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, StorageError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT user_id, username, address FROM users WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(user)
    }

    pub async fn find_balance_by_user_id(
        &self,
        user_id: i64,
    ) -> Result<Option<BalanceRecord>, StorageError> {
        let balance = sqlx::query_as::<_, BalanceRecord>(
            "SELECT user_id, address, balance, timestamp FROM balances WHERE user_id = ?",
        )
        .bind(user_id)
        .fetch_optional(self.pool_manager.pool())
        .await?;
        Ok(balance)
    }

    /// Removes the user and balance rows together. Returns true if anything was deleted.
    #[instrument(skip(self))]
    pub async fn delete_user_and_balance(&self, user_id: i64) -> Result<bool, StorageError> {
        let mut tx = self.pool_manager.pool().begin().await?;
        let users = sqlx::query("DELETE FROM users WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        let balances = sqlx::query("DELETE FROM balances WHERE user_id = ?")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        let deleted = users.rows_affected() + balances.rows_affected();
        info!(user_id, rows = deleted, "Deleted user and balance");
        Ok(deleted > 0)
    }

    /// Returns false when the user has no row.
    #[instrument(skip(self))]
    pub async fn update_username(&self, user_id: i64, name: &str) -> Result<bool, StorageError> {
        let result = sqlx::query("UPDATE users SET username = ? WHERE user_id = ?")
            .bind(name)
            .bind(user_id)
            .execute(self.pool_manager.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Stores a fresh balance and bumps `timestamp`. A missing balance row is rebuilt from the
    /// user's registered address; returns false when the user has no address at all.
    #[instrument(skip(self))]
    pub async fn update_balance(&self, user_id: i64, balance: f64) -> Result<bool, StorageError> {
        let pool = self.pool_manager.pool();
        let now = Utc::now();

        let updated = sqlx::query("UPDATE balances SET balance = ?, timestamp = ? WHERE user_id = ?")
            .bind(balance)
            .bind(now)
            .bind(user_id)
            .execute(pool)
            .await?;
        if updated.rows_affected() > 0 {
            return Ok(true);
        }

        let rebuilt = sqlx::query(
            r#"
            INSERT INTO balances (user_id, address, balance, timestamp)
            SELECT user_id, address, ?, ? FROM users WHERE user_id = ? AND address IS NOT NULL
            "#,
        )
        .bind(balance)
        .bind(now)
        .bind(user_id)
        .execute(pool)
        .await?;
        if rebuilt.rows_affected() > 0 {
            info!(user_id, "Balance row was missing, rebuilt from user record");
        }
        Ok(rebuilt.rows_affected() > 0)
    }
}

async fn upsert_user_with<'e, E>(
    executor: E,
    user_id: i64,
    username: &str,
    address: &str,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    // ON CONFLICT(user_id) rather than INSERT OR REPLACE: REPLACE would also evict another
    // user's row that holds the same address.
    sqlx::query(
        r#"
        INSERT INTO users (user_id, username, address) VALUES (?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET username = excluded.username, address = excluded.address
        "#,
    )
    .bind(user_id)
    .bind(username)
    .bind(address)
    .execute(executor)
    .await?;
    Ok(())
}

async fn upsert_balance_with<'e, E>(
    executor: E,
    user_id: i64,
    address: &str,
    balance: f64,
) -> Result<(), sqlx::Error>
where
    E: SqliteExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO balances (user_id, address, balance, timestamp) VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id) DO UPDATE SET
            address = excluded.address,
            balance = excluded.balance,
            timestamp = excluded.timestamp
        "#,
    )
    .bind(user_id)
    .bind(address)
    .bind(balance)
    .bind(Utc::now())
    .execute(executor)
    .await?;
    Ok(())
}
