//! SQLite connection pool wrapper for the storage module.
//!
//! Provides [`SqlitePoolManager`] holding the single connection shared for the process lifetime;
//! the database file is created if it does not exist. [`retry_transient`] bounds how long
//! startup waits on a locked database.

use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::StorageError;

/// SQLite primary result codes for "database is busy" and "table is locked".
const SQLITE_BUSY: i32 = 5;
const SQLITE_LOCKED: i32 = 6;

/// Manages a single-connection SQLite pool; creates the database file if missing.
#[derive(Clone)]
pub struct SqlitePoolManager {
    /// Underlying sqlx pool for executing queries.
    pool: SqlitePool,
}

impl SqlitePoolManager {
    /// Creates a pool for the given database URL (`sqlite://path`, a bare path, or `sqlite::memory:`).
    pub async fn new(database_url: &str) -> Result<Self, sqlx::Error> {
        info!(database_url = %database_url, "Initializing SQLite pool");

        // No busy wait inside SQLite: a locked database fails at once and `retry_transient`
        // owns the spacing between attempts.
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::ZERO);

        // Commands are handled one at a time, so one connection is all the bot ever needs. It is
        // never recycled: an in-memory database lives exactly as long as its connection.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Returns the underlying pool for running queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Bounded retry for store acquisition: `max_attempts` tries spaced `delay` apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(1))
    }
}

/// Returns true for errors that mean "store is locked or busy, try again".
pub(crate) fn is_transient(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            let primary = db_err
                .code()
                .and_then(|c| c.parse::<i32>().ok())
                .map(|c| c & 0xff);
            matches!(primary, Some(SQLITE_BUSY) | Some(SQLITE_LOCKED))
                || db_err.message().to_lowercase().contains("locked")
        }
        sqlx::Error::PoolTimedOut => true,
        _ => false,
    }
}

/// Runs `op` until it succeeds, fails with a non-transient error, or the policy is exhausted.
///
/// Transient errors (see `is_transient`) are retried after `policy.delay`; exhausting the policy
/// yields [`StorageError::Unavailable`]. Any other error is returned at once.
pub async fn retry_transient<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, StorageError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt: u32 = 0;
    loop {
        attempt += 1;
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if is_transient(&e) => {
                if attempt >= policy.max_attempts {
                    warn!(attempts = attempt, error = %e, "Database still locked, giving up");
                    return Err(StorageError::Unavailable {
                        attempts: attempt,
                        last_error: e.to_string(),
                    });
                }
                warn!(
                    attempt,
                    max_attempts = policy.max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    "Database is locked, retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy::new(max_attempts, Duration::from_millis(1))
    }

    #[test]
    fn test_default_policy_is_five_attempts_one_second_apart() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_retry_succeeds_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = retry_transient(fast_policy(5), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(sqlx::Error::PoolTimedOut)
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_transient(fast_policy(5), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::PoolTimedOut) }
        })
        .await;

        match result {
            Err(StorageError::Unavailable { attempts, .. }) => assert_eq!(attempts, 5),
            other => panic!("expected Unavailable, got {:?}", other),
        }
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test]
    async fn test_retry_does_not_retry_other_errors() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = retry_transient(fast_policy(5), || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::RowNotFound) }
        })
        .await;

        assert!(matches!(result, Err(StorageError::Database(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
