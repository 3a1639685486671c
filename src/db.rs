use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::query_dsl::methods::ExecuteDsl;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::result::Error as DieselError;
use diesel::sqlite::SqliteConnection;
use tracing::warn;

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// How many times a write is retried when SQLite reports the database as busy
const MAX_RETRIES: u32 = 5;

/// Delay before the first retry; later retries wait proportionally longer
const RETRY_BASE_DELAY: Duration = Duration::from_millis(25);

/// Per-connection SQLite settings applied whenever the pool hands out a connection
#[derive(Debug, Clone, Copy)]
struct ConnectionOptions {
    busy_timeout: Duration,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionOptions {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
        conn.batch_execute(&format!(
            "PRAGMA foreign_keys = ON; PRAGMA busy_timeout = {};",
            self.busy_timeout.as_millis()
        ))
        .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Builds the connection pool for the given SQLite database URL
pub fn init_pool(database_url: &str) -> Result<DbPool, r2d2::Error> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(ConnectionOptions {
            busy_timeout: Duration::from_secs(5),
        }))
        .build(manager)
}

/// Whether an error is SQLite refusing the write because another writer holds the lock
fn is_busy(err: &DieselError) -> bool {
    match err {
        DieselError::DatabaseError(_, info) => {
            let message = info.message();
            message.contains("locked") || message.contains("busy")
        }
        _ => false,
    }
}

/// Runs a database operation, retrying it while SQLite reports the database as busy
pub async fn retry_on_busy<T, F>(mut op: F) -> QueryResult<T>
where
    F: FnMut() -> QueryResult<T>,
{
    let mut attempt = 0;
    loop {
        match op() {
            Err(err) if is_busy(&err) && attempt < MAX_RETRIES => {
                attempt += 1;
                let delay = RETRY_BASE_DELAY * attempt;
                warn!(attempt, ?delay, "Database busy, retrying: {}", err);
                tokio::time::sleep(delay).await;
            }
            result => return result,
        }
    }
}

/// Executes a write statement with [`retry_on_busy`]
pub trait ExecuteWithRetry {
    async fn execute_with_retry(self, conn: &mut SqliteConnection) -> QueryResult<usize>;
}

impl<Q> ExecuteWithRetry for Q
where
    Q: ExecuteDsl<SqliteConnection> + Clone,
{
    async fn execute_with_retry(self, conn: &mut SqliteConnection) -> QueryResult<usize> {
        retry_on_busy(|| ExecuteDsl::execute(self.clone(), conn)).await
    }
}
