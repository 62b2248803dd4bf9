//! MySQL row source.
//!
//! Rows are sampled with a bounded `SELECT ... LIMIT` per table, every value
//! cast to its text form so the core only ever sees nullable strings. A
//! fetched batch is finite and not restartable; re-reading a table means
//! re-querying it.

use async_trait::async_trait;
use maskdb_core::{Row, TableSpec};
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions};
use sqlx::Row as _;
use std::time::Duration;

use crate::config::ConnectionConfig;
use crate::error::Error;

/// Connection attempts before a transient failure becomes fatal.
const CONNECT_ATTEMPTS: u32 = 3;

/// Delay between connection attempts.
const CONNECT_BACKOFF: Duration = Duration::from_secs(1);

/// A per-table supply of rows.
///
/// Implementations yield at most `limit` rows, each mapping every selected
/// column (designated plus key) to a nullable text value.
#[async_trait]
pub trait RowSource {
    /// Fetch the bounded sample for one table.
    async fn fetch_rows(&self, spec: &TableSpec, limit: u32) -> Result<Vec<Row>, Error>;
}

/// MySQL-backed row source and statement executor.
pub struct Database {
    pool: MySqlPool,
}

impl Database {
    /// Connect to an endpoint, retrying transient failures with bounded
    /// attempts. Auth failures and unknown databases abort immediately.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self, Error> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.username)
            .password(&config.password)
            .database(&config.database);

        let mut attempt = 1u32;
        loop {
            match MySqlPoolOptions::new()
                .max_connections(1)
                .connect_with(options.clone())
                .await
            {
                Ok(pool) => {
                    tracing::info!(
                        host = %config.host,
                        database = %config.database,
                        "connected"
                    );
                    return Ok(Self { pool });
                }
                Err(err) => {
                    let err = Error::from(err);
                    if attempt >= CONNECT_ATTEMPTS || !err.is_transient() {
                        return Err(err);
                    }
                    tracing::warn!(attempt, error = %err, "transient connect failure, retrying");
                    tokio::time::sleep(CONNECT_BACKOFF).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Execute one rendered statement, returning the affected row count.
    pub async fn execute(&self, statement: &str) -> Result<u64, Error> {
        let done = sqlx::query(statement).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}

#[async_trait]
impl RowSource for Database {
    async fn fetch_rows(&self, spec: &TableSpec, limit: u32) -> Result<Vec<Row>, Error> {
        let columns = spec.select_columns();
        let select_list: Vec<String> = columns
            .iter()
            .map(|column| format!("CAST({column} AS CHAR) AS {column}"))
            .collect();
        // Identifiers were validated with the spec; only the values are
        // untrusted, and those travel back as data.
        let query = format!(
            "SELECT {} FROM {} LIMIT {}",
            select_list.join(","),
            spec.table(),
            limit
        );
        tracing::debug!(table = spec.table(), %query, "sampling table");

        let fetched = sqlx::query(&query).fetch_all(&self.pool).await?;

        let mut rows = Vec::with_capacity(fetched.len());
        for db_row in fetched {
            let mut row = Row::new();
            for (i, column) in columns.iter().enumerate() {
                let value: Option<String> = db_row.try_get(i)?;
                row.push(*column, value);
            }
            rows.push(row);
        }

        tracing::debug!(table = spec.table(), rows = rows.len(), "sample fetched");
        Ok(rows)
    }
}
