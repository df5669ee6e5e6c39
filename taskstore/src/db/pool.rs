//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::info;

use crate::config::{parse_descriptor, ConnectionConfig};
use crate::error::{Error, Result};

/// Create a PostgreSQL connection pool from a descriptor (URL or key/value).
///
/// # Errors
///
/// `InvalidDescriptor` if the descriptor does not parse, `Connection` if
/// the first connection cannot be opened.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool("host=localhost dbname=tasks sslmode=disable").await?;
/// ```
pub async fn create_pool(descriptor: &str) -> Result<PgPool> {
    let (options, max_connections) = parse_descriptor(descriptor)?;
    create_pool_with_options(options, max_connections).await
}

/// Create a PostgreSQL connection pool from typed settings.
pub async fn create_pool_from_config(config: &ConnectionConfig) -> Result<PgPool> {
    create_pool_with_options(config.to_connect_options(), config.max_connections).await
}

/// Create a PostgreSQL connection pool with custom options.
///
/// Opens one connection eagerly so that bad hosts and credentials surface
/// here rather than on the first query.
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
) -> Result<PgPool> {
    info!(
        host = options.get_host(),
        port = options.get_port(),
        database = options.get_database().unwrap_or_default(),
        max_connections,
        "connecting to database"
    );

    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
        .map_err(Error::Connection)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Integration tests require a real database, given in key/value form
    // Run with: TASKSTORE_TEST_DSN="host=... dbname=..." cargo test -p taskstore -- --ignored

    #[tokio::test]
    async fn bad_descriptor_fails_before_connecting() {
        let err = create_pool("host localhost").await.unwrap_err();
        assert!(matches!(err, Error::InvalidDescriptor { .. }));
        assert!(err.is_connection());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn key_value_descriptor_sizes_pool() {
        let dsn = std::env::var("TASKSTORE_TEST_DSN").expect("TASKSTORE_TEST_DSN required");
        let pool = create_pool(&format!(
            "{dsn} pool_max_conns=2 application_name='taskstore pool test'"
        ))
        .await
        .expect("pool creation failed");

        assert_eq!(pool.options().get_max_connections(), 2);

        let handles: Vec<_> = (0..6)
            .map(|_| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    sqlx::query_scalar::<_, String>("SELECT current_setting('application_name')")
                        .fetch_one(&pool)
                        .await
                        .expect("query failed")
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.await.expect("task panicked"), "taskstore pool test");
        }
        assert!(pool.size() <= 2);
    }
}
