//! Best-effort prediction logging to PostgreSQL
//!
//! Each successful prediction dispatches one parameterized INSERT on a
//! spawned task. Connection and query failures are logged at warn level and
//! swallowed; the response path never waits on or learns about this channel.
//! When the environment lacks the connection settings, logging is disabled
//! silently and the service runs without it.

use std::env;
use std::sync::Arc;

use tokio_postgres::NoTls;
use tracing::{info, warn};

/// One prediction record bound for the external store.
#[derive(Debug, Clone)]
pub struct PredictionRow {
    /// Engine cylinder count
    pub cylinders: i32,
    /// Engine horsepower
    pub horsepower: f64,
    /// Vehicle weight
    pub weight: f64,
    /// Canonical origin label
    pub origin: String,
    /// Predicted mpg
    pub prediction: f64,
}

/// Capability seam for the prediction log.
///
/// Implementations must not block the caller and must not surface failures;
/// the prediction pipeline has no knowledge of persistence failure modes.
pub trait PredictionSink: Send + Sync {
    /// Dispatch one row, fire-and-forget.
    fn record(&self, row: PredictionRow);
}

/// Sink used when the database is not configured.
#[derive(Debug, Default)]
pub struct NoopSink;

impl PredictionSink for NoopSink {
    fn record(&self, _row: PredictionRow) {}
}

/// Connection settings for the PostgreSQL sink, sourced from the process
/// environment.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Database host
    pub host: String,
    /// Database port, default 5432
    pub port: u16,
    /// Login user
    pub user: String,
    /// Login password
    pub password: String,
    /// Database name
    pub dbname: String,
    /// Target table, default "predictions"
    pub table: String,
}

impl DbConfig {
    /// Read `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME`, and
    /// `DB_TABLE` from the environment.
    ///
    /// Returns `None` when host, user, password, or database name is absent,
    /// which disables logging entirely without error.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let host = env::var("DB_HOST").ok()?;
        let user = env::var("DB_USER").ok()?;
        let password = env::var("DB_PASSWORD").ok()?;
        let dbname = env::var("DB_NAME").ok()?;
        let port = env::var("DB_PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5432);
        let table = env::var("DB_TABLE").unwrap_or_else(|_| "predictions".to_string());
        Some(Self {
            host,
            port,
            user,
            password,
            dbname,
            table,
        })
    }

    fn connection_string(&self) -> String {
        format!(
            "host={} port={} user={} password={} dbname={}",
            self.host, self.port, self.user, self.password, self.dbname
        )
    }
}

/// Fire-and-forget PostgreSQL sink: one connection and one INSERT per row.
pub struct PgPredictionSink {
    config: DbConfig,
}

impl PgPredictionSink {
    /// Create a sink for the given connection settings.
    #[must_use]
    pub fn new(config: DbConfig) -> Self {
        Self { config }
    }
}

impl PredictionSink for PgPredictionSink {
    fn record(&self, row: PredictionRow) {
        let config = self.config.clone();
        tokio::spawn(async move {
            if let Err(e) = insert_row(&config, &row).await {
                warn!("prediction log insert failed: {e}");
            }
        });
    }
}

async fn insert_row(
    config: &DbConfig,
    row: &PredictionRow,
) -> std::result::Result<(), tokio_postgres::Error> {
    let (client, connection) =
        tokio_postgres::connect(&config.connection_string(), NoTls).await?;
    tokio::spawn(async move {
        if let Err(e) = connection.await {
            warn!("prediction log connection error: {e}");
        }
    });

    let statement = format!(
        "INSERT INTO {} (cylinders, horsepower, weight, origin, prediction) \
         VALUES ($1, $2, $3, $4, $5)",
        config.table
    );
    client
        .execute(
            statement.as_str(),
            &[
                &row.cylinders,
                &row.horsepower,
                &row.weight,
                &row.origin,
                &row.prediction,
            ],
        )
        .await?;
    Ok(())
}

/// Choose the sink from the environment: PostgreSQL when fully configured,
/// no-op otherwise.
#[must_use]
pub fn sink_from_env() -> Arc<dyn PredictionSink> {
    match DbConfig::from_env() {
        Some(config) => {
            info!(
                host = %config.host,
                table = %config.table,
                "prediction logging enabled"
            );
            Arc::new(PgPredictionSink::new(config))
        }
        None => Arc::new(NoopSink),
    }
}
