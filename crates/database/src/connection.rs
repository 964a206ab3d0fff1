use crate::error::DbError;
use crate::source::DataSource;
use async_trait::async_trait;
use core_types::{DeliveryRecord, MatchAwardRecord};
use rust_decimal::Decimal;
use sqlx::postgres::PgConnection;
use sqlx::{Connection, FromRow};
use std::env;

/// Reads deliveries and awards from PostgreSQL.
///
/// Holds only the connection URL. Each fetch opens its own connection and
/// closes it before returning, so nothing stays checked out between loads.
#[derive(Clone)]
pub struct PgSource {
    database_url: String,
}

#[derive(Debug, FromRow)]
struct DbDelivery {
    striker: String,
    bowler: String,
    runs_scored: i32,
    wicket_confirmed: bool,
    ball_no: Decimal,
}

#[derive(Debug, FromRow)]
struct DbAward {
    player_of_match: String,
}

impl std::fmt::Debug for PgSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgSource").finish_non_exhaustive()
    }
}

impl PgSource {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
        }
    }

    /// Builds a source from the URL held in environment variable `var`.
    ///
    /// A `.env` file is honored when present.
    pub fn from_env(var: &str) -> Result<Self, DbError> {
        dotenvy::dotenv().ok();
        let database_url = env::var(var)
            .map_err(|_e| DbError::ConnectionConfigError(format!("{var} must be set.")))?;
        Ok(Self::new(database_url))
    }

    async fn connect(&self) -> Result<PgConnection, DbError> {
        Ok(PgConnection::connect(&self.database_url).await?)
    }
}

#[async_trait]
impl DataSource for PgSource {
    async fn fetch_deliveries(&self) -> Result<Vec<DeliveryRecord>, DbError> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, DbDelivery>(
            r#"
            SELECT striker, bowler, runs_scored, wicket_confirmed, ball_no
            FROM deliveries
            ORDER BY delivery_id ASC
            "#,
        )
        .fetch_all(&mut conn)
        .await;
        let closed = conn.close().await;

        settle(rows, closed)?
            .into_iter()
            .enumerate()
            .map(|(index, row)| {
                let runs_scored = u32::try_from(row.runs_scored).map_err(|_| DbError::SchemaError {
                    path: "deliveries".to_string(),
                    line: index as u64 + 1,
                    message: format!("negative runs_scored {}", row.runs_scored),
                })?;
                Ok(DeliveryRecord::new(
                    row.striker,
                    row.bowler,
                    runs_scored,
                    row.wicket_confirmed,
                    row.ball_no,
                ))
            })
            .collect()
    }

    async fn fetch_awards(&self) -> Result<Vec<MatchAwardRecord>, DbError> {
        let mut conn = self.connect().await?;
        let rows = sqlx::query_as::<_, DbAward>(
            "SELECT player_of_match FROM match_awards ORDER BY match_id ASC",
        )
        .fetch_all(&mut conn)
        .await;
        let closed = conn.close().await;

        Ok(settle(rows, closed)?
            .into_iter()
            .map(|row| MatchAwardRecord::new(row.player_of_match))
            .collect())
    }

    fn describe(&self) -> String {
        "postgres".to_string()
    }
}

/// Applies the bundled schema migrations through a short-lived connection.
pub async fn run_migrations(source: &PgSource) -> Result<(), DbError> {
    let mut conn = source.connect().await?;
    let applied = sqlx::migrate!("./migrations").run(&mut conn).await;
    let closed = conn.close().await;

    applied?;
    closed?;
    Ok(())
}

/// Picks the error to report after a query and the close that follows it.
/// A failed query wins over a failed close.
fn settle<T>(result: Result<T, sqlx::Error>, closed: Result<(), sqlx::Error>) -> Result<T, DbError> {
    let value = result?;
    closed?;
    Ok(value)
}
