//! PostgreSQL store.

use chrono::NaiveDate;
use sqlx::postgres::{PgPool, PgPoolOptions};
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::domain::{NewSubmission, SearchFilters, Station, SubmissionId, SubmissionSummary};

use super::FoodStore;
use super::error::StoreError;
use super::query::{SUMMARY_GROUP_ORDER, SUMMARY_SELECT, SearchQuery};

/// Submission store backed by a PostgreSQL connection pool.
///
/// Cloning is cheap and shares the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

/// A summary row as it comes out of the database.
#[derive(Debug, sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    name: String,
    tags: String,
    price_tag: String,
    author: Option<String>,
    recommendations: Option<String>,
    date_submitted: NaiveDate,
    stations: Vec<String>,
}

impl TryFrom<SummaryRow> for SubmissionSummary {
    type Error = StoreError;

    fn try_from(row: SummaryRow) -> Result<Self, Self::Error> {
        let price_tag = row
            .price_tag
            .parse()
            .map_err(|e| StoreError::InvalidRow(format!("submission {}: {e}", row.id)))?;

        Ok(SubmissionSummary {
            id: SubmissionId(row.id),
            name: row.name,
            tags: row.tags,
            price_tag,
            author: row.author,
            recommendations: row.recommendations,
            date_submitted: row.date_submitted,
            stations: row.stations,
        })
    }
}

impl PgStore {
    /// Open the connection pool.
    ///
    /// Fails if the first connection can't be established within the
    /// acquire timeout.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;

        info!(
            max_connections = config.max_connections,
            "connected to database"
        );
        Ok(Self { pool })
    }

    /// Close every connection in the pool, waiting for in-flight queries.
    pub async fn close(&self) {
        self.pool.close().await;
        info!("database pool closed");
    }
}

impl FoodStore for PgStore {
    async fn stations(&self) -> Result<Vec<Station>, StoreError> {
        let rows: Vec<(String, Option<f64>, Option<f64>)> = sqlx::query_as(
            "SELECT name, latitude, longitude FROM mrt_stations WHERE name IS NOT NULL ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(name, latitude, longitude)| Station::new(name, latitude, longitude))
            .collect())
    }

    async fn station_names(&self) -> Result<Vec<String>, StoreError> {
        let names: Vec<String> =
            sqlx::query_scalar("SELECT name FROM mrt_stations WHERE name IS NOT NULL ORDER BY name")
                .fetch_all(&self.pool)
                .await?;
        Ok(names)
    }

    async fn insert_submission(&self, submission: &NewSubmission) -> Result<SubmissionId, StoreError> {
        // Dropping `tx` without commit rolls everything back.
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO submissions (name, tags, price_tag, author, recommendations, date_submitted) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING id",
        )
        .bind(&submission.name)
        .bind(&submission.tags)
        .bind(submission.price_tag.as_str())
        .bind(submission.author.as_deref())
        .bind(submission.recommendations.as_deref())
        .bind(submission.date_submitted)
        .fetch_one(&mut *tx)
        .await?;

        for station in &submission.stations {
            let linked = sqlx::query(
                "INSERT INTO submission_stations (submission_id, station_id) \
                 SELECT $1, id FROM mrt_stations WHERE name = $2",
            )
            .bind(id)
            .bind(station)
            .execute(&mut *tx)
            .await?
            .rows_affected();

            if linked != 1 {
                return Err(StoreError::UnknownStation(station.clone()));
            }
        }

        tx.commit().await?;
        Ok(SubmissionId(id))
    }

    async fn submission(&self, id: SubmissionId) -> Result<Option<SubmissionSummary>, StoreError> {
        let sql = format!("{SUMMARY_SELECT} WHERE s.id = $1{SUMMARY_GROUP_ORDER}");
        let row: Option<SummaryRow> = sqlx::query_as(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await?;

        row.map(SubmissionSummary::try_from).transpose()
    }

    async fn stored_tags(&self) -> Result<Vec<String>, StoreError> {
        let tags: Vec<String> = sqlx::query_scalar("SELECT tags FROM submissions WHERE tags IS NOT NULL")
            .fetch_all(&self.pool)
            .await?;
        Ok(tags)
    }

    async fn authors(&self) -> Result<Vec<String>, StoreError> {
        let authors: Vec<String> = sqlx::query_scalar(
            "SELECT author FROM submissions WHERE author IS NOT NULL \
             GROUP BY author ORDER BY MIN(id)",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(authors)
    }

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<SubmissionSummary>, StoreError> {
        let query = SearchQuery::from_filters(filters);
        let sql = query.sql();
        debug!(
            %sql,
            predicates = query.predicates().len(),
            params = query.params().len(),
            "running search"
        );

        let mut statement = sqlx::query_as::<_, SummaryRow>(&sql);
        for param in query.params() {
            statement = statement.bind(param);
        }

        statement
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(SubmissionSummary::try_from)
            .collect()
    }
}
