//! `CompetitorRepository` for SQLite.

use async_trait::async_trait;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use backoffice_core::query::{FilterSet, ListQuery, Pagination};
use backoffice_core::shop::{
    round_cents, Competitor, CompetitorFilter, CompetitorSummary, NewCompetitor,
    UpdateCompetitorRequest,
};
use backoffice_core::storage::{CompetitorRepository, Paginated, Result};

use super::conversions::{format_datetime, json_column_to_string, row_to_competitor};
use super::error::{map_tokio_rusqlite_error, map_tokio_rusqlite_error_with_id};
use super::repository::{wrap_err, SqliteRepository};
use super::schema;

#[async_trait]
impl CompetitorRepository for SqliteRepository {
    async fn list_competitors(
        &self,
        filter: &CompetitorFilter,
        pagination: Pagination,
    ) -> Result<Paginated<Competitor>> {
        let mut filters = FilterSet::new();
        filters.equals(
            schema::COMPETITOR_THREAT_LEVEL_COLUMN,
            filter.threat_level.as_deref(),
        );

        let query = ListQuery::new(schema::COMPETITOR_COLUMNS, schema::COMPETITOR_FROM)
            .filters(filters)
            .order_by(schema::COMPETITOR_ORDER_BY)
            .paginate(pagination);

        self.fetch_page(query, row_to_competitor, "Competitor").await
    }

    async fn get_competitor(&self, id: i64) -> Result<Option<Competitor>> {
        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_COMPETITOR_BY_ID, [id], row_to_competitor)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Competitor", id.to_string()))
    }

    async fn create_competitor(&self, competitor: &NewCompetitor) -> Result<Competitor> {
        let competitor = competitor.clone();
        let top_items = json_column_to_string(competitor.top_items.as_ref())?;
        let sentiment = json_column_to_string(competitor.sentiment.as_ref())?;
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_COMPETITOR,
                    params![
                        competitor.name,
                        competitor.website,
                        competitor.distance,
                        competitor.kind,
                        competitor.threat_level.as_str(),
                        competitor.rating,
                        competitor.rating_change,
                        competitor.review_count,
                        competitor.avg_price,
                        competitor.price_diff,
                        competitor.strengths,
                        competitor.weaknesses,
                        top_items,
                        sentiment,
                        competitor.notes,
                        now,
                    ],
                )
                .map_err(wrap_err)?;
                let id = conn.last_insert_rowid();
                conn.query_row(schema::SELECT_COMPETITOR_BY_ID, [id], row_to_competitor)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Competitor"))
    }

    async fn update_competitor(
        &self,
        id: i64,
        update: &UpdateCompetitorRequest,
    ) -> Result<Competitor> {
        let update = update.clone();
        let threat_level = update.threat_level.map(|t| t.as_str());
        let top_items = json_column_to_string(update.top_items.as_ref())?;
        let sentiment = json_column_to_string(update.sentiment.as_ref())?;
        let now = format_datetime(&Utc::now());

        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(
                        schema::UPDATE_COMPETITOR,
                        params![
                            id,
                            update.name,
                            update.website,
                            update.distance,
                            update.kind,
                            threat_level,
                            update.rating,
                            update.rating_change,
                            update.review_count,
                            update.avg_price,
                            update.price_diff,
                            update.strengths,
                            update.weaknesses,
                            top_items,
                            sentiment,
                            update.notes,
                            now,
                        ],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                conn.query_row(schema::SELECT_COMPETITOR_BY_ID, [id], row_to_competitor)
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Competitor", id.to_string()))
    }

    async fn delete_competitor(&self, id: i64) -> Result<()> {
        self.conn
            .call(move |conn| {
                let rows = conn
                    .execute(schema::DELETE_COMPETITOR, [id])
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error_with_id(e, "Competitor", id.to_string()))
    }

    async fn competitor_summary(&self) -> Result<CompetitorSummary> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::COMPETITOR_SUMMARY, [], |row| {
                    Ok(CompetitorSummary {
                        total_competitors: row.get(0)?,
                        high_threat: row.get(1)?,
                        medium_threat: row.get(2)?,
                        low_threat: row.get(3)?,
                        average_rating: round_cents(row.get(4)?),
                        average_price_diff: round_cents(row.get(5)?),
                    })
                })
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Competitor"))
    }
}
