//! PostgreSQL-backed `FeedReportRepository` implementation using Diesel ORM.
//!
//! Listings are ordered newest report date first, then newest insertion.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FeedReportPersistenceError, FeedReportRepository};
use crate::domain::{Amount, FeedReport, NewFeedReport, ReportId, UserId};

use super::diesel_error_mapping::{DieselFailure, classify_diesel_error};
use super::models::{FeedRow, NewFeedRow};
use super::pool::{DbPool, PoolError};
use super::schema::feeds;

/// Diesel-backed implementation of the `FeedReportRepository` port.
#[derive(Clone)]
pub struct DieselFeedReportRepository {
    pool: DbPool,
}

impl DieselFeedReportRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FeedReportPersistenceError {
    FeedReportPersistenceError::connection(error.into_message())
}

fn map_diesel_error(error: diesel::result::Error) -> FeedReportPersistenceError {
    match classify_diesel_error(error) {
        DieselFailure::UniqueViolation { constraint } => {
            FeedReportPersistenceError::query(format!("duplicate report: {constraint}"))
        }
        DieselFailure::ForeignKeyViolation { constraint } => {
            FeedReportPersistenceError::unknown_owner(constraint)
        }
        DieselFailure::Connection(message) => FeedReportPersistenceError::connection(message),
        DieselFailure::Query(message) => FeedReportPersistenceError::query(message),
    }
}

fn row_to_report(row: FeedRow) -> Result<FeedReport, FeedReportPersistenceError> {
    let amount = Amount::from_decimal(row.amount).ok_or_else(|| {
        FeedReportPersistenceError::query(format!("stored amount out of range for {}", row.id))
    })?;
    let report = NewFeedReport {
        id: ReportId::from_uuid(row.id),
        owner: UserId::from_uuid(row.user_id),
        feed_name: row.feed_name,
        feed_code: row.feed_code,
        report_date: row.report_date,
        amount,
        data: row.data,
    };
    Ok(FeedReport::from_new(report, row.created_at))
}

fn rows_to_reports(rows: Vec<FeedRow>) -> Result<Vec<FeedReport>, FeedReportPersistenceError> {
    rows.into_iter().map(row_to_report).collect()
}

#[async_trait]
impl FeedReportRepository for DieselFeedReportRepository {
    async fn insert(&self, report: &NewFeedReport) -> Result<FeedReport, FeedReportPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewFeedRow {
            id: *report.id.as_uuid(),
            user_id: *report.owner.as_uuid(),
            feed_name: report.feed_name.as_deref(),
            feed_code: report.feed_code.as_deref(),
            report_date: report.report_date,
            amount: report.amount.as_decimal(),
            data: &report.data,
        };

        let stored: FeedRow = diesel::insert_into(feeds::table)
            .values(&row)
            .returning(FeedRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(|err| match map_diesel_error(err) {
                FeedReportPersistenceError::UnknownOwner { .. } => {
                    FeedReportPersistenceError::unknown_owner(report.owner.to_string())
                }
                other => other,
            })?;

        row_to_report(stored)
    }

    async fn list_for_owner(
        &self,
        owner: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<FeedReport>, FeedReportPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = feeds::table
            .filter(feeds::user_id.eq(owner.as_uuid()))
            .order((feeds::report_date.desc(), feeds::created_at.desc()))
            .select(FeedRow::as_select())
            .into_boxed();
        if let Some(limit) = limit {
            query = query.limit(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        rows_to_reports(rows)
    }

    async fn list_all(&self) -> Result<Vec<FeedReport>, FeedReportPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = feeds::table
            .order((feeds::report_date.desc(), feeds::created_at.desc()))
            .select(FeedRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows_to_reports(rows)
    }

    async fn find_by_id(
        &self,
        id: &ReportId,
    ) -> Result<Option<FeedReport>, FeedReportPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<FeedRow> = feeds::table
            .filter(feeds::id.eq(id.as_uuid()))
            .select(FeedRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_report).transpose()
    }
}
