//! Feed report service implementing the report driving ports.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{
    DASHBOARD_REPORT_LIMIT, FeedReportPersistenceError, FeedReportRepository,
    FeedReportsCommand, FeedReportsQuery, REPORT_NOT_FOUND,
};
use crate::domain::{Actor, Error, FeedReport, NewFeedReport, ReportDraft, ReportId};

/// Report service backed by a feed report repository.
///
/// Reports are dated with the UTC calendar day reported by `clock`.
#[derive(Clone)]
pub struct FeedReportService<R> {
    reports: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> FeedReportService<R> {
    pub fn new(reports: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { reports, clock }
    }
}

impl<R> FeedReportService<R>
where
    R: FeedReportRepository,
{
    fn map_persistence_error(error: FeedReportPersistenceError) -> Error {
        match error {
            FeedReportPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("feed report repository unavailable: {message}"))
            }
            FeedReportPersistenceError::Query { message } => {
                Error::internal(format!("feed report repository error: {message}"))
            }
            FeedReportPersistenceError::UnknownOwner { .. } => {
                Error::unauthorized("account no longer exists")
            }
        }
    }
}

#[async_trait]
impl<R> FeedReportsCommand for FeedReportService<R>
where
    R: FeedReportRepository,
{
    async fn create_report(&self, actor: &Actor, draft: ReportDraft) -> Result<FeedReport, Error> {
        let today = self.clock.utc().date_naive();
        let report = NewFeedReport::from_draft(actor.id, draft, today);
        self.reports
            .insert(&report)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R> FeedReportsQuery for FeedReportService<R>
where
    R: FeedReportRepository,
{
    async fn dashboard_reports(&self, actor: &Actor) -> Result<Vec<FeedReport>, Error> {
        self.reports
            .list_for_owner(&actor.id, Some(DASHBOARD_REPORT_LIMIT))
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn visible_reports(&self, actor: &Actor) -> Result<Vec<FeedReport>, Error> {
        let listing = if actor.role.is_admin() {
            self.reports.list_all().await
        } else {
            self.reports.list_for_owner(&actor.id, None).await
        };
        listing.map_err(Self::map_persistence_error)
    }

    async fn report(&self, id: &ReportId, actor: &Actor) -> Result<FeedReport, Error> {
        let found = self
            .reports
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?;
        found
            .filter(|report| actor.can_read_owned_by(report.owner()))
            .ok_or_else(|| Error::not_found(REPORT_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "feed_report_service_tests.rs"]
mod tests;
