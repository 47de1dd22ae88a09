//! Driving port for reading feed reports.
//!
//! Every operation is scoped by the acting user: standard users only ever see
//! their own reports, administrators see everything.

use async_trait::async_trait;

use crate::domain::{Actor, Error, FeedReport, ReportId};

/// Number of reports shown on the dashboard.
pub const DASHBOARD_REPORT_LIMIT: usize = 20;

/// Message returned for missing and foreign reports alike.
pub const REPORT_NOT_FOUND: &str = "Not found or unauthorized";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedReportsQuery: Send + Sync {
    /// The actor's own most recent reports, at most [`DASHBOARD_REPORT_LIMIT`].
    async fn dashboard_reports(&self, actor: &Actor) -> Result<Vec<FeedReport>, Error>;

    /// All reports for an administrator, own reports otherwise.
    async fn visible_reports(&self, actor: &Actor) -> Result<Vec<FeedReport>, Error>;

    /// One report, if it exists and the actor owns it or is an administrator.
    ///
    /// Missing and foreign reports both fail with
    /// [`crate::domain::ErrorCode::NotFound`] and [`REPORT_NOT_FOUND`].
    async fn report(&self, id: &ReportId, actor: &Actor) -> Result<FeedReport, Error>;
}
