//! Port for feed report persistence.
//!
//! Ordering is part of the contract: every listing returns reports by
//! `report_date` descending, ties broken by `created_at` descending.

use async_trait::async_trait;

use crate::domain::{FeedReport, NewFeedReport, ReportId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by feed report repository adapters.
    pub enum FeedReportPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "feed report repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "feed report repository query failed: {message}",
        /// The owning user does not exist (foreign key violation).
        UnknownOwner { owner: String } => "feed report owner {owner} does not exist",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedReportRepository: Send + Sync {
    /// Persist a report and return it with its storage timestamp.
    async fn insert(&self, report: &NewFeedReport) -> Result<FeedReport, FeedReportPersistenceError>;

    /// Reports owned by `owner`, optionally capped at `limit`.
    async fn list_for_owner(
        &self,
        owner: &UserId,
        limit: Option<usize>,
    ) -> Result<Vec<FeedReport>, FeedReportPersistenceError>;

    /// Every stored report.
    async fn list_all(&self) -> Result<Vec<FeedReport>, FeedReportPersistenceError>;

    /// Fetch a single report by identifier, regardless of owner.
    async fn find_by_id(
        &self,
        id: &ReportId,
    ) -> Result<Option<FeedReport>, FeedReportPersistenceError>;
}
