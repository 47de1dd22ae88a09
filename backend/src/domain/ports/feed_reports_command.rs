//! Driving port for creating feed reports.

use async_trait::async_trait;

use crate::domain::{Actor, Error, FeedReport, ReportDraft};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedReportsCommand: Send + Sync {
    /// Store a report owned by `actor`, dated today.
    async fn create_report(&self, actor: &Actor, draft: ReportDraft) -> Result<FeedReport, Error>;
}
