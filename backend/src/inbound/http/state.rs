//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FeedReportRepository, FeedReportsCommand, FeedReportsQuery, LoginService,
    RegistrationService, UserRepository, UsersQuery,
};
use crate::domain::{FeedReportService, UserDirectoryService};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub reports: Arc<dyn FeedReportsCommand>,
    pub reports_query: Arc<dyn FeedReportsQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub registration: Arc<dyn RegistrationService>,
    pub users: Arc<dyn UsersQuery>,
    pub reports: Arc<dyn FeedReportsCommand>,
    pub reports_query: Arc<dyn FeedReportsQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            registration,
            users,
            reports,
            reports_query,
        } = ports;
        Self {
            login,
            registration,
            users,
            reports,
            reports_query,
        }
    }

    /// Wire every port to the two domain services.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use feedeyes::domain::{FeedReportService, UserDirectoryService};
    /// use feedeyes::inbound::http::state::HttpState;
    /// use feedeyes::outbound::persistence::{
    ///     DbPool, DieselFeedReportRepository, DieselUserRepository, PoolConfig,
    /// };
    /// use mockable::DefaultClock;
    ///
    /// # async fn build() -> Result<HttpState, Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/feedeyes")).await?;
    /// let directory = UserDirectoryService::new(Arc::new(DieselUserRepository::new(pool.clone())));
    /// let reports = FeedReportService::new(
    ///     Arc::new(DieselFeedReportRepository::new(pool)),
    ///     Arc::new(DefaultClock),
    /// );
    /// Ok(HttpState::from_services(Arc::new(directory), Arc::new(reports)))
    /// # }
    /// ```
    pub fn from_services<U, R>(
        directory: Arc<UserDirectoryService<U>>,
        reports: Arc<FeedReportService<R>>,
    ) -> Self
    where
        U: UserRepository + 'static,
        R: FeedReportRepository + 'static,
    {
        Self::new(HttpStatePorts {
            login: directory.clone(),
            registration: directory.clone(),
            users: directory,
            reports: reports.clone(),
            reports_query: reports,
        })
    }
}
