//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports are implemented by the domain services and called by inbound
//! adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod feed_report_repository;
mod feed_reports_command;
mod feed_reports_query;
mod login_service;
mod registration_service;
mod user_repository;
mod users_query;

#[cfg(test)]
pub use feed_report_repository::MockFeedReportRepository;
pub use feed_report_repository::{FeedReportPersistenceError, FeedReportRepository};
#[cfg(test)]
pub use feed_reports_command::MockFeedReportsCommand;
pub use feed_reports_command::FeedReportsCommand;
#[cfg(test)]
pub use feed_reports_query::MockFeedReportsQuery;
pub use feed_reports_query::{DASHBOARD_REPORT_LIMIT, FeedReportsQuery, REPORT_NOT_FOUND};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{INVALID_CREDENTIALS, LoginService};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::{ACCOUNT_EXISTS, RegistrationService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{NewUser, UserCredentials, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::{RECENT_USERS_LIMIT, UsersQuery};
