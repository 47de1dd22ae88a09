//! Domain primitives, aggregates, services and ports.
//!
//! Purpose: Define strongly typed domain entities used by the HTTP and
//! persistence layers, and the services that enforce the account and report
//! rules. Keep types immutable and document invariants in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode — transport-agnostic failure payload.
//! - User, Username, EmailAddress, Role — account identity.
//! - FeedReport, ReportDraft, Amount — feed report records.
//! - UserDirectoryService, FeedReportService — driving port implementations.

pub mod actor;
pub mod auth;
pub mod error;
pub mod feed_report;
pub mod feed_report_service;
pub mod password;
pub mod ports;
pub mod role;
pub mod trace_id;
pub mod user;
pub mod user_directory;

pub use self::actor::Actor;
pub use self::auth::{
    LoginCredentials, LoginValidationError, MISSING_SIGNUP_FIELDS, PASSWORD_MISMATCH,
    Registration, RegistrationValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::feed_report::{
    Amount, AmountError, FEED_CODE_MAX, FEED_NAME_MAX, FeedReport, NewFeedReport, ReportDraft,
    ReportId, ReportValidationError,
};
pub use self::feed_report_service::FeedReportService;
pub use self::password::{PasswordDigest, PasswordHashError};
pub use self::role::{Role, UnknownRole};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EMAIL_MAX, EmailAddress, USERNAME_MAX, User, UserId, UserValidationError, Username};
pub use self::user_directory::UserDirectoryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use feedeyes::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("Unauthorized"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
