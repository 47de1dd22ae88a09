//! Shared Diesel error classification for the repositories.
//!
//! Repositories translate the classification into their own port error
//! variants; constraint violations are the only kinds that carry domain
//! meaning (duplicate accounts, vanished report owners).

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

/// Coarse outcome of a failed Diesel operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum DieselFailure {
    UniqueViolation { constraint: String },
    ForeignKeyViolation { constraint: String },
    Connection(&'static str),
    Query(&'static str),
}

fn constraint_or_unknown(info: &dyn diesel::result::DatabaseErrorInformation) -> String {
    info.constraint_name().unwrap_or("unknown").to_owned()
}

/// Classify a Diesel error, logging the raw detail at debug level only.
pub(super) fn classify_diesel_error(error: DieselError) -> DieselFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::NotFound => DieselFailure::Query("record not found"),
        DieselError::QueryBuilderError(_) => DieselFailure::Query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            DieselFailure::UniqueViolation {
                constraint: constraint_or_unknown(info.as_ref()),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            DieselFailure::ForeignKeyViolation {
                constraint: constraint_or_unknown(info.as_ref()),
            }
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            DieselFailure::Connection("database connection error")
        }
        DieselError::DatabaseError(_, _) => DieselFailure::Query("database error"),
        _ => DieselFailure::Query("database error"),
    }
}
