//! Shared Diesel error mapping for the record repositories.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::MutationOutcome;
use crate::domain::ports::RecordStoreError;

use super::pool::PoolError;

/// Map pool errors into connection failures.
pub(super) fn map_pool_error(error: PoolError) -> RecordStoreError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    RecordStoreError::connection(message)
}

/// Map Diesel errors into record store errors.
///
/// Constraint names are logged and carried on the error for diagnostics but
/// never rendered into its message. Other database messages are not forwarded.
pub(super) fn map_diesel_error(error: DieselError) -> RecordStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                constraint = info.constraint_name(),
                message = info.message(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            RecordStoreError::conflict(info.constraint_name().unwrap_or("unique key"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            RecordStoreError::missing_reference(info.constraint_name().unwrap_or("foreign key"))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            RecordStoreError::connection("database connection error")
        }
        DieselError::NotFound => RecordStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => RecordStoreError::query("database query error"),
        _ => RecordStoreError::query("database error"),
    }
}

/// Classify the affected-row count reported by `execute`.
pub(super) fn outcome_from_affected(rows: usize) -> MutationOutcome {
    MutationOutcome::from_rows(u64::try_from(rows).unwrap_or(u64::MAX))
}

/// Report a stored value that no longer satisfies a domain invariant.
pub(super) fn corrupt_row(column: &str, error: impl std::fmt::Display) -> RecordStoreError {
    RecordStoreError::query(format!("stored {column} is invalid: {error}"))
}
