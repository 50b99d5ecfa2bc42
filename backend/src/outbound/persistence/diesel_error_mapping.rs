//! Classification of pool and Diesel failures shared by every adapter.
//!
//! Adapters translate a [`StoreFailure`] into their own port error, choosing
//! what a unique violation means for the operation at hand.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Message Postgres reports when the deadlock detector aborts a transaction.
/// Diesel has no dedicated kind for SQLSTATE 40P01.
const DEADLOCK_MESSAGE: &str = "deadlock detected";

/// Store failure reduced to the categories the ports care about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The connection is gone or could not be obtained.
    Connection(String),
    /// The transaction lost a serialization race and may be retried.
    Conflict(String),
    /// A unique constraint rejected the write; carries the constraint name.
    Duplicate(String),
    /// Anything else.
    Query(String),
}

/// Extract the message from a pool error.
pub(crate) fn pool_failure(error: PoolError) -> StoreFailure {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            StoreFailure::Connection(message)
        }
    }
}

/// Classify a Diesel error, logging the raw database message at debug level.
pub(crate) fn classify_diesel_error(error: DieselError) -> StoreFailure {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(
                ?kind,
                message = info.message(),
                constraint = info.constraint_name(),
                "diesel operation failed"
            );
        }
        _ => debug!(%error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
            StoreFailure::Conflict(info.message().to_owned())
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            StoreFailure::Duplicate(
                info.constraint_name()
                    .unwrap_or("unique constraint")
                    .to_owned(),
            )
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            StoreFailure::Connection("database connection error".to_owned())
        }
        DieselError::DatabaseError(_, info) if info.message().contains(DEADLOCK_MESSAGE) => {
            StoreFailure::Conflict(info.message().to_owned())
        }
        DieselError::RollbackErrorOnCommit { commit_error, .. } => {
            classify_diesel_error(*commit_error)
        }
        DieselError::NotFound => StoreFailure::Query("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => {
            StoreFailure::Query("database query error".to_owned())
        }
        _ => StoreFailure::Query("database error".to_owned()),
    }
}
