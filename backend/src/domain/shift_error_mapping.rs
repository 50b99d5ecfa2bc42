//! Translation of shift repository failures into domain errors.

use serde_json::json;
use tracing::warn;

use super::Error;
use super::ports::ShiftRepositoryError;

/// Map a [`ShiftRepositoryError`] onto the domain error taxonomy.
///
/// Serialization conflicts become retryable `conflict` errors; everything
/// else is terminal for the request.
pub(crate) fn map_shift_error(error: ShiftRepositoryError) -> Error {
    match error {
        ShiftRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("shift repository unavailable: {message}"))
        }
        ShiftRepositoryError::Query { message } => {
            Error::internal(format!("shift repository error: {message}"))
        }
        ShiftRepositoryError::Conflict { message } => {
            warn!(%message, "shift transaction lost a serialization race");
            Error::conflict("shift changed concurrently; retry the request")
                .with_details(json!({ "code": "serialization_failure" }))
        }
        ShiftRepositoryError::UserNotFound { login } => {
            Error::not_found(format!("user {login} is not registered")).with_details(json!({
                "field": "login",
                "value": login,
                "code": "not_found",
            }))
        }
        ShiftRepositoryError::ShiftNotFound { login, date } => {
            Error::not_found(format!("no shift for {login} on {date}")).with_details(json!({
                "login": login,
                "date": date,
                "code": "shift_not_found",
            }))
        }
        ShiftRepositoryError::DuplicateAssignment { message } => {
            Error::already_exists("a member would hold two shifts on the same day").with_details(
                json!({
                    "code": "duplicate_assignment",
                    "reason": message,
                }),
            )
        }
    }
}
