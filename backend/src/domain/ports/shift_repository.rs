//! Driven port for shift persistence and the exchange engine.
//!
//! `exchange` and `cancel` are whole units of work: the adapter resolves the
//! logins, locates and locks the rows, mutates them and reads them back inside
//! one serializable transaction. No partial swap may ever be observable.

use async_trait::async_trait;

use crate::domain::{ExchangedShifts, Shift, ShiftAssignment, ShiftDate, ShiftSlot};

use super::define_port_error;

define_port_error! {
    /// Errors raised by shift repository adapters.
    pub enum ShiftRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "shift repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "shift repository query failed: {message}",
        /// The store aborted the transaction because a concurrent one won.
        Conflict { message: String } => "shift transaction aborted by a concurrent update: {message}",
        /// A login in the request does not belong to any member.
        UserNotFound { login: String } => "user {login} is not registered",
        /// The member holds no shift on that day.
        ShiftNotFound { login: String, date: String } => "no shift for {login} on {date}",
        /// The write would give a member two shifts on one day.
        DuplicateAssignment { message: String } => "member would hold two shifts on one day: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShiftRepository: Send + Sync {
    /// Shifts on `date` with their owners, in insertion order.
    async fn list_for_date(&self, date: ShiftDate) -> Result<Vec<Shift>, ShiftRepositoryError>;

    /// Create every absent assignment in one transaction.
    ///
    /// Returns the assignments that produced a new row, in input order.
    /// Pairs that already exist are skipped.
    async fn assign(
        &self,
        assignments: &[ShiftAssignment],
    ) -> Result<Vec<ShiftAssignment>, ShiftRepositoryError>;

    /// Swap the owners of the shifts at `first` and `second`.
    async fn exchange(
        &self,
        first: &ShiftSlot,
        second: &ShiftSlot,
    ) -> Result<ExchangedShifts, ShiftRepositoryError>;

    /// Delete the shift at `slot`, returning the removed row.
    async fn cancel(&self, slot: &ShiftSlot) -> Result<Shift, ShiftRepositoryError>;
}
