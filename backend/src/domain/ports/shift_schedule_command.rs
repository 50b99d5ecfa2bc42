//! Driving port for bulk shift assignment.
//!
//! Bulk assignment is all-or-nothing for unknown logins and idempotent for
//! pairs that already exist: resubmitting a schedule adds nothing and reports
//! no dates.

use async_trait::async_trait;

use crate::domain::{Error, ScheduleEntry, ShiftDate};

/// Schedule to import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkAssignRequest {
    pub entries: Vec<ScheduleEntry>,
}

/// Outcome of a bulk import.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkAssignResponse {
    /// Days on which at least one new shift was created, in request order.
    pub added_dates: Vec<ShiftDate>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShiftScheduleCommand: Send + Sync {
    /// Create every missing `(login, date)` assignment in the schedule.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when any login is unknown; nothing is written in
    /// that case. Returns `conflict` when a concurrent import created the
    /// same assignment first.
    async fn bulk_assign(&self, request: BulkAssignRequest) -> Result<BulkAssignResponse, Error>;
}

/// Fixture command that reports every non-empty entry as added.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShiftScheduleCommand;

#[async_trait]
impl ShiftScheduleCommand for FixtureShiftScheduleCommand {
    async fn bulk_assign(&self, request: BulkAssignRequest) -> Result<BulkAssignResponse, Error> {
        let mut added_dates: Vec<ShiftDate> = Vec::new();
        for entry in request.entries.iter().filter(|entry| !entry.logins.is_empty()) {
            if !added_dates.contains(&entry.date) {
                added_dates.push(entry.date);
            }
        }
        Ok(BulkAssignResponse { added_dates })
    }
}
