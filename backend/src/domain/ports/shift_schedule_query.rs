//! Driving port for reading the shift schedule.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Error, Shift, ShiftDate};

/// Request for the shifts scheduled on one day.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftsForDateRequest {
    /// Day to list; `None` means today in the server's local time.
    pub date: Option<ShiftDate>,
}

/// Shifts scheduled on one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftsForDateResponse {
    /// The day that was listed, after defaulting.
    pub date: ShiftDate,
    /// Shifts in insertion order, each with its owner.
    pub shifts: Vec<Shift>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShiftScheduleQuery: Send + Sync {
    /// List the shifts on the requested day.
    ///
    /// # Errors
    ///
    /// Returns `service_unavailable` when the store cannot be reached.
    async fn shifts_for_date(
        &self,
        request: ShiftsForDateRequest,
    ) -> Result<ShiftsForDateResponse, Error>;
}

/// Fixture query returning an empty day.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShiftScheduleQuery;

#[async_trait]
impl ShiftScheduleQuery for FixtureShiftScheduleQuery {
    async fn shifts_for_date(
        &self,
        request: ShiftsForDateRequest,
    ) -> Result<ShiftsForDateResponse, Error> {
        Ok(ShiftsForDateResponse {
            date: request
                .date
                .unwrap_or_else(|| ShiftDate::from(NaiveDate::default())),
            shifts: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_echoes_requested_date() {
        let date = ShiftDate::parse("2024-06-01").expect("valid date");
        let response = FixtureShiftScheduleQuery
            .shifts_for_date(ShiftsForDateRequest { date: Some(date) })
            .await
            .expect("fixture succeeds");
        assert_eq!(response.date, date);
        assert!(response.shifts.is_empty());
    }
}
