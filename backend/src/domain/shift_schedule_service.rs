//! Shift scheduler: daily listing and bulk assignment.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use super::lookup::Lookup;
use super::ports::{
    BulkAssignRequest, BulkAssignResponse, DirectoryLookup, ShiftRepository, ShiftScheduleCommand,
    ShiftScheduleQuery, ShiftsForDateRequest, ShiftsForDateResponse,
};
use super::shift_error_mapping::map_shift_error;
use super::{Error, Login, ScheduleEntry, ShiftAssignment, ShiftDate, UserId};

/// Shift schedule service implementing the schedule driving ports.
pub struct ShiftScheduleService<S, L> {
    shifts: Arc<S>,
    lookup: Lookup<L>,
    clock: Arc<dyn Clock>,
}

impl<S, L> ShiftScheduleService<S, L> {
    /// Create a new service with the given repository, lookup and clock.
    pub fn new(shifts: Arc<S>, lookup: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            shifts,
            lookup: Lookup::new(lookup),
            clock,
        }
    }

    fn today(&self) -> ShiftDate {
        ShiftDate::from(self.clock.local().date_naive())
    }
}

impl<S, L> ShiftScheduleService<S, L>
where
    S: ShiftRepository,
    L: DirectoryLookup,
{
    /// Resolve every login before anything is written, so one unknown login
    /// rejects the whole schedule.
    async fn resolve_assignments(
        &self,
        entries: &[&ScheduleEntry],
    ) -> Result<Vec<ShiftAssignment>, Error> {
        let mut resolved: HashMap<&Login, UserId> = HashMap::new();
        let mut assignments = Vec::new();
        for entry in entries {
            for login in &entry.logins {
                let user_id = match resolved.get(login) {
                    Some(user_id) => *user_id,
                    None => {
                        let user_id = self.lookup.user(login).await?;
                        resolved.insert(login, user_id);
                        user_id
                    }
                };
                let assignment = ShiftAssignment {
                    user_id,
                    date: entry.date,
                };
                if !assignments.contains(&assignment) {
                    assignments.push(assignment);
                }
            }
        }
        Ok(assignments)
    }
}

fn added_dates(entries: &[&ScheduleEntry], created: &[ShiftAssignment]) -> Vec<ShiftDate> {
    let mut dates: Vec<ShiftDate> = Vec::new();
    for entry in entries {
        let was_created = created.iter().any(|assignment| assignment.date == entry.date);
        if was_created && !dates.contains(&entry.date) {
            dates.push(entry.date);
        }
    }
    dates
}

#[async_trait]
impl<S, L> ShiftScheduleQuery for ShiftScheduleService<S, L>
where
    S: ShiftRepository,
    L: DirectoryLookup,
{
    async fn shifts_for_date(
        &self,
        request: ShiftsForDateRequest,
    ) -> Result<ShiftsForDateResponse, Error> {
        let date = request.date.unwrap_or_else(|| self.today());
        let shifts = self
            .shifts
            .list_for_date(date)
            .await
            .map_err(map_shift_error)?;
        Ok(ShiftsForDateResponse { date, shifts })
    }
}

#[async_trait]
impl<S, L> ShiftScheduleCommand for ShiftScheduleService<S, L>
where
    S: ShiftRepository,
    L: DirectoryLookup,
{
    async fn bulk_assign(&self, request: BulkAssignRequest) -> Result<BulkAssignResponse, Error> {
        let entries: Vec<&ScheduleEntry> = request
            .entries
            .iter()
            .filter(|entry| !entry.logins.is_empty())
            .collect();
        let assignments = self.resolve_assignments(&entries).await?;
        if assignments.is_empty() {
            return Ok(BulkAssignResponse::default());
        }

        let created = self
            .shifts
            .assign(&assignments)
            .await
            .map_err(map_shift_error)?;
        let added_dates = added_dates(&entries, &created);
        info!(
            requested = assignments.len(),
            created = created.len(),
            dates = added_dates.len(),
            "bulk shift assignment applied"
        );
        Ok(BulkAssignResponse { added_dates })
    }
}

#[cfg(test)]
#[path = "shift_schedule_service_tests.rs"]
mod tests;
