//! Activity recorder: tap logging and role/window queries.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveTime;
use mockable::Clock;
use tracing::debug;

use super::lookup::Lookup;
use super::ports::{
    ActivitiesByRoleRequest, ActivitiesByRoleResponse, ActivityCommand, ActivityQuery,
    ActivityRepository, ActivityRepositoryError, DirectoryLookup, RecordActivityRequest,
    RecordActivityResponse,
};
use super::{ActivityWindow, Error};

/// Activity service implementing the activity driving ports.
pub struct ActivityService<A, L> {
    activities: Arc<A>,
    lookup: Lookup<L>,
    clock: Arc<dyn Clock>,
}

impl<A, L> ActivityService<A, L> {
    /// Create a new service with the given repository, lookup and clock.
    pub fn new(activities: Arc<A>, lookup: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            activities,
            lookup: Lookup::new(lookup),
            clock,
        }
    }

    /// Unix seconds at local midnight today.
    ///
    /// Falls back to the current instant when midnight does not exist in the
    /// local zone (a DST gap).
    fn start_of_today(&self) -> i64 {
        let now = self.clock.local();
        now.date_naive()
            .and_time(NaiveTime::MIN)
            .and_local_timezone(now.timezone())
            .earliest()
            .map_or_else(|| now.timestamp(), |midnight| midnight.timestamp())
    }

    fn window(&self, start: Option<i64>, end: Option<i64>) -> Result<ActivityWindow, Error> {
        let start = start.unwrap_or_else(|| self.start_of_today());
        let end = end.unwrap_or(start.saturating_add(ActivityWindow::DAY_SECONDS));
        Ok(ActivityWindow::new(start, end)?)
    }
}

fn map_activity_error(error: ActivityRepositoryError) -> Error {
    match error {
        ActivityRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("activity repository unavailable: {message}"))
        }
        ActivityRepositoryError::Query { message } => {
            Error::internal(format!("activity repository error: {message}"))
        }
    }
}

#[async_trait]
impl<A, L> ActivityCommand for ActivityService<A, L>
where
    A: ActivityRepository,
    L: DirectoryLookup,
{
    async fn record(
        &self,
        request: RecordActivityRequest,
    ) -> Result<RecordActivityResponse, Error> {
        let user_id = self.lookup.user_by_uid(&request.uid).await?;
        let device_id = self.lookup.device(&request.mac).await?;
        let created_at = self.clock.utc().timestamp();
        let id = self
            .activities
            .insert(user_id, device_id, created_at)
            .await
            .map_err(map_activity_error)?;
        debug!(activity = %id, user = %user_id, device = %device_id, "tap recorded");
        Ok(RecordActivityResponse {
            id,
            user_id,
            device_id,
            created_at,
        })
    }
}

#[async_trait]
impl<A, L> ActivityQuery for ActivityService<A, L>
where
    A: ActivityRepository,
    L: DirectoryLookup,
{
    async fn activities_by_role(
        &self,
        request: ActivitiesByRoleRequest,
    ) -> Result<ActivitiesByRoleResponse, Error> {
        let window = self.window(request.start, request.end)?;
        let activities = self
            .activities
            .list_for_role(&request.role, window)
            .await
            .map_err(map_activity_error)?;
        Ok(ActivitiesByRoleResponse { window, activities })
    }
}

#[cfg(test)]
#[path = "activity_service_tests.rs"]
mod tests;
