//! Builders for HTTP state ports backed by PostgreSQL adapters.

use std::io;
use std::sync::Arc;

use mockable::DefaultClock;

use rollcall::domain::{
    ActivityService, DirectoryService, ShiftExchangeService, ShiftScheduleService,
};
use rollcall::inbound::http::state::HttpState;
use rollcall::outbound::persistence::{
    DbPool, DieselActivityRepository, DieselDirectoryRepository, DieselShiftRepository,
};

use super::ServerConfig;

/// Wire every driving port to its service over the shared pool.
fn build_persistent_state(pool: &DbPool) -> HttpState {
    let directory = Arc::new(DieselDirectoryRepository::new(pool.clone()));
    let shifts = Arc::new(DieselShiftRepository::new(pool.clone()));
    let activities = Arc::new(DieselActivityRepository::new(pool.clone()));

    let schedule = Arc::new(ShiftScheduleService::new(
        shifts.clone(),
        directory.clone(),
        Arc::new(DefaultClock),
    ));
    let activity = Arc::new(ActivityService::new(
        activities,
        directory.clone(),
        Arc::new(DefaultClock),
    ));

    HttpState {
        shifts_query: schedule.clone(),
        shifts: schedule,
        exchange: Arc::new(ShiftExchangeService::new(shifts)),
        activities: activity.clone(),
        activities_query: activity,
        directory: Arc::new(DirectoryService::new(directory.clone(), directory)),
    }
}

/// Build the HTTP state over the configured pool.
///
/// # Errors
/// Returns [`io::ErrorKind::InvalidInput`] when no pool is configured; the
/// server never falls back to fixture ports.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    config.db_pool.as_ref().map(build_persistent_state).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "a database pool is required to serve the API",
        )
    })
}
