//! Shared HTTP adapter state.
//!
//! Handlers receive this through `actix_web::web::Data` and depend only on
//! driving ports, so they stay testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ActivityCommand, ActivityQuery, DirectoryCommand, FixtureActivityCommand,
    FixtureActivityQuery, FixtureDirectoryCommand, FixtureShiftExchangeCommand,
    FixtureShiftScheduleCommand, FixtureShiftScheduleQuery, ShiftExchangeCommand,
    ShiftScheduleCommand, ShiftScheduleQuery,
};

/// Dependency bundle for HTTP handlers.
///
/// `Default` wires every port to its fixture; tests replace the ports they
/// exercise with struct update syntax.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use rollcall::domain::ports::FixtureShiftScheduleQuery;
/// use rollcall::inbound::http::state::HttpState;
///
/// let state = HttpState {
///     shifts_query: Arc::new(FixtureShiftScheduleQuery),
///     ..HttpState::default()
/// };
/// let _shifts = state.shifts_query.clone();
/// ```
#[derive(Clone)]
pub struct HttpState {
    pub shifts_query: Arc<dyn ShiftScheduleQuery>,
    pub shifts: Arc<dyn ShiftScheduleCommand>,
    pub exchange: Arc<dyn ShiftExchangeCommand>,
    pub activities: Arc<dyn ActivityCommand>,
    pub activities_query: Arc<dyn ActivityQuery>,
    pub directory: Arc<dyn DirectoryCommand>,
}

impl Default for HttpState {
    fn default() -> Self {
        Self {
            shifts_query: Arc::new(FixtureShiftScheduleQuery),
            shifts: Arc::new(FixtureShiftScheduleCommand),
            exchange: Arc::new(FixtureShiftExchangeCommand),
            activities: Arc::new(FixtureActivityCommand),
            activities_query: Arc::new(FixtureActivityQuery),
            directory: Arc::new(FixtureDirectoryCommand),
        }
    }
}
