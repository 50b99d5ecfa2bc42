//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`DirectoryLookup`]) are implemented by the
//! PostgreSQL adapters; driving ports (`*Command`, `*Query`) are implemented
//! by the domain services and consumed by the HTTP handlers.

mod macros;
pub(crate) use macros::define_port_error;

mod activity_command;
mod activity_query;
mod activity_repository;
mod directory_command;
mod directory_lookup;
mod directory_repository;
mod shift_exchange_command;
mod shift_repository;
mod shift_schedule_command;
mod shift_schedule_query;

#[cfg(test)]
pub use activity_command::MockActivityCommand;
pub use activity_command::{
    ActivityCommand, FixtureActivityCommand, RecordActivityRequest, RecordActivityResponse,
};
#[cfg(test)]
pub use activity_query::MockActivityQuery;
pub use activity_query::{
    ActivitiesByRoleRequest, ActivitiesByRoleResponse, ActivityQuery, FixtureActivityQuery,
};
#[cfg(test)]
pub use activity_repository::MockActivityRepository;
pub use activity_repository::{
    ActivityRepository, ActivityRepositoryError, FixtureActivityRepository,
};
#[cfg(test)]
pub use directory_command::MockDirectoryCommand;
pub use directory_command::{
    DirectoryCommand, EditUserRequest, FixtureDirectoryCommand, LinkUidRequest,
    RegisterDeviceRequest, RegisterUsersRequest,
};
#[cfg(test)]
pub use directory_lookup::MockDirectoryLookup;
pub use directory_lookup::{DirectoryLookup, DirectoryLookupError, FixtureDirectoryLookup};
#[cfg(test)]
pub use directory_repository::MockDirectoryRepository;
pub use directory_repository::{DirectoryRepository, DirectoryRepositoryError};
#[cfg(test)]
pub use shift_exchange_command::MockShiftExchangeCommand;
pub use shift_exchange_command::{
    CancelShiftRequest, ExchangeShiftsRequest, FixtureShiftExchangeCommand, ShiftExchangeCommand,
};
#[cfg(test)]
pub use shift_repository::MockShiftRepository;
pub use shift_repository::{ShiftRepository, ShiftRepositoryError};
#[cfg(test)]
pub use shift_schedule_command::MockShiftScheduleCommand;
pub use shift_schedule_command::{
    BulkAssignRequest, BulkAssignResponse, FixtureShiftScheduleCommand, ShiftScheduleCommand,
};
#[cfg(test)]
pub use shift_schedule_query::MockShiftScheduleQuery;
pub use shift_schedule_query::{
    FixtureShiftScheduleQuery, ShiftScheduleQuery, ShiftsForDateRequest, ShiftsForDateResponse,
};
