//! Domain primitives, entities, ports and services.
//!
//! Purpose: keep the attendance and shift rules independent of HTTP and
//! PostgreSQL. Adapters depend on this module, never the other way round.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure with a stable code.
//! - TraceId: request correlation identifier held in task-local scope.
//! - Identifier newtypes and validated value types (`Login`, `ShiftDate`, ...).
//! - Entities: `UserProfile`, `Role`, `Location`, `Device`, `Shift`, `Activity`.
//! - Services implementing the driving ports in [`ports`].

pub mod ports;

mod activity;
mod activity_service;
mod directory;
mod directory_service;
mod error;
mod ids;
mod lookup;
mod shift;
mod shift_error_mapping;
mod shift_exchange_service;
mod shift_schedule_service;
mod trace_id;
mod values;

pub use self::activity::Activity;
pub use self::activity_service::ActivityService;
pub use self::directory::{Device, Location, ProfileUpdate, Role, UserDraft, UserProfile};
pub use self::directory_service::DirectoryService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{ActivityId, DeviceId, LocationId, RoleId, ShiftId, UserId};
pub use self::lookup::Lookup;
pub use self::shift::{ExchangedShifts, ScheduleEntry, Shift, ShiftAssignment, ShiftSlot};
pub use self::shift_exchange_service::ShiftExchangeService;
pub use self::shift_schedule_service::ShiftScheduleService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::values::{
    ActivityWindow, CardUid, KEY_MAX, LocationName, Login, MacAddress, RoleName, ShiftDate,
    ValueError, WALLET_MAX, WalletAddress,
};
