//! Dated shift assignments.
//!
//! A shift row is created by bulk assignment, mutated in place by an
//! exchange (only its owner changes) and destroyed by cancellation. At most
//! one shift exists per `(user, date)` pair.

use super::{Login, ShiftDate, ShiftId, UserId, UserProfile};

/// A shift joined with its current owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shift {
    pub id: ShiftId,
    pub date: ShiftDate,
    pub user: UserProfile,
}

/// Human-facing address of a shift: who holds it on which day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShiftSlot {
    pub login: Login,
    pub date: ShiftDate,
}

impl ShiftSlot {
    #[must_use]
    pub fn new(login: Login, date: ShiftDate) -> Self {
        Self { login, date }
    }
}

/// A resolved `(user, date)` pair to be written by bulk assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftAssignment {
    pub user_id: UserId,
    pub date: ShiftDate,
}

/// One entry of a bulk schedule: a day and the members working it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub date: ShiftDate,
    pub logins: Vec<Login>,
}

/// The two shifts after an exchange, in request order.
///
/// `first` is the shift that was addressed by the first slot and now belongs
/// to the second member; `second` is the mirror image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangedShifts {
    pub first: Shift,
    pub second: Shift,
}
