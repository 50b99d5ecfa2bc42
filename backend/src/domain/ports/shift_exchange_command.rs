//! Driving port for swapping and cancelling shifts.
//!
//! Both operations address shifts by `(login, date)` and run as a single
//! serializable unit of work. A `conflict` error means a concurrent exchange
//! or cancellation touching the same rows won; callers may retry.

use async_trait::async_trait;

use crate::domain::{Error, ExchangedShifts, Shift, ShiftId, ShiftSlot, UserId, UserProfile};

/// Swap the owners of two existing shifts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeShiftsRequest {
    pub first: ShiftSlot,
    pub second: ShiftSlot,
}

/// Remove one existing shift.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CancelShiftRequest {
    pub slot: ShiftSlot,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShiftExchangeCommand: Send + Sync {
    /// Swap owners; shift ids and dates are preserved.
    ///
    /// # Errors
    ///
    /// Returns `not_found` for unknown logins or missing shifts,
    /// `already_exists` when the swap would double-book a member and
    /// `conflict` when a concurrent transaction won.
    async fn exchange(&self, request: ExchangeShiftsRequest) -> Result<ExchangedShifts, Error>;

    /// Delete a shift and return what was removed.
    ///
    /// # Errors
    ///
    /// Returns `not_found` for unknown logins or missing shifts and
    /// `conflict` when a concurrent transaction won.
    async fn cancel(&self, request: CancelShiftRequest) -> Result<Shift, Error>;
}

/// Fixture command that fabricates swapped shifts without persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShiftExchangeCommand;

fn fixture_shift(id: i32, slot: &ShiftSlot, owner: &ShiftSlot, owner_id: i32) -> Shift {
    Shift {
        id: ShiftId::new(id),
        date: slot.date,
        user: UserProfile {
            id: UserId::new(owner_id),
            login: owner.login.clone(),
            uid: None,
            wallet: None,
        },
    }
}

#[async_trait]
impl ShiftExchangeCommand for FixtureShiftExchangeCommand {
    async fn exchange(&self, request: ExchangeShiftsRequest) -> Result<ExchangedShifts, Error> {
        let ExchangeShiftsRequest { first, second } = request;
        Ok(ExchangedShifts {
            first: fixture_shift(1, &first, &second, 2),
            second: fixture_shift(2, &second, &first, 1),
        })
    }

    async fn cancel(&self, request: CancelShiftRequest) -> Result<Shift, Error> {
        Ok(fixture_shift(1, &request.slot, &request.slot, 1))
    }
}
