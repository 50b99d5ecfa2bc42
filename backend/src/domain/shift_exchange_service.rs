//! Shift exchange and cancellation engine.
//!
//! The service validates the request and delegates the whole unit of work to
//! the repository, which runs it under serializable isolation. Retrying on
//! `conflict` is left to the caller.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use super::ports::{
    CancelShiftRequest, ExchangeShiftsRequest, ShiftExchangeCommand, ShiftRepository,
};
use super::shift_error_mapping::map_shift_error;
use super::{Error, ExchangedShifts, Shift};

/// Service implementing [`ShiftExchangeCommand`].
pub struct ShiftExchangeService<S> {
    shifts: Arc<S>,
}

impl<S> ShiftExchangeService<S> {
    /// Create a new service with the given shift repository.
    pub fn new(shifts: Arc<S>) -> Self {
        Self { shifts }
    }
}

#[async_trait]
impl<S> ShiftExchangeCommand for ShiftExchangeService<S>
where
    S: ShiftRepository,
{
    async fn exchange(&self, request: ExchangeShiftsRequest) -> Result<ExchangedShifts, Error> {
        let ExchangeShiftsRequest { first, second } = request;
        // Naming the same slot twice is a no-op swap; the store still checks
        // that the shift exists.
        let swapped = self
            .shifts
            .exchange(&first, &second)
            .await
            .map_err(map_shift_error)?;
        info!(
            first_shift = %swapped.first.id,
            second_shift = %swapped.second.id,
            "shifts exchanged"
        );
        Ok(swapped)
    }

    async fn cancel(&self, request: CancelShiftRequest) -> Result<Shift, Error> {
        let removed = self
            .shifts
            .cancel(&request.slot)
            .await
            .map_err(map_shift_error)?;
        info!(shift = %removed.id, date = %removed.date, "shift cancelled");
        Ok(removed)
    }
}

#[cfg(test)]
#[path = "shift_exchange_service_tests.rs"]
mod tests;
