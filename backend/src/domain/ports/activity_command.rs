//! Driving port for recording device taps.

use async_trait::async_trait;

use crate::domain::{ActivityId, CardUid, DeviceId, Error, MacAddress, UserId};

/// A tap reported by a reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordActivityRequest {
    /// Card presented to the reader.
    pub uid: CardUid,
    /// Reader that saw the card.
    pub mac: MacAddress,
}

/// The stored tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordActivityResponse {
    pub id: ActivityId,
    pub user_id: UserId,
    pub device_id: DeviceId,
    /// Unix seconds.
    pub created_at: i64,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityCommand: Send + Sync {
    /// Resolve the card and reader, then append a tap stamped now.
    ///
    /// # Errors
    ///
    /// Returns `not_found` when the card or reader is unknown.
    async fn record(&self, request: RecordActivityRequest)
    -> Result<RecordActivityResponse, Error>;
}

/// Fixture command returning a tap at the epoch.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityCommand;

#[async_trait]
impl ActivityCommand for FixtureActivityCommand {
    async fn record(
        &self,
        _request: RecordActivityRequest,
    ) -> Result<RecordActivityResponse, Error> {
        Ok(RecordActivityResponse {
            id: ActivityId::new(1),
            user_id: UserId::new(1),
            device_id: DeviceId::new(1),
            created_at: 0,
        })
    }
}
