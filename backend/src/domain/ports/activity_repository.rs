//! Driven port for the append-only activity log.

use async_trait::async_trait;

use crate::domain::{Activity, ActivityId, ActivityWindow, DeviceId, RoleName, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by activity repository adapters.
    pub enum ActivityRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "activity repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "activity repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    /// Append a tap at `created_at` (unix seconds).
    async fn insert(
        &self,
        user: UserId,
        device: DeviceId,
        created_at: i64,
    ) -> Result<ActivityId, ActivityRepositoryError>;

    /// Taps inside `window` on devices with role `role`, oldest first.
    async fn list_for_role(
        &self,
        role: &RoleName,
        window: ActivityWindow,
    ) -> Result<Vec<Activity>, ActivityRepositoryError>;
}

/// Fixture repository that accepts writes and returns no history.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityRepository;

#[async_trait]
impl ActivityRepository for FixtureActivityRepository {
    async fn insert(
        &self,
        _user: UserId,
        _device: DeviceId,
        _created_at: i64,
    ) -> Result<ActivityId, ActivityRepositoryError> {
        Ok(ActivityId::new(1))
    }

    async fn list_for_role(
        &self,
        _role: &RoleName,
        _window: ActivityWindow,
    ) -> Result<Vec<Activity>, ActivityRepositoryError> {
        Ok(Vec::new())
    }
}
