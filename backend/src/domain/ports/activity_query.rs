//! Driving port for reading taps by device role and time window.

use async_trait::async_trait;

use crate::domain::{Activity, ActivityWindow, Error, RoleName};

/// Taps on devices of one role inside a window.
///
/// Bounds are unix seconds. A missing `start` means the beginning of today in
/// the server's local time; a missing `end` means `start` plus one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitiesByRoleRequest {
    pub role: RoleName,
    pub start: Option<i64>,
    pub end: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivitiesByRoleResponse {
    /// Window actually queried, after defaulting.
    pub window: ActivityWindow,
    pub activities: Vec<Activity>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ActivityQuery: Send + Sync {
    /// List taps whose timestamp lies in `[start, end]`, both ends included.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` when `start >= end` after defaulting.
    async fn activities_by_role(
        &self,
        request: ActivitiesByRoleRequest,
    ) -> Result<ActivitiesByRoleResponse, Error>;
}

/// Fixture query returning no taps.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureActivityQuery;

#[async_trait]
impl ActivityQuery for FixtureActivityQuery {
    async fn activities_by_role(
        &self,
        request: ActivitiesByRoleRequest,
    ) -> Result<ActivitiesByRoleResponse, Error> {
        let start = request.start.unwrap_or(0);
        let end = request
            .end
            .unwrap_or(start + ActivityWindow::DAY_SECONDS);
        Ok(ActivitiesByRoleResponse {
            window: ActivityWindow::new(start, end)?,
            activities: Vec::new(),
        })
    }
}
