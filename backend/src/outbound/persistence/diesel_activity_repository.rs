//! PostgreSQL-backed activity log.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ActivityRepository, ActivityRepositoryError};
use crate::domain::{
    Activity, ActivityId, ActivityWindow, DeviceId, RoleName, UserId, UserProfile, ValueError,
};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error, pool_failure};
use super::models::{ActivityRow, DeviceRow, LocationRow, NewActivityRow, RoleRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{activities, devices, locations, roles, users};

/// Diesel-backed implementation of [`ActivityRepository`].
#[derive(Clone)]
pub struct DieselActivityRepository {
    pool: DbPool,
}

impl DieselActivityRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

type JoinedActivity = (ActivityRow, UserRow, DeviceRow, RoleRow, LocationRow);

fn map_failure(failure: StoreFailure) -> ActivityRepositoryError {
    match failure {
        StoreFailure::Connection(message) => ActivityRepositoryError::connection(message),
        StoreFailure::Conflict(message)
        | StoreFailure::Duplicate(message)
        | StoreFailure::Query(message) => ActivityRepositoryError::query(message),
    }
}

fn map_pool_error(error: PoolError) -> ActivityRepositoryError {
    map_failure(pool_failure(error))
}

fn map_diesel_error(error: diesel::result::Error) -> ActivityRepositoryError {
    map_failure(classify_diesel_error(error))
}

fn map_invalid_row(error: ValueError) -> ActivityRepositoryError {
    ActivityRepositoryError::query(format!("stored row failed validation: {error}"))
}

fn to_activity(
    (activity, user, device, role, location): JoinedActivity,
) -> Result<Activity, ValueError> {
    Ok(Activity {
        id: ActivityId::new(activity.id),
        created_at: activity.created_at,
        user: UserProfile::try_from(user)?,
        device: device.into_device(role, location)?,
    })
}

#[async_trait]
impl ActivityRepository for DieselActivityRepository {
    async fn insert(
        &self,
        user: UserId,
        device: DeviceId,
        created_at: i64,
    ) -> Result<ActivityId, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i64 = diesel::insert_into(activities::table)
            .values(NewActivityRow {
                user_id: user.get(),
                device_id: device.get(),
                created_at,
            })
            .returning(activities::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ActivityId::new(id))
    }

    async fn list_for_role(
        &self,
        role: &RoleName,
        window: ActivityWindow,
    ) -> Result<Vec<Activity>, ActivityRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<JoinedActivity> = activities::table
            .inner_join(users::table)
            .inner_join(
                devices::table
                    .inner_join(roles::table)
                    .inner_join(locations::table),
            )
            .filter(roles::name.eq(role.as_str()))
            .filter(activities::created_at.ge(window.start()))
            .filter(activities::created_at.le(window.end()))
            .order((activities::created_at.asc(), activities::id.asc()))
            .select((
                ActivityRow::as_select(),
                UserRow::as_select(),
                DeviceRow::as_select(),
                RoleRow::as_select(),
                LocationRow::as_select(),
            ))
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(|row| to_activity(row).map_err(map_invalid_row))
            .collect()
    }
}
