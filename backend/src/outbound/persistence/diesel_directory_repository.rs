//! PostgreSQL-backed directory: reference-data persistence and key lookup.
//!
//! One adapter implements both [`DirectoryRepository`] and
//! [`DirectoryLookup`] because they read the same four tables.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{
    DirectoryLookup, DirectoryLookupError, DirectoryRepository, DirectoryRepositoryError,
};
use crate::domain::{
    CardUid, DeviceId, Location, LocationId, LocationName, Login, MacAddress, ProfileUpdate, Role,
    RoleId, RoleName, UserDraft, UserId, UserProfile, ValueError,
};

use super::diesel_error_mapping::{StoreFailure, classify_diesel_error, pool_failure};
use super::models::{
    LocationRow, NewDeviceRow, NewLocationRow, NewRoleRow, NewUserRow, RoleRow, UserProfileUpdate,
    UserRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{devices, locations, roles, users};

/// Diesel-backed implementation of the directory ports.
#[derive(Clone)]
pub struct DieselDirectoryRepository {
    pool: DbPool,
}

impl DieselDirectoryRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: StoreFailure) -> DirectoryRepositoryError {
    match failure {
        StoreFailure::Connection(message) => DirectoryRepositoryError::connection(message),
        StoreFailure::Duplicate(constraint) => DirectoryRepositoryError::duplicate(constraint),
        StoreFailure::Conflict(message) | StoreFailure::Query(message) => {
            DirectoryRepositoryError::query(message)
        }
    }
}

fn map_pool_error(error: PoolError) -> DirectoryRepositoryError {
    map_failure(pool_failure(error))
}

fn map_diesel_error(error: diesel::result::Error) -> DirectoryRepositoryError {
    map_failure(classify_diesel_error(error))
}

fn map_invalid_row(error: ValueError) -> DirectoryRepositoryError {
    DirectoryRepositoryError::query(format!("stored row failed validation: {error}"))
}

fn map_lookup_failure(failure: StoreFailure) -> DirectoryLookupError {
    match failure {
        StoreFailure::Connection(message) => DirectoryLookupError::connection(message),
        StoreFailure::Conflict(message)
        | StoreFailure::Duplicate(message)
        | StoreFailure::Query(message) => DirectoryLookupError::query(message),
    }
}

fn map_lookup_pool_error(error: PoolError) -> DirectoryLookupError {
    map_lookup_failure(pool_failure(error))
}

fn map_lookup_diesel_error(error: diesel::result::Error) -> DirectoryLookupError {
    map_lookup_failure(classify_diesel_error(error))
}

fn new_user_row(draft: &UserDraft) -> NewUserRow<'_> {
    NewUserRow {
        login: draft.login.as_str(),
        uid: draft.uid.as_ref().map(CardUid::as_str),
        wallet: draft.wallet.as_ref().map(|wallet| wallet.as_str()),
    }
}

async fn load_user(
    conn: &mut AsyncPgConnection,
    login: &Login,
) -> Result<Option<UserRow>, diesel::result::Error> {
    users::table
        .filter(users::login.eq(login.as_str()))
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}

#[async_trait]
impl DirectoryRepository for DieselDirectoryRepository {
    async fn create_role(&self, name: &RoleName) -> Result<Role, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: RoleRow = diesel::insert_into(roles::table)
            .values(NewRoleRow {
                name: name.as_str(),
            })
            .returning(RoleRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Role::try_from(row).map_err(map_invalid_row)
    }

    async fn create_location(
        &self,
        name: &LocationName,
    ) -> Result<Location, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: LocationRow = diesel::insert_into(locations::table)
            .values(NewLocationRow {
                name: name.as_str(),
            })
            .returning(LocationRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Location::try_from(row).map_err(map_invalid_row)
    }

    async fn create_device(
        &self,
        mac: &MacAddress,
        role: RoleId,
        location: LocationId,
    ) -> Result<DeviceId, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let id: i32 = diesel::insert_into(devices::table)
            .values(NewDeviceRow {
                mac: mac.as_str(),
                role_id: role.get(),
                location_id: location.get(),
            })
            .returning(devices::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(DeviceId::new(id))
    }

    async fn create_user(&self, draft: &UserDraft) -> Result<UserProfile, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::insert_into(users::table)
            .values(new_user_row(draft))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        UserProfile::try_from(row).map_err(map_invalid_row)
    }

    async fn upsert_users(
        &self,
        drafts: &[UserDraft],
    ) -> Result<Vec<UserProfile>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows: Vec<UserRow> = conn
            .transaction(|conn| {
                async move {
                    let mut rows = Vec::with_capacity(drafts.len());
                    for draft in drafts {
                        let values = new_user_row(draft);
                        let row = diesel::insert_into(users::table)
                            .values(&values)
                            .on_conflict(users::login)
                            .do_update()
                            .set(&values)
                            .returning(UserRow::as_returning())
                            .get_result(conn)
                            .await?;
                        rows.push(row);
                    }
                    Ok::<_, diesel::result::Error>(rows)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        rows.into_iter()
            .map(UserProfile::try_from)
            .collect::<Result<_, _>>()
            .map_err(map_invalid_row)
    }

    async fn update_user_profile(
        &self,
        login: &Login,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = UserProfileUpdate {
            uid: update.uid.as_ref().map(CardUid::as_str),
            wallet: update.wallet.as_ref().map(|wallet| wallet.as_str()),
        };
        let row: Option<UserRow> = diesel::update(users::table.filter(users::login.eq(login.as_str())))
            .set(&changes)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        let row = row.ok_or_else(|| DirectoryRepositoryError::user_not_found(login.as_str()))?;
        UserProfile::try_from(row).map_err(map_invalid_row)
    }

    async fn assign_uid(
        &self,
        login: &Login,
        uid: &CardUid,
    ) -> Result<UserProfile, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let updated: Option<UserRow> = diesel::update(
            users::table
                .filter(users::login.eq(login.as_str()))
                .filter(users::uid.is_null()),
        )
        .set(users::uid.eq(uid.as_str()))
        .returning(UserRow::as_returning())
        .get_result(&mut conn)
        .await
        .optional()
        .map_err(map_diesel_error)?;

        if let Some(row) = updated {
            return UserProfile::try_from(row).map_err(map_invalid_row);
        }
        // Nothing matched: either the member is unknown or already linked.
        match load_user(&mut conn, login).await.map_err(map_diesel_error)? {
            Some(_) => Err(DirectoryRepositoryError::uid_already_linked(login.as_str())),
            None => Err(DirectoryRepositoryError::user_not_found(login.as_str())),
        }
    }

    async fn find_user_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<UserProfile>, DirectoryRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        load_user(&mut conn, login)
            .await
            .map_err(map_diesel_error)?
            .map(UserProfile::try_from)
            .transpose()
            .map_err(map_invalid_row)
    }
}

#[async_trait]
impl DirectoryLookup for DieselDirectoryRepository {
    async fn resolve_user(&self, login: &Login) -> Result<Option<UserId>, DirectoryLookupError> {
        let mut conn = self.pool.get().await.map_err(map_lookup_pool_error)?;
        let id: Option<i32> = users::table
            .filter(users::login.eq(login.as_str()))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_lookup_diesel_error)?;
        Ok(id.map(UserId::new))
    }

    async fn resolve_user_by_uid(
        &self,
        uid: &CardUid,
    ) -> Result<Option<UserId>, DirectoryLookupError> {
        let mut conn = self.pool.get().await.map_err(map_lookup_pool_error)?;
        let id: Option<i32> = users::table
            .filter(users::uid.eq(uid.as_str()))
            .select(users::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_lookup_diesel_error)?;
        Ok(id.map(UserId::new))
    }

    async fn resolve_device(
        &self,
        mac: &MacAddress,
    ) -> Result<Option<DeviceId>, DirectoryLookupError> {
        let mut conn = self.pool.get().await.map_err(map_lookup_pool_error)?;
        let id: Option<i32> = devices::table
            .filter(devices::mac.eq(mac.as_str()))
            .select(devices::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_lookup_diesel_error)?;
        Ok(id.map(DeviceId::new))
    }

    async fn resolve_role(&self, name: &RoleName) -> Result<Option<RoleId>, DirectoryLookupError> {
        let mut conn = self.pool.get().await.map_err(map_lookup_pool_error)?;
        let id: Option<i32> = roles::table
            .filter(roles::name.eq(name.as_str()))
            .select(roles::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_lookup_diesel_error)?;
        Ok(id.map(RoleId::new))
    }

    async fn resolve_location(
        &self,
        name: &LocationName,
    ) -> Result<Option<LocationId>, DirectoryLookupError> {
        let mut conn = self.pool.get().await.map_err(map_lookup_pool_error)?;
        let id: Option<i32> = locations::table
            .filter(locations::name.eq(name.as_str()))
            .select(locations::id)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_lookup_diesel_error)?;
        Ok(id.map(LocationId::new))
    }
}
