//! Driven port for reference-data persistence: members, roles, locations and
//! devices.
//!
//! Uniqueness lives in the store's unique constraints. Adapters report a
//! violated constraint as [`DirectoryRepositoryError::Duplicate`] instead of
//! checking first, so concurrent creates cannot both succeed.

use async_trait::async_trait;

use crate::domain::{
    CardUid, DeviceId, Location, LocationId, LocationName, Login, MacAddress, ProfileUpdate, Role,
    RoleId, RoleName, UserDraft, UserProfile,
};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by directory repository adapters.
    pub enum DirectoryRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "directory repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "directory repository query failed: {message}",
        /// A unique key (login, uid, mac or name) is already taken.
        Duplicate { message: String } => "directory entry already exists: {message}",
        /// The addressed member does not exist.
        UserNotFound { login: String } => "user {login} is not registered",
        /// The member already carries a card uid.
        UidAlreadyLinked { login: String } => "user {login} already has a linked card",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Insert a role.
    async fn create_role(&self, name: &RoleName) -> Result<Role, DirectoryRepositoryError>;

    /// Insert a location.
    async fn create_location(
        &self,
        name: &LocationName,
    ) -> Result<Location, DirectoryRepositoryError>;

    /// Insert a reader bound to an existing role and location.
    async fn create_device(
        &self,
        mac: &MacAddress,
        role: RoleId,
        location: LocationId,
    ) -> Result<DeviceId, DirectoryRepositoryError>;

    /// Insert a single member.
    async fn create_user(&self, draft: &UserDraft) -> Result<UserProfile, DirectoryRepositoryError>;

    /// Insert or update members by login in one transaction.
    ///
    /// Supplied `uid`/`wallet` overwrite stored values; absent ones are kept.
    async fn upsert_users(
        &self,
        drafts: &[UserDraft],
    ) -> Result<Vec<UserProfile>, DirectoryRepositoryError>;

    /// Change the mutable fields of an existing member.
    async fn update_user_profile(
        &self,
        login: &Login,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, DirectoryRepositoryError>;

    /// Set the card uid of a member that has none yet.
    async fn assign_uid(
        &self,
        login: &Login,
        uid: &CardUid,
    ) -> Result<UserProfile, DirectoryRepositoryError>;

    /// Fetch a member by login.
    async fn find_user_by_login(
        &self,
        login: &Login,
    ) -> Result<Option<UserProfile>, DirectoryRepositoryError>;
}
