//! Driving port for record management: members, roles, locations and readers.
//!
//! These operations sit outside the shift engine and rely on single-statement
//! atomicity plus the store's unique constraints.

use async_trait::async_trait;

use crate::domain::{
    CardUid, Device, DeviceId, Error, Location, LocationId, LocationName, Login, MacAddress,
    ProfileUpdate, Role, RoleId, RoleName, UserDraft, UserId, UserProfile,
};

/// Members to insert or update by login.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterUsersRequest {
    pub users: Vec<UserDraft>,
}

/// Mutable fields to change on an existing member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditUserRequest {
    pub login: Login,
    pub update: ProfileUpdate,
}

/// Card hand-off from the identity provider: a verified login plus the card
/// it presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkUidRequest {
    pub login: Login,
    pub uid: CardUid,
}

/// Reader to register under an existing role and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterDeviceRequest {
    pub mac: MacAddress,
    pub role: RoleName,
    pub location: LocationName,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryCommand: Send + Sync {
    /// Upsert members; returns the stored profiles in request order.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` for an empty list and `already_exists` when
    /// a uid belongs to another member.
    async fn register_users(&self, request: RegisterUsersRequest)
    -> Result<Vec<UserProfile>, Error>;

    /// Change a member's uid and/or wallet.
    ///
    /// # Errors
    ///
    /// Returns `not_found` for unknown logins and `already_exists` when the
    /// uid is taken.
    async fn edit_user(&self, request: EditUserRequest) -> Result<UserProfile, Error>;

    /// Link a card to a member, creating the member when the login is new.
    ///
    /// # Errors
    ///
    /// Returns `already_exists` when the member already has a card or the
    /// card belongs to someone else.
    async fn link_uid(&self, request: LinkUidRequest) -> Result<UserProfile, Error>;

    /// # Errors
    ///
    /// Returns `already_exists` for a duplicate name.
    async fn create_role(&self, name: RoleName) -> Result<Role, Error>;

    /// # Errors
    ///
    /// Returns `already_exists` for a duplicate name.
    async fn create_location(&self, name: LocationName) -> Result<Location, Error>;

    /// # Errors
    ///
    /// Returns `not_found` for an unknown role or location and
    /// `already_exists` for a duplicate MAC address.
    async fn register_device(&self, request: RegisterDeviceRequest) -> Result<Device, Error>;
}

/// Fixture command echoing its input with identifier `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDirectoryCommand;

fn fixture_profile(draft: UserDraft) -> UserProfile {
    UserProfile {
        id: UserId::new(1),
        login: draft.login,
        uid: draft.uid,
        wallet: draft.wallet,
    }
}

#[async_trait]
impl DirectoryCommand for FixtureDirectoryCommand {
    async fn register_users(
        &self,
        request: RegisterUsersRequest,
    ) -> Result<Vec<UserProfile>, Error> {
        Ok(request.users.into_iter().map(fixture_profile).collect())
    }

    async fn edit_user(&self, request: EditUserRequest) -> Result<UserProfile, Error> {
        Ok(fixture_profile(UserDraft {
            login: request.login,
            uid: request.update.uid,
            wallet: request.update.wallet,
        }))
    }

    async fn link_uid(&self, request: LinkUidRequest) -> Result<UserProfile, Error> {
        Ok(fixture_profile(UserDraft {
            login: request.login,
            uid: Some(request.uid),
            wallet: None,
        }))
    }

    async fn create_role(&self, name: RoleName) -> Result<Role, Error> {
        Ok(Role {
            id: RoleId::new(1),
            name,
        })
    }

    async fn create_location(&self, name: LocationName) -> Result<Location, Error> {
        Ok(Location {
            id: LocationId::new(1),
            name,
        })
    }

    async fn register_device(&self, request: RegisterDeviceRequest) -> Result<Device, Error> {
        Ok(Device {
            id: DeviceId::new(1),
            mac: request.mac,
            role: Role {
                id: RoleId::new(1),
                name: request.role,
            },
            location: Location {
                id: LocationId::new(1),
                name: request.location,
            },
        })
    }
}
