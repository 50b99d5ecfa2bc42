//! Record management for members, roles, locations and readers.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use super::lookup::Lookup;
use super::ports::{
    DirectoryCommand, DirectoryLookup, DirectoryRepository, DirectoryRepositoryError,
    EditUserRequest, LinkUidRequest, RegisterDeviceRequest, RegisterUsersRequest,
};
use super::{
    Device, Error, Location, LocationName, Role, RoleName, UserDraft, UserProfile,
};

/// Directory service implementing [`DirectoryCommand`].
pub struct DirectoryService<D, L> {
    directory: Arc<D>,
    lookup: Lookup<L>,
}

impl<D, L> DirectoryService<D, L> {
    /// Create a new service with the given directory repository and lookup.
    pub fn new(directory: Arc<D>, lookup: Arc<L>) -> Self {
        Self {
            directory,
            lookup: Lookup::new(lookup),
        }
    }
}

fn map_directory_error(error: DirectoryRepositoryError) -> Error {
    match error {
        DirectoryRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("directory repository unavailable: {message}"))
        }
        DirectoryRepositoryError::Query { message } => {
            Error::internal(format!("directory repository error: {message}"))
        }
        DirectoryRepositoryError::Duplicate { message } => {
            Error::already_exists(message).with_details(json!({ "code": "duplicate" }))
        }
        DirectoryRepositoryError::UserNotFound { login } => {
            Error::not_found(format!("user {login} is not registered")).with_details(json!({
                "field": "login",
                "value": login,
                "code": "not_found",
            }))
        }
        DirectoryRepositoryError::UidAlreadyLinked { login } => {
            Error::already_exists(format!("user {login} already has a linked card"))
                .with_details(json!({ "field": "uid", "code": "uid_already_linked" }))
        }
    }
}

#[async_trait]
impl<D, L> DirectoryCommand for DirectoryService<D, L>
where
    D: DirectoryRepository,
    L: DirectoryLookup,
{
    async fn register_users(
        &self,
        request: RegisterUsersRequest,
    ) -> Result<Vec<UserProfile>, Error> {
        if request.users.is_empty() {
            return Err(Error::invalid_request("users must contain at least one entry"));
        }
        let stored = self
            .directory
            .upsert_users(&request.users)
            .await
            .map_err(map_directory_error)?;
        info!(count = stored.len(), "users registered");
        Ok(stored)
    }

    async fn edit_user(&self, request: EditUserRequest) -> Result<UserProfile, Error> {
        if request.update.is_empty() {
            return Err(Error::invalid_request("nothing to update: supply uid or wallet"));
        }
        self.directory
            .update_user_profile(&request.login, &request.update)
            .await
            .map_err(map_directory_error)
    }

    async fn link_uid(&self, request: LinkUidRequest) -> Result<UserProfile, Error> {
        let LinkUidRequest { login, uid } = request;
        let existing = self
            .directory
            .find_user_by_login(&login)
            .await
            .map_err(map_directory_error)?;
        let profile = match existing {
            None => {
                let draft = UserDraft {
                    login,
                    uid: Some(uid),
                    wallet: None,
                };
                self.directory.create_user(&draft).await
            }
            Some(user) if user.uid.is_some() => {
                Err(DirectoryRepositoryError::uid_already_linked(user.login.as_str()))
            }
            Some(user) => self.directory.assign_uid(&user.login, &uid).await,
        }
        .map_err(map_directory_error)?;
        info!(login = %profile.login, "card linked");
        Ok(profile)
    }

    async fn create_role(&self, name: RoleName) -> Result<Role, Error> {
        self.directory
            .create_role(&name)
            .await
            .map_err(map_directory_error)
    }

    async fn create_location(&self, name: LocationName) -> Result<Location, Error> {
        self.directory
            .create_location(&name)
            .await
            .map_err(map_directory_error)
    }

    async fn register_device(&self, request: RegisterDeviceRequest) -> Result<Device, Error> {
        let RegisterDeviceRequest {
            mac,
            role,
            location,
        } = request;
        let role_id = self.lookup.role(&role).await?;
        let location_id = self.lookup.location(&location).await?;
        let id = self
            .directory
            .create_device(&mac, role_id, location_id)
            .await
            .map_err(map_directory_error)?;
        Ok(Device {
            id,
            mac,
            role: Role {
                id: role_id,
                name: role,
            },
            location: Location {
                id: location_id,
                name: location,
            },
        })
    }
}

#[cfg(test)]
#[path = "directory_service_tests.rs"]
mod tests;
