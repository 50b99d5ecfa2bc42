//! Lookup service: key resolution with `NotFound` reporting.
//!
//! Wraps a [`DirectoryLookup`] adapter and turns a missing key into a
//! `not_found` error whose details name the field and the value that failed.

use std::sync::Arc;

use serde_json::json;

use super::ports::{DirectoryLookup, DirectoryLookupError};
use super::{
    CardUid, DeviceId, Error, LocationId, LocationName, Login, MacAddress, RoleId, RoleName, UserId,
};

/// Resolves logins, cards, readers, roles and locations to identifiers.
pub struct Lookup<L> {
    directory: Arc<L>,
}

impl<L> Clone for Lookup<L> {
    fn clone(&self) -> Self {
        Self {
            directory: Arc::clone(&self.directory),
        }
    }
}

impl<L> Lookup<L> {
    /// Wrap a directory lookup port.
    pub fn new(directory: Arc<L>) -> Self {
        Self { directory }
    }
}

fn map_lookup_error(error: DirectoryLookupError) -> Error {
    match error {
        DirectoryLookupError::Connection { message } => {
            Error::service_unavailable(format!("directory lookup unavailable: {message}"))
        }
        DirectoryLookupError::Query { message } => {
            Error::internal(format!("directory lookup error: {message}"))
        }
    }
}

fn missing(kind: &'static str, field: &'static str, value: &str) -> Error {
    Error::not_found(format!("{kind} {value} is not registered")).with_details(json!({
        "field": field,
        "value": value,
        "code": "not_found",
    }))
}

impl<L: DirectoryLookup> Lookup<L> {
    /// Resolve a member by login.
    ///
    /// # Errors
    /// `not_found` when no member has this login.
    pub async fn user(&self, login: &Login) -> Result<UserId, Error> {
        self.directory
            .resolve_user(login)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| missing("user", "login", login.as_str()))
    }

    /// Resolve a member by card uid.
    ///
    /// # Errors
    /// `not_found` when no member has this card.
    pub async fn user_by_uid(&self, uid: &CardUid) -> Result<UserId, Error> {
        self.directory
            .resolve_user_by_uid(uid)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| missing("card", "uid", uid.as_str()))
    }

    /// Resolve a reader by MAC address.
    ///
    /// # Errors
    /// `not_found` when no reader has this address.
    pub async fn device(&self, mac: &MacAddress) -> Result<DeviceId, Error> {
        self.directory
            .resolve_device(mac)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| missing("device", "mac", mac.as_str()))
    }

    /// Resolve a role by name.
    ///
    /// # Errors
    /// `not_found` when the role does not exist.
    pub async fn role(&self, name: &RoleName) -> Result<RoleId, Error> {
        self.directory
            .resolve_role(name)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| missing("role", "role", name.as_str()))
    }

    /// Resolve a location by name.
    ///
    /// # Errors
    /// `not_found` when the location does not exist.
    pub async fn location(&self, name: &LocationName) -> Result<LocationId, Error> {
        self.directory
            .resolve_location(name)
            .await
            .map_err(map_lookup_error)?
            .ok_or_else(|| missing("location", "location", name.as_str()))
    }
}
