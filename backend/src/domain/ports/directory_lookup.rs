//! Driven port resolving human-facing keys to store identifiers.
//!
//! Every use case goes through this port before touching shifts or
//! activities. Lookups are read-only point queries; a missing key is
//! `Ok(None)` and callers decide how to report it.

use async_trait::async_trait;

use crate::domain::{
    CardUid, DeviceId, LocationId, LocationName, Login, MacAddress, RoleId, RoleName, UserId,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised while resolving directory keys.
    pub enum DirectoryLookupError {
        /// Lookup connection could not be established.
        Connection { message: String } => "directory lookup connection failed: {message}",
        /// Lookup query failed during execution.
        Query { message: String } => "directory lookup query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Resolve a member by login.
    async fn resolve_user(&self, login: &Login) -> Result<Option<UserId>, DirectoryLookupError>;

    /// Resolve a member by linked card uid.
    async fn resolve_user_by_uid(
        &self,
        uid: &CardUid,
    ) -> Result<Option<UserId>, DirectoryLookupError>;

    /// Resolve a reader by MAC address.
    async fn resolve_device(
        &self,
        mac: &MacAddress,
    ) -> Result<Option<DeviceId>, DirectoryLookupError>;

    /// Resolve a role by name.
    async fn resolve_role(&self, name: &RoleName) -> Result<Option<RoleId>, DirectoryLookupError>;

    /// Resolve a location by name.
    async fn resolve_location(
        &self,
        name: &LocationName,
    ) -> Result<Option<LocationId>, DirectoryLookupError>;
}

/// Fixture lookup that resolves every key to identifier `1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDirectoryLookup;

#[async_trait]
impl DirectoryLookup for FixtureDirectoryLookup {
    async fn resolve_user(&self, _login: &Login) -> Result<Option<UserId>, DirectoryLookupError> {
        Ok(Some(UserId::new(1)))
    }

    async fn resolve_user_by_uid(
        &self,
        _uid: &CardUid,
    ) -> Result<Option<UserId>, DirectoryLookupError> {
        Ok(Some(UserId::new(1)))
    }

    async fn resolve_device(
        &self,
        _mac: &MacAddress,
    ) -> Result<Option<DeviceId>, DirectoryLookupError> {
        Ok(Some(DeviceId::new(1)))
    }

    async fn resolve_role(&self, _name: &RoleName) -> Result<Option<RoleId>, DirectoryLookupError> {
        Ok(Some(RoleId::new(1)))
    }

    async fn resolve_location(
        &self,
        _name: &LocationName,
    ) -> Result<Option<LocationId>, DirectoryLookupError> {
        Ok(Some(LocationId::new(1)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn fixture_resolves_every_key() {
        let lookup = FixtureDirectoryLookup;
        let login = Login::new("alice").expect("valid login");
        let mac = MacAddress::new("aa:bb:cc:dd:ee:ff").expect("valid mac");

        assert_eq!(
            lookup.resolve_user(&login).await.expect("lookup succeeds"),
            Some(UserId::new(1))
        );
        assert_eq!(
            lookup.resolve_device(&mac).await.expect("lookup succeeds"),
            Some(DeviceId::new(1))
        );
    }
}
