//! Reference data: members, roles, locations and devices.
//!
//! None of these rows are ever deleted. Roles and locations are looked up by
//! name, devices by MAC address and members by login or card uid.

use super::{
    CardUid, DeviceId, LocationId, LocationName, Login, MacAddress, RoleId, RoleName, UserId,
    WalletAddress,
};

/// A registered member as seen by the shift and activity views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub login: Login,
    /// Linked NFC card, assigned at most once through the card hand-off.
    pub uid: Option<CardUid>,
    pub wallet: Option<WalletAddress>,
}

/// Member fields supplied when creating or bulk-registering users.
///
/// Absent `uid`/`wallet` leave any stored value untouched on upsert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub login: Login,
    pub uid: Option<CardUid>,
    pub wallet: Option<WalletAddress>,
}

impl UserDraft {
    /// Draft carrying only a login.
    #[must_use]
    pub fn new(login: Login) -> Self {
        Self {
            login,
            uid: None,
            wallet: None,
        }
    }
}

/// Mutable member fields; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub uid: Option<CardUid>,
    pub wallet: Option<WalletAddress>,
}

impl ProfileUpdate {
    /// Whether the update would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uid.is_none() && self.wallet.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: RoleId,
    pub name: RoleName,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub id: LocationId,
    pub name: LocationName,
}

/// An NFC reader with its role and location resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub id: DeviceId,
    pub mac: MacAddress,
    pub role: Role,
    pub location: Location,
}
