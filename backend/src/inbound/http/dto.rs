//! Response bodies shared across handlers.
//!
//! Wire shapes are camelCase and omit absent optionals.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Device, Location, Role, Shift, UserProfile};

/// A member as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserBody {
    pub id: i32,
    #[schema(example = "alice")]
    pub login: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "04A224B2C35E80")]
    pub uid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet: Option<String>,
}

impl From<UserProfile> for UserBody {
    fn from(value: UserProfile) -> Self {
        Self {
            id: value.id.get(),
            login: value.login.into(),
            uid: value.uid.map(String::from),
            wallet: value.wallet.map(String::from),
        }
    }
}

/// A dated shift with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShiftBody {
    pub id: i32,
    #[schema(format = "date", example = "2024-06-01")]
    pub date: String,
    pub user: UserBody,
}

impl From<Shift> for ShiftBody {
    fn from(value: Shift) -> Self {
        Self {
            id: value.id.get(),
            date: value.date.to_string(),
            user: UserBody::from(value.user),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RoleBody {
    pub id: i32,
    #[schema(example = "cleaning")]
    pub name: String,
}

impl From<Role> for RoleBody {
    fn from(value: Role) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LocationBody {
    pub id: i32,
    #[schema(example = "workshop")]
    pub name: String,
}

impl From<Location> for LocationBody {
    fn from(value: Location) -> Self {
        Self {
            id: value.id.get(),
            name: value.name.into(),
        }
    }
}

/// A reader with its role and location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeviceBody {
    pub id: i32,
    #[schema(example = "aa:bb:cc:dd:ee:ff")]
    pub mac: String,
    pub role: RoleBody,
    pub location: LocationBody,
}

impl From<Device> for DeviceBody {
    fn from(value: Device) -> Self {
        Self {
            id: value.id.get(),
            mac: value.mac.into(),
            role: RoleBody::from(value.role),
            location: LocationBody::from(value.location),
        }
    }
}
