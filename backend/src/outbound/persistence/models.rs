//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and never
//! leave it. Conversions into domain types re-validate stored strings, so a
//! row edited by hand into an invalid state surfaces as a query error rather
//! than an invalid domain value.

use chrono::NaiveDate;
use diesel::prelude::*;

use crate::domain::{
    CardUid, Device, DeviceId, Location, LocationId, LocationName, Login, MacAddress, Role,
    RoleId, RoleName, Shift, ShiftDate, ShiftId, UserId, UserProfile, ValueError, WalletAddress,
};

use super::schema::{activities, devices, locations, roles, shifts, users};

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i32,
    pub login: String,
    pub uid: Option<String>,
    pub wallet: Option<String>,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = ValueError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(row.id),
            login: Login::new(row.login)?,
            uid: row.uid.map(CardUid::new).transpose()?,
            wallet: row.wallet.map(WalletAddress::new).transpose()?,
        })
    }
}

/// Insertable member; also used as the upsert changeset.
///
/// `None` fields are skipped by `AsChangeset`, so an upsert never clears a
/// stored uid or wallet. `login` is always present, which keeps the
/// changeset non-empty.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub login: &'a str,
    pub uid: Option<&'a str>,
    pub wallet: Option<&'a str>,
}

/// Changeset for the mutable member fields.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
pub(crate) struct UserProfileUpdate<'a> {
    pub uid: Option<&'a str>,
    pub wallet: Option<&'a str>,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RoleRow {
    pub id: i32,
    pub name: String,
}

impl TryFrom<RoleRow> for Role {
    type Error = ValueError;

    fn try_from(row: RoleRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: RoleId::new(row.id),
            name: RoleName::new(row.name)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = roles)]
pub(crate) struct NewRoleRow<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = locations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LocationRow {
    pub id: i32,
    pub name: String,
}

impl TryFrom<LocationRow> for Location {
    type Error = ValueError;

    fn try_from(row: LocationRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: LocationId::new(row.id),
            name: LocationName::new(row.name)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = locations)]
pub(crate) struct NewLocationRow<'a> {
    pub name: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = devices)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DeviceRow {
    pub id: i32,
    pub mac: String,
    #[expect(dead_code, reason = "role is loaded through the join")]
    pub role_id: i32,
    #[expect(dead_code, reason = "location is loaded through the join")]
    pub location_id: i32,
}

impl DeviceRow {
    /// Combine with the joined role and location rows.
    pub(crate) fn into_device(
        self,
        role: RoleRow,
        location: LocationRow,
    ) -> Result<Device, ValueError> {
        Ok(Device {
            id: DeviceId::new(self.id),
            mac: MacAddress::new(self.mac)?,
            role: Role::try_from(role)?,
            location: Location::try_from(location)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = devices)]
pub(crate) struct NewDeviceRow<'a> {
    pub mac: &'a str,
    pub role_id: i32,
    pub location_id: i32,
}

// ---------------------------------------------------------------------------
// Shifts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = shifts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ShiftRow {
    pub id: i32,
    pub date: NaiveDate,
    pub user_id: i32,
}

impl ShiftRow {
    /// Combine with the owning member's row.
    pub(crate) fn into_shift(self, owner: UserRow) -> Result<Shift, ValueError> {
        Ok(Shift {
            id: ShiftId::new(self.id),
            date: ShiftDate::from(self.date),
            user: UserProfile::try_from(owner)?,
        })
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shifts)]
pub(crate) struct NewShiftRow {
    pub date: NaiveDate,
    pub user_id: i32,
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = activities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ActivityRow {
    pub id: i64,
    #[expect(dead_code, reason = "member is loaded through the join")]
    pub user_id: i32,
    #[expect(dead_code, reason = "device is loaded through the join")]
    pub device_id: i32,
    pub created_at: i64,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = activities)]
pub(crate) struct NewActivityRow {
    pub user_id: i32,
    pub device_id: i32,
    pub created_at: i64,
}
