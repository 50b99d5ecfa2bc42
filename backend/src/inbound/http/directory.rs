//! Record-management HTTP handlers for members, roles, locations and readers.
//!
//! ```text
//! POST /api/v1/users
//! PUT  /api/v1/users
//! POST /api/v1/users/uid
//! POST /api/v1/roles
//! POST /api/v1/locations
//! POST /api/v1/devices
//! ```

use actix_web::{post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    EditUserRequest, LinkUidRequest, RegisterDeviceRequest, RegisterUsersRequest,
};
use crate::domain::{
    CardUid, Error, LocationName, Login, MacAddress, ProfileUpdate, RoleName, UserDraft,
    WalletAddress,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{DeviceBody, LocationBody, RoleBody, UserBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional, parse_required};

/// A member record as supplied by an import or an edit.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInputBody {
    #[schema(example = "alice")]
    pub login: Option<String>,
    /// Card uid; `""` means unchanged.
    pub uid: Option<String>,
    /// Wallet address; `""` means unchanged.
    pub wallet: Option<String>,
}

/// Members to insert or update by login.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUsersBody {
    #[serde(default)]
    pub users: Vec<UserInputBody>,
}

/// Logins written by an import, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUsersBody {
    pub logins: Vec<String>,
}

/// Card hand-off from the identity provider.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LinkUidBody {
    pub login: Option<String>,
    pub uid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NamedBody {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDeviceBody {
    pub mac: Option<String>,
    /// Name of an existing role.
    pub role: Option<String>,
    /// Name of an existing location.
    pub location: Option<String>,
}

fn parse_update(uid: Option<String>, wallet: Option<String>) -> Result<ProfileUpdate, Error> {
    Ok(ProfileUpdate {
        uid: parse_optional(uid, FieldName::new("uid"), CardUid::new)?,
        wallet: parse_optional(wallet, FieldName::new("wallet"), WalletAddress::new)?,
    })
}

/// Records without a login are skipped.
fn parse_drafts(users: Vec<UserInputBody>) -> Result<Vec<UserDraft>, Error> {
    let mut drafts = Vec::with_capacity(users.len());
    for user in users {
        let Some(login) = user.login.filter(|login| !login.is_empty()) else {
            continue;
        };
        let update = parse_update(user.uid, user.wallet)?;
        drafts.push(UserDraft {
            login: parse_required(Some(login), FieldName::new("login"), Login::new)?,
            uid: update.uid,
            wallet: update.wallet,
        });
    }
    Ok(drafts)
}

/// Insert or update members by login.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUsersBody,
    responses(
        (status = 200, description = "Logins written", body = RegisteredUsersBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 409, description = "Card already linked to another member", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "registerUsers",
    security(("ApiKey" = []))
)]
#[post("/users")]
pub async fn register_users(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUsersBody>,
) -> ApiResult<web::Json<RegisteredUsersBody>> {
    let users = parse_drafts(payload.into_inner().users)?;
    let stored = state
        .directory
        .register_users(RegisterUsersRequest { users })
        .await?;
    Ok(web::Json(RegisteredUsersBody {
        logins: stored
            .into_iter()
            .map(|profile| String::from(profile.login))
            .collect(),
    }))
}

/// Change a member's card and/or wallet.
#[utoipa::path(
    put,
    path = "/api/v1/users",
    request_body = UserInputBody,
    responses(
        (status = 200, description = "Updated member", body = UserBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 404, description = "Unknown login", body = ErrorSchema),
        (status = 409, description = "Card already linked", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "editUser",
    security(("ApiKey" = []))
)]
#[put("/users")]
pub async fn edit_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserInputBody>,
) -> ApiResult<web::Json<UserBody>> {
    let body = payload.into_inner();
    let request = EditUserRequest {
        login: parse_required(body.login, FieldName::new("login"), Login::new)?,
        update: parse_update(body.uid, body.wallet)?,
    };
    let profile = state.directory.edit_user(request).await?;
    Ok(web::Json(UserBody::from(profile)))
}

/// Link a card to a member, creating the member when the login is new.
#[utoipa::path(
    post,
    path = "/api/v1/users/uid",
    request_body = LinkUidBody,
    responses(
        (status = 200, description = "Member with the card linked", body = UserBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 409, description = "Member or card already linked", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "linkUid",
    security(("ApiKey" = []))
)]
#[post("/users/uid")]
pub async fn link_uid(
    state: web::Data<HttpState>,
    payload: web::Json<LinkUidBody>,
) -> ApiResult<web::Json<UserBody>> {
    let body = payload.into_inner();
    let request = LinkUidRequest {
        login: parse_required(body.login, FieldName::new("login"), Login::new)?,
        uid: parse_required(body.uid, FieldName::new("uid"), CardUid::new)?,
    };
    let profile = state.directory.link_uid(request).await?;
    Ok(web::Json(UserBody::from(profile)))
}

#[utoipa::path(
    post,
    path = "/api/v1/roles",
    request_body = NamedBody,
    responses(
        (status = 200, description = "Created role", body = RoleBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 409, description = "Duplicate name", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "createRole",
    security(("ApiKey" = []))
)]
#[post("/roles")]
pub async fn create_role(
    state: web::Data<HttpState>,
    payload: web::Json<NamedBody>,
) -> ApiResult<web::Json<RoleBody>> {
    let name = parse_required(payload.into_inner().name, FieldName::new("name"), RoleName::new)?;
    let role = state.directory.create_role(name).await?;
    Ok(web::Json(RoleBody::from(role)))
}

#[utoipa::path(
    post,
    path = "/api/v1/locations",
    request_body = NamedBody,
    responses(
        (status = 200, description = "Created location", body = LocationBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 409, description = "Duplicate name", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "createLocation",
    security(("ApiKey" = []))
)]
#[post("/locations")]
pub async fn create_location(
    state: web::Data<HttpState>,
    payload: web::Json<NamedBody>,
) -> ApiResult<web::Json<LocationBody>> {
    let name = parse_required(
        payload.into_inner().name,
        FieldName::new("name"),
        LocationName::new,
    )?;
    let location = state.directory.create_location(name).await?;
    Ok(web::Json(LocationBody::from(location)))
}

/// Register a reader under an existing role and location.
#[utoipa::path(
    post,
    path = "/api/v1/devices",
    request_body = RegisterDeviceBody,
    responses(
        (status = 200, description = "Registered reader", body = DeviceBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 404, description = "Unknown role or location", body = ErrorSchema),
        (status = 409, description = "Duplicate MAC address", body = ErrorSchema)
    ),
    tags = ["directory"],
    operation_id = "registerDevice",
    security(("ApiKey" = []))
)]
#[post("/devices")]
pub async fn register_device(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterDeviceBody>,
) -> ApiResult<web::Json<DeviceBody>> {
    let body = payload.into_inner();
    let request = RegisterDeviceRequest {
        mac: parse_required(body.mac, FieldName::new("mac"), MacAddress::new)?,
        role: parse_required(body.role, FieldName::new("role"), RoleName::new)?,
        location: parse_required(body.location, FieldName::new("location"), LocationName::new)?,
    };
    let device = state.directory.register_device(request).await?;
    Ok(web::Json(DeviceBody::from(device)))
}

#[cfg(test)]
#[path = "directory_tests.rs"]
mod tests;
