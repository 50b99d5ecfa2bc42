//! Activity HTTP handlers: reader taps in, role-filtered history out.
//!
//! ```text
//! POST /api/v1/activities
//! GET  /api/v1/activities?role=..&start=..&end=..
//! GET  /api/v1/activities/cleanings?start=..&end=..
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{ActivitiesByRoleRequest, RecordActivityRequest};
use crate::domain::{Activity, CardUid, MacAddress, RoleName};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::{DeviceBody, UserBody};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_optional_seconds, parse_required};

/// Role whose taps the cleanings report lists.
pub const CLEANING_ROLE: &str = "cleaning";

/// A tap reported by a reader.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordActivityBody {
    #[schema(example = "04A224B2C35E80")]
    pub uid: Option<String>,
    #[schema(example = "aa:bb:cc:dd:ee:ff")]
    pub mac: Option<String>,
}

/// The stored tap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordedActivityBody {
    pub id: i64,
    pub user_id: i32,
    pub device_id: i32,
    /// Unix seconds.
    pub created_at: i64,
}

/// A tap with its member and reader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBody {
    pub id: i64,
    /// Unix seconds.
    pub created_at: i64,
    pub user: UserBody,
    pub device: DeviceBody,
}

impl From<Activity> for ActivityBody {
    fn from(value: Activity) -> Self {
        Self {
            id: value.id.get(),
            created_at: value.created_at,
            user: UserBody::from(value.user),
            device: DeviceBody::from(value.device),
        }
    }
}

/// Window bounds in unix seconds, both inclusive.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct WindowQuery {
    /// Defaults to the beginning of today.
    pub start: Option<String>,
    /// Defaults to `start` plus one day.
    pub end: Option<String>,
}

/// Window bounds plus the device role to filter on.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RoleWindowQuery {
    pub role: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
}

async fn query_by_role(
    state: &HttpState,
    role: RoleName,
    start: Option<String>,
    end: Option<String>,
) -> ApiResult<Vec<ActivityBody>> {
    let request = ActivitiesByRoleRequest {
        role,
        start: parse_optional_seconds(start, FieldName::new("start"))?,
        end: parse_optional_seconds(end, FieldName::new("end"))?,
    };
    let response = state.activities_query.activities_by_role(request).await?;
    Ok(response
        .activities
        .into_iter()
        .map(ActivityBody::from)
        .collect())
}

/// Record a tap from a reader.
#[utoipa::path(
    post,
    path = "/api/v1/activities",
    request_body = RecordActivityBody,
    responses(
        (status = 200, description = "Tap recorded", body = RecordedActivityBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 404, description = "Unknown card or reader", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "recordActivity",
    security(("ApiKey" = []))
)]
#[post("/activities")]
pub async fn record_activity(
    state: web::Data<HttpState>,
    payload: web::Json<RecordActivityBody>,
) -> ApiResult<web::Json<RecordedActivityBody>> {
    let body = payload.into_inner();
    let request = RecordActivityRequest {
        uid: parse_required(body.uid, FieldName::new("uid"), CardUid::new)?,
        mac: parse_required(body.mac, FieldName::new("mac"), MacAddress::new)?,
    };
    let recorded = state.activities.record(request).await?;
    Ok(web::Json(RecordedActivityBody {
        id: recorded.id.get(),
        user_id: recorded.user_id.get(),
        device_id: recorded.device_id.get(),
        created_at: recorded.created_at,
    }))
}

/// List taps on readers of one role inside a window.
#[utoipa::path(
    get,
    path = "/api/v1/activities",
    params(RoleWindowQuery),
    responses(
        (status = 200, description = "Taps, oldest first", body = [ActivityBody]),
        (status = 400, description = "Invalid window or role", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "listActivities",
    security(("ApiKey" = []))
)]
#[get("/activities")]
pub async fn list_activities(
    state: web::Data<HttpState>,
    query: web::Query<RoleWindowQuery>,
) -> ApiResult<web::Json<Vec<ActivityBody>>> {
    let RoleWindowQuery { role, start, end } = query.into_inner();
    let role = parse_required(role, FieldName::new("role"), RoleName::new)?;
    Ok(web::Json(query_by_role(&state, role, start, end).await?))
}

/// List taps on cleaning readers inside a window.
#[utoipa::path(
    get,
    path = "/api/v1/activities/cleanings",
    params(WindowQuery),
    responses(
        (status = 200, description = "Cleaning taps, oldest first", body = [ActivityBody]),
        (status = 400, description = "Invalid window", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema)
    ),
    tags = ["activities"],
    operation_id = "listCleanings",
    security(("ApiKey" = []))
)]
#[get("/activities/cleanings")]
pub async fn list_cleanings(
    state: web::Data<HttpState>,
    query: web::Query<WindowQuery>,
) -> ApiResult<web::Json<Vec<ActivityBody>>> {
    let WindowQuery { start, end } = query.into_inner();
    let role = RoleName::new(CLEANING_ROLE)?;
    Ok(web::Json(query_by_role(&state, role, start, end).await?))
}

#[cfg(test)]
#[path = "activities_tests.rs"]
mod tests;
