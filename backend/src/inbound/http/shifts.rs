//! Shift schedule and exchange HTTP handlers.
//!
//! ```text
//! GET    /api/v1/shifts?date=YYYY-MM-DD
//! POST   /api/v1/shifts
//! POST   /api/v1/shifts/exchange
//! DELETE /api/v1/shifts?login=..&date=..
//! ```

use actix_web::{delete, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    BulkAssignRequest, CancelShiftRequest, ExchangeShiftsRequest, ShiftsForDateRequest,
};
use crate::domain::{Error, Login, ScheduleEntry, ShiftDate, ShiftSlot};
use crate::inbound::http::ApiResult;
use crate::inbound::http::dto::ShiftBody;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_date, parse_optional, parse_required};

/// Query parameters for listing a day's shifts.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ShiftsQuery {
    /// Day to list (`YYYY-MM-DD`); defaults to today.
    pub date: Option<String>,
}

/// One day of a bulk schedule.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryBody {
    #[schema(format = "date", example = "2024-06-03")]
    pub date: Option<String>,
    /// Logins working that day.
    #[serde(default)]
    #[schema(example = json!(["alice", "carol"]))]
    pub login: Vec<String>,
}

/// Days on which at least one new shift was created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkAssignResponseBody {
    #[schema(example = json!(["2024-06-03"]))]
    pub date: Vec<String>,
}

/// Two `(login, date)` slots whose owners should be swapped.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequestBody {
    pub login1: Option<String>,
    #[schema(format = "date")]
    pub date1: Option<String>,
    pub login2: Option<String>,
    #[schema(format = "date")]
    pub date2: Option<String>,
}

/// Both shifts after the swap, in request order.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeResponseBody {
    pub shifts: Vec<ShiftBody>,
}

/// Query parameters identifying the shift to cancel.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CancelShiftQuery {
    pub login: Option<String>,
    /// Day of the shift (`YYYY-MM-DD`).
    pub date: Option<String>,
}

fn parse_logins(raw: Vec<String>, entry: usize) -> Result<Vec<Login>, Error> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            Login::new(value.clone()).map_err(|error| {
                Error::invalid_request(error.to_string()).with_details(json!({
                    "field": "login",
                    "entry": entry,
                    "index": index,
                    "value": value,
                    "code": error.code(),
                }))
            })
        })
        .collect()
}

/// Entries without a date are skipped; entries without logins are passed on
/// and ignored by the schedule service. Only a payload with no entries at all
/// is rejected.
fn parse_schedule(entries: Vec<ScheduleEntryBody>) -> Result<Vec<ScheduleEntry>, Error> {
    if entries.is_empty() {
        return Err(Error::invalid_request("schedule must contain at least one entry"));
    }
    let mut parsed = Vec::with_capacity(entries.len());
    for (entry, body) in entries.into_iter().enumerate() {
        let Some(raw_date) = body.date.filter(|date| !date.is_empty()) else {
            continue;
        };
        let date = ShiftDate::parse(&raw_date).map_err(|error| {
            Error::invalid_request(error.to_string()).with_details(json!({
                "field": "date",
                "entry": entry,
                "value": raw_date,
                "code": error.code(),
            }))
        })?;
        parsed.push(ScheduleEntry {
            date,
            logins: parse_logins(body.login, entry)?,
        });
    }
    Ok(parsed)
}

fn parse_slot(
    login: Option<String>,
    login_field: FieldName,
    date: Option<String>,
    date_field: FieldName,
) -> Result<ShiftSlot, Error> {
    Ok(ShiftSlot::new(
        parse_required(login, login_field, Login::new)?,
        parse_date(date, date_field)?,
    ))
}

/// List the shifts on one day, in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/shifts",
    params(ShiftsQuery),
    responses(
        (status = 200, description = "Shifts on the day", body = [ShiftBody]),
        (status = 400, description = "Malformed date", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 503, description = "Database unavailable", body = ErrorSchema)
    ),
    tags = ["shifts"],
    operation_id = "listShifts",
    security(("ApiKey" = []))
)]
#[get("/shifts")]
pub async fn list_shifts(
    state: web::Data<HttpState>,
    query: web::Query<ShiftsQuery>,
) -> ApiResult<web::Json<Vec<ShiftBody>>> {
    let date = parse_optional(query.into_inner().date, FieldName::new("date"), |raw| {
        ShiftDate::parse(&raw)
    })?;
    let response = state
        .shifts_query
        .shifts_for_date(ShiftsForDateRequest { date })
        .await?;
    Ok(web::Json(
        response.shifts.into_iter().map(ShiftBody::from).collect(),
    ))
}

/// Import a schedule; existing assignments are left untouched.
#[utoipa::path(
    post,
    path = "/api/v1/shifts",
    request_body = Vec<ScheduleEntryBody>,
    responses(
        (status = 200, description = "Days that gained a shift", body = BulkAssignResponseBody),
        (status = 400, description = "Invalid schedule", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 404, description = "Unknown login; nothing was written", body = ErrorSchema),
        (status = 409, description = "Concurrent import; retry", body = ErrorSchema)
    ),
    tags = ["shifts"],
    operation_id = "assignShifts",
    security(("ApiKey" = []))
)]
#[post("/shifts")]
pub async fn assign_shifts(
    state: web::Data<HttpState>,
    payload: web::Json<Vec<ScheduleEntryBody>>,
) -> ApiResult<web::Json<BulkAssignResponseBody>> {
    let entries = parse_schedule(payload.into_inner())?;
    let response = state
        .shifts
        .bulk_assign(BulkAssignRequest { entries })
        .await?;
    Ok(web::Json(BulkAssignResponseBody {
        date: response
            .added_dates
            .into_iter()
            .map(String::from)
            .collect(),
    }))
}

/// Swap the owners of two existing shifts.
#[utoipa::path(
    post,
    path = "/api/v1/shifts/exchange",
    request_body = ExchangeRequestBody,
    responses(
        (status = 200, description = "Shifts after the swap", body = ExchangeResponseBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 404, description = "Unknown login or shift", body = ErrorSchema),
        (status = 409, description = "Double booking or concurrent update", body = ErrorSchema)
    ),
    tags = ["shifts"],
    operation_id = "exchangeShifts",
    security(("ApiKey" = []))
)]
#[post("/shifts/exchange")]
pub async fn exchange_shifts(
    state: web::Data<HttpState>,
    payload: web::Json<ExchangeRequestBody>,
) -> ApiResult<web::Json<ExchangeResponseBody>> {
    let body = payload.into_inner();
    let first = parse_slot(
        body.login1,
        FieldName::new("login1"),
        body.date1,
        FieldName::new("date1"),
    )?;
    let second = parse_slot(
        body.login2,
        FieldName::new("login2"),
        body.date2,
        FieldName::new("date2"),
    )?;
    let exchanged = state
        .exchange
        .exchange(ExchangeShiftsRequest { first, second })
        .await?;
    Ok(web::Json(ExchangeResponseBody {
        shifts: vec![
            ShiftBody::from(exchanged.first),
            ShiftBody::from(exchanged.second),
        ],
    }))
}

/// Delete a shift and return what was removed.
#[utoipa::path(
    delete,
    path = "/api/v1/shifts",
    params(CancelShiftQuery),
    responses(
        (status = 200, description = "The removed shift", body = ShiftBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Missing or wrong API key", body = ErrorSchema),
        (status = 404, description = "Unknown login or shift", body = ErrorSchema),
        (status = 409, description = "Concurrent update; retry", body = ErrorSchema)
    ),
    tags = ["shifts"],
    operation_id = "cancelShift",
    security(("ApiKey" = []))
)]
#[delete("/shifts")]
pub async fn cancel_shift(
    state: web::Data<HttpState>,
    query: web::Query<CancelShiftQuery>,
) -> ApiResult<web::Json<ShiftBody>> {
    let CancelShiftQuery { login, date } = query.into_inner();
    let slot = parse_slot(
        login,
        FieldName::new("login"),
        date,
        FieldName::new("date"),
    )?;
    let removed = state.exchange.cancel(CancelShiftRequest { slot }).await?;
    Ok(web::Json(ShiftBody::from(removed)))
}

#[cfg(test)]
#[path = "shifts_tests.rs"]
mod tests;
