//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! document for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (shifts,
//!   activities, directory, health)
//! - **Schemas**: domain type wrappers ([`ErrorSchema`], [`ErrorCodeSchema`])
//!   and the request/response bodies
//! - **Security**: bearer API-key scheme
//!
//! The generated document is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::activities::{
    ActivityBody, RecordActivityBody, RecordedActivityBody,
};
use crate::inbound::http::directory::{
    LinkUidBody, NamedBody, RegisterDeviceBody, RegisterUsersBody, RegisteredUsersBody,
    UserInputBody,
};
use crate::inbound::http::dto::{DeviceBody, LocationBody, RoleBody, ShiftBody, UserBody};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::shifts::{
    BulkAssignResponseBody, ExchangeRequestBody, ExchangeResponseBody, ScheduleEntryBody,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer API-key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "ApiKey",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .description(Some("Shared API key sent as `Authorization: Bearer <key>`."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Rollcall attendance API",
        description = "Shift scheduling, card-reader activity and member records."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKey" = [])),
    paths(
        crate::inbound::http::shifts::list_shifts,
        crate::inbound::http::shifts::assign_shifts,
        crate::inbound::http::shifts::exchange_shifts,
        crate::inbound::http::shifts::cancel_shift,
        crate::inbound::http::activities::record_activity,
        crate::inbound::http::activities::list_activities,
        crate::inbound::http::activities::list_cleanings,
        crate::inbound::http::directory::register_users,
        crate::inbound::http::directory::edit_user,
        crate::inbound::http::directory::link_uid,
        crate::inbound::http::directory::create_role,
        crate::inbound::http::directory::create_location,
        crate::inbound::http::directory::register_device,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        UserBody,
        ShiftBody,
        RoleBody,
        LocationBody,
        DeviceBody,
        ScheduleEntryBody,
        BulkAssignResponseBody,
        ExchangeRequestBody,
        ExchangeResponseBody,
        RecordActivityBody,
        RecordedActivityBody,
        ActivityBody,
        UserInputBody,
        RegisterUsersBody,
        RegisteredUsersBody,
        LinkUidBody,
        NamedBody,
        RegisterDeviceBody,
    )),
    tags(
        (name = "shifts", description = "Daily shift schedule, exchanges and cancellations"),
        (name = "activities", description = "Card-reader activity recording and queries"),
        (name = "directory", description = "Members, roles, locations and readers"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
