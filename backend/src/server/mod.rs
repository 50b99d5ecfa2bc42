//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use rollcall::doc::ApiDoc;
use rollcall::inbound::http::activities::{list_activities, list_cleanings, record_activity};
use rollcall::inbound::http::directory::{
    create_location, create_role, edit_user, link_uid, register_device, register_users,
};
use rollcall::inbound::http::health::{HealthState, live, ready};
use rollcall::inbound::http::shifts::{
    assign_shifts, cancel_shift, exchange_shifts, list_shifts,
};
use rollcall::inbound::http::state::HttpState;
use rollcall::{ApiKeyAuth, Trace};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    api_key: ApiKeyAuth,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        api_key,
    } = deps;

    let api = web::scope("/api/v1")
        .wrap(api_key)
        .service(exchange_shifts)
        .service(list_shifts)
        .service(assign_shifts)
        .service(cancel_shift)
        .service(list_cleanings)
        .service(record_activity)
        .service(list_activities)
        .service(link_uid)
        .service(register_users)
        .service(edit_user)
        .service(create_role)
        .service(create_location)
        .service(register_device);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app =
        app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Returns [`std::io::ErrorKind::InvalidInput`] when `config` carries no
/// database pool, and propagates [`std::io::Error`] when binding the socket
/// or starting the server fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(build_http_state(&config)?);
    let ServerConfig {
        bind_addr,
        api_key,
        db_pool: _,
    } = config;
    let api_key = ApiKeyAuth::new(api_key);

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            api_key: api_key.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Wiring tests for the assembled application.

    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::http::header::AUTHORIZATION;
    use actix_web::test;
    use rollcall::domain::TRACE_ID_HEADER;

    fn deps(api_key: Option<&str>) -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::default()),
            api_key: ApiKeyAuth::new(api_key),
        }
    }

    #[actix_web::test]
    async fn health_probes_skip_authentication() {
        let app = test::init_service(build_app(deps(Some("secret")))).await;
        let req = test::TestRequest::get().uri("/health/live").to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(TRACE_ID_HEADER));
    }

    #[actix_web::test]
    async fn api_routes_require_the_key() {
        let app = test::init_service(build_app(deps(Some("secret")))).await;
        let req = test::TestRequest::get()
            .uri("/api/v1/shifts?date=2024-03-01")
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn fixture_state_serves_authorised_requests() {
        let app = test::init_service(build_app(deps(Some("secret")))).await;
        let req = test::TestRequest::get()
            .uri("/api/v1/shifts?date=2024-03-01")
            .insert_header((AUTHORIZATION, "Bearer secret"))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn exchange_route_reaches_handler() {
        let app = test::init_service(build_app(deps(Some("secret")))).await;
        let req = test::TestRequest::post()
            .uri("/api/v1/shifts/exchange")
            .insert_header((AUTHORIZATION, "Bearer secret"))
            .set_json(serde_json::json!({ "login1": "alice" }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
