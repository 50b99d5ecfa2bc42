//! Tests for activity HTTP handlers.

use super::*;
use crate::domain::ports::{
    ActivitiesByRoleResponse, MockActivityCommand, MockActivityQuery, RecordActivityResponse,
};
use crate::domain::{
    ActivityId, ActivityWindow, Device, DeviceId, Error, Location, LocationId, LocationName,
    Login, Role, RoleId, UserId, UserProfile,
};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};
use std::sync::Arc;

const START: i64 = 1_717_200_000;

fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(state)).service(
        web::scope("/api/v1")
            .service(record_activity)
            .service(list_cleanings)
            .service(list_activities),
    )
}

async fn call(state: HttpState, request: actix_http::Request) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(state)).await;
    let response = actix_test::call_service(&app, request).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn cleaning_tap(id: i64, created_at: i64) -> Activity {
    Activity {
        id: ActivityId::new(id),
        created_at,
        user: UserProfile {
            id: UserId::new(1),
            login: Login::new("alice").expect("login"),
            uid: Some(CardUid::new("04A1").expect("uid")),
            wallet: None,
        },
        device: Device {
            id: DeviceId::new(3),
            mac: MacAddress::new("aa:bb:cc:dd:ee:ff").expect("mac"),
            role: Role {
                id: RoleId::new(2),
                name: RoleName::new(CLEANING_ROLE).expect("role"),
            },
            location: Location {
                id: LocationId::new(5),
                name: LocationName::new("kitchen").expect("location"),
            },
        },
    }
}

fn window_response(activities: Vec<Activity>) -> ActivitiesByRoleResponse {
    ActivitiesByRoleResponse {
        window: ActivityWindow::new(START, START + 86_400).expect("window"),
        activities,
    }
}

#[actix_web::test]
async fn record_activity_returns_stored_tap() {
    let mut command = MockActivityCommand::new();
    command
        .expect_record()
        .withf(|request| {
            request.uid.as_str() == "04A1" && request.mac.as_str() == "aa:bb:cc:dd:ee:ff"
        })
        .times(1)
        .return_once(|_| {
            Ok(RecordActivityResponse {
                id: ActivityId::new(9),
                user_id: UserId::new(1),
                device_id: DeviceId::new(3),
                created_at: START,
            })
        });
    let state = HttpState {
        activities: Arc::new(command),
        ..HttpState::default()
    };

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/activities")
        .set_json(json!({"uid": "04A1", "mac": "aa:bb:cc:dd:ee:ff"}))
        .to_request();
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"id": 9, "userId": 1, "deviceId": 3, "createdAt": START})
    );
}

#[rstest]
#[case(json!({"mac": "aa:bb:cc:dd:ee:ff"}), "uid")]
#[case(json!({"uid": "04A1"}), "mac")]
#[actix_web::test]
async fn record_activity_requires_card_and_reader(#[case] payload: Value, #[case] field: &str) {
    let mut command = MockActivityCommand::new();
    command.expect_record().never();
    let state = HttpState {
        activities: Arc::new(command),
        ..HttpState::default()
    };

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/activities")
        .set_json(payload)
        .to_request();
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], field);
}

#[actix_web::test]
async fn record_activity_for_unknown_card_is_404() {
    let mut command = MockActivityCommand::new();
    command
        .expect_record()
        .times(1)
        .return_once(|_| Err(Error::not_found("uid 04FF is not registered")));
    let state = HttpState {
        activities: Arc::new(command),
        ..HttpState::default()
    };

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/activities")
        .set_json(json!({"uid": "04FF", "mac": "aa:bb:cc:dd:ee:ff"}))
        .to_request();
    let (status, _) = call(state, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn list_activities_passes_role_and_bounds() {
    let mut query = MockActivityQuery::new();
    query
        .expect_activities_by_role()
        .withf(|request| {
            request.role.as_str() == "front-desk"
                && request.start == Some(START)
                && request.end == Some(START + 3_600)
        })
        .times(1)
        .return_once(|_| Ok(window_response(Vec::new())));
    let state = HttpState {
        activities_query: Arc::new(query),
        ..HttpState::default()
    };

    let request = actix_test::TestRequest::get()
        .uri(&format!(
            "/api/v1/activities?role=front-desk&start={START}&end={}",
            START + 3_600
        ))
        .to_request();
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn list_activities_requires_role() {
    let request = actix_test::TestRequest::get()
        .uri("/api/v1/activities")
        .to_request();
    let (status, body) = call(HttpState::default(), request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "role");
}

#[actix_web::test]
async fn cleanings_defaults_window_and_renders_joins() {
    let mut query = MockActivityQuery::new();
    query
        .expect_activities_by_role()
        .withf(|request| {
            request.role.as_str() == CLEANING_ROLE
                && request.start.is_none()
                && request.end.is_none()
        })
        .times(1)
        .return_once(|_| Ok(window_response(vec![cleaning_tap(4, START)])));
    let state = HttpState {
        activities_query: Arc::new(query),
        ..HttpState::default()
    };

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/activities/cleanings")
        .to_request();
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!([{
            "id": 4,
            "createdAt": START,
            "user": {"id": 1, "login": "alice", "uid": "04A1"},
            "device": {
                "id": 3,
                "mac": "aa:bb:cc:dd:ee:ff",
                "role": {"id": 2, "name": "cleaning"},
                "location": {"id": 5, "name": "kitchen"}
            }
        }])
    );
}

#[actix_web::test]
async fn empty_windows_are_rejected() {
    let mut query = MockActivityQuery::new();
    query
        .expect_activities_by_role()
        .times(1)
        .return_once(|_| Err(Error::invalid_request("window start must be before window end")));
    let state = HttpState {
        activities_query: Arc::new(query),
        ..HttpState::default()
    };

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/v1/activities/cleanings?start={START}&end={START}"))
        .to_request();
    let (status, _) = call(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn non_numeric_bounds_are_rejected_before_querying() {
    let mut query = MockActivityQuery::new();
    query.expect_activities_by_role().never();
    let state = HttpState {
        activities_query: Arc::new(query),
        ..HttpState::default()
    };

    let request = actix_test::TestRequest::get()
        .uri("/api/v1/activities/cleanings?start=yesterday")
        .to_request();
    let (status, body) = call(state, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["code"], "invalid_timestamp");
}
