mod common;

use std::time::Duration;

use aula::aula_core::{ClientError, GENERIC_ERROR_MESSAGE, SESSION_EXPIRED_MESSAGE};
use aula::aula_models::MonthRange;
use aula::modules::calendar::PublicCalendar;
use aula::modules::students::StudentsPage;
use aula::navigation::Route;
use common::{
    EXPIRED_TOKEN, VALID_TOKEN, anonymous_state, signed_in_state, spawn_fake_api,
    state_with_config, test_config,
};
use serde_json::Value;

#[tokio::test]
async fn test_requests_carry_bearer_token() {
    let api = spawn_fake_api(5).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let page = StudentsPage::new(&state);
    let list = page.settled().await;
    assert!(list.is_success());

    let hits = api.fake.hits("/api/students");
    assert_eq!(hits.len(), 1);
    assert_eq!(
        hits[0].authorization.as_deref(),
        Some("Bearer valid-token")
    );
}

#[tokio::test]
async fn test_public_events_need_no_session() {
    let api = spawn_fake_api(0).await;
    let state = anonymous_state(&api);

    let calendar = PublicCalendar::new(&state, MonthRange::of(2024, 5).unwrap());
    let events = calendar.handle().settled().await;
    assert_eq!(events.data.unwrap()[0].title, "Acto 25 de Mayo");

    let hits = api.fake.hits("/api/events/public");
    assert_eq!(hits.len(), 1);
    assert!(hits[0].authorization.is_none());
    let query = hits[0].query.clone().unwrap();
    assert!(query.contains("from=2024-05-01"));
    assert!(query.contains("to=2024-05-31"));
}

#[tokio::test]
async fn test_unauthorized_signs_out_and_routes_to_login() {
    let api = spawn_fake_api(5).await;
    let state = signed_in_state(&api, EXPIRED_TOKEN);
    assert_eq!(state.router.current(), Route::Dashboard);

    let page = StudentsPage::new(&state);
    let list = page.settled().await;

    let error = list.error.unwrap();
    assert!(error.is_unauthorized());
    assert_eq!(error.message(), SESSION_EXPIRED_MESSAGE);
    assert!(!state.session.is_authenticated());
    assert!(state.session.token().is_none());
    assert_eq!(state.router.current(), Route::Login);
}

#[tokio::test]
async fn test_timeout_reports_generic_network_error() {
    let api = spawn_fake_api(0).await;
    let mut config = test_config(&api.base_url);
    config.api.timeout = Duration::from_millis(200);
    let state = state_with_config(config, Some(VALID_TOKEN));

    let err = state
        .client
        .get::<Value>("/slow", &Value::Null)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network { .. }));
    assert_eq!(err.message(), GENERIC_ERROR_MESSAGE);
    // only a 401 ends the session
    assert!(state.session.is_authenticated());
}

#[tokio::test]
async fn test_unknown_route_is_http_error_with_status() {
    let api = spawn_fake_api(0).await;
    let state = signed_in_state(&api, VALID_TOKEN);

    let err = state
        .client
        .get::<Value>("/nope", &Value::Null)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert!(state.session.is_authenticated());
}
