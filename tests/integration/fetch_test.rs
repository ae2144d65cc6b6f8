//! Integration tests for permission-gated collection fetches.

use quarry_core::{CompanyId, ErrorKind};
use quarry_core::events::{LogoutReason, SessionEvent};
use quarry_entity::permission::Resource;

use crate::helpers::TestApp;

#[tokio::test]
async fn test_fetch_returns_company_scoped_records() {
    let app = TestApp::logged_in().await;

    let records = app.session.fetch_collection(Resource::Equipment).await.unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["company_id"], "c1");
    assert!(
        app.backend
            .state
            .seen()
            .iter()
            .any(|request| request.route == "GET /api/equipment")
    );
}

#[tokio::test]
async fn test_fetch_after_switch_reads_new_company() {
    let app = TestApp::logged_in().await;
    assert!(app.session.switch_company(&CompanyId::from("c2")).await.is_success());

    let records = app.session.fetch_collection(Resource::Invoices).await.unwrap();

    assert_eq!(records[0]["resource"], "invoices");
    assert_eq!(records[0]["company_id"], "c2");
}

#[tokio::test]
async fn test_fetch_without_read_permission_is_denied_locally() {
    let app = TestApp::logged_in().await;
    let before = app.backend.state.seen().len();

    let err = app
        .session
        .fetch_collection(Resource::Invoices)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authorization);
    assert_eq!(app.backend.state.seen().len(), before);
}

#[tokio::test]
async fn test_fetch_when_logged_out_fails() {
    let app = TestApp::new().await;
    app.session.bootstrap().await;

    let err = app
        .session
        .fetch_collection(Resource::Equipment)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(app.backend.state.seen().is_empty());
}

#[tokio::test]
async fn test_unauthorized_fetch_forces_logout() {
    let app = TestApp::logged_in().await;
    let mut events = app.session.subscribe();
    app.backend.state.revoke("t1");

    let err = app
        .session
        .fetch_collection(Resource::Expenses)
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Authentication);
    assert!(!app.session.snapshot().is_authenticated());
    assert!(app.token_file().is_none());
    assert!(matches!(
        events.recv().await.unwrap().payload,
        SessionEvent::LoggedOut { reason: LogoutReason::TokenExpired }
    ));
}

#[tokio::test]
async fn test_refresh_reloads_permissions() {
    let app = TestApp::logged_in().await;
    let before = app.backend.state.seen().len();

    app.session.refresh().await.unwrap();

    let seen = app.backend.state.seen();
    let routes: Vec<&str> = seen[before..].iter().map(|r| r.route.as_str()).collect();
    assert_eq!(routes, vec!["GET /api/me", "GET /api/companies"]);
    assert!(app.session.snapshot().is_authenticated());
}
