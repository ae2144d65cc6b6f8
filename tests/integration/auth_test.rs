//! Integration tests for bootstrap, login, register and logout.

use quarry_auth::{RouteDecision, RouteGuard, SessionContext};
use quarry_client::dto::RegisterRequest;
use quarry_core::ActionResult;
use quarry_core::events::{LogoutReason, SessionEvent};

use crate::helpers::TestApp;

fn register_request(username: &str, password: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        email: format!("{username}@quarry.example"),
        full_name: "New Driver".to_string(),
        password: password.to_string(),
        company_id: Some("c1".into()),
        role: None,
        phone: None,
        department: None,
        employee_id: None,
    }
}

#[tokio::test]
async fn test_bootstrap_without_token_redirects_to_login() {
    let app = TestApp::new().await;

    let snapshot = app.session.bootstrap().await;

    assert!(snapshot.user.is_none());
    assert!(!snapshot.loading);
    assert_eq!(
        RouteGuard::decide(&snapshot, "/equipment"),
        RouteDecision::RedirectToLogin
    );
    assert!(app.backend.state.seen().is_empty());
}

#[tokio::test]
async fn test_login_with_bad_password_persists_nothing() {
    let app = TestApp::new().await;
    app.session.bootstrap().await;

    let result = app.session.login("foo", "bad").await;

    assert_eq!(result, ActionResult::failure("Incorrect username or password"));
    assert!(app.stored_token().is_none());
    assert!(app.token_file().is_none());
    assert!(!app.session.snapshot().is_authenticated());
}

#[tokio::test]
async fn test_login_persists_token_and_loads_identity() {
    let app = TestApp::logged_in().await;

    assert_eq!(app.stored_token().as_deref(), Some("t1"));
    assert_eq!(app.token_file(), Some(serde_json::json!({ "token": "t1" })));

    let snapshot = app.session.snapshot();
    assert_eq!(
        snapshot.active_company.as_ref().map(|c| c.id.as_str()),
        Some("c1")
    );
    assert_eq!(snapshot.companies.len(), 2);

    let seen = app.backend.state.seen();
    let me = seen
        .iter()
        .find(|request| request.route == "GET /api/me")
        .expect("GET /api/me was not called");
    assert_eq!(me.bearer.as_deref(), Some("t1"));
    assert!(seen[0].bearer.is_none(), "login must not carry a token");
}

#[tokio::test]
async fn test_result_serializes_with_success_flag() {
    let app = TestApp::new().await;

    let failed = serde_json::to_value(app.session.login("foo", "bad").await).unwrap();
    assert_eq!(failed["success"], false);
    assert!(failed["error"].is_string());

    let ok = serde_json::to_value(app.session.login("foo", "good").await).unwrap();
    assert_eq!(ok, serde_json::json!({ "success": true }));
}

#[tokio::test]
async fn test_token_survives_restart() {
    let app = TestApp::logged_in().await;
    let TestApp { backend, dir, .. } = app;

    let restarted = TestApp::with_backend(backend, dir);
    let snapshot = restarted.session.bootstrap().await;

    assert!(snapshot.is_authenticated());
    assert_eq!(snapshot.user.as_ref().map(|u| u.username.as_str()), Some("foo"));
    assert_eq!(
        RouteGuard::decide(&snapshot, "/equipment"),
        RouteDecision::Render
    );
}

#[tokio::test]
async fn test_expired_token_on_restart_starts_logged_out() {
    let app = TestApp::logged_in().await;
    app.backend.state.revoke("t1");
    let TestApp { backend, dir, .. } = app;

    let restarted = TestApp::with_backend(backend, dir);
    let snapshot = restarted.session.bootstrap().await;

    assert!(!snapshot.is_authenticated());
    assert!(!snapshot.loading);
    assert!(restarted.stored_token().is_none());
}

#[tokio::test]
async fn test_register_surfaces_backend_detail() {
    let app = TestApp::new().await;

    let conflict = app.session.register(register_request("foo", "password123")).await;
    assert_eq!(conflict, ActionResult::failure("Username already registered"));

    let invalid = app.session.register(register_request("driver1", "short")).await;
    assert_eq!(invalid, ActionResult::failure("Password too short"));

    let created = app.session.register(register_request("driver1", "password123")).await;
    assert!(created.is_success());
    assert!(app.stored_token().is_none(), "register must not log in");
}

#[tokio::test]
async fn test_register_rejects_malformed_email_locally() {
    let app = TestApp::new().await;
    let mut request = register_request("driver2", "password123");
    request.email = "not-an-email".to_string();

    let result = app.session.register(request).await;

    assert!(!result.is_success());
    assert!(app.backend.state.seen().is_empty());
}

#[tokio::test]
async fn test_logout_twice_matches_logout_once() {
    let app = TestApp::logged_in().await;
    let mut events = app.session.subscribe();

    app.session.logout();
    let once = app.session.snapshot();
    app.session.logout();
    let twice = app.session.snapshot();

    assert_eq!(once, twice);
    assert!(once.user.is_none());
    assert!(app.token_file().is_none());
    assert!(matches!(
        events.recv().await.unwrap().payload,
        SessionEvent::LoggedOut { reason: LogoutReason::UserRequested }
    ));
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn test_token_present_whenever_user_set() {
    let app = TestApp::logged_in().await;
    assert_invariant(&app.session);
    assert!(app.session.switch_company(&"c2".into()).await.is_success());
    assert_invariant(&app.session);
    app.session.logout();
    assert_invariant(&app.session);
}

fn assert_invariant(session: &SessionContext) {
    let snapshot = session.snapshot();
    if snapshot.user.is_some() {
        assert!(session.has_token());
    }
    if let Some(active) = &snapshot.active_company {
        assert!(snapshot.company(&active.id).is_some());
    }
}
