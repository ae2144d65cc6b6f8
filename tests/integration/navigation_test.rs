//! Integration tests for menu and route gating.

use quarry_auth::{PermissionGate, Requirement, RouteDecision, RouteGuard};
use quarry_core::CompanyId;
use quarry_entity::permission::{Action, Resource};

use crate::helpers::TestApp;

fn menu_paths(app: &TestApp) -> Vec<&'static str> {
    app.session.navigation().iter().map(|item| item.path).collect()
}

#[tokio::test]
async fn test_menu_hides_entries_without_read_permission() {
    let app = TestApp::logged_in().await;

    let paths = menu_paths(&app);

    assert!(paths.contains(&"/dashboard"));
    assert!(paths.contains(&"/expenses"));
    assert!(paths.contains(&"/equipment"));
    assert!(!paths.contains(&"/invoices"));
    assert!(!paths.contains(&"/users"));
}

#[tokio::test]
async fn test_read_grant_does_not_imply_write() {
    let app = TestApp::logged_in().await;
    let permissions = app.session.snapshot().permissions;

    assert!(PermissionGate::allows(
        &permissions,
        Requirement::new(Resource::Expenses, Action::Read)
    ));
    assert!(!PermissionGate::allows(
        &permissions,
        Requirement::new(Resource::Expenses, Action::Write)
    ));
}

#[tokio::test]
async fn test_unknown_permission_keys_are_dropped() {
    let app = TestApp::logged_in().await;
    let snapshot = app.session.snapshot();

    let resources: Vec<Resource> = snapshot.permissions.iter().map(|(r, _)| r).collect();
    assert_eq!(
        resources.len(),
        3,
        "only dashboard, expenses and equipment are known: {resources:?}"
    );
}

#[tokio::test]
async fn test_menu_follows_active_company() {
    let app = TestApp::logged_in().await;
    assert!(app.session.switch_company(&CompanyId::from("c2")).await.is_success());

    let paths = menu_paths(&app);

    assert!(paths.contains(&"/invoices"));
    assert!(paths.contains(&"/production"));
    assert!(!paths.contains(&"/expenses"));
}

#[tokio::test]
async fn test_routes_render_only_when_logged_in() {
    let app = TestApp::new().await;
    assert_eq!(
        RouteGuard::decide(&app.session.snapshot(), "/dashboard"),
        RouteDecision::Loading
    );

    app.session.bootstrap().await;
    assert_eq!(
        RouteGuard::decide(&app.session.snapshot(), "/dashboard"),
        RouteDecision::RedirectToLogin
    );
    assert_eq!(
        RouteGuard::decide(&app.session.snapshot(), "/login"),
        RouteDecision::Render
    );

    assert!(app.session.login("foo", "good").await.is_success());
    assert_eq!(
        RouteGuard::decide(&app.session.snapshot(), "/dashboard"),
        RouteDecision::Render
    );
}
