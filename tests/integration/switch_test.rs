//! Integration tests for company switching.

use quarry_core::events::SessionEvent;
use quarry_core::{ActionResult, CompanyId};
use quarry_entity::permission::{Action, Resource};

use crate::helpers::TestApp;

#[tokio::test]
async fn test_switch_replaces_token_on_later_requests() {
    let app = TestApp::logged_in().await;
    let before = app.backend.state.seen().len();

    let result = app.session.switch_company(&CompanyId::from("c2")).await;
    assert!(result.is_success());

    let snapshot = app.session.snapshot();
    assert_eq!(
        snapshot.active_company.as_ref().map(|c| c.id.as_str()),
        Some("c2")
    );
    assert_eq!(app.stored_token().as_deref(), Some("t2"));

    app.session.fetch_collection(Resource::Production).await.unwrap();

    let seen = app.backend.state.seen();
    let after_switch: Vec<_> = seen[before..]
        .iter()
        .filter(|request| request.route != "POST /api/switch-company")
        .collect();
    assert!(!after_switch.is_empty());
    for request in after_switch {
        assert_eq!(request.bearer.as_deref(), Some("t2"), "{}", request.route);
    }
}

#[tokio::test]
async fn test_switch_swaps_permission_map() {
    let app = TestApp::logged_in().await;
    assert!(app.session.can(Resource::Expenses, Action::Read));
    assert!(!app.session.can(Resource::Invoices, Action::Read));

    assert!(app.session.switch_company(&CompanyId::from("c2")).await.is_success());

    assert!(!app.session.can(Resource::Expenses, Action::Read));
    assert!(app.session.can(Resource::Invoices, Action::Export));
    assert!(app.session.can(Resource::Production, Action::Read));
}

#[tokio::test]
async fn test_switch_emits_switch_then_refresh() {
    let app = TestApp::logged_in().await;
    let mut events = app.session.subscribe();

    assert!(app.session.switch_company(&CompanyId::from("c2")).await.is_success());

    match events.recv().await.unwrap().payload {
        SessionEvent::CompanySwitched { from, to } => {
            assert_eq!(from.as_ref().map(CompanyId::as_str), Some("c1"));
            assert_eq!(to.as_str(), "c2");
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(
        events.recv().await.unwrap().payload,
        SessionEvent::PermissionsRefreshed { .. }
    ));
}

#[tokio::test]
async fn test_switch_back_and_forth() {
    let app = TestApp::logged_in().await;

    assert!(app.session.switch_company(&CompanyId::from("c2")).await.is_success());
    assert!(app.session.switch_company(&CompanyId::from("c1")).await.is_success());

    assert_eq!(app.stored_token().as_deref(), Some("t3"));
    assert!(app.session.can(Resource::Expenses, Action::Read));
    assert!(!app.session.can(Resource::Invoices, Action::Read));
}

#[tokio::test]
async fn test_switch_to_unlisted_company_never_reaches_backend() {
    let app = TestApp::logged_in().await;
    let before = app.backend.state.seen().len();

    let result = app.session.switch_company(&CompanyId::from("c9")).await;

    assert!(!result.is_success());
    assert_eq!(app.backend.state.seen().len(), before);
    assert_eq!(app.stored_token().as_deref(), Some("t1"));
}

#[tokio::test]
async fn test_switch_with_expired_token_logs_out() {
    let app = TestApp::logged_in().await;
    app.backend.state.revoke("t1");

    let result = app.session.switch_company(&CompanyId::from("c2")).await;

    assert_eq!(result, ActionResult::failure("Token has expired"));
    assert!(!app.session.snapshot().is_authenticated());
    assert!(app.stored_token().is_none());
}
