//! End-to-end tests: `HttpApiClient` + `SessionContext` against a mock
//! backend served by axum on an ephemeral port.

mod helpers;

mod auth_test;
mod fetch_test;
mod navigation_test;
mod switch_test;
