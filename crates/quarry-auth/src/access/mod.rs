//! Permission gating for navigation, widgets, and routes.

pub mod gate;
pub mod navigation;
pub mod route;

pub use gate::{PermissionGate, Requirement};
pub use navigation::{DashboardWidget, NavItem};
pub use route::{RouteDecision, RouteGuard};
