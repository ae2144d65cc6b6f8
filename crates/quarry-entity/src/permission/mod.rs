//! Permission vocabulary and the per-company permission map.

pub mod action;
pub mod map;
pub mod resource;

pub use action::Action;
pub use map::PermissionMap;
pub use resource::Resource;
