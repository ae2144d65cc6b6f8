//! Permission checks against the active company's permission map.

use quarry_core::AppError;
use quarry_entity::permission::{Action, PermissionMap, Resource};

/// A resource/action pair a UI element or data request needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Requirement {
    /// Resource key in the permission map.
    pub resource: Resource,
    /// Action that must be granted on it.
    pub action: Action,
}

impl Requirement {
    /// A requirement for `action` on `resource`.
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    /// Read access, the usual requirement for menu entries.
    pub const fn read(resource: Resource) -> Self {
        Self::new(resource, Action::Read)
    }
}

/// Checks requirements against a permission map.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissionGate;

impl PermissionGate {
    /// Whether the map grants the requirement. A missing resource entry
    /// never satisfies anything.
    pub fn allows(map: &PermissionMap, requirement: Requirement) -> bool {
        map.allows(requirement.resource, requirement.action)
    }

    /// Like [`allows`](Self::allows), but returns an authorization error.
    pub fn require(map: &PermissionMap, requirement: Requirement) -> Result<(), AppError> {
        if Self::allows(map, requirement) {
            Ok(())
        } else {
            Err(AppError::authorization(format!(
                "Permission '{}' on '{}' is not granted in the active company",
                requirement.action, requirement.resource
            )))
        }
    }
}
