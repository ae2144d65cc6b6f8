//! Resource-to-actions permission map scoped to one company.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use super::action::Action;
use super::resource::Resource;

/// The permissions the backend grants the current user in the active
/// company. Used for UI gating only; the backend enforces authorization
/// independently.
///
/// Deserialization validates the raw `{"resource": ["action", ...]}` object
/// against the known vocabulary. Unknown keys and actions are dropped with a
/// warning instead of failing the whole session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionMap {
    grants: BTreeMap<Resource, BTreeSet<Action>>,
}

impl PermissionMap {
    /// An empty map that allows nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the raw backend shape, dropping unknown entries.
    pub fn from_raw(raw: HashMap<String, Vec<String>>) -> Self {
        let mut grants: BTreeMap<Resource, BTreeSet<Action>> = BTreeMap::new();

        for (key, actions) in raw {
            let Ok(resource) = key.parse::<Resource>() else {
                warn!(resource = %key, "Dropping permission entry for unknown resource");
                continue;
            };

            let entry = grants.entry(resource).or_default();
            for name in actions {
                match name.parse::<Action>() {
                    Ok(action) => {
                        entry.insert(action);
                    }
                    Err(_) => {
                        warn!(resource = %key, action = %name, "Dropping unknown permission action");
                    }
                }
            }
        }

        Self { grants }
    }

    /// Grant an action (builder helper).
    pub fn grant(mut self, resource: Resource, actions: &[Action]) -> Self {
        self.grants
            .entry(resource)
            .or_default()
            .extend(actions.iter().copied());
        self
    }

    /// Whether `action` is granted on `resource`.
    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.grants
            .get(&resource)
            .is_some_and(|actions| actions.contains(&action))
    }

    /// Whether the map has any entry for `resource`.
    pub fn contains_resource(&self, resource: Resource) -> bool {
        self.grants.contains_key(&resource)
    }

    /// Actions granted on `resource`.
    pub fn actions(&self, resource: Resource) -> impl Iterator<Item = Action> + '_ {
        self.grants
            .get(&resource)
            .into_iter()
            .flat_map(|actions| actions.iter().copied())
    }

    /// Iterate over all grants in resource order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, &BTreeSet<Action>)> {
        self.grants.iter().map(|(resource, actions)| (*resource, actions))
    }

    /// Whether nothing is granted.
    pub fn is_empty(&self) -> bool {
        self.grants.values().all(BTreeSet::is_empty)
    }
}

impl<'de> Deserialize<'de> for PermissionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<HashMap<String, Vec<String>>>::deserialize(deserializer)?;
        Ok(raw.map(Self::from_raw).unwrap_or_default())
    }
}
