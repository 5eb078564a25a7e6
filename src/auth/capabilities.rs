//! Role capability resolver.
//!
//! Capability tables are fixed at initialization and never editable at
//! runtime. Every mutating or detail-revealing operation consults
//! [`ensure`] before performing any side effect.

use crate::entities::user::Role;
use crate::errors::ServiceError;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Entity types the permission model covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Resource {
    User,
    Notification,
    Item,
    ItemHistory,
    ItemRequest,
    UsedItem,
    PurchaseOrderItem,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::User => "user",
            Resource::Notification => "notification",
            Resource::Item => "item",
            Resource::ItemHistory => "item history",
            Resource::ItemRequest => "item request",
            Resource::UsedItem => "used item",
            Resource::PurchaseOrderItem => "purchase order item",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Add,
    Change,
    Delete,
    View,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Add => "add",
            Action::Change => "change",
            Action::Delete => "delete",
            Action::View => "view",
        }
    }
}

/// The set of (resource, action) pairs granted to one role.
#[derive(Debug, Clone)]
pub struct CapabilitySet {
    grants: HashSet<(Resource, Action)>,
}

impl CapabilitySet {
    fn new(grants: &[(Resource, &[Action])]) -> Self {
        let mut set = HashSet::new();
        for (resource, actions) in grants {
            for action in *actions {
                set.insert((*resource, *action));
            }
        }
        Self { grants: set }
    }

    fn empty() -> Self {
        Self {
            grants: HashSet::new(),
        }
    }

    pub fn allows(&self, resource: Resource, action: Action) -> bool {
        self.grants.contains(&(resource, action))
    }
}

const ALL: &[Action] = &[Action::Add, Action::Change, Action::Delete, Action::View];
const CDV: &[Action] = &[Action::Change, Action::Delete, Action::View];
const CV: &[Action] = &[Action::Change, Action::View];
const V: &[Action] = &[Action::View];

lazy_static! {
    static ref CAPABILITIES: HashMap<Role, CapabilitySet> = {
        let mut map = HashMap::new();

        map.insert(
            Role::Superuser,
            CapabilitySet::new(&[
                (Resource::User, ALL),
                (Resource::Notification, CDV),
                (Resource::Item, ALL),
                (Resource::ItemHistory, V),
                (Resource::ItemRequest, V),
                (Resource::UsedItem, ALL),
                (Resource::PurchaseOrderItem, ALL),
            ]),
        );

        map.insert(
            Role::Technician,
            CapabilitySet::new(&[
                (Resource::Notification, CDV),
                (Resource::Item, ALL),
                (Resource::ItemHistory, V),
                (Resource::ItemRequest, ALL),
                (Resource::UsedItem, ALL),
            ]),
        );

        map.insert(
            Role::Intern,
            CapabilitySet::new(&[
                (Resource::Notification, CDV),
                (Resource::Item, CV),
                (Resource::ItemHistory, V),
            ]),
        );

        map.insert(
            Role::Viewer,
            CapabilitySet::new(&[
                (Resource::Notification, CDV),
                (Resource::Item, V),
                (Resource::ItemHistory, V),
            ]),
        );

        map.insert(Role::None, CapabilitySet::empty());

        map
    };
}

/// Resolves the capability set for a role.
pub fn capabilities(role: Role) -> &'static CapabilitySet {
    // Every Role variant is seeded above, so the lookup cannot miss.
    CAPABILITIES
        .get(&role)
        .unwrap_or_else(|| &CAPABILITIES[&Role::None])
}

/// Checks a capability, returning `Forbidden` (and performing no side
/// effect) when the role lacks it.
pub fn ensure(role: Role, resource: Resource, action: Action) -> Result<(), ServiceError> {
    if capabilities(role).allows(resource, action) {
        return Ok(());
    }
    Err(ServiceError::Forbidden(format!(
        "Your role ({}) does not allow you to {} a {}.",
        role.as_str(),
        action.as_str(),
        resource.as_str()
    )))
}

/// The item-request status-change capability is held by Superusers only.
pub fn ensure_status_change(role: Role) -> Result<(), ServiceError> {
    if role == Role::Superuser {
        return Ok(());
    }
    Err(ServiceError::Forbidden(
        "You need to be a Superuser to accept or reject an item request.".to_string(),
    ))
}
