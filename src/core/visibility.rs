use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Community, InventoryItem, Order, ReferenceData, Role, Snapshot, User};

/// The rows of each collection a principal may see. Borrowed from the
/// snapshot, in the snapshot's own order.
#[derive(Debug, Default)]
pub struct ScopedView<'a> {
    pub orders: Vec<&'a Order>,
    pub inventory: Vec<&'a InventoryItem>,
    pub communities: Vec<&'a Community>,
    pub users: Vec<&'a User>,
}

pub fn scope<'a>(
    principal: &User,
    snapshot: &'a Snapshot,
    reference: &'a ReferenceData,
) -> ScopedView<'a> {
    ScopedView {
        orders: visible_orders(principal, &snapshot.orders, reference),
        inventory: visible_inventory(principal, &snapshot.inventory, reference),
        communities: visible_communities(principal, reference),
        users: visible_users(principal, &snapshot.users, reference),
    }
}

/// Whether rows belonging to `community_id` are inside the principal's scope.
pub fn community_in_scope(principal: &User, community_id: &str, reference: &ReferenceData) -> bool {
    match principal.role {
        Role::Administrator => true,
        Role::ZoneManager => match (&principal.zone_id, reference.zone_of(community_id)) {
            (Some(zone), Some(community_zone)) => zone == community_zone,
            _ => false,
        },
        Role::CommunityManager => principal.community_id.as_deref() == Some(community_id),
        Role::Driver => false,
    }
}

pub fn visible_orders<'a>(
    principal: &User,
    orders: &'a [Order],
    reference: &ReferenceData,
) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| community_in_scope(principal, &o.community_id, reference))
        .collect()
}

pub fn visible_inventory<'a>(
    principal: &User,
    inventory: &'a [InventoryItem],
    reference: &ReferenceData,
) -> Vec<&'a InventoryItem> {
    inventory
        .iter()
        .filter(|i| community_in_scope(principal, &i.community_id, reference))
        .collect()
}

pub fn visible_communities<'a>(
    principal: &User,
    reference: &'a ReferenceData,
) -> Vec<&'a Community> {
    reference
        .communities
        .iter()
        .filter(|c| community_in_scope(principal, &c.id, reference))
        .collect()
}

pub fn visible_users<'a>(
    principal: &User,
    users: &'a [User],
    reference: &ReferenceData,
) -> Vec<&'a User> {
    match principal.role {
        Role::Administrator => users.iter().collect(),
        Role::ZoneManager => {
            let Some(zone_id) = principal.zone_id.as_deref() else {
                return Vec::new();
            };
            let zone_communities = reference.community_ids_in_zone(zone_id);
            users
                .iter()
                .filter(|u| {
                    u.zone_id.as_deref() == Some(zone_id)
                        || u
                            .community_id
                            .as_deref()
                            .is_some_and(|c| zone_communities.contains(&c))
                })
                .collect()
        }
        Role::CommunityManager => {
            let Some(community_id) = principal.community_id.as_deref() else {
                return Vec::new();
            };
            users
                .iter()
                .filter(|u| u.community_id.as_deref() == Some(community_id))
                .collect()
        }
        Role::Driver => {
            let mut visible: Vec<&User> = users.iter().filter(|u| u.id == principal.id).collect();
            if let Some(community_id) = principal.community_id.as_deref() {
                let manager = users.iter().find(|u| {
                    u.role == Role::CommunityManager
                        && u.community_id.as_deref() == Some(community_id)
                });
                visible.extend(manager);
            }
            visible
        }
    }
}

pub fn user_in_scope(
    principal: &User,
    user_id: &str,
    users: &[User],
    reference: &ReferenceData,
) -> bool {
    visible_users(principal, users, reference)
        .iter()
        .any(|u| u.id == user_id)
}

/// Roles a principal may give to a user it creates or edits.
pub fn assignable_roles(role: Role) -> &'static [Role] {
    match role {
        Role::Administrator => &Role::ALL,
        Role::ZoneManager => &[Role::ZoneManager, Role::CommunityManager, Role::Driver],
        Role::CommunityManager => &[Role::CommunityManager, Role::Driver],
        Role::Driver => &[],
    }
}

pub fn can_assign(principal: &User, role: Role) -> bool {
    assignable_roles(principal.role).contains(&role)
}

/// What the dashboard offers each role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Capabilities {
    pub place_orders: bool,
    pub edit_orders: bool,
    pub manage_users: bool,
    pub inspect_routes: bool,
    pub adjust_inventory: bool,
}

pub fn capabilities(role: Role) -> Capabilities {
    match role {
        Role::Administrator | Role::ZoneManager => Capabilities {
            place_orders: false,
            edit_orders: false,
            manage_users: true,
            inspect_routes: true,
            adjust_inventory: true,
        },
        Role::CommunityManager => Capabilities {
            place_orders: true,
            edit_orders: true,
            manage_users: true,
            inspect_routes: false,
            adjust_inventory: true,
        },
        Role::Driver => Capabilities {
            place_orders: false,
            edit_orders: false,
            manage_users: false,
            inspect_routes: false,
            adjust_inventory: false,
        },
    }
}
