use community_pharmacy_api::{
    core::visibility::{
        assignable_roles, capabilities, community_in_scope, scope, visible_inventory,
        visible_orders, visible_users,
    },
    models::{Role, Snapshot, User},
    seed::{initial_snapshot, reference_data},
};

fn user<'a>(snapshot: &'a Snapshot, id: &str) -> &'a User {
    snapshot.users.iter().find(|u| u.id == id).expect("seeded user")
}

fn order_ids(snapshot: &Snapshot, id: &str) -> Vec<String> {
    let reference = reference_data();
    visible_orders(user(snapshot, id), &snapshot.orders, &reference)
        .into_iter()
        .map(|o| o.id.clone())
        .collect()
}

#[test]
fn orders_follow_the_role_scope() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;

    assert_eq!(order_ids(&snapshot, "cmanager-a").len(), 6);
    assert_eq!(
        order_ids(&snapshot, "zmanager-norte"),
        ["ord-001", "ord-002", "ord-003", "ord-005"]
    );
    assert_eq!(order_ids(&snapshot, "zmanager-sur"), ["ord-004", "ord-006"]);
    assert_eq!(order_ids(&snapshot, "admin-01"), ["ord-001", "ord-002", "ord-005"]);
    assert_eq!(order_ids(&snapshot, "cmanager-b"), ["ord-003"]);
    assert!(order_ids(&snapshot, "driver-a").is_empty());
    Ok(())
}

#[test]
fn inventory_and_communities_share_the_scope() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();

    let rows = visible_inventory(user(&snapshot, "admin-01"), &snapshot.inventory, &reference);
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r.community_id == "com-a"));

    let north = user(&snapshot, "zmanager-norte");
    assert!(community_in_scope(north, "com-b", &reference));
    assert!(!community_in_scope(north, "com-c", &reference));
    assert!(!community_in_scope(north, "com-missing", &reference));

    let view = scope(user(&snapshot, "driver-a"), &snapshot, &reference);
    assert!(view.orders.is_empty());
    assert!(view.inventory.is_empty());
    assert!(view.communities.is_empty());
    Ok(())
}

#[test]
fn driver_sees_itself_then_its_community_manager() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();

    let ids: Vec<&str> = visible_users(user(&snapshot, "driver-a"), &snapshot.users, &reference)
        .into_iter()
        .map(|u| u.id.as_str())
        .collect();
    assert_eq!(ids, ["driver-a", "admin-01"]);
    Ok(())
}

#[test]
fn zone_manager_sees_users_of_its_zone() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();

    let ids: Vec<&str> =
        visible_users(user(&snapshot, "zmanager-norte"), &snapshot.users, &reference)
            .into_iter()
            .map(|u| u.id.as_str())
            .collect();
    assert_eq!(ids, ["admin-01", "zmanager-norte", "cmanager-b", "driver-a"]);

    let all = visible_users(user(&snapshot, "cmanager-a"), &snapshot.users, &reference);
    assert_eq!(all.len(), snapshot.users.len());
    Ok(())
}

#[test]
fn assignable_roles_narrow_down_the_hierarchy() {
    assert_eq!(assignable_roles(Role::Administrator), Role::ALL);
    assert_eq!(
        assignable_roles(Role::ZoneManager),
        [Role::ZoneManager, Role::CommunityManager, Role::Driver]
    );
    assert_eq!(
        assignable_roles(Role::CommunityManager),
        [Role::CommunityManager, Role::Driver]
    );
    assert!(assignable_roles(Role::Driver).is_empty());
}

#[test]
fn only_community_managers_place_orders() {
    for role in Role::ALL {
        let caps = capabilities(role);
        assert_eq!(caps.place_orders, role == Role::CommunityManager);
        assert_eq!(caps.edit_orders, role == Role::CommunityManager);
    }
    assert!(capabilities(Role::ZoneManager).inspect_routes);
    assert!(!capabilities(Role::Driver).manage_users);
}
