mod common;

use community_pharmacy_api::{
    core::{
        dashboard::{route_markers, summarize},
        visibility::scope,
    },
    error::AppError,
    models::{Snapshot, User},
    seed::{initial_snapshot, reference_data},
    services::dashboard_service,
};

use common::{seeded_state, sign_in};

fn user<'a>(snapshot: &'a Snapshot, id: &str) -> &'a User {
    snapshot.users.iter().find(|u| u.id == id).expect("seeded user")
}

#[test]
fn zone_summary_counts_only_its_communities() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let view = scope(user(&snapshot, "zmanager-norte"), &snapshot, &reference);

    let summary = summarize(&view, &reference.products);
    assert_eq!(summary.total_orders, 4);
    assert_eq!(summary.pending_orders, 2);
    assert_eq!(summary.communities, 2);
    assert_eq!(summary.total_stock, 720);

    let per_community: Vec<(&str, usize)> = summary
        .orders_by_community
        .iter()
        .map(|c| (c.community_id.as_str(), c.orders))
        .collect();
    assert_eq!(per_community, [("com-a", 3), ("com-b", 1)]);

    let top: Vec<(&str, u64)> = summary
        .top_products
        .iter()
        .map(|p| (p.product_id.as_str(), p.quantity))
        .collect();
    assert_eq!(
        top,
        [("prod-001", 3), ("prod-005", 3), ("prod-004", 1), ("prod-002", 1)]
    );
    assert_eq!(summary.top_products[0].name, "Paracetamol 500mg");
    Ok(())
}

#[test]
fn route_markers_carry_pending_counts() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let view = scope(user(&snapshot, "cmanager-a"), &snapshot, &reference);

    let markers = route_markers(&view, &reference.zones);
    assert_eq!(markers.len(), 3);

    let pending: Vec<(&str, usize)> = markers
        .iter()
        .map(|m| (m.community_id.as_str(), m.pending_orders))
        .collect();
    assert_eq!(pending, [("com-a", 2), ("com-b", 0), ("com-c", 1)]);
    assert_eq!(markers[2].zone_name.as_deref(), Some("Zona Sur"));
    Ok(())
}

#[tokio::test]
async fn route_inspection_needs_the_capability() -> anyhow::Result<()> {
    let state = seeded_state()?;
    let manager = sign_in(&state, "admin-01").await?;
    let south = sign_in(&state, "zmanager-sur").await?;

    let err = dashboard_service::route_inspection(&state, &manager)
        .await
        .expect_err("community managers do not inspect routes");
    assert!(matches!(err, AppError::Unauthorized));

    let routes = dashboard_service::route_inspection(&state, &south)
        .await?
        .data
        .expect("routes");
    assert_eq!(routes.items.len(), 1);
    assert_eq!(routes.items[0].community_id, "com-c");

    let data = dashboard_service::dashboard(&state, &manager)
        .await?
        .data
        .expect("dashboard");
    assert_eq!(data.summary.total_orders, 3);
    assert!(data.capabilities.place_orders);
    Ok(())
}
