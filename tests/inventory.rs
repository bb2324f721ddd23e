mod common;

use community_pharmacy_api::{
    core::inventory::{StockLevel, adjust_stock, find_row},
    dto::inventory::{InventoryAdjustRequest, LowStockQuery},
    error::AppError,
    models::{Snapshot, User},
    seed::{initial_snapshot, reference_data},
    services::inventory_service,
};

use common::{seeded_state, sign_in};

fn user<'a>(snapshot: &'a Snapshot, id: &str) -> &'a User {
    snapshot.users.iter().find(|u| u.id == id).expect("seeded user")
}

#[test]
fn stock_levels_have_fixed_bands() {
    assert_eq!(StockLevel::classify(0), StockLevel::Low);
    assert_eq!(StockLevel::classify(49), StockLevel::Low);
    assert_eq!(StockLevel::classify(50), StockLevel::Medium);
    assert_eq!(StockLevel::classify(99), StockLevel::Medium);
    assert_eq!(StockLevel::classify(100), StockLevel::High);
}

#[test]
fn adjustments_respect_scope_and_sign() -> anyhow::Result<()> {
    let snapshot = initial_snapshot("secret")?;
    let reference = reference_data();
    let north = user(&snapshot, "zmanager-norte");

    let row = adjust_stock(north, &snapshot.inventory, "com-a", "prod-006", 10, &reference)?;
    assert_eq!(row.stock, 30);

    let err = adjust_stock(north, &snapshot.inventory, "com-a", "prod-006", -21, &reference)
        .expect_err("negative stock");
    assert!(matches!(err, AppError::InvalidStock));

    let err = adjust_stock(north, &snapshot.inventory, "com-c", "prod-006", 5, &reference)
        .expect_err("other zone");
    assert!(matches!(err, AppError::Unauthorized));

    let err = adjust_stock(north, &snapshot.inventory, "com-z", "prod-006", 5, &reference)
        .expect_err("unknown community");
    assert!(matches!(err, AppError::NotFound));

    let err = adjust_stock(north, &snapshot.inventory, "com-a", "prod-999", 5, &reference)
        .expect_err("unknown product");
    assert!(matches!(err, AppError::UnknownProduct(_)));

    let err = adjust_stock(
        user(&snapshot, "driver-a"),
        &snapshot.inventory,
        "com-a",
        "prod-006",
        5,
        &reference,
    )
    .expect_err("drivers do not adjust");
    assert!(matches!(err, AppError::Unauthorized));
    Ok(())
}

#[tokio::test]
async fn adjusting_a_missing_row_creates_it() -> anyhow::Result<()> {
    let state = seeded_state()?;
    let manager = sign_in(&state, "cmanager-b").await?;

    let row = inventory_service::adjust_inventory(
        &state,
        &manager,
        "com-b",
        "prod-002",
        InventoryAdjustRequest { delta: 5 },
    )
    .await?
    .data
    .expect("row");
    assert_eq!(row.stock, 5);
    assert_eq!(row.level, StockLevel::Low);
    assert_eq!(row.product_name.as_deref(), Some("Ibuprofeno 400mg"));

    let snapshot = state.store.snapshot().await?;
    assert_eq!(snapshot.inventory.len(), 11);
    let stored = find_row(&snapshot.inventory, "com-b", "prod-002").expect("stored row");
    assert_eq!(stored.stock, 5);
    Ok(())
}

#[tokio::test]
async fn low_stock_is_scoped_and_sorted() -> anyhow::Result<()> {
    let state = seeded_state()?;
    let admin = sign_in(&state, "cmanager-a").await?;
    let south = sign_in(&state, "zmanager-sur").await?;

    let low = inventory_service::list_low_stock(&state, &admin, LowStockQuery { threshold: None })
        .await?
        .data
        .expect("rows");
    let keys: Vec<(&str, &str)> = low
        .items
        .iter()
        .map(|r| (r.community_id.as_str(), r.product_id.as_str()))
        .collect();
    assert_eq!(keys, [("com-a", "prod-006")]);

    let low = inventory_service::list_low_stock(
        &state,
        &admin,
        LowStockQuery {
            threshold: Some(100),
        },
    )
    .await?
    .data
    .expect("rows");
    let stocks: Vec<i64> = low.items.iter().map(|r| r.stock).collect();
    assert_eq!(stocks, [20, 50, 70, 80, 90]);

    let low = inventory_service::list_low_stock(
        &state,
        &south,
        LowStockQuery {
            threshold: Some(100),
        },
    )
    .await?
    .data
    .expect("rows");
    assert!(low.items.iter().all(|r| r.community_id == "com-c"));
    assert_eq!(low.items.len(), 2);
    Ok(())
}
