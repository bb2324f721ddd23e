use crate::{
    audit::log_audit,
    core::{
        inventory::{self, StockLevel},
        visibility::visible_inventory,
    },
    dto::inventory::{InventoryAdjustRequest, InventoryList, InventoryRow, LowStockQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    models::{InventoryItem, ReferenceData},
    response::{ApiResponse, Meta},
    state::AppState,
};

fn inventory_row(item: &InventoryItem, reference: &ReferenceData) -> InventoryRow {
    InventoryRow {
        community_id: item.community_id.clone(),
        community_name: reference.community(&item.community_id).map(|c| c.name.clone()),
        product_id: item.product_id.clone(),
        product_name: reference.product(&item.product_id).map(|p| p.name.clone()),
        stock: item.stock,
        level: StockLevel::classify(item.stock),
    }
}

pub async fn list_inventory(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<InventoryList>> {
    let snapshot = state.store.snapshot().await?;
    let items: Vec<InventoryRow> =
        visible_inventory(&user.user, &snapshot.inventory, &state.reference)
            .into_iter()
            .map(|item| inventory_row(item, &state.reference))
            .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Inventory", InventoryList { items }, Some(meta)))
}

pub async fn list_low_stock(
    state: &AppState,
    user: &AuthUser,
    query: LowStockQuery,
) -> AppResult<ApiResponse<InventoryList>> {
    let threshold = query.threshold.unwrap_or(state.config.low_stock_threshold);
    let snapshot = state.store.snapshot().await?;
    let visible = visible_inventory(&user.user, &snapshot.inventory, &state.reference);

    let items: Vec<InventoryRow> = inventory::low_stock(&visible, threshold)
        .into_iter()
        .map(|item| inventory_row(item, &state.reference))
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Low stock", InventoryList { items }, Some(meta)))
}

pub async fn adjust_inventory(
    state: &AppState,
    user: &AuthUser,
    community_id: &str,
    product_id: &str,
    payload: InventoryAdjustRequest,
) -> AppResult<ApiResponse<InventoryRow>> {
    let _guard = state.writes.lock().await;
    let mut snapshot = state.store.snapshot().await?;

    let row = inventory::adjust_stock(
        &user.user,
        &snapshot.inventory,
        community_id,
        product_id,
        payload.delta,
        &state.reference,
    )?;

    inventory::upsert_row(&mut snapshot.inventory, row.clone());
    state.store.save_inventory(snapshot.inventory).await?;

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.user.id),
        "inventory_adjust",
        Some("inventory"),
        Some(serde_json::json!({
            "community_id": community_id,
            "product_id": product_id,
            "delta": payload.delta,
        })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    tracing::info!(community_id, product_id, stock = row.stock, "inventory adjusted");

    Ok(ApiResponse::success(
        "Inventory updated",
        inventory_row(&row, &state.reference),
        Some(Meta::empty()),
    ))
}
