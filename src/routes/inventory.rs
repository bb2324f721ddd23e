use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, patch},
};

use crate::{
    dto::inventory::{InventoryAdjustRequest, InventoryList, InventoryRow, LowStockQuery},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::inventory_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_inventory))
        .route("/low-stock", get(list_low_stock))
        .route("/{community_id}/{product_id}", patch(adjust_inventory))
}

#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "Inventory rows visible to the current user", body = ApiResponse<InventoryList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<InventoryList>>> {
    let resp = inventory_service::list_inventory(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    params(
        ("threshold" = Option<i64>, Query, description = "Stock threshold, default from LOW_STOCK_THRESHOLD")
    ),
    responses(
        (status = 200, description = "Visible rows below the threshold, lowest first", body = ApiResponse<InventoryList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn list_low_stock(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<LowStockQuery>,
) -> AppResult<Json<ApiResponse<InventoryList>>> {
    let resp = inventory_service::list_low_stock(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/api/inventory/{community_id}/{product_id}",
    params(
        ("community_id" = String, Path, description = "Community ID"),
        ("product_id" = String, Path, description = "Product ID")
    ),
    request_body = InventoryAdjustRequest,
    responses(
        (status = 200, description = "Adjust stock", body = ApiResponse<InventoryRow>),
        (status = 400, description = "Invalid adjustment"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Inventory"
)]
pub async fn adjust_inventory(
    State(state): State<AppState>,
    user: AuthUser,
    Path((community_id, product_id)): Path<(String, String)>,
    Json(payload): Json<InventoryAdjustRequest>,
) -> AppResult<Json<ApiResponse<InventoryRow>>> {
    let resp =
        inventory_service::adjust_inventory(&state, &user, &community_id, &product_id, payload)
            .await?;
    Ok(Json(resp))
}
