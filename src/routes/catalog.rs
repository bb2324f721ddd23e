use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    dto::catalog::{CommunityList, ProductList, ZoneList},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Product,
    response::ApiResponse,
    routes::params::ProductQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(list_products))
        .route("/products/{id}", get(get_product))
        .route("/communities", get(list_communities))
        .route("/zones", get(list_zones))
}

#[utoipa::path(
    get,
    path = "/api/catalog/products",
    params(
        ("q" = Option<String>, Query, description = "Search name and description"),
        ("category" = Option<String>, Query, description = "Filter by category"),
        ("min_price" = Option<i64>, Query, description = "Minimum price in cents"),
        ("max_price" = Option<i64>, Query, description = "Maximum price in cents"),
        ("sort_by" = Option<String>, Query, description = "Sort by: name, price"),
        ("sort_order" = Option<String>, Query, description = "Sort order: asc, desc")
    ),
    responses(
        (status = 200, description = "List products", body = ApiResponse<ProductList>)
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> AppResult<Json<ApiResponse<ProductList>>> {
    let resp = catalog_service::list_products(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/products/{id}",
    params(
        ("id" = String, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Get product", body = ApiResponse<Product>),
        (status = 404, description = "Not Found")
    ),
    tag = "Catalog"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = catalog_service::get_product(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/communities",
    responses(
        (status = 200, description = "Communities visible to the current user", body = ApiResponse<CommunityList>)
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_communities(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<CommunityList>>> {
    let resp = catalog_service::list_communities(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/catalog/zones",
    responses(
        (status = 200, description = "List zones", body = ApiResponse<ZoneList>)
    ),
    tag = "Catalog"
)]
pub async fn list_zones(State(state): State<AppState>) -> AppResult<Json<ApiResponse<ZoneList>>> {
    let resp = catalog_service::list_zones(&state).await?;
    Ok(Json(resp))
}
