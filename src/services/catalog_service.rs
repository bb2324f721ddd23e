use std::cmp::Ordering;

use crate::{
    core::visibility::visible_communities,
    dto::catalog::{CommunityList, ProductList, ZoneList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::{ProductQuery, ProductSortBy, SortOrder},
    state::AppState,
};

pub fn filter_products(catalog: &[Product], query: &ProductQuery) -> Vec<Product> {
    let search = query
        .q
        .as_ref()
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    let mut items: Vec<Product> = catalog
        .iter()
        .filter(|p| {
            search.as_ref().is_none_or(|s| {
                p.name.to_lowercase().contains(s) || p.description.to_lowercase().contains(s)
            })
        })
        .filter(|p| {
            query
                .category
                .as_ref()
                .filter(|c| !c.is_empty())
                .is_none_or(|c| p.category.eq_ignore_ascii_case(c))
        })
        .filter(|p| query.min_price.is_none_or(|min| p.price >= min))
        .filter(|p| query.max_price.is_none_or(|max| p.price <= max))
        .cloned()
        .collect();

    if let Some(sort_by) = query.sort_by {
        let order = query.sort_order.unwrap_or(SortOrder::Asc);
        items.sort_by(|a, b| {
            let ord: Ordering = match sort_by {
                ProductSortBy::Name => a.name.cmp(&b.name),
                ProductSortBy::Price => a.price.cmp(&b.price),
            };
            match order {
                SortOrder::Asc => ord,
                SortOrder::Desc => ord.reverse(),
            }
        });
    }
    items
}

pub async fn list_products(
    state: &AppState,
    query: ProductQuery,
) -> AppResult<ApiResponse<ProductList>> {
    if let (Some(min), Some(max)) = (query.min_price, query.max_price) {
        if min > max {
            return Err(AppError::BadRequest(
                "min_price must not exceed max_price".into(),
            ));
        }
    }
    let items = filter_products(&state.reference.products, &query);
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Products", ProductList { items }, Some(meta)))
}

pub async fn get_product(state: &AppState, id: &str) -> AppResult<ApiResponse<Product>> {
    let product = state
        .reference
        .product(id)
        .cloned()
        .ok_or(AppError::NotFound)?;
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn list_communities(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<CommunityList>> {
    let items: Vec<_> = visible_communities(&user.user, &state.reference)
        .into_iter()
        .cloned()
        .collect();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Communities", CommunityList { items }, Some(meta)))
}

pub async fn list_zones(state: &AppState) -> AppResult<ApiResponse<ZoneList>> {
    let items = state.reference.zones.clone();
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Zones", ZoneList { items }, Some(meta)))
}
