use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    core::visibility::{capabilities, community_in_scope},
    error::{AppError, AppResult},
    models::{InventoryItem, ReferenceData, User},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Low,
    Medium,
    High,
}

impl StockLevel {
    pub fn classify(stock: i64) -> Self {
        match stock {
            s if s < 50 => StockLevel::Low,
            s if s < 100 => StockLevel::Medium,
            _ => StockLevel::High,
        }
    }
}

pub fn find_row<'a>(
    inventory: &'a [InventoryItem],
    community_id: &str,
    product_id: &str,
) -> Option<&'a InventoryItem> {
    inventory
        .iter()
        .find(|i| i.community_id == community_id && i.product_id == product_id)
}

/// Applies `delta` to one community's stock of one product and returns the
/// resulting row. A row that does not exist yet is only created by a
/// positive delta.
pub fn adjust_stock(
    principal: &User,
    inventory: &[InventoryItem],
    community_id: &str,
    product_id: &str,
    delta: i64,
    reference: &ReferenceData,
) -> AppResult<InventoryItem> {
    if !capabilities(principal.role).adjust_inventory {
        return Err(AppError::Unauthorized);
    }
    if delta == 0 {
        return Err(AppError::BadRequest("delta must not be 0".into()));
    }
    if reference.community(community_id).is_none() {
        return Err(AppError::NotFound);
    }
    if !community_in_scope(principal, community_id, reference) {
        return Err(AppError::Unauthorized);
    }
    if reference.product(product_id).is_none() {
        return Err(AppError::UnknownProduct(product_id.to_string()));
    }

    let current = find_row(inventory, community_id, product_id).map_or(0, |i| i.stock);
    let stock = current.checked_add(delta).ok_or(AppError::InvalidStock)?;
    if stock < 0 {
        return Err(AppError::InvalidStock);
    }

    Ok(InventoryItem {
        community_id: community_id.to_string(),
        product_id: product_id.to_string(),
        stock,
    })
}

/// Writes `row` over the row with the same key, or appends it.
pub fn upsert_row(inventory: &mut Vec<InventoryItem>, row: InventoryItem) {
    match inventory
        .iter_mut()
        .find(|i| i.community_id == row.community_id && i.product_id == row.product_id)
    {
        Some(existing) => existing.stock = row.stock,
        None => inventory.push(row),
    }
}

/// Rows under `threshold`, lowest stock first.
pub fn low_stock<'a>(items: &[&'a InventoryItem], threshold: i64) -> Vec<&'a InventoryItem> {
    let mut low: Vec<&InventoryItem> = items
        .iter()
        .copied()
        .filter(|i| i.stock < threshold)
        .collect();
    low.sort_by_key(|i| i.stock);
    low
}
