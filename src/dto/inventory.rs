use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::core::inventory::StockLevel;

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryRow {
    pub community_id: String,
    pub community_name: Option<String>,
    pub product_id: String,
    pub product_name: Option<String>,
    pub stock: i64,
    pub level: StockLevel,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct InventoryList {
    pub items: Vec<InventoryRow>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct InventoryAdjustRequest {
    pub delta: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LowStockQuery {
    pub threshold: Option<i64>,
}
