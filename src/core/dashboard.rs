use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    core::visibility::ScopedView,
    models::{OrderStatus, Product, Zone},
};

const TOP_PRODUCTS: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CommunityOrderCount {
    pub community_id: String,
    pub name: String,
    pub orders: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProductDemand {
    pub product_id: String,
    pub name: String,
    pub quantity: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardSummary {
    pub total_orders: usize,
    pub pending_orders: usize,
    pub communities: usize,
    pub total_stock: i64,
    pub orders_by_community: Vec<CommunityOrderCount>,
    pub top_products: Vec<ProductDemand>,
}

pub fn summarize(view: &ScopedView<'_>, catalog: &[Product]) -> DashboardSummary {
    let orders_by_community = view
        .communities
        .iter()
        .map(|c| CommunityOrderCount {
            community_id: c.id.clone(),
            name: c.name.clone(),
            orders: view.orders.iter().filter(|o| o.community_id == c.id).count(),
        })
        .collect();

    DashboardSummary {
        total_orders: view.orders.len(),
        pending_orders: view
            .orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count(),
        communities: view.communities.len(),
        total_stock: view.inventory.iter().map(|i| i.stock).sum(),
        orders_by_community,
        top_products: product_demand(view, catalog),
    }
}

/// Most requested products by summed quantity. Ties keep first appearance.
fn product_demand(view: &ScopedView<'_>, catalog: &[Product]) -> Vec<ProductDemand> {
    let mut demand: Vec<(String, u64)> = Vec::new();
    for line in view.orders.iter().flat_map(|o| o.products.iter()) {
        match demand.iter_mut().find(|(id, _)| *id == line.product_id) {
            Some((_, quantity)) => *quantity += u64::from(line.quantity),
            None => demand.push((line.product_id.clone(), u64::from(line.quantity))),
        }
    }
    demand.sort_by(|a, b| b.1.cmp(&a.1));

    demand
        .into_iter()
        .take(TOP_PRODUCTS)
        .map(|(product_id, quantity)| ProductDemand {
            name: catalog
                .iter()
                .find(|p| p.id == product_id)
                .map_or_else(|| "Desconocido".to_string(), |p| p.name.clone()),
            product_id,
            quantity,
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct RouteMarker {
    pub community_id: String,
    pub name: String,
    pub zone_id: String,
    pub zone_name: Option<String>,
    pub x: f64,
    pub y: f64,
    pub pending_orders: usize,
}

/// One map marker per visible community, with its pending order count.
pub fn route_markers(view: &ScopedView<'_>, zones: &[Zone]) -> Vec<RouteMarker> {
    view.communities
        .iter()
        .map(|c| RouteMarker {
            community_id: c.id.clone(),
            name: c.name.clone(),
            zone_id: c.zone_id.clone(),
            zone_name: zones
                .iter()
                .find(|z| z.id == c.zone_id)
                .map(|z| z.name.clone()),
            x: c.x,
            y: c.y,
            pending_orders: view
                .orders
                .iter()
                .filter(|o| o.community_id == c.id && o.status == OrderStatus::Pending)
                .count(),
        })
        .collect()
}
