use serde::Serialize;
use utoipa::ToSchema;

use crate::core::{
    dashboard::{DashboardSummary, RouteMarker},
    visibility::Capabilities,
};

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardData {
    pub summary: DashboardSummary,
    pub capabilities: Capabilities,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RouteList {
    pub items: Vec<RouteMarker>,
}
