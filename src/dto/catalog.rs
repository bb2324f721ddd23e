use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{Community, Product, Zone};

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductList {
    pub items: Vec<Product>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommunityList {
    pub items: Vec<Community>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ZoneList {
    pub items: Vec<Zone>,
}
