use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Zone {
    pub id: String,
    pub name: String,
    /// Normalized map coordinates, 0-100.
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Community {
    pub id: String,
    pub name: String,
    pub zone_id: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    ZoneManager,
    CommunityManager,
    Driver,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Administrator,
        Role::ZoneManager,
        Role::CommunityManager,
        Role::Driver,
    ];

    /// Display label used by the dashboard.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Administrator => "Administrador",
            Role::ZoneManager => "Encargado de Zona",
            Role::CommunityManager => "Encargado Comunal",
            Role::Driver => "Chofer",
        }
    }
}

/// A directory entry. `password_hash` is an argon2 PHC string and never
/// leaves the crate through the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub approved: bool,
    pub community_id: Option<String>,
    pub zone_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    /// Unit price in cents.
    pub price: i64,
    pub image_url: String,
}

/// Stock of one product in one community; keyed by the pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InventoryItem {
    pub community_id: String,
    pub product_id: String,
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderProduct {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    ReadyForPickup,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendiente",
            OrderStatus::Confirmed => "Confirmado",
            OrderStatus::ReadyForPickup => "Listo para Retiro",
            OrderStatus::Delivered => "Entregado",
            OrderStatus::Cancelled => "Cancelado",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Confirmed => write!(f, "confirmed"),
            OrderStatus::ReadyForPickup => write!(f, "ready_for_pickup"),
            OrderStatus::Delivered => write!(f, "delivered"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: String,
    pub user_full_name: String,
    pub community_id: String,
    pub products: Vec<OrderProduct>,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub dispatch_date: Option<NaiveDate>,
    pub comments: String,
    pub carrier_name: Option<String>,
    pub phone: Option<String>,
}

/// Catalog data that stays fixed for the lifetime of the process.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub zones: Vec<Zone>,
    pub communities: Vec<Community>,
    pub products: Vec<Product>,
}

impl ReferenceData {
    pub fn community(&self, id: &str) -> Option<&Community> {
        self.communities.iter().find(|c| c.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn zone_of(&self, community_id: &str) -> Option<&str> {
        self.community(community_id).map(|c| c.zone_id.as_str())
    }

    pub fn community_ids_in_zone(&self, zone_id: &str) -> Vec<&str> {
        self.communities
            .iter()
            .filter(|c| c.zone_id == zone_id)
            .map(|c| c.id.as_str())
            .collect()
    }
}

/// The mutable collections handed to a core operation.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub orders: Vec<Order>,
    pub inventory: Vec<InventoryItem>,
}
