use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    core::orders::{OrderDetails, StatusUpdate},
    models::{Order, OrderStatus},
};

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub user_full_name: String,
    pub comments: Option<String>,
    pub phone: Option<String>,
}

impl From<CreateOrderRequest> for OrderDetails {
    fn from(req: CreateOrderRequest) -> Self {
        Self {
            user_full_name: req.user_full_name,
            comments: req.comments.unwrap_or_default(),
            phone: req.phone,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
    pub dispatch_date: Option<NaiveDate>,
    pub carrier_name: Option<String>,
}

impl From<UpdateOrderStatusRequest> for StatusUpdate {
    fn from(req: UpdateOrderStatusRequest) -> Self {
        Self {
            status: req.status,
            dispatch_date: req.dispatch_date,
            carrier_name: req.carrier_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderSummary {
    pub order_id: String,
    pub status_label: String,
    pub phone: Option<String>,
    /// Cents.
    pub total: i64,
    pub message: String,
}
