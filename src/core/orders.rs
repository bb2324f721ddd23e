use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    config::TransitionPolicy,
    core::visibility::community_in_scope,
    error::{AppError, AppResult},
    models::{Order, OrderProduct, OrderStatus, ReferenceData, Role, User},
};

#[derive(Debug, Clone, Default)]
pub struct OrderDetails {
    pub user_full_name: String,
    pub comments: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StatusUpdate {
    pub status: OrderStatus,
    pub dispatch_date: Option<NaiveDate>,
    pub carrier_name: Option<String>,
}

impl StatusUpdate {
    pub fn status(status: OrderStatus) -> Self {
        Self {
            status,
            dispatch_date: None,
            carrier_name: None,
        }
    }
}

/// Forward edges of the order lifecycle. Cancellation is reachable from
/// every non-terminal state.
pub fn allowed_transitions(from: OrderStatus) -> &'static [OrderStatus] {
    match from {
        OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
        OrderStatus::Confirmed => &[OrderStatus::ReadyForPickup, OrderStatus::Cancelled],
        OrderStatus::ReadyForPickup => &[OrderStatus::Delivered, OrderStatus::Cancelled],
        OrderStatus::Delivered | OrderStatus::Cancelled => &[],
    }
}

/// Staying in the same non-terminal state is allowed so dispatch details can
/// be edited on their own.
pub fn can_transition(from: OrderStatus, to: OrderStatus, policy: TransitionPolicy) -> bool {
    match policy {
        TransitionPolicy::Permissive => true,
        TransitionPolicy::Strict => {
            (from == to && !from.is_terminal()) || allowed_transitions(from).contains(&to)
        }
    }
}

pub fn new_order_id() -> String {
    format!("ord-{}", Uuid::new_v4().simple())
}

/// Turns the cart lines into a pending order for the principal's community.
pub fn create_order(
    principal: &User,
    cart: &[OrderProduct],
    details: OrderDetails,
    reference: &ReferenceData,
    today: NaiveDate,
) -> AppResult<Order> {
    if principal.role != Role::CommunityManager {
        return Err(AppError::Unauthorized);
    }
    let community_id = principal
        .community_id
        .as_deref()
        .filter(|id| reference.community(id).is_some())
        .ok_or_else(|| AppError::BadRequest("user is not assigned to a community".into()))?;

    if cart.is_empty() {
        return Err(AppError::EmptyCart);
    }
    if let Some(line) = cart.iter().find(|l| l.quantity == 0) {
        tracing::debug!(product_id = %line.product_id, "rejecting zero quantity line");
        return Err(AppError::InvalidQuantity);
    }
    if let Some(line) = cart.iter().find(|l| reference.product(&l.product_id).is_none()) {
        return Err(AppError::UnknownProduct(line.product_id.clone()));
    }

    let user_full_name = details.user_full_name.trim();
    if user_full_name.is_empty() {
        return Err(AppError::BadRequest("user_full_name is required".into()));
    }

    Ok(Order {
        id: new_order_id(),
        user_full_name: user_full_name.to_string(),
        community_id: community_id.to_string(),
        products: cart.to_vec(),
        status: OrderStatus::Pending,
        order_date: today,
        dispatch_date: None,
        comments: details.comments,
        carrier_name: None,
        phone: details.phone.filter(|p| !p.trim().is_empty()),
    })
}

/// Applies a status change and optional dispatch details, returning the
/// updated order. Absent or blank dispatch details keep the stored values.
pub fn update_order_status(
    principal: &User,
    orders: &[Order],
    order_id: &str,
    update: StatusUpdate,
    policy: TransitionPolicy,
    reference: &ReferenceData,
) -> AppResult<Order> {
    if principal.role != Role::CommunityManager {
        return Err(AppError::Unauthorized);
    }

    let order = orders
        .iter()
        .find(|o| o.id == order_id)
        .filter(|o| community_in_scope(principal, &o.community_id, reference))
        .ok_or(AppError::NotFound)?;

    if !can_transition(order.status, update.status, policy) {
        return Err(AppError::InvalidTransition {
            from: order.status,
            to: update.status,
        });
    }

    let mut updated = order.clone();
    updated.status = update.status;
    if let Some(date) = update.dispatch_date {
        updated.dispatch_date = Some(date);
    }
    if let Some(carrier) = update.carrier_name.filter(|c| !c.trim().is_empty()) {
        updated.carrier_name = Some(carrier);
    }
    Ok(updated)
}

/// Replaces the order with the same id, keeping collection order.
pub fn replace_order(orders: &mut [Order], updated: Order) -> AppResult<()> {
    let slot = orders
        .iter_mut()
        .find(|o| o.id == updated.id)
        .ok_or(AppError::NotFound)?;
    *slot = updated;
    Ok(())
}
