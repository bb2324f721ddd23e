use chrono::Utc;

use crate::{
    audit::log_audit,
    core::{
        cart::line_total,
        notification::order_summary,
        orders::{self, OrderDetails},
        visibility::{community_in_scope, visible_orders},
    },
    dto::orders::{CreateOrderRequest, OrderList, OrderSummary, UpdateOrderStatusRequest},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::Order,
    response::{ApiResponse, Meta},
    routes::params::{OrderListQuery, SortOrder},
    state::AppState,
};

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    let snapshot = state.store.snapshot().await?;

    let mut orders: Vec<Order> = visible_orders(&user.user, &snapshot.orders, &state.reference)
        .into_iter()
        .filter(|o| query.status.is_none_or(|s| o.status == s))
        .filter(|o| {
            query
                .community_id
                .as_ref()
                .filter(|c| !c.is_empty())
                .is_none_or(|c| &o.community_id == c)
        })
        .cloned()
        .collect();

    match query.sort_order {
        Some(SortOrder::Asc) => orders.sort_by_key(|o| o.order_date),
        Some(SortOrder::Desc) => orders.sort_by(|a, b| b.order_date.cmp(&a.order_date)),
        None => {}
    }

    let (items, meta) = query.pagination().apply(orders);
    Ok(ApiResponse::success("Ok", OrderList { items }, Some(meta)))
}

async fn find_visible(state: &AppState, user: &AuthUser, id: &str) -> AppResult<Order> {
    let snapshot = state.store.snapshot().await?;
    snapshot
        .orders
        .into_iter()
        .find(|o| o.id == id)
        .filter(|o| community_in_scope(&user.user, &o.community_id, &state.reference))
        .ok_or(AppError::NotFound)
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<Order>> {
    let order = find_visible(state, user, id).await?;
    Ok(ApiResponse::success("OK", order, Some(Meta::empty())))
}

/// Turns the session cart into a pending order and empties the cart.
pub async fn create_order(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    let _guard = state.writes.lock().await;
    let details = OrderDetails::from(payload);
    let today = Utc::now().date_naive();

    // Building the order and emptying the cart happen under one session lock,
    // so lines added concurrently land either in this order or in the cart.
    let order = state
        .sessions
        .update_cart(user.session_id, |cart| {
            let order =
                orders::create_order(&user.user, cart.items(), details, &state.reference, today)?;
            cart.clear();
            Ok(order)
        })
        .await?;

    if let Err(err) = save_new_order(state, &order).await {
        let lines = order.products.clone();
        state
            .sessions
            .update_cart(user.session_id, |cart| {
                cart.restore(lines);
                Ok(())
            })
            .await?;
        return Err(err);
    }

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.user.id),
        "order_create",
        Some("orders"),
        Some(serde_json::json!({ "order_id": order.id, "community_id": order.community_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    tracing::info!(order_id = %order.id, community_id = %order.community_id, "order created");

    Ok(ApiResponse::success(
        "Order created",
        order,
        Some(Meta::empty()),
    ))
}

async fn save_new_order(state: &AppState, order: &Order) -> AppResult<()> {
    let mut snapshot = state.store.snapshot().await?;
    snapshot.orders.insert(0, order.clone());
    state.store.save_orders(snapshot.orders).await
}

pub async fn update_order_status(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateOrderStatusRequest,
) -> AppResult<ApiResponse<Order>> {
    let _guard = state.writes.lock().await;
    let mut snapshot = state.store.snapshot().await?;

    let updated = orders::update_order_status(
        &user.user,
        &snapshot.orders,
        id,
        payload.into(),
        state.config.transition_policy,
        &state.reference,
    )?;

    orders::replace_order(&mut snapshot.orders, updated.clone())?;
    state.store.save_orders(snapshot.orders).await?;

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.user.id),
        "order_status_update",
        Some("orders"),
        Some(serde_json::json!({ "order_id": updated.id, "status": updated.status })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    tracing::info!(order_id = %updated.id, status = %updated.status, "order status updated");

    Ok(ApiResponse::success(
        "Order updated",
        updated,
        Some(Meta::empty()),
    ))
}

pub async fn get_order_summary(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<OrderSummary>> {
    let order = find_visible(state, user, id).await?;
    let community = state.reference.community(&order.community_id);
    let catalog = &state.reference.products;

    let summary = OrderSummary {
        order_id: order.id.clone(),
        status_label: order.status.label().to_string(),
        phone: order.phone.clone(),
        total: line_total(&order.products, catalog),
        message: order_summary(&order, catalog, community),
    };
    Ok(ApiResponse::success("OK", summary, Some(Meta::empty())))
}
