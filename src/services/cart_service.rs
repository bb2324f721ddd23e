use crate::{
    audit::log_audit,
    core::cart::Cart,
    dto::cart::{AddToCartRequest, CartLine, CartView, UpdateCartItemRequest},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_role},
    models::{Product, Role},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn cart_view(cart: &Cart, catalog: &[Product]) -> CartView {
    let items = cart
        .items()
        .iter()
        .filter_map(|item| {
            let product = catalog.iter().find(|p| p.id == item.product_id)?;
            Some(CartLine {
                product: product.clone(),
                quantity: item.quantity,
                line_total: product.price * i64::from(item.quantity),
            })
        })
        .collect();

    CartView {
        items,
        total: cart.total(catalog),
        units: cart.unit_count(),
    }
}

pub async fn list_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    ensure_role(user, Role::CommunityManager)?;
    let cart = state.sessions.cart(user.session_id).await?;
    let meta = Meta::total(cart.len());
    Ok(ApiResponse::success(
        "OK",
        cart_view(&cart, &state.reference.products),
        Some(meta),
    ))
}

pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    ensure_role(user, Role::CommunityManager)?;
    let product = state
        .reference
        .product(&payload.product_id)
        .ok_or_else(|| AppError::UnknownProduct(payload.product_id.clone()))?;

    let cart = state
        .sessions
        .update_cart(user.session_id, |cart| {
            cart.add(product, payload.quantity)?;
            Ok(cart.clone())
        })
        .await?;

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.user.id),
        "cart_update",
        Some("cart"),
        Some(serde_json::json!({ "product_id": payload.product_id, "quantity": payload.quantity })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Added to cart",
        cart_view(&cart, &state.reference.products),
        None,
    ))
}

pub async fn update_cart_item(
    state: &AppState,
    user: &AuthUser,
    product_id: &str,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    ensure_role(user, Role::CommunityManager)?;
    let cart = state
        .sessions
        .update_cart(user.session_id, |cart| {
            cart.update_quantity(product_id, payload.quantity)?;
            Ok(cart.clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Cart updated",
        cart_view(&cart, &state.reference.products),
        None,
    ))
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    product_id: &str,
) -> AppResult<ApiResponse<CartView>> {
    ensure_role(user, Role::CommunityManager)?;
    let cart = state
        .sessions
        .update_cart(user.session_id, |cart| {
            cart.remove(product_id);
            Ok(cart.clone())
        })
        .await?;

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.user.id),
        "cart_remove",
        Some("cart"),
        Some(serde_json::json!({ "product_id": product_id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Removed from cart",
        cart_view(&cart, &state.reference.products),
        Some(Meta::empty()),
    ))
}

pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    ensure_role(user, Role::CommunityManager)?;
    let cart = state
        .sessions
        .update_cart(user.session_id, |cart| {
            cart.clear();
            Ok(cart.clone())
        })
        .await?;

    Ok(ApiResponse::success(
        "Cart cleared",
        cart_view(&cart, &state.reference.products),
        Some(Meta::empty()),
    ))
}
