use crate::{
    core::{
        dashboard::{route_markers, summarize},
        visibility::{capabilities, scope},
    },
    dto::dashboard::{DashboardData, RouteList},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn dashboard(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<DashboardData>> {
    let snapshot = state.store.snapshot().await?;
    let view = scope(&user.user, &snapshot, &state.reference);

    let data = DashboardData {
        summary: summarize(&view, &state.reference.products),
        capabilities: capabilities(user.role()),
    };
    Ok(ApiResponse::success("Dashboard", data, Some(Meta::empty())))
}

pub async fn route_inspection(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<RouteList>> {
    if !capabilities(user.role()).inspect_routes {
        return Err(AppError::Unauthorized);
    }
    let snapshot = state.store.snapshot().await?;
    let view = scope(&user.user, &snapshot, &state.reference);

    let items = route_markers(&view, &state.reference.zones);
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success("Routes", RouteList { items }, Some(meta)))
}
