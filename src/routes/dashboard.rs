use axum::{Json, Router, extract::State, routing::get};

use crate::{
    dto::dashboard::{DashboardData, RouteList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::dashboard_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard))
        .route("/routes", get(route_inspection))
}

#[utoipa::path(
    get,
    path = "/api/dashboard",
    responses(
        (status = 200, description = "Counters and charts for the current user's scope", body = ApiResponse<DashboardData>)
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<DashboardData>>> {
    let resp = dashboard_service::dashboard(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/dashboard/routes",
    responses(
        (status = 200, description = "Community markers with pending order counts", body = ApiResponse<RouteList>),
        (status = 403, description = "Only administrators and zone managers inspect routes")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn route_inspection(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<RouteList>>> {
    let resp = dashboard_service::route_inspection(&state, &user).await?;
    Ok(Json(resp))
}
