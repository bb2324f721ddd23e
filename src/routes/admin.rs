use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::{
    audit::AuditList,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/audit", get(list_audit))
}

#[utoipa::path(
    get,
    path = "/api/admin/audit",
    params(
        ("page" = Option<usize>, Query, description = "Page number, default 1"),
        ("per_page" = Option<usize>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Audit trail, newest first (admin only)", body = ApiResponse<AuditList>),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_audit(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<AuditList>>> {
    let resp = admin_service::list_audit(&state, &user, pagination).await?;
    Ok(Json(resp))
}
