use crate::{
    audit::AuditList,
    error::AppResult,
    middleware::auth::{AuthUser, ensure_admin},
    response::ApiResponse,
    routes::params::Pagination,
    state::AppState,
};

/// Audit trail, newest first.
pub async fn list_audit(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<AuditList>> {
    ensure_admin(user)?;
    let mut entries = state.store.audit_log().await?;
    entries.reverse();

    let (items, meta) = pagination.apply(entries);
    Ok(ApiResponse::success("Audit log", AuditList { items }, Some(meta)))
}
