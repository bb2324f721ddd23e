use chrono::Duration;

use crate::{
    audit::log_audit,
    core::{
        auth::authenticate,
        visibility::{assignable_roles, capabilities},
    },
    dto::auth::{LoginRequest, LoginResponse, SessionInfo},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, issue_token},
    models::User,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub fn session_info(user: &User) -> SessionInfo {
    SessionInfo {
        user: user.into(),
        capabilities: capabilities(user.role),
        assignable_roles: assignable_roles(user.role).to_vec(),
    }
}

pub async fn login_user(
    state: &AppState,
    payload: LoginRequest,
) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { username, password } = payload;
    let snapshot = state.store.snapshot().await?;

    let user = match authenticate(&username, &password, &snapshot.users) {
        Ok(user) => user,
        Err(err) => {
            tracing::info!(username = %username, reason = %err, "login rejected");
            return Err(err);
        }
    };

    let ttl = Duration::try_hours(state.config.session_ttl_hours)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("session ttl out of range")))?;
    let session = state.sessions.open(&user.id, ttl).await?;
    let token = issue_token(&state.config.jwt_secret, &user, session.id, ttl)?;

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "session_id": session.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    tracing::info!(user_id = %user.id, role = ?user.role, "user logged in");

    let resp = LoginResponse {
        token: format!("Bearer {}", token),
        session: session_info(&user),
    };
    Ok(ApiResponse::success("Logged in", resp, Some(Meta::empty())))
}

pub async fn logout_user(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<serde_json::Value>> {
    state.sessions.close(user.session_id).await;

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.user.id),
        "user_logout",
        Some("users"),
        None,
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success(
        "Logged out",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}

pub async fn current_session(user: &AuthUser) -> AppResult<ApiResponse<SessionInfo>> {
    Ok(ApiResponse::success(
        "OK",
        session_info(&user.user),
        Some(Meta::empty()),
    ))
}
