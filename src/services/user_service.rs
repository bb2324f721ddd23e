use crate::{
    audit::log_audit,
    core::{directory, visibility::visible_users},
    dto::users::{CreateUserRequest, UpdateUserRequest, UserList, UserProfile},
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    response::{ApiResponse, Meta},
    routes::params::UserListQuery,
    state::AppState,
};

pub async fn list_users(
    state: &AppState,
    user: &AuthUser,
    query: UserListQuery,
) -> AppResult<ApiResponse<UserList>> {
    let snapshot = state.store.snapshot().await?;
    let users: Vec<UserProfile> = visible_users(&user.user, &snapshot.users, &state.reference)
        .into_iter()
        .filter(|u| query.role.is_none_or(|r| u.role == r))
        .map(UserProfile::from)
        .collect();

    let (items, meta) = query.pagination().apply(users);
    Ok(ApiResponse::success("Users", UserList { items }, Some(meta)))
}

pub async fn create_user(
    state: &AppState,
    user: &AuthUser,
    payload: CreateUserRequest,
) -> AppResult<ApiResponse<UserProfile>> {
    let _guard = state.writes.lock().await;
    let mut snapshot = state.store.snapshot().await?;

    let created = directory::create_user(
        &user.user,
        &snapshot.users,
        payload.into(),
        &state.reference,
    )?;
    let profile = UserProfile::from(&created);

    snapshot.users.push(created);
    state.store.save_users(snapshot.users).await?;

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.user.id),
        "user_create",
        Some("users"),
        Some(serde_json::json!({ "user_id": profile.id, "role": profile.role })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    tracing::info!(user_id = %profile.id, role = ?profile.role, "user created");

    Ok(ApiResponse::success("User created", profile, Some(Meta::empty())))
}

pub async fn update_user(
    state: &AppState,
    user: &AuthUser,
    id: &str,
    payload: UpdateUserRequest,
) -> AppResult<ApiResponse<UserProfile>> {
    let _guard = state.writes.lock().await;
    let mut snapshot = state.store.snapshot().await?;

    let updated = directory::update_user(
        &user.user,
        &snapshot.users,
        id,
        payload.into(),
        &state.reference,
    )?;
    let profile = UserProfile::from(&updated);

    let slot = snapshot
        .users
        .iter_mut()
        .find(|u| u.id == updated.id)
        .ok_or(AppError::NotFound)?;
    *slot = updated;
    state.store.save_users(snapshot.users).await?;

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.user.id),
        "user_update",
        Some("users"),
        Some(serde_json::json!({ "user_id": profile.id, "role": profile.role })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    tracing::info!(user_id = %profile.id, "user updated");

    Ok(ApiResponse::success("User updated", profile, Some(Meta::empty())))
}

pub async fn delete_user(
    state: &AppState,
    user: &AuthUser,
    id: &str,
) -> AppResult<ApiResponse<UserProfile>> {
    let _guard = state.writes.lock().await;
    let mut snapshot = state.store.snapshot().await?;

    let removed = directory::delete_user(&user.user, &snapshot.users, id, &state.reference)?;
    let profile = UserProfile::from(removed);

    snapshot.users.retain(|u| u.id != profile.id);
    state.store.save_users(snapshot.users).await?;
    let closed = state.sessions.close_user(&profile.id).await;

    if let Err(err) = log_audit(
        state.store.as_ref(),
        Some(&user.user.id),
        "user_delete",
        Some("users"),
        Some(serde_json::json!({ "user_id": profile.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    tracing::info!(user_id = %profile.id, sessions_closed = closed, "user deleted");

    Ok(ApiResponse::success("User deleted", profile, Some(Meta::empty())))
}
