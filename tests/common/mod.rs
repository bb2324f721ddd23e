#![allow(dead_code)]

use chrono::Duration;
use community_pharmacy_api::{
    config::{AppConfig, TransitionPolicy},
    middleware::auth::AuthUser,
    state::AppState,
};

pub fn seeded_state() -> anyhow::Result<AppState> {
    Ok(AppState::seeded(AppConfig::for_tests())?)
}

pub fn seeded_state_with(policy: TransitionPolicy) -> anyhow::Result<AppState> {
    let config = AppConfig {
        transition_policy: policy,
        ..AppConfig::for_tests()
    };
    Ok(AppState::seeded(config)?)
}

/// Opens a session for a seeded user without going through password checks.
pub async fn sign_in(state: &AppState, user_id: &str) -> anyhow::Result<AuthUser> {
    let user = state
        .store
        .snapshot()
        .await?
        .users
        .into_iter()
        .find(|u| u.id == user_id)
        .ok_or_else(|| anyhow::anyhow!("no seeded user {user_id}"))?;
    let session = state.sessions.open(&user.id, Duration::hours(1)).await?;
    Ok(AuthUser {
        session_id: session.id,
        user,
    })
}
