use axum::{extract::FromRequestParts, http::header};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::{
    dto::auth::Claims,
    error::{AppError, AppResult},
    models::{Role, User},
    state::AppState,
};

/// The authenticated principal of a request together with its session.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub session_id: Uuid,
    pub user: User,
}

impl AuthUser {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

pub fn ensure_role(user: &AuthUser, role: Role) -> Result<(), AppError> {
    if user.role() != role {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

pub fn ensure_admin(user: &AuthUser) -> Result<(), AppError> {
    ensure_role(user, Role::Administrator)
}

pub fn issue_token(
    secret: &str,
    user: &User,
    session_id: Uuid,
    ttl: Duration,
) -> AppResult<String> {
    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user.id.clone(),
        sid: session_id.to_string(),
        role: user.role,
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthenticated)?;

        let auth_str = auth_header
            .to_str()
            .map_err(|_| AppError::BadRequest("Invalid Authorization header".into()))?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or_else(|| AppError::BadRequest("Invalid Authorization scheme".into()))?
            .trim();

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.jwt_secret.as_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthenticated)?;

        let session_id =
            Uuid::parse_str(&decoded.claims.sid).map_err(|_| AppError::Unauthenticated)?;
        let session = state
            .sessions
            .get(session_id)
            .await
            .ok_or(AppError::Unauthenticated)?;
        if session.user_id != decoded.claims.sub {
            return Err(AppError::Unauthenticated);
        }

        // Reload so role or approval changes made after login take effect.
        let snapshot = state.store.snapshot().await?;
        let user = snapshot
            .users
            .into_iter()
            .find(|u| u.id == session.user_id)
            .filter(|u| u.approved)
            .ok_or(AppError::Unauthenticated)?;

        Ok(AuthUser { session_id, user })
    }
}
