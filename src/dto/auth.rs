use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{core::visibility::Capabilities, dto::users::UserProfile, models::Role};

#[derive(Deserialize, Debug, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub session: SessionInfo,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionInfo {
    pub user: UserProfile,
    pub capabilities: Capabilities,
    pub assignable_roles: Vec<Role>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct Claims {
    pub sub: String,
    pub sid: String,
    pub role: Role,
    pub exp: usize,
}
