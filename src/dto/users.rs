use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    core::directory::{NewUser, UserChanges},
    models::{Role, User},
};

/// A directory entry as exposed over HTTP; never carries the password hash.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub role_label: String,
    pub approved: bool,
    pub community_id: Option<String>,
    pub zone_id: Option<String>,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            username: user.username.clone(),
            role: user.role,
            role_label: user.role.label().to_string(),
            approved: user.approved,
            community_id: user.community_id.clone(),
            zone_id: user.zone_id.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserList {
    pub items: Vec<UserProfile>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: String,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub approved: Option<bool>,
    pub community_id: Option<String>,
    pub zone_id: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            username: req.username,
            password: req.password,
            role: req.role,
            approved: req.approved,
            community_id: req.community_id,
            zone_id: req.zone_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub username: String,
    /// Leave empty to keep the current password.
    pub password: Option<String>,
    pub role: Role,
    pub approved: bool,
    pub community_id: Option<String>,
    pub zone_id: Option<String>,
}

impl From<UpdateUserRequest> for UserChanges {
    fn from(req: UpdateUserRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            username: req.username,
            password: req.password,
            role: req.role,
            approved: req.approved,
            community_id: req.community_id,
            zone_id: req.zone_id,
        }
    }
}
