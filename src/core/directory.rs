use uuid::Uuid;

use crate::{
    core::{
        auth::hash_password,
        visibility::{can_assign, capabilities, user_in_scope},
    },
    error::{AppError, AppResult},
    models::{ReferenceData, Role, User},
};

/// Fields submitted when creating a user. Everything but the username and
/// password has a default.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub name: Option<String>,
    pub email: Option<String>,
    pub username: String,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub approved: Option<bool>,
    pub community_id: Option<String>,
    pub zone_id: Option<String>,
}

/// Full replacement of an existing record. A missing or blank password keeps
/// the stored hash.
#[derive(Debug, Clone)]
pub struct UserChanges {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: Option<String>,
    pub role: Role,
    pub approved: bool,
    pub community_id: Option<String>,
    pub zone_id: Option<String>,
}

pub fn new_user_id() -> String {
    format!("user-{}", Uuid::new_v4().simple())
}

pub fn username_taken(users: &[User], username: &str, except_id: Option<&str>) -> bool {
    let wanted = username.trim().to_lowercase();
    users
        .iter()
        .filter(|u| Some(u.id.as_str()) != except_id)
        .any(|u| u.username.to_lowercase() == wanted)
}

fn ensure_manager(principal: &User) -> AppResult<()> {
    if !capabilities(principal.role).manage_users {
        return Err(AppError::Unauthorized);
    }
    Ok(())
}

fn required_username(username: &str) -> AppResult<String> {
    let username = username.trim();
    if username.is_empty() {
        return Err(AppError::BadRequest("username is required".into()));
    }
    Ok(username.to_string())
}

/// Works out the community and zone a user of `role` ends up with.
///
/// Administrators carry no scope. A non-admin principal hands its own scope
/// down when nothing is submitted and rejects submitted scopes outside its
/// own. Administrator principals must name the scope. The zone of a
/// community-scoped user always follows its community.
pub fn resolve_scope(
    principal: &User,
    role: Role,
    community_id: Option<&str>,
    zone_id: Option<&str>,
    reference: &ReferenceData,
) -> AppResult<(Option<String>, Option<String>)> {
    match role {
        Role::Administrator => Ok((None, None)),
        Role::ZoneManager => {
            let zone = match principal.role {
                Role::Administrator => zone_id
                    .ok_or_else(|| AppError::BadRequest("zone_id is required".into()))?,
                Role::ZoneManager => {
                    let own = principal.zone_id.as_deref().ok_or(AppError::Unauthorized)?;
                    match zone_id {
                        Some(zone) if zone != own => return Err(AppError::Unauthorized),
                        _ => own,
                    }
                }
                Role::CommunityManager | Role::Driver => return Err(AppError::Unauthorized),
            };
            if !reference.zones.iter().any(|z| z.id == zone) {
                return Err(AppError::BadRequest(format!("unknown zone {zone}")));
            }
            Ok((None, Some(zone.to_string())))
        }
        Role::CommunityManager | Role::Driver => {
            let community = match principal.role {
                Role::Administrator => community_id
                    .ok_or_else(|| AppError::BadRequest("community_id is required".into()))?,
                Role::ZoneManager => {
                    let community = community_id
                        .ok_or_else(|| AppError::BadRequest("community_id is required".into()))?;
                    let own_zone = principal.zone_id.as_deref().ok_or(AppError::Unauthorized)?;
                    if reference.zone_of(community).is_some_and(|z| z != own_zone) {
                        return Err(AppError::Unauthorized);
                    }
                    community
                }
                Role::CommunityManager => {
                    let own = principal
                        .community_id
                        .as_deref()
                        .ok_or(AppError::Unauthorized)?;
                    match community_id {
                        Some(community) if community != own => {
                            return Err(AppError::Unauthorized);
                        }
                        _ => own,
                    }
                }
                Role::Driver => return Err(AppError::Unauthorized),
            };
            let zone = reference
                .zone_of(community)
                .ok_or_else(|| AppError::BadRequest(format!("unknown community {community}")))?;
            if zone_id.is_some_and(|z| z != zone) {
                return Err(AppError::BadRequest(
                    "zone_id does not match the community's zone".into(),
                ));
            }
            Ok((Some(community.to_string()), Some(zone.to_string())))
        }
    }
}

pub fn create_user(
    principal: &User,
    users: &[User],
    fields: NewUser,
    reference: &ReferenceData,
) -> AppResult<User> {
    ensure_manager(principal)?;

    let role = fields.role.unwrap_or(Role::CommunityManager);
    if !can_assign(principal, role) {
        return Err(AppError::Unauthorized);
    }

    let username = required_username(&fields.username)?;
    if username_taken(users, &username, None) {
        return Err(AppError::DuplicateUsername);
    }

    let password = fields
        .password
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("password is required".into()))?;

    let (community_id, zone_id) = resolve_scope(
        principal,
        role,
        fields.community_id.as_deref(),
        fields.zone_id.as_deref(),
        reference,
    )?;

    let approved = match principal.role {
        Role::Administrator => fields.approved.unwrap_or(false),
        _ => false,
    };

    Ok(User {
        id: new_user_id(),
        name: fields
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| "Nuevo Usuario".to_string()),
        email: fields.email.unwrap_or_default(),
        username,
        password_hash: hash_password(&password)?,
        role,
        approved,
        community_id,
        zone_id,
    })
}

pub fn update_user(
    principal: &User,
    users: &[User],
    user_id: &str,
    changes: UserChanges,
    reference: &ReferenceData,
) -> AppResult<User> {
    ensure_manager(principal)?;

    let existing = users
        .iter()
        .find(|u| u.id == user_id)
        .filter(|u| user_in_scope(principal, &u.id, users, reference))
        .ok_or(AppError::NotFound)?;

    if changes.role != existing.role && !can_assign(principal, changes.role) {
        return Err(AppError::Unauthorized);
    }

    let username = required_username(&changes.username)?;
    if username_taken(users, &username, Some(user_id)) {
        return Err(AppError::DuplicateUsername);
    }

    let (community_id, zone_id) = if changes.role == existing.role
        && changes.community_id == existing.community_id
        && changes.zone_id == existing.zone_id
    {
        (existing.community_id.clone(), existing.zone_id.clone())
    } else {
        resolve_scope(
            principal,
            changes.role,
            changes.community_id.as_deref(),
            changes.zone_id.as_deref(),
            reference,
        )?
    };

    let password_hash = match changes.password.as_deref().filter(|p| !p.trim().is_empty()) {
        Some(password) => hash_password(password)?,
        None => existing.password_hash.clone(),
    };

    let approved = match principal.role {
        Role::Administrator => changes.approved,
        _ => existing.approved,
    };

    Ok(User {
        id: existing.id.clone(),
        name: changes.name,
        email: changes.email,
        username,
        password_hash,
        role: changes.role,
        approved,
        community_id,
        zone_id,
    })
}

/// Finds the user to delete. The caller removes it from the collection.
pub fn delete_user<'a>(
    principal: &User,
    users: &'a [User],
    user_id: &str,
    reference: &ReferenceData,
) -> AppResult<&'a User> {
    if user_id == principal.id {
        return Err(AppError::SelfDeletion);
    }
    ensure_manager(principal)?;

    users
        .iter()
        .find(|u| u.id == user_id)
        .filter(|u| user_in_scope(principal, &u.id, users, reference))
        .ok_or(AppError::NotFound)
}
