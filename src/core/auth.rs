use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::{
    error::{AppError, AppResult},
    models::User,
};

pub fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();
    Ok(hash)
}

pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Case-insensitive username lookup.
pub fn find_by_username<'a>(users: &'a [User], username: &str) -> Option<&'a User> {
    let wanted = username.trim().to_lowercase();
    users.iter().find(|u| u.username.to_lowercase() == wanted)
}

/// Checks credentials and approval, yielding the principal for a new session.
///
/// The checks run in a fixed order: unknown username, then wrong password,
/// then pending approval. The directory is never modified.
pub fn authenticate(username: &str, password: &str, users: &[User]) -> AppResult<User> {
    let user = find_by_username(users, username).ok_or(AppError::UnknownUser)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::InvalidCredentials);
    }

    if !user.approved {
        return Err(AppError::NotApproved);
    }

    Ok(user.clone())
}
