use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    core::cart::Cart,
    error::{AppError, AppResult},
};

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub user_id: String,
    pub cart: Cart,
    pub expires_at: DateTime<Utc>,
}

/// Live logins. Each user holds at most one session; opening a new one
/// discards the previous session and its cart.
#[derive(Debug, Clone, Default)]
pub struct SessionRegistry {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn open(&self, user_id: &str, ttl: Duration) -> AppResult<Session> {
        let expires_at = Utc::now()
            .checked_add_signed(ttl)
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("session expiry out of range")))?;
        let session = Session {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            cart: Cart::new(),
            expires_at,
        };
        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| s.user_id != user_id);
        sessions.insert(session.id, session.clone());
        Ok(session)
    }

    /// Returns the session if it exists and has not expired.
    pub async fn get(&self, id: Uuid) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        match sessions.get(&id) {
            Some(s) if s.expires_at > Utc::now() => Some(s.clone()),
            Some(_) => {
                sessions.remove(&id);
                None
            }
            None => None,
        }
    }

    pub async fn close(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Ends every session of a user, e.g. after the user is deleted.
    pub async fn close_user(&self, user_id: &str) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.user_id != user_id);
        before - sessions.len()
    }

    pub async fn cart(&self, id: Uuid) -> AppResult<Cart> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|s| s.cart.clone())
            .ok_or(AppError::Unauthenticated)
    }

    /// Runs `f` against the session's cart. The cart is left untouched when
    /// `f` fails.
    pub async fn update_cart<T, F>(&self, id: Uuid, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Cart) -> AppResult<T>,
    {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(AppError::Unauthenticated)?;
        let mut cart = session.cart.clone();
        let out = f(&mut cart)?;
        session.cart = cart;
        Ok(out)
    }
}
