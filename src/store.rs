use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    audit::AuditEntry,
    error::AppResult,
    models::{InventoryItem, Order, Snapshot, User},
};

/// Holder of the mutable collections. Reads hand out a full snapshot and
/// writes replace a whole collection.
#[async_trait]
pub trait Store: Send + Sync {
    async fn snapshot(&self) -> AppResult<Snapshot>;

    async fn save_users(&self, users: Vec<User>) -> AppResult<()>;

    async fn save_orders(&self, orders: Vec<Order>) -> AppResult<()>;

    async fn save_inventory(&self, inventory: Vec<InventoryItem>) -> AppResult<()>;

    async fn append_audit(&self, entry: AuditEntry) -> AppResult<()>;

    async fn audit_log(&self) -> AppResult<Vec<AuditEntry>>;
}

#[derive(Debug, Default)]
struct MemoryState {
    snapshot: Snapshot,
    audit: Vec<AuditEntry>,
}

/// Process-local store; contents are lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            state: Arc::new(RwLock::new(MemoryState {
                snapshot,
                audit: Vec::new(),
            })),
        }
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn snapshot(&self) -> AppResult<Snapshot> {
        Ok(self.state.read().await.snapshot.clone())
    }

    async fn save_users(&self, users: Vec<User>) -> AppResult<()> {
        self.state.write().await.snapshot.users = users;
        Ok(())
    }

    async fn save_orders(&self, orders: Vec<Order>) -> AppResult<()> {
        self.state.write().await.snapshot.orders = orders;
        Ok(())
    }

    async fn save_inventory(&self, inventory: Vec<InventoryItem>) -> AppResult<()> {
        self.state.write().await.snapshot.inventory = inventory;
        Ok(())
    }

    async fn append_audit(&self, entry: AuditEntry) -> AppResult<()> {
        self.state.write().await.audit.push(entry);
        Ok(())
    }

    async fn audit_log(&self) -> AppResult<Vec<AuditEntry>> {
        Ok(self.state.read().await.audit.clone())
    }
}
