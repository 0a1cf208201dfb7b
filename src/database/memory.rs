use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserRepository;
use crate::models::User;
use crate::utils::StoreError;

/// Process-local user store, keyed by hex id.
///
/// Mirrors the document semantics of the MongoDB store: reads hand out
/// copies and `save` replaces the whole user.
#[derive(Default)]
pub struct InMemoryUsers {
    users: RwLock<HashMap<String, User>>,
    offline: AtomicBool,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent call fail, to exercise 500 paths.
    #[cfg(test)]
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Drops a user behind the back of any live session.
    #[cfg(test)]
    pub async fn forget(&self, id: &str) {
        self.users.write().await.remove(id);
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("in-memory store is offline".to_string()));
        }
        Ok(())
    }

    async fn find_where(
        &self,
        pred: impl Fn(&User) -> bool + Send + Sync,
    ) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        let users = self.users.read().await;
        Ok(users.values().find(|u| pred(u)).cloned())
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.check_online()?;
        Ok(self.users.read().await.get(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.find_where(|u| u.email == email).await
    }

    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, StoreError> {
        self.find_where(|u| u.email == email && u.password == password)
            .await
    }

    async fn insert(&self, user: &User) -> Result<(), StoreError> {
        self.check_online()?;
        self.users.write().await.insert(user.id_hex(), user.clone());
        Ok(())
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        self.check_online()?;
        let mut users = self.users.write().await;
        match users.get_mut(&user.id_hex()) {
            Some(slot) => *slot = user.clone(),
            None => log::warn!("⚠️ Save matched no document for user {}", user.id),
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}
