//! # In-Memory Stores
//!
//! Thread-safe, cloneable record stores keyed by UUID. All operations are
//! synchronous (`parking_lot::RwLock`, never held across an `.await`
//! point), which keeps the HTTP handlers free of lock-ordering concerns:
//! the only suspension points in a request are database round trips.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use uuid::Uuid;

use crate::user::User;

/// Cloneable in-memory store; clones share the same underlying map.
#[derive(Debug)]
pub struct Store<T: Clone + Send + Sync> {
    records: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Clone + Send + Sync> Clone for Store<T> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<T: Clone + Send + Sync> Default for Store<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync> Store<T> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert a record under `id`, returning the previous value if any.
    pub fn insert(&self, id: Uuid, record: T) -> Option<T> {
        self.records.write().insert(id, record)
    }

    /// Clone out the record with the given id.
    pub fn get(&self, id: &Uuid) -> Option<T> {
        self.records.read().get(id).cloned()
    }

    /// Snapshot of every record.
    pub fn list(&self) -> Vec<T> {
        self.records.read().values().cloned().collect()
    }

    /// Mutate a record under the write lock. Returns the updated record,
    /// or `None` if the id does not resolve.
    pub fn update(&self, id: &Uuid, f: impl FnOnce(&mut T)) -> Option<T> {
        let mut guard = self.records.write();
        let record = guard.get_mut(id)?;
        f(record);
        Some(record.clone())
    }

    /// Hard delete. Returns the removed record, or `None` if absent.
    pub fn remove(&self, id: &Uuid) -> Option<T> {
        self.records.write().remove(id)
    }

    /// Number of records currently held.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Account store with the lookup-by-email the auth routes need.
///
/// Email comparison is against the normalized (lower-cased) form, which
/// is how accounts are stored.
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    inner: Store<User>,
}

impl UserStore {
    pub fn new() -> Self {
        Self { inner: Store::new() }
    }

    pub fn insert(&self, user: User) {
        self.inner.insert(user.id, user);
    }

    pub fn get(&self, id: &Uuid) -> Option<User> {
        self.inner.get(id)
    }

    /// Find the account registered under `email` (already normalized).
    pub fn find_by_email(&self, email: &str) -> Option<User> {
        self.inner.list().into_iter().find(|u| u.email == email)
    }

    /// Mutate an account under the write lock.
    pub fn update(&self, id: &Uuid, f: impl FnOnce(&mut User)) -> Option<User> {
        self.inner.update(id, f)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::user::Role;
    use chrono::Utc;

    fn sample_user(email: &str) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Test User".to_string(),
            email: email.to_string(),
            password_hash: "v1$00$00".to_string(),
            phone: None,
            role: Role::Client,
            birth_date: None,
            last_login: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn insert_get_roundtrip() {
        let store: Store<String> = Store::new();
        let id = Uuid::new_v4();
        assert!(store.insert(id, "a".to_string()).is_none());
        assert_eq!(store.get(&id).as_deref(), Some("a"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_mutates_in_place() {
        let store: Store<String> = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, "a".to_string());
        let updated = store.update(&id, |s| s.push('b'));
        assert_eq!(updated.as_deref(), Some("ab"));
        assert_eq!(store.get(&id).as_deref(), Some("ab"));
    }

    #[test]
    fn update_missing_id_returns_none() {
        let store: Store<String> = Store::new();
        assert!(store.update(&Uuid::new_v4(), |_| {}).is_none());
    }

    #[test]
    fn remove_makes_record_unreachable() {
        let store: Store<String> = Store::new();
        let id = Uuid::new_v4();
        store.insert(id, "a".to_string());
        assert!(store.remove(&id).is_some());
        assert!(store.get(&id).is_none());
        assert!(store.remove(&id).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn clones_share_data() {
        let store: Store<String> = Store::new();
        let clone = store.clone();
        clone.insert(Uuid::new_v4(), "a".to_string());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn user_store_finds_by_normalized_email() {
        let store = UserStore::new();
        store.insert(sample_user("ana@example.com"));
        assert!(store.find_by_email("ana@example.com").is_some());
        assert!(store.find_by_email("Ana@example.com").is_none());
        assert!(store.find_by_email("missing@example.com").is_none());
    }
}
