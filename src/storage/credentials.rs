//! Credential store
//!
//! Repository over the `users` key. The whole user list is one serialized
//! blob; every operation reads it, optionally modifies it and writes it back
//! in the same call. Uniqueness of name and email is checked on insert only.

use crate::storage::{SharedStore, StorageResult, User, USERS_KEY};
use thiserror::Error;

/// Fields that must be unique across the user list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueField {
    Name,
    Email,
}

impl UniqueField {
    /// Message shown next to the form when the value is taken
    pub fn message(&self) -> &'static str {
        match self {
            UniqueField::Name => "Username already exists",
            UniqueField::Email => "Email already exists",
        }
    }
}

/// Errors from credential store writes
#[derive(Error, Debug)]
pub enum CredentialError {
    /// Name or email is already registered
    #[error("{}", .0.message())]
    DuplicateKey(UniqueField),

    /// Backend failure
    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),
}

/// User-list repository backed by a key-value store
#[derive(Clone)]
pub struct CredentialStore {
    store: SharedStore,
}

impl CredentialStore {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// All users in insertion order.
    ///
    /// A missing key is an empty list. A blob that does not parse is also
    /// treated as empty so the app stays usable; the next write replaces it.
    pub fn list_users(&self) -> StorageResult<Vec<User>> {
        let Some(raw) = self.store.get(USERS_KEY)? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str(&raw) {
            Ok(users) => Ok(users),
            Err(e) => {
                tracing::warn!(
                    backend = self.store.backend(),
                    error = %e,
                    "Stored user list is corrupt, treating as empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// First user whose name or email equals `key`
    pub fn find_by_name_or_email(&self, key: &str) -> StorageResult<Option<User>> {
        Ok(self
            .list_users()?
            .into_iter()
            .find(|u| u.answers_to(key)))
    }

    /// User currently holding `token`
    pub fn find_by_token(&self, token: &str) -> StorageResult<Option<User>> {
        Ok(self.list_users()?.into_iter().find(|u| u.token == token))
    }

    /// Append a user. Fails without writing when the name or email is taken;
    /// the name is checked first.
    pub fn insert(&self, user: User) -> Result<(), CredentialError> {
        let mut users = self.list_users()?;

        if users.iter().any(|u| u.name == user.name) {
            return Err(CredentialError::DuplicateKey(UniqueField::Name));
        }
        if users.iter().any(|u| u.email == user.email) {
            return Err(CredentialError::DuplicateKey(UniqueField::Email));
        }

        tracing::debug!(name = %user.name, "Inserting user");
        users.push(user);
        self.save(&users)?;
        Ok(())
    }

    /// Read-modify-write the user named `name`.
    ///
    /// Returns the updated record, or `None` (and writes nothing) when no
    /// user has that name.
    pub fn update<F>(&self, name: &str, f: F) -> StorageResult<Option<User>>
    where
        F: FnOnce(&mut User),
    {
        let mut users = self.list_users()?;

        let Some(user) = users.iter_mut().find(|u| u.name == name) else {
            return Ok(None);
        };
        f(user);
        let updated = user.clone();

        self.save(&users)?;
        Ok(Some(updated))
    }

    /// Store `token` on the user named `name`
    pub fn update_token(&self, name: &str, token: &str) -> StorageResult<Option<User>> {
        self.update(name, |u| u.token = token.to_string())
    }

    /// Number of stored users
    pub fn len(&self) -> StorageResult<usize> {
        Ok(self.list_users()?.len())
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }

    fn save(&self, users: &[User]) -> StorageResult<()> {
        let raw = serde_json::to_string(users)?;
        tracing::debug!(count = users.len(), backend = self.store.backend(), "Saving user list");
        self.store.set(USERS_KEY, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{KeyValueStore, MemoryStore};
    use std::rc::Rc;

    fn create_test_store() -> (CredentialStore, Rc<MemoryStore>) {
        let backend = Rc::new(MemoryStore::new());
        let store = CredentialStore::new(backend.clone());
        (store, backend)
    }

    fn user(name: &str, email: &str) -> User {
        User::new(name, email, "1234567890", "c2VjcmV0", "tok")
    }

    #[test]
    fn test_missing_key_is_empty() {
        let (store, _backend) = create_test_store();
        assert!(store.list_users().unwrap().is_empty());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_corrupt_blob_is_empty() {
        let (store, backend) = create_test_store();
        backend.set(USERS_KEY, "{definitely not a list").unwrap();

        assert!(store.list_users().unwrap().is_empty());

        // The next insert replaces the corrupt blob
        store.insert(user("alice", "a@x.com")).unwrap();
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_insert_preserves_order() {
        let (store, _backend) = create_test_store();
        store.insert(user("alice", "a@x.com")).unwrap();
        store.insert(user("bob", "b@x.com")).unwrap();

        let names: Vec<String> = store
            .list_users()
            .unwrap()
            .into_iter()
            .map(|u| u.name)
            .collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let (store, _backend) = create_test_store();
        store.insert(user("alice", "a@x.com")).unwrap();

        let err = store.insert(user("alice", "other@x.com")).unwrap_err();
        assert!(matches!(err, CredentialError::DuplicateKey(UniqueField::Name)));
        assert_eq!(err.to_string(), "Username already exists");
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let (store, _backend) = create_test_store();
        store.insert(user("alice", "a@x.com")).unwrap();

        let err = store.insert(user("carol", "a@x.com")).unwrap_err();
        assert!(matches!(err, CredentialError::DuplicateKey(UniqueField::Email)));
        assert_eq!(store.len().unwrap(), 1);
    }

    #[test]
    fn test_name_checked_before_email() {
        let (store, _backend) = create_test_store();
        store.insert(user("alice", "a@x.com")).unwrap();

        let err = store.insert(user("alice", "a@x.com")).unwrap_err();
        assert!(matches!(err, CredentialError::DuplicateKey(UniqueField::Name)));
    }

    #[test]
    fn test_find_by_name_or_email() {
        let (store, _backend) = create_test_store();
        store.insert(user("alice", "a@x.com")).unwrap();

        assert_eq!(store.find_by_name_or_email("alice").unwrap().unwrap().email, "a@x.com");
        assert_eq!(store.find_by_name_or_email("a@x.com").unwrap().unwrap().name, "alice");
        assert!(store.find_by_name_or_email("bob").unwrap().is_none());
    }

    #[test]
    fn test_update_token() {
        let (store, _backend) = create_test_store();
        store.insert(user("alice", "a@x.com")).unwrap();

        let updated = store.update_token("alice", "new-token").unwrap().unwrap();
        assert_eq!(updated.token, "new-token");
        assert_eq!(store.find_by_token("new-token").unwrap().unwrap().name, "alice");
        assert!(store.find_by_token("tok").unwrap().is_none());

        assert!(store.update_token("nobody", "x").unwrap().is_none());
    }
}
