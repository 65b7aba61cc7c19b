//! Session Manager
//!
//! Owns the session context and the session slots in the backing store, and
//! gates the dashboard.
//!
//! ```text
//! Anonymous ──register/login──► Authenticated
//!     ▲                              │
//!     └──logout / token matches no user on dashboard load
//! ```

use crate::session::{SessionContext, SessionStatus};
use crate::storage::{CredentialStore, CurrentUser, SharedStore, StorageResult, User, USERS_KEY};

/// Result of the dashboard gate
#[derive(Debug, Clone, PartialEq)]
pub enum AuthCheck {
    /// The active token belongs to this user
    Authenticated(User),
    /// No usable session; storage has been cleared
    RedirectToLogin,
}

/// Issues, tracks and ends the session of one context
pub struct SessionManager {
    store: SharedStore,
    credentials: CredentialStore,
    context: SessionContext,
}

impl SessionManager {
    pub fn new(store: SharedStore, context: SessionContext) -> Self {
        Self {
            credentials: CredentialStore::new(store.clone()),
            store,
            context,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn context(&self) -> &SessionContext {
        &self.context
    }

    pub fn status(&self) -> &SessionStatus {
        self.context.status()
    }

    /// The token in the active slot
    pub fn active_token(&self) -> StorageResult<Option<String>> {
        Ok(self
            .store
            .get(&self.context.token_key())?
            .filter(|t| !t.is_empty()))
    }

    /// The user whose stored token equals the active token
    pub fn current_user(&self) -> StorageResult<Option<User>> {
        match self.active_token()? {
            Some(token) => self.credentials.find_by_token(&token),
            None => Ok(None),
        }
    }

    /// The `{name, email}` display record, if one is stored and readable
    pub fn stored_current_user(&self) -> StorageResult<Option<CurrentUser>> {
        let raw = self.store.get(&self.context.current_user_key())?;
        Ok(raw.and_then(|r| serde_json::from_str(&r).ok()))
    }

    /// Sync the status with what is already stored, without clearing anything.
    /// Used when a front end starts on an existing profile.
    pub fn resume(&mut self) -> StorageResult<&SessionStatus> {
        let status = match self.current_user()? {
            Some(user) => SessionStatus::Authenticated { name: user.name },
            None => SessionStatus::Anonymous,
        };
        self.context.set_status(status);
        Ok(self.context.status())
    }

    /// Make `user` (already holding its new token) the active session
    pub fn begin(&mut self, user: &User) -> StorageResult<()> {
        self.store.set(&self.context.token_key(), &user.token)?;
        self.store.set(
            &self.context.current_user_key(),
            &serde_json::to_string(&user.current())?,
        )?;

        self.context.set_status(SessionStatus::Authenticated {
            name: user.name.clone(),
        });
        tracing::debug!(name = %user.name, scope = ?self.context.scope(), "Session started");
        Ok(())
    }

    /// Store the login identifier, or forget it when `None`
    pub fn remember(&self, identifier: Option<&str>) -> StorageResult<()> {
        let key = self.context.remembered_user_key();
        match identifier {
            Some(id) => self.store.set(&key, id),
            None => self.store.remove(&key),
        }
    }

    /// Identifier saved by "remember me", for pre-filling the login form
    pub fn remembered_user(&self) -> StorageResult<Option<String>> {
        self.store.get(&self.context.remembered_user_key())
    }

    /// End the session by clearing the user list and every session slot
    pub fn end(&mut self) -> StorageResult<()> {
        self.store.remove(USERS_KEY)?;
        self.store.remove(&self.context.token_key())?;
        self.store.remove(&self.context.current_user_key())?;
        self.store.remove(&self.context.remembered_user_key())?;

        self.context.set_status(SessionStatus::Anonymous);
        tracing::debug!(scope = ?self.context.scope(), "Session cleared");
        Ok(())
    }

    /// Dashboard gate. A token that matches no stored user (or no token at
    /// all) clears the session and asks for the login section; it is never
    /// an error.
    pub fn check_auth(&mut self) -> StorageResult<AuthCheck> {
        match self.current_user()? {
            Some(user) => {
                self.context.set_status(SessionStatus::Authenticated {
                    name: user.name.clone(),
                });
                Ok(AuthCheck::Authenticated(user))
            }
            None => {
                tracing::info!("No valid session, redirecting to login");
                self.end()?;
                Ok(AuthCheck::RedirectToLogin)
            }
        }
    }
}
