//! Session context
//!
//! One active session per context. The context owns the names of the session
//! slots and the current status; an unscoped context uses the plain browser
//! key names, a scoped one prefixes them so two sessions can share a backend.

use crate::storage::{AUTH_TOKEN_KEY, CURRENT_USER_KEY, REMEMBERED_USER_KEY};
use serde::Serialize;

/// Where a session stands
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum SessionStatus {
    #[default]
    Anonymous,
    Authenticated { name: String },
}

impl SessionStatus {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionStatus::Authenticated { .. })
    }
}

/// A single-session context
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    scope: Option<String>,
    status: SessionStatus,
}

impl SessionContext {
    /// Context using the unprefixed slot names
    pub fn new() -> Self {
        Self::default()
    }

    /// Context whose slot names are prefixed with `scope:`
    pub fn scoped(scope: impl Into<String>) -> Self {
        Self {
            scope: Some(scope.into()),
            status: SessionStatus::Anonymous,
        }
    }

    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub(crate) fn set_status(&mut self, status: SessionStatus) {
        self.status = status;
    }

    /// Key of the active token slot
    pub fn token_key(&self) -> String {
        self.key(AUTH_TOKEN_KEY)
    }

    /// Key of the `{name, email}` display slot
    pub fn current_user_key(&self) -> String {
        self.key(CURRENT_USER_KEY)
    }

    /// Key of the remembered login identifier
    pub fn remembered_user_key(&self) -> String {
        self.key(REMEMBERED_USER_KEY)
    }

    fn key(&self, base: &str) -> String {
        match &self.scope {
            Some(scope) => format!("{}:{}", scope, base),
            None => base.to_string(),
        }
    }
}
