//! Core data types for the credential store
//!
//! - `User`: one registered account as persisted under the `users` key
//! - `CurrentUser`: the `{name, email}` display record for the active session
//! - storage key names shared by every backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Key holding the serialized user list
pub const USERS_KEY: &str = "users";
/// Key holding the active session token
pub const AUTH_TOKEN_KEY: &str = "authToken";
/// Key holding the serialized `{name, email}` of the signed-in user
pub const CURRENT_USER_KEY: &str = "currentUser";
/// Key holding the last login identifier when "remember me" was checked
pub const REMEMBERED_USER_KEY: &str = "rememberedUser";

/// A registered account
///
/// Field names on the wire match the browser profile layout so records
/// written by the web front end and the CLI are interchangeable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique display name
    pub name: String,
    /// Unique email address
    pub email: String,
    /// Ten-digit phone number
    #[serde(rename = "pNumber")]
    pub phone: String,
    /// Encoded secret (see `session::hash_secret`)
    pub password: String,
    /// Token issued at the last register/login
    pub token: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl User {
    /// Create a new record stamped with the current time
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        password: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            password: password.into(),
            token: token.into(),
            created_at: Utc::now(),
            last_login: None,
        }
    }

    /// True when `identifier` is this user's name or email
    pub fn answers_to(&self, identifier: &str) -> bool {
        self.name == identifier || self.email == identifier
    }

    /// The display record for this user
    pub fn current(&self) -> CurrentUser {
        CurrentUser {
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Minimal display record for the signed-in user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CurrentUser {
    pub name: String,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_wire_names() {
        let user = User::new("alice", "a@x.com", "1234567890", "QWJjZDEyMyE=", "t.o.k");
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["pNumber"], "1234567890");
        assert!(json.get("createdAt").is_some());
        assert!(json["lastLogin"].is_null());
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_user_reads_browser_record() {
        let raw = r#"{
            "name": "bob",
            "email": "b@x.com",
            "pNumber": "0987654321",
            "password": "cGFzcw==",
            "token": "abc",
            "createdAt": "2024-03-01T10:00:00.000Z",
            "lastLogin": null
        }"#;
        let user: User = serde_json::from_str(raw).unwrap();

        assert_eq!(user.name, "bob");
        assert_eq!(user.phone, "0987654321");
        assert!(user.last_login.is_none());
    }

    #[test]
    fn test_answers_to() {
        let user = User::new("alice", "a@x.com", "1234567890", "x", "t");

        assert!(user.answers_to("alice"));
        assert!(user.answers_to("a@x.com"));
        assert!(!user.answers_to("Alice"));
        assert_eq!(
            user.current(),
            CurrentUser {
                name: "alice".into(),
                email: "a@x.com".into()
            }
        );
    }
}
