//! Session tokens
//!
//! Tokens look like a JWT (`header.payload.signature`, each part base64) but
//! the last part is random bytes, not a signature. They identify a session by
//! equality only and cannot be verified.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Fixed token header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Payload issued at registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationClaims {
    pub name: String,
    pub email: String,
}

/// Payload issued at login
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginClaims {
    pub name: String,
}

/// Build a token from an arbitrary serializable payload
pub fn issue_token<P: Serialize>(payload: &P) -> serde_json::Result<String> {
    let header = STANDARD.encode(serde_json::to_string(&TokenHeader::default())?);
    let body = STANDARD.encode(serde_json::to_string(payload)?);
    let suffix = STANDARD.encode(uuid::Uuid::new_v4().simple().to_string());

    Ok(format!("{}.{}.{}", header, body, suffix))
}

/// Decode the payload part of a token. `None` when the token is not three
/// parts or the payload does not decode into `T`.
pub fn peek_payload<T: DeserializeOwned>(token: &str) -> Option<T> {
    let mut parts = token.split('.');
    let (_, payload, _, None) = (parts.next()?, parts.next()?, parts.next()?, parts.next()) else {
        return None;
    };

    let bytes = STANDARD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}
