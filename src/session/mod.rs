//! Sessions
//!
//! - **secret**: reversible secret encoding (not a real hash)
//! - **token**: unsigned three-part session tokens
//! - **context**: the single-session context and its status
//! - **manager**: session slots, current user and the dashboard gate

pub mod context;
pub mod manager;
pub mod secret;
pub mod token;

pub use context::{SessionContext, SessionStatus};
pub use manager::{AuthCheck, SessionManager};
pub use secret::{hash_secret, verify_secret};
pub use token::{issue_token, peek_payload, LoginClaims, RegistrationClaims, TokenHeader};
