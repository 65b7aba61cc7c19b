//! # Gatehouse
//!
//! Account registration, login and a post-login dashboard shell over a
//! `localStorage`-style key-value store.
//!
//! ## Features
//!
//! - **Form validation**: ordered field checks and a password strength meter
//! - **Credential store**: user list persisted as one JSON blob per backend
//! - **Sessions**: opaque tokens, one active session per context
//! - **View routing**: exclusive sections, fragments and page titles
//!
//! Secrets are base64-encoded and tokens are unsigned. Nothing here is
//! suitable for protecting real accounts.
//!
//! ## Modules
//!
//! - [`validation`]: registration/login checks and password strength
//! - [`storage`]: key-value backends and the credential store
//! - [`session`]: secret encoding, tokens and the session manager
//! - [`router`]: section switching and page titles
//! - [`auth`]: the register/login/logout workflow
//!
//! ## Quick Start
//!
//! ```rust
//! use gatehouse::{AuthConfig, AuthFlow, MemoryStore, RegistrationForm, Section};
//!
//! let mut flow = AuthFlow::new(MemoryStore::shared(), AuthConfig::immediate());
//!
//! let outcome = flow.register(&RegistrationForm {
//!     name: "alice".into(),
//!     email: "a@x.com".into(),
//!     phone: "1234567890".into(),
//!     password: "Abcd123!".into(),
//!     confirm_password: "Abcd123!".into(),
//!     terms_accepted: true,
//! })?;
//!
//! flow.complete(outcome.transition);
//! assert!(flow.router().is_visible(Section::Dashboard));
//! # Ok::<(), gatehouse::AuthError>(())
//! ```

pub mod auth;
pub mod config;
#[cfg(feature = "native")]
pub mod logging;
pub mod notify;
pub mod router;
pub mod session;
pub mod storage;
pub mod validation;

// Re-export top-level types for convenience
pub use auth::{AuthError, AuthFlow, AuthOutcome, AuthResult, SocialProvider, Transition};

pub use config::{AuthConfig, BackendKind, Config, ConfigError, LoggingConfig, StorageConfig};

pub use notify::{show_toast, Toast, ToastKind};

pub use router::{title_for, Section, ViewRouter};

pub use session::{
    hash_secret, issue_token, verify_secret, AuthCheck, SessionContext, SessionManager,
    SessionStatus,
};

pub use storage::{
    CredentialStore, CurrentUser, KeyValueStore, MemoryStore, SharedStore, StorageError,
    StorageResult, User,
};

pub use validation::{
    validate_login, validate_registration, Field, LoginForm, PasswordStrength,
    RegistrationForm, StrengthTier, ValidationError,
};
