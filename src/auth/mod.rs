//! Auth workflow and its error types
//!
//! ```text
//! submit → validate → credential store → session → toast + delayed transition
//! ```

pub mod error;
pub mod flow;
pub mod social;

pub use error::{AuthError, AuthResult, INVALID_CREDENTIALS};
pub use flow::{AuthFlow, AuthOutcome, Transition};
pub use social::SocialProvider;
