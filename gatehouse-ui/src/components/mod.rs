//! UI Components
//!
//! Reusable Leptos components for the auth forms and the dashboard shell.

pub mod loading;
pub mod nav;
pub mod password_input;
pub mod social;
pub mod strength_meter;
pub mod toast;

pub use loading::SubmitButton;
pub use nav::{Header, Sidebar};
pub use password_input::PasswordInput;
pub use social::SocialButtons;
pub use strength_meter::StrengthMeter;
pub use toast::Toasts;
