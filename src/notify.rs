//! Toast notifications
//!
//! Front ends render these; the library only decides what to say.

use serde::Serialize;
use std::time::Duration;

/// How long a toast stays visible
pub const TOAST_VISIBLE: Duration = Duration::from_millis(3000);

/// Fade-out before the toast is removed
pub const TOAST_FADE: Duration = Duration::from_millis(300);

/// Toast flavour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

impl ToastKind {
    /// CSS modifier class, `toast-<kind>`
    pub fn class(&self) -> &'static str {
        match self {
            ToastKind::Success => "toast-success",
            ToastKind::Error => "toast-error",
            ToastKind::Warning => "toast-warning",
            ToastKind::Info => "toast-info",
        }
    }
}

/// A message for the toast area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: impl Into<String>, kind: ToastKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Success)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Error)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, ToastKind::Info)
    }
}

/// Entry point matching the page collaborator's `showToast(message, kind)`
pub fn show_toast(message: impl Into<String>, kind: Option<ToastKind>) -> Toast {
    let toast = Toast::new(message, kind.unwrap_or_default());
    tracing::debug!(kind = ?toast.kind, message = %toast.message, "Toast");
    toast
}
