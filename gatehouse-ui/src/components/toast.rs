//! Toast Notification Component
//!
//! Renders the toasts queued in global state. Fade-in and removal are timed
//! by the state; this only maps each entry to its classes.

use gatehouse::ToastKind;
use leptos::*;

use crate::state::{GlobalState, ToastEntry};

/// Toast notification container
#[component]
pub fn Toasts() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="toast-container">
            <For
                each=move || state.toasts.get()
                key=|entry| entry.id
                children=move |entry| view! { <ToastMessage entry=entry /> }
            />
        </div>
    }
}

#[component]
fn ToastMessage(entry: ToastEntry) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let id = entry.id;

    // Re-read the entry so the `show` class toggles on the same element
    let class = move || {
        state.toasts.with(|toasts| {
            toasts
                .iter()
                .find(|t| t.id == id)
                .map(ToastEntry::class)
                .unwrap_or_default()
        })
    };

    view! {
        <div class=class role="status">
            <span class="toast-icon">{icon(entry.toast.kind)}</span>
            <span class="toast-message">{entry.toast.message}</span>
        </div>
    }
}

fn icon(kind: ToastKind) -> &'static str {
    match kind {
        ToastKind::Success => "✓",
        ToastKind::Error => "✕",
        ToastKind::Warning => "⚠",
        ToastKind::Info => "ℹ",
    }
}
