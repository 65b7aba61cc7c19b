//! Loading Component
//!
//! Spinner shown inside a submit button while the form waits out the
//! simulated latency.

use leptos::*;

/// Submit button with an inline spinner
#[component]
pub fn SubmitButton(
    label: &'static str,
    #[prop(into)]
    loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
            <span>{label}</span>
            <InlineLoading loading=loading />
        </button>
    }
}

/// Inline loading spinner
#[component]
pub fn InlineLoading(
    #[prop(into)]
    loading: Signal<bool>,
) -> impl IntoView {
    view! {
        <i
            class="loading-icon fas fa-spinner fa-spin"
            style:display=move || if loading.get() { "inline-block" } else { "none" }
        />
    }
}
