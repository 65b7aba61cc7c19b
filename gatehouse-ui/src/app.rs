//! App Root Component
//!
//! Provides global state, handles the fragment the page was opened with and
//! lays out the three top-level sections.

use leptos::*;

use crate::components::Toasts;
use crate::pages::{Dashboard, Login, Register};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let state = provide_global_state();

    // Runs once the sections are mounted, like DOMContentLoaded
    create_effect(move |_| state.page_load());

    view! {
        <div class="app">
            <Login />
            <Register />
            <Dashboard />

            <Toasts />
        </div>
    }
}
