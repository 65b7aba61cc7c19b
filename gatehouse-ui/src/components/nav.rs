//! Navigation Components
//!
//! Dashboard sidebar with the section links and logout, and the header with
//! the sidebar toggle, page title and user name.

use gatehouse::Section;
use leptos::*;

use crate::state::GlobalState;

/// Sidebar navigation
#[component]
pub fn Sidebar() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <aside class="sidebar" class:active=move || state.router.with(|r| r.sidebar_open())>
            <div class="sidebar-brand">
                <i class="fas fa-shield-halved" />
                <span>"Gatehouse"</span>
            </div>

            <ul class="nav-list">
                {Section::nav_items()
                    .iter()
                    .copied()
                    .map(|section| view! { <NavItem section=section /> })
                    .collect_view()}
            </ul>

            <button class="logout-btn" on:click=move |_| state.logout()>
                <i class="fas fa-sign-out-alt" />
                <span>"Logout"</span>
            </button>
        </aside>
    }
}

/// Individual navigation link
#[component]
fn NavItem(section: Section) -> impl IntoView {
    let state = expect_context::<GlobalState>();
    let label = gatehouse::title_for(&section.fragment());

    view! {
        <li
            class="nav-item"
            class:active=move || state.router.with(|r| r.active_nav() == section)
        >
            <a
                href=section.fragment()
                data-page=section.id()
                on:click=move |ev| {
                    ev.prevent_default();
                    state.navigate(section);
                }
            >
                {label}
            </a>
        </li>
    }
}

/// Dashboard header
#[component]
pub fn Header() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <header class="dashboard-header">
            <button class="sidebar-toggle" aria-label="Toggle sidebar" on:click=move |_| state.toggle_sidebar()>
                <i class="fas fa-bars" />
            </button>
            <h1 class="page-title">{move || state.router.with(|r| r.page_title())}</h1>
            <span id="header-username">
                {move || state.user.with(|u| u.as_ref().map(|u| u.name.clone()).unwrap_or_default())}
            </span>
        </header>
    }
}
