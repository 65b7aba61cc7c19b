//! Dashboard Page
//!
//! Post-login shell: sidebar, header and one panel per sidebar section. Only
//! the panel for the visible section is shown.

use gatehouse::Section;
use leptos::*;

use crate::components::{Header, Sidebar};
use crate::state::GlobalState;

/// Dashboard shell component
#[component]
pub fn Dashboard() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let in_shell = move || {
        state
            .router
            .with(|r| !matches!(r.active(), Section::Login | Section::Register))
    };

    view! {
        <div class="dashboard-shell" style:display=move || if in_shell() { "flex" } else { "none" }>
            <Sidebar />

            <main class="dashboard-main">
                <Header />

                {Section::nav_items()
                    .iter()
                    .copied()
                    .map(|section| view! { <Panel section=section /> })
                    .collect_view()}
            </main>
        </div>
    }
}

#[component]
fn Panel(section: Section) -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let body = match section {
        Section::Dashboard | Section::Profile => view! { <ProfileCard /> }.into_view(),
        _ => view! {
            <p class="placeholder">{format!("{} will appear here.", gatehouse::title_for(&section.fragment()))}</p>
        }
        .into_view(),
    };

    view! {
        <section
            id=section.id()
            class="section"
            class:active=move || state.router.with(|r| r.is_visible(section))
        >
            {body}
        </section>
    }
}

/// Name and email of the signed-in user
#[component]
fn ProfileCard() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="profile-card">
            <h2 id="dashboard-username">
                {move || state.user.with(|u| u.as_ref().map(|u| u.name.clone()).unwrap_or_default())}
            </h2>
            <p id="dashboard-email">
                {move || state.user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default())}
            </p>
        </div>
    }
}
