//! Social login buttons

use gatehouse::SocialProvider;
use leptos::*;

use crate::state::GlobalState;

#[component]
pub fn SocialButtons() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    view! {
        <div class="social-login">
            {[SocialProvider::Google, SocialProvider::GitHub]
                .into_iter()
                .map(|provider| {
                    let icon = match provider {
                        SocialProvider::Google => "fab fa-google",
                        SocialProvider::GitHub => "fab fa-github",
                    };
                    view! {
                        <button
                            type="button"
                            class="btn btn-social"
                            on:click=move |_| state.social_login(provider)
                        >
                            <i class=icon />
                            <span>{provider.label()}</span>
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
