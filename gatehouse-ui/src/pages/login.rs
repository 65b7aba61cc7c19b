//! Login Page
//!
//! Name-or-email login with "remember me". A remembered identifier prefills
//! the form and pre-ticks the checkbox.

use gatehouse::{Field, LoginForm, Section};
use leptos::*;

use crate::components::{PasswordInput, SocialButtons, SubmitButton};
use crate::state::GlobalState;

#[component]
pub fn Login() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let remembered = state.remembered.get_untracked();
    let identifier = create_rw_signal(remembered.clone().unwrap_or_default());
    let password = create_rw_signal(String::new());
    let remember = create_rw_signal(remembered.is_some());

    let marked = move |field: Field| {
        state
            .login_error
            .with(|e| e.as_ref().is_some_and(|e| e.marks(field)))
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        state.submit_login(LoginForm {
            identifier: identifier.get(),
            password: password.get(),
            remember: remember.get(),
        });
    };

    view! {
        <section id="login" class="section" class:active=move || state.router.with(|r| r.is_visible(Section::Login))>
            <div class="auth-card">
                <h2>"Welcome back"</h2>

                <form class="login-form" on:submit=on_submit novalidate=true>
                    <div class="input-with-icon">
                        <i class="fas fa-user" />
                        <input
                            type="text"
                            name="username"
                            placeholder="Username or email"
                            class:invalid=move || marked(Field::Identifier)
                            prop:value=move || identifier.get()
                            on:input=move |ev| identifier.set(event_target_value(&ev))
                        />
                    </div>

                    <PasswordInput
                        name="password"
                        placeholder="Password"
                        value=password
                        invalid=Signal::derive(move || marked(Field::Password))
                    />

                    <label class="checkbox">
                        <input
                            type="checkbox"
                            name="remember"
                            prop:checked=move || remember.get()
                            on:change=move |ev| remember.set(event_target_checked(&ev))
                        />
                        <span>"Remember me"</span>
                    </label>

                    <div
                        id="login-error"
                        class="form-error"
                        style:display=move || if state.login_error.with(Option::is_some) { "block" } else { "none" }
                    >
                        {move || state.login_error.with(|e| e.as_ref().map(|e| e.message.clone()).unwrap_or_default())}
                    </div>

                    <SubmitButton label="Login" loading=state.submitting />
                </form>

                <SocialButtons />

                <p class="switch-form">
                    "Don't have an account? "
                    <a href="#register" on:click=move |ev| {
                        ev.prevent_default();
                        state.show_section(Section::Register);
                    }>
                        "Register"
                    </a>
                </p>
            </div>
        </section>
    }
}
