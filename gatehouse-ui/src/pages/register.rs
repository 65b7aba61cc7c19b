//! Register Page
//!
//! Account creation with a live strength meter under the password field.

use gatehouse::{Field, RegistrationForm, Section};
use leptos::*;

use crate::components::{PasswordInput, StrengthMeter, SubmitButton};
use crate::state::GlobalState;

#[component]
pub fn Register() -> impl IntoView {
    let state = expect_context::<GlobalState>();

    let name = create_rw_signal(String::new());
    let email = create_rw_signal(String::new());
    let phone = create_rw_signal(String::new());
    let password = create_rw_signal(String::new());
    let confirm = create_rw_signal(String::new());
    let terms = create_rw_signal(false);

    let marked = move |field: Field| {
        state
            .register_error
            .with(|e| e.as_ref().is_some_and(|e| e.marks(field)))
    };

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        state.submit_registration(RegistrationForm {
            name: name.get(),
            email: email.get(),
            phone: phone.get(),
            password: password.get(),
            confirm_password: confirm.get(),
            terms_accepted: terms.get(),
        });
    };

    view! {
        <section id="register" class="section" class:active=move || state.router.with(|r| r.is_visible(Section::Register))>
            <div class="auth-card">
                <h2>"Create an account"</h2>

                <form class="register-form" on:submit=on_submit novalidate=true>
                    <TextField
                        name="name"
                        icon="fas fa-user"
                        placeholder="Full name"
                        value=name
                        invalid=Signal::derive(move || marked(Field::Name))
                    />
                    <TextField
                        name="email"
                        icon="fas fa-envelope"
                        placeholder="Email"
                        value=email
                        invalid=Signal::derive(move || marked(Field::Email))
                    />
                    <TextField
                        name="pNumber"
                        icon="fas fa-phone"
                        placeholder="Phone number"
                        value=phone
                        invalid=Signal::derive(move || marked(Field::Phone))
                    />

                    <PasswordInput
                        name="password"
                        placeholder="Password"
                        value=password
                        invalid=Signal::derive(move || marked(Field::Password))
                    />
                    <StrengthMeter password=password />

                    <PasswordInput
                        name="cPassword"
                        placeholder="Confirm password"
                        value=confirm
                        invalid=Signal::derive(move || marked(Field::ConfirmPassword))
                    />

                    <label class="checkbox" class:invalid=move || marked(Field::Terms)>
                        <input
                            type="checkbox"
                            name="terms"
                            prop:checked=move || terms.get()
                            on:change=move |ev| terms.set(event_target_checked(&ev))
                        />
                        <span>"I agree to the terms"</span>
                    </label>

                    <div
                        id="register-error"
                        class="form-error"
                        style:display=move || if state.register_error.with(Option::is_some) { "block" } else { "none" }
                    >
                        {move || state.register_error.with(|e| e.as_ref().map(|e| e.message.clone()).unwrap_or_default())}
                    </div>

                    <SubmitButton label="Register" loading=state.submitting />
                </form>

                <p class="switch-form">
                    "Already have an account? "
                    <a href="#login" on:click=move |ev| {
                        ev.prevent_default();
                        state.show_section(Section::Login);
                    }>
                        "Login"
                    </a>
                </p>
            </div>
        </section>
    }
}

#[component]
fn TextField(
    name: &'static str,
    icon: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
    #[prop(into)]
    invalid: Signal<bool>,
) -> impl IntoView {
    view! {
        <div class="input-with-icon">
            <i class=icon />
            <input
                type="text"
                name=name
                placeholder=placeholder
                class:invalid=move || invalid.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}
