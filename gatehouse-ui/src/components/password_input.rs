//! Password field with a show/hide toggle

use leptos::*;

#[component]
pub fn PasswordInput(
    name: &'static str,
    placeholder: &'static str,
    value: RwSignal<String>,
    #[prop(into)]
    invalid: Signal<bool>,
) -> impl IntoView {
    let (visible, set_visible) = create_signal(false);

    view! {
        <div class="input-with-icon">
            <i class="fas fa-lock" />
            <input
                type=move || if visible.get() { "text" } else { "password" }
                name=name
                placeholder=placeholder
                class:invalid=move || invalid.get()
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
            <button
                type="button"
                class="toggle-password"
                aria-label="Show password"
                on:click=move |_| set_visible.update(|v| *v = !*v)
            >
                <i class=move || if visible.get() { "fas fa-eye-slash" } else { "fas fa-eye" } />
            </button>
        </div>
    }
}
