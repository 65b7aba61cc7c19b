//! Password strength meter
//!
//! Three segments and a label under the registration password field.

use gatehouse::PasswordStrength;
use leptos::*;

#[component]
pub fn StrengthMeter(
    #[prop(into)]
    password: Signal<String>,
) -> impl IntoView {
    let strength = create_memo(move |_| password.with(|p| PasswordStrength::of(p)));

    view! {
        <div class="password-strength">
            <div class="strength-bar">
                {move || {
                    strength
                        .get()
                        .segment_colors()
                        .into_iter()
                        .map(|color| view! {
                            <span class="strength-segment" style:background-color=color />
                        })
                        .collect_view()
                }}
            </div>
            <span
                id="strength-text"
                style:color=move || strength.get().tier.color()
            >
                {move || strength.get().tier.label()}
            </span>
        </div>
    }
}
