//! Global Application State
//!
//! The auth workflow lives in a stored value; everything the views read is
//! mirrored into signals after each step.
//!
//! ```text
//! submit ──(submit delay)──▶ AuthFlow ──▶ toast
//!                               │
//!                               └──(redirect delay)──▶ complete ──▶ sync signals
//! ```

use gatehouse::notify::{TOAST_FADE, TOAST_VISIBLE};
use gatehouse::router::SIDEBAR_COLLAPSE_WIDTH;
use gatehouse::{
    show_toast, AuthCheck, AuthConfig, AuthError, AuthFlow, AuthOutcome, CurrentUser, Field,
    LoginForm, MemoryStore, RegistrationForm, Section, SharedStore, SocialProvider, Toast,
    ToastKind, ViewRouter,
};
use gloo_timers::callback::Timeout;
use leptos::*;
use std::rc::Rc;
use std::time::Duration;

use crate::state::local_storage::BrowserStorage;

/// Delay before a new toast gets its `show` class
const TOAST_ENTER: Duration = Duration::from_millis(10);

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    flow: StoredValue<AuthFlow>,
    /// Visible section, title, sidebar and active nav item
    pub router: RwSignal<ViewRouter>,
    /// Signed-in user for the dashboard header
    pub user: RwSignal<Option<CurrentUser>>,
    /// Identifier saved by "remember me", read once at startup
    pub remembered: RwSignal<Option<String>>,
    /// Toasts currently on screen
    pub toasts: RwSignal<Vec<ToastEntry>>,
    next_toast: StoredValue<u64>,
    /// A form submission is waiting out the simulated latency
    pub submitting: RwSignal<bool>,
    pub login_error: RwSignal<Option<FormError>>,
    pub register_error: RwSignal<Option<FormError>>,
}

/// A toast with its fade state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToastEntry {
    pub id: u64,
    pub toast: Toast,
    pub shown: bool,
}

impl ToastEntry {
    /// `toast toast-<kind>`, plus `show` once it has faded in
    pub fn class(&self) -> String {
        let mut class = format!("toast {}", self.toast.kind.class());
        if self.shown {
            class.push_str(" show");
        }
        class
    }
}

/// Message under a form and the inputs to outline in red
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    pub message: String,
    pub fields: Vec<Field>,
}

impl FormError {
    pub fn marks(&self, field: Field) -> bool {
        self.fields.contains(&field)
    }
}

impl From<&AuthError> for FormError {
    fn from(err: &AuthError) -> Self {
        Self {
            message: err.to_string(),
            fields: err.marked_fields(),
        }
    }
}

/// Provide global state to the component tree
pub fn provide_global_state() -> GlobalState {
    let store: SharedStore = match BrowserStorage::open() {
        Ok(storage) => Rc::new(storage),
        Err(e) => {
            web_sys::console::warn_1(&format!("Falling back to in-memory storage: {}", e).into());
            MemoryStore::shared()
        }
    };

    let flow = AuthFlow::new(store, AuthConfig::default());
    let remembered = flow.remembered_identifier().ok().flatten();

    let state = GlobalState {
        router: create_rw_signal(flow.router().clone()),
        flow: store_value(flow),
        user: create_rw_signal(None),
        remembered: create_rw_signal(remembered),
        toasts: create_rw_signal(Vec::new()),
        next_toast: store_value(0),
        submitting: create_rw_signal(false),
        login_error: create_rw_signal(None),
        register_error: create_rw_signal(None),
    };

    provide_context(state);
    state
}

impl GlobalState {
    fn with_flow<O>(&self, f: impl FnOnce(&mut AuthFlow) -> O) -> Option<O> {
        self.flow.try_update_value(f)
    }

    fn config(&self) -> AuthConfig {
        self.flow
            .try_with_value(|flow| flow.config().clone())
            .unwrap_or_default()
    }

    /// Handle the fragment the page was opened with
    pub fn page_load(&self) {
        let fragment = current_hash();
        match self.with_flow(|flow| flow.on_page_load(&fragment)) {
            Some(Ok(Some(AuthCheck::RedirectToLogin))) => {
                web_sys::console::log_1(&"No valid session, showing login".into());
            }
            Some(Err(e)) => self.report(&e),
            _ => {}
        }
        self.sync();
    }

    /// Register after the simulated latency
    pub fn submit_registration(&self, form: RegistrationForm) {
        let state = *self;
        self.register_error.set(None);
        self.submitting.set(true);

        after(self.config().submit_delay(), move || {
            let result = state.with_flow(|flow| flow.register(&form));
            state.submitting.set(false);
            match result {
                Some(Ok(outcome)) => state.apply(outcome),
                Some(Err(e)) => state.reject(state.register_error, &e),
                None => {}
            }
        });
    }

    /// Log in after the simulated latency
    pub fn submit_login(&self, form: LoginForm) {
        let state = *self;
        self.login_error.set(None);
        self.submitting.set(true);

        after(self.config().submit_delay(), move || {
            let result = state.with_flow(|flow| flow.login(&form));
            state.submitting.set(false);
            match result {
                Some(Ok(outcome)) => state.apply(outcome),
                Some(Err(e)) => state.reject(state.login_error, &e),
                None => {}
            }
        });
    }

    pub fn logout(&self) {
        match self.with_flow(|flow| flow.logout()) {
            Some(Ok(outcome)) => self.apply(outcome),
            Some(Err(e)) => self.report(&e),
            None => {}
        }
    }

    /// Login ↔ register links
    pub fn show_section(&self, section: Section) {
        self.login_error.set(None);
        self.register_error.set(None);
        self.with_flow(|flow| flow.switch_section(section));
        self.sync();
    }

    /// Sidebar link
    pub fn navigate(&self, section: Section) {
        let width = viewport_width();
        self.with_flow(|flow| flow.navigate(section, width));
        self.sync();
    }

    pub fn toggle_sidebar(&self) {
        self.with_flow(|flow| flow.toggle_sidebar());
        self.sync();
    }

    pub fn social_login(&self, provider: SocialProvider) {
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(provider.redirect_url()) {
                web_sys::console::error_1(&e);
            }
        }
    }

    /// Show a toast and schedule its fade-out and removal
    pub fn push_toast(&self, toast: Toast) {
        let id = self
            .next_toast
            .try_update_value(|next| {
                *next += 1;
                *next
            })
            .unwrap_or_default();
        self.toasts.update(|toasts| {
            toasts.push(ToastEntry {
                id,
                toast,
                shown: false,
            })
        });

        let toasts = self.toasts;
        after(TOAST_ENTER, move || set_shown(toasts, id, true));
        after(TOAST_VISIBLE, move || {
            set_shown(toasts, id, false);
            after(TOAST_FADE, move || {
                toasts.update(|toasts| toasts.retain(|entry| entry.id != id))
            });
        });
    }

    /// Toast now, section switch once the transition delay has passed
    fn apply(&self, outcome: AuthOutcome) {
        let state = *self;
        self.push_toast(outcome.toast);

        after(outcome.transition.after, move || {
            state.with_flow(|flow| flow.complete(outcome.transition));
            state.sync();
        });
    }

    fn reject(&self, target: RwSignal<Option<FormError>>, err: &AuthError) {
        if let AuthError::Storage(_) = err {
            self.report(err);
        }
        target.set(Some(FormError::from(err)));
    }

    fn report(&self, err: &AuthError) {
        web_sys::console::error_1(&format!("{}: {}", err.code(), err).into());
        self.push_toast(show_toast(err.to_string(), Some(ToastKind::Error)));
    }

    /// Copy the workflow's view state into the signals
    fn sync(&self) {
        let snapshot = self.with_flow(|flow| (flow.router().clone(), flow.profile()));
        let Some((router, profile)) = snapshot else {
            return;
        };

        if !router.fragment().is_empty() {
            set_hash(router.fragment());
        }
        self.router.set(router);

        match profile {
            Ok(user) => self.user.set(user),
            Err(e) => self.report(&e.into()),
        }
    }
}

fn set_shown(toasts: RwSignal<Vec<ToastEntry>>, id: u64, shown: bool) {
    toasts.update(|toasts| {
        if let Some(entry) = toasts.iter_mut().find(|entry| entry.id == id) {
            entry.shown = shown;
        }
    });
}

/// Run `f` once `delay` has elapsed
fn after(delay: Duration, f: impl FnOnce() + 'static) {
    Timeout::new(delay_ms(delay), f).forget();
}

fn delay_ms(delay: Duration) -> u32 {
    u32::try_from(delay.as_millis()).unwrap_or(u32::MAX)
}

fn current_hash() -> String {
    web_sys::window()
        .and_then(|window| window.location().hash().ok())
        .unwrap_or_default()
}

fn set_hash(fragment: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_hash(fragment) {
            web_sys::console::error_1(&e);
        }
    }
}

/// Window width in CSS pixels; wide enough to keep the sidebar when unknown
fn viewport_width() -> u32 {
    web_sys::window()
        .and_then(|window| window.inner_width().ok())
        .and_then(|width| width.as_f64())
        .map(|width| width as u32)
        .unwrap_or(SIDEBAR_COLLAPSE_WIDTH)
}
