//! Auth workflow
//!
//! What the page collaborator calls: register, login, the dashboard gate,
//! logout, page-load handling and navigation. Each submission is
//! synchronous; the front end owns the simulated latency before calling in
//! and the delay before applying the returned [`Transition`].

use crate::auth::{AuthError, AuthResult};
use crate::config::AuthConfig;
use crate::notify::Toast;
use crate::router::{Section, ViewRouter};
use crate::session::{
    hash_secret, issue_token, verify_secret, AuthCheck, LoginClaims, RegistrationClaims,
    SessionContext, SessionManager,
};
use crate::storage::{CurrentUser, SharedStore, StorageResult, User};
use crate::validation::{validate_login, validate_registration, LoginForm, RegistrationForm};
use chrono::Utc;
use std::time::Duration;

/// A section switch to apply after a delay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub to: Section,
    pub after: Duration,
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthOutcome {
    /// Signed-in user, `None` after logout
    pub user: Option<CurrentUser>,
    pub toast: Toast,
    pub transition: Transition,
}

/// Registration, login and session gate over one session context
pub struct AuthFlow {
    session: SessionManager,
    router: ViewRouter,
    config: AuthConfig,
}

impl AuthFlow {
    pub fn new(store: SharedStore, config: AuthConfig) -> Self {
        let context = match &config.session_scope {
            Some(scope) => SessionContext::scoped(scope.clone()),
            None => SessionContext::new(),
        };

        Self {
            session: SessionManager::new(store, context),
            router: ViewRouter::default(),
            config,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn router(&self) -> &ViewRouter {
        &self.router
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Register a new account and start its session
    pub fn register(&mut self, form: &RegistrationForm) -> AuthResult<AuthOutcome> {
        if let Err(e) = validate_registration(form) {
            tracing::debug!(field = ?e.field, "Registration rejected: {}", e);
            return Err(e.into());
        }
        let form = form.normalized();

        let token = issue_token(&RegistrationClaims {
            name: form.name.clone(),
            email: form.email.clone(),
        })?;
        let user = User::new(
            &form.name,
            &form.email,
            &form.phone,
            hash_secret(&form.password),
            token,
        );

        if let Err(e) = self.session.credentials().insert(user.clone()) {
            tracing::debug!("Registration rejected: {}", e);
            return Err(e.into());
        }
        self.session.begin(&user)?;

        tracing::info!(name = %user.name, "User registered");
        Ok(AuthOutcome {
            user: Some(user.current()),
            toast: Toast::success("Registration successful!"),
            transition: Transition {
                to: Section::Dashboard,
                after: self.config.redirect_delay(),
            },
        })
    }

    /// Log in by name or email
    pub fn login(&mut self, form: &LoginForm) -> AuthResult<AuthOutcome> {
        validate_login(form)?;
        let identifier = form.identifier.trim();

        let matched = self
            .session
            .credentials()
            .list_users()?
            .into_iter()
            .find(|u| u.answers_to(identifier) && verify_secret(&form.password, &u.password));

        let Some(user) = matched else {
            tracing::warn!(identifier = %identifier, "Login failed: invalid credentials");
            return Err(AuthError::InvalidCredentials);
        };

        let token = issue_token(&LoginClaims {
            name: user.name.clone(),
        })?;
        let now = Utc::now();
        let user = self
            .session
            .credentials()
            .update(&user.name, |u| {
                u.last_login = Some(now);
                u.token = token;
            })?
            .ok_or(AuthError::InvalidCredentials)?;

        self.session.begin(&user)?;
        self.session
            .remember(form.remember.then_some(identifier))?;

        tracing::info!(name = %user.name, remember = form.remember, "User logged in");
        Ok(AuthOutcome {
            user: Some(user.current()),
            toast: Toast::success("Login successful!"),
            transition: Transition {
                to: Section::Dashboard,
                after: self.config.redirect_delay(),
            },
        })
    }

    /// Dashboard gate; switches to the login section when there is no valid
    /// session
    pub fn check_auth(&mut self) -> AuthResult<AuthCheck> {
        let check = self.session.check_auth()?;
        if check == AuthCheck::RedirectToLogin {
            self.router.switch_section(Section::Login);
        }
        Ok(check)
    }

    /// End the session. Clears the user list and every session slot.
    pub fn logout(&mut self) -> AuthResult<AuthOutcome> {
        let name = self.session.current_user()?.map(|u| u.name);
        self.session.end()?;

        tracing::info!(name = ?name, "User logged out");
        Ok(AuthOutcome {
            user: None,
            toast: Toast::success("Logged out"),
            transition: Transition {
                to: Section::Login,
                after: self.config.logout_delay(),
            },
        })
    }

    /// Handle the address fragment present when the page loads.
    ///
    /// `#dashboard` runs the gate and, when it passes, loads the dashboard
    /// title. Any other known section is shown as-is; unknown fragments keep
    /// the login section.
    pub fn on_page_load(&mut self, fragment: &str) -> AuthResult<Option<AuthCheck>> {
        if fragment == Section::Dashboard.fragment() {
            let check = self.check_auth()?;
            if let AuthCheck::Authenticated(_) = check {
                self.router.switch_section(Section::Dashboard);
                self.router.load_content(fragment);
            }
            return Ok(Some(check));
        }

        self.session.resume()?;
        if let Ok(section) = fragment.parse::<Section>() {
            self.router.switch_section(section);
        }
        Ok(None)
    }

    /// Apply a transition whose delay has elapsed
    pub fn complete(&mut self, transition: Transition) {
        self.router.switch_section(transition.to);
    }

    /// Show a section directly (login ↔ register links)
    pub fn switch_section(&mut self, section: Section) {
        self.router.switch_section(section);
    }

    /// Set the dashboard title for `path`
    pub fn load_content(&mut self, path: &str) -> &'static str {
        self.router.load_content(path)
    }

    /// Follow a sidebar link
    pub fn navigate(&mut self, section: Section, viewport_width: u32) {
        self.router.navigate(section, viewport_width);
    }

    pub fn toggle_sidebar(&mut self) {
        self.router.toggle_sidebar();
    }

    /// Name and email for the dashboard header
    pub fn profile(&self) -> StorageResult<Option<CurrentUser>> {
        Ok(self.session.current_user()?.map(|u| u.current()))
    }

    /// Identifier saved by "remember me"
    pub fn remembered_identifier(&self) -> StorageResult<Option<String>> {
        self.session.remembered_user()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{peek_payload, SessionStatus};
    use crate::storage::{KeyValueStore, MemoryStore};
    use crate::validation::Field;
    use std::rc::Rc;

    fn create_test_flow() -> (AuthFlow, Rc<MemoryStore>) {
        let backend = Rc::new(MemoryStore::new());
        let flow = AuthFlow::new(backend.clone(), AuthConfig::default());
        (flow, backend)
    }

    fn alice_form() -> RegistrationForm {
        RegistrationForm {
            name: "alice".into(),
            email: "a@x.com".into(),
            phone: "1234567890".into(),
            password: "Abcd123!".into(),
            confirm_password: "Abcd123!".into(),
            terms_accepted: true,
        }
    }

    fn login_form(identifier: &str, password: &str, remember: bool) -> LoginForm {
        LoginForm {
            identifier: identifier.into(),
            password: password.into(),
            remember,
        }
    }

    fn user_count(flow: &AuthFlow) -> usize {
        flow.session().credentials().len().unwrap()
    }

    #[test]
    fn test_register_alice() {
        let (mut flow, backend) = create_test_flow();

        let outcome = flow.register(&alice_form()).unwrap();

        assert_eq!(user_count(&flow), 1);
        let token = backend.get("authToken").unwrap().unwrap();
        assert!(!token.is_empty());

        let stored = flow.session().credentials().find_by_name_or_email("alice").unwrap().unwrap();
        assert!(verify_secret("Abcd123!", &stored.password));
        assert_eq!(stored.token, token);
        assert!(stored.last_login.is_none());

        let claims: RegistrationClaims = peek_payload(&token).unwrap();
        assert_eq!(claims.email, "a@x.com");

        assert_eq!(outcome.toast, Toast::success("Registration successful!"));
        assert_eq!(
            outcome.transition,
            Transition {
                to: Section::Dashboard,
                after: Duration::from_millis(1500)
            }
        );

        flow.complete(outcome.transition);
        assert!(flow.router().is_visible(Section::Dashboard));
        assert_eq!(
            flow.profile().unwrap(),
            Some(CurrentUser {
                name: "alice".into(),
                email: "a@x.com".into()
            })
        );
    }

    #[test]
    fn test_register_duplicate_leaves_store_unchanged() {
        let (mut flow, _backend) = create_test_flow();
        flow.register(&alice_form()).unwrap();

        let mut same_name = alice_form();
        same_name.email = "other@x.com".into();
        let err = flow.register(&same_name).unwrap_err();
        assert!(matches!(err, AuthError::DuplicateKey(_)));
        assert_eq!(err.marked_fields(), vec![Field::Name]);

        let mut same_email = alice_form();
        same_email.name = "alicia".into();
        let err = flow.register(&same_email).unwrap_err();
        assert_eq!(err.to_string(), "Email already exists");

        assert_eq!(user_count(&flow), 1);
    }

    #[test]
    fn test_register_invalid_form_mutates_nothing() {
        let (mut flow, backend) = create_test_flow();
        let mut form = alice_form();
        form.phone = "123".into();

        let err = flow.register(&form).unwrap_err();

        assert!(matches!(err, AuthError::Validation(_)));
        assert!(backend.is_empty());
        assert_eq!(flow.session().status(), &SessionStatus::Anonymous);
    }

    #[test]
    fn test_login_by_name_and_email() {
        let (mut flow, backend) = create_test_flow();
        flow.register(&alice_form()).unwrap();
        let registration_token = backend.get("authToken").unwrap().unwrap();

        let outcome = flow.login(&login_form("a@x.com", "Abcd123!", false)).unwrap();

        assert_eq!(outcome.toast.message, "Login successful!");
        assert_eq!(
            flow.session().status(),
            &SessionStatus::Authenticated {
                name: "alice".into()
            }
        );
        assert_eq!(
            flow.session().stored_current_user().unwrap().unwrap().email,
            "a@x.com"
        );

        let token = backend.get("authToken").unwrap().unwrap();
        assert_ne!(token, registration_token);
        let stored = flow.session().credentials().find_by_token(&token).unwrap().unwrap();
        assert!(stored.last_login.is_some());
        let claims: LoginClaims = peek_payload(&token).unwrap();
        assert_eq!(claims.name, "alice");

        assert!(flow.login(&login_form("alice", "Abcd123!", false)).is_ok());
    }

    #[test]
    fn test_login_wrong_secret_changes_nothing() {
        let (mut flow, backend) = create_test_flow();
        flow.register(&alice_form()).unwrap();
        let users_before = backend.get("users").unwrap();
        let token_before = backend.get("authToken").unwrap();

        let err = flow.login(&login_form("alice", "Abcd123?", true)).unwrap_err();

        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(err.marked_fields(), vec![Field::Identifier, Field::Password]);
        assert_eq!(backend.get("users").unwrap(), users_before);
        assert_eq!(backend.get("authToken").unwrap(), token_before);
        assert!(backend.get("rememberedUser").unwrap().is_none());
    }

    #[test]
    fn test_login_identifier_is_trimmed() {
        let (mut flow, backend) = create_test_flow();
        flow.register(&alice_form()).unwrap();

        flow.login(&login_form("  alice ", "Abcd123!", true)).unwrap();

        assert_eq!(backend.get("rememberedUser").unwrap().as_deref(), Some("alice"));
        assert!(flow.login(&login_form("alice", " Abcd123!", false)).is_err());
    }

    #[test]
    fn test_login_unknown_user() {
        let (mut flow, _backend) = create_test_flow();

        let err = flow.login(&login_form("nobody", "Abcd123!", false)).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
    }

    #[test]
    fn test_login_validation() {
        let (mut flow, _backend) = create_test_flow();

        let err = flow.login(&login_form("", "x", false)).unwrap_err();
        assert_eq!(err.marked_fields(), vec![Field::Identifier]);
    }

    #[test]
    fn test_remember_me() {
        let (mut flow, _backend) = create_test_flow();
        flow.register(&alice_form()).unwrap();

        flow.login(&login_form(" alice ", "Abcd123!", true)).unwrap();
        assert_eq!(flow.remembered_identifier().unwrap().as_deref(), Some("alice"));

        flow.login(&login_form("alice", "Abcd123!", false)).unwrap();
        assert!(flow.remembered_identifier().unwrap().is_none());
    }

    #[test]
    fn test_new_login_invalidates_previous_token() {
        let (mut flow, backend) = create_test_flow();
        flow.register(&alice_form()).unwrap();
        let mut bob = alice_form();
        bob.name = "bob".into();
        bob.email = "b@x.com".into();
        flow.register(&bob).unwrap();

        flow.login(&login_form("alice", "Abcd123!", false)).unwrap();

        let token = backend.get("authToken").unwrap().unwrap();
        let holders: Vec<String> = flow
            .session()
            .credentials()
            .list_users()
            .unwrap()
            .into_iter()
            .filter(|u| u.token == token)
            .map(|u| u.name)
            .collect();
        assert_eq!(holders, vec!["alice"]);
    }

    #[test]
    fn test_logout_then_dashboard_redirects() {
        let (mut flow, backend) = create_test_flow();
        flow.register(&alice_form()).unwrap();
        flow.login(&login_form("alice", "Abcd123!", true)).unwrap();

        let outcome = flow.logout().unwrap();
        assert_eq!(outcome.toast.message, "Logged out");
        assert_eq!(outcome.transition.to, Section::Login);
        assert_eq!(outcome.transition.after, Duration::from_millis(1000));
        for key in ["users", "authToken", "currentUser", "rememberedUser"] {
            assert!(backend.get(key).unwrap().is_none(), "{key} survived logout");
        }

        assert_eq!(
            flow.on_page_load("#dashboard").unwrap(),
            Some(AuthCheck::RedirectToLogin)
        );
        assert!(flow.router().is_visible(Section::Login));
    }

    #[test]
    fn test_anonymous_dashboard_load_redirects() {
        let (mut flow, _backend) = create_test_flow();

        let check = flow.on_page_load("#dashboard").unwrap();

        assert_eq!(check, Some(AuthCheck::RedirectToLogin));
        assert_eq!(flow.router().active(), Section::Login);
        assert_eq!(flow.router().fragment(), "#login");
    }

    #[test]
    fn test_dashboard_load_with_session() {
        let backend: SharedStore = Rc::new(MemoryStore::new());
        {
            let mut first = AuthFlow::new(backend.clone(), AuthConfig::immediate());
            first.register(&alice_form()).unwrap();
        }

        // A fresh flow on the same profile, like a page reload
        let mut flow = AuthFlow::new(backend, AuthConfig::immediate());
        let check = flow.on_page_load("#dashboard").unwrap();

        assert!(matches!(check, Some(AuthCheck::Authenticated(ref u)) if u.name == "alice"));
        assert!(flow.router().is_visible(Section::Dashboard));
        assert_eq!(flow.router().page_title(), "Dashboard");
    }

    #[test]
    fn test_page_load_other_fragment() {
        let (mut flow, _backend) = create_test_flow();

        assert_eq!(flow.on_page_load("#register").unwrap(), None);
        assert!(flow.router().is_visible(Section::Register));

        assert_eq!(flow.on_page_load("#bogus").unwrap(), None);
        assert!(flow.router().is_visible(Section::Register));
    }

    #[test]
    fn test_scoped_config() {
        let backend = Rc::new(MemoryStore::new());
        let config = AuthConfig {
            session_scope: Some("tab-1".into()),
            ..AuthConfig::immediate()
        };
        let mut flow = AuthFlow::new(backend.clone(), config);

        let outcome = flow.register(&alice_form()).unwrap();

        assert_eq!(outcome.transition.after, Duration::ZERO);
        assert!(backend.get("tab-1:authToken").unwrap().is_some());
        assert!(backend.get("authToken").unwrap().is_none());
    }
}
