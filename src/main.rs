//! Gatehouse demo
//!
//! Walks one account through register → dashboard → logout → login against an
//! in-memory store, with the same artificial delays the web build uses.

use gatehouse::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    gatehouse::logging::init_tracing(&config.logging);

    tracing::info!("Gatehouse demo v{}", env!("CARGO_PKG_VERSION"));

    let mut flow = AuthFlow::new(MemoryStore::shared(), config.auth.clone());

    // Anonymous dashboard visit
    if let Some(AuthCheck::RedirectToLogin) = flow.on_page_load("#dashboard")? {
        tracing::info!("Dashboard requested without a session, showing {}", flow.router().active());
    }

    // Register
    let form = RegistrationForm {
        name: "alice".into(),
        email: "a@x.com".into(),
        phone: "1234567890".into(),
        password: "Abcd123!".into(),
        confirm_password: "Abcd123!".into(),
        terms_accepted: true,
    };
    let strength = PasswordStrength::of(&form.password);
    tracing::info!("Password strength: {} ({}/5)", strength.tier, strength.score);

    let outcome = submit(&config.auth, || flow.register(&form)).await?;
    settle(&mut flow, outcome).await;
    print_dashboard(&flow)?;

    // Duplicate registration
    if let Err(e) = submit(&config.auth, || flow.register(&form)).await {
        tracing::info!("Second registration rejected: {} (fields: {:?})", e, e.marked_fields());
    }

    // Wrong password, then the right one
    let mut login = LoginForm {
        identifier: "a@x.com".into(),
        password: "Abcd123?".into(),
        remember: true,
    };
    if let Err(e) = submit(&config.auth, || flow.login(&login)).await {
        tracing::info!("Login rejected: {}", e);
    }
    login.password = "Abcd123!".into();
    let outcome = submit(&config.auth, || flow.login(&login)).await?;
    settle(&mut flow, outcome).await;

    flow.navigate(Section::Settings, 1280);
    tracing::info!("Navigated to {} ({})", flow.router().fragment(), flow.router().page_title());

    // Logout
    let outcome = flow.logout()?;
    settle(&mut flow, outcome).await;

    let check = flow.on_page_load("#dashboard")?;
    tracing::info!("After logout the dashboard gate says {:?}", check);

    Ok(())
}

/// Simulated network latency, then run the submission
async fn submit<F>(config: &AuthConfig, f: F) -> AuthResult<AuthOutcome>
where
    F: FnOnce() -> AuthResult<AuthOutcome>,
{
    tokio::time::sleep(config.submit_delay()).await;
    f()
}

/// Show the toast, wait out the redirect delay and apply the transition
async fn settle(flow: &mut AuthFlow, outcome: AuthOutcome) {
    tracing::info!("[{}] {}", outcome.toast.kind.class(), outcome.toast.message);
    tokio::time::sleep(outcome.transition.after.min(Duration::from_secs(5))).await;
    flow.complete(outcome.transition);
    tracing::info!("Now showing {}", flow.router().active());
}

fn print_dashboard(flow: &AuthFlow) -> StorageResult<()> {
    if let Some(profile) = flow.profile()? {
        tracing::info!("Dashboard: {} <{}>", profile.name, profile.email);
    }
    Ok(())
}
