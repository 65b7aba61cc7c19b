//! Gatehouse CLI
//!
//! Command-line harness for the auth workflow:
//! - Register and log in against a persistent store
//! - Check the dashboard gate and log out
//! - Inspect stored users, password strength and page titles

use anyhow::Context;
use clap::{Parser, Subcommand};
use gatehouse::config::generate_default_config;
use gatehouse::session::{peek_payload, LoginClaims};
use gatehouse::storage::open_backend;
use gatehouse::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gatehouse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Account registration and login demo over a local key-value store")]
#[command(long_about = "Gatehouse registers accounts, logs them in and gates a dashboard.\nSecrets are only base64-encoded: do not use real passwords.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: ~/.config/gatehouse/config.toml or ./gatehouse.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Storage backend (memory, file, sqlite)
    #[arg(long, global = true)]
    pub backend: Option<BackendKind>,

    /// Data directory for file and sqlite backends
    #[arg(long, global = true)]
    pub data_dir: Option<String>,

    /// Skip the simulated latency and redirect delays
    #[arg(long, global = true)]
    pub no_delay: bool,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a new account and sign it in
    Register {
        /// Full name (must be unique)
        #[arg(long)]
        name: String,
        /// Email address (must be unique)
        #[arg(long)]
        email: String,
        /// Ten-digit phone number
        #[arg(long)]
        phone: String,
        /// Password: letters, digits, one of @$!%*#?& and at least 8 characters
        #[arg(long)]
        password: String,
        /// Password confirmation (default: same as --password)
        #[arg(long)]
        confirm: Option<String>,
        /// Accept the terms
        #[arg(long)]
        accept_terms: bool,
    },

    /// Log in by name or email
    Login {
        /// Name or email
        identifier: String,
        /// Password
        #[arg(long)]
        password: String,
        /// Remember the identifier for next time
        #[arg(long)]
        remember: bool,
    },

    /// Open the dashboard. Without a valid session this clears the store.
    Whoami,

    /// Log out and clear the store
    Logout,

    /// List registered users
    Users,

    /// Score a password
    Strength {
        password: String,
    },

    /// Page title for a route such as #profile
    Title {
        path: String,
    },

    /// Print the redirect URL for a social login button
    Social {
        /// google or github
        provider: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    if let Some(backend) = cli.backend {
        config.storage.backend = backend;
    }
    if let Some(data_dir) = &cli.data_dir {
        config.storage.data_dir = data_dir.clone();
    }
    if cli.no_delay {
        config.auth = AuthConfig {
            session_scope: config.auth.session_scope.clone(),
            ..AuthConfig::immediate()
        };
    }

    gatehouse::logging::init_tracing(&config.logging);

    match cli.command {
        Commands::Register {
            name,
            email,
            phone,
            password,
            confirm,
            accept_terms,
        } => {
            let form = RegistrationForm {
                name,
                email,
                phone,
                confirm_password: confirm.unwrap_or_else(|| password.clone()),
                password,
                terms_accepted: accept_terms,
            };
            let mut flow = open_flow(&config)?;
            simulate_latency(&config.auth).await;
            let result = flow.register(&form);
            finish(&mut flow, result, &cli.format).await
        }

        Commands::Login {
            identifier,
            password,
            remember,
        } => {
            let form = LoginForm {
                identifier,
                password,
                remember,
            };
            let mut flow = open_flow(&config)?;
            simulate_latency(&config.auth).await;
            let result = flow.login(&form);
            finish(&mut flow, result, &cli.format).await
        }

        Commands::Whoami => {
            let mut flow = open_flow(&config)?;
            match flow.on_page_load("#dashboard")? {
                Some(AuthCheck::Authenticated(user)) => {
                    let subject = peek_payload::<LoginClaims>(&user.token).map(|c| c.name);
                    if cli.format == "json" {
                        println!("{}", serde_json::to_string_pretty(&user.current())?);
                    } else {
                        println!("{}", flow.router().page_title());
                        println!("  Name:       {}", user.name);
                        println!("  Email:      {}", user.email);
                        println!(
                            "  Last login: {}",
                            user.last_login
                                .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
                                .unwrap_or_else(|| "never".to_string())
                        );
                        if let Some(subject) = subject {
                            println!("  Token for:  {}", subject);
                        }
                    }
                    Ok(())
                }
                _ => {
                    eprintln!("Not logged in. Showing {}.", flow.router().fragment());
                    std::process::exit(1);
                }
            }
        }

        Commands::Logout => {
            let mut flow = open_flow(&config)?;
            let result = flow.logout();
            finish(&mut flow, result, &cli.format).await
        }

        Commands::Users => {
            let flow = open_flow(&config)?;
            let users = flow.session().credentials().list_users()?;

            if cli.format == "json" {
                let listed: Vec<CurrentUser> = users.iter().map(User::current).collect();
                println!("{}", serde_json::to_string_pretty(&listed)?);
            } else if users.is_empty() {
                println!("No users registered.");
            } else {
                println!("{:<20} {:<28} {:<12} {:<20}", "NAME", "EMAIL", "PHONE", "CREATED");
                println!("{}", "-".repeat(82));
                for user in users {
                    println!(
                        "{:<20} {:<28} {:<12} {:<20}",
                        user.name,
                        user.email,
                        user.phone,
                        user.created_at.format("%Y-%m-%d %H:%M")
                    );
                }
            }
            Ok(())
        }

        Commands::Strength { password } => {
            let strength = PasswordStrength::of(&password);
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&strength)?);
            } else {
                let bar: String = strength
                    .segment_colors()
                    .iter()
                    .map(|c| if *c == strength.tier.color() { '█' } else { '░' })
                    .collect();
                println!("{} {} ({}/5)", bar, strength.tier, strength.score);
            }
            Ok(())
        }

        Commands::Title { path } => {
            println!("{}", title_for(&path));
            Ok(())
        }

        Commands::Social { provider } => {
            let provider: SocialProvider = provider.parse().map_err(anyhow::Error::msg)?;
            println!("{}", provider.redirect_url());
            Ok(())
        }

        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(&path, content)
                        .with_context(|| format!("writing {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
            Ok(())
        }
    }
}

fn open_flow(config: &Config) -> anyhow::Result<AuthFlow> {
    let store = open_backend(&config.storage)
        .with_context(|| format!("opening {} store in {}", config.storage.backend, config.storage.data_dir))?;
    Ok(AuthFlow::new(store, config.auth.clone()))
}

/// Simulated network latency before a form is processed
async fn simulate_latency(config: &AuthConfig) {
    let delay = config.submit_delay();
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

/// Print the toast or the inline error, then apply the transition
async fn finish(
    flow: &mut AuthFlow,
    result: AuthResult<AuthOutcome>,
    format: &str,
) -> anyhow::Result<()> {
    match result {
        Ok(outcome) => {
            if format == "json" {
                println!("{}", serde_json::to_string_pretty(&outcome.toast)?);
            } else {
                println!("{}", outcome.toast.message);
            }
            tokio::time::sleep(outcome.transition.after).await;
            flow.complete(outcome.transition);
            if let Some(user) = outcome.user {
                println!("{} <{}>", user.name, user.email);
            }
            println!("→ {}", flow.router().fragment());
            Ok(())
        }
        Err(AuthError::Storage(e)) => Err(e.into()),
        Err(e) => {
            let fields: Vec<&str> = e.marked_fields().iter().map(|f| f.input_name()).collect();
            if format == "json" {
                println!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string(),
                        "fields": fields,
                    })
                );
            } else {
                eprintln!("{} [{}]", e, fields.join(", "));
            }
            std::process::exit(1);
        }
    }
}
