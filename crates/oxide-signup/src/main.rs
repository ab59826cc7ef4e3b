//! oxide-signup CLI
//!
//! Drives the sign-up form against the in-memory auth backend.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use oxide_auth::{MemoryBackend, Session, SessionProvider, StaticSession, User};
use oxide_router::RecordingNavigator;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use oxide_signup::fields::{EMAIL, FIRST_NAME, LAST_NAME, PASSWORD};
use oxide_signup::{
    Collaborators, MountOutcome, SignupConfig, SignupOutcome, SignupPage, TracingNotifier,
};

/// Fill in and submit the sign-up form.
#[derive(Parser)]
#[command(name = "oxide-signup")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, env = "SIGNUP_CONFIG")]
    config: Option<PathBuf>,

    /// First name.
    #[arg(long, default_value = "")]
    first_name: String,

    /// Last name.
    #[arg(long, default_value = "")]
    last_name: String,

    /// Email address.
    #[arg(long, default_value = "")]
    email: String,

    /// Password.
    #[arg(long, env = "SIGNUP_PASSWORD", default_value = "", hide_env_values = true)]
    password: String,

    /// Page to return to after signing up.
    #[arg(short, long)]
    redirect_url: Option<String>,

    /// Pretend the visitor already has a session.
    #[arg(long)]
    signed_in: bool,

    /// Simulated latency of the field checks, in milliseconds.
    #[arg(long)]
    latency_ms: Option<u64>,

    /// Print the rendered page after submitting.
    #[arg(long)]
    html: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut config = match &cli.config {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            SignupConfig::from_json(&json)?
        }
        None => SignupConfig::default(),
    };
    if let Some(latency_ms) = cli.latency_ms {
        config.async_latency_ms = latency_ms;
    }

    let backend = Arc::new(MemoryBackend::new());
    let sessions: Arc<dyn SessionProvider> = if cli.signed_in {
        let user = User::create("Existing User", "existing@example.com", "existing-password")?;
        Arc::new(StaticSession::signed_in(Session::for_user(&user)))
    } else {
        backend.clone()
    };
    let navigator = Arc::new(RecordingNavigator::new());

    let page = SignupPage::new(
        config,
        Collaborators {
            auth: backend.clone(),
            sessions,
            navigator: navigator.clone(),
            notifier: Arc::new(TracingNotifier),
        },
    );

    let form = match page.mount(cli.redirect_url.as_deref()).await? {
        MountOutcome::Redirected(path) => {
            println!("Already signed in, redirected to {path}");
            return Ok(());
        }
        MountOutcome::Render(form) => form,
    };

    for (field, value) in [
        (FIRST_NAME, &cli.first_name),
        (LAST_NAME, &cli.last_name),
        (EMAIL, &cli.email),
        (PASSWORD, &cli.password),
    ] {
        form.handle_change(field, value.as_str())?;
        form.handle_blur(field)?;
    }
    info!("waiting for field checks");
    form.settled().await;

    let outcome = page.submit(&form).await;
    match &outcome {
        SignupOutcome::SignedUp(user) => println!("Signed up {} <{}>", user.name, user.email),
        other => println!("Outcome: {other:?}"),
    }
    if let Some(location) = navigator.last_location() {
        println!("Redirected to {location}");
    }
    println!("Accounts: {}", backend.user_count());

    if cli.html {
        println!("{}", page.render(&form));
    }

    Ok(())
}
