use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use echo_auth::{ApiKeyTokenProvider, token_fn};
use echo_client::{EchoClient, PaymentLinkRequest};
use echo_config::Config;
use echo_provider::{ProviderKind, create_echo_client};
use echo_types::{InsufficientFundsFn, TokenProvider};
use serde::Serialize;
use serde_json::{Value, json};
use std::{path::PathBuf, sync::Arc};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "echo", about = "echo: metered LLM access and account tools")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List your apps.
    Apps,
    /// Show one app.
    App {
        /// App id (UUID).
        id: String,
    },
    /// Show paid and free-tier balance for the configured app.
    Balance,
    /// Show the signed-in user.
    User,
    /// Register a referral code for the configured app.
    Referral { code: String },
    /// Create a Stripe payment link.
    PaymentLink {
        /// Amount in USD.
        amount: f64,
        #[arg(long)]
        description: Option<String>,
    },
    /// Send one prompt through the echo router.
    Chat {
        /// Provider name (openai / anthropic / google / groq / openrouter / xai).
        #[arg(short, long, default_value = "openai")]
        provider: String,
        #[arg(short, long, default_value = "gpt-4o-mini")]
        model: String,
        prompt: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref()).context("config error")?;
    init_tracing(&config.log_level);

    let key = config
        .api_key
        .clone()
        .context("no API key configured (set api_key or ECHO_API_KEY)")?;
    let tokens: Arc<dyn TokenProvider> = Arc::new(ApiKeyTokenProvider::new(key));

    match cli.command {
        Commands::Chat {
            provider,
            model,
            prompt,
        } => cmd_chat(&config, tokens, &provider, &model, &prompt).await,
        Commands::Apps => print_json(&account(&config, tokens).apps.list_apps().await?),
        Commands::App { id } => print_json(&account(&config, tokens).apps.get_app(&id).await?),
        Commands::Balance => cmd_balance(&config, tokens).await,
        Commands::User => print_json(&account(&config, tokens).users.get_user().await?),
        Commands::Referral { code } => {
            config.echo.validate("referral")?;
            let referral = account(&config, tokens)
                .users
                .register_referral_code(&config.echo.app_id, &code)
                .await?;
            print_json(&referral)
        }
        Commands::PaymentLink {
            amount,
            description,
        } => {
            let request = PaymentLinkRequest {
                description,
                ..PaymentLinkRequest::new(amount)
            };
            let link = account(&config, tokens)
                .payments
                .create_payment_link(&request)
                .await?;
            print_json(&link)
        }
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn account(config: &Config, tokens: Arc<dyn TokenProvider>) -> EchoClient {
    EchoClient::new(&config.echo, tokens)
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn cmd_balance(config: &Config, tokens: Arc<dyn TokenProvider>) -> Result<()> {
    let client = account(config, tokens);
    let paid = client.balance.get_balance().await?;
    let app_id = config.echo.app_id.as_str();
    let free = if app_id.is_empty() {
        None
    } else {
        Some(client.balance.get_free_balance(app_id).await?)
    };
    print_json(&json!({ "balance": paid, "free": free }))
}

async fn cmd_chat(
    config: &Config,
    tokens: Arc<dyn TokenProvider>,
    provider: &str,
    model: &str,
    prompt: &str,
) -> Result<()> {
    let kind = provider
        .parse::<ProviderKind>()
        .map_err(|e| anyhow::anyhow!("unknown provider '{provider}': {e}"))?;
    let on_insufficient_funds: InsufficientFundsFn = Arc::new(|| {
        eprintln!("insufficient funds: top up with `echo payment-link <amount>`");
    });
    let client = create_echo_client(
        kind,
        &config.echo,
        token_fn::for_app(tokens),
        Some(on_insufficient_funds),
    )?;

    tracing::debug!(provider = %kind, model, "sending chat request");
    let resp = client.chat(model, &chat_body(kind, prompt)).await?;
    let status = resp.status();
    let body: Value = serde_json::from_slice(resp.body())
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(resp.body()).into_owned()));
    if !status.is_success() {
        anyhow::bail!("router returned {status}: {body}");
    }
    print_json(&body)
}

fn chat_body(kind: ProviderKind, prompt: &str) -> Value {
    match kind {
        ProviderKind::Google => json!({
            "contents": [{"role": "user", "parts": [{"text": prompt}]}]
        }),
        ProviderKind::Anthropic => json!({
            "max_tokens": 1024,
            "messages": [{"role": "user", "content": prompt}]
        }),
        _ => json!({
            "messages": [{"role": "user", "content": prompt}]
        }),
    }
}
