use std::io::{self, Read};
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use onebot_admin::api::{ApiClient, ApiError, StaticToken, TokenSource};
use onebot_admin::auth::{AuthError, FirebaseIdentity, Session, claims};
use onebot_admin::config::{AppConfig, ConfigError};
use onebot_admin::notify::TracingNotifier;
use onebot_admin::services::{ChatbotService, ServiceError, WidgetService};
use serde::Serialize;
use serde_json::json;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use widget::{EmbedLocator, WidgetConfig};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Auth(#[from] AuthError),
    #[error("{0}")]
    Service(ServiceError),
    #[error("invalid widget configuration:\n  - {}", .0.join("\n  - "))]
    InvalidConfig(Vec<String>),
    #[error("missing credentials; pass --token or --email/--password (ONEBOT_ID_TOKEN, ONEBOT_EMAIL, ONEBOT_PASSWORD)")]
    MissingCredentials,
    #[error("could not read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("ID token is not a readable JWT")]
    UnreadableToken,
}

impl From<ServiceError> for CliError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Invalid(errors) => Self::InvalidConfig(errors),
            other => Self::Service(other),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "onebot-admin", about = "OneBot admin: chatbots and embeddable widget configuration")]
struct Cli {
    #[arg(long, env = "API_BASE_URL")]
    api_base_url: Option<String>,

    #[arg(long, env = "ONEBOT_ID_TOKEN", hide_env_values = true)]
    token: Option<String>,

    #[arg(long, env = "ONEBOT_EMAIL")]
    email: Option<String>,

    #[arg(long, env = "ONEBOT_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Widget(WidgetCommand),
    Chatbot(ChatbotCommand),
    Auth(AuthCommand),
}

#[derive(Args, Debug)]
struct WidgetCommand {
    #[command(subcommand)]
    command: WidgetSubcommand,
}

#[derive(Subcommand, Debug)]
enum WidgetSubcommand {
    /// Print the default configuration for a chatbot.
    Defaults { chatbot_id: String },
    /// Check a configuration file against every rule.
    Validate {
        #[arg(default_value = "-", help = "Config file path, or - for stdin")]
        input: String,
    },
    /// Print the configuration as it would be sent to the API.
    Normalize {
        #[arg(default_value = "-", help = "Config file path, or - for stdin")]
        input: String,
    },
    /// Print the derived preview styles.
    Preview {
        #[arg(default_value = "-", help = "Config file path, or - for stdin")]
        input: String,
        #[arg(long, default_value_t = false, help = "Render with the chat panel open")]
        open: bool,
    },
    /// Print the script URL, embed snippet and preview URL.
    Embed { chatbot_id: String },
    /// Fetch the stored configuration (defaults when none).
    Pull { chatbot_id: String },
    /// Validate and store a configuration.
    Push {
        #[arg(default_value = "-", help = "Config file path, or - for stdin")]
        input: String,
    },
    /// Fetch the script location served by the API.
    Script { chatbot_id: String },
}

#[derive(Args, Debug)]
struct ChatbotCommand {
    #[command(subcommand)]
    command: ChatbotSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChatbotSubcommand {
    List,
    Get { id: String },
    Delete { id: String },
}

#[derive(Args, Debug)]
struct AuthCommand {
    #[command(subcommand)]
    command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
enum AuthSubcommand {
    /// Sign in and print the user with fresh tokens.
    Login,
    /// Print who the current credentials belong to.
    Whoami,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::Widget(ref cmd) => run_widget(&cli, &cmd.command).await,
        Command::Chatbot(ref cmd) => run_chatbot(&cli, &cmd.command).await,
        Command::Auth(ref cmd) => run_auth(&cli, &cmd.command).await,
    }
}

// =============================================================================
// WIDGET
// =============================================================================

async fn run_widget(cli: &Cli, command: &WidgetSubcommand) -> Result<(), CliError> {
    match command {
        WidgetSubcommand::Defaults { chatbot_id } => print_json(&widget::default_config(chatbot_id)),
        WidgetSubcommand::Validate { input } => {
            let config = read_config(input)?;
            let report = widget::validate(&config);
            print_json(&report)?;
            if report.is_valid { Ok(()) } else { Err(CliError::InvalidConfig(report.errors)) }
        }
        WidgetSubcommand::Normalize { input } => print_json(&widget::normalize_for_api(&read_config(input)?)),
        WidgetSubcommand::Preview { input, open } => {
            let config = read_config(input)?;
            let styles = widget::derive_styles(&config, *open);
            print_json(&json!({
                "styles": styles.to_json(),
                "inline": {
                    "bubble": widget::style::inline(&styles.bubble.declarations()),
                    "chat": widget::style::inline(&styles.chat.declarations()),
                    "header": widget::style::inline(&styles.header.declarations()),
                },
                "animationClass": widget::animation_class(&config.behavior),
            }))
        }
        WidgetSubcommand::Embed { chatbot_id } => {
            let config = app_config(cli)?;
            print_json(&EmbedLocator::new(&config.api_base_url).embed(chatbot_id))
        }
        WidgetSubcommand::Pull { chatbot_id } => {
            let service = WidgetService::new(api_client(cli).await?);
            print_json(&service.load(chatbot_id).await)
        }
        WidgetSubcommand::Push { input } => {
            let config = read_config(input)?;
            let service = WidgetService::new(api_client(cli).await?);
            print_json(&service.save(&config).await?)
        }
        WidgetSubcommand::Script { chatbot_id } => {
            let service = WidgetService::new(api_client(cli).await?);
            print_json(&service.script(chatbot_id).await?)
        }
    }
}

// =============================================================================
// CHATBOT
// =============================================================================

async fn run_chatbot(cli: &Cli, command: &ChatbotSubcommand) -> Result<(), CliError> {
    let service = ChatbotService::new(api_client(cli).await?);
    match command {
        ChatbotSubcommand::List => print_json(&service.list().await?),
        ChatbotSubcommand::Get { id } => print_json(&service.get(id).await?),
        ChatbotSubcommand::Delete { id } => {
            service.delete(id).await?;
            print_json(&json!({ "deleted": id }))
        }
    }
}

// =============================================================================
// AUTH
// =============================================================================

async fn run_auth(cli: &Cli, command: &AuthSubcommand) -> Result<(), CliError> {
    match command {
        AuthSubcommand::Login => {
            let config = app_config(cli)?;
            let session = sign_in(cli, &config).await?;
            print_json(&json!({
                "user": session.current_user(),
                "idToken": session.id_token(false).await?,
                "refreshToken": session.refresh_token().await,
            }))
        }
        AuthSubcommand::Whoami => {
            if let Some(token) = &cli.token {
                let claims = claims::decode(token).ok_or(CliError::UnreadableToken)?;
                return print_json(&json!({
                    "uid": claims.sub,
                    "email": claims.email,
                    "emailVerified": claims.email_verified,
                    "role": claims.role_or_default(),
                    "expiresAt": claims.exp,
                }));
            }
            let config = app_config(cli)?;
            let session = sign_in(cli, &config).await?;
            print_json(&session.current_user())
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

/// Environment config with `--api-base-url` taking precedence.
fn app_config(cli: &Cli) -> Result<AppConfig, CliError> {
    let from_env = AppConfig::from_env();
    let Some(base_url) = &cli.api_base_url else {
        return Ok(from_env?);
    };
    let mut config = match from_env {
        Ok(config) => config,
        Err(ConfigError::Missing(_)) => AppConfig::new(base_url)?,
        Err(e) => return Err(e.into()),
    };
    config.api_base_url = AppConfig::new(base_url)?.api_base_url;
    Ok(config)
}

async fn sign_in(cli: &Cli, config: &AppConfig) -> Result<Session, CliError> {
    let (Some(email), Some(password)) = (&cli.email, &cli.password) else {
        return Err(CliError::MissingCredentials);
    };
    let firebase = config.firebase.as_ref().ok_or(AuthError::NotConfigured)?;
    let provider = FirebaseIdentity::new(firebase, config.timeouts)?;
    let session = Session::new(Arc::new(provider), config.token_refresh_threshold);
    session.sign_in(email, password).await?;
    Ok(session)
}

/// API client authenticated with `--token`, or with a fresh session when
/// email and password are given.
async fn api_client(cli: &Cli) -> Result<ApiClient, CliError> {
    let config = app_config(cli)?;
    let tokens: Arc<dyn TokenSource> = match &cli.token {
        Some(token) => Arc::new(StaticToken(Some(token.clone()))),
        None if cli.email.is_some() => Arc::new(sign_in(cli, &config).await?),
        None => return Err(CliError::MissingCredentials),
    };
    Ok(ApiClient::new(&config, tokens, Arc::new(TracingNotifier))?)
}

fn read_config(input: &str) -> Result<WidgetConfig, CliError> {
    let text = if input == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|source| CliError::Read { path: "stdin".to_owned(), source })?;
        buf
    } else {
        std::fs::read_to_string(input).map_err(|source| CliError::Read { path: input.to_owned(), source })?
    };
    Ok(serde_json::from_str(&text)?)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
