use clap::{Args, Parser, Subcommand};
use floworx::endpoints::LoginRequest;
use floworx::{ApiClient, ApiError, ClientConfig, Method, RequestOptions};
use serde_json::Value;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0}")]
    InvalidMethod(String),
}

#[derive(Parser, Debug)]
#[command(name = "floworx", about = "FloWorx API client with CSRF handling")]
struct Cli {
    #[arg(long, env = "FLOWORX_API_BASE_URL", default_value = floworx::config::DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch a CSRF token and print it.
    Csrf,
    /// Send one request through the CSRF-aware client.
    Request(RequestArgs),
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "FLOWORX_PASSWORD", hide_env_values = true)]
        password: String,
    },
    Logout,
    Settings(SettingsCommand),
}

#[derive(Args, Debug)]
struct RequestArgs {
    /// GET, POST, PUT, PATCH or DELETE.
    method: String,
    path: String,
    #[arg(long)]
    data: Option<String>,
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Get,
    Set {
        #[arg(long)]
        data: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::from_env()?.with_base_url(&cli.base_url)?;
    let client = ApiClient::new(config)?;

    match cli.command {
        Command::Csrf => {
            let token = client.ensure_csrf().await?;
            println!("{token}");
            Ok(())
        }
        Command::Request(args) => run_request(&client, args).await,
        Command::Login { email, password } => {
            let response = client.login(&LoginRequest { email, password }).await?;
            match &response.user {
                Some(user) => tracing::info!(email = %user.email, "logged in"),
                None => tracing::info!("login accepted without user payload"),
            }
            let mut body = response.extra;
            if let Some(user) = response.user {
                body.insert("email".to_owned(), Value::String(user.email));
            }
            print_json(&Value::Object(body))
        }
        Command::Logout => print_json(&client.logout().await?),
        Command::Settings(settings) => match settings.command {
            SettingsSubcommand::Get => print_json(&client.user_settings().await?),
            SettingsSubcommand::Set { data } => {
                let body = parse_data(&data)?;
                print_json(&client.update_user_settings(body).await?)
            }
        },
    }
}

async fn run_request(client: &ApiClient, args: RequestArgs) -> Result<(), CliError> {
    let options = request_options(&args)?;
    let json = client.api(&args.path, options).await?;
    print_json(&json)
}

fn request_options(args: &RequestArgs) -> Result<RequestOptions, CliError> {
    let method = args.method.parse::<Method>().map_err(CliError::InvalidMethod)?;
    let body = args.data.as_deref().map(parse_data).transpose()?;
    Ok(RequestOptions { method, body })
}

fn parse_data(raw: &str) -> Result<Value, CliError> {
    Ok(serde_json::from_str::<Value>(raw)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    if value.is_null() {
        return Ok(());
    }
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
