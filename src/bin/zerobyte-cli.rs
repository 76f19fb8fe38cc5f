use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use reqwest::Method;
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use zerobyte_client::{ClientConfig, Payload, Request, ZerobyteClient};

#[derive(Debug, Parser)]
#[command(
    name = "zerobyte-cli",
    version,
    about = "Small CLI for querying the Zerobyte backup API"
)]
struct Cli {
    /// Base URL of the Zerobyte server (for example: http://localhost:4096).
    #[arg(long, env = "ZEROBYTE_URL")]
    url: String,

    #[arg(long, env = "ZEROBYTE_USERNAME")]
    username: String,

    #[arg(long, env = "ZEROBYTE_PASSWORD", hide_env_values = true)]
    password: String,

    /// Skip the initial login (for unauthenticated endpoints such as `status`).
    #[arg(long)]
    no_login: bool,

    /// Emit compact JSON instead of pretty-printed output.
    #[arg(long)]
    compact: bool,

    /// Log requests and responses to stderr. Overridden by `RUST_LOG`.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show the logged-in user.
    Me,
    /// Report whether the server has any users yet.
    Status,
    /// Show server version and platform details.
    Info,
    /// List volumes.
    Volumes,
    /// List repositories.
    Repositories {
        /// Only show repositories attached to this volume.
        #[arg(long)]
        volume_id: Option<u64>,
    },
    /// List snapshots of a repository.
    Snapshots {
        repository: String,

        /// Only show snapshots taken by this backup.
        #[arg(long)]
        backup_id: Option<String>,
    },
    /// Print the restic password file.
    ResticPassword,
    /// Send a raw HTTP request using method + path.
    Request(RequestArgs),
}

#[derive(Debug, Args)]
struct RequestArgs {
    /// HTTP method (GET, POST, PUT, DELETE).
    method: String,

    /// Request path (for example: /api/v1/volumes).
    path: String,

    /// Query parameter in form key=value. Repeat as needed.
    #[arg(long = "query", value_name = "KEY=VALUE")]
    query: Vec<String>,

    #[command(flatten)]
    body: BodyInput,
}

#[derive(Debug, Args)]
struct BodyInput {
    /// JSON request body literal.
    #[arg(long, conflicts_with = "body_file")]
    body_json: Option<String>,

    /// Path to a file containing a JSON request body.
    #[arg(long, value_name = "PATH", conflicts_with = "body_json")]
    body_file: Option<PathBuf>,
}

/// Entry point for the CLI.
///
/// Parses command-line arguments, builds a client (logging in unless
/// `--no-login`), dispatches subcommands, and prints the result.
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config =
        ClientConfig::new(&cli.url, &cli.username, &cli.password).auto_login(!cli.no_login);
    let client = ZerobyteClient::new(config)
        .with_context(|| format!("failed to connect to '{}'", cli.url))?;

    let output = match &cli.command {
        Command::Me => Payload::Json(serde_json::to_value(client.auth().me()?)?),
        Command::Status => Payload::Json(serde_json::to_value(client.auth().status()?)?),
        Command::Info => Payload::Json(client.system().info()?),
        Command::Volumes => Payload::Json(client.volumes().list()?),
        Command::Repositories { volume_id } => {
            Payload::Json(Value::Array(client.repositories().list(*volume_id)?))
        }
        Command::Snapshots {
            repository,
            backup_id,
        } => Payload::Json(
            client
                .snapshots()
                .list(repository, backup_id.as_deref())
                .with_context(|| format!("failed to list snapshots of '{repository}'"))?,
        ),
        Command::ResticPassword => Payload::Text(client.system().download_restic_password()?),
        Command::Request(args) => send_request(&client, args)
            .with_context(|| format!("request failed: {} {}", args.method, args.path))?,
    };

    print_payload(output, cli.compact).context("failed to print output")?;
    Ok(())
}

/// Installs a stderr subscriber so stdout carries only command output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "zerobyte_client=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Sends a raw HTTP request through the client's shared transport.
fn send_request(client: &ZerobyteClient, args: &RequestArgs) -> Result<Payload> {
    // Validate method eagerly so CLI errors are explicit before any network call.
    let method = Method::from_str(&args.method)
        .with_context(|| format!("invalid HTTP method '{}'", args.method))?;
    let mut request = Request::new(method, &args.path);
    for (key, value) in parse_pairs(&args.query, "--query")? {
        request = request.query(key, value);
    }
    request.body = parse_body(&args.body).context("failed to parse request body input")?;

    Ok(client.request(request)?)
}

/// Parses repeated `key=value` arguments into owned key/value pairs.
///
/// Returns an error when a value does not include `=` or has an empty key.
fn parse_pairs(values: &[String], flag_name: &str) -> Result<Vec<(String, String)>> {
    let mut pairs = Vec::with_capacity(values.len());
    for item in values {
        let Some((key, value)) = item.split_once('=') else {
            bail!("invalid {flag_name} value '{item}': expected key=value");
        };
        if key.is_empty() {
            bail!("invalid {flag_name} value '{item}': empty key");
        }
        pairs.push((key.to_owned(), value.to_owned()));
    }
    Ok(pairs)
}

/// Parses an optional JSON body from inline text or a file path.
///
/// Exactly one of `--body-json` or `--body-file` may be set.
fn parse_body(body: &BodyInput) -> Result<Option<Value>> {
    match (&body.body_json, &body.body_file) {
        (Some(raw), None) => serde_json::from_str(raw)
            .context("failed to parse JSON from --body-json")
            .map(Some),
        (None, Some(path)) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("failed to read --body-file '{}'", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| {
                    format!("failed to parse JSON in --body-file '{}'", path.display())
                })
                .map(Some)
        }
        (None, None) => Ok(None),
        (Some(_), Some(_)) => bail!("use only one of --body-json or --body-file"),
    }
}

/// Prints JSON compact or pretty, text verbatim, and nothing for empty bodies.
fn print_payload(payload: Payload, compact: bool) -> Result<()> {
    match payload {
        Payload::Json(value) if compact => {
            println!("{}", serde_json::to_string(&value).context("failed to render JSON")?);
        }
        Payload::Json(value) => {
            println!(
                "{}",
                serde_json::to_string_pretty(&value).context("failed to render JSON")?
            );
        }
        Payload::Text(text) => print!("{text}"),
        Payload::NoContent => {}
    }
    Ok(())
}
