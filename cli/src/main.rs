//! viacep - look up a Brazilian postal code (CEP)
//!
//! Prints the address as ten labeled lines, or as JSON with `--json`. Any
//! failure is printed as a single `Error: ...` line on stderr.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::{debug, info, Level};
use tracing_subscriber::EnvFilter;
use viacep_core::{format_cep, is_valid_cep, AddressClient, ClientConfig};

/// Look up a Brazilian postal code (CEP) on ViaCEP
#[derive(Parser, Debug)]
#[command(name = "viacep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CEP to look up: 8 digits, hyphen optional
    cep: String,

    /// Service root, overriding VIACEP_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Request timeout in seconds, overriding VIACEP_TIMEOUT_SECS
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Print the address as JSON using the service's field names
    #[arg(long)]
    json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Environment first, then command-line overrides.
fn resolve_config(cli: &Cli) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = &cli.base_url {
        config = ClientConfig::new(url).with_timeout(config.timeout());
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Some(Duration::from_secs(secs)));
    }
    Ok(config)
}

async fn run(cli: &Cli) -> Result<()> {
    if !is_valid_cep(&cli.cep) {
        bail!("Invalid CEP format. Please enter 8 digits.");
    }

    let config = resolve_config(cli)?;
    debug!(base_url = config.base_url(), timeout = ?config.timeout(), "client configured");
    if let Some(formatted) = format_cep(&cli.cep) {
        info!("looking up {formatted}");
    }

    let client = AddressClient::with_config(config);
    let address = client.fetch_address(&cli.cep).await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&address)?);
    } else {
        println!("{address}");
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
