// ABOUTME: Entry point for the dropdeploy CLI application.
// ABOUTME: Parses arguments, loads configuration and maps results to exit codes.

mod cli;
mod commands;

use cli::{Cli, Commands};
use dropdeploy::config::{self, Config};
use dropdeploy::diagnostics::{Diagnostics, Warning};
use dropdeploy::error::Result;
use dropdeploy::output::{Output, Reporter};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // RUST_LOG wins; otherwise the verbose flag picks the level.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("warn")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = cli.output_mode();
    let code = match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            Output::new(mode).error(&e.to_string());
            e.exit_code()
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> Result<i32> {
    let cwd = env::current_dir()?;
    let output = Output::new(cli.output_mode());

    match cli.command {
        Commands::Init { droplet, force } => {
            config::init_config(&cwd, droplet, force)?;
            output.result(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(0)
        }
        Commands::Deploy {
            droplet,
            token,
            dry_run,
        } => {
            let mut diag = Diagnostics::default();
            if let Some(warning) = config::load_env_file(&cwd) {
                diag.warn(warning);
            }
            let config = Config::discover_or_default(&cwd)?;

            commands::deploy(
                &config,
                droplet,
                token.as_deref(),
                dry_run,
                output,
                &mut diag,
            )
            .await?;
            Ok(0)
        }
        Commands::Healthcheck {
            droplet,
            token,
            endpoint,
            strict,
        } => {
            let mut diag = Diagnostics::default();
            if let Some(warning) = config::load_env_file(&cwd) {
                diag.warn(warning);
            }
            // A broken config file falls back to the defaults here.
            let config = match Config::discover_or_default(&cwd) {
                Ok(config) => config,
                Err(e) => {
                    let warning = Warning::config_file(format!("ignoring config file: {e}"));
                    output.warning(&warning.message);
                    diag.warn(warning);
                    Config::default()
                }
            };

            commands::healthcheck(
                &config,
                droplet,
                token.as_deref(),
                endpoint.as_deref(),
                strict,
                output,
                &diag,
            )
            .await
        }
        Commands::Status => {
            let config = Config::discover_or_default(&cwd)?;
            commands::status(&config, output).await?;
            Ok(0)
        }
    }
}
