//! CLI entry point - the composition root.
//!
//! Infrastructure is wired together in `bootstrap`; command dispatch routes
//! to handlers.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use solace_cli::handlers::play::PlayArgs;
use solace_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};
use solace_core::paths::env_file_path;

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Load `.env` from the working directory, then from the data directory.
/// Variables already set win.
fn load_env_files() {
    dotenvy::dotenv().ok();
    if let Ok(path) = env_file_path() {
        dotenvy::from_path(path).ok();
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = CliConfig::resolve(cli.data_dir)?;
    let ctx = bootstrap(config).await?;

    match command {
        Commands::Play {
            sound,
            minutes,
            duration,
        } => {
            let args = PlayArgs {
                sound,
                minutes,
                duration,
            };
            handlers::play::execute(&ctx, args).await?;
        }
        Commands::Encourage => handlers::encourage::execute(&ctx).await?,
        Commands::Sounds => handlers::catalog::sounds(&ctx).await?,
        Commands::Voices => handlers::catalog::voices(&ctx).await?,
        Commands::Settings { command } => handlers::settings::execute(&ctx, command).await?,
        Commands::Phrases { command } => handlers::phrases::execute(&ctx, command).await?,
        Commands::Paths => handlers::paths::execute(&ctx)?,
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    load_env_files();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e:#}");
        let code = e.downcast_ref::<CliError>().map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}
