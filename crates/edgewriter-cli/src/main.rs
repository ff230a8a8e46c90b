//! `edgewriter` binary - the composition root for the CLI.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use edgewriter_cli::{Cli, CliError, Commands, handlers};
use edgewriter_runtime::DefaultSystemProbe;

fn init_tracing(default_filter: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .compact()
        .init();
}

async fn run(command: Commands) -> Result<(), CliError> {
    let cwd = std::env::current_dir()?;
    match command {
        Commands::Serve(args) => handlers::serve::execute(args.into_config(&cwd)?).await,
        Commands::GpuInfo => handlers::gpu_info::execute(&DefaultSystemProbe::new()),
        Commands::Paths(args) => {
            handlers::paths::execute(&args.into_config(&cwd)?);
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env first so its values feed clap's env fallbacks
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.default_log_filter());

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    if let Err(err) = run(command).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
