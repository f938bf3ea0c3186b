// src/main.rs — Draftmill entry point

use clap::Parser;
use std::path::Path;
use std::sync::Arc;

use draftmill::cli::{self, Cli, Commands};
use draftmill::infra::config::Config;
use draftmill::infra::logger;
use draftmill::provider::bedrock::BedrockClient;
use draftmill::provider::CompletionClient;

#[tokio::main]
async fn main() {
    // Respects RUST_LOG via the env filter
    logger::init_logging("info");

    if let Err(e) = run().await {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = if let Some(ref path) = cli.config {
        Config::load_from(Path::new(path))?
    } else {
        Config::load()?
    };

    let client: Arc<dyn CompletionClient> = Arc::new(BedrockClient::from_env(&config.model)?);

    match &cli.command {
        Commands::Analyze { file } => cli::run_analyze(client, &config, file).await,
        Commands::Optimize {
            file,
            iterations,
            options,
        } => cli::run_optimize(client, &config, file, *iterations, *options).await,
        Commands::Ask {
            prompt,
            media,
            stream,
        } => cli::run_ask(client, &config, prompt, media, *stream).await,
        Commands::Summarize { file } => cli::run_summarize(client, file).await,
        Commands::Route { inquiry } => cli::run_route(client, inquiry).await,
        Commands::Support { inquiry } => cli::run_support(client, inquiry).await,
    }
}
