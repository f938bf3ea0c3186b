// src/cli/mod.rs — CLI definition (clap derive) and command runners

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::infra::config::Config;
use crate::optimizer::{OptimizeParams, Optimizer};
use crate::orchestrator::workers::document_analysis;
use crate::patterns::chain::SupportEmailChain;
use crate::patterns::parallel::ReviewSummarizer;
use crate::patterns::router::InquiryRouter;
use crate::util::excerpt;
use crate::provider::media::MediaAttachment;
use crate::provider::{CompletionClient, CompletionRequest};

#[derive(Parser)]
#[command(
    name = "draftmill",
    about = "Agentic orchestration patterns over hosted LLM APIs",
    version
)]
pub struct Cli {
    /// Config file path
    #[arg(long)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fan out the document-analysis workers over a paper and merge results
    Analyze {
        /// Path to the document to analyze
        file: PathBuf,
    },
    /// Optimize an email subject line with the evaluator-optimizer loop
    Optimize {
        /// Path to the email content
        file: PathBuf,
        /// Rounds to run (defaults to config)
        #[arg(short, long)]
        iterations: Option<usize>,
        /// Candidates per round (defaults to config)
        #[arg(short, long)]
        options: Option<usize>,
    },
    /// One-shot completion, optionally with media attachments
    Ask {
        prompt: String,
        /// Image (.jpg/.jpeg/.png) or video (.mp4) files to attach
        #[arg(short, long)]
        media: Vec<PathBuf>,
        /// Stream the response chunk by chunk
        #[arg(long)]
        stream: bool,
    },
    /// Summarize product reviews concurrently, one completion call each
    Summarize {
        /// File with one review per non-empty line
        file: PathBuf,
    },
    /// Classify a customer inquiry and route it to the matching handler
    Route { inquiry: String },
    /// Generate a support email through the prompt chain
    Support { inquiry: String },
}

pub async fn run_analyze(
    client: Arc<dyn CompletionClient>,
    config: &Config,
    file: &PathBuf,
) -> anyhow::Result<()> {
    let document = std::fs::read_to_string(file)?;
    let orchestrator = document_analysis(client, config.orchestrator.pool_size);

    let results = orchestrator.process_document(&document).await?;
    // Print in registration order; the result map itself is unordered.
    for name in orchestrator.worker_names() {
        println!("\n=== {name} ===");
        match results.get(name).and_then(|outcome| outcome.value()) {
            Some(value) => println!("{}", serde_json::to_string_pretty(value)?),
            None => println!("(failed)"),
        }
    }

    orchestrator.shutdown();
    Ok(())
}

pub async fn run_optimize(
    client: Arc<dyn CompletionClient>,
    config: &Config,
    file: &PathBuf,
    iterations: Option<usize>,
    options: Option<usize>,
) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(file)?;
    let params = OptimizeParams {
        iterations: iterations.unwrap_or(config.optimizer.iterations),
        options_per_iteration: options.unwrap_or(config.optimizer.options_per_iteration),
    };

    let result = Optimizer::new(client).optimize(&content, params).await?;
    println!("Best subject line: {}", result.candidate);
    println!("Score: {} (over {} rounds)", result.score, result.rounds);
    Ok(())
}

pub async fn run_ask(
    client: Arc<dyn CompletionClient>,
    config: &Config,
    prompt: &str,
    media: &[PathBuf],
    stream: bool,
) -> anyhow::Result<()> {
    let mut request =
        CompletionRequest::text(prompt).with_temperature(config.model.temperature);
    for path in media {
        request = request.with_media(MediaAttachment::from_path(path)?);
    }

    if stream {
        let mut stdout = std::io::stdout();
        client
            .stream_with_callback(request, &mut |chunk| {
                let _ = write!(stdout, "{chunk}");
                let _ = stdout.flush();
            })
            .await?;
        println!();
    } else {
        let response = client.complete(request).await?;
        println!("{}", response.text);
    }
    Ok(())
}

pub async fn run_summarize(
    client: Arc<dyn CompletionClient>,
    file: &PathBuf,
) -> anyhow::Result<()> {
    let reviews: Vec<String> = std::fs::read_to_string(file)?
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect();

    let summaries = ReviewSummarizer::new(client)
        .summarize_reviews(&reviews)
        .await?;
    for entry in &summaries {
        println!("Review: {}", excerpt(&entry.review, 50));
        match entry.outcome.summary() {
            Some(summary) => println!("Summary: {summary}\n"),
            None => println!("Summary: (failed)\n"),
        }
    }
    println!("Processed {} reviews in parallel.", summaries.len());
    Ok(())
}

pub async fn run_route(client: Arc<dyn CompletionClient>, inquiry: &str) -> anyhow::Result<()> {
    let (classification, response) = InquiryRouter::new(client).route(inquiry).await?;
    println!(
        "[{:?} / {}]\n{}",
        classification.category, classification.language, response
    );
    Ok(())
}

pub async fn run_support(client: Arc<dyn CompletionClient>, inquiry: &str) -> anyhow::Result<()> {
    let email = SupportEmailChain::new(client).run(inquiry).await?;
    println!("{email}");
    Ok(())
}
