use anyhow::{Result, bail};
use clap::Parser;
use ghsm::ingest::gemini::{Gemini, GeminiConfig};
use ghsm::ingest::{Ingestor, filter_github_urls};
use ghsm::runtime::RealRuntime;
use ghsm::server::AppContext;
use ghsm::store::{INSTRUCTIONS_FILE, InstructionStore, REPOS_FILE, RepoStore};
use std::path::PathBuf;
use std::sync::Arc;

/// ghsm - GitHub Star Manager
///
/// Serve a validated catalog of starred GitHub repositories, and draft new
/// catalog entries by analyzing repository URLs with the Gemini API.
///
/// The GEMINI_API_KEY environment variable (or --api-key) is required for
/// the ingestion path only; the catalog endpoints work without it.
///
/// Examples:
///   ghsm serve                                # serve ./repos.json on :3000
///   ghsm add https://github.com/owner/repo    # print a draft catalog entry
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Gemini API key (required for ingestion only)
    #[arg(
        long = "api-key",
        env = "GEMINI_API_KEY",
        value_name = "KEY",
        hide_env_values = true,
        global = true
    )]
    api_key: Option<String>,

    /// Gemini API URL (defaults to the public endpoint)
    #[arg(long = "api-url", value_name = "URL", global = true)]
    api_url: Option<String>,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Start the catalog HTTP server
    Serve(ServeArgs),

    /// Draft catalog entries for GitHub repository URLs and print them
    Add(AddArgs),
}

#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Path to the repository catalog document
    #[arg(long, env = "GHSM_REPOS", value_name = "PATH", default_value = REPOS_FILE)]
    pub repos: PathBuf,

    /// Path to the installation-instructions document
    #[arg(
        long,
        env = "GHSM_INSTRUCTIONS",
        value_name = "PATH",
        default_value = INSTRUCTIONS_FILE
    )]
    pub instructions: PathBuf,
}

#[derive(clap::Args, Debug)]
pub struct AddArgs {
    /// GitHub repository URLs to analyze
    #[arg(value_name = "URL", required = true)]
    pub urls: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => serve(args, cli.api_key, cli.api_url).await,
        Commands::Add(args) => add(args, cli.api_key, cli.api_url).await,
    }
}

async fn serve(args: ServeArgs, api_key: Option<String>, api_url: Option<String>) -> Result<()> {
    let runtime = Arc::new(RealRuntime);
    let ingestor = match api_key {
        Some(api_key) => Some(Ingestor::new(Gemini::new(GeminiConfig { api_key, api_url })?)),
        None => None,
    };
    let ctx = Arc::new(AppContext {
        repos: RepoStore::new(runtime.clone(), args.repos),
        instructions: InstructionStore::new(runtime, args.instructions),
        ingestor,
    });
    ghsm::server::serve(ctx, args.port).await
}

async fn add(args: AddArgs, api_key: Option<String>, api_url: Option<String>) -> Result<()> {
    let Some(api_key) = api_key else {
        bail!("GEMINI_API_KEY not configured. Please set up the environment variable.");
    };

    let github_urls = filter_github_urls(&args.urls);
    if github_urls.is_empty() {
        bail!("No valid GitHub repository URLs provided");
    }

    let ingestor = Ingestor::new(Gemini::new(GeminiConfig { api_key, api_url })?);
    let results = ingestor.process_urls(&github_urls).await;

    let message = format!(
        "Processed {} repository URL(s). Manual commit required to persist data.",
        results.len()
    );
    let report = serde_json::json!({
        "success": true,
        "results": results,
        "message": message,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
