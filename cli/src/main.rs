//! CLI entrypoint for switchboard
//!
//! Wires together all layers using dependency injection and drives a
//! single dispatch: either from the `--intent`/`--tool` flags or from a
//! JSON request body on stdin. The hosting HTTP framework stays external;
//! this binary is the host-agnostic driver and readiness probe.

use anyhow::{Context, Result};
use clap::Parser;
use std::collections::HashMap;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use switchboard_application::{
    DispatchRequest, DispatchUseCase, IntentResolverPort, NoRequestLogger, RequestLogger,
    ResolverStrategy,
};
use switchboard_domain::{RequestContext, ToolCatalog};
use switchboard_infrastructure::{
    ConfigLoader, FileConfig, GitHubContentClient, GroqClient, IssueSeverity, JsonlRequestLogger,
    LlmResolver, RegexResolver,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "switchboard",
    version,
    about = "Dispatch voice-agent intents onto allow-listed GitHub reading tools"
)]
struct Cli {
    /// Natural-language intent to dispatch
    #[arg(long, conflicts_with = "tool")]
    intent: Option<String>,

    /// JSON context hints for the intent (owner/repo/branch/path)
    #[arg(long, requires = "intent")]
    context: Option<String>,

    /// Invoke a tool directly by name
    #[arg(long)]
    tool: Option<String>,

    /// JSON object of tool parameters (with --tool)
    #[arg(long, requires = "tool")]
    parameters: Option<String>,

    /// Explicit config file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// Report readiness status and exit
    #[arg(long)]
    check: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    info!("Starting switchboard");

    let config = ConfigLoader::load(cli.config.as_ref())
        .map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;

    for issue in config.validate() {
        match issue.severity {
            IssueSeverity::Warning => warn!("config: {}", issue.message),
            IssueSeverity::Error => anyhow::bail!("config: {}", issue.message),
        }
    }

    let github_token = std::env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
    let groq_key = std::env::var("GROQ_API_KEY").ok().filter(|k| !k.is_empty());

    if cli.check {
        // Readiness never fails the process: a missing token is a warning
        // state, and requests degrade to 503s until it is configured
        println!(
            "{}",
            serde_json::to_string_pretty(&readiness(&config, github_token.as_deref()))?
        );
        return Ok(());
    }

    // === Dependency Injection ===
    let content = Arc::new(
        GitHubContentClient::new(github_token).with_base_url(config.github.api_base.clone()),
    );
    if !content.has_token() {
        warn!("GITHUB_TOKEN is not set; content fetches will fail until it is configured");
    }

    let resolver = build_resolver(&config, groq_key);

    let request_logger: Arc<dyn RequestLogger> = match &config.logging.request_log {
        Some(path) => match JsonlRequestLogger::new(path) {
            Some(logger) => Arc::new(logger),
            None => Arc::new(NoRequestLogger),
        },
        None => Arc::new(NoRequestLogger),
    };

    let use_case = DispatchUseCase::new(
        resolver,
        content,
        ToolCatalog::builtin(),
        config.to_allow_list(),
        config.repo_defaults(),
    )
    .with_request_logger(request_logger);

    let request = build_request(&cli)?;
    let response = use_case.execute(request).await;

    println!("{}", serde_json::to_string_pretty(&response.body)?);

    if !response.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// Pick the configured resolution strategy. The LLM strategy needs an API
/// key; without one we degrade to the deterministic resolver instead of
/// refusing to start.
fn build_resolver(config: &FileConfig, groq_key: Option<String>) -> Arc<dyn IntentResolverPort> {
    match config.resolver_strategy() {
        ResolverStrategy::Llm => match groq_key {
            Some(key) => Arc::new(LlmResolver::new(
                GroqClient::new(
                    key,
                    Some(config.resolver.model.clone()),
                    Some(config.resolver.api_base.clone()),
                ),
                config.repo_defaults(),
            )),
            None => {
                warn!("GROQ_API_KEY is not set; falling back to the deterministic resolver");
                Arc::new(RegexResolver::new(config.repo_defaults()))
            }
        },
        ResolverStrategy::Regex => Arc::new(RegexResolver::new(config.repo_defaults())),
    }
}

fn readiness(config: &FileConfig, github_token: Option<&str>) -> serde_json::Value {
    if github_token.is_none() {
        serde_json::json!({
            "status": "degraded",
            "message": "GITHUB_TOKEN is not configured; content fetches will fail",
            "resolver": config.resolver_strategy().to_string(),
        })
    } else {
        serde_json::json!({
            "status": "ok",
            "message": "Tool dispatch is ready",
            "resolver": config.resolver_strategy().to_string(),
        })
    }
}

/// Build the dispatch request from flags, or from a JSON body on stdin
/// when no flags were given (the shape an HTTP host would forward).
fn build_request(cli: &Cli) -> Result<DispatchRequest> {
    if let Some(tool) = &cli.tool {
        let parameters: HashMap<String, serde_json::Value> = match &cli.parameters {
            Some(text) => serde_json::from_str(text)
                .context("--parameters must be a JSON object")?,
            None => HashMap::new(),
        };
        return Ok(DispatchRequest::tool(tool, parameters));
    }

    if let Some(intent) = &cli.intent {
        let context: RequestContext = match &cli.context {
            Some(text) => {
                serde_json::from_str(text).context("--context must be a JSON object")?
            }
            None => RequestContext::default(),
        };
        return Ok(DispatchRequest::intent_with_context(intent, context));
    }

    let mut body = String::new();
    std::io::stdin()
        .read_to_string(&mut body)
        .context("failed to read request body from stdin")?;

    if body.trim().is_empty() {
        // Dispatch reports this as a MissingIntent response
        return Ok(DispatchRequest::intent(""));
    }

    serde_json::from_str(&body).context("request body is not a valid dispatch request")
}
