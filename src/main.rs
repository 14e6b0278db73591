use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use chatapp::diagram::export_diagram;
use chatapp::errors::{ChatError, ChatResult};
use chatapp::prompt::rustyline::RustylinePrompt;
use chatapp::providers::configs::openai::{OPENAI_DEFAULT_HOST, OPENAI_DEFAULT_MODEL};
use chatapp::providers::configs::OpenAiProviderConfig;
use chatapp::providers::openai::OpenAiProvider;
use chatapp::repl::Repl;
use chatapp::session::ChatSession;
use chatapp::system_prompt::{load_system_prompt, DEFAULT_PROMPT_FILE};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// File whose contents become the system prompt
    #[arg(long, default_value = DEFAULT_PROMPT_FILE)]
    prompt_file: PathBuf,

    /// Model to use
    #[arg(short, long, env = "OPENAI_MODEL", default_value = OPENAI_DEFAULT_MODEL)]
    model: String,

    /// OpenAI API Key (can also be set via OPENAI_API_KEY environment variable)
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of an OpenAI-compatible API
    #[arg(long, env = "OPENAI_API_HOST", default_value = OPENAI_DEFAULT_HOST)]
    host: String,

    /// Sampling temperature sent with every request
    #[arg(long)]
    temperature: Option<f32>,

    /// Upper bound on tokens in each reply
    #[arg(long)]
    max_tokens: Option<i32>,

    /// Write a mermaid diagram of the chat flow to this path
    #[arg(long)]
    diagram: Option<PathBuf>,

    /// Exit when input cannot be read instead of sending the demo question
    #[arg(long)]
    no_fallback: bool,
}

fn init_tracing() {
    // stderr keeps stdout for the transcript
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("chatapp=warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Flags win over the environment; clap already folded `OPENAI_*` in.
fn provider_config(cli: &Cli) -> ChatResult<OpenAiProviderConfig> {
    let api_key = cli.api_key.clone().ok_or_else(|| {
        ChatError::Startup(
            "API key must be provided via --api-key or OPENAI_API_KEY environment variable"
                .to_string(),
        )
    })?;

    Ok(OpenAiProviderConfig {
        host: cli.host.clone(),
        api_key,
        model: cli.model.clone(),
        temperature: cli.temperature,
        max_tokens: cli.max_tokens,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let system_prompt = load_system_prompt(&cli.prompt_file)?;

    let config = provider_config(&cli)?;
    let provider = OpenAiProvider::new(config)
        .context("Failed to build HTTP client")
        .map_err(ChatError::startup)?;

    if let Some(path) = &cli.diagram {
        export_diagram(path);
    }

    let prompt = RustylinePrompt::new()
        .context("Failed to open terminal input")
        .map_err(ChatError::startup)?;
    let session = ChatSession::new(Box::new(provider), system_prompt);

    let mut repl = Repl::new(session, prompt);
    if cli.no_fallback {
        repl = repl.without_fallback();
    }
    repl.run().await;

    Ok(())
}
