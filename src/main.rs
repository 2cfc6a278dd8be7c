#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::uninlined_format_args)]

use anyhow::Result;
use clap::{Parser, Subcommand};
use deskmate::{agent, knowledge::KnowledgeBase, providers, Config};
use tracing_subscriber::{fmt, EnvFilter};

fn parse_temperature(s: &str) -> std::result::Result<f64, String> {
    let t: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if !(0.0..=2.0).contains(&t) {
        return Err("temperature must be between 0.0 and 2.0".to_string());
    }
    Ok(t)
}

/// `deskmate` - a tiny tool-calling assistant.
#[derive(Parser, Debug)]
#[command(name = "deskmate")]
#[command(version)]
#[command(about = "Tiny tool-calling AI assistant backed by a canned-response knowledge base.", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the assistant loop
    #[command(long_about = "\
Start the assistant loop.

Launches an interactive chat session with the configured AI provider. \
Use --message for single-shot queries without entering interactive mode.

Examples:
  deskmate agent                       # interactive session
  deskmate agent -m \"hello there\"      # single message
  deskmate agent --model gpt-4o -t 0.2")]
    Agent {
        /// Single message mode (don't enter interactive mode)
        #[arg(short, long)]
        message: Option<String>,

        /// Provider to use (openai)
        #[arg(short, long)]
        provider: Option<String>,

        /// Model to use
        #[arg(long)]
        model: Option<String>,

        /// Temperature (0.0 - 2.0)
        #[arg(short, long, default_value = "0.7", value_parser = parse_temperature)]
        temperature: f64,
    },

    /// List supported AI providers
    Providers,

    /// Show resolved configuration and knowledge base summary
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging - respects RUST_LOG env var, defaults to INFO
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    let cli = Cli::parse();
    let config = Config::from_env();

    match cli.command {
        Commands::Agent {
            message,
            provider,
            model,
            temperature,
        } => agent::run(config, message, provider, model, temperature)
            .await
            .map(|_| ()),

        Commands::Providers => {
            let providers = providers::list_providers();
            println!("Supported providers ({} total):\n", providers.len());
            for p in &providers {
                let marker = if p.name == config.provider {
                    " (active)"
                } else {
                    ""
                };
                println!("  {:<10} {}{}", p.name, p.display_name, marker);
            }
            Ok(())
        }

        Commands::Status => {
            let knowledge = KnowledgeBase::builtin();
            println!("deskmate status");
            println!();
            println!("Version:      {}", env!("CARGO_PKG_VERSION"));
            println!("Provider:     {}", config.provider);
            println!("Model:        {}", config.model);
            println!("Temperature:  {}", config.temperature);
            println!(
                "Credential:   {}",
                if config.api_key.is_some() {
                    "set"
                } else {
                    "missing (set OPENAI_API_KEY)"
                }
            );
            println!();
            println!("Knowledge base ({} entries):", knowledge.len());
            println!("{}", knowledge.category_lines());
            Ok(())
        }
    }
}
