mod config;
mod plan_cmd;
mod readiness_cmd;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use founderpilot_core::readiness::load_questions;

use config::Overrides;

#[derive(Parser)]
#[command(
    name = "fpilot",
    about = "Execution co-founder: turn an idea into a validated plan, then stress-test your readiness"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an execution plan from a one-line idea
    Plan {
        /// The idea, as free text
        #[arg(required = true)]
        idea: Vec<String>,
        /// Model name (overrides FPILOT_MODEL and the config file)
        #[arg(long)]
        model: Option<String>,
        /// Path to the model CLI binary
        #[arg(long)]
        binary: Option<String>,
        /// Wall-time limit per model call, in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Total generation attempts before giving up
        #[arg(long)]
        max_attempts: Option<u32>,
        /// Print the raw plan JSON instead of the rendered dashboard
        #[arg(long)]
        json: bool,
    },
    /// Run the founder readiness assessment
    Readiness {
        /// Comma-separated 1-based option numbers for non-interactive use
        #[arg(long)]
        answers: Option<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the readiness question library
    Questions,
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

fn cmd_init(force: bool) -> Result<()> {
    let path = config::config_path();
    if path.exists() && !force {
        bail!(
            "config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }
    config::save_config(&config::ConfigFile::default())?;
    println!("Wrote {}", path.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Plan {
            idea,
            model,
            binary,
            timeout_secs,
            max_attempts,
            json,
        } => {
            let overrides = Overrides {
                binary,
                model,
                timeout_secs,
                max_attempts,
            };
            let resolved = config::resolve(&overrides)?;
            let idea = idea.join(" ");
            plan_cmd::run_plan(&idea, &resolved, json).await?;
        }
        Commands::Readiness { answers, json } => {
            readiness_cmd::run_readiness(answers.as_deref(), json)?;
        }
        Commands::Questions => {
            readiness_cmd::print_questions(&load_questions());
        }
        Commands::Init { force } => {
            cmd_init(force)?;
        }
    }

    Ok(())
}
