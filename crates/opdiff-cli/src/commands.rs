use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use opdiff_compare::compare_bytes;
use opdiff_engine::{outcome_message, ComparisonOutcome, DuplicatePolicy};
use opdiff_server::{DiffResponse, OpdiffServer, ServerConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::Compare(args) => cmd_compare(args, cli.format),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None => Ok(ServerConfig::default()),
    }
}

/// Apply command-line overrides on top of the file configuration.
fn effective_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(max) = args.max_operand_size {
        config.max_operand_size = max;
    }
    if args.reject_duplicates {
        config.duplicate_policy = DuplicatePolicy::Reject;
    }
    Ok(config)
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = effective_config(&args)?;
    println!("opdiff listening on {}", config.bind_addr.to_string().bold());
    OpdiffServer::new(config).serve().await?;
    Ok(())
}

fn cmd_compare(args: CompareArgs, format: OutputFormat) -> anyhow::Result<()> {
    let left = std::fs::read(&args.left)
        .with_context(|| format!("reading {}", args.left.display()))?;
    let right = std::fs::read(&args.right)
        .with_context(|| format!("reading {}", args.right.display()))?;

    let outcome = compare_bytes(&left, &right);
    tracing::debug!(left = left.len(), right = right.len(), runs = outcome.runs().len(), "compared files");

    println!("{}", render_outcome(outcome, left.len(), right.len(), format)?);
    Ok(())
}

fn render_outcome(
    outcome: ComparisonOutcome,
    left_len: usize,
    right_len: usize,
    format: OutputFormat,
) -> anyhow::Result<String> {
    let message = outcome_message(&outcome);
    let rendered = match format {
        OutputFormat::Json => {
            let response = DiffResponse {
                message: message.to_string(),
                differences: outcome.into_runs(),
            };
            serde_json::to_string_pretty(&response)?
        }
        OutputFormat::Text => match outcome {
            ComparisonOutcome::Equal => format!("{} {}", "✓".green().bold(), message),
            ComparisonOutcome::UnequalLength => format!(
                "{} {}\n  Lengths: {} vs {} bytes",
                "✗".red().bold(),
                message,
                left_len.to_string().yellow(),
                right_len.to_string().yellow()
            ),
            ComparisonOutcome::Unequal(runs) => {
                let mut lines = vec![format!("{} {}", "✗".red().bold(), message)];
                lines.extend(runs.iter().map(|run| {
                    format!(
                        "  position {} length {}",
                        run.position().to_string().yellow(),
                        run.length().to_string().cyan()
                    )
                }));
                lines.join("\n")
            }
        },
    };
    Ok(rendered)
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
