use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "opdiff",
    about = "opdiff: pairwise binary payload comparison service",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API
    Serve(ServeArgs),
    /// Compare two local files byte by byte
    Compare(CompareArgs),
    /// Print the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long)]
    pub bind: Option<SocketAddr>,
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Reject resubmission into a transaction with an unconsumed operand
    #[arg(long)]
    pub reject_duplicates: bool,
    /// Largest accepted operand, in bytes
    #[arg(long)]
    pub max_operand_size: Option<usize>,
}

#[derive(Args)]
pub struct CompareArgs {
    pub left: PathBuf,
    pub right: PathBuf,
}

#[derive(Args)]
pub struct ConfigArgs {
    /// TOML configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}
