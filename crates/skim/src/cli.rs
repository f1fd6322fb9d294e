//! CLI argument parsing with clap

use camino::Utf8PathBuf;
use clap::{Args, Parser, Subcommand};
use skim_core::UnknownKindPolicy;

/// skim - extract a list of container images from Kubernetes resources
#[derive(Parser, Debug)]
#[command(name = "skim")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to a skim.yaml config file
    #[arg(short, long, global = true)]
    pub config: Option<Utf8PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List container images from Kubernetes resources
    #[command(after_help = "Example: skim list path/to/k8s-manifest.yaml")]
    List(ListArgs),

    /// Show the resource kinds skim understands
    Kinds(KindsArgs),

    /// Show version information
    Version(VersionArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Manifest files or directories, or - for stdin
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,

    /// What to do with resource kinds skim does not know: fail, skip or free-text
    #[arg(long, value_name = "POLICY", env = "SKIM_UNKNOWN_KIND")]
    pub unknown_kind: Option<UnknownKindPolicy>,

    /// Treat a custom kind like a built-in one, e.g. example.com/v1.WebApp=apps/v1.Deployment
    #[arg(long = "map-kind", value_name = "FROM=TO", value_parser = parse_kind_alias)]
    pub map_kind: Vec<(String, String)>,

    /// Give up after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub timeout: Option<u64>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct KindsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Parse a `FROM=TO` kind mapping
fn parse_kind_alias(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((from, to)) if !from.trim().is_empty() && !to.trim().is_empty() => {
            Ok((from.trim().to_string(), to.trim().to_string()))
        }
        _ => Err(format!("invalid kind mapping '{}', expected FROM=TO", value)),
    }
}
