use std::path::PathBuf;

use clap::Parser;

/// Foreman manufacturing assistant gateway
#[derive(Debug, Parser)]
#[command(name = "foreman", about = "Manufacturing operations assistant backed by AWS Bedrock")]
pub struct Args {
    /// Path to configuration file; defaults and environment are used when omitted
    #[arg(short, long, env = "FOREMAN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the listen address
    #[arg(long, env = "FOREMAN_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
