use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "airdrop-loader")]
#[command(about = "Validate an airdrop allowlist and load it into PostgreSQL", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the allowlist JSON document
    pub allowlist_path: PathBuf,

    /// Human-readable label for the distribution
    pub label: String,

    /// Reward token contract address (0x-prefixed, 20 bytes); omit for native token
    pub token_address: Option<String>,

    /// Walk every proof from its leaf and require it to resolve to the shared root
    #[arg(long)]
    pub verify_proofs: bool,
}
