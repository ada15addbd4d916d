//! Operator CLI for poking the annotation sharing service.

use clap::{Parser, Subcommand};
use marginalia_core::ShareLinkBuilder;
use marginalia_core::share_url::DEFAULT_SHARE_BASE_URL;
use marginalia_remote::SharingClient;

#[derive(Parser)]
#[command(name = "marginalia", version, about = "Annotation sharing service tools")]
struct Cli {
    /// Sharing service base URL.
    #[arg(long, env = "MARGINALIA_BASE_URL", default_value = "http://localhost:4000")]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Allocate a fresh remote annotation id.
    Allocate,
    /// Look up remote metadata for local annotation ids.
    Metadata {
        /// Local annotation ids to query.
        local_ids: Vec<String>,
    },
    /// Print the shareable link for a remote annotation id.
    ShareUrl {
        remote_id: String,
        /// Base URL for share links.
        #[arg(long, env = "MARGINALIA_SHARE_BASE_URL", default_value = DEFAULT_SHARE_BASE_URL)]
        share_base_url: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    tracing::info!("marginalia v{}", env!("CARGO_PKG_VERSION"));

    let cli = Cli::parse();
    match cli.command {
        Command::Allocate => {
            let client = SharingClient::new(cli.base_url);
            let remote_id = client.allocate_remote_id().await?;
            println!("{remote_id}");
        }
        Command::Metadata { local_ids } => {
            let client = SharingClient::new(cli.base_url);
            let metadata = client.remote_metadata(&local_ids).await?;
            for local_id in &local_ids {
                let remote = metadata
                    .get(local_id)
                    .and_then(|m| m.remote_id.as_deref())
                    .unwrap_or("-");
                println!("{local_id}\t{remote}");
            }
        }
        Command::ShareUrl {
            remote_id,
            share_base_url,
        } => {
            let links = ShareLinkBuilder::new(share_base_url);
            println!("{}", links.note_url(&remote_id));
        }
    }
    Ok(())
}
