//! Command-line client for exercising a running netprobe server.

use clap::{Parser, Subcommand};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "probe-cli")]
#[command(about = "Client for exercising a netprobe server", long_about = None)]
struct Cli {
    /// Base URL of the netprobe server.
    #[arg(short, long, default_value = "http://localhost")]
    url: String,

    /// Accept self-signed certificates (for https:// URLs).
    #[arg(short = 'k', long)]
    insecure: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Echo connection metadata as seen by the server
    Echo {
        /// Request path to probe (any unmatched path echoes)
        #[arg(default_value = "/")]
        path: String,
    },
    /// Fetch the synthetic download payload and report its size
    Download,
    /// Upload a zero-filled payload of the given size
    Upload {
        /// Payload size in bytes
        #[arg(default_value_t = 1024)]
        size: usize,
    },
    /// Print the server status report
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::builder()
        .danger_accept_invalid_certs(cli.insecure)
        .build()?;
    let base = cli.url.trim_end_matches('/').to_string();

    match cli.command {
        Commands::Echo { path } => {
            let path = if path.starts_with('/') {
                path
            } else {
                format!("/{path}")
            };
            let res = client.get(format!("{base}{path}")).send().await?;
            print_json(res).await?;
        }
        Commands::Download => {
            let res = client.get(format!("{base}/download")).send().await?;
            let status = res.status();
            let bytes = res.bytes().await?;
            println!("downloaded {} bytes (status {})", bytes.len(), status);
        }
        Commands::Upload { size } => {
            let res = client
                .post(format!("{base}/upload"))
                .header(CONTENT_TYPE, "application/octet-stream")
                .body(vec![0u8; size])
                .send()
                .await?;
            print_json(res).await?;
        }
        Commands::Status => {
            let res = client.get(format!("{base}/status")).send().await?;
            print_json(res).await?;
        }
    }

    Ok(())
}

async fn print_json(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("server returned status {status}");
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
