//! # DNS Race
//!
//! Forwarding DNS front end that races every configured upstream and answers
//! with whichever resolves first.

mod bootstrap;
mod server;

use clap::Parser;
use dns_race_domain::CliOverrides;
use tracing::info;

#[derive(Parser)]
#[command(name = "dns-race")]
#[command(version = "0.1.0")]
#[command(about = "Answers A/AAAA queries from the fastest of several upstream resolvers")]
struct Cli {
    /// Path to configuration file
    #[arg(short = 'c', long)]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Upstream resolver as ip[:port]; repeat for each one
    #[arg(short = 's', long = "server")]
    servers: Vec<String>,

    /// Per-upstream time limit in milliseconds
    #[arg(long)]
    dial_timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let overrides = CliOverrides {
        bind_address: cli.bind,
        dns_port: cli.dns_port,
        servers: cli.servers,
        dial_timeout_ms: cli.dial_timeout_ms,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting DNS race server v{}", env!("CARGO_PKG_VERSION"));

    tokio::select! {
        result = server::start_dns_server(&config) => result?,
        _ = tokio::signal::ctrl_c() => info!("Shutdown signal received"),
    }

    Ok(())
}
