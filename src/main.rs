//! relate-account-mcp binary
//!
//! Boots the lookup pipeline, starts the cache sweeper, and serves the MCP
//! tool over the selected transport (streamable HTTP by default, stdio for
//! direct agent attachment).

use std::sync::Arc;

use clap::{Parser, Subcommand};

use relate_account_mcp::cache::LookupCache;
use relate_account_mcp::config::{Config, DEFAULT_ENDPOINT, DEFAULT_PORT};
use relate_account_mcp::logging;
use relate_account_mcp::lookup::LookupService;
use relate_account_mcp::server::http::HttpServer;
use relate_account_mcp::server::RelateAccountServer;
use relate_account_mcp::upstream::UpstreamClient;

#[derive(Parser, Debug)]
#[command(
    name = "relate-account-mcp",
    about = "MCP gateway for the web3.bio identity graph",
    version
)]
struct Cli {
    /// Upstream identity-graph GraphQL endpoint
    #[arg(long, env = "DATA_API_URL", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Authorization header value for the upstream API
    #[arg(long, env = "ACCESS_TOKEN")]
    access_token: Option<String>,

    /// Bind port for the HTTP transport
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve MCP over streamable HTTP (default)
    Http,
    /// Serve MCP over stdin/stdout
    Stdio,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init()?;

    let cli = Cli::parse();
    let config = Config {
        endpoint: cli.endpoint,
        access_token: cli.access_token.filter(|t| !t.is_empty()),
        port: cli.port,
        ..Config::default()
    };

    let upstream = UpstreamClient::new(&config)?;
    let service = Arc::new(LookupService::new(
        LookupCache::new(config.cache_ttl),
        Arc::new(upstream),
    ));

    let sweeper = {
        let service = service.clone();
        let mut ticker = tokio::time::interval(config.sweep_interval);
        tokio::spawn(async move {
            ticker.tick().await; // first tick fires immediately
            loop {
                ticker.tick().await;
                service.sweep_cache();
            }
        })
    };

    let outcome = match cli.command.unwrap_or(Command::Http) {
        Command::Http => HttpServer::new(service, config.port)
            .run()
            .await
            .map_err(anyhow::Error::from),
        Command::Stdio => RelateAccountServer::new(service).serve_stdio().await,
    };

    sweeper.abort();
    outcome
}
