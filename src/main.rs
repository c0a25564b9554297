use anyhow::Result;
use clap::Parser;
use log::warn;

use ghl_bridge::config::{GatewayConfig, DEFAULT_UPSTREAM_URL};
use ghl_bridge::Gateway;

#[derive(Parser)]
#[command(
    name = "ghl-bridge",
    about = "HTTP bridge between AI function calling and the GoHighLevel MCP endpoint"
)]
struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value = "3000", env = "PORT")]
    port: u16,

    /// Bind address
    #[arg(short, long, default_value = "0.0.0.0")]
    bind: String,

    /// GHL private integration token used as the bearer credential
    #[arg(long, env = "GHL_PIT_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Location id applied when a request does not carry one
    #[arg(long, env = "GHL_LOCATION_ID")]
    location_id: Option<String>,

    /// GHL MCP endpoint to forward tool calls to
    #[arg(long, env = "GHL_MCP_URL", default_value = DEFAULT_UPSTREAM_URL)]
    upstream_url: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = GatewayConfig {
        upstream_url: cli.upstream_url,
        access_token: cli.token,
        default_location_id: cli.location_id,
        ..GatewayConfig::default()
    };
    if !config.has_credential() {
        warn!("GHL_PIT_TOKEN is not set; tool execution will fail until a token is configured");
    }

    ghl_bridge::http::serve(&cli.bind, cli.port, Gateway::new(config)).await
}
