pub(crate) mod routes;
mod state;

pub use state::AppState;

use axum::{
    routing::{get, post},
    Router,
};
use log::info;
use tower_http::cors::CorsLayer;

use crate::gateway::Gateway;

/// Build the full route table. Tests mount this on an ephemeral listener.
pub fn router(gateway: Gateway) -> Router {
    Router::new()
        .route("/health", get(routes::service_health))
        .route("/api/ghl/health", get(routes::health))
        .route("/api/ghl/tools", get(routes::list_tools))
        .route("/api/ghl/execute", post(routes::execute))
        .route("/api/ghl/test", post(routes::test_connection))
        .route("/api/gemini/execute", post(routes::gemini_execute))
        .route("/tools/list", post(routes::tools_list))
        .route("/mcp", post(routes::mcp_rpc))
        .layer(CorsLayer::permissive())
        .with_state(AppState::new(gateway))
}

pub async fn serve(bind: &str, port: u16, gateway: Gateway) -> anyhow::Result<()> {
    let tool_count = gateway.catalog().len();
    let upstream_url = gateway.config().upstream_url.clone();
    let configured = gateway.config().has_credential();
    let router = router(gateway);

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    eprintln!("GHL bridge listening on http://{}", addr);
    info!("GHL bridge listening on http://{}", addr);
    info!(
        "Forwarding {} tools to {} (credential {})",
        tool_count,
        upstream_url,
        if configured { "configured" } else { "missing" }
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Received Ctrl-C, shutting down");
        })
        .await?;

    Ok(())
}
