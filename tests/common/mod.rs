#![allow(dead_code)]

use ghl_bridge::{config::GatewayConfig, http, Gateway};
use serde_json::Value;

/// A bridge instance bound to an ephemeral local port, plus a client to
/// drive it.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub async fn spawn(config: GatewayConfig) -> Self {
        let router = http::router(Gateway::new(config));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener address");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve test router");
        });
        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
        }
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("GET request failed")
    }

    pub async fn post(&self, path: &str, body: Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .json(&body)
            .send()
            .await
            .expect("POST request failed")
    }

    /// POST without a body; exercises handlers that treat the body as
    /// optional.
    pub async fn post_empty(&self, path: &str) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .send()
            .await
            .expect("POST request failed")
    }
}

/// Gateway configuration pointing at a stub upstream, with a working
/// credential.
pub fn stub_config(upstream: &wiremock::MockServer) -> GatewayConfig {
    GatewayConfig {
        upstream_url: upstream.uri(),
        access_token: Some("pit-test-token".to_string()),
        ..GatewayConfig::default()
    }
}
