use std::time::Duration;

/// GoHighLevel MCP execution endpoint all tool calls are forwarded to.
pub const DEFAULT_UPSTREAM_URL: &str = "https://services.leadconnectorhq.com/mcp/";

/// Timeout for regular tool execution calls in seconds.
pub const EXECUTE_TIMEOUT_SECS: u64 = 30;

/// Timeout for connection-test (probe) calls in seconds. Probes run a cheap
/// read-only tool, so they get a tighter bound than general execution.
pub const PROBE_TIMEOUT_SECS: u64 = 10;

/// Client identifier sent on every upstream request.
pub const USER_AGENT: &str = concat!("ghl-bridge/", env!("CARGO_PKG_VERSION"));

/// Runtime configuration for the gateway. Built once in `main` (or a test)
/// and injected into [`Gateway`](crate::gateway::Gateway); nothing reads the
/// process environment after startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Upstream execution endpoint. Overridable so tests can point the
    /// gateway at a stub server.
    pub upstream_url: String,
    /// GHL private integration token. `None` or blank means execution calls
    /// fail fast with a configuration error.
    pub access_token: Option<String>,
    /// Location id applied when a request does not carry one.
    pub default_location_id: Option<String>,
    pub execute_timeout: Duration,
    pub probe_timeout: Duration,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            access_token: None,
            default_location_id: None,
            execute_timeout: Duration::from_secs(EXECUTE_TIMEOUT_SECS),
            probe_timeout: Duration::from_secs(PROBE_TIMEOUT_SECS),
        }
    }
}

impl GatewayConfig {
    /// Whether a usable bearer credential is configured.
    pub fn has_credential(&self) -> bool {
        self.access_token
            .as_deref()
            .is_some_and(|token| !token.trim().is_empty())
    }
}
