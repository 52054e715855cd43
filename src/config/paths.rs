pub const DEFAULT_PIPELINE_FILE: &str = "config.yaml";
pub const DEFAULT_INPUT_FILE: &str = "sample_input.json";
pub const DEFAULT_STATE_FILE: &str = "response_payload.json";
pub const DEFAULT_LOG_FILE: &str = "agent_run_log.txt";

pub const MCP_SERVER_URL_ENV: &str = "MCP_SERVER_URL";
pub const DEFAULT_MCP_SERVER_URL: &str = "http://localhost:8000";

/// Resolves the remote ability server base URL, preferring the
/// `MCP_SERVER_URL` environment variable when it is set and non-blank.
pub fn resolve_mcp_server_url() -> String {
    std::env::var(MCP_SERVER_URL_ENV)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_MCP_SERVER_URL.to_string())
}
