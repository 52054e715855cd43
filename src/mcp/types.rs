use serde::Deserialize;
use serde_json::Value;

/// Request header carrying the routing-target hint so the remote side can
/// select an execution backend.
pub const MCP_CLIENT_HEADER: &str = "X-MCP-Client";

pub const OK_STATUS: &str = "ok";

fn default_status() -> String {
    OK_STATUS.to_string()
}

fn default_mcp_client() -> String {
    crate::config::DEFAULT_ROUTING_TARGET.to_string()
}

/// Wire response for one ability invocation: `status`, the echoed routing
/// target, and the result value consumed by the merge step.
#[derive(Debug, Clone, Deserialize)]
pub struct AbilityResponse {
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_mcp_client")]
    pub mcp_client: String,
    #[serde(default)]
    pub result: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum McpError {
    #[error("ability `{ability}` request failed: {reason}")]
    Transport { ability: String, reason: String },
    #[error("ability `{ability}` returned HTTP {code}: {body}")]
    Status {
        ability: String,
        code: u16,
        body: String,
    },
    #[error("ability `{ability}` response could not be decoded: {source}")]
    Decode {
        ability: String,
        #[source]
        source: std::io::Error,
    },
    #[error("ability `{ability}` reported status `{status}`")]
    AbilityStatus { ability: String, status: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_fields_default_when_absent() {
        let decoded: AbilityResponse = serde_json::from_str("{}").expect("decode");
        assert_eq!(decoded.status, "ok");
        assert_eq!(decoded.mcp_client, "COMMON");
        assert!(decoded.result.is_null());
    }

    #[test]
    fn response_echoes_resolved_routing_target() {
        let decoded: AbilityResponse = serde_json::from_str(
            r#"{"status": "ok", "mcp_client": "ATLAS", "result": {"risk": "LOW"}}"#,
        )
        .expect("decode");
        assert_eq!(decoded.mcp_client, "ATLAS");
        assert_eq!(decoded.result["risk"], "LOW");
    }
}
