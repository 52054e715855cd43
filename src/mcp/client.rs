use super::{AbilityResponse, McpError, MCP_CLIENT_HEADER, OK_STATUS};
use crate::config::resolve_mcp_server_url;
use serde_json::{json, Map, Value};
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Sends one ability invocation to a backend and returns the structured
/// result or a failure. The engine only sees this trait, so tests run
/// against scripted implementations.
pub trait AbilityInvoker {
    fn invoke(
        &self,
        ability: &str,
        payload: &Value,
        context: &Map<String, Value>,
        mcp_client_hint: &str,
    ) -> Result<AbilityResponse, McpError>;
}

/// HTTP implementation: one blocking round trip per call, no retries,
/// bounded by a 30 second timeout.
#[derive(Debug, Clone)]
pub struct McpHttpClient {
    base_url: String,
    timeout: Duration,
}

impl McpHttpClient {
    pub fn new() -> Self {
        Self::with_base_url(resolve_mcp_server_url())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, ability: &str) -> String {
        format!(
            "{}/ability/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(ability)
        )
    }
}

impl Default for McpHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

impl AbilityInvoker for McpHttpClient {
    fn invoke(
        &self,
        ability: &str,
        payload: &Value,
        context: &Map<String, Value>,
        mcp_client_hint: &str,
    ) -> Result<AbilityResponse, McpError> {
        let url = self.endpoint(ability);
        let body = json!({ "payload": payload, "context": context });

        let response = match ureq::post(&url)
            .timeout(self.timeout)
            .set(MCP_CLIENT_HEADER, mcp_client_hint)
            .send_json(body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(code, response)) => {
                return Err(McpError::Status {
                    ability: ability.to_string(),
                    code,
                    body: response.into_string().unwrap_or_default(),
                });
            }
            Err(err) => {
                return Err(McpError::Transport {
                    ability: ability.to_string(),
                    reason: err.to_string(),
                });
            }
        };

        let decoded: AbilityResponse = response.into_json().map_err(|source| McpError::Decode {
            ability: ability.to_string(),
            source,
        })?;
        if decoded.status != OK_STATUS {
            return Err(McpError::AbilityStatus {
                ability: ability.to_string(),
                status: decoded.status,
            });
        }
        Ok(decoded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_encodes_ability_name() {
        let client = McpHttpClient::with_base_url("http://localhost:8000/");
        assert_eq!(
            client.endpoint("accept_payload"),
            "http://localhost:8000/ability/accept_payload"
        );
        assert_eq!(
            client.endpoint("odd name"),
            "http://localhost:8000/ability/odd%20name"
        );
    }

    #[test]
    fn invoke_against_unreachable_backend_is_a_transport_error() {
        // Discard port with nothing listening; the call must surface a
        // transport failure, not panic or hang.
        let client = McpHttpClient::with_base_url("http://127.0.0.1:9");
        let err = client
            .invoke("accept_payload", &json!({}), &Map::new(), "COMMON")
            .expect_err("no listener");
        assert!(matches!(err, McpError::Transport { .. }));
    }
}
