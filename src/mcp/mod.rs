pub mod client;
pub mod types;

pub use client::{AbilityInvoker, McpHttpClient, DEFAULT_TIMEOUT_SECONDS};
pub use types::{AbilityResponse, McpError, MCP_CLIENT_HEADER, OK_STATUS};
