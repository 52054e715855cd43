pub mod error;
pub mod load;
pub mod paths;
pub mod pipeline_file;

pub use error::ConfigError;
pub use load::{load_input_payload, load_pipeline_config};
pub use paths::{
    resolve_mcp_server_url, DEFAULT_INPUT_FILE, DEFAULT_LOG_FILE, DEFAULT_MCP_SERVER_URL,
    DEFAULT_PIPELINE_FILE, DEFAULT_STATE_FILE, MCP_SERVER_URL_ENV,
};
pub use pipeline_file::{
    PipelineConfig, RoutingTarget, StageConfig, StageMode, DEFAULT_ROUTING_TARGET,
};
