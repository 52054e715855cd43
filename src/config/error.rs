#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid yaml in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid json in {path}: {source}")]
    ParseInput {
        path: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("input payload {path} must be a top-level JSON object")]
    InputNotObject { path: String },
    #[error("pipeline validation failed: {0}")]
    Pipeline(String),
}
