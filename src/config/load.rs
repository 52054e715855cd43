use super::{ConfigError, PipelineConfig};
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

/// Reads, parses, and validates the pipeline definition document.
pub fn load_pipeline_config(path: &Path) -> Result<PipelineConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: PipelineConfig =
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })?;
    config.validate()?;
    Ok(config)
}

/// Reads the initial input payload; the document must be a JSON object.
pub fn load_input_payload(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let value: Value = serde_json::from_str(&raw).map_err(|source| ConfigError::ParseInput {
        path: path.display().to_string(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ConfigError::InputNotObject {
            path: path.display().to_string(),
        }),
    }
}
