use super::ConfigError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

pub const DEFAULT_ROUTING_TARGET: &str = "COMMON";

pub(crate) fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err(format!(
        "{kind} must use only ASCII letters, digits, '-' or '_'"
    ))
}

/// Tag selecting which backend handles an ability call. Sent on the wire
/// as the `X-MCP-Client` header.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct RoutingTarget(String);

impl RoutingTarget {
    pub fn parse(raw: &str) -> Result<Self, String> {
        validate_identifier_value("routing target", raw)?;
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoutingTarget {
    fn default() -> Self {
        Self(DEFAULT_ROUTING_TARGET.to_string())
    }
}

impl std::fmt::Display for RoutingTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl<'de> Deserialize<'de> for RoutingTarget {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .map_err(|err| D::Error::custom(format!("invalid routing target `{raw}`: {err}")))
    }
}

/// Declared execution mode of a stage. Recorded for diagnostics only:
/// every mode executes its abilities identically and sequentially.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageMode {
    Deterministic,
    NonDeterministic,
    Human,
    Unknown,
}

impl StageMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Deterministic => "deterministic",
            Self::NonDeterministic => "non-deterministic",
            Self::Human => "human",
            Self::Unknown => "unknown",
        }
    }

    /// Unrecognized mode strings collapse to `Unknown` rather than failing
    /// the config load; the stage still executes.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "deterministic" => Self::Deterministic,
            "non-deterministic" | "non_deterministic" => Self::NonDeterministic,
            "human" => Self::Human,
            _ => Self::Unknown,
        }
    }
}

impl Default for StageMode {
    fn default() -> Self {
        Self::Unknown
    }
}

impl std::fmt::Display for StageMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for StageMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StageMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StageConfig {
    pub name: String,
    #[serde(default)]
    pub mode: StageMode,
    pub abilities: Vec<String>,
}

/// Declarative pipeline definition: ordered stages, the ability-name →
/// routing-target table, and the required top-level state keys.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub stages: Vec<StageConfig>,
    #[serde(default)]
    pub ability_to_mcp: BTreeMap<String, RoutingTarget>,
    #[serde(default)]
    pub input_schema: Vec<String>,
}

impl PipelineConfig {
    /// Resolves the routing target for an ability; abilities absent from
    /// `ability_to_mcp` fall back to `COMMON`.
    pub fn routing_for(&self, ability: &str) -> RoutingTarget {
        self.ability_to_mcp
            .get(ability)
            .cloned()
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.stages.is_empty() {
            return Err(ConfigError::Pipeline(
                "pipeline must declare at least one stage".to_string(),
            ));
        }
        for stage in &self.stages {
            if stage.name.trim().is_empty() {
                return Err(ConfigError::Pipeline(
                    "stage name must be non-empty".to_string(),
                ));
            }
            if stage.abilities.is_empty() {
                return Err(ConfigError::Pipeline(format!(
                    "stage `{}` must list at least one ability",
                    stage.name
                )));
            }
            for ability in &stage.abilities {
                validate_identifier_value("ability name", ability).map_err(|err| {
                    ConfigError::Pipeline(format!("stage `{}`: {err}", stage.name))
                })?;
            }
        }
        for ability in self.ability_to_mcp.keys() {
            validate_identifier_value("ability name", ability)
                .map_err(|err| ConfigError::Pipeline(format!("ability_to_mcp: {err}")))?;
        }
        for key in &self.input_schema {
            if key.trim().is_empty() {
                return Err(ConfigError::Pipeline(
                    "input_schema keys must be non-empty".to_string(),
                ));
            }
        }
        Ok(())
    }
}
