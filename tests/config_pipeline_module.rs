use stageline::config::{
    load_input_payload, load_pipeline_config, ConfigError, PipelineConfig, RoutingTarget,
    StageMode, DEFAULT_ROUTING_TARGET,
};
use std::fs;
use tempfile::tempdir;

fn full_pipeline_yaml() -> &'static str {
    r#"
stages:
  - name: INTAKE
    mode: deterministic
    abilities: [accept_payload]
  - name: UNDERSTAND
    mode: non-deterministic
    abilities: [parse_request_text, extract_entities]
  - name: WAIT
    mode: human
    abilities: [extract_answer, store_answer]
  - name: DECIDE
    mode: non-deterministic
    abilities: [solution_evaluation, escalation_decision]
ability_to_mcp:
  extract_entities: ATLAS
  solution_evaluation: ATLAS
input_schema:
  - query
  - ticket_id
  - priority
"#
}

#[test]
fn pipeline_document_parses_with_stages_routing_and_schema() {
    let pipeline: PipelineConfig = serde_yaml::from_str(full_pipeline_yaml()).expect("pipeline");
    pipeline.validate().expect("valid");

    assert_eq!(pipeline.stages.len(), 4);
    assert_eq!(pipeline.stages[2].name, "WAIT");
    assert_eq!(pipeline.stages[2].mode, StageMode::Human);
    assert_eq!(pipeline.input_schema, ["query", "ticket_id", "priority"]);
    assert_eq!(pipeline.routing_for("extract_entities").as_str(), "ATLAS");
    assert_eq!(
        pipeline.routing_for("accept_payload").as_str(),
        DEFAULT_ROUTING_TARGET
    );
}

#[test]
fn mode_strings_parse_with_unknown_fallback() {
    assert_eq!(StageMode::parse("deterministic"), StageMode::Deterministic);
    assert_eq!(
        StageMode::parse("non-deterministic"),
        StageMode::NonDeterministic
    );
    assert_eq!(
        StageMode::parse("non_deterministic"),
        StageMode::NonDeterministic
    );
    assert_eq!(StageMode::parse(" HUMAN "), StageMode::Human);
    assert_eq!(StageMode::parse("payload"), StageMode::Unknown);
    assert_eq!(StageMode::parse("payload").to_string(), "unknown");
}

#[test]
fn routing_target_default_is_common() {
    assert_eq!(RoutingTarget::default().as_str(), "COMMON");
    assert!(RoutingTarget::parse("ATLAS").is_ok());
    assert!(RoutingTarget::parse("").is_err());
    assert!(RoutingTarget::parse("has space").is_err());
}

#[test]
fn load_round_trips_a_definition_written_to_disk() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.yaml");
    fs::write(&path, full_pipeline_yaml()).expect("write");

    let pipeline = load_pipeline_config(&path).expect("load");
    assert_eq!(pipeline.stages[0].abilities, ["accept_payload"]);
}

#[test]
fn load_rejects_missing_and_invalid_documents() {
    let dir = tempdir().expect("tempdir");

    let missing = dir.path().join("missing.yaml");
    assert!(matches!(
        load_pipeline_config(&missing),
        Err(ConfigError::Read { .. })
    ));

    let invalid = dir.path().join("invalid.yaml");
    fs::write(&invalid, "stages: {not: [a, list").expect("write");
    assert!(matches!(
        load_pipeline_config(&invalid),
        Err(ConfigError::Parse { .. })
    ));

    let no_stages = dir.path().join("empty.yaml");
    fs::write(&no_stages, "stages: []").expect("write");
    assert!(matches!(
        load_pipeline_config(&no_stages),
        Err(ConfigError::Pipeline(_))
    ));
}

#[test]
fn input_payload_loads_as_an_ordered_object() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("sample_input.json");
    fs::write(
        &path,
        r#"{"query": "internet down", "ticket_id": "T-100", "priority": "high"}"#,
    )
    .expect("write");

    let payload = load_input_payload(&path).expect("payload");
    let keys: Vec<&String> = payload.keys().collect();
    assert_eq!(keys, ["query", "ticket_id", "priority"]);

    let scalar = dir.path().join("scalar.json");
    fs::write(&scalar, "42").expect("write");
    assert!(matches!(
        load_input_payload(&scalar),
        Err(ConfigError::InputNotObject { .. })
    ));
}
