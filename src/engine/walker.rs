use crate::config::{PipelineConfig, StageMode};

/// One entry of the linear execution plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedCall {
    pub stage: String,
    pub mode: StageMode,
    pub ability: String,
}

/// Flattens the pipeline into the deterministic sequence of ability
/// calls: stage order, then within-stage order. Mode never reorders,
/// branches, or skips; the sequence ends after the last ability of the
/// last stage.
pub fn plan_execution(pipeline: &PipelineConfig) -> Vec<PlannedCall> {
    let mut plan = Vec::new();
    for stage in &pipeline.stages {
        for ability in &stage.abilities {
            plan.push(PlannedCall {
                stage: stage.name.clone(),
                mode: stage.mode,
                ability: ability.clone(),
            });
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plan_is_stage_order_then_within_stage_order() {
        let pipeline: PipelineConfig = serde_yaml::from_str(
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
    abilities: [extract_answer]
"#,
        )
        .expect("pipeline");

        let plan = plan_execution(&pipeline);
        let abilities: Vec<&str> = plan.iter().map(|call| call.ability.as_str()).collect();
        assert_eq!(
            abilities,
            [
                "accept_payload",
                "parse_request_text",
                "extract_entities",
                "extract_answer"
            ]
        );
        assert_eq!(plan[1].stage, "UNDERSTAND");
        assert_eq!(plan[3].mode, StageMode::Human);
    }

    #[test]
    fn unknown_modes_do_not_change_the_plan() {
        let pipeline: PipelineConfig = serde_yaml::from_str(
            r#"
stages:
  - name: A
    mode: something-new
    abilities: [first, second]
  - name: B
    abilities: [third]
"#,
        )
        .expect("pipeline");

        let plan = plan_execution(&pipeline);
        assert_eq!(plan.len(), 3);
        assert!(plan[..2].iter().all(|call| call.mode == StageMode::Unknown));
    }
}
