use crate::config::{PipelineConfig, StageMode};
use crate::engine::merge::{abilities, apply_merge};
use crate::engine::responder::HumanResponder;
use crate::engine::state::StateStore;
use crate::engine::walker::plan_execution;
use crate::mcp::AbilityInvoker;
use crate::runlog::RunLogger;
use crate::shared::ids::generate_run_id;
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

pub const QUERY_KEY: &str = "query";
pub const HUMAN_REPLY_KEY: &str = "human_reply";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallOutcome {
    Merged,
    Failed { reason: String },
}

impl CallOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// One executed ability call as recorded in the run report.
#[derive(Debug, Clone, Serialize)]
pub struct CallRecord {
    pub stage: String,
    pub mode: StageMode,
    pub ability: String,
    pub mcp_client: String,
    pub outcome: CallOutcome,
}

/// Record of a completed run: identity, wall-clock bounds, and the full
/// call sequence with outcomes.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub run_id: String,
    pub started_at: String,
    pub finished_at: String,
    pub calls: Vec<CallRecord>,
}

impl RunReport {
    pub fn executed_abilities(&self) -> Vec<&str> {
        self.calls.iter().map(|call| call.ability.as_str()).collect()
    }

    pub fn failure_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| call.outcome.is_failure())
            .count()
    }
}

/// Walks the pipeline's planned calls in order, invoking each ability and
/// merging its result into the owned state. One ability's failure never
/// aborts the run or touches the state.
pub struct ExecutionEngine<'a> {
    pipeline: &'a PipelineConfig,
    invoker: &'a dyn AbilityInvoker,
    responder: &'a dyn HumanResponder,
}

impl<'a> ExecutionEngine<'a> {
    pub fn new(
        pipeline: &'a PipelineConfig,
        invoker: &'a dyn AbilityInvoker,
        responder: &'a dyn HumanResponder,
    ) -> Self {
        Self {
            pipeline,
            invoker,
            responder,
        }
    }

    /// Runs the whole pipeline against `input`. Infallible at the run
    /// level: per-ability failures are logged, recorded, and skipped
    /// over. Exactly two log entries per ability (pre-call, post-call).
    pub fn execute(
        &self,
        input: &Map<String, Value>,
        logger: &mut RunLogger,
    ) -> (StateStore, RunReport) {
        let started_at = now_stamp();
        let run_id = allocate_run_id();
        let mut state = StateStore::seeded(input, &self.pipeline.input_schema);
        let mut calls = Vec::new();

        for planned in plan_execution(self.pipeline) {
            let routing = self.pipeline.routing_for(&planned.ability);
            let (payload, context) = build_request(&planned.ability, &state, input);

            logger.append(&format!(
                "Calling ability {} via MCP={} [stage={} mode={}]",
                planned.ability, routing, planned.stage, planned.mode
            ));

            match self
                .invoker
                .invoke(&planned.ability, &payload, &context, routing.as_str())
            {
                Ok(response) => {
                    logger.append(&format!(
                        "Ability {} returned via {}: {}",
                        planned.ability, response.mcp_client, response.result
                    ));
                    calls.push(CallRecord {
                        stage: planned.stage,
                        mode: planned.mode,
                        ability: planned.ability.clone(),
                        mcp_client: response.mcp_client,
                        outcome: CallOutcome::Merged,
                    });
                    apply_merge(&mut state, &planned.ability, response.result, self.responder);
                }
                Err(err) => {
                    logger.append(&format!("Ability {} failed: {err}", planned.ability));
                    calls.push(CallRecord {
                        stage: planned.stage,
                        mode: planned.mode,
                        ability: planned.ability,
                        mcp_client: routing.as_str().to_string(),
                        outcome: CallOutcome::Failed {
                            reason: err.to_string(),
                        },
                    });
                }
            }
        }

        let report = RunReport {
            run_id,
            started_at,
            finished_at: now_stamp(),
            calls,
        };
        (state, report)
    }
}

/// Builds the request payload and context for one ability. The ingest
/// ability receives the raw caller input verbatim; everything else gets
/// the state projection with `query` guaranteed present. The answer
/// extraction ability additionally carries the state's `human_reply` in
/// the request context (the remote side supplies the documented default
/// when it is null).
fn build_request(
    ability: &str,
    state: &StateStore,
    input: &Map<String, Value>,
) -> (Value, Map<String, Value>) {
    let payload = if ability == abilities::ACCEPT_PAYLOAD {
        Value::Object(input.clone())
    } else {
        state.payload_with_query()
    };
    let mut context = Map::new();
    if ability == abilities::EXTRACT_ANSWER {
        let _ = context.insert(
            HUMAN_REPLY_KEY.to_string(),
            state.get(HUMAN_REPLY_KEY).cloned().unwrap_or(Value::Null),
        );
    }
    (payload, context)
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn allocate_run_id() -> String {
    let now = Utc::now().timestamp();
    generate_run_id(now).unwrap_or_else(|_| format!("run-{now}"))
}
