use crate::engine::responder::HumanResponder;
use crate::engine::state::StateStore;
use serde_json::Value;

/// Wire names of the known abilities.
pub mod abilities {
    pub const ACCEPT_PAYLOAD: &str = "accept_payload";
    pub const PARSE_REQUEST_TEXT: &str = "parse_request_text";
    pub const EXTRACT_ENTITIES: &str = "extract_entities";
    pub const NORMALIZE_FIELDS: &str = "normalize_fields";
    pub const ENRICH_RECORDS: &str = "enrich_records";
    pub const ADD_FLAGS_CALCULATIONS: &str = "add_flags_calculations";
    pub const CLARIFY_QUESTION: &str = "clarify_question";
    pub const EXTRACT_ANSWER: &str = "extract_answer";
    pub const STORE_ANSWER: &str = "store_answer";
    pub const KNOWLEDGE_BASE_SEARCH: &str = "knowledge_base_search";
    pub const STORE_DATA: &str = "store_data";
    pub const SOLUTION_EVALUATION: &str = "solution_evaluation";
    pub const ESCALATION_DECISION: &str = "escalation_decision";
    pub const UPDATE_PAYLOAD: &str = "update_payload";
    pub const UPDATE_TICKET: &str = "update_ticket";
    pub const CLOSE_TICKET: &str = "close_ticket";
    pub const RESPONSE_GENERATION: &str = "response_generation";
    pub const EXECUTE_API_CALLS: &str = "execute_api_calls";
    pub const TRIGGER_NOTIFICATIONS: &str = "trigger_notifications";
    pub const OUTPUT_PAYLOAD: &str = "output_payload";
}

pub const ABILITY_OUTPUTS_KEY: &str = "ability_outputs";

/// How one ability's result lands in the state. Every known ability maps
/// to exactly one rule; unknown names fall back to [`MergeRule::Namespaced`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeRule {
    /// Shallow-merge a mapping result into the state root.
    MergeState,
    /// Set one state key to the whole result value.
    SetKey(&'static str),
    /// Set one state key to `result[field]` when the result carries that
    /// field, otherwise to the whole result.
    UnwrapField {
        key: &'static str,
        field: &'static str,
    },
    /// Shallow-merge the result into a nested mapping.
    MergeChild(&'static str),
    /// Set one state key to a single field projected out of the result.
    ProjectField {
        key: &'static str,
        field: &'static str,
    },
    /// Record the clarification question, then synthesize the human reply
    /// through the injected responder.
    Clarify,
    /// Record the evaluation list and derive the top-scored solution.
    Evaluations,
    /// Park the result under `ability_outputs[name]`.
    Namespaced,
}

pub fn rule_for(ability: &str) -> MergeRule {
    use abilities::*;
    match ability {
        ACCEPT_PAYLOAD | NORMALIZE_FIELDS | UPDATE_PAYLOAD => MergeRule::MergeState,
        PARSE_REQUEST_TEXT => MergeRule::UnwrapField {
            key: "summary",
            field: "summary",
        },
        EXTRACT_ENTITIES => MergeRule::SetKey("entities"),
        ENRICH_RECORDS => MergeRule::MergeChild("enrichment"),
        ADD_FLAGS_CALCULATIONS => MergeRule::MergeChild("flags"),
        CLARIFY_QUESTION => MergeRule::Clarify,
        EXTRACT_ANSWER => MergeRule::ProjectField {
            key: "human_answer",
            field: "answer",
        },
        STORE_ANSWER => MergeRule::ProjectField {
            key: "stored_answer",
            field: "stored",
        },
        KNOWLEDGE_BASE_SEARCH => MergeRule::SetKey("kb"),
        STORE_DATA => MergeRule::SetKey("kb_stored"),
        SOLUTION_EVALUATION => MergeRule::Evaluations,
        ESCALATION_DECISION => MergeRule::SetKey("escalation_decision"),
        UPDATE_TICKET => MergeRule::SetKey("ticket_update"),
        CLOSE_TICKET => MergeRule::SetKey("ticket_close"),
        RESPONSE_GENERATION => MergeRule::ProjectField {
            key: "customer_response",
            field: "response",
        },
        EXECUTE_API_CALLS => MergeRule::SetKey("api_actions"),
        TRIGGER_NOTIFICATIONS => MergeRule::SetKey("notifications"),
        OUTPUT_PAYLOAD => MergeRule::SetKey("output_payload"),
        _ => MergeRule::Namespaced,
    }
}

/// Applies the ability's merge rule to the state. Idempotent given the
/// same result value; never fails.
pub fn apply_merge(
    state: &mut StateStore,
    ability: &str,
    result: Value,
    responder: &dyn HumanResponder,
) {
    match rule_for(ability) {
        MergeRule::MergeState => state.merge_root(&result),
        MergeRule::SetKey(key) => state.set(key, result),
        MergeRule::UnwrapField { key, field } => {
            let value = match result.get(field) {
                Some(inner) => inner.clone(),
                None => result,
            };
            state.set(key, value);
        }
        MergeRule::MergeChild(key) => state.merge_child(key, result),
        MergeRule::ProjectField { key, field } => {
            let value = result.get(field).cloned().unwrap_or(Value::Null);
            state.set(key, value);
        }
        MergeRule::Clarify => {
            let question = result.get("clarify_question").cloned().unwrap_or(Value::Null);
            let question_text = match &question {
                Value::String(text) => text.clone(),
                other => other.to_string(),
            };
            state.set("clarify_question", question);
            let reply = responder.answer(&question_text);
            state.set("human_reply", Value::String(reply));
        }
        MergeRule::Evaluations => {
            let top = top_solution(&result);
            state.set("evaluations", result);
            state.set("top_solution", top);
        }
        MergeRule::Namespaced => state.set_namespaced(ABILITY_OUTPUTS_KEY, ability, result),
    }
}

/// Picks the element with the maximum numeric `score`; ties keep the
/// first-encountered element. Anything that is not a scoreable sequence
/// comes back unchanged.
fn top_solution(result: &Value) -> Value {
    let Some(items) = result.as_array() else {
        return result.clone();
    };
    let mut best: Option<(&Value, f64)> = None;
    for item in items {
        let Some(score) = item.get("score").and_then(Value::as_f64) else {
            continue;
        };
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((item, score)),
        }
    }
    match best {
        Some((item, _)) => item.clone(),
        None => result.clone(),
    }
}
