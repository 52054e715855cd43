pub mod executor;
pub mod merge;
pub mod responder;
pub mod state;
pub mod walker;

pub use executor::{CallOutcome, CallRecord, ExecutionEngine, RunReport};
pub use merge::{abilities, apply_merge, rule_for, MergeRule, ABILITY_OUTPUTS_KEY};
pub use responder::{HumanResponder, ScriptedHumanResponder, DEFAULT_SCRIPTED_REPLY};
pub use state::StateStore;
pub use walker::{plan_execution, PlannedCall};
