pub mod cli;

use crate::config::{
    load_input_payload, load_pipeline_config, DEFAULT_INPUT_FILE, DEFAULT_LOG_FILE,
    DEFAULT_PIPELINE_FILE, DEFAULT_STATE_FILE,
};
use crate::engine::{plan_execution, ExecutionEngine, ScriptedHumanResponder};
use crate::mcp::McpHttpClient;
use crate::runlog::RunLogger;
use crate::shared::fs_atomic::write_json_artifact;
use cli::{cli_help_lines, parse_cli_verb, CliVerb};
use std::path::PathBuf;

#[derive(Debug, Clone)]
struct RunOptions {
    config_path: PathBuf,
    input_path: PathBuf,
    state_out: PathBuf,
    log_out: PathBuf,
    quiet: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config_path: PathBuf::from(DEFAULT_PIPELINE_FILE),
            input_path: PathBuf::from(DEFAULT_INPUT_FILE),
            state_out: PathBuf::from(DEFAULT_STATE_FILE),
            log_out: PathBuf::from(DEFAULT_LOG_FILE),
            quiet: false,
        }
    }
}

fn take_flag_value(args: &[String], idx: &mut usize, flag: &str) -> Result<String, String> {
    let Some(value) = args.get(*idx + 1) else {
        return Err(format!("{flag} requires a value"));
    };
    *idx += 2;
    Ok(value.clone())
}

fn parse_run_options(args: &[String]) -> Result<RunOptions, String> {
    let mut options = RunOptions::default();
    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--config" => options.config_path = take_flag_value(args, &mut idx, "--config")?.into(),
            "--input" => options.input_path = take_flag_value(args, &mut idx, "--input")?.into(),
            "--state-out" => {
                options.state_out = take_flag_value(args, &mut idx, "--state-out")?.into();
            }
            "--log-out" => options.log_out = take_flag_value(args, &mut idx, "--log-out")?.into(),
            "--quiet" => {
                options.quiet = true;
                idx += 1;
            }
            other => return Err(format!("unexpected argument `{other}`")),
        }
    }
    Ok(options)
}

fn parse_config_path(args: &[String]) -> Result<PathBuf, String> {
    let mut path = PathBuf::from(DEFAULT_PIPELINE_FILE);
    let mut idx = 0;
    while idx < args.len() {
        match args[idx].as_str() {
            "--config" => path = take_flag_value(args, &mut idx, "--config")?.into(),
            other => return Err(format!("unexpected argument `{other}`")),
        }
    }
    Ok(path)
}

pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let Some(verb) = args.first() else {
        return Ok(cli_help_lines().join("\n"));
    };
    match parse_cli_verb(verb) {
        CliVerb::Run => handle_run(&args[1..]),
        CliVerb::Validate => handle_validate(&args[1..]),
        CliVerb::Plan => handle_plan(&args[1..]),
        CliVerb::Help => Ok(cli_help_lines().join("\n")),
        CliVerb::Unknown => Err(format!(
            "unknown command `{verb}`\n\n{}",
            cli_help_lines().join("\n")
        )),
    }
}

fn handle_run(args: &[String]) -> Result<String, String> {
    let options = parse_run_options(args)?;
    let pipeline = load_pipeline_config(&options.config_path).map_err(|err| err.to_string())?;
    let input = load_input_payload(&options.input_path).map_err(|err| err.to_string())?;

    let client = McpHttpClient::new();
    let responder = ScriptedHumanResponder::default();
    let engine = ExecutionEngine::new(&pipeline, &client, &responder);
    let mut logger = if options.quiet {
        RunLogger::quiet()
    } else {
        RunLogger::new()
    };

    let (state, report) = engine.execute(&input, &mut logger);
    let final_state = state.into_value();

    write_json_artifact(&options.state_out, &final_state).map_err(|err| {
        format!(
            "failed to write final state {}: {err}",
            options.state_out.display()
        )
    })?;
    logger.flush(&options.log_out).map_err(|err| {
        format!(
            "failed to write run log {}: {err}",
            options.log_out.display()
        )
    })?;

    let rendered_state = serde_json::to_string_pretty(&final_state)
        .map_err(|err| format!("failed to render final state: {err}"))?;
    let mut out = Vec::new();
    out.push("=== FINAL STATE ===".to_string());
    out.push(rendered_state);
    out.push(format!(
        "run {}: {} abilities executed, {} failed",
        report.run_id,
        report.calls.len(),
        report.failure_count()
    ));
    out.push(format!("final state -> {}", options.state_out.display()));
    out.push(format!("run log -> {}", options.log_out.display()));
    Ok(out.join("\n"))
}

fn handle_validate(args: &[String]) -> Result<String, String> {
    let path = parse_config_path(args)?;
    let pipeline = load_pipeline_config(&path).map_err(|err| err.to_string())?;
    let ability_count: usize = pipeline.stages.iter().map(|s| s.abilities.len()).sum();
    Ok(format!(
        "pipeline {} is valid: {} stages, {} abilities, {} routing overrides",
        path.display(),
        pipeline.stages.len(),
        ability_count,
        pipeline.ability_to_mcp.len()
    ))
}

fn handle_plan(args: &[String]) -> Result<String, String> {
    let path = parse_config_path(args)?;
    let pipeline = load_pipeline_config(&path).map_err(|err| err.to_string())?;
    let plan = plan_execution(&pipeline);
    let mut lines = Vec::with_capacity(plan.len());
    for (index, call) in plan.iter().enumerate() {
        lines.push(format!(
            "{:>3}. {} [stage={} mode={}] -> {}",
            index + 1,
            call.ability,
            call.stage,
            call.mode,
            pipeline.routing_for(&call.ability)
        ));
    }
    Ok(lines.join("\n"))
}
